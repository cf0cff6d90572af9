pub type Result<T> = core::result::Result<T, NttError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NttError {
    /// No modular inverse exists: gcd(a, n) != 1.
    #[error("{a} is not invertible mod {n}")]
    NotInvertible { a: i64, n: i64 },

    /// A root-of-unity search exhausted its candidate range.
    #[error("no root of unity found mod {n}")]
    NoRootFound { n: i64 },

    /// Transform size or modulus violates p = Nk + 1, primality, or the
    /// power-of-two requirement of the butterfly engine.
    #[error("invalid transform size/modulus: n = {n}, p = {p}")]
    InvalidSize { n: i64, p: i64 },

    /// The product of the chosen moduli would leave the range where
    /// double-and-add modular products are exact (m < 2^62), or the prime
    /// walk ran past the deterministic range of the primality test before
    /// the product covered the convolution bound.
    #[error("modulus product overflows the working word for n = {n}")]
    ModulusOverflow { n: i64 },
}
