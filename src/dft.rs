pub mod bfly;
pub mod gemm;

use crate::error::{NttError, Result};
use crate::modulus::arith::{mod_inv, pow_nonneg};
use crate::modulus::prime::{is_prime, primitive_root, NttFriendlyPrimes};

/// Resolves the shared plan parameters for an n-point transform:
/// (p, n_inv, w, w_inv) where p = nk + 1 is prime, w = g^k for g a primitive
/// root mod p (hence a primitive n-th root of unity), and w_inv = w^-1.
///
/// `modulus = None` auto-selects the smallest prime of the form nk + 1;
/// a supplied modulus must already be prime and congruent to 1 mod n.
fn plan_params(n: i64, modulus: Option<i64>) -> Result<(i64, i64, i64, i64)> {
    if n < 2 {
        return Err(NttError::InvalidSize {
            n,
            p: modulus.unwrap_or(0),
        });
    }

    let p = match modulus {
        Some(p) => {
            if p < 2 || !is_prime(p) || (p - 1) % n != 0 {
                return Err(NttError::InvalidSize { n, p });
            }
            p
        }
        None => NttFriendlyPrimes::new(n, n + 1)
            .next()
            .ok_or(NttError::InvalidSize { n, p: 0 })?,
    };

    let n_inv = mod_inv(n, p)?;
    let k = (p - 1) / n;
    let g = primitive_root(p)?;
    let w = pow_nonneg(g, k, p);
    let w_inv = mod_inv(w, p)?;

    Ok((p, n_inv, w, w_inv))
}
