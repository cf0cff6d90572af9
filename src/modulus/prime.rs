//! Primality, totient, distinct-prime factorization, root-of-unity search,
//! and the NTT-friendly prime walk used by plan construction.

use crate::error::{NttError, Result};
use crate::modulus::arith::{mod_mul, pow_nonneg};

/// Largest input for which [`is_prime`] is deterministic. Above this the
/// test answers `false` ("probable composite") rather than guessing.
pub const IS_PRIME_DETERMINISTIC_MAX: i64 = 341_550_071_728_321;

/// Miller-Rabin witness sets, each paired with the smallest bound below
/// which the set is known to be deterministic.
const MILLER_RABIN_TABLE: &[(i64, &[i64])] = &[
    (2_047, &[2]),
    (1_373_653, &[2, 3]),
    (9_080_191, &[31, 73]),
    (25_326_001, &[2, 3, 5]),
    (3_215_031_751, &[2, 3, 5, 7]),
    (4_759_123_141, &[2, 7, 61]),
    (1_122_004_669_633, &[2, 13, 23, 1_662_803]),
    (2_152_302_898_747, &[2, 3, 5, 7, 11]),
    (3_474_749_660_383, &[2, 3, 5, 7, 11, 13]),
    (IS_PRIME_DETERMINISTIC_MAX, &[2, 3, 5, 7, 11, 13, 17]),
];

/// One Miller-Rabin round with witness `a`.
fn milrab(n: i64, a: i64) -> bool {
    if n % a == 0 {
        return false;
    }

    // n = 2^r * d + 1 with d odd
    let mut r = 0;
    let mut d = n - 1;
    while d % 2 == 0 {
        r += 1;
        d /= 2;
    }

    let mut x = pow_nonneg(a, d, n);
    if x == 1 || x == n - 1 {
        return true;
    }
    for _ in 0..r - 1 {
        x = mod_mul(x, x, n);
        if x == n - 1 {
            return true;
        }
    }
    false
}

/// Deterministic Miller-Rabin primality test.
///
/// Inputs above [`IS_PRIME_DETERMINISTIC_MAX`] are reported as composite:
/// the answer degrades to "probable composite" instead of extending the
/// witness table past its proven range.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 || n == 5 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    for &(bound, witnesses) in MILLER_RABIN_TABLE {
        if n < bound {
            return witnesses.iter().all(|&a| milrab(n, a));
        }
    }
    false
}

/// Euler's totient by trial division.
pub fn totient(n: i64) -> i64 {
    let mut n = n;
    let mut tot = n;
    let mut i: i64 = 2;
    while i * i <= n {
        if n % i == 0 {
            while n % i == 0 {
                n /= i;
            }
            tot -= tot / i;
        }
        // 2 is the only even candidate
        if i == 2 {
            i = 1;
        }
        i += 2;
    }
    if n > 1 {
        tot -= tot / n;
    }
    tot
}

/// Distinct prime factors of `n`, unordered, each reported once.
///
/// Candidates of the form 6k+-5 are swept up to half the (2,3-reduced)
/// value, not its square root; the leftover appended at the end is only
/// guaranteed prime within the ranges this crate exercises.
pub fn factor_uup(n: i64) -> Vec<i64> {
    let mut facts: Vec<i64> = Vec::new();
    let mut n = n;

    if n % 2 == 0 {
        facts.push(2);
        while n % 2 == 0 {
            n /= 2;
        }
    }
    if n % 3 == 0 {
        facts.push(3);
        while n % 3 == 0 {
            n /= 3;
        }
    }

    let max_n = n / 2;
    let mut i: i64 = 5;
    while i <= max_n {
        for c in [i, i + 2] {
            if n % c == 0 && is_prime(c) {
                facts.push(c);
                while n % c == 0 {
                    n /= c;
                }
            }
        }
        i += 6;
    }

    if n > 1 {
        facts.push(n);
    }
    facts
}

/// First primitive root mod `n`: the smallest a >= 2 with
/// a^(phi(n)/q) != 1 (mod n) for every distinct prime q | phi(n).
pub fn primitive_root(n: i64) -> Result<i64> {
    let tot = totient(n);
    let tot_facts = factor_uup(tot);

    let mut a: i64 = 2;
    while a <= n {
        if tot_facts.iter().all(|&q| pow_nonneg(a, tot / q, n) != 1) {
            return Ok(a);
        }
        a += 1;
    }
    Err(NttError::NoRootFound { n })
}

/// Smallest a with a^n = 1 (mod p), scanning a = 2..n.
pub fn nth_root_unity(n: i64, p: i64) -> Result<i64> {
    for a in 2..n {
        if pow_nonneg(a, n, p) == 1 {
            return Ok(a);
        }
    }
    Err(NttError::NoRootFound { n: p })
}

/// Walks candidates p = nk + 1 upward from a floor, yielding the primes
/// among them. Every yielded p satisfies p = 1 (mod n), the modulus shape
/// both transform engines require.
pub struct NttFriendlyPrimes {
    n: i64,
    next_p: i64,
}

impl NttFriendlyPrimes {
    /// Candidates start at the first value of the form nk + 1 at or above
    /// `n * (floor / n) + 1`.
    pub fn new(n: i64, floor: i64) -> Self {
        Self {
            n,
            next_p: n * (floor / n) + 1,
        }
    }
}

impl Iterator for NttFriendlyPrimes {
    type Item = i64;

    /// Ends (returns `None`) once candidates leave the deterministic range
    /// of [`is_prime`].
    fn next(&mut self) -> Option<i64> {
        loop {
            let p = self.next_p;
            if p > IS_PRIME_DETERMINISTIC_MAX {
                return None;
            }
            self.next_p += self.n;
            if is_prime(p) {
                return Some(p);
            }
        }
    }
}
