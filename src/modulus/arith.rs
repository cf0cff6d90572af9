//! Modular kernel: gcd, extended gcd, inverse, overflow-safe product and
//! exponentiation. Everything above the kernel (twiddle tables, butterflies,
//! CRT reconstruction) reduces to these five operations.

use crate::error::{NttError, Result};

/// Euclidean gcd; gcd(a, 0) = a.
pub fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Extended gcd: returns (g, x, y) with x*a + y*b = g = gcd(a, b).
pub fn egcd(a: i64, b: i64) -> (i64, i64, i64) {
    if a == 0 {
        (b, 0, 1)
    } else {
        let (g, x, y) = egcd(b % a, a);
        (g, y - (b / a) * x, x)
    }
}

/// a^-1 mod n, reduced into [0, n).
///
/// For n = 1 the inverse is the (valid) value 0; that case is an `Ok`, while
/// gcd(a, n) != 1 is an `Err` and never aliases it.
pub fn mod_inv(a: i64, n: i64) -> Result<i64> {
    let (g, x, _) = egcd(a, n);
    if g != 1 {
        return Err(NttError::NotInvertible { a, n });
    }
    let mut r = x % n;
    if r < 0 {
        r += n;
    }
    Ok(r)
}

/// a*b mod m via double-and-add, so intermediates never leave [0, 2m).
/// Exact for any m < 2^62; negative inputs are reduced into [0, m) first.
pub fn mod_mul(a: i64, b: i64, m: i64) -> i64 {
    let m = m as u64;
    let mut a = (a.rem_euclid(m as i64)) as u64;
    let mut b = (b.rem_euclid(m as i64)) as u64;
    let mut res: u64 = 0;
    while a != 0 {
        if a & 1 == 1 {
            res = (res + b) % m;
        }
        a >>= 1;
        b = (b << 1) % m;
    }
    res as i64
}

/// a^b mod m via binary exponentiation, reduced into [0, m).
///
/// A negative exponent inverts `a` first and fails if no inverse exists.
pub fn mod_pow(a: i64, b: i64, m: i64) -> Result<i64> {
    if b < 0 {
        let a_inv = mod_inv(a, m)?;
        return Ok(pow_nonneg(a_inv, -b, m));
    }
    Ok(pow_nonneg(a, b, m))
}

/// Non-negative-exponent branch of [`mod_pow`]; cannot fail.
pub(crate) fn pow_nonneg(a: i64, b: i64, m: i64) -> i64 {
    debug_assert!(b >= 0);

    let mut a = a.rem_euclid(m);
    let mut b = b;
    let mut res: i64 = 1 % m;

    while b > 0 {
        if b & 1 == 1 {
            res = mod_mul(res, a, m);
        }
        a = mod_mul(a, a, m);
        b >>= 1;
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_egcd() {
        assert_eq!(gcd(12, 0), 12);
        assert_eq!(gcd(0, 12), 12);
        assert_eq!(gcd(54, 24), 6);

        for (a, b) in [(240, 46), (17, 97), (1, 1), (35, 64)] {
            let (g, x, y) = egcd(a, b);
            assert_eq!(g, gcd(a, b));
            assert_eq!(x * a + y * b, g);
        }
    }

    #[test]
    fn mod_inv_round_trip() {
        let n: i64 = 97;
        for a in 1..n {
            let a_inv = mod_inv(a, n).unwrap();
            assert_eq!(mod_mul(a_inv, a, n), 1);
        }
        // composite modulus: only units are invertible
        let n: i64 = 24;
        for a in 1..n {
            match mod_inv(a, n) {
                Ok(a_inv) => {
                    assert_eq!(gcd(a, n), 1);
                    assert_eq!(mod_mul(a_inv, a, n), 1);
                }
                Err(NttError::NotInvertible { .. }) => assert_ne!(gcd(a, n), 1),
                Err(e) => panic!("unexpected error {e}"),
            }
        }
    }

    #[test]
    fn mod_inv_modulus_one() {
        // everything is 0 mod 1, and 0 is the valid inverse
        assert_eq!(mod_inv(5, 1), Ok(0));
        assert_eq!(mod_inv(0, 1), Ok(0));
    }

    #[test]
    fn mod_mul_matches_wide_product() {
        let m: i64 = (1 << 61) + 129; // near the top of the safe range
        for (a, b) in [
            (1i64 << 60, (1i64 << 60) + 12345),
            (m - 1, m - 1),
            (-5, 7),
            (123456789, 987654321),
        ] {
            let want = ((a as i128).rem_euclid(m as i128) * (b as i128).rem_euclid(m as i128)
                % m as i128) as i64;
            assert_eq!(mod_mul(a, b, m), want);
        }
    }

    #[test]
    fn mod_pow_matches_naive() {
        let m: i64 = 1009;
        for a in 0..32 {
            for b in 0..16 {
                let mut want: i64 = 1;
                for _ in 0..b {
                    want = want * a % m;
                }
                assert_eq!(mod_pow(a, b, m).unwrap(), want);
            }
        }
    }

    #[test]
    fn mod_pow_negative_exponent() {
        let m: i64 = 101;
        let r = mod_pow(3, -5, m).unwrap();
        assert_eq!(mod_mul(r, mod_pow(3, 5, m).unwrap(), m), 1);

        // 2 has no inverse mod 10
        assert_eq!(
            mod_pow(2, -1, 10),
            Err(NttError::NotInvertible { a: 2, n: 10 })
        );
    }
}
