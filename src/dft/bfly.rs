//! Butterfly transform plan: the O(N log N) production engine. In-place
//! iterative Cooley-Tukey over Z_p with precomputed twiddle vectors and a
//! bit-reversal input permutation; n must be a power of two.

use crate::dft::plan_params;
use crate::error::{NttError, Result};
use crate::modulus::arith::mod_mul;
use crate::modulus::WordOps;

#[derive(Debug)]
pub struct BflyPlan {
    /// Number of points in the transform; always a power of two.
    pub n: i64,
    /// Prime modulus of the form nk + 1.
    pub p: i64,
    /// n^-1 mod p, the inverse transform's scaling factor.
    pub n_inv: i64,
    /// Forward twiddles: w[i] = w^i mod p.
    w: Vec<i64>,
    /// Inverse twiddles: iw[i] = w^-i mod p.
    iw: Vec<i64>,
}

impl BflyPlan {
    pub fn new(n: i64, modulus: Option<i64>) -> Result<Self> {
        if n < 2 || n & (n - 1) != 0 {
            return Err(NttError::InvalidSize {
                n,
                p: modulus.unwrap_or(0),
            });
        }
        let (p, n_inv, w0, w0_inv) = plan_params(n, modulus)?;

        // running products instead of one exponentiation per entry
        let nu = n as usize;
        let mut w = vec![0i64; nu];
        let mut iw = vec![0i64; nu];
        w[0] = 1;
        iw[0] = 1;
        for i in 1..nu {
            w[i] = mod_mul(w[i - 1], w0, p);
            iw[i] = mod_mul(iw[i - 1], w0_inv, p);
        }

        Ok(Self { n, p, n_inv, w, iw })
    }

    /// out = NTT(inp), entries in [0, p).
    pub fn ntt(&self, inp: &[i64], out: &mut [i64]) {
        self.transform(&self.w, inp, out);
    }

    /// out = INTT(inp) = n_inv * butterfly(inp, w^-1), entries in [0, p).
    pub fn intt(&self, inp: &[i64], out: &mut [i64]) {
        self.transform(&self.iw, inp, out);
        out.iter_mut()
            .for_each(|x| *x = mod_mul(*x, self.n_inv, self.p));
    }

    /// Shared butterfly network; the plan is never mutated, the whole
    /// transform runs in place on `out`.
    fn transform(&self, tw: &[i64], inp: &[i64], out: &mut [i64]) {
        let n = self.n as usize;
        assert_eq!(inp.len(), n, "invalid argument inp: len {} != n {}", inp.len(), n);
        assert_eq!(out.len(), n, "invalid argument out: len {} != n {}", out.len(), n);

        let p = self.p;
        for (o, x) in out.iter_mut().zip(inp.iter()) {
            *o = x % p;
        }
        bit_reverse(out);

        // span doubles each stage; slot t pairs (i, i + m/2) with twiddle
        // tw[t * n / m] across every group of m elements
        let mut m = 2;
        while m <= n {
            let m2 = m / 2;
            for t in 0..m2 {
                let wi = tw[t * n / m];
                let mut i = t;
                while i < n {
                    let j = i + m2;
                    let u = out[i];
                    let v = mod_mul(out[j], wi, p);
                    out[i] = (u + v) % p;
                    out[j] = (u - v) % p;
                    i += m;
                }
            }
            m *= 2;
        }

        // running differences can be negative
        out.iter_mut().for_each(|x| {
            if *x < 0 {
                *x += p;
            }
        });
    }
}

/// Swap each index with its bit-reversed counterpart (relative to log2(n)
/// bits); callers guarantee n is a power of two >= 2.
fn bit_reverse(buf: &mut [i64]) {
    let n = buf.len();
    let bits = n.log2() as u32;
    for i in 0..n {
        let j = i.reverse_bits_msb(bits);
        if j > i {
            buf.swap(i, j);
        }
    }
}
