//! Matrix-multiplication transform plan: the O(N^2) reference engine used
//! to validate the butterfly engine. Tolerates any n dividing p - 1.

use itertools::izip;

use crate::dft::plan_params;
use crate::error::Result;
use crate::modulus::arith::{mod_mul, pow_nonneg};

#[derive(Debug)]
pub struct GemmPlan {
    /// Number of points in the transform.
    pub n: i64,
    /// Prime modulus of the form nk + 1.
    pub p: i64,
    /// n^-1 mod p, the inverse transform's scaling factor.
    pub n_inv: i64,
    /// Row-major n x n forward matrix, entry (i, j) = w^(ij) mod p.
    fwd_mat: Vec<i64>,
    /// Row-major n x n inverse matrix, entry (i, j) = w^(-ij) mod p.
    inv_mat: Vec<i64>,
}

impl GemmPlan {
    pub fn new(n: i64, modulus: Option<i64>) -> Result<Self> {
        let (p, n_inv, w, w_inv) = plan_params(n, modulus)?;

        let nu = n as usize;
        let mut fwd_mat = vec![0i64; nu * nu];
        let mut inv_mat = vec![0i64; nu * nu];
        for i in 0..nu {
            for j in 0..nu {
                let ij = (i * j) as i64;
                fwd_mat[i * nu + j] = pow_nonneg(w, ij, p);
                inv_mat[i * nu + j] = pow_nonneg(w_inv, ij, p);
            }
        }

        Ok(Self {
            n,
            p,
            n_inv,
            fwd_mat,
            inv_mat,
        })
    }

    /// out = NTT(inp), entries in [0, p).
    pub fn ntt(&self, inp: &[i64], out: &mut [i64]) {
        self.apply(&self.fwd_mat, inp, out);
    }

    /// out = INTT(inp) = n_inv * (inverse matrix * inp), entries in [0, p).
    pub fn intt(&self, inp: &[i64], out: &mut [i64]) {
        self.apply(&self.inv_mat, inp, out);
        out.iter_mut()
            .for_each(|x| *x = mod_mul(*x, self.n_inv, self.p));
    }

    fn apply(&self, mat: &[i64], inp: &[i64], out: &mut [i64]) {
        let n = self.n as usize;
        assert_eq!(inp.len(), n, "invalid argument inp: len {} != n {}", inp.len(), n);
        assert_eq!(out.len(), n, "invalid argument out: len {} != n {}", out.len(), n);

        let p = self.p;
        for (row, o) in izip!(mat.chunks_exact(n), out.iter_mut()) {
            let mut r: i64 = 0;
            for (w, x) in izip!(row, inp) {
                r = (r + mod_mul(*w, *x, p)) % p;
            }
            *o = r;
        }
    }
}
