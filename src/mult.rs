//! Multi-modulus multiplier: exact cyclic convolution of two length-n limb
//! sequences. Each residue channel is one butterfly plan; when more than one
//! prime is needed to bound the convolution values, the channels are
//! recombined per position with the Chinese Remainder Theorem.

use itertools::izip;

use crate::dft::bfly::BflyPlan;
use crate::error::{NttError, Result};
use crate::modulus::arith::{mod_inv, mod_mul};
use crate::modulus::prime::NttFriendlyPrimes;

/// Largest admissible product of moduli; above this the double-and-add
/// modular products of the CRT recombination stop being exact.
const PROD_MAX: i128 = 1 << 62;

/// CRT recombination pair for one plan: ni = (prod of all p_j) / p_i and
/// d = ni^-1 mod p_i.
#[derive(Debug, Clone, Copy)]
pub struct CrtCoef {
    pub ni: i64,
    pub d: i64,
}

/// Reusable multiplier for length-n sequences with limbs bounded by a fixed
/// maximum. Plans and CRT coefficients are read-only after construction; the
/// scratch buffers are not, so `multiply` takes `&mut self` and concurrent
/// calls need separate `Multiplier` values.
#[derive(Debug)]
pub struct Multiplier {
    n: i64,
    plans: Vec<BflyPlan>,
    crt: Vec<CrtCoef>,
    prod_p: i64,
    ntt_a: Vec<Vec<i64>>,
    ntt_b: Vec<Vec<i64>>,
    ntt_c: Vec<Vec<i64>>,
    res: Vec<Vec<i64>>,
}

impl Multiplier {
    /// Selects moduli for limbs in [0, max_limb]: primes p = nk + 1 are
    /// chained until their product exceeds the worst-case convolution value
    /// n * max_limb^2. The first prime already sits above that bound, so the
    /// default outcome is a single plan.
    pub fn new(n: i64, max_limb: i64) -> Result<Self> {
        if n < 2 || max_limb < 1 {
            return Err(NttError::InvalidSize { n, p: 0 });
        }

        let bound = n as i128 * max_limb as i128 * max_limb as i128;
        if bound >= PROD_MAX {
            return Err(NttError::ModulusOverflow { n });
        }

        let mut walk = NttFriendlyPrimes::new(n, bound as i64 + n);
        let mut primes: Vec<i64> = Vec::new();
        let mut prod: i128 = 1;
        while prod <= bound {
            let p = walk.next().ok_or(NttError::ModulusOverflow { n })?;
            prod *= p as i128;
            primes.push(p);
        }

        Self::from_primes(n, primes)
    }

    /// Builds the multiplier over caller-chosen moduli: pairwise-distinct
    /// primes, each of the form nk + 1. This is the explicit multi-plan
    /// (CRT) form; `new` is the self-selecting one.
    pub fn with_moduli(n: i64, moduli: &[i64]) -> Result<Self> {
        if moduli.is_empty() {
            return Err(NttError::InvalidSize { n, p: 0 });
        }
        for (i, &p) in moduli.iter().enumerate() {
            if moduli[..i].contains(&p) {
                return Err(NttError::InvalidSize { n, p });
            }
        }
        Self::from_primes(n, moduli.to_vec())
    }

    fn from_primes(n: i64, primes: Vec<i64>) -> Result<Self> {
        let prod: i128 = primes.iter().map(|&p| p as i128).product();
        if prod >= PROD_MAX {
            return Err(NttError::ModulusOverflow { n });
        }
        let prod_p = prod as i64;

        // plan construction validates each prime (primality, p = 1 mod n)
        let plans: Vec<BflyPlan> = primes
            .iter()
            .map(|&p| BflyPlan::new(n, Some(p)))
            .collect::<Result<_>>()?;

        let crt: Vec<CrtCoef> = plans
            .iter()
            .map(|plan| -> Result<CrtCoef> {
                let ni = prod_p / plan.p;
                Ok(CrtCoef {
                    ni,
                    d: mod_inv(ni, plan.p)?,
                })
            })
            .collect::<Result<_>>()?;

        let nu = n as usize;
        let scratch = || vec![vec![0i64; nu]; plans.len()];
        Ok(Self {
            n,
            crt,
            prod_p,
            ntt_a: scratch(),
            ntt_b: scratch(),
            ntt_c: scratch(),
            res: scratch(),
            plans,
        })
    }

    pub fn n(&self) -> i64 {
        self.n
    }

    pub fn plans(&self) -> &[BflyPlan] {
        &self.plans
    }

    /// Product of all plan moduli; convolution values are exact below it.
    pub fn modulus_product(&self) -> i64 {
        self.prod_p
    }

    /// c = cyclic convolution of a and b, exact (not reduced by any single
    /// transform prime). Carry propagation of c into a positional number is
    /// the caller's job.
    pub fn multiply(&mut self, a: &[i64], b: &[i64], c: &mut [i64]) {
        let n = self.n as usize;
        assert_eq!(a.len(), n, "invalid argument a: len {} != n {}", a.len(), n);
        assert_eq!(b.len(), n, "invalid argument b: len {} != n {}", b.len(), n);
        assert_eq!(c.len(), n, "invalid argument c: len {} != n {}", c.len(), n);

        for (plan, ntt_a, ntt_b) in izip!(&self.plans, &mut self.ntt_a, &mut self.ntt_b) {
            plan.ntt(a, ntt_a);
            plan.ntt(b, ntt_b);
        }

        for (plan, ntt_a, ntt_b, ntt_c) in
            izip!(&self.plans, &self.ntt_a, &self.ntt_b, &mut self.ntt_c)
        {
            for (x, y, z) in izip!(ntt_a, ntt_b, ntt_c.iter_mut()) {
                *z = mod_mul(*x, *y, plan.p);
            }
        }

        for (plan, ntt_c, res) in izip!(&self.plans, &self.ntt_c, &mut self.res) {
            plan.intt(ntt_c, res);
        }

        if self.plans.len() == 1 {
            c.copy_from_slice(&self.res[0]);
            return;
        }

        // per position: sum of res_i * ni_i * d_i mod prod_p
        for (pos, c) in c.iter_mut().enumerate() {
            let mut acc: i64 = 0;
            for (coef, res) in izip!(&self.crt, &self.res) {
                acc = (acc + mod_mul(coef.ni, mod_mul(coef.d, res[pos], self.prod_p), self.prod_p))
                    % self.prod_p;
            }
            *c = acc;
        }
    }
}
