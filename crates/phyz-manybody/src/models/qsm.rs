//! Quantum sun model: an ergodic dot of `N` spins coupled to `L = Ntot - N`
//! outer spins with couplings that decay along the chain.
//!
//!   H = γ/sqrt(2^N + 1) R ⊗ 1
//!     + Σ_j g0 α_j^{u_j} σx_{n_j} σx_{N+j}
//!     + Σ_j h_j σz_{N+j}
//!
//! `R` is a GOE matrix on the dot, `u_j = j + 1 + ξ_j` and `n_j` is a dot
//! site drawn uniformly for every outer spin. Sites `0..N` form the dot.

use super::spin;
use crate::basis::{flip, sigma_z};
use crate::error::{HamiltonianError, Result};
use crate::hamiltonian::{fill_local, Hamiltonian, ModelCore, ModelKind};
use crate::hilbert::HilbertSpace;
use crate::random::{ModelContext, RandomStream};
use crate::scalar::Element;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::Level;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QsmParams {
    /// Dot size.
    pub n: usize,
    /// Total number of spins.
    pub ntot: usize,
    pub gamma: f64,
    pub g0: f64,
    pub alpha: Vec<f64>,
    pub xi: Vec<f64>,
    pub h: Vec<f64>,
}

impl QsmParams {
    /// Number of outer spins.
    pub fn outer(&self) -> usize {
        self.ntot.saturating_sub(self.n)
    }

    fn validate(&self, ns: usize) -> Result<()> {
        if self.ntot != ns {
            return Err(HamiltonianError::InvalidParameter(format!(
                "QSM Ntot={} does not match Ns={ns}",
                self.ntot
            )));
        }
        if self.n > self.ntot {
            return Err(HamiltonianError::InvalidParameter(format!(
                "QSM dot size N={} exceeds Ntot={}",
                self.n, self.ntot
            )));
        }
        let l = self.outer();
        if l > 0 && self.n == 0 {
            return Err(HamiltonianError::InvalidParameter(
                "QSM outer spins need a dot of at least one spin".into(),
            ));
        }
        spin::require_len("alpha", &self.alpha, l)?;
        spin::require_len("xi", &self.xi, l)?;
        spin::require_len("h", &self.h, l)
    }

    /// `g0 α_j^{u_j}` for every outer spin.
    fn couplings(&self) -> Vec<f64> {
        (0..self.outer())
            .map(|j| {
                let u = j as f64 + 1.0 + self.xi[j];
                self.g0 * self.alpha[j].powf(u)
            })
            .collect()
    }
}

impl Default for QsmParams {
    fn default() -> Self {
        Self {
            n: 1,
            ntot: 1,
            gamma: 1.0,
            g0: 1.0,
            alpha: Vec::new(),
            xi: Vec::new(),
            h: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct Qsm<T: Element> {
    core: ModelCore<T>,
    params: QsmParams,
    stream: RandomStream,
}

impl<T: Element> Qsm<T> {
    pub fn new(hilbert: HilbertSpace, params: QsmParams, ctx: &ModelContext) -> Result<Self> {
        let core = ModelCore::many_body(ModelKind::Qsm, hilbert, ctx)?;
        params.validate(core.ns())?;
        let mut model = Self {
            core,
            params,
            stream: ctx.stream(),
        };
        model.update_info();
        Ok(model)
    }

    pub fn params(&self) -> &QsmParams {
        &self.params
    }

    pub fn set_params(&mut self, params: QsmParams) {
        self.params = params;
    }

    pub fn reseed(&mut self, seed: u64) {
        self.stream.reseed(seed);
    }
}

impl<T: Element> Hamiltonian<T> for Qsm<T> {
    fn core(&self) -> &ModelCore<T> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<T> {
        &mut self.core
    }

    fn hamiltonian(&mut self) -> Result<()> {
        self.core.require_sites()?;
        let p = &self.params;
        p.validate(self.core.ns())?;

        let n = p.n;
        let dot_dim = 1usize << n;
        let mask = (dot_dim - 1) as u64;
        let scale = p.gamma / ((dot_dim + 1) as f64).sqrt();
        let dot: DMatrix<f64> = self.stream.goe(dot_dim);
        let couplings = p.couplings();
        let partners: Vec<usize> = (0..p.outer()).map(|_| self.stream.uniform_index(n)).collect();
        self.core.log(
            &format!("QSM dot partners: {partners:?}"),
            Level::DEBUG,
            4,
        );

        let h = fill_local(self.core.hilbert(), |s, t| {
            let a = (s & mask) as usize;
            let rest = s & !mask;
            for b in 0..dot_dim {
                let amp = scale * dot[(b, a)];
                if b == a {
                    t.diagonal += amp;
                } else {
                    t.push(rest | b as u64, amp);
                }
            }
            for (j, (&c, &partner)) in couplings.iter().zip(&partners).enumerate() {
                t.push(flip(flip(s, partner), n + j), c);
                t.diagonal += p.h[j] * sigma_z(s, n + j);
            }
        });
        self.core.set_matrix(h);
        Ok(())
    }

    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String {
        let p = &self.params;
        self.core
            .info_head(skip, sep, prec)
            .param_int("N", p.n as i64)
            .param("gamma", p.gamma)
            .param("g0", p.g0)
            .param_first("alpha", &p.alpha)
            .param_first("xi", &p.xi)
            .param_first("h", &p.h)
            .finish()
    }
}
