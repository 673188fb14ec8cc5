//! Ultrametric random matrix.
//!
//!   H = Σ_{k=0}^{L} J_k / sqrt(2^{N+k} + 1) · GOE_{2^{N+k}} ⊗ 1
//!
//! with `J_0 = 1` and `J_k = g α_k^k`. Level `k` couples the lowest `N+k`
//! spins; every level draws an independent GOE matrix.

use super::spin;
use crate::error::{HamiltonianError, Result};
use crate::hamiltonian::{project, Hamiltonian, ModelCore, ModelKind};
use crate::hilbert::HilbertSpace;
use crate::random::{ensure_hermitian, ModelContext, RandomStream};
use crate::scalar::Element;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UltrametricParams {
    /// Size of the innermost block in spins.
    pub n: usize,
    pub ntot: usize,
    pub alpha: Vec<f64>,
    pub g: f64,
}

impl UltrametricParams {
    pub fn levels(&self) -> usize {
        self.ntot.saturating_sub(self.n)
    }

    fn validate(&self, ns: usize) -> Result<()> {
        if self.ntot != ns || self.n > self.ntot {
            return Err(HamiltonianError::InvalidParameter(format!(
                "ultrametric N={}, Ntot={} do not fit Ns={ns}",
                self.n, self.ntot
            )));
        }
        spin::require_len("alpha", &self.alpha, self.levels())
    }

    fn strength(&self, k: usize) -> f64 {
        if k == 0 {
            1.0
        } else {
            self.g * self.alpha[k - 1].powi(k as i32)
        }
    }
}

impl Default for UltrametricParams {
    fn default() -> Self {
        Self {
            n: 1,
            ntot: 1,
            alpha: Vec::new(),
            g: 1.0,
        }
    }
}

#[derive(Debug)]
pub struct Ultrametric<T: Element> {
    core: ModelCore<T>,
    params: UltrametricParams,
    stream: RandomStream,
}

impl<T: Element> Ultrametric<T> {
    pub fn new(hilbert: HilbertSpace, params: UltrametricParams, ctx: &ModelContext) -> Result<Self> {
        let core = ModelCore::many_body(ModelKind::Ultrametric, hilbert, ctx)?;
        params.validate(core.ns())?;
        let mut model = Self {
            core,
            params,
            stream: ctx.stream(),
        };
        model.update_info();
        Ok(model)
    }

    pub fn params(&self) -> &UltrametricParams {
        &self.params
    }

    pub fn set_params(&mut self, params: UltrametricParams) {
        self.params = params;
    }

    pub fn reseed(&mut self, seed: u64) {
        self.stream.reseed(seed);
    }
}

impl<T: Element> Hamiltonian<T> for Ultrametric<T> {
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

        let full_dim = 1usize << p.ntot;
        let mut full = DMatrix::<T>::zeros(full_dim, full_dim);
        for k in 0..=p.levels() {
            let bits = p.n + k;
            let block = 1usize << bits;
            let scale = p.strength(k) / ((block + 1) as f64).sqrt();
            let goe: DMatrix<f64> = self.stream.goe(block);
            for r in 0..(full_dim >> bits) {
                let offset = r << bits;
                for j in 0..block {
                    for i in 0..block {
                        full[(offset + i, offset + j)] += T::from_re(scale * goe[(i, j)]);
                    }
                }
            }
        }
        ensure_hermitian(&full, "ultrametric");

        let h = project(full, self.core.hilbert());
        self.core.set_matrix(h);
        Ok(())
    }

    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String {
        let p = &self.params;
        self.core
            .info_head(skip, sep, prec)
            .param_int("N", p.n as i64)
            .param("g", p.g)
            .param_first("alpha", &p.alpha)
            .finish()
    }
}
