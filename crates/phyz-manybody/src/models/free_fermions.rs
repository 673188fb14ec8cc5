//! Free fermions with nearest-neighbour hopping and a uniform Peierls phase.
//!
//!   H = -t Σ_<ij> (e^{iφ} c†_i c_j + h.c.) + const

use super::hopping_bonds;
use crate::error::{HamiltonianError, Result};
use crate::hamiltonian::{Hamiltonian, ModelCore, ModelKind};
use crate::quadratic::{QuadraticCore, QuadraticSource};
use crate::random::ModelContext;
use crate::scalar::Element;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeFermionsParams {
    pub t: f64,
    pub phase: f64,
}

impl Default for FreeFermionsParams {
    fn default() -> Self {
        Self { t: 1.0, phase: 0.0 }
    }
}

#[derive(Debug)]
pub struct FreeFermions<T: Element> {
    quad: QuadraticCore<T>,
    params: FreeFermionsParams,
}

impl<T: Element> FreeFermions<T> {
    pub fn new(
        source: impl Into<QuadraticSource>,
        constant: f64,
        params: FreeFermionsParams,
        ctx: &ModelContext,
    ) -> Self {
        let quad = QuadraticCore::new(ModelKind::FreeFermions, source, constant, ctx);
        let mut model = Self { quad, params };
        model.update_info();
        model
    }

    pub fn params(&self) -> &FreeFermionsParams {
        &self.params
    }

    pub fn set_t(&mut self, t: f64) {
        self.params.t = t;
    }

    pub fn set_phase(&mut self, phase: f64) {
        self.params.phase = phase;
    }

    pub fn quadratic(&self) -> &QuadraticCore<T> {
        &self.quad
    }
}

impl<T: Element> Hamiltonian<T> for FreeFermions<T> {
    fn core(&self) -> &ModelCore<T> {
        &self.quad.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<T> {
        &mut self.quad.core
    }

    fn hamiltonian(&mut self) -> Result<()> {
        self.quad.core.require_sites()?;
        let ns = self.quad.core.ns();
        let (sin, cos) = self.params.phase.sin_cos();
        if !T::IS_COMPLEX && sin != 0.0 {
            return Err(HamiltonianError::InvalidParameter(format!(
                "FF phase {} needs complex matrix elements",
                self.params.phase
            )));
        }
        let hop = T::from_parts(-self.params.t * cos, -self.params.t * sin);

        let mut h = DMatrix::<T>::zeros(ns, ns);
        for (i, j) in hopping_bonds(self.quad.core.hilbert()) {
            h[(i, j)] += hop;
            h[(j, i)] += hop.conjugate();
        }
        self.quad.core.set_matrix(h);
        Ok(())
    }

    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String {
        let head = self
            .quad
            .core
            .info_head(skip, sep, prec)
            .param("t", self.params.t)
            .param("phi", self.params.phase);
        self.quad.info_tail(head).finish()
    }
}
