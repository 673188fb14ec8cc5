//! Aubry-Andre model: nearest-neighbour hopping with a quasi-periodic
//! on-site potential.
//!
//!   H = -J Σ_<ij> (c†_i c_j + h.c.) + λ Σ_i cos(2πβ i + φ) n_i + const

use super::hopping_bonds;
use crate::error::Result;
use crate::hamiltonian::{Hamiltonian, ModelCore, ModelKind};
use crate::quadratic::{QuadraticCore, QuadraticSource};
use crate::random::ModelContext;
use crate::scalar::Element;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AubryAndreParams {
    pub j: f64,
    pub lambda: f64,
    pub beta: f64,
    pub phi: f64,
}

impl Default for AubryAndreParams {
    fn default() -> Self {
        Self {
            j: 1.0,
            lambda: 0.5,
            beta: (1.0 + 5f64.sqrt()) / 2.0,
            phi: 1.0,
        }
    }
}

#[derive(Debug)]
pub struct AubryAndre<T: Element> {
    quad: QuadraticCore<T>,
    params: AubryAndreParams,
}

impl<T: Element> AubryAndre<T> {
    pub fn new(
        source: impl Into<QuadraticSource>,
        constant: f64,
        params: AubryAndreParams,
        ctx: &ModelContext,
    ) -> Self {
        let quad = QuadraticCore::new(ModelKind::AubryAndre, source, constant, ctx);
        let mut model = Self { quad, params };
        model.update_info();
        model
    }

    pub fn params(&self) -> &AubryAndreParams {
        &self.params
    }

    pub fn set_lambda(&mut self, lambda: f64) {
        self.params.lambda = lambda;
    }

    pub fn set_phi(&mut self, phi: f64) {
        self.params.phi = phi;
    }

    pub fn quadratic(&self) -> &QuadraticCore<T> {
        &self.quad
    }

    /// On-site potential at `site`.
    pub fn potential(&self, site: usize) -> f64 {
        let p = &self.params;
        p.lambda * (TAU * p.beta * site as f64 + p.phi).cos()
    }
}

impl<T: Element> Hamiltonian<T> for AubryAndre<T> {
    fn core(&self) -> &ModelCore<T> {
        &self.quad.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<T> {
        &mut self.quad.core
    }

    fn hamiltonian(&mut self) -> Result<()> {
        self.quad.core.require_sites()?;
        let ns = self.quad.core.ns();
        let hop = T::from_re(-self.params.j);

        let mut h = DMatrix::<T>::zeros(ns, ns);
        for i in 0..ns {
            h[(i, i)] = T::from_re(self.potential(i));
        }
        for (i, j) in hopping_bonds(self.quad.core.hilbert()) {
            h[(i, j)] += hop;
            h[(j, i)] += hop;
        }
        self.quad.core.set_matrix(h);
        Ok(())
    }

    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String {
        let p = &self.params;
        let head = self
            .quad
            .core
            .info_head(skip, sep, prec)
            .param("J", p.j)
            .param("lmb", p.lambda)
            .param("bet", p.beta)
            .param("phi", p.phi);
        self.quad.info_tail(head).finish()
    }
}
