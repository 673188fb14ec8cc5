//! Power-law random banded matrix.
//!
//!   H_ij = G_ij / sqrt(1 + (r_ij / b)^{2a})
//!
//! `G` is GOE and `r_ij` the distance between sites, measured around the
//! ring under periodic boundaries.

use crate::error::{HamiltonianError, Result};
use crate::hamiltonian::{Hamiltonian, ModelCore, ModelKind};
use crate::quadratic::{QuadraticCore, QuadraticSource};
use crate::random::{ensure_hermitian, ModelContext, RandomStream};
use crate::scalar::Element;
use nalgebra::DMatrix;
use phyz_lattice::BoundaryCondition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlrbParams {
    pub a: f64,
    pub b: f64,
}

impl Default for PlrbParams {
    fn default() -> Self {
        Self { a: 1.0, b: 1.0 }
    }
}

#[derive(Debug)]
pub struct PowerLawRandomBandwidth<T: Element> {
    quad: QuadraticCore<T>,
    params: PlrbParams,
    stream: RandomStream,
}

impl<T: Element> PowerLawRandomBandwidth<T> {
    pub fn new(
        source: impl Into<QuadraticSource>,
        constant: f64,
        params: PlrbParams,
        ctx: &ModelContext,
    ) -> Self {
        let quad = QuadraticCore::new(ModelKind::PowerLawRandomBandwidth, source, constant, ctx);
        let mut model = Self {
            quad,
            params,
            stream: ctx.stream(),
        };
        model.update_info();
        model
    }

    pub fn params(&self) -> &PlrbParams {
        &self.params
    }

    pub fn set_a(&mut self, a: f64) {
        self.params.a = a;
    }

    pub fn set_b(&mut self, b: f64) {
        self.params.b = b;
    }

    pub fn set_many_body(&mut self, many_body: bool) {
        self.quad.many_body = many_body;
    }

    pub fn quadratic(&self) -> &QuadraticCore<T> {
        &self.quad
    }

    pub fn reseed(&mut self, seed: u64) {
        self.stream.reseed(seed);
    }
}

fn distance(i: usize, j: usize, ns: usize, bc: BoundaryCondition) -> usize {
    let d = i.abs_diff(j);
    match bc {
        BoundaryCondition::Pbc => d.min(ns - d),
        BoundaryCondition::Obc => d,
    }
}

impl<T: Element> Hamiltonian<T> for PowerLawRandomBandwidth<T> {
    fn core(&self) -> &ModelCore<T> {
        &self.quad.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<T> {
        &mut self.quad.core
    }

    fn hamiltonian(&mut self) -> Result<()> {
        self.quad.core.require_sites()?;
        let PlrbParams { a, b } = self.params;
        if b <= 0.0 {
            return Err(HamiltonianError::InvalidParameter(format!(
                "PLRB bandwidth b must be positive, got {b}"
            )));
        }
        let ns = self.quad.core.ns();
        let bc = self.quad.core.hilbert().bc();

        let mut h: DMatrix<T> = self.stream.goe(ns);
        for j in 0..ns {
            for i in 0..ns {
                let r = distance(i, j, ns, bc) as f64;
                let envelope = 1.0 / (1.0 + (r / b).powf(2.0 * a)).sqrt();
                h[(i, j)] *= T::from_re(envelope);
            }
        }
        ensure_hermitian(&h, "PLRB");
        self.quad.core.set_matrix(h);
        Ok(())
    }

    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String {
        let head = self
            .quad
            .core
            .info_head(skip, sep, prec)
            .param("a", self.params.a)
            .param("b", self.params.b)
            .param_int("mb", i64::from(self.quad.many_body));
        self.quad.info_tail(head).finish()
    }
}
