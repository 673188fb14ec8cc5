//! Two-body SYK ensemble.
//!
//! The single-particle matrix is `GOE(Ns) / sqrt(Ns)`, so the spectrum
//! converges to a semicircle of radius 2 as `Ns` grows. The matrix stays
//! real-symmetric even when filled with complex elements.

use crate::error::Result;
use crate::hamiltonian::{Hamiltonian, ModelCore, ModelKind};
use crate::hilbert::HilbertSpace;
use crate::quadratic::{QuadraticCore, QuadraticSource};
use crate::random::{ensure_hermitian, ModelContext, RandomStream};
use crate::scalar::Element;
use nalgebra::DMatrix;
use phyz_lattice::Lattice;
use std::sync::Arc;

#[derive(Debug)]
pub struct Syk2<T: Element> {
    quad: QuadraticCore<T>,
    stream: RandomStream,
}

impl<T: Element> Syk2<T> {
    pub fn new(source: impl Into<QuadraticSource>, constant: f64, ctx: &ModelContext) -> Self {
        let quad = QuadraticCore::new(ModelKind::Syk2, source, constant, ctx);
        let mut model = Self {
            quad,
            stream: ctx.stream(),
        };
        model.update_info();
        model
    }

    pub fn from_lattice(lattice: Arc<dyn Lattice>, constant: f64, ctx: &ModelContext) -> Self {
        Self::new(lattice, constant, ctx)
    }

    pub fn from_sites(ns: usize, constant: f64, ctx: &ModelContext) -> Self {
        Self::new(ns, constant, ctx)
    }

    pub fn from_hilbert(hilbert: &HilbertSpace, constant: f64, ctx: &ModelContext) -> Self {
        Self::new(hilbert, constant, ctx)
    }

    pub fn quadratic(&self) -> &QuadraticCore<T> {
        &self.quad
    }

    pub fn reseed(&mut self, seed: u64) {
        self.stream.reseed(seed);
    }
}

impl<T: Element> Hamiltonian<T> for Syk2<T> {
    fn core(&self) -> &ModelCore<T> {
        &self.quad.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<T> {
        &mut self.quad.core
    }

    fn hamiltonian(&mut self) -> Result<()> {
        self.quad.core.require_sites()?;
        let ns = self.quad.core.ns();
        let scale = T::from_re(1.0 / (ns as f64).sqrt());
        let h: DMatrix<T> = self.stream.goe::<T>(ns) * scale;
        ensure_hermitian(&h, "SYK2");
        self.quad.core.set_matrix(h);
        Ok(())
    }

    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String {
        let head = self.quad.core.info_head(skip, sep, prec);
        self.quad.info_tail(head).finish()
    }
}
