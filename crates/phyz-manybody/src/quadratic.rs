//! Quadratic (single-particle) Hamiltonians.
//!
//! `H = Σ_ij h_ij c†_i c_j + const` is fully specified by the `Ns×Ns`
//! coupling matrix `h`, so the working dimension is `Nh = Ns` regardless of
//! how the model was built. A model can be built from a lattice, from a bare
//! site count, or from an existing Hilbert space; all three go through
//! [`QuadraticSource`] and end up with the same derived state.

use crate::basis::{is_set, BasisState};
use crate::hamiltonian::{ModelCore, ModelKind};
use crate::hilbert::HilbertSpace;
use crate::info::InfoBuilder;
use crate::random::ModelContext;
use crate::scalar::Element;
use phyz_lattice::Lattice;
use std::sync::Arc;

/// Where a quadratic model takes its sites from.
#[derive(Debug, Clone)]
pub enum QuadraticSource {
    Lattice(Arc<dyn Lattice>),
    Sites(usize),
    Hilbert(HilbertSpace),
}

impl QuadraticSource {
    fn into_hilbert(self) -> HilbertSpace {
        match self {
            Self::Lattice(lattice) => HilbertSpace::from_lattice(lattice),
            Self::Sites(ns) => HilbertSpace::from_sites(ns),
            Self::Hilbert(hilbert) => hilbert,
        }
    }
}

impl From<Arc<dyn Lattice>> for QuadraticSource {
    fn from(lattice: Arc<dyn Lattice>) -> Self {
        Self::Lattice(lattice)
    }
}

impl From<usize> for QuadraticSource {
    fn from(ns: usize) -> Self {
        Self::Sites(ns)
    }
}

impl From<HilbertSpace> for QuadraticSource {
    fn from(hilbert: HilbertSpace) -> Self {
        Self::Hilbert(hilbert)
    }
}

impl From<&HilbertSpace> for QuadraticSource {
    fn from(hilbert: &HilbertSpace) -> Self {
        Self::Hilbert(hilbert.clone())
    }
}

/// Shared state of quadratic models.
#[derive(Debug)]
pub struct QuadraticCore<T: Element> {
    pub core: ModelCore<T>,
    /// Energy offset added to every many-body energy.
    pub constant: f64,
    /// Whether callers assemble many-body states from the orbitals.
    pub many_body: bool,
}

impl<T: Element> QuadraticCore<T> {
    pub fn new(
        kind: ModelKind,
        source: impl Into<QuadraticSource>,
        constant: f64,
        ctx: &ModelContext,
    ) -> Self {
        let hilbert = source.into().into_hilbert();
        let ns = hilbert.ns();
        Self {
            core: ModelCore::with_dim(kind, hilbert, ns, ctx),
            constant,
            many_body: true,
        }
    }

    /// Append the quadratic parameters to a descriptive string.
    pub fn info_tail<'a>(&self, builder: InfoBuilder<'a>) -> InfoBuilder<'a> {
        builder.param("c", self.constant)
    }

    /// Energy of a Slater determinant: occupied orbitals of `state` summed
    /// over single-particle `energies`, plus the constant.
    pub fn many_body_energy(&self, state: BasisState, energies: &[f64]) -> f64 {
        self.constant
            + energies
                .iter()
                .enumerate()
                .filter(|&(k, _)| is_set(state, k))
                .map(|(_, e)| e)
                .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phyz_lattice::{BoundaryCondition, Chain};

    #[test]
    fn test_sources_agree() {
        let ctx = ModelContext::default();
        let lattice: Arc<dyn Lattice> = Arc::new(Chain::new(5, BoundaryCondition::Pbc).unwrap());
        let a = QuadraticCore::<f64>::new(ModelKind::Syk2, Arc::clone(&lattice), 0.0, &ctx);
        let b = QuadraticCore::<f64>::new(ModelKind::Syk2, 5usize, 0.0, &ctx);
        let c = QuadraticCore::<f64>::new(
            ModelKind::Syk2,
            HilbertSpace::from_lattice(lattice),
            0.0,
            &ctx,
        );
        for q in [&a, &b, &c] {
            assert_eq!(q.core.ns(), 5);
            assert_eq!(q.core.nh(), 5);
            assert_eq!(q.core.kind(), ModelKind::Syk2);
        }
    }

    #[test]
    fn test_many_body_energy() {
        let ctx = ModelContext::default();
        let q = QuadraticCore::<f64>::new(ModelKind::FreeFermions, 3usize, 0.5, &ctx);
        let energies = [-1.0, 0.25, 2.0];
        assert_eq!(q.many_body_energy(0b000, &energies), 0.5);
        assert_eq!(q.many_body_energy(0b101, &energies), 1.5);
        assert_eq!(q.many_body_energy(0b111, &energies), 1.75);
    }
}
