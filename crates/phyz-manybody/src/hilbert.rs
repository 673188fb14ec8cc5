//! Hilbert space handed to models.
//!
//! Either the full `2^Ns` space, where basis index and bit state coincide,
//! or a symmetry sector backed by a shared [`ReducedBasis`].

use crate::basis::{full_dim, BasisState};
use crate::error::Result;
use crate::sector::ReducedBasis;
use crate::symmetry::SymmetryCombination;
use phyz_lattice::{BoundaryCondition, Lattice};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct HilbertSpace {
    ns: usize,
    lattice: Option<Arc<dyn Lattice>>,
    reduced: Option<Arc<ReducedBasis>>,
}

impl HilbertSpace {
    /// Full space over every site of a lattice.
    pub fn from_lattice(lattice: Arc<dyn Lattice>) -> Self {
        Self {
            ns: lattice.ns(),
            lattice: Some(lattice),
            reduced: None,
        }
    }

    /// Lattice-free full space of `ns` sites.
    pub fn from_sites(ns: usize) -> Self {
        Self {
            ns,
            lattice: None,
            reduced: None,
        }
    }

    /// Restrict this space to the sector selected by `symmetries`.
    pub fn restrict(self, symmetries: &SymmetryCombination) -> Result<Self> {
        let reduced = ReducedBasis::build(self.ns, symmetries)?;
        Ok(Self {
            reduced: Some(Arc::new(reduced)),
            ..self
        })
    }

    /// Sector of a lattice in one step.
    pub fn restricted(lattice: Arc<dyn Lattice>, symmetries: &SymmetryCombination) -> Result<Self> {
        Self::from_lattice(lattice).restrict(symmetries)
    }

    pub fn ns(&self) -> usize {
        self.ns
    }

    /// Working dimension: `2^Ns` (saturating) or the sector size.
    pub fn dim(&self) -> usize {
        match &self.reduced {
            Some(reduced) => reduced.dim(),
            None => full_dim(self.ns).unwrap_or(usize::MAX),
        }
    }

    pub fn lattice(&self) -> Option<&Arc<dyn Lattice>> {
        self.lattice.as_ref()
    }

    /// Boundary condition of the lattice, PBC when there is none.
    pub fn bc(&self) -> BoundaryCondition {
        self.lattice
            .as_ref()
            .map_or(BoundaryCondition::Pbc, |lat| lat.bc())
    }

    pub fn reduced(&self) -> Option<&ReducedBasis> {
        self.reduced.as_deref()
    }

    pub fn is_restricted(&self) -> bool {
        self.reduced.is_some()
    }

    /// Basis state at working index `idx`.
    #[inline]
    pub fn state(&self, idx: usize) -> BasisState {
        match &self.reduced {
            Some(reduced) => reduced.state(idx),
            None => idx as BasisState,
        }
    }

    /// Working index of `state`, `None` outside the space.
    #[inline]
    pub fn index_of(&self, state: BasisState) -> Option<usize> {
        match &self.reduced {
            Some(reduced) => reduced.index_of(state),
            None => usize::try_from(state).ok().filter(|&i| i < self.dim()),
        }
    }
}
