//! Lattice geometry for many-body spin and fermion models.
//!
//! A lattice only answers geometric questions: how many sites there are,
//! which boundary condition applies, and which site pairs are bonded.
//! Models hold it behind an `Arc<dyn Lattice>` and never mutate it.
//!
//! # Modules
//!
//! - [`chain`]: 1D chain with nearest and next-nearest neighbours
//! - [`honeycomb`]: 2D honeycomb with x/y/z bond labels (Kitaev geometry)

pub mod chain;
pub mod honeycomb;

pub use chain::Chain;
pub use honeycomb::Honeycomb;

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("lattice extent must be positive, got {0}")]
    EmptyExtent(usize),

    #[error("unknown boundary condition: {0}")]
    UnknownBoundary(String),
}

pub type Result<T> = std::result::Result<T, LatticeError>;

/// Boundary condition of a finite lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryCondition {
    /// Periodic: the last site bonds back to the first.
    #[default]
    Pbc,
    /// Open: no wrap-around bonds.
    Obc,
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pbc => write!(f, "PBC"),
            Self::Obc => write!(f, "OBC"),
        }
    }
}

impl std::str::FromStr for BoundaryCondition {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PBC" => Ok(Self::Pbc),
            "OBC" => Ok(Self::Obc),
            _ => Err(LatticeError::UnknownBoundary(s.to_string())),
        }
    }
}

/// Label of a bond on a lattice with bond-dependent couplings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondKind {
    X,
    Y,
    Z,
}

/// Read-only lattice geometry.
///
/// Forward neighbour lists name every bond exactly once: for a bond `(i, j)`
/// only one of `i` and `j` reports the other.
pub trait Lattice: fmt::Debug + Send + Sync {
    /// Number of sites.
    fn ns(&self) -> usize;

    /// Boundary condition.
    fn bc(&self) -> BoundaryCondition;

    /// Spatial dimension.
    fn dim(&self) -> usize;

    /// Short lattice name used in descriptive strings.
    fn name(&self) -> &'static str;

    /// Nearest neighbours of `site`, each bond listed once.
    fn nn_forward(&self, site: usize) -> Vec<usize>;

    /// Next-nearest neighbours of `site`, each bond listed once.
    fn nnn_forward(&self, site: usize) -> Vec<usize>;

    /// Bond label between two bonded sites, if the lattice defines one.
    fn bond_kind(&self, _a: usize, _b: usize) -> Option<BondKind> {
        None
    }

    /// All nearest-neighbour bonds `(i, j)`.
    fn nn_bonds(&self) -> Vec<(usize, usize)> {
        (0..self.ns())
            .flat_map(|i| self.nn_forward(i).into_iter().map(move |j| (i, j)))
            .collect()
    }

    /// All next-nearest-neighbour bonds `(i, j)`.
    fn nnn_bonds(&self) -> Vec<(usize, usize)> {
        (0..self.ns())
            .flat_map(|i| self.nnn_forward(i).into_iter().map(move |j| (i, j)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bc_display_roundtrip() {
        for bc in [BoundaryCondition::Pbc, BoundaryCondition::Obc] {
            let parsed: BoundaryCondition = bc.to_string().parse().unwrap();
            assert_eq!(parsed, bc);
        }
        assert!("twisted".parse::<BoundaryCondition>().is_err());
    }
}
