//! One-dimensional chain.

use crate::{BondKind, BoundaryCondition, Lattice, LatticeError, Result};

/// Chain of `ns` sites.
///
/// Under PBC the wrap bond `ns-1 → 0` is only added when it is distinct from
/// an existing bond (`ns > 2` for nearest, `ns > 4` for next-nearest).
#[derive(Debug, Clone)]
pub struct Chain {
    ns: usize,
    bc: BoundaryCondition,
}

impl Chain {
    pub fn new(ns: usize, bc: BoundaryCondition) -> Result<Self> {
        if ns == 0 {
            return Err(LatticeError::EmptyExtent(ns));
        }
        Ok(Self { ns, bc })
    }

    /// Forward neighbour at distance `r`, with wrap-around under PBC.
    fn forward(&self, site: usize, r: usize) -> Option<usize> {
        if site + r < self.ns {
            return Some(site + r);
        }
        match self.bc {
            BoundaryCondition::Pbc if self.ns > 2 * r => Some((site + r) % self.ns),
            _ => None,
        }
    }
}

impl Lattice for Chain {
    fn ns(&self) -> usize {
        self.ns
    }

    fn bc(&self) -> BoundaryCondition {
        self.bc
    }

    fn dim(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "chain"
    }

    fn nn_forward(&self, site: usize) -> Vec<usize> {
        self.forward(site, 1).into_iter().collect()
    }

    fn nnn_forward(&self, site: usize) -> Vec<usize> {
        self.forward(site, 2).into_iter().collect()
    }

    /// Alternating x/y bonds: the bond leaving an even site is `X`.
    fn bond_kind(&self, a: usize, b: usize) -> Option<BondKind> {
        let left = if self.forward(a, 1) == Some(b) {
            a
        } else if self.forward(b, 1) == Some(a) {
            b
        } else {
            return None;
        };
        Some(if left % 2 == 0 { BondKind::X } else { BondKind::Y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pbc_bond_counts() {
        let chain = Chain::new(6, BoundaryCondition::Pbc).unwrap();
        assert_eq!(chain.nn_bonds().len(), 6);
        assert_eq!(chain.nnn_bonds().len(), 6);
        assert_eq!(chain.nn_forward(5), vec![0]);
        assert_eq!(chain.nnn_forward(4), vec![0]);
    }

    #[test]
    fn test_obc_bond_counts() {
        let chain = Chain::new(6, BoundaryCondition::Obc).unwrap();
        assert_eq!(chain.nn_bonds().len(), 5);
        assert_eq!(chain.nnn_bonds().len(), 4);
        assert!(chain.nn_forward(5).is_empty());
    }

    #[test]
    fn test_small_ring_has_no_duplicate_bonds() {
        let chain = Chain::new(2, BoundaryCondition::Pbc).unwrap();
        assert_eq!(chain.nn_bonds(), vec![(0, 1)]);
        assert!(chain.nnn_bonds().is_empty());
    }

    #[test]
    fn test_empty_chain_rejected() {
        assert!(Chain::new(0, BoundaryCondition::Obc).is_err());
    }

    #[test]
    fn test_alternating_bond_kinds() {
        let chain = Chain::new(4, BoundaryCondition::Pbc).unwrap();
        assert_eq!(chain.bond_kind(0, 1), Some(BondKind::X));
        assert_eq!(chain.bond_kind(2, 1), Some(BondKind::Y));
        assert_eq!(chain.bond_kind(3, 0), Some(BondKind::Y));
        assert_eq!(chain.bond_kind(0, 2), None);
    }
}
