//! Symmetry sectors of the full configuration space.
//!
//! Enumerates `0..2^Ns` in ascending order and keeps the states accepted by
//! a [`SymmetryCombination`]. Cost is `O(2^Ns)` time and `O(|sector|)`
//! memory; callers bound `Ns`, enumeration beyond [`MAX_SITES`] is refused.

use crate::basis::{BasisState, MAX_SITES};
use crate::error::{HamiltonianError, Result};
use crate::symmetry::SymmetryCombination;
use std::collections::HashMap;

/// Ordered sector basis with state → index lookup.
///
/// `states` is strictly ascending and `index[states[i]] == i`.
#[derive(Debug, Clone)]
pub struct ReducedBasis {
    ns: usize,
    states: Vec<BasisState>,
    index: HashMap<BasisState, usize>,
}

impl ReducedBasis {
    /// Sector of `ns` sites selected by `symmetries`.
    pub fn build(ns: usize, symmetries: &SymmetryCombination) -> Result<Self> {
        if ns > MAX_SITES {
            return Err(HamiltonianError::TooManySites { ns, max: MAX_SITES });
        }
        if let Some(unset) = symmetries.generators().iter().find(|g| !g.has_predicate()) {
            return Err(HamiltonianError::PredicateUnset(unset.kind()));
        }

        let mut states = Vec::new();
        for state in 0u64..(1u64 << ns) {
            if symmetries.accepts(state)? {
                states.push(state);
            }
        }

        let index: HashMap<BasisState, usize> =
            states.iter().enumerate().map(|(i, &s)| (s, i)).collect();

        Ok(Self { ns, states, index })
    }

    /// The whole `2^ns` space.
    pub fn full(ns: usize) -> Result<Self> {
        Self::build(ns, &SymmetryCombination::new())
    }

    /// Sector dimension.
    pub fn dim(&self) -> usize {
        self.states.len()
    }

    pub fn ns(&self) -> usize {
        self.ns
    }

    /// Basis state at position `idx`.
    pub fn state(&self, idx: usize) -> BasisState {
        self.states[idx]
    }

    /// Position of `state`, `None` if it lies outside the sector.
    pub fn index_of(&self, state: BasisState) -> Option<usize> {
        self.index.get(&state).copied()
    }

    pub fn states(&self) -> &[BasisState] {
        &self.states
    }

    pub fn contains(&self, state: BasisState) -> bool {
        self.index.contains_key(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symmetry::{GeneratorKind, SymmetryGenerator};

    #[test]
    fn test_half_filling_four_sites() {
        let basis = ReducedBasis::build(4, &SymmetryCombination::u1(None, 2.0)).unwrap();
        assert_eq!(basis.dim(), 6);
        assert_eq!(basis.states(), &[3, 5, 6, 9, 10, 12]);
    }

    #[test]
    fn test_index_roundtrip() {
        let basis = ReducedBasis::build(8, &SymmetryCombination::u1(None, 3.0)).unwrap();
        for i in 0..basis.dim() {
            assert_eq!(basis.index_of(basis.state(i)), Some(i));
        }
        assert_eq!(basis.index_of(0), None);
        assert!(!basis.contains(0b1111));
    }

    #[test]
    fn test_ascending_order() {
        let basis = ReducedBasis::build(7, &SymmetryCombination::u1(None, 4.0)).unwrap();
        assert!(basis.states().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_combination_is_full_space() {
        let basis = ReducedBasis::full(5).unwrap();
        assert_eq!(basis.dim(), 32);
        assert_eq!(basis.state(17), 17);
    }

    #[test]
    fn test_two_generators() {
        let mut even_site0 = SymmetryGenerator::new(None, GeneratorKind::Other);
        even_site0.set_predicate(|s, t| (s & 1) as f64 == t);
        let combo = SymmetryCombination::u1(None, 2.0).with(even_site0);
        let basis = ReducedBasis::build(4, &combo).unwrap();
        assert_eq!(basis.states(), &[6, 10, 12]);
    }

    #[test]
    fn test_unset_predicate_propagates() {
        let combo =
            SymmetryCombination::new().with(SymmetryGenerator::new(None, GeneratorKind::Other));
        assert!(matches!(
            ReducedBasis::build(3, &combo),
            Err(HamiltonianError::PredicateUnset(GeneratorKind::Other))
        ));
    }

    #[test]
    fn test_unset_predicate_behind_empty_sector() {
        // U(1) with 5 particles on 3 sites rejects every state.
        let combo = SymmetryCombination::u1(None, 5.0)
            .with(SymmetryGenerator::new(None, GeneratorKind::Other));
        assert!(matches!(
            ReducedBasis::build(3, &combo),
            Err(HamiltonianError::PredicateUnset(GeneratorKind::Other))
        ));
    }

    #[test]
    fn test_too_many_sites() {
        assert!(matches!(
            ReducedBasis::full(MAX_SITES + 1),
            Err(HamiltonianError::TooManySites { .. })
        ));
    }
}
