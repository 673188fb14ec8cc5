//! Global symmetry generators.
//!
//! A generator pairs a conserved quantity's target value with a membership
//! predicate over basis states. Generators are combined by conjunction in a
//! [`SymmetryCombination`], or chained ad hoc through
//! [`SymmetryGenerator::check`].

use crate::basis::{popcount, BasisState};
use crate::error::{HamiltonianError, Result};
use phyz_lattice::Lattice;
use std::fmt;
use std::sync::Arc;

/// Membership test `(state, target) -> in sector`.
pub type Predicate = Arc<dyn Fn(BasisState, f64) -> bool + Send + Sync>;

/// Which conserved quantity a generator represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratorKind {
    /// Particle number / total magnetization.
    U1,
    /// Any externally supplied predicate.
    #[default]
    Other,
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U1 => write!(f, "U1"),
            Self::Other => write!(f, "OTHER"),
        }
    }
}

/// Canonical U(1) membership: the number of set bits equals the target.
pub fn u1_predicate(state: BasisState, target: f64) -> bool {
    f64::from(popcount(state)) == target
}

/// A conserved quantity with a target value and a membership predicate.
///
/// Created with target 0 and no predicate; evaluating before a predicate is
/// set is a configuration error.
#[derive(Clone, Default)]
pub struct SymmetryGenerator {
    kind: GeneratorKind,
    target: f64,
    predicate: Option<Predicate>,
    lattice: Option<Arc<dyn Lattice>>,
}

impl SymmetryGenerator {
    pub fn new(lattice: Option<Arc<dyn Lattice>>, kind: GeneratorKind) -> Self {
        Self {
            kind,
            target: 0.0,
            predicate: None,
            lattice,
        }
    }

    /// U(1) generator with its canonical predicate installed.
    pub fn u1(lattice: Option<Arc<dyn Lattice>>, target: f64) -> Self {
        let mut generator = Self::new(lattice, GeneratorKind::U1);
        generator.set_predicate(u1_predicate);
        generator.set_target(target);
        generator
    }

    /// Install the membership test, replacing any previous one.
    pub fn set_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(BasisState, f64) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn set_kind(&mut self, kind: GeneratorKind) {
        self.kind = kind;
    }

    pub fn kind(&self) -> GeneratorKind {
        self.kind
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn lattice(&self) -> Option<&Arc<dyn Lattice>> {
        self.lattice.as_ref()
    }

    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    /// `predicate(state, target)`.
    pub fn evaluate(&self, state: BasisState) -> Result<bool> {
        match &self.predicate {
            Some(predicate) => Ok(predicate(state, self.target)),
            None => Err(HamiltonianError::PredicateUnset(self.kind)),
        }
    }

    /// `evaluate(state) && outer`, for chaining generators by hand.
    pub fn check(&self, state: BasisState, outer: bool) -> Result<bool> {
        Ok(self.evaluate(state)? && outer)
    }
}

impl fmt::Debug for SymmetryGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetryGenerator")
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}

/// Ordered conjunction of generators.
///
/// Membership is evaluated left to right and stops at the first generator
/// that rejects the state. An empty combination accepts every state.
#[derive(Debug, Clone, Default)]
pub struct SymmetryCombination {
    generators: Vec<SymmetryGenerator>,
}

impl SymmetryCombination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single U(1) sector with the given particle number.
    pub fn u1(lattice: Option<Arc<dyn Lattice>>, target: f64) -> Self {
        Self {
            generators: vec![SymmetryGenerator::u1(lattice, target)],
        }
    }

    pub fn with(mut self, generator: SymmetryGenerator) -> Self {
        self.generators.push(generator);
        self
    }

    pub fn push(&mut self, generator: SymmetryGenerator) {
        self.generators.push(generator);
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    pub fn generators(&self) -> &[SymmetryGenerator] {
        &self.generators
    }

    pub fn accepts(&self, state: BasisState) -> Result<bool> {
        for generator in &self.generators {
            if !generator.evaluate(state)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl FromIterator<SymmetryGenerator> for SymmetryCombination {
    fn from_iter<I: IntoIterator<Item = SymmetryGenerator>>(iter: I) -> Self {
        Self {
            generators: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn parity_of_site0() -> SymmetryGenerator {
        let mut g = SymmetryGenerator::new(None, GeneratorKind::Other);
        g.set_predicate(|state, target| (state & 1) as f64 == target);
        g
    }

    #[test]
    fn test_u1_predicate() {
        assert!(u1_predicate(0b0110, 2.0));
        assert!(!u1_predicate(0b0111, 2.0));
        assert!(u1_predicate(0, 0.0));
    }

    #[test]
    fn test_unset_predicate_is_error() {
        let g = SymmetryGenerator::new(None, GeneratorKind::U1);
        assert!(matches!(
            g.evaluate(3),
            Err(HamiltonianError::PredicateUnset(GeneratorKind::U1))
        ));
        assert!(g.check(3, true).is_err());
    }

    #[test]
    fn test_set_target_and_predicate() {
        let mut g = SymmetryGenerator::new(None, GeneratorKind::Other);
        assert_eq!(g.target(), 0.0);
        g.set_predicate(u1_predicate);
        g.set_kind(GeneratorKind::U1);
        assert!(g.evaluate(0).unwrap());
        g.set_target(1.0);
        assert!(!g.evaluate(0).unwrap());
        assert!(g.evaluate(0b100).unwrap());

        // Replacing the predicate discards the old one.
        g.set_predicate(|_, _| false);
        assert!(!g.evaluate(0b100).unwrap());
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let g = SymmetryGenerator::u1(None, 3.0);
        for s in 0..64 {
            assert_eq!(g.evaluate(s).unwrap(), g.evaluate(s).unwrap());
        }
    }

    #[test]
    fn test_check_chains_conditions() {
        let u1 = SymmetryGenerator::u1(None, 1.0);
        let mut parity = parity_of_site0();
        parity.set_target(1.0);

        let state = 0b0001;
        let chained = u1.check(state, parity.evaluate(state).unwrap()).unwrap();
        assert!(chained);
        assert!(!u1.check(state, false).unwrap());
        assert!(!u1.check(0b0011, true).unwrap());
    }

    #[test]
    fn test_combination_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut counted = SymmetryGenerator::new(None, GeneratorKind::Other);
        counted.set_predicate(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        let combo = SymmetryCombination::u1(None, 2.0).with(counted);
        assert!(!combo.accepts(0b0001).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(combo.accepts(0b0011).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_combination_order_independent() {
        let mut parity = parity_of_site0();
        parity.set_target(0.0);
        let a = SymmetryCombination::u1(None, 2.0).with(parity.clone());
        let b: SymmetryCombination = vec![parity, SymmetryGenerator::u1(None, 2.0)]
            .into_iter()
            .collect();
        for s in 0..256 {
            assert_eq!(a.accepts(s).unwrap(), b.accepts(s).unwrap(), "state {s}");
        }
    }

    #[test]
    fn test_empty_combination_accepts_all() {
        let combo = SymmetryCombination::new();
        assert!(combo.is_empty());
        assert!((0..32).all(|s| combo.accepts(s).unwrap()));
    }

    #[test]
    fn test_error_propagates_through_combination() {
        let unset = SymmetryGenerator::new(None, GeneratorKind::Other);
        let combo = SymmetryCombination::u1(None, 1.0).with(unset);
        // Rejected by U(1) first, so the unset generator is never reached.
        assert!(!combo.accepts(0).unwrap());
        assert!(combo.accepts(0b1).is_err());
    }
}
