//! Error types for phyz-manybody.

use crate::symmetry::GeneratorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HamiltonianError {
    #[error("symmetry generator {0} evaluated before a predicate was set")]
    PredicateUnset(GeneratorKind),

    #[error("unrecognized model type: {0}")]
    UnknownModel(String),

    #[error("{model} needs {what} before the Hamiltonian can be built")]
    MissingGeometry { model: String, what: &'static str },

    #[error("{ns} sites exceed the enumerable maximum of {max}")]
    TooManySites { ns: usize, max: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Parameter record parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HamiltonianError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_predicate_unset() {
        let err = HamiltonianError::PredicateUnset(GeneratorKind::U1);
        assert_eq!(
            err.to_string(),
            "symmetry generator U1 evaluated before a predicate was set"
        );
    }

    #[test]
    fn display_missing_geometry() {
        let err = HamiltonianError::MissingGeometry {
            model: "Ising".into(),
            what: "a lattice",
        };
        assert_eq!(
            err.to_string(),
            "Ising needs a lattice before the Hamiltonian can be built"
        );
    }

    #[test]
    fn config_error_converts() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: HamiltonianError = parse.into();
        assert!(err.to_string().starts_with("Parameter record parse error"));
    }
}
