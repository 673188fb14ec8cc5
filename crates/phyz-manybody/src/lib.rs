#![allow(clippy::needless_range_loop)]
//! Many-body Hamiltonian construction with global symmetry reduction.
//!
//! A configuration of `Ns` two-level sites is a bit pattern ([`basis`]).
//! Global symmetries ([`symmetry`]) select a sector of the full `2^Ns`
//! space ([`sector`]); a model from the catalog ([`models`]) fills its
//! Hamiltonian as a dense matrix over the full or reduced [`hilbert`] space.
//!
//! # Modules
//!
//! - [`basis`]: bit-state encoding, popcount and site helpers
//! - [`symmetry`]: symmetry generators and their conjunction
//! - [`sector`]: reduced basis with index ↔ state lookup
//! - [`hilbert`]: Hilbert space handed to models
//! - [`random`]: seeded/shared random streams, GOE and GUE sampling
//! - [`hamiltonian`]: model contract, type tags, matrix fill helpers
//! - [`quadratic`]: single-particle (`Ns×Ns`) specialization
//! - [`models`]: spin, random-matrix and quadratic model catalog
//! - [`catalog`]: build a boxed model from a [`params::ModelParams`] record
//! - [`params`]: aggregate parameter record with JSON loading

pub mod basis;
pub mod catalog;
pub mod error;
pub mod hamiltonian;
pub mod hilbert;
pub mod info;
pub mod logging;
pub mod models;
pub mod params;
pub mod quadratic;
pub mod random;
pub mod scalar;
pub mod sector;
pub mod symmetry;

pub use catalog::{build_model, build_model_by_name};
pub use error::{HamiltonianError, Result};
pub use hamiltonian::{Hamiltonian, ModelCore, ModelKind};
pub use hilbert::HilbertSpace;
pub use logging::{LogSink, TracingSink};
pub use params::ModelParams;
pub use quadratic::{QuadraticCore, QuadraticSource};
pub use random::{ModelContext, RandomStream, RngSource};
pub use scalar::Element;
pub use sector::ReducedBasis;
pub use symmetry::{GeneratorKind, SymmetryCombination, SymmetryGenerator};

pub use phyz_lattice;
