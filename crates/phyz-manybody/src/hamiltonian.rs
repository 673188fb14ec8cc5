//! Model contract shared by every Hamiltonian in the catalog.
//!
//! A model owns a [`ModelCore`]: type tag, Hilbert space, working
//! dimension `Nh`, the dense `Nh×Nh` matrix buffer and the cached
//! descriptive string. Concrete models implement [`Hamiltonian`] and are
//! used through `Box<dyn Hamiltonian<T>>`.
//!
//! Many-body spin models are filled column by column from a local action
//! ([`fill_local`]): for a basis state `|s⟩` the model reports the diagonal
//! energy and the states `|s'⟩` reached with amplitude `c`, i.e.
//! `H|s⟩ = E_s|s⟩ + Σ c|s'⟩`. Columns are independent and are computed in
//! parallel; each worker only produces the entries of its own column.

use crate::basis::{BasisState, MAX_SITES};
use crate::error::{HamiltonianError, Result};
use crate::hilbert::HilbertSpace;
use crate::info::{InfoBuilder, DEFAULT_PREC, DEFAULT_SEP};
use crate::logging::LogSink;
use crate::random::ModelContext;
use crate::scalar::Element;
use nalgebra::DMatrix;
use phyz_lattice::Lattice;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Level;

/// Type tag of a catalog model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    Ising,
    Xyz,
    Kitaev,
    Heisenberg,
    Qsm,
    RosenzweigPorter,
    Ultrametric,
    FreeFermions,
    AubryAndre,
    Syk2,
    PowerLawRandomBandwidth,
}

impl ModelKind {
    pub const ALL: [ModelKind; 11] = [
        Self::Ising,
        Self::Xyz,
        Self::Kitaev,
        Self::Heisenberg,
        Self::Qsm,
        Self::RosenzweigPorter,
        Self::Ultrametric,
        Self::FreeFermions,
        Self::AubryAndre,
        Self::Syk2,
        Self::PowerLawRandomBandwidth,
    ];

    /// Short name used in descriptive strings.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Ising => "Ising",
            Self::Xyz => "XYZ",
            Self::Kitaev => "Kitaev",
            Self::Heisenberg => "Heisenberg",
            Self::Qsm => "QSM",
            Self::RosenzweigPorter => "RP",
            Self::Ultrametric => "UM",
            Self::FreeFermions => "FF",
            Self::AubryAndre => "AA",
            Self::Syk2 => "SYK2",
            Self::PowerLawRandomBandwidth => "PLRB",
        }
    }

    /// Single-particle models with an `Ns×Ns` matrix.
    pub fn is_quadratic(self) -> bool {
        matches!(
            self,
            Self::FreeFermions | Self::AubryAndre | Self::Syk2 | Self::PowerLawRandomBandwidth
        )
    }

    /// Models whose matrix elements are intrinsically complex.
    pub fn is_complex(self) -> bool {
        matches!(self, Self::FreeFermions)
    }

    /// Models that draw from a random stream.
    pub fn is_random(self) -> bool {
        matches!(
            self,
            Self::Qsm
                | Self::RosenzweigPorter
                | Self::Ultrametric
                | Self::Syk2
                | Self::PowerLawRandomBandwidth
        )
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for ModelKind {
    type Err = HamiltonianError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let kind = match key.as_str() {
            "ising" => Self::Ising,
            "xyz" => Self::Xyz,
            "kitaev" => Self::Kitaev,
            "heisenberg" => Self::Heisenberg,
            "qsm" | "quantum_sun" => Self::Qsm,
            "rp" | "rosenzweig_porter" => Self::RosenzweigPorter,
            "um" | "ultrametric" => Self::Ultrametric,
            "ff" | "free_fermions" => Self::FreeFermions,
            "aa" | "aubry_andre" => Self::AubryAndre,
            "syk2" => Self::Syk2,
            "plrb" | "power_law_random_bandwidth" => Self::PowerLawRandomBandwidth,
            _ => return Err(HamiltonianError::UnknownModel(s.to_string())),
        };
        Ok(kind)
    }
}

/// State shared by every model.
pub struct ModelCore<T: Element> {
    kind: ModelKind,
    hilbert: HilbertSpace,
    nh: usize,
    matrix: DMatrix<T>,
    info: String,
    sink: Arc<dyn LogSink>,
}

impl<T: Element> ModelCore<T> {
    /// Core of a model acting on the many-body space (`Nh = hilbert.dim()`).
    pub fn many_body(kind: ModelKind, hilbert: HilbertSpace, ctx: &ModelContext) -> Result<Self> {
        let ns = hilbert.ns();
        if ns > MAX_SITES {
            return Err(HamiltonianError::TooManySites { ns, max: MAX_SITES });
        }
        let nh = hilbert.dim();
        Ok(Self::with_dim(kind, hilbert, nh, ctx))
    }

    /// Core with an explicit working dimension.
    pub fn with_dim(kind: ModelKind, hilbert: HilbertSpace, nh: usize, ctx: &ModelContext) -> Self {
        ctx.log(
            &format!("constructed {kind} model: Ns={}, Nh={nh}", hilbert.ns()),
            Level::INFO,
            2,
        );
        Self {
            kind,
            hilbert,
            nh,
            matrix: DMatrix::zeros(0, 0),
            info: String::new(),
            sink: Arc::clone(&ctx.sink),
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn hilbert(&self) -> &HilbertSpace {
        &self.hilbert
    }

    pub fn ns(&self) -> usize {
        self.hilbert.ns()
    }

    pub fn nh(&self) -> usize {
        self.nh
    }

    pub fn matrix(&self) -> &DMatrix<T> {
        &self.matrix
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn set_info(&mut self, info: String) {
        self.info = info;
    }

    /// Replace the matrix buffer. The new buffer must be `Nh×Nh`.
    pub fn set_matrix(&mut self, matrix: DMatrix<T>) {
        debug_assert_eq!(matrix.shape(), (self.nh, self.nh), "{} buffer shape", self.kind);
        self.matrix = matrix;
    }

    pub fn log(&self, message: &str, level: Level, verbosity: u8) {
        self.sink.log(message, level, verbosity);
    }

    /// Fail unless the site count is known.
    pub fn require_sites(&self) -> Result<()> {
        if self.ns() == 0 {
            return Err(HamiltonianError::MissingGeometry {
                model: self.kind.to_string(),
                what: "a site count",
            });
        }
        Ok(())
    }

    /// The lattice, or a configuration error for lattice-free models.
    pub fn require_lattice(&self) -> Result<Arc<dyn Lattice>> {
        self.require_sites()?;
        self.hilbert
            .lattice()
            .cloned()
            .ok_or_else(|| HamiltonianError::MissingGeometry {
                model: self.kind.to_string(),
                what: "a lattice",
            })
    }

    /// Start a descriptive string with name, site count and boundary.
    pub fn info_head<'a>(&self, skip: &'a [&'a str], sep: &'a str, prec: usize) -> InfoBuilder<'a> {
        InfoBuilder::new(self.kind.short_name(), self.ns(), self.hilbert.bc(), skip, sep, prec)
    }
}

impl<T: Element> fmt::Debug for ModelCore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCore")
            .field("kind", &self.kind)
            .field("ns", &self.ns())
            .field("nh", &self.nh)
            .field("info", &self.info)
            .finish()
    }
}

/// A Hamiltonian that can (re)build its matrix and describe itself.
pub trait Hamiltonian<T: Element>: Send {
    fn core(&self) -> &ModelCore<T>;

    fn core_mut(&mut self) -> &mut ModelCore<T>;

    /// Rebuild the matrix buffer from the current parameters.
    ///
    /// Each call overwrites the buffer completely. Random models draw fresh
    /// values from their stream on every call.
    fn hamiltonian(&mut self) -> Result<()>;

    /// Descriptive string from the current parameters, omitting `skip`.
    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String;

    /// Recompute the cached descriptive string. Setters do not call this.
    fn update_info(&mut self) {
        let info = self.info(&[], DEFAULT_SEP, DEFAULT_PREC);
        self.core_mut().set_info(info);
    }

    fn cached_info(&self) -> &str {
        self.core().info()
    }

    fn kind(&self) -> ModelKind {
        self.core().kind()
    }

    fn hilbert(&self) -> &HilbertSpace {
        self.core().hilbert()
    }

    fn ns(&self) -> usize {
        self.core().ns()
    }

    fn nh(&self) -> usize {
        self.core().nh()
    }

    fn matrix(&self) -> &DMatrix<T> {
        self.core().matrix()
    }
}

/// Action of a local Hamiltonian on one basis state.
#[derive(Debug, Default, Clone)]
pub struct LocalTerms {
    pub diagonal: f64,
    pub off_diagonal: Vec<(BasisState, f64)>,
}

impl LocalTerms {
    #[inline]
    pub fn push(&mut self, target: BasisState, amplitude: f64) {
        if amplitude != 0.0 {
            self.off_diagonal.push((target, amplitude));
        }
    }
}

/// Fill a matrix over `hilbert` from a per-state local action.
///
/// Column `j` holds `H|s_j⟩`. Targets outside a restricted sector are
/// dropped, which is exact when the Hamiltonian conserves the sector.
pub fn fill_local<T, F>(hilbert: &HilbertSpace, local: F) -> DMatrix<T>
where
    T: Element,
    F: Fn(BasisState, &mut LocalTerms) + Sync,
{
    let nh = hilbert.dim();
    let columns: Vec<Vec<(usize, f64)>> = (0..nh)
        .into_par_iter()
        .map(|col| {
            let mut terms = LocalTerms::default();
            local(hilbert.state(col), &mut terms);
            let mut entries = Vec::with_capacity(terms.off_diagonal.len() + 1);
            entries.push((col, terms.diagonal));
            entries.extend(
                terms
                    .off_diagonal
                    .into_iter()
                    .filter_map(|(s, amp)| hilbert.index_of(s).map(|row| (row, amp))),
            );
            entries
        })
        .collect();

    let mut h = DMatrix::zeros(nh, nh);
    for (col, entries) in columns.into_iter().enumerate() {
        for (row, amp) in entries {
            h[(row, col)] += T::from_re(amp);
        }
    }
    h
}

/// Restrict a matrix over the full `2^Ns` space to `hilbert`'s sector.
pub fn project<T: Element>(full: DMatrix<T>, hilbert: &HilbertSpace) -> DMatrix<T> {
    match hilbert.reduced() {
        None => full,
        Some(reduced) => {
            let nh = reduced.dim();
            DMatrix::from_fn(nh, nh, |i, j| {
                full[(reduced.state(i) as usize, reduced.state(j) as usize)]
            })
        }
    }
}
