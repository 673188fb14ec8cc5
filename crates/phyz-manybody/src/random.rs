//! Random streams and Gaussian matrix ensembles.
//!
//! A model either owns a private seeded stream or draws from a stream shared
//! with other models. Shared streams sit behind a mutex that is held for the
//! whole of one sampling call, so concurrent fills cannot interleave draws.

use crate::logging::{LogSink, TracingSink};
use crate::scalar::Element;
use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::Level;

/// Relative tolerance for hermiticity of sampled matrices.
pub const HERMITIAN_TOL: f64 = 1e-9;

/// Handle to a stream shared between models.
pub type SharedRng = Arc<Mutex<StdRng>>;

/// New shared stream from a seed.
pub fn shared_rng(seed: u64) -> SharedRng {
    Arc::new(Mutex::new(StdRng::seed_from_u64(seed)))
}

enum Inner {
    Owned(StdRng),
    Shared(SharedRng),
}

/// Random stream of one model.
pub struct RandomStream {
    inner: Inner,
}

impl RandomStream {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: Inner::Owned(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn shared(handle: SharedRng) -> Self {
        Self {
            inner: Inner::Shared(handle),
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self.inner, Inner::Shared(_))
    }

    /// Restart the stream (the shared one, if shared) from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.with_rng(|rng| *rng = StdRng::seed_from_u64(seed));
    }

    /// Run `f` with exclusive access to the generator.
    pub fn with_rng<R>(&mut self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        match &mut self.inner {
            Inner::Owned(rng) => f(rng),
            Inner::Shared(handle) => {
                let mut guard = handle.lock().unwrap_or_else(PoisonError::into_inner);
                f(&mut *guard)
            }
        }
    }

    /// Sample from `N(mean, std²)`.
    pub fn normal(&mut self, mean: f64, std: f64) -> f64 {
        self.with_rng(|rng| mean + std * rng.sample::<f64, _>(StandardNormal))
    }

    /// Sample uniformly from `[lo, hi)`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        self.with_rng(|rng| lo + (hi - lo) * rng.gen::<f64>())
    }

    /// Uniform index in `0..n`. `n` must be positive.
    pub fn uniform_index(&mut self, n: usize) -> usize {
        self.with_rng(|rng| rng.gen_range(0..n))
    }

    pub fn goe<T: Element>(&mut self, n: usize) -> DMatrix<T> {
        self.with_rng(|rng| goe(rng, n))
    }

    pub fn gue<T: Element>(&mut self, n: usize) -> DMatrix<T> {
        self.with_rng(|rng| gue(rng, n))
    }
}

impl fmt::Debug for RandomStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_shared() { "shared" } else { "owned" };
        f.debug_struct("RandomStream").field("kind", &kind).finish()
    }
}

/// Gaussian orthogonal ensemble of dimension `n`.
///
/// Diagonal entries are `N(0, 1)`, off-diagonal entries `N(0, 1/2)`. Each
/// off-diagonal draw is written to both `(i, j)` and `(j, i)`, so the result
/// is symmetric without a symmetrization pass. The imaginary part is an
/// explicit zero for complex `T`.
pub fn goe<T: Element, R: Rng>(rng: &mut R, n: usize) -> DMatrix<T> {
    let mut m = DMatrix::zeros(n, n);
    for i in 0..n {
        let d: f64 = rng.sample(StandardNormal);
        m[(i, i)] = T::from_re(d);
        for j in (i + 1)..n {
            let x: f64 = rng.sample::<f64, _>(StandardNormal) * FRAC_1_SQRT_2;
            m[(i, j)] = T::from_re(x);
            m[(j, i)] = T::from_re(x);
        }
    }
    m
}

/// Gaussian unitary ensemble of dimension `n`.
///
/// Diagonal entries are real `N(0, 1)`; off-diagonal real and imaginary
/// parts are `N(0, 1/4)` each, with the lower triangle the conjugate of the
/// upper. For real `T` the imaginary parts vanish and this degrades to a
/// symmetric matrix.
pub fn gue<T: Element, R: Rng>(rng: &mut R, n: usize) -> DMatrix<T> {
    let mut m = DMatrix::zeros(n, n);
    for i in 0..n {
        let d: f64 = rng.sample(StandardNormal);
        m[(i, i)] = T::from_re(d);
        for j in (i + 1)..n {
            let re: f64 = rng.sample::<f64, _>(StandardNormal) * 0.5;
            let im: f64 = rng.sample::<f64, _>(StandardNormal) * 0.5;
            m[(i, j)] = T::from_parts(re, im);
            m[(j, i)] = T::from_parts(re, -im);
        }
    }
    m
}

/// `m[(i, j)] == conj(m[(j, i)])` within a relative tolerance.
pub fn is_hermitian<T: Element>(m: &DMatrix<T>, tol: f64) -> bool {
    if !m.is_square() {
        return false;
    }
    let n = m.nrows();
    for i in 0..n {
        for j in i..n {
            let a = m[(i, j)];
            let b = m[(j, i)].conjugate();
            let scale = a.modulus().max(b.modulus()).max(1.0);
            if (a - b).modulus() > tol * scale {
                return false;
            }
        }
    }
    true
}

/// Report a non-Hermitian sample: fatal in debug builds, an error event in
/// release builds.
pub fn ensure_hermitian<T: Element>(m: &DMatrix<T>, what: &str) -> bool {
    let ok = is_hermitian(m, HERMITIAN_TOL);
    debug_assert!(ok, "{what}: sampled matrix is not Hermitian");
    if !ok {
        tracing::error!(target: "phyz_manybody", "{what}: sampled matrix is not Hermitian");
    }
    ok
}

/// Where a model's random stream comes from.
#[derive(Clone)]
pub enum RngSource {
    /// Every model gets a private stream seeded with this value.
    Seed(u64),
    /// All models draw from one mutex-guarded stream.
    Shared(SharedRng),
}

/// Collaborators handed to model constructors.
#[derive(Clone)]
pub struct ModelContext {
    pub sink: Arc<dyn LogSink>,
    pub rng: RngSource,
}

impl ModelContext {
    /// Private streams seeded with `seed`, diagnostics through `tracing`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            sink: Arc::new(TracingSink::default()),
            rng: RngSource::Seed(seed),
        }
    }

    pub fn shared(handle: SharedRng) -> Self {
        Self {
            sink: Arc::new(TracingSink::default()),
            rng: RngSource::Shared(handle),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Stream for one model.
    pub fn stream(&self) -> RandomStream {
        match &self.rng {
            RngSource::Seed(seed) => RandomStream::from_seed(*seed),
            RngSource::Shared(handle) => RandomStream::shared(Arc::clone(handle)),
        }
    }

    pub fn log(&self, message: &str, level: Level, verbosity: u8) {
        self.sink.log(message, level, verbosity);
    }
}

impl Default for ModelContext {
    fn default() -> Self {
        Self::seeded(0)
    }
}

impl fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rng = match &self.rng {
            RngSource::Seed(seed) => format!("Seed({seed})"),
            RngSource::Shared(_) => "Shared".to_string(),
        };
        f.debug_struct("ModelContext").field("rng", &rng).finish()
    }
}
