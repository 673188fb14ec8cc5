//! Aggregate parameter record for a simulation run.
//!
//! One [`ModelParams`] carries the parameters of every catalog model plus
//! the random-realization bookkeeping. It deserializes from JSON with every
//! field optional; missing fields take their defaults.

use crate::error::Result;
use crate::hamiltonian::ModelKind;
use crate::models::{FreeFermionsParams, QsmParams, UltrametricParams};
use crate::random::ModelContext;
use serde::{Deserialize, Serialize};

/// A scalar parameter swept as `value, value + step, …` over `n` points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sweep {
    pub value: f64,
    pub step: f64,
    pub n: usize,
}

impl Sweep {
    pub fn fixed(value: f64) -> Self {
        Self {
            value,
            step: 0.0,
            n: 1,
        }
    }

    /// The swept values. A sweep always yields at least its start value.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.n.max(1)).map(move |k| self.value + k as f64 * self.step)
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self::fixed(0.0)
    }
}

impl From<f64> for Sweep {
    fn from(value: f64) -> Self {
        Self::fixed(value)
    }
}

/// Resize `values` to `len`, padding with the last entry (or zero).
pub(crate) fn resize_padded(values: &mut Vec<f64>, len: usize) {
    let pad = values.last().copied().unwrap_or(0.0);
    values.resize(len, pad);
}

/// Repeat a single-entry array over `len` sites; longer arrays pass through.
pub(crate) fn broadcast(values: &[f64], len: usize) -> Vec<f64> {
    match values {
        [v] => vec![*v; len],
        _ => values.to_vec(),
    }
}

impl QsmParams {
    /// Size the per-outer-spin arrays to `Ntot - N`, or zero when `Ntot < N`.
    pub fn resize(&mut self) {
        let l = self.outer();
        resize_padded(&mut self.alpha, l);
        resize_padded(&mut self.xi, l);
        resize_padded(&mut self.h, l);
    }
}

impl UltrametricParams {
    /// Size `alpha` to `Ntot - N`, or zero when `Ntot < N`.
    pub fn resize(&mut self) {
        let l = self.levels();
        resize_padded(&mut self.alpha, l);
    }
}

/// Rosenzweig-Porter sweep over the suppression exponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosenzweigPorterRecord {
    pub g: Vec<f64>,
    pub single_particle: bool,
    pub be_real: bool,
    pub g_sweep_n: usize,
}

impl RosenzweigPorterRecord {
    pub fn resize(&mut self) {
        resize_padded(&mut self.g, self.g_sweep_n);
    }
}

impl Default for RosenzweigPorterRecord {
    fn default() -> Self {
        Self {
            g: vec![1.0],
            single_particle: false,
            be_real: true,
            g_sweep_n: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AubryAndreRecord {
    pub j: Sweep,
    pub lambda: Sweep,
    pub beta: Sweep,
    pub phi: Sweep,
}

impl Default for AubryAndreRecord {
    fn default() -> Self {
        Self {
            j: Sweep::fixed(1.0),
            lambda: Sweep::fixed(0.5),
            beta: Sweep::fixed((1.0 + 5f64.sqrt()) / 2.0),
            phi: Sweep::fixed(1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlrbRecord {
    pub a: Vec<f64>,
    pub b: f64,
    pub many_body: bool,
}

impl Default for PlrbRecord {
    fn default() -> Self {
        Self {
            a: vec![1.0],
            b: 1.0,
            many_body: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    pub model_type: ModelKind,
    /// Number of random realizations, one entry per system size.
    pub ran_n: Vec<u32>,
    pub ran_seed: u64,
    pub ran_n_idx: usize,

    // Ising
    pub j1: Sweep,
    pub hz: Sweep,
    pub hx: Sweep,

    // XYZ
    pub j2: Sweep,
    pub eta1: Sweep,
    pub eta2: Sweep,
    pub dlt1: Sweep,
    pub dlt2: Sweep,

    // Kitaev
    pub kx: Vec<f64>,
    pub ky: Vec<f64>,
    pub kz: Vec<f64>,

    // Heisenberg
    pub hei_j: Vec<f64>,
    pub hei_dlt: Vec<f64>,
    pub hei_hx: Vec<f64>,
    pub hei_hz: Vec<f64>,

    pub qsm: QsmParams,
    pub rosenzweig_porter: RosenzweigPorterRecord,
    pub ultrametric: UltrametricParams,

    // Quadratic runs
    pub q_gamma: u32,
    pub q_manifold: bool,
    pub q_manybody: bool,
    pub q_random_comb_num: u32,
    pub q_realization_num: u32,
    pub q_shuffle: bool,
    pub q_broad: f64,

    pub aubry_andre: AubryAndreRecord,
    pub power_law_random_bandwidth: PlrbRecord,
    pub free_fermions: FreeFermionsParams,
}

impl Default for ModelParams {
    fn default() -> Self {
        let mut params = Self {
            model_type: ModelKind::Ising,
            ran_n: Vec::new(),
            ran_seed: 0,
            ran_n_idx: 0,
            j1: Sweep::default(),
            hz: Sweep::default(),
            hx: Sweep::default(),
            j2: Sweep::default(),
            eta1: Sweep::default(),
            eta2: Sweep::default(),
            dlt1: Sweep::default(),
            dlt2: Sweep::default(),
            kx: Vec::new(),
            ky: Vec::new(),
            kz: Vec::new(),
            hei_j: Vec::new(),
            hei_dlt: Vec::new(),
            hei_hx: Vec::new(),
            hei_hz: Vec::new(),
            qsm: QsmParams::default(),
            rosenzweig_porter: RosenzweigPorterRecord::default(),
            ultrametric: UltrametricParams::default(),
            q_gamma: 1,
            q_manifold: false,
            q_manybody: true,
            q_random_comb_num: 100,
            q_realization_num: 100,
            q_shuffle: true,
            q_broad: 0.1,
            aubry_andre: AubryAndreRecord::default(),
            power_law_random_bandwidth: PlrbRecord::default(),
            free_fermions: FreeFermionsParams::default(),
        };
        params.set_default();
        params
    }
}

impl ModelParams {
    /// Load a record from JSON. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore the default model parameters. Run flags are left alone.
    pub fn set_default(&mut self) {
        self.model_type = ModelKind::Ising;
        self.ran_n = vec![1];

        self.j1 = Sweep::fixed(1.0);
        self.hz = Sweep::fixed(1.0);
        self.hx = Sweep::fixed(1.0);

        self.j2 = Sweep::fixed(2.0);
        self.eta1 = Sweep::fixed(0.5);
        self.eta2 = Sweep::fixed(0.5);
        self.dlt1 = Sweep::fixed(0.3);
        self.dlt2 = Sweep::fixed(0.3);

        for v in [
            &mut self.kx,
            &mut self.ky,
            &mut self.kz,
            &mut self.hei_j,
            &mut self.hei_dlt,
            &mut self.hei_hz,
            &mut self.hei_hx,
        ] {
            *v = vec![1.0];
        }

        self.qsm = QsmParams {
            alpha: vec![1.0],
            xi: vec![1.0],
            h: vec![1.0],
            ..QsmParams::default()
        };
        self.rosenzweig_porter.g = vec![1.0];
        self.aubry_andre = AubryAndreRecord::default();
    }

    pub fn resize_kitaev(&mut self, ns: usize) {
        resize_padded(&mut self.kx, ns);
        resize_padded(&mut self.ky, ns);
        resize_padded(&mut self.kz, ns);
    }

    pub fn resize_heisenberg(&mut self, ns: usize) {
        resize_padded(&mut self.hei_j, ns);
        resize_padded(&mut self.hei_dlt, ns);
        resize_padded(&mut self.hei_hx, ns);
        resize_padded(&mut self.hei_hz, ns);
    }

    /// Realization count for size index `i`; past the end the last entry
    /// applies. `None` only when no counts are configured.
    pub fn ran_real(&self, i: usize) -> Option<u32> {
        self.ran_n.get(i).or_else(|| self.ran_n.last()).copied()
    }

    pub fn current_ran_real(&self) -> Option<u32> {
        self.ran_real(self.ran_n_idx)
    }

    /// Whether the selected model needs complex matrix elements.
    pub fn check_complex(&self) -> bool {
        self.model_type.is_complex()
    }

    /// Model context with private streams seeded from `ran_seed`.
    pub fn context(&self) -> ModelContext {
        ModelContext::seeded(self.ran_seed)
    }
}
