//! XXZ Heisenberg model with site-dependent couplings and fields.
//!
//!   H = Σ_<ij> J_i (σx_i σx_j + σy_i σy_j + Δ_i σz_i σz_j)
//!     + Σ_i (hz_i σz_i + hx_i σx_i)
//!
//! The bond coupling is taken from its left site.

use super::spin;
use crate::basis::BasisState;
use crate::error::Result;
use crate::hamiltonian::{fill_local, Hamiltonian, LocalTerms, ModelCore, ModelKind};
use crate::hilbert::HilbertSpace;
use crate::info::InfoBuilder;
use crate::random::ModelContext;
use crate::scalar::Element;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeisenbergParams {
    pub j: Vec<f64>,
    pub delta: Vec<f64>,
    pub hz: Vec<f64>,
    pub hx: Vec<f64>,
}

impl HeisenbergParams {
    /// Uniform couplings on `ns` sites.
    pub fn uniform(ns: usize, j: f64, delta: f64, hz: f64, hx: f64) -> Self {
        Self {
            j: vec![j; ns],
            delta: vec![delta; ns],
            hz: vec![hz; ns],
            hx: vec![hx; ns],
        }
    }

    pub(crate) fn validate(&self, ns: usize) -> Result<()> {
        spin::require_len("J", &self.j, ns)?;
        spin::require_len("delta", &self.delta, ns)?;
        spin::require_len("hz", &self.hz, ns)?;
        spin::require_len("hx", &self.hx, ns)
    }

    /// Exchange and field terms acting on `s`.
    pub(crate) fn act(&self, s: BasisState, bonds: &[(usize, usize)], ns: usize, t: &mut LocalTerms) {
        for &(i, j) in bonds {
            let c = self.j[i];
            spin::exchange(s, i, j, [c, c, c * self.delta[i]], t);
        }
        for i in 0..ns {
            spin::field(s, i, self.hz[i], self.hx[i], t);
        }
    }

    pub(crate) fn describe<'a>(&self, builder: InfoBuilder<'a>) -> InfoBuilder<'a> {
        builder
            .param_first("J", &self.j)
            .param_first("dlt", &self.delta)
            .param_first("hz", &self.hz)
            .param_first("hx", &self.hx)
    }
}

#[derive(Debug)]
pub struct Heisenberg<T: Element> {
    core: ModelCore<T>,
    params: HeisenbergParams,
}

impl<T: Element> Heisenberg<T> {
    pub fn new(hilbert: HilbertSpace, params: HeisenbergParams, ctx: &ModelContext) -> Result<Self> {
        let core = ModelCore::many_body(ModelKind::Heisenberg, hilbert, ctx)?;
        let mut model = Self { core, params };
        model.update_info();
        Ok(model)
    }

    pub fn params(&self) -> &HeisenbergParams {
        &self.params
    }

    pub fn set_params(&mut self, params: HeisenbergParams) {
        self.params = params;
    }
}

impl<T: Element> Hamiltonian<T> for Heisenberg<T> {
    fn core(&self) -> &ModelCore<T> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<T> {
        &mut self.core
    }

    fn hamiltonian(&mut self) -> Result<()> {
        let lattice = self.core.require_lattice()?;
        let ns = self.core.ns();
        self.params.validate(ns)?;
        let bonds = lattice.nn_bonds();
        let p = &self.params;

        let h = fill_local(self.core.hilbert(), |s, t| p.act(s, &bonds, ns, t));
        self.core.set_matrix(h);
        Ok(())
    }

    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String {
        let head = self.core.info_head(skip, sep, prec);
        self.params.describe(head).finish()
    }
}
