//! Anisotropic XYZ chain with nearest and next-nearest exchange.
//!
//!   H = Σ_<ij>  J1 [(1-η1) σxσx + (1+η1) σyσy + Δ1 σzσz]
//!     + Σ_<<ij>> J2 [(1-η2) σxσx + (1+η2) σyσy + Δ2 σzσz]
//!     + Σ_i (hz σz_i + hx σx_i)
//!
//! At η = 0 and hx = 0 the model conserves total magnetization and can be
//! built directly in a U(1) sector.

use super::spin;
use crate::error::Result;
use crate::hamiltonian::{fill_local, Hamiltonian, ModelCore, ModelKind};
use crate::hilbert::HilbertSpace;
use crate::random::ModelContext;
use crate::scalar::Element;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XyzParams {
    pub j1: f64,
    pub j2: f64,
    pub eta1: f64,
    pub eta2: f64,
    pub dlt1: f64,
    pub dlt2: f64,
    pub hz: f64,
    pub hx: f64,
}

impl XyzParams {
    fn couplings(j: f64, eta: f64, dlt: f64) -> [f64; 3] {
        [j * (1.0 - eta), j * (1.0 + eta), j * dlt]
    }
}

impl Default for XyzParams {
    fn default() -> Self {
        Self {
            j1: 1.0,
            j2: 2.0,
            eta1: 0.5,
            eta2: 0.5,
            dlt1: 0.3,
            dlt2: 0.3,
            hz: 1.0,
            hx: 1.0,
        }
    }
}

#[derive(Debug)]
pub struct Xyz<T: Element> {
    core: ModelCore<T>,
    params: XyzParams,
}

impl<T: Element> Xyz<T> {
    pub fn new(hilbert: HilbertSpace, params: XyzParams, ctx: &ModelContext) -> Result<Self> {
        let core = ModelCore::many_body(ModelKind::Xyz, hilbert, ctx)?;
        let mut model = Self { core, params };
        model.update_info();
        Ok(model)
    }

    pub fn params(&self) -> &XyzParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut XyzParams {
        &mut self.params
    }
}

impl<T: Element> Hamiltonian<T> for Xyz<T> {
    fn core(&self) -> &ModelCore<T> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<T> {
        &mut self.core
    }

    fn hamiltonian(&mut self) -> Result<()> {
        let lattice = self.core.require_lattice()?;
        let nn = lattice.nn_bonds();
        let nnn = lattice.nnn_bonds();
        let ns = self.core.ns();
        let p = self.params;
        let c1 = XyzParams::couplings(p.j1, p.eta1, p.dlt1);
        let c2 = XyzParams::couplings(p.j2, p.eta2, p.dlt2);

        let h = fill_local(self.core.hilbert(), |s, t| {
            for &(i, j) in &nn {
                spin::exchange(s, i, j, c1, t);
            }
            for &(i, j) in &nnn {
                spin::exchange(s, i, j, c2, t);
            }
            for i in 0..ns {
                spin::field(s, i, p.hz, p.hx, t);
            }
        });
        self.core.set_matrix(h);
        Ok(())
    }

    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String {
        let p = &self.params;
        self.core
            .info_head(skip, sep, prec)
            .param("J1", p.j1)
            .param("J2", p.j2)
            .param("eta1", p.eta1)
            .param("eta2", p.eta2)
            .param("d1", p.dlt1)
            .param("d2", p.dlt2)
            .param("hz", p.hz)
            .param("hx", p.hx)
            .finish()
    }
}
