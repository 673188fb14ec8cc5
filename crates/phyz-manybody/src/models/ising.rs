//! Transverse-field Ising model.
//!
//!   H = J Σ_<ij> σz_i σz_j + Σ_i (hz σz_i + hx σx_i)
//!
//! The transverse field breaks U(1); in a restricted sector its matrix
//! elements leaving the sector are dropped.

use super::spin;
use crate::basis::sigma_z;
use crate::error::Result;
use crate::hamiltonian::{fill_local, Hamiltonian, ModelCore, ModelKind};
use crate::hilbert::HilbertSpace;
use crate::random::ModelContext;
use crate::scalar::Element;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsingParams {
    /// Spin exchange.
    pub j: f64,
    /// Longitudinal field.
    pub hz: f64,
    /// Transverse field.
    pub hx: f64,
}

impl Default for IsingParams {
    fn default() -> Self {
        Self {
            j: 1.0,
            hz: 1.0,
            hx: 1.0,
        }
    }
}

#[derive(Debug)]
pub struct Ising<T: Element> {
    core: ModelCore<T>,
    params: IsingParams,
}

impl<T: Element> Ising<T> {
    pub fn new(hilbert: HilbertSpace, params: IsingParams, ctx: &ModelContext) -> Result<Self> {
        let core = ModelCore::many_body(ModelKind::Ising, hilbert, ctx)?;
        let mut model = Self { core, params };
        model.update_info();
        Ok(model)
    }

    pub fn params(&self) -> &IsingParams {
        &self.params
    }

    pub fn set_j(&mut self, j: f64) {
        self.params.j = j;
    }

    pub fn set_hz(&mut self, hz: f64) {
        self.params.hz = hz;
    }

    pub fn set_hx(&mut self, hx: f64) {
        self.params.hx = hx;
    }
}

impl<T: Element> Hamiltonian<T> for Ising<T> {
    fn core(&self) -> &ModelCore<T> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<T> {
        &mut self.core
    }

    fn hamiltonian(&mut self) -> Result<()> {
        let lattice = self.core.require_lattice()?;
        let bonds = lattice.nn_bonds();
        let ns = self.core.ns();
        let p = self.params;

        let h = fill_local(self.core.hilbert(), |s, t| {
            for &(i, j) in &bonds {
                t.diagonal += p.j * sigma_z(s, i) * sigma_z(s, j);
            }
            for i in 0..ns {
                spin::field(s, i, p.hz, p.hx, t);
            }
        });
        self.core.set_matrix(h);
        Ok(())
    }

    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String {
        self.core
            .info_head(skip, sep, prec)
            .param("J", self.params.j)
            .param("hz", self.params.hz)
            .param("hx", self.params.hx)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HamiltonianError;
    use phyz_lattice::{BoundaryCondition, Chain, Lattice};
    use std::sync::Arc;

    fn chain(ns: usize, bc: BoundaryCondition) -> HilbertSpace {
        let lattice: Arc<dyn Lattice> = Arc::new(Chain::new(ns, bc).unwrap());
        HilbertSpace::from_lattice(lattice)
    }

    #[test]
    fn test_ising_symmetric() {
        let mut model: Ising<f64> = Ising::new(
            chain(5, BoundaryCondition::Pbc),
            IsingParams { j: 1.0, hz: 0.3, hx: 0.7 },
            &ModelContext::default(),
        )
        .unwrap();
        model.hamiltonian().unwrap();
        let h = model.matrix();
        assert_eq!(h.shape(), (32, 32));
        let diff = (h - h.transpose()).norm();
        assert!(diff < 1e-12, "H not symmetric: diff={diff}");
    }

    #[test]
    fn test_classical_diagonal() {
        // hx = 0: all-up on a 3-site OBC chain has E = 2J + 3hz.
        let mut model: Ising<f64> = Ising::new(
            chain(3, BoundaryCondition::Obc),
            IsingParams { j: 1.0, hz: 0.5, hx: 0.0 },
            &ModelContext::default(),
        )
        .unwrap();
        model.hamiltonian().unwrap();
        let h = model.matrix();
        assert!((h[(7, 7)] - 3.5).abs() < 1e-12);
        // |101⟩: both bonds antiparallel, one spin down.
        assert!((h[(5, 5)] - (-2.0 + 0.5)).abs() < 1e-12);
        assert_eq!(h.iter().filter(|x| **x != 0.0).count(), 8);
    }

    #[test]
    fn test_transverse_field_couples_single_flips() {
        let mut model: Ising<f64> = Ising::new(
            chain(2, BoundaryCondition::Obc),
            IsingParams { j: 0.0, hz: 0.0, hx: 0.25 },
            &ModelContext::default(),
        )
        .unwrap();
        model.hamiltonian().unwrap();
        let h = model.matrix();
        assert_eq!(h[(0, 1)], 0.25);
        assert_eq!(h[(0, 2)], 0.25);
        assert_eq!(h[(0, 3)], 0.0);
    }

    #[test]
    fn test_rebuild_overwrites() {
        let mut model: Ising<f64> =
            Ising::new(chain(3, BoundaryCondition::Pbc), IsingParams::default(), &ModelContext::default())
                .unwrap();
        model.hamiltonian().unwrap();
        let first = model.matrix().clone();
        model.hamiltonian().unwrap();
        assert_eq!(&first, model.matrix());
    }

    #[test]
    fn test_missing_lattice() {
        let mut model: Ising<f64> =
            Ising::new(HilbertSpace::from_sites(3), IsingParams::default(), &ModelContext::default())
                .unwrap();
        assert!(matches!(
            model.hamiltonian(),
            Err(HamiltonianError::MissingGeometry { what: "a lattice", .. })
        ));
    }

    #[test]
    fn test_info_cache_needs_refresh() {
        let mut model: Ising<f64> =
            Ising::new(chain(4, BoundaryCondition::Pbc), IsingParams::default(), &ModelContext::default())
                .unwrap();
        let before = model.cached_info().to_string();
        assert_eq!(before, "_Ising,Ns=4,BC=PBC,_J=1.0,_hz=1.0,_hx=1.0");
        assert_eq!(model.info(&[], "_", 2), model.info(&[], "_", 2));

        model.set_hx(0.5);
        assert_eq!(model.cached_info(), before);
        model.update_info();
        assert_eq!(model.cached_info(), "_Ising,Ns=4,BC=PBC,_J=1.0,_hz=1.0,_hx=0.50");
    }
}
