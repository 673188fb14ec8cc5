//! Kitaev-Heisenberg model.
//!
//!   H = Σ_<ij>_γ K_γ σγ_i σγ_j + H_Heisenberg
//!
//! The bond label γ ∈ {x, y, z} comes from the lattice; every nearest
//! neighbour bond must carry one.

use super::heisenberg::HeisenbergParams;
use super::spin;
use crate::error::{HamiltonianError, Result};
use crate::hamiltonian::{fill_local, Hamiltonian, ModelCore, ModelKind};
use crate::hilbert::HilbertSpace;
use crate::random::ModelContext;
use crate::scalar::Element;
use phyz_lattice::BondKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitaevParams {
    pub kx: Vec<f64>,
    pub ky: Vec<f64>,
    pub kz: Vec<f64>,
    pub heisenberg: HeisenbergParams,
}

impl KitaevParams {
    /// Uniform Kitaev couplings without a Heisenberg part.
    pub fn pure(ns: usize, kx: f64, ky: f64, kz: f64) -> Self {
        Self {
            kx: vec![kx; ns],
            ky: vec![ky; ns],
            kz: vec![kz; ns],
            heisenberg: HeisenbergParams::uniform(ns, 0.0, 0.0, 0.0, 0.0),
        }
    }

    fn coupling(&self, kind: BondKind, site: usize) -> [f64; 3] {
        match kind {
            BondKind::X => [self.kx[site], 0.0, 0.0],
            BondKind::Y => [0.0, self.ky[site], 0.0],
            BondKind::Z => [0.0, 0.0, self.kz[site]],
        }
    }
}

#[derive(Debug)]
pub struct Kitaev<T: Element> {
    core: ModelCore<T>,
    params: KitaevParams,
}

impl<T: Element> Kitaev<T> {
    pub fn new(hilbert: HilbertSpace, params: KitaevParams, ctx: &ModelContext) -> Result<Self> {
        let core = ModelCore::many_body(ModelKind::Kitaev, hilbert, ctx)?;
        let mut model = Self { core, params };
        model.update_info();
        Ok(model)
    }

    pub fn params(&self) -> &KitaevParams {
        &self.params
    }

    pub fn set_params(&mut self, params: KitaevParams) {
        self.params = params;
    }
}

impl<T: Element> Hamiltonian<T> for Kitaev<T> {
    fn core(&self) -> &ModelCore<T> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<T> {
        &mut self.core
    }

    fn hamiltonian(&mut self) -> Result<()> {
        let lattice = self.core.require_lattice()?;
        let ns = self.core.ns();
        let p = &self.params;
        spin::require_len("Kx", &p.kx, ns)?;
        spin::require_len("Ky", &p.ky, ns)?;
        spin::require_len("Kz", &p.kz, ns)?;
        p.heisenberg.validate(ns)?;

        let bonds = lattice.nn_bonds();
        let labelled = bonds
            .iter()
            .map(|&(i, j)| -> Result<_> {
                let kind = lattice.bond_kind(i, j).ok_or_else(|| {
                    HamiltonianError::InvalidParameter(format!(
                        "{} lattice has no bond label for ({i}, {j})",
                        lattice.name()
                    ))
                })?;
                Ok((i, j, p.coupling(kind, i)))
            })
            .collect::<Result<Vec<_>>>()?;

        let h = fill_local(self.core.hilbert(), |s, t| {
            for &(i, j, k) in &labelled {
                spin::exchange(s, i, j, k, t);
            }
            p.heisenberg.act(s, &bonds, ns, t);
        });
        self.core.set_matrix(h);
        Ok(())
    }

    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String {
        let p = &self.params;
        let head = self
            .core
            .info_head(skip, sep, prec)
            .param_first("Kx", &p.kx)
            .param_first("Ky", &p.ky)
            .param_first("Kz", &p.kz);
        p.heisenberg.describe(head).finish()
    }
}
