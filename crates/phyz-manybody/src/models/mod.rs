//! Model catalog.
//!
//! Interacting (many-body) models:
//! - [`ising`]: transverse-field Ising
//! - [`xyz`]: anisotropic XYZ with next-nearest neighbours
//! - [`heisenberg`]: site-dependent XXZ with fields
//! - [`kitaev`]: Kitaev-Heisenberg with bond-dependent couplings
//! - [`qsm`]: quantum sun (ergodic dot coupled to a spin chain)
//! - [`rosenzweig_porter`]: Rosenzweig-Porter random matrix
//! - [`ultrametric`]: hierarchical ultrametric random matrix
//!
//! Quadratic (`Ns×Ns`) models:
//! - [`free_fermions`]: nearest-neighbour hopping with a Peierls phase
//! - [`aubry_andre`]: quasi-periodic on-site potential
//! - [`syk2`]: two-body SYK (GOE couplings)
//! - [`plrb`]: power-law random banded matrix

pub mod aubry_andre;
pub mod free_fermions;
pub mod heisenberg;
pub mod ising;
pub mod kitaev;
pub mod plrb;
pub mod qsm;
pub mod rosenzweig_porter;
pub mod syk2;
pub mod ultrametric;
pub mod xyz;

mod spin;

pub use aubry_andre::{AubryAndre, AubryAndreParams};
pub use free_fermions::{FreeFermions, FreeFermionsParams};
pub use heisenberg::{Heisenberg, HeisenbergParams};
pub use ising::{Ising, IsingParams};
pub use kitaev::{Kitaev, KitaevParams};
pub use plrb::{PowerLawRandomBandwidth, PlrbParams};
pub use qsm::{Qsm, QsmParams};
pub use rosenzweig_porter::{RosenzweigPorter, RosenzweigPorterParams};
pub use syk2::Syk2;
pub use ultrametric::{Ultrametric, UltrametricParams};
pub use xyz::{Xyz, XyzParams};

use crate::hilbert::HilbertSpace;

/// Hopping bonds of a single-particle model: the lattice's nearest
/// neighbours, or a periodic ring when the model is lattice-free.
pub(crate) fn hopping_bonds(hilbert: &HilbertSpace) -> Vec<(usize, usize)> {
    if let Some(lattice) = hilbert.lattice() {
        return lattice.nn_bonds();
    }
    let ns = hilbert.ns();
    (0..ns)
        .filter_map(|i| match i + 1 {
            j if j < ns => Some((i, j)),
            _ if ns > 2 => Some((i, 0)),
            _ => None,
        })
        .collect()
}
