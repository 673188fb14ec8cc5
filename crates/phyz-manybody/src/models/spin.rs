//! Pauli-operator building blocks for spin-1/2 models.
//!
//! With `σz|1⟩ = +|1⟩`: `σx` flips a bit, `σy|0⟩ = i|1⟩`, `σy|1⟩ = -i|0⟩`,
//! so `σy_i σy_j` flips both bits with amplitude `-1` when they are equal
//! and `+1` when they differ.

use crate::basis::{flip, is_set, sigma_z, BasisState};
use crate::error::{HamiltonianError, Result};
use crate::hamiltonian::LocalTerms;

/// `hz σz_i + hx σx_i`.
#[inline]
pub(crate) fn field(s: BasisState, i: usize, hz: f64, hx: f64, t: &mut LocalTerms) {
    t.diagonal += hz * sigma_z(s, i);
    t.push(flip(s, i), hx);
}

/// `jx σx_i σx_j + jy σy_i σy_j + jz σz_i σz_j`.
#[inline]
pub(crate) fn exchange(
    s: BasisState,
    i: usize,
    j: usize,
    [jx, jy, jz]: [f64; 3],
    t: &mut LocalTerms,
) {
    t.diagonal += jz * sigma_z(s, i) * sigma_z(s, j);
    let yy = if is_set(s, i) == is_set(s, j) { -jy } else { jy };
    t.push(flip(flip(s, i), j), jx + yy);
}

/// Per-site coupling arrays must cover every site.
pub(crate) fn require_len(name: &str, values: &[f64], ns: usize) -> Result<()> {
    if values.len() < ns {
        return Err(HamiltonianError::InvalidParameter(format!(
            "{name} has {} entries, need {ns}",
            values.len()
        )));
    }
    Ok(())
}
