//! Bit-pattern encoding of site occupations.
//!
//! Bit `i` of a [`BasisState`] is the occupation of site `i`. For spin
//! models a set bit is spin up, `σz = +1`.

/// Many-body configuration over at most 64 sites.
pub type BasisState = u64;

/// Largest site count whose full `2^Ns` space is enumerated.
pub const MAX_SITES: usize = 62;

/// Pack site occupations into a state.
pub fn encode(occupations: &[bool]) -> BasisState {
    debug_assert!(occupations.len() <= 64, "at most 64 sites fit a BasisState");
    occupations
        .iter()
        .enumerate()
        .filter(|&(_, &occ)| occ)
        .fold(0, |state, (i, _)| state | (1 << i))
}

/// Unpack the low `ns` bits of a state.
pub fn decode(state: BasisState, ns: usize) -> Vec<bool> {
    (0..ns).map(|i| is_set(state, i)).collect()
}

/// Number of occupied sites.
#[inline]
pub fn popcount(state: BasisState) -> u32 {
    state.count_ones()
}

#[inline]
pub fn is_set(state: BasisState, site: usize) -> bool {
    (state >> site) & 1 == 1
}

#[inline]
pub fn flip(state: BasisState, site: usize) -> BasisState {
    state ^ (1 << site)
}

/// Pauli `σz` eigenvalue of a site: `+1` when set, `-1` otherwise.
#[inline]
pub fn sigma_z(state: BasisState, site: usize) -> f64 {
    if is_set(state, site) {
        1.0
    } else {
        -1.0
    }
}

/// Number of states in the full space of `ns` sites, `None` on overflow.
pub fn full_dim(ns: usize) -> Option<usize> {
    u32::try_from(ns).ok().and_then(|n| 1usize.checked_shl(n))
}
