//! Honeycomb lattice with Kitaev bond labels.
//!
//! Unit cell `(x, y)` holds sublattice A at `2(x + lx·y)` and sublattice B
//! one index above. The three bonds of every B site are:
//!
//! - z: B(x, y) – A(x, y)
//! - x: B(x, y) – A(x+1, y)
//! - y: B(x, y) – A(x, y+1)

use crate::{BondKind, BoundaryCondition, Lattice, LatticeError, Result};

#[derive(Debug, Clone)]
pub struct Honeycomb {
    lx: usize,
    ly: usize,
    bc: BoundaryCondition,
}

impl Honeycomb {
    pub fn new(lx: usize, ly: usize, bc: BoundaryCondition) -> Result<Self> {
        if lx == 0 {
            return Err(LatticeError::EmptyExtent(lx));
        }
        if ly == 0 {
            return Err(LatticeError::EmptyExtent(ly));
        }
        Ok(Self { lx, ly, bc })
    }

    /// Site index of sublattice `sub` (0 = A, 1 = B) in cell `(x, y)`.
    #[inline]
    pub fn site_index(&self, x: usize, y: usize, sub: usize) -> usize {
        2 * (x + self.lx * y) + sub
    }

    /// `(x, y, sublattice)` of a site.
    #[inline]
    pub fn site_coords(&self, site: usize) -> (usize, usize, usize) {
        let cell = site / 2;
        (cell % self.lx, cell / self.lx, site % 2)
    }

    /// Step along one axis, `None` when the step leaves an open lattice or
    /// would fold back onto the same cell.
    fn step(&self, coord: usize, extent: usize) -> Option<usize> {
        if coord + 1 < extent {
            Some(coord + 1)
        } else if self.bc == BoundaryCondition::Pbc && extent > 1 {
            Some(0)
        } else {
            None
        }
    }

    /// Labelled forward bonds of a site. Only B sites own x and y bonds.
    fn labelled_bonds(&self, site: usize) -> Vec<(usize, BondKind)> {
        let (x, y, sub) = self.site_coords(site);
        if sub == 0 {
            return vec![(self.site_index(x, y, 1), BondKind::Z)];
        }
        let mut out = Vec::with_capacity(2);
        if let Some(nx) = self.step(x, self.lx) {
            out.push((self.site_index(nx, y, 0), BondKind::X));
        }
        if let Some(ny) = self.step(y, self.ly) {
            out.push((self.site_index(x, ny, 0), BondKind::Y));
        }
        out
    }
}

impl Lattice for Honeycomb {
    fn ns(&self) -> usize {
        2 * self.lx * self.ly
    }

    fn bc(&self) -> BoundaryCondition {
        self.bc
    }

    fn dim(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "honeycomb"
    }

    fn nn_forward(&self, site: usize) -> Vec<usize> {
        self.labelled_bonds(site).into_iter().map(|(j, _)| j).collect()
    }

    /// Next-nearest bonds are not used by the honeycomb models.
    fn nnn_forward(&self, _site: usize) -> Vec<usize> {
        Vec::new()
    }

    fn bond_kind(&self, a: usize, b: usize) -> Option<BondKind> {
        self.labelled_bonds(a)
            .into_iter()
            .find(|&(j, _)| j == b)
            .or_else(|| self.labelled_bonds(b).into_iter().find(|&(j, _)| j == a))
            .map(|(_, kind)| kind)
    }
}
