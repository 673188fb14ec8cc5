//! Rosenzweig-Porter random matrix.
//!
//! Diagonal entries are `N(0, 1)`; off-diagonal entries come from the GOE
//! (or the GUE for complex runs with `be_real = false`) and are suppressed
//! by `D^{-g/2}`, where `D` is the matrix dimension.

use crate::error::Result;
use crate::hamiltonian::{Hamiltonian, ModelCore, ModelKind};
use crate::hilbert::HilbertSpace;
use crate::random::{ensure_hermitian, ModelContext, RandomStream};
use crate::scalar::Element;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosenzweigPorterParams {
    pub g: f64,
    /// Use an `Ns×Ns` matrix instead of the many-body dimension.
    pub single_particle: bool,
    /// Keep the off-diagonal part real even for complex element types.
    pub be_real: bool,
}

impl Default for RosenzweigPorterParams {
    fn default() -> Self {
        Self {
            g: 1.0,
            single_particle: false,
            be_real: true,
        }
    }
}

#[derive(Debug)]
pub struct RosenzweigPorter<T: Element> {
    core: ModelCore<T>,
    params: RosenzweigPorterParams,
    stream: RandomStream,
}

impl<T: Element> RosenzweigPorter<T> {
    pub fn new(
        hilbert: HilbertSpace,
        params: RosenzweigPorterParams,
        ctx: &ModelContext,
    ) -> Result<Self> {
        let core = if params.single_particle {
            let ns = hilbert.ns();
            ModelCore::with_dim(ModelKind::RosenzweigPorter, hilbert, ns, ctx)
        } else {
            ModelCore::many_body(ModelKind::RosenzweigPorter, hilbert, ctx)?
        };
        let mut model = Self {
            core,
            params,
            stream: ctx.stream(),
        };
        model.update_info();
        Ok(model)
    }

    pub fn params(&self) -> &RosenzweigPorterParams {
        &self.params
    }

    /// Change the suppression exponent. The dimension is fixed at
    /// construction.
    pub fn set_g(&mut self, g: f64) {
        self.params.g = g;
    }

    pub fn reseed(&mut self, seed: u64) {
        self.stream.reseed(seed);
    }
}

impl<T: Element> Hamiltonian<T> for RosenzweigPorter<T> {
    fn core(&self) -> &ModelCore<T> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ModelCore<T> {
        &mut self.core
    }

    fn hamiltonian(&mut self) -> Result<()> {
        self.core.require_sites()?;
        let d = self.core.nh();
        let mut h: DMatrix<T> = if T::IS_COMPLEX && !self.params.be_real {
            self.stream.gue(d)
        } else {
            self.stream.goe(d)
        };

        // GOE and GUE diagonals are already N(0, 1).
        let suppression = T::from_re((d as f64).powf(-self.params.g / 2.0));
        for j in 0..d {
            for i in 0..d {
                if i != j {
                    h[(i, j)] *= suppression;
                }
            }
        }
        ensure_hermitian(&h, "Rosenzweig-Porter");
        self.core.set_matrix(h);
        Ok(())
    }

    fn info(&self, skip: &[&str], sep: &str, prec: usize) -> String {
        self.core
            .info_head(skip, sep, prec)
            .param("g", self.params.g)
            .param_int("sp", i64::from(self.params.single_particle))
            .finish()
    }
}
