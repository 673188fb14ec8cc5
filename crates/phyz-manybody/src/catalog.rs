//! Build a catalog model from a parameter record.

use crate::error::{HamiltonianError, Result};
use crate::hamiltonian::{Hamiltonian, ModelKind};
use crate::hilbert::HilbertSpace;
use crate::models::{
    AubryAndre, AubryAndreParams, FreeFermions, Heisenberg, HeisenbergParams, Ising, IsingParams,
    Kitaev, KitaevParams, PlrbParams, PowerLawRandomBandwidth, Qsm, QsmParams, RosenzweigPorter,
    RosenzweigPorterParams, Syk2, Ultrametric, UltrametricParams, Xyz, XyzParams,
};
use crate::params::{broadcast, ModelParams};
use crate::random::ModelContext;
use crate::scalar::Element;
use tracing::Level;

fn heisenberg_params(p: &ModelParams, ns: usize) -> HeisenbergParams {
    HeisenbergParams {
        j: broadcast(&p.hei_j, ns),
        delta: broadcast(&p.hei_dlt, ns),
        hz: broadcast(&p.hei_hz, ns),
        hx: broadcast(&p.hei_hx, ns),
    }
}

fn qsm_params(p: &ModelParams) -> QsmParams {
    let l = p.qsm.outer();
    QsmParams {
        alpha: broadcast(&p.qsm.alpha, l),
        xi: broadcast(&p.qsm.xi, l),
        h: broadcast(&p.qsm.h, l),
        ..p.qsm.clone()
    }
}

fn ultrametric_params(p: &ModelParams) -> UltrametricParams {
    UltrametricParams {
        alpha: broadcast(&p.ultrametric.alpha, p.ultrametric.levels()),
        ..p.ultrametric.clone()
    }
}

/// Construct the model selected by `params.model_type` over `hilbert`.
///
/// Swept scalars enter with their start value and per-site arrays of length
/// one are repeated over every site. The matrix is not built yet; call
/// [`Hamiltonian::hamiltonian`] on the result.
pub fn build_model<T: Element + 'static>(
    params: &ModelParams,
    hilbert: HilbertSpace,
    ctx: &ModelContext,
) -> Result<Box<dyn Hamiltonian<T>>> {
    let ns = hilbert.ns();
    let kind = params.model_type;
    if kind.is_complex() && !T::IS_COMPLEX {
        return Err(HamiltonianError::InvalidParameter(format!(
            "{kind} needs complex matrix elements"
        )));
    }
    ctx.log(&format!("building {kind} on {ns} sites"), Level::DEBUG, 3);

    let model: Box<dyn Hamiltonian<T>> = match kind {
        ModelKind::Ising => {
            let ip = IsingParams {
                j: params.j1.value,
                hz: params.hz.value,
                hx: params.hx.value,
            };
            Box::new(Ising::<T>::new(hilbert, ip, ctx)?)
        }
        ModelKind::Xyz => {
            let xp = XyzParams {
                j1: params.j1.value,
                j2: params.j2.value,
                eta1: params.eta1.value,
                eta2: params.eta2.value,
                dlt1: params.dlt1.value,
                dlt2: params.dlt2.value,
                hz: params.hz.value,
                hx: params.hx.value,
            };
            Box::new(Xyz::<T>::new(hilbert, xp, ctx)?)
        }
        ModelKind::Heisenberg => {
            Box::new(Heisenberg::<T>::new(hilbert, heisenberg_params(params, ns), ctx)?)
        }
        ModelKind::Kitaev => {
            let kp = KitaevParams {
                kx: broadcast(&params.kx, ns),
                ky: broadcast(&params.ky, ns),
                kz: broadcast(&params.kz, ns),
                heisenberg: heisenberg_params(params, ns),
            };
            Box::new(Kitaev::<T>::new(hilbert, kp, ctx)?)
        }
        ModelKind::Qsm => Box::new(Qsm::<T>::new(hilbert, qsm_params(params), ctx)?),
        ModelKind::RosenzweigPorter => {
            let rp = &params.rosenzweig_porter;
            let rpp = RosenzweigPorterParams {
                g: rp.g.first().copied().unwrap_or(1.0),
                single_particle: rp.single_particle,
                be_real: rp.be_real,
            };
            Box::new(RosenzweigPorter::<T>::new(hilbert, rpp, ctx)?)
        }
        ModelKind::Ultrametric => {
            Box::new(Ultrametric::<T>::new(hilbert, ultrametric_params(params), ctx)?)
        }
        ModelKind::FreeFermions => {
            Box::new(FreeFermions::<T>::new(hilbert, 0.0, params.free_fermions, ctx))
        }
        ModelKind::AubryAndre => {
            let aa = &params.aubry_andre;
            let ap = AubryAndreParams {
                j: aa.j.value,
                lambda: aa.lambda.value,
                beta: aa.beta.value,
                phi: aa.phi.value,
            };
            Box::new(AubryAndre::<T>::new(hilbert, 0.0, ap, ctx))
        }
        ModelKind::Syk2 => Box::new(Syk2::<T>::new(hilbert, 0.0, ctx)),
        ModelKind::PowerLawRandomBandwidth => {
            let plrb = &params.power_law_random_bandwidth;
            let pp = PlrbParams {
                a: plrb.a.first().copied().unwrap_or(1.0),
                b: plrb.b,
            };
            let mut model = PowerLawRandomBandwidth::<T>::new(hilbert, 0.0, pp, ctx);
            model.set_many_body(plrb.many_body);
            model.update_info();
            Box::new(model)
        }
    };
    Ok(model)
}

/// Like [`build_model`], selecting the model by a textual tag such as
/// `"ising"` or `"RP"`.
pub fn build_model_by_name<T: Element + 'static>(
    tag: &str,
    params: &ModelParams,
    hilbert: HilbertSpace,
    ctx: &ModelContext,
) -> Result<Box<dyn Hamiltonian<T>>> {
    let kind: ModelKind = tag.parse()?;
    let params = ModelParams {
        model_type: kind,
        ..params.clone()
    };
    build_model(&params, hilbert, ctx)
}
