//! Integration tests for phyz-manybody.

use approx::assert_relative_eq;
use nalgebra::DMatrix;
use num_complex::Complex64;
use phyz_lattice::{BoundaryCondition, Chain, Lattice};
use phyz_manybody::hamiltonian::project;
use phyz_manybody::models::{
    Heisenberg, HeisenbergParams, Ising, IsingParams, Syk2, Xyz, XyzParams,
};
use phyz_manybody::random::{is_hermitian, shared_rng, HERMITIAN_TOL};
use phyz_manybody::{
    build_model, build_model_by_name, GeneratorKind, Hamiltonian, HamiltonianError, HilbertSpace,
    ModelContext, ModelKind, ModelParams, ReducedBasis, SymmetryCombination, SymmetryGenerator,
};
use std::collections::HashSet;
use std::sync::Arc;

fn binomial(n: usize, k: usize) -> usize {
    (0..k).fold(1usize, |acc, i| acc * (n - i) / (i + 1))
}

fn chain(ns: usize, bc: BoundaryCondition) -> Arc<dyn Lattice> {
    Arc::new(Chain::new(ns, bc).unwrap())
}

#[test]
fn test_u1_sector_sizes_are_binomial() {
    for ns in 1..=20 {
        let fillings: Vec<usize> = if ns <= 14 || ns == 20 {
            (0..=ns).collect()
        } else {
            vec![0, 1, ns / 2, ns]
        };
        for k in fillings {
            let sector = ReducedBasis::build(ns, &SymmetryCombination::u1(None, k as f64)).unwrap();
            assert_eq!(sector.dim(), binomial(ns, k), "Ns={ns}, k={k}");
        }
    }
}

#[test]
fn test_u1_sectors_partition_full_space() {
    for ns in 1..=10 {
        let mut seen = HashSet::new();
        for k in 0..=ns {
            let sector = ReducedBasis::build(ns, &SymmetryCombination::u1(None, k as f64)).unwrap();
            assert!(sector.states().windows(2).all(|w| w[0] < w[1]));
            for &s in sector.states() {
                assert!(seen.insert(s), "state {s} in two sectors");
            }
        }
        assert_eq!(seen.len(), 1 << ns);
    }
}

#[test]
fn test_half_filled_four_sites() {
    let sector = ReducedBasis::build(4, &SymmetryCombination::u1(None, 2.0)).unwrap();
    assert_eq!(sector.states(), &[3, 5, 6, 9, 10, 12]);
    for (i, &s) in sector.states().iter().enumerate() {
        assert_eq!(sector.index_of(s), Some(i));
    }
    assert_eq!(sector.index_of(7), None);
}

#[test]
fn test_custom_generator_combined_with_u1() {
    // Even states with two particles.
    let mut parity = SymmetryGenerator::new(None, GeneratorKind::Other);
    parity.set_predicate(|s, _| s % 2 == 0);
    let comb = SymmetryCombination::u1(None, 2.0).with(parity);
    let sector = ReducedBasis::build(4, &comb).unwrap();
    assert_eq!(sector.states(), &[6, 10, 12]);

    let unset = SymmetryGenerator::new(None, GeneratorKind::Other);
    let comb = SymmetryCombination::new().with(unset);
    assert!(matches!(
        ReducedBasis::build(3, &comb),
        Err(HamiltonianError::PredicateUnset(GeneratorKind::Other))
    ));
}

#[test]
fn test_syk2_hermitian_real_and_complex() {
    let ctx = ModelContext::seeded(1234);
    for ns in [2, 7, 16] {
        let mut real: Syk2<f64> = Syk2::from_sites(ns, 0.0, &ctx);
        real.hamiltonian().unwrap();
        assert!(is_hermitian(real.matrix(), HERMITIAN_TOL));

        let mut cplx: Syk2<Complex64> = Syk2::from_sites(ns, 0.0, &ctx);
        cplx.hamiltonian().unwrap();
        assert!(is_hermitian(cplx.matrix(), HERMITIAN_TOL));
    }
}

#[test]
fn test_seed_determinism_and_sensitivity() {
    let build = |seed: u64| -> DMatrix<f64> {
        let mut model: Syk2<f64> = Syk2::from_sites(12, 0.0, &ModelContext::seeded(seed));
        model.hamiltonian().unwrap();
        model.matrix().clone()
    };
    assert_eq!(build(99), build(99));
    let diff = (build(99) - build(100)).norm();
    assert!(diff > 0.0, "different seeds gave identical matrices");
}

#[test]
fn test_shared_stream_serializes_draws() {
    let handle = shared_rng(77);
    let ctx = ModelContext::shared(Arc::clone(&handle));
    let mut a: Syk2<f64> = Syk2::from_sites(6, 0.0, &ctx);
    let mut b: Syk2<f64> = Syk2::from_sites(6, 0.0, &ctx);
    a.hamiltonian().unwrap();
    b.hamiltonian().unwrap();
    // Both draw from one stream, so they continue rather than repeat it.
    assert!((a.matrix() - b.matrix()).norm() > 0.0);

    let mut reference: Syk2<f64> = Syk2::from_sites(6, 0.0, &ModelContext::seeded(77));
    reference.hamiltonian().unwrap();
    assert_eq!(a.matrix(), reference.matrix());
}

#[test]
fn test_quadratic_construction_paths_agree() {
    let lattice = chain(8, BoundaryCondition::Pbc);
    let hilbert = HilbertSpace::from_lattice(Arc::clone(&lattice));
    let ctx = ModelContext::seeded(5);

    let mut models: Vec<Syk2<f64>> = vec![
        Syk2::from_lattice(lattice, 0.25, &ctx),
        Syk2::from_sites(8, 0.25, &ctx),
        Syk2::from_hilbert(&hilbert, 0.25, &ctx),
    ];
    for m in &mut models {
        m.hamiltonian().unwrap();
    }
    for m in &models {
        assert_eq!(m.ns(), 8);
        assert_eq!(m.nh(), 8);
        assert_eq!(m.kind(), ModelKind::Syk2);
        assert_eq!(m.cached_info(), models[0].cached_info());
        assert_eq!(m.matrix(), models[0].matrix());
    }
}

#[test]
fn test_restricted_xxz_is_block_of_full() {
    let ns = 8;
    let lattice = chain(ns, BoundaryCondition::Pbc);
    let ctx = ModelContext::default();
    let params = HeisenbergParams {
        j: (0..ns).map(|i| 1.0 + 0.1 * i as f64).collect(),
        delta: vec![0.6; ns],
        hz: (0..ns).map(|i| 0.05 * i as f64).collect(),
        hx: vec![0.0; ns],
    };

    let mut full: Heisenberg<f64> =
        Heisenberg::new(HilbertSpace::from_lattice(Arc::clone(&lattice)), params.clone(), &ctx)
            .unwrap();
    full.hamiltonian().unwrap();

    for k in [1, 3, 4] {
        let sector =
            HilbertSpace::restricted(Arc::clone(&lattice), &SymmetryCombination::u1(None, k as f64))
                .unwrap();
        let mut reduced: Heisenberg<f64> = Heisenberg::new(sector.clone(), params.clone(), &ctx).unwrap();
        reduced.hamiltonian().unwrap();
        let block = project(full.matrix().clone(), &sector);
        assert_relative_eq!(block, reduced.matrix().clone(), epsilon = 1e-12);
    }
}

#[test]
fn test_xxz_sector_spectra_cover_full_spectrum() {
    let ns = 6;
    let lattice = chain(ns, BoundaryCondition::Obc);
    let params = XyzParams {
        j1: 1.0,
        j2: 0.3,
        eta1: 0.0,
        eta2: 0.0,
        dlt1: 0.8,
        dlt2: 0.2,
        hz: 0.1,
        hx: 0.0,
    };
    let ctx = ModelContext::default();

    let mut full: Xyz<f64> =
        Xyz::new(HilbertSpace::from_lattice(Arc::clone(&lattice)), params, &ctx).unwrap();
    full.hamiltonian().unwrap();
    let mut expected: Vec<f64> = full.matrix().clone().symmetric_eigen().eigenvalues.iter().copied().collect();
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let mut sectors = Vec::new();
    for k in 0..=ns {
        let hs = HilbertSpace::restricted(Arc::clone(&lattice), &SymmetryCombination::u1(None, k as f64))
            .unwrap();
        let mut m: Xyz<f64> = Xyz::new(hs, params, &ctx).unwrap();
        m.hamiltonian().unwrap();
        sectors.extend(m.matrix().clone().symmetric_eigen().eigenvalues.iter().copied());
    }
    sectors.sort_by(|a, b| a.partial_cmp(b).unwrap());

    assert_eq!(sectors.len(), expected.len());
    for (a, b) in sectors.iter().zip(&expected) {
        assert!((a - b).abs() < 1e-9, "{a} vs {b}");
    }
}

#[test]
fn test_info_is_pure_and_cache_is_explicit() {
    let mut model: Ising<f64> = Ising::new(
        HilbertSpace::from_lattice(chain(5, BoundaryCondition::Obc)),
        IsingParams::default(),
        &ModelContext::default(),
    )
    .unwrap();
    let skip = ["hz"];
    let a = model.info(&skip, "-", 3);
    let b = model.info(&skip, "-", 3);
    assert_eq!(a, b);
    assert_eq!(a, "-Ising,Ns=5,BC=OBC,-J=1.00,-hx=1.00");

    let cached = model.cached_info().to_string();
    model.set_j(-0.25);
    assert_eq!(model.cached_info(), cached);
    model.update_info();
    assert_eq!(model.cached_info(), "_Ising,Ns=5,BC=OBC,_J=-0.25,_hz=1.0,_hx=1.0");
}

#[test]
fn test_missing_lattice_and_unknown_tag() {
    let params = ModelParams::default();
    let ctx = ModelContext::default();

    let mut ising = build_model::<f64>(&params, HilbertSpace::from_sites(4), &ctx).unwrap();
    assert!(matches!(
        ising.hamiltonian(),
        Err(HamiltonianError::MissingGeometry { .. })
    ));

    let err = build_model_by_name::<f64>("not-a-model", &params, HilbertSpace::from_sites(4), &ctx)
        .err()
        .unwrap();
    assert!(matches!(err, HamiltonianError::UnknownModel(_)));
}

#[test]
fn test_json_record_drives_catalog() {
    let json = r#"{
        "model_type": "qsm",
        "ran_seed": 11,
        "qsm": { "n": 2, "ntot": 5, "gamma": 1.0, "g0": 0.9,
                 "alpha": [0.75], "xi": [0.2], "h": [0.5, 0.6, 0.7] }
    }"#;
    let params = ModelParams::from_json(json).unwrap();
    let ctx = params.context();

    let mut a = build_model::<f64>(&params, HilbertSpace::from_sites(5), &ctx).unwrap();
    let mut b = build_model::<f64>(&params, HilbertSpace::from_sites(5), &ctx).unwrap();
    a.hamiltonian().unwrap();
    b.hamiltonian().unwrap();
    assert_eq!(a.kind(), ModelKind::Qsm);
    assert_eq!(a.nh(), 32);
    assert_eq!(a.matrix(), b.matrix());
    assert!(is_hermitian(a.matrix(), HERMITIAN_TOL));
}

#[test]
fn test_resize_clamps_when_ntot_below_n() {
    let mut params = ModelParams::default();
    params.qsm.n = 4;
    params.qsm.ntot = 2;
    params.qsm.resize();
    assert!(params.qsm.alpha.is_empty() && params.qsm.xi.is_empty() && params.qsm.h.is_empty());

    params.ultrametric.n = 3;
    params.ultrametric.ntot = 1;
    params.ultrametric.resize();
    assert!(params.ultrametric.alpha.is_empty());
}

#[test]
fn test_too_many_sites() {
    assert!(matches!(
        ReducedBasis::build(63, &SymmetryCombination::new()),
        Err(HamiltonianError::TooManySites { ns: 63, .. })
    ));
    assert!(matches!(
        Ising::<f64>::new(HilbertSpace::from_sites(70), IsingParams::default(), &ModelContext::default()),
        Err(HamiltonianError::TooManySites { .. })
    ));
}
