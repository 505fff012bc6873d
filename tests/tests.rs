use threebody::simulation::states::{Body, NVec2, BODY_COUNT};
use threebody::simulation::params::Parameters;
use threebody::simulation::forces::{ForceLaw, NewtonianGravity};
use threebody::simulation::integrator::{accelerations, semi_implicit_euler};
use threebody::simulation::trail::TrailBuffer;
use threebody::simulation::controller::Simulation;
use threebody::configuration::config::figure_eight_bodies;
use threebody::SimError;

/// Two bodies at rest separated along the x-axis
pub fn pair(dist: f64, m1: f64, m2: f64) -> (Body, Body) {
    let b1 = Body::new(NVec2::new(-dist / 2.0, 0.0), NVec2::zeros(), m1, "a");
    let b2 = Body::new(NVec2::new(dist / 2.0, 0.0), NVec2::zeros(), m2, "b");
    (b1, b2)
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        G: 1.0,
        dt: 0.01,
        softening: 0.1,
        max_trail_length: 800,
    }
}

pub fn figure_eight() -> [Body; 3] {
    figure_eight_bodies().map(|bc| bc.to_body())
}

pub fn figure_eight_sim(params: Parameters) -> Simulation {
    Simulation::with_bodies(params, figure_eight()).unwrap()
}

fn assert_close(a: NVec2, b: NVec2, tol: f64) {
    assert!((a - b).norm() < tol, "expected {:?}, got {:?}", b, a);
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let (b1, b2) = pair(1.3, 2.0, 3.0);
    let law = NewtonianGravity::from_params(&test_params());

    let net = law.force(&b1, &b2) + law.force(&b2, &b1);

    assert!(net.norm() < 1e-12, "Forces not equal and opposite: {:?}", net);
}

#[test]
fn gravity_third_law_on_figure_eight_pairs() {
    let bodies = figure_eight();
    let law = NewtonianGravity::from_params(&test_params());

    for i in 0..3 {
        for j in 0..3 {
            if i != j {
                let net = law.force(&bodies[i], &bodies[j]) + law.force(&bodies[j], &bodies[i]);
                assert!(net.norm() < 1e-12, "pair ({i}, {j}) net {:?}", net);
            }
        }
    }
}

#[test]
fn gravity_points_toward_other_body() {
    let (b1, b2) = pair(2.0, 1.0, 1.0);
    let law = NewtonianGravity::from_params(&test_params());

    let dx = b2.x - b1.x;
    let f = law.force(&b1, &b2);

    assert!(f.dot(&dx) > 0.0, "Force is not toward second body");
    assert!(f.y.abs() < 1e-15);
}

#[test]
fn gravity_matches_softened_formula() {
    let (b1, b2) = pair(1.0, 2.0, 3.0);
    let law = NewtonianGravity { G: 0.5, eps2: 0.01 };

    // magnitude 0.5 * 2 * 3 / 1.01^(3/2), times dx / 1.01^(1/2), along +x
    let expected = 3.0 / (1.01 * 1.01);
    let f = law.force(&b1, &b2);

    assert!((f.x - expected).abs() < 1e-12, "got {}", f.x);
}

#[test]
fn gravity_falls_off_with_cube_of_distance() {
    let (a_r, b_r) = pair(1.0, 1.0, 1.0);
    let (a_2r, b_2r) = pair(2.0, 1.0, 1.0);
    let law = NewtonianGravity { G: 1.0, eps2: 1e-12 };

    let ratio = law.force(&a_r, &b_r).norm() / law.force(&a_2r, &b_2r).norm();

    assert!((ratio - 8.0).abs() < 1e-3, "Expected ~8x, got {}", ratio);
}

#[test]
fn gravity_softening_prevents_blowup() {
    let law = NewtonianGravity::from_params(&test_params());

    let (b1, b2) = pair(1e-9, 1.0, 1.0);
    let f = law.force(&b1, &b2);
    assert!(f.norm() < 1e-3, "Softening failed; force too large: {:?}", f);

    // Coincident bodies exert no force and nothing goes non-finite
    let same = law.force(&b1, &b1.clone());
    assert_eq!(same, NVec2::zeros());
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn integrator_central_body_feels_no_net_acceleration() {
    let law = NewtonianGravity::from_params(&test_params());
    let acc = accelerations(&figure_eight(), &law);

    // Outer bodies are symmetric about the origin
    assert_close(acc[2], NVec2::zeros(), 1e-15);
    assert_close(acc[0], -acc[1], 1e-15);
}

#[test]
fn integrator_single_step_is_synchronized_semi_implicit_euler() {
    let params = test_params();
    let law = NewtonianGravity::from_params(&params);
    let before = figure_eight();

    let acc = accelerations(&before, &law);
    let mut after = before.clone();
    semi_implicit_euler(&mut after, &law, params.dt);

    for i in 0..3 {
        let v_expected = before[i].v + acc[i] * params.dt;
        assert_close(after[i].v, v_expected, 1e-15);
        assert_close(after[i].x, before[i].x + v_expected * params.dt, 1e-15);
        assert_eq!(after[i].m, before[i].m);
        assert_eq!(after[i].tag, before[i].tag);
    }
}

#[test]
fn integrator_conserves_momentum() {
    let params = test_params();
    let law = NewtonianGravity::from_params(&params);
    let mut bodies = figure_eight();
    bodies[2].m = 2.5;

    let momentum = |bs: &[Body; 3]| bs.iter().fold(NVec2::zeros(), |p, b| p + b.m * b.v);
    let p0 = momentum(&bodies);

    for _ in 0..500 {
        semi_implicit_euler(&mut bodies, &law, params.dt);
    }

    assert_close(momentum(&bodies), p0, 1e-10);
}

// ==================================================================================
// Trail tests
// ==================================================================================

#[test]
fn trail_evicts_oldest_first() {
    let mut trails = TrailBuffer::new(3);
    for k in 0..5 {
        trails.record(1, NVec2::new(k as f64, 0.0)).unwrap();
    }

    let snap = trails.snapshot(1).unwrap();
    let xs: Vec<f64> = snap.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    assert!(trails.snapshot(0).unwrap().is_empty());
}

#[test]
fn trail_zero_capacity_stays_empty() {
    let mut trails = TrailBuffer::new(0);
    trails.record(0, NVec2::new(1.0, 2.0)).unwrap();
    assert!(trails.trail(0).unwrap().is_empty());
}

#[test]
fn trail_rejects_bad_index() {
    let mut trails = TrailBuffer::new(4);
    assert_eq!(
        trails.record(3, NVec2::zeros()),
        Err(SimError::BodyIndexOutOfRange { index: 3 })
    );
    assert!(trails.snapshot(7).is_err());
}

#[test]
fn trail_huge_cap_grows_on_demand() {
    let mut trails = TrailBuffer::new(usize::MAX);
    assert_eq!(trails.max_len(), usize::MAX);

    for k in 0..10 {
        trails.record(2, NVec2::new(k as f64, 0.0)).unwrap();
    }
    assert_eq!(trails.trail(2).unwrap().len(), 10);
}

#[test]
fn trail_clear_empties_all() {
    let mut trails = TrailBuffer::new(4);
    for i in 0..3 {
        trails.record(i, NVec2::new(1.0, 1.0)).unwrap();
    }
    trails.clear();
    for i in 0..3 {
        assert!(trails.trail(i).unwrap().is_empty());
    }
}

// ==================================================================================
// Simulation controller tests
// ==================================================================================

#[test]
fn simulation_figure_eight_golden_100_steps() {
    let mut sim = figure_eight_sim(test_params());
    sim.advance(100).unwrap();

    let expected = [
        (NVec2::new(0.23818890746040813, 0.23776206580088666), NVec2::new(0.06605441056837491, 1.3639630061909214)),
        (NVec2::new(-1.1260704137841624, -0.21192010536402475), NVec2::new(0.07449764734231897, -0.4417714672928513)),
        (NVec2::new(0.8878815063237547, -0.025841960436861454), NVec2::new(-0.14055205791069375, -0.9221915388980694)),
    ];

    for (b, (x, v)) in sim.bodies().iter().zip(expected.iter()) {
        assert_close(b.x, *x, 1e-9);
        assert_close(b.v, *v, 1e-9);
    }
    assert_eq!(sim.steps(), 100);
    assert!((sim.time() - 1.0).abs() < 1e-12);
}

#[test]
fn simulation_trail_length_is_min_of_steps_and_cap() {
    let cap = 7;
    let mut sim = figure_eight_sim(Parameters { max_trail_length: cap, ..test_params() });

    for k in 1..=12usize {
        sim.step().unwrap();
        for i in 0..3 {
            assert_eq!(sim.trail(i).unwrap().len(), k.min(cap));
        }
    }
}

#[test]
fn simulation_trail_is_chronological() {
    let params = Parameters { max_trail_length: 4, ..test_params() };
    let mut sim = figure_eight_sim(params);
    let mut history: Vec<Vec<NVec2>> = vec![Vec::new(); 3];

    for _ in 0..10 {
        sim.step().unwrap();
        for (i, b) in sim.bodies().iter().enumerate() {
            history[i].push(b.x);
        }
    }

    for i in 0..3 {
        let newest_four = &history[i][history[i].len() - 4..];
        assert_eq!(sim.trails().snapshot(i).unwrap(), newest_four.to_vec());
        assert_eq!(*sim.trail(i).unwrap().back().unwrap(), sim.bodies()[i].x);
    }
}

#[test]
fn simulation_zero_trail_length_disables_trails() {
    let mut sim = figure_eight_sim(Parameters { max_trail_length: 0, ..test_params() });
    sim.advance(25).unwrap();
    for i in 0..3 {
        assert!(sim.trail(i).unwrap().is_empty());
    }
}

#[test]
fn simulation_accessors_are_idempotent() {
    let mut sim = figure_eight_sim(test_params());
    sim.advance(3).unwrap();

    let bodies = sim.bodies().to_vec();
    let trail = sim.trail(1).unwrap().clone();

    assert_eq!(sim.bodies(), bodies.as_slice());
    assert_eq!(sim.bodies(), bodies.as_slice());
    assert_eq!(sim.trail(1).unwrap(), &trail);
    assert_eq!(sim.trail(1).unwrap(), &trail);
}

#[test]
fn simulation_one_step_uses_pre_step_positions() {
    let params = test_params();
    let before = figure_eight();
    let acc = accelerations(&before, &NewtonianGravity::from_params(&params));

    let mut sim = Simulation::with_bodies(params, before.clone()).unwrap();
    sim.step().unwrap();

    for (i, b) in sim.bodies().iter().enumerate() {
        let v_after = before[i].v + acc[i] * params.dt;
        assert_close(b.v, v_after, 1e-15);
        assert_close(b.x - before[i].x, v_after * params.dt, 1e-15);
    }
}

#[test]
fn simulation_rejects_fourth_body() {
    let mut sim = figure_eight_sim(test_params());
    let extra = Body::new(NVec2::new(3.0, 3.0), NVec2::zeros(), 1.0, "white");

    for _ in 0..2 {
        assert_eq!(sim.add_body(extra.clone()), Err(SimError::InvalidBodyCount { count: 4 }));
        assert_eq!(sim.bodies().len(), 3);
    }
    assert_eq!(sim.bodies(), figure_eight().as_slice());
    assert!(sim.step().is_ok());
}

#[test]
fn simulation_refuses_to_step_with_fewer_than_three_bodies() {
    let mut sim = Simulation::new(test_params()).unwrap();
    assert_eq!(sim.step(), Err(SimError::InvalidBodyCount { count: 0 }));

    let [a, b, _] = figure_eight();
    sim.add_body(a).unwrap();
    sim.add_body(b).unwrap();
    let snapshot = sim.bodies().to_vec();

    assert!(!sim.is_ready());
    assert_eq!(sim.step(), Err(SimError::InvalidBodyCount { count: 2 }));
    assert_eq!(sim.advance(5), Err(SimError::InvalidBodyCount { count: 2 }));
    assert_eq!(sim.bodies(), snapshot.as_slice());
    assert_eq!(sim.steps(), 0);
    assert_eq!(sim.time(), 0.0);
    assert!(sim.trail(0).unwrap().is_empty());
}

#[test]
fn simulation_rejects_degenerate_mass() {
    let mut sim = Simulation::new(test_params()).unwrap();
    for m in [0.0, -1.0, f64::NAN] {
        let body = Body::new(NVec2::zeros(), NVec2::zeros(), m, "bad");
        assert!(matches!(sim.add_body(body), Err(SimError::DegenerateInput { .. })));
    }
    assert!(sim.bodies().is_empty());
}

#[test]
fn simulation_rejects_invalid_parameters() {
    let bad_dt = Parameters { dt: 0.0, ..test_params() };
    assert_eq!(
        Simulation::new(bad_dt).unwrap_err(),
        SimError::InvalidParameter { name: "dt", value: 0.0 }
    );

    let bad_soft = Parameters { softening: -0.1, ..test_params() };
    assert!(matches!(
        Simulation::new(bad_soft),
        Err(SimError::InvalidParameter { name: "softening", .. })
    ));

    let bad_g = Parameters { G: f64::INFINITY, ..test_params() };
    assert!(Simulation::new(bad_g).is_err());
}

#[test]
fn simulation_reconstruction_replays_identically() {
    let mut first = figure_eight_sim(test_params());
    first.advance(40).unwrap();

    // A reset is a brand new instance from the same initial conditions
    let mut second = figure_eight_sim(test_params());
    second.advance(40).unwrap();

    assert_eq!(first.bodies(), second.bodies());
    assert_eq!(first.trails(), second.trails());
}

#[test]
fn simulation_unbounded_trail_cap_steps_normally() {
    let params = Parameters { max_trail_length: usize::MAX, ..Parameters::default() };
    let mut sim = Simulation::with_bodies(params, figure_eight()).unwrap();
    assert_eq!(sim.trails().max_len(), usize::MAX);

    sim.advance(5).unwrap();
    for i in 0..BODY_COUNT {
        assert_eq!(sim.trail(i).unwrap().len(), 5);
    }
    assert!(sim.trail(BODY_COUNT).is_err());
}
