//! Sailsim Headless Simulation Harness
//!
//! Drives the pure simulation core through scripted scenarios and a seeded
//! randomized sweep. No renderer, no window, no input loop.
//!
//! Usage:
//!   cargo run -p sailsim-simtest
//!   cargo run -p sailsim-simtest -- --verbose
//!   cargo run -p sailsim-simtest -- --frames
//!   cargo run -p sailsim-simtest -- --scenario path/to/scenarios.json
//!
//! Core log output is routed through `RUST_LOG`, e.g.
//! `RUST_LOG=sailsim_logic=debug cargo run -p sailsim-simtest`.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sailsim_logic::collision::CollisionVolumes;
use sailsim_logic::forces::{drag_force, thrust_force};
use sailsim_logic::prelude::*;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

// ── Scenario table ──────────────────────────────────────────────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/scenarios.json");

#[derive(Debug, Clone, Deserialize)]
struct Scenario {
    name: String,
    #[serde(default)]
    constants: PhysicalConstants,
    #[serde(default)]
    dynamics: DynamicsConfig,
    #[serde(default)]
    environment: EnvironmentParameters,
    initial_position: Vec3,
    dt: f32,
    steps: u32,
    #[serde(default)]
    expect_stationary: bool,
    #[serde(default)]
    expect_moved: bool,
    expect_collided: Option<bool>,
    expect_heading_deg: Option<f32>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    frames: bool,
    extra_scenarios: Option<String>,
}

impl Options {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let extra_scenarios = args
            .iter()
            .position(|a| a == "--scenario")
            .and_then(|i| args.get(i + 1).cloned());
        Self {
            verbose: args.iter().any(|a| a == "--verbose"),
            frames: args.iter().any(|a| a == "--frames"),
            extra_scenarios,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let opts = Options::from_args();
    println!("=== Sailsim Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Embedded scenario table
    let (table_results, mut scenarios) = load_scenarios("embedded", SCENARIOS_JSON);
    results.extend(table_results);

    // 2. Extra scenarios from disk
    if let Some(path) = &opts.extra_scenarios {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let (r, extra) = load_scenarios(path, &json);
                results.extend(r);
                scenarios.extend(extra);
            }
            Err(e) => results.push(TestResult {
                name: "scenario_file_read".into(),
                passed: false,
                detail: format!("{}: {}", path, e),
            }),
        }
    }

    // 3. Scenario runs
    results.extend(run_scenarios(&scenarios, &opts));

    // 4. Force-model edge cases
    results.extend(validate_force_edges(opts.verbose));

    // 5. Error surface
    results.extend(validate_error_surface(opts.verbose));

    // 6. Randomized invariant sweep
    results.extend(validate_random_sweep(opts.verbose));

    // 7. Boundary zones and run-aground detection
    results.extend(validate_boundary_zones(opts.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1/2. Scenario loading ───────────────────────────────────────────────

fn load_scenarios(source: &str, json: &str) -> (Vec<TestResult>, Vec<Scenario>) {
    println!("--- Scenario Table ({}) ---", source);
    let mut results = Vec::new();

    let scenarios: Vec<Scenario> = match serde_json::from_str(json) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: format!("{}_parse", source),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return (results, Vec::new());
        }
    };

    results.push(TestResult {
        name: format!("{}_not_empty", source),
        passed: !scenarios.is_empty(),
        detail: format!("{} scenarios", scenarios.len()),
    });

    let mut names: Vec<&str> = scenarios.iter().map(|s| s.name.as_str()).collect();
    names.sort_unstable();
    let before = names.len();
    names.dedup();
    results.push(TestResult {
        name: format!("{}_unique_names", source),
        passed: names.len() == before,
        detail: format!("{} unique of {}", names.len(), before),
    });

    let bad_dt: Vec<&str> = scenarios
        .iter()
        .filter(|s| !(s.dt.is_finite() && s.dt > 0.0) || s.steps == 0)
        .map(|s| s.name.as_str())
        .collect();
    results.push(TestResult {
        name: format!("{}_timesteps", source),
        passed: bad_dt.is_empty(),
        detail: if bad_dt.is_empty() {
            "all scenarios have dt > 0 and steps > 0".into()
        } else {
            format!("bad timing: {:?}", bad_dt)
        },
    });

    (results, scenarios)
}

// ── 3. Scenario runs ────────────────────────────────────────────────────

fn run_scenarios(scenarios: &[Scenario], opts: &Options) -> Vec<TestResult> {
    println!("--- Scenario Runs ---");
    let mut results = Vec::new();

    for (i, scenario) in scenarios.iter().enumerate() {
        let print_frames = opts.frames && i == 0;
        results.extend(run_scenario(scenario, print_frames, opts.verbose));
    }

    results
}

fn run_scenario(s: &Scenario, print_frames: bool, verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let world = SimulationWorld::new(s.constants, s.dynamics, s.environment);
    let mut world = match world {
        Ok(w) => w.with_initial_position(s.initial_position),
        Err(e) => {
            results.push(TestResult {
                name: format!("{}_config", s.name),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    world.start();

    let frame_every = (s.steps / 10).max(1);
    let mut failure = None;
    for n in 0..s.steps {
        if let Err(e) = world.step(s.dt) {
            failure = Some(e);
            break;
        }
        if print_frames && (n + 1) % frame_every == 0 {
            match serde_json::to_string(&world.snapshot()) {
                Ok(line) => println!("{}", line),
                Err(e) => println!("  frame {} not serializable: {}", n + 1, e),
            }
        }
    }

    let state = world.state();
    results.push(TestResult {
        name: format!("{}_completes", s.name),
        passed: failure.is_none() && state.is_finite(),
        detail: match &failure {
            Some(e) => format!("stopped at step {}: {}", world.steps(), e),
            None => format!(
                "{} steps, {:.2}s simulated, pos=({:.2}, {:.2}, {:.2})",
                world.steps(),
                world.elapsed(),
                state.position.x,
                state.position.y,
                state.position.z
            ),
        },
    });

    if let Some(limits) = s.dynamics.yaw {
        let yaw = state.yaw();
        let rate = state.yaw_rate();
        results.push(TestResult {
            name: format!("{}_yaw_bounds", s.name),
            passed: yaw.abs() <= limits.max_heading + 1e-5
                && rate.abs() <= limits.max_angular_velocity + 1e-5,
            detail: format!("heading={:.4} rad, rate={:.4} rad/s", yaw, rate),
        });
    }

    if s.expect_stationary {
        let drift = state.position - s.initial_position;
        results.push(TestResult {
            name: format!("{}_stationary", s.name),
            passed: drift == Vec3::ZERO && state.velocity == Vec3::ZERO,
            detail: format!("drift={:?}, velocity={:?}", drift, state.velocity),
        });
    }

    if s.expect_moved {
        let travelled = (state.position - s.initial_position).length();
        results.push(TestResult {
            name: format!("{}_moved", s.name),
            passed: travelled > 1.0,
            detail: format!("travelled {:.2} units", travelled),
        });
    }

    if let Some(expected) = s.expect_collided {
        results.push(TestResult {
            name: format!("{}_collided", s.name),
            passed: world.collided() == expected,
            detail: format!(
                "collided={} (expected {}), phase={:?}",
                world.collided(),
                expected,
                world.phase()
            ),
        });
    }

    if let Some(expected) = s.expect_heading_deg {
        let actual = world.heading_degrees();
        results.push(TestResult {
            name: format!("{}_heading", s.name),
            passed: (actual - expected).abs() < 1e-3,
            detail: format!("heading={:.4}° (expected {:.4}°)", actual, expected),
        });
    }

    if verbose {
        println!("  {} → {:?} after {} steps", s.name, world.phase(), world.steps());
    }

    results
}

// ── 4. Force edge cases ─────────────────────────────────────────────────

fn validate_force_edges(verbose: bool) -> Vec<TestResult> {
    println!("--- Force Edge Cases ---");
    let mut results = Vec::new();
    let constants = PhysicalConstants::default();

    let at_rest = drag_force(Vec3::ZERO, &constants);
    results.push(TestResult {
        name: "drag_zero_at_rest".into(),
        passed: at_rest == Vec3::ZERO,
        detail: format!("{:?}", at_rest),
    });

    // drag always opposes the motion
    let mut opposing = 0;
    let directions = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z, Vec3::new(3.0, -1.0, 2.0)];
    for dir in directions {
        let drag = drag_force(dir * 4.0, &constants);
        if drag.dot(dir) < 0.0 {
            opposing += 1;
        }
    }
    results.push(TestResult {
        name: "drag_opposes_motion".into(),
        passed: opposing == directions.len(),
        detail: format!("{}/{} directions", opposing, directions.len()),
    });

    let mut env = EnvironmentParameters::default();
    env.sail_angle_deg = 0.0;
    let untrimmed = thrust_force(&env, &constants);
    results.push(TestResult {
        name: "thrust_zero_untrimmed".into(),
        passed: untrimmed == Vec3::ZERO,
        detail: format!("{:?}", untrimmed),
    });

    // thrust stays finite across the whole trim range
    let mut swept = Vec::new();
    for deg in [-90.0_f32, -45.0, 15.0, 45.0, 90.0] {
        env.sail_angle_deg = deg;
        swept.push((deg, thrust_force(&env, &constants)));
    }
    let all_finite = swept.iter().all(|(_, f)| f.is_finite());
    results.push(TestResult {
        name: "thrust_finite_over_trim".into(),
        passed: all_finite,
        detail: format!("{} trim angles", swept.len()),
    });
    if verbose {
        for (deg, f) in &swept {
            println!("  sail {:>6.1}° → thrust ({:.2}, {:.2}, {:.2})", deg, f.x, f.y, f.z);
        }
    }

    results
}

// ── 5. Error surface ────────────────────────────────────────────────────

fn validate_error_surface(verbose: bool) -> Vec<TestResult> {
    println!("--- Error Surface ---");
    let mut results = Vec::new();

    let mut world = SimulationWorld::default();
    world.start();
    let before = *world.state();
    let bad_dt: Vec<f32> = vec![0.0, -0.016, f32::NAN, f32::INFINITY];
    let rejected = bad_dt
        .iter()
        .filter(|&&dt| matches!(world.step(dt), Err(SimError::InvalidTimeStep { .. })))
        .count();
    results.push(TestResult {
        name: "invalid_dt_rejected".into(),
        passed: rejected == bad_dt.len() && *world.state() == before,
        detail: format!("{}/{} rejected, state untouched", rejected, bad_dt.len()),
    });

    let inertia = world.set_moment_of_inertia(0.0);
    results.push(TestResult {
        name: "zero_inertia_rejected".into(),
        passed: inertia.is_err() && world.environment().moment_of_inertia_y > 0.0,
        detail: match inertia {
            Ok(()) => "accepted".into(),
            Err(e) => e.to_string(),
        },
    });

    let bad_constants = PhysicalConstants {
        mass: -1.0,
        ..Default::default()
    };
    let built = SimulationWorld::new(
        bad_constants,
        DynamicsConfig::default(),
        EnvironmentParameters::default(),
    );
    results.push(TestResult {
        name: "negative_mass_rejected".into(),
        passed: matches!(built, Err(SimError::InvalidConstants(_))),
        detail: match &built {
            Ok(_) => "accepted".into(),
            Err(e) => e.to_string(),
        },
    });

    let mut idle = SimulationWorld::default();
    let idle_before = *idle.state();
    let idle_ok = (0..60).all(|_| idle.step(1.0 / 60.0).is_ok());
    results.push(TestResult {
        name: "idle_world_frozen".into(),
        passed: idle_ok && *idle.state() == idle_before && idle.steps() == 0,
        detail: format!("phase={:?}, steps={}", idle.phase(), idle.steps()),
    });

    if verbose {
        println!("  error surface checked on default world");
    }

    results
}

// ── 6. Randomized sweep ─────────────────────────────────────────────────

const SWEEP_SEED: u64 = 0x5A11_5EED;
const SWEEP_RUNS: usize = 200;
const SWEEP_STEPS: usize = 300;

fn validate_random_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized Sweep ({} runs) ---", SWEEP_RUNS);
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(SWEEP_SEED);

    let mut step_errors = 0;
    let mut non_finite = 0;
    let mut yaw_violations = 0;
    let mut latch_violations = 0;
    let mut collisions = 0;

    for run in 0..SWEEP_RUNS {
        let env = EnvironmentParameters {
            wind_pos_x: rng.gen_range(0.0..60.0),
            wind_pos_z: rng.gen_range(0.0..60.0),
            wind_neg_x: rng.gen_range(0.0..60.0),
            wind_neg_z: rng.gen_range(0.0..60.0),
            sail_angle_deg: rng.gen_range(-90.0..90.0),
            moment_of_inertia_y: rng.gen_range(0.5..500.0),
        };
        let constants = PhysicalConstants {
            mass: rng.gen_range(50.0..800.0),
            ..Default::default()
        };
        let dt = rng.gen_range(0.005..0.1);
        let start = Vec3::new(0.0, rng.gen_range(1.0..200.0), 0.0);

        let mut world = match SimulationWorld::new(constants, DynamicsConfig::default(), env) {
            Ok(w) => w.with_initial_position(start),
            Err(_) => {
                step_errors += 1;
                continue;
            }
        };
        world.start();
        let limits = world.dynamics().yaw.unwrap_or_default();

        let mut was_collided = false;
        for _ in 0..SWEEP_STEPS {
            if world.step(dt).is_err() {
                step_errors += 1;
                break;
            }
            let s = world.state();
            if !s.is_finite() {
                non_finite += 1;
                break;
            }
            if s.yaw().abs() > limits.max_heading + 1e-5
                || s.yaw_rate().abs() > limits.max_angular_velocity + 1e-5
            {
                yaw_violations += 1;
            }
            if was_collided && !world.collided() {
                latch_violations += 1;
            }
            was_collided = world.collided();
        }
        if world.collided() {
            collisions += 1;
        }

        if verbose && run % 50 == 0 {
            let p = world.position();
            println!(
                "  run {:>3}: dt={:.3} mass={:.0} → pos=({:.1}, {:.1}, {:.1}) heading={:.1}°",
                run,
                dt,
                constants.mass,
                p.x,
                p.y,
                p.z,
                world.heading_degrees()
            );
        }
    }

    results.push(TestResult {
        name: "sweep_no_step_errors".into(),
        passed: step_errors == 0,
        detail: format!("{} runs rejected a step", step_errors),
    });
    results.push(TestResult {
        name: "sweep_state_finite".into(),
        passed: non_finite == 0,
        detail: format!("{} runs went non-finite", non_finite),
    });
    results.push(TestResult {
        name: "sweep_yaw_within_limits".into(),
        passed: yaw_violations == 0,
        detail: format!("{} steps exceeded yaw limits", yaw_violations),
    });
    results.push(TestResult {
        name: "sweep_collision_latch_sticky".into(),
        passed: latch_violations == 0,
        detail: format!(
            "{} latch releases, {}/{} runs collided",
            latch_violations, collisions, SWEEP_RUNS
        ),
    });

    results
}

// ── 7. Boundary zones ───────────────────────────────────────────────────

fn validate_boundary_zones(verbose: bool) -> Vec<TestResult> {
    println!("--- Boundary Zones ---");
    let mut results = Vec::new();
    let zones = CollisionVolumes::embedded();

    results.push(TestResult {
        name: "zone_table_size".into(),
        passed: zones.len() == 7,
        detail: format!("{} zones", zones.len()),
    });

    let degenerate: Vec<&str> = zones
        .iter()
        .filter(|z| z.radius <= 0.0 || z.semi_axes().min_element() <= 0.0)
        .map(|z| z.name.as_str())
        .collect();
    results.push(TestResult {
        name: "zone_axes_positive".into(),
        passed: degenerate.is_empty(),
        detail: format!("degenerate: {:?}", degenerate),
    });

    let mut centers_inside = 0;
    for z in zones.iter() {
        if z.contains(z.center) && z.surface_distance(z.center) < 0.0 {
            centers_inside += 1;
        }
    }
    results.push(TestResult {
        name: "zone_centers_inside".into(),
        passed: centers_inside == zones.len(),
        detail: format!("{}/{}", centers_inside, zones.len()),
    });

    let origin_hits = zones.contains_point(Vec3::new(0.0, 10.0, 0.0));
    results.push(TestResult {
        name: "spawn_in_open_water".into(),
        passed: origin_hits.is_empty(),
        detail: format!("{} zones at spawn", origin_hits.len()),
    });

    // Steady southerly wind pushes the hull up the channel onto the sandbar.
    let env = EnvironmentParameters {
        wind_pos_z: 30.0,
        ..EnvironmentParameters::calm()
    };
    let start = Vec3::new(600.0, 60.0, 400.0);
    let aground = SimulationWorld::new(PhysicalConstants::default(), DynamicsConfig::default(), env)
        .map(|w| w.with_initial_position(start));
    let mut world = match aground {
        Ok(w) => w,
        Err(e) => {
            results.push(TestResult {
                name: "run_aground_config".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    world.start();

    let mut hit = None;
    for _ in 0..1500 {
        if world.step(1.0 / 60.0).is_err() {
            break;
        }
        if let Some(&index) = zones.contains_point(world.position()).first() {
            hit = Some((index, world.steps()));
            break;
        }
    }
    let hit_name = hit.and_then(|(i, _)| zones.get(i)).map(|z| z.name.clone());
    results.push(TestResult {
        name: "run_aground_detected".into(),
        passed: hit_name.as_deref() == Some("north_sandbar"),
        detail: match hit {
            Some((_, step)) => format!("{:?} at step {}", hit_name, step),
            None => format!("no zone reached, final pos={:?}", world.position()),
        },
    });

    if verbose {
        if let Some((index, distance)) = zones.nearest_volume(world.position()) {
            if let Some(z) = zones.get(index) {
                println!("  nearest zone {} at {:.1} units", z.name, distance);
            }
        }
    }

    results
}
