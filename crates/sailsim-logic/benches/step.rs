use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use sailsim_logic::prelude::*;

fn running_world() -> SimulationWorld {
    let env = EnvironmentParameters {
        wind_pos_x: 12.0,
        wind_pos_z: 6.0,
        sail_angle_deg: 35.0,
        moment_of_inertia_y: 40.0,
        ..Default::default()
    };
    let mut world =
        SimulationWorld::new(PhysicalConstants::default(), DynamicsConfig::default(), env)
            .expect("valid configuration")
            .with_initial_position(Vec3::new(0.0, 50.0, 0.0));
    world.start();
    world
}

fn bench_step(c: &mut Criterion) {
    c.bench_function("step_60hz", |b| {
        let mut world = running_world();
        b.iter(|| {
            world.step(black_box(1.0 / 60.0)).expect("finite step");
        })
    });

    c.bench_function("step_one_simulated_minute", |b| {
        b.iter(|| {
            let mut world = running_world();
            for _ in 0..3600 {
                world.step(1.0 / 60.0).expect("finite step");
            }
            black_box(world.snapshot())
        })
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
