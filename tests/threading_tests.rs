use physix::*;
use std::sync::{Arc, Mutex};
use std::thread;

fn crowded_world(parallel: bool) -> (Simulator, Vec<EntityId>) {
    let env = Environment::new(Vec2::new(0.0, 9.81), Vec2::ZERO, Vec2::new(800.0, 600.0))
        .expect("valid bounds");
    let config = SimulationConfig::default()
        .with_restitution(0.7)
        .with_parallel(parallel);
    let mut sim = Simulator::with_config(env, config);
    sim.add_zone(
        ResistanceZone::rect(Vec2::new(0.0, 300.0), Vec2::new(800.0, 600.0), 0.01)
            .expect("valid zone"),
    );

    let mut ids = Vec::new();
    for i in 0..64u32 {
        let id = sim.spawn_body(1.0 + (i % 3) as f32, 4.0).expect("body fits");
        let offset = Vec2::new(20.0 + (i % 16) as f32 * 45.0, 20.0 + (i / 16) as f32 * 60.0);
        sim.place_body(id, offset).expect("placement inside bounds");
        sim.apply_impulse(id, Vec2::new((i as f32 - 32.0) * 3.0, 0.0))
            .expect("body exists");
        ids.push(id);
    }
    (sim, ids)
}

#[test]
fn test_simulator_is_sync_and_send() {
    fn assert_sync_send<T: Sync + Send>() {}
    assert_sync_send::<Simulator>();
}

#[test]
fn parallel_and_sequential_steps_agree() {
    let (mut sequential, ids) = crowded_world(false);
    let (mut parallel, _) = crowded_world(true);
    assert_eq!(parallel.parallel_enabled(), cfg!(feature = "parallel"));

    for _ in 0..120 {
        let a = sequential.step(1.0 / 60.0);
        let b = parallel.step(1.0 / 60.0);
        assert_eq!(a, b);
    }

    for id in ids {
        let a = sequential.body(id).expect("exists");
        let b = parallel.body(id).expect("exists");
        assert_eq!(a.velocity(), b.velocity());
    }
    assert_eq!(
        sequential.stats().total_boundary_contacts,
        parallel.stats().total_boundary_contacts
    );
}

#[test]
fn test_shared_simulator_across_threads() {
    let (sim, _) = crowded_world(false);
    let sim = Arc::new(Mutex::new(sim));

    let mut handles = vec![];
    for _ in 0..4 {
        let sim_clone = Arc::clone(&sim);
        let handle = thread::spawn(move || {
            let mut sim = sim_clone.lock().unwrap();
            sim.step(1.0 / 60.0);
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sim.lock().unwrap().stats().ticks, 4);
}
