use std::time::Instant;

use physix::utils::logging::warn_if_frame_budget_exceeded;
use physix::*;

const FRAME_BUDGET_MS: f32 = 1000.0 / 60.0;

fn main() -> Result<()> {
    let env = Environment::new(
        Vec2::new(0.0, 9.81),
        Vec2::new(10.0, 10.0),
        Vec2::new(790.0, 590.0),
    )?;
    let mut sim = Simulator::with_config(env, SimulationConfig::default().with_restitution(0.6));

    sim.add_zone(ResistanceZone::rect(
        Vec2::new(10.0, 450.0),
        Vec2::new(790.0, 590.0),
        0.02,
    )?);

    let ball = sim.spawn_body(2.0, 100.0)?;
    sim.place_body(ball, Vec2::new(200.0, 150.0))?;
    sim.apply_impulse(ball, Vec2::new(80.0, 0.0))?;

    for frame in 0..240 {
        let frame_start = Instant::now();
        sim.advance(1.0 / 60.0);
        if frame % 30 == 0 {
            for body in sim.drawables() {
                println!(
                    "frame {frame:>3}: circle at {:?} r = {}",
                    body.position(),
                    body.radius()
                );
            }
        }
        warn_if_frame_budget_exceeded(frame_start.elapsed(), FRAME_BUDGET_MS);
    }
    println!("stats: {:?}", sim.stats());
    Ok(())
}
