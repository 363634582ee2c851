//! Billiards Sim entry point
//!
//! Headless demo: racks a table and lets the autoplayer shoot until the table
//! is cleared, the cue ball is lost, or the shot limit runs out.
//!
//! Usage: `billiards-sim [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(err) = native::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless driver on the web
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use billiards_sim::consts::*;
    use billiards_sim::sim::{AutoPlayer, TableEvent};
    use billiards_sim::{LogSink, Result, SimConfig, SimError, TableSimulation};

    /// Give up after this many shots
    const MAX_SHOTS: u32 = 40;
    /// Give up on a shot that has not settled after this many frames
    const MAX_FRAMES_PER_SHOT: u32 = 60 * TARGET_FPS;
    const DEFAULT_SEED: u64 = 0x5EED;

    pub fn run() -> Result<()> {
        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => SimConfig::load(path)?,
            None => SimConfig::default(),
        };
        let seed = match args.next() {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                SimError::InvalidConfig(format!("seed must be an integer, got {raw}"))
            })?,
            None => DEFAULT_SEED,
        };

        log::info!("Billiards Sim (native) starting, seed {seed}");

        let dt = 1.0 / TARGET_FPS as f32;
        let mut sim = TableSimulation::with_config(config)?;
        sim.init()?;
        let mut player = AutoPlayer::new(seed);
        let mut sink = LogSink::default();

        let mut shots = 0;
        while shots < MAX_SHOTS {
            let Some(plan) = player.plan(&sim)? else {
                break;
            };
            shots += 1;
            log::info!(
                "shot {shots}: aiming at ball {} with {:.2}s of charge",
                plan.target,
                plan.charge_secs
            );

            // Hold the charge frame by frame, as an input layer would
            sim.start_charging()?;
            let mut held = 0.0;
            while held < plan.charge_secs {
                sim.charge_update(dt)?;
                sim.present(&mut sink)?;
                held += dt;
            }
            sim.release_shot(plan.direction)?;

            for _ in 0..MAX_FRAMES_PER_SHOT {
                sim.step(dt)?;
                sim.present(&mut sink)?;
                for event in sim.take_events() {
                    report(event);
                }
                if sim.is_at_rest()? {
                    break;
                }
            }

            if sim.is_pocketed(CUE_BALL)? {
                log::info!("cue ball lost, game over");
                break;
            }
        }

        log::info!(
            "{shots} shots, {} frames presented, {} balls left on the cloth",
            sink.frames,
            sim.balls_remaining()?
        );
        println!("{}", serde_json::to_string_pretty(&sim.snapshot()?)?);

        sim.deinit()
    }

    fn report(event: TableEvent) {
        match event {
            TableEvent::BallPocketed { ball, pocket } => {
                log::info!("ball {ball} dropped into pocket {pocket}");
            }
            TableEvent::ShotFired { ball, velocity } => {
                log::debug!("ball {ball} launched at {:.2} u/s", velocity.length());
            }
            TableEvent::CameToRest => log::debug!("table at rest"),
            TableEvent::BallCollision { .. } | TableEvent::CushionHit { .. } => {}
        }
    }
}
