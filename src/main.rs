//! Hoppy headless host
//!
//! Drives the simulation the way a game engine would: frames arrive at the
//! display rate, a fixed-step accumulator turns them into simulation ticks,
//! and the contact probe stands in for the engine's physics callbacks.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use hoppy::consts::{MAX_SUBSTEPS, SIM_DT};
use hoppy::sim::{ContactProbe, SimEvent, Simulation, TickInput, tick};
use hoppy::{SceneDescriptor, SimError, Tuning};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seconds of game time per run
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,

    /// Number of runs; each run is a fresh simulation
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Display frame rate fed to the accumulator
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Tuning JSON file (otherwise HOPPY_TUNING or defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Scene JSON file (otherwise the stock layout)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Let a simple bot press jump
    #[arg(short, long)]
    autopilot: bool,

    /// Print a JSON snapshot per rendered frame
    #[arg(long)]
    json: bool,
}

/// Jumps whenever the body sinks below the next gap's center
struct Autopilot;

impl Autopilot {
    fn wants_jump(&self, sim: &Simulation) -> bool {
        let body = sim.body();
        let target = sim
            .obstacles()
            .find(|o| o.right() > body.pos.x - body.radius)
            .map(|o| o.pos.y - 20.0)
            .unwrap_or(sim.viewport().y * 0.5);
        body.pos.y < target && body.vel.y <= 0.0
    }
}

/// One run: simulation plus host-side bookkeeping
struct Host {
    sim: Simulation,
    probe: ContactProbe,
    pilot: Option<Autopilot>,
    accumulator: f32,
    pending: TickInput,
}

impl Host {
    fn new(sim: Simulation, autopilot: bool) -> Self {
        Self {
            sim,
            probe: ContactProbe::new(),
            pilot: autopilot.then_some(Autopilot),
            accumulator: 0.0,
            pending: TickInput::default(),
        }
    }

    /// Run simulation ticks for one display frame
    fn update(&mut self, frame_dt: f32) {
        let dt = frame_dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if let Some(pilot) = &self.pilot {
                self.pending.jump |= pilot.wants_jump(&self.sim);
            }
            let input = std::mem::take(&mut self.pending);
            tick(&mut self.sim, &input, SIM_DT);

            // Reported to the core at the start of the next tick
            self.pending.contacts = self.probe.detect(&self.sim);

            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    fn report_events(&mut self) {
        for event in self.sim.drain_events() {
            match event {
                SimEvent::Scored { score } => log::info!("Score: {score}"),
                SimEvent::GameOver { score } => {
                    log::info!("Game over with {score} point(s) - restart available")
                }
                other => log::debug!("{other:?}"),
            }
        }
    }
}

fn load_config(args: &Args) -> Result<(SceneDescriptor, Tuning), SimError> {
    let tuning = match &args.tuning {
        Some(path) => Tuning::load_from(path)?,
        None => Tuning::load(),
    };
    let scene = match &args.scene {
        Some(path) => SceneDescriptor::load_from(path)?,
        None => SceneDescriptor::default(),
    };
    Ok((scene, tuning))
}

fn run(args: &Args) -> Result<(), SimError> {
    let (scene, tuning) = load_config(args)?;
    let base_seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });

    let frame_dt = 1.0 / args.fps.max(1.0);
    let frames = (args.seconds.max(0.0) / frame_dt).ceil() as u64;

    for run in 0..args.runs {
        let seed = base_seed.wrapping_add(run as u64);
        let sim = Simulation::new(&scene, tuning.clone(), seed)?;
        log::info!("Run {} started with seed: {}", run + 1, seed);

        let mut host = Host::new(sim, args.autopilot);
        for _ in 0..frames {
            host.update(frame_dt);
            host.report_events();

            if args.json {
                match serde_json::to_string(&host.sim.snapshot()) {
                    Ok(line) => println!("{line}"),
                    Err(e) => log::warn!("Snapshot serialization failed: {e}"),
                }
            }
        }

        println!(
            "run {}: seed {} score {} ({:?} after {} ticks)",
            run + 1,
            seed,
            host.sim.current_score(),
            host.sim.current_state(),
            host.sim.time_ticks()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Hoppy (headless) starting...");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
