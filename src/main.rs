mod sandbox;
mod time_accumulator;

use clap::Parser;
use physics2d::{
    scene::{load_scene, random_scene, save_scene},
    BroadPhaseKind, CollisionPhase, CollisionWorld,
};
use sandbox::SandboxConfig;
use std::{error::Error, path::PathBuf};
use time_accumulator::TimeAccumulator;

/// Runs the collision pipeline over a scene without rendering it.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Sandbox config json, CLI flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scene json to load instead of generating one.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Number of random bodies to generate.
    #[arg(long)]
    bodies: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    frames: Option<u32>,

    /// Bounding volume used by the sweep: aabb or cbb.
    #[arg(long)]
    broadphase: Option<BroadPhaseKind>,

    /// Write the starting scene to this path.
    #[arg(long)]
    save_scene: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut SandboxConfig) {
        if let Some(bodies) = self.bodies {
            config.bodies = bodies;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(broadphase) = self.broadphase {
            config.collision.broadphase = broadphase;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SandboxConfig::load(path)?,
        None => SandboxConfig::default(),
    };
    args.apply(&mut config);

    let scene = match &args.scene {
        Some(path) => load_scene(path)?,
        None => random_scene(config.seed, config.bodies),
    };
    if let Some(path) = &args.save_scene {
        save_scene(path, &scene)?;
        log::info!("saved scene to {}", path.display());
    }

    let mut world = CollisionWorld::from_scene(scene, &config.collision);
    log::info!(
        "world {:?}: {} bodies, {:?} broadphase",
        world.id(),
        world.bodies().len(),
        config.collision.broadphase
    );

    let mut accum = TimeAccumulator::new(config.update_rate_hz, config.max_steps);
    accum.set_time_dilation(config.time_dilation);
    let frame_time = config.frame_time()?;
    let mut steps = 0;
    let mut total_contacts = 0;

    for _ in 0..config.frames {
        accum.update(frame_time);
        let frame = accum.frame_number();
        for _ in 0..accum.num_steps() {
            let summary = sandbox::step(&mut world, accum.step_secs());
            steps += 1;
            total_contacts += summary.contacts;
            log::debug!(
                "frame {} step {}: {} pairs, {} contacts, {} groups (largest {})",
                frame,
                world.frame(),
                summary.pairs,
                summary.contacts,
                summary.groups,
                summary.largest_group
            );
        }
    }

    let sweep = world.broadphase().stats();
    let dispatch = world.narrowphase().stats();
    log::info!(
        "{} frames, {} steps at dilation {}, {} contacts in total",
        accum.frame_number(),
        steps,
        accum.time_dilation(),
        total_contacts
    );
    log::info!(
        "last step: {} pairs from {} comparisons, {} contacts in {} groups",
        sweep.pairs,
        sweep.comparisons,
        world.narrowphase().len(),
        world.groups().len()
    );
    log::info!(
        "last dispatch: direct {}, swapped {}, generic {}",
        dispatch.direct,
        dispatch.swapped,
        dispatch.generic
    );
    for ((a, b), entry) in world.dispatch().entries() {
        log::info!("  ({}, {}) -> {:?}", a, b, entry);
    }

    Ok(())
}
