//! Headless gallery demo for the vitrine quality controller.
//!
//! Builds a synthetic museum gallery, orbits a camera around it, and runs
//! the derivative quality controller once per simulated frame, with a
//! fake loader holding committed fetches in flight for a few frames.
//!
//! Run with `cargo run -p vitrine-viewer -- --frames 1200 --models 20`.

use clap::Parser;
use glam::{Mat4, Vec3};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::info;
use vitrine_assets::{DerivativeSet, QualityTier};
use vitrine_config::{CliArgs, Config, ConfigError};
use vitrine_math::Aabb;
use vitrine_quality::{DeviceCaps, QualityController, QualityOptions};
use vitrine_scene::{Camera, ModelNode, QualityTarget, SimpleScene};

#[derive(Parser, Debug)]
#[command(
    name = "vitrine-viewer",
    about = "Headless gallery demo for the vitrine quality controller"
)]
struct Args {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Number of artifact models in the gallery.
    #[arg(long, default_value_t = 12)]
    models: usize,

    /// RNG seed for the gallery layout.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Frames a simulated derivative fetch stays in flight.
    #[arg(long, default_value_t = 12)]
    load_frames: u32,

    #[command(flatten)]
    config_args: CliArgs,
}

/// Lay out artifact pedestals on a ring around the gallery center.
///
/// Most artifacts offer every quality tier; a few only ship partial
/// derivative sets, exercising the nearest-tier substitution.
fn build_gallery(models: usize, seed: u64) -> Vec<ModelNode> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    (0..models)
        .map(|i| {
            let angle = i as f32 / models.max(1) as f32 * std::f32::consts::TAU;
            let radius = rng.gen_range(3.0..9.0);
            let half = Vec3::splat(rng.gen_range(0.3..1.2));
            let position = Vec3::new(radius * angle.cos(), half.y, radius * angle.sin());
            let derivatives = match rng.gen_range(0..5) {
                0 => DerivativeSet::new(vec![
                    QualityTier::Thumb,
                    QualityTier::Low,
                    QualityTier::Medium,
                ]),
                1 => DerivativeSet::new(vec![QualityTier::Thumb, QualityTier::High]),
                _ => DerivativeSet::full(),
            };
            ModelNode::new(
                Aabb::from_center_half_extents(Vec3::ZERO, half),
                Mat4::from_translation(position),
            )
            .with_derivatives(derivatives)
        })
        .collect()
}

/// Map the config's quality section onto controller options; zeros mean
/// "keep the built-in value".
fn quality_options(config: &Config) -> QualityOptions {
    let mut options = QualityOptions::default();
    if config.quality.debounce_frames > 0 {
        options.debounce_frames = config.quality.debounce_frames;
    }
    if config.quality.max_upgrades_per_tick > 0 {
        options.max_upgrades_per_tick = config.quality.max_upgrades_per_tick as usize;
    }
    if config.quality.max_concurrent_loads > 0 {
        options.max_concurrent_loads = config.quality.max_concurrent_loads as usize;
    }
    options
}

/// Probe device capability signals, honoring config overrides.
fn device_caps(config: &Config) -> DeviceCaps {
    let max_texture_size = if config.quality.max_texture_size > 0 {
        config.quality.max_texture_size
    } else {
        4096
    };
    DeviceCaps {
        max_texture_size,
        hardware_concurrency: std::thread::available_parallelism()
            .ok()
            .map(|n| n.get() as u32),
        device_memory_gb: None,
        is_mobile: config.quality.assume_mobile,
    }
}

fn main() -> Result<(), ConfigError> {
    let args = Args::parse();

    let config_dir = args
        .config_args
        .config
        .clone()
        .or_else(Config::default_dir);
    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(&args.config_args);

    vitrine_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    let viewer = &config.viewer;
    let camera = Camera::new(
        Vec3::new(0.0, 1.6, 10.0),
        viewer.camera_fov_degrees.to_radians(),
        16.0 / 9.0,
        viewer.camera_near,
        viewer.camera_far,
    );
    let mut scene = SimpleScene::with_camera(camera);
    scene.nodes = build_gallery(args.models, args.seed);

    let caps = device_caps(&config);
    let mut controller = QualityController::with_device_caps(quality_options(&config), caps);
    info!(
        title = viewer.title.as_str(),
        models = scene.nodes.len(),
        budget = controller.budget(),
        "gallery ready"
    );

    // Frames each simulated fetch has left; 0 = idle.
    let mut loads_in_flight = vec![0u32; scene.nodes.len()];
    let mut total_changes = 0u32;

    for frame in 0..args.frames {
        // Slow orbit around the gallery center.
        let angle = frame as f32 * 0.005;
        if let Some(camera) = scene.camera.as_mut() {
            camera.position = Vec3::new(10.0 * angle.cos(), 1.6, 10.0 * angle.sin());
            camera.look_at(Vec3::new(0.0, 1.0, 0.0));
        }

        // Advance the fake loader.
        for (node, remaining) in scene.nodes.iter_mut().zip(loads_in_flight.iter_mut()) {
            if *remaining > 0 {
                *remaining -= 1;
                if *remaining == 0 {
                    node.set_loading(false);
                }
            }
        }

        let before: Vec<QualityTier> = scene.nodes.iter().map(|n| n.current_tier()).collect();
        if controller.evaluate(&mut scene) {
            total_changes += 1;
            for (i, node) in scene.nodes.iter_mut().enumerate() {
                if node.current_tier() != before[i] {
                    node.set_loading(true);
                    loads_in_flight[i] = args.load_frames;
                }
            }
        }

        if config.debug.log_tier_histogram && frame % 120 == 0 {
            let d = controller.diagnostics();
            info!(
                frame,
                thumb = d.count(QualityTier::Thumb),
                low = d.count(QualityTier::Low),
                medium = d.count(QualityTier::Medium),
                high = d.count(QualityTier::High),
                clipped = d.clipped,
                hidden = d.hidden,
                "tier histogram"
            );
        }
    }

    let d = controller.diagnostics();
    info!(
        frames = args.frames,
        changed_ticks = total_changes,
        total_cost = d.total_cost,
        budget = d.budget,
        over_budget = d.over_budget,
        "simulation finished"
    );
    Ok(())
}
