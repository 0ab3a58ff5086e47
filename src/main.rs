//! Demo binary: drives the head-coupled projection pipeline with a
//! synthetic head path and prints the resulting camera state per frame.
//!
//! Stands in for the real tracker + renderer wiring; useful for eyeballing
//! filter tuning and frustum behavior without a webcam.

use anyhow::Result;
use clap::Parser;
use fishtank_vr::camera::{CameraController, PerspectiveCamera};
use fishtank_vr::config::{Config, EXAMPLE_CONFIG};
use fishtank_vr::constants::NUM_FACE_LANDMARKS;
use fishtank_vr::landmarks::Landmark;
use fishtank_vr::projection::ScreenGeometry;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Number of frames to simulate
    #[arg(short, long, default_value = "120")]
    frames: u32,

    /// Simulated frame rate
    #[arg(long, default_value = "30.0")]
    fps: f64,

    /// Amplitude of the simulated head sway, as a fraction of the frame
    #[arg(short, long, default_value = "0.15")]
    amplitude: f64,

    /// Drop the middle third of frames to exercise tracking loss
    #[arg(long)]
    simulate_loss: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Landmark frame with the nose tip at the given normalized position
fn synthetic_frame(nose_x: f64, nose_y: f64) -> Vec<Landmark> {
    let mut frame = vec![Landmark::new(0.5, 0.5, 0.0); NUM_FACE_LANDMARKS];
    frame[fishtank_vr::constants::NOSE_TIP_INDEX] = Landmark::new(nose_x, nose_y, -0.02);
    frame
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.validate()?;

    let mut estimator = config.create_estimator()?;
    let mut controller = CameraController::new(
        PerspectiveCamera::new(),
        ScreenGeometry::new(config.screen.width_mm, config.screen.height_mm),
        config.screen.near_mm,
        config.screen.far_mm,
        config.screen.default_distance_mm,
    );

    info!(
        "Simulating {} frames at {:.0} fps on a {:.0}x{:.0}mm screen",
        args.frames, args.fps, config.screen.width_mm, config.screen.height_mm
    );

    for i in 0..args.frames {
        let t = f64::from(i) / args.fps;

        // Slow figure-of-eight sway in front of the camera
        let phase = t * std::f64::consts::TAU * 0.2;
        let frame = synthetic_frame(
            args.amplitude.mul_add(phase.sin(), 0.5),
            args.amplitude.mul_add((2.0 * phase).sin() / 2.0, 0.5),
        );

        let lost = args.simulate_loss && (args.frames / 3..2 * args.frames / 3).contains(&i);
        let landmarks = if lost { None } else { Some(frame.as_slice()) };

        match estimator.estimate(landmarks, t)? {
            Some(eye) => {
                controller.update_from_head_position(eye);
                let f = controller.frustum();
                info!(
                    "t={t:6.3}s eye=({:7.1}, {:7.1}, {:7.1})mm frustum l={:.4} r={:.4} b={:.4} t={:.4}",
                    eye.x, eye.y, eye.z, f.left, f.right, f.bottom, f.top
                );
            }
            None => info!("t={t:6.3}s no subject"),
        }
    }

    Ok(())
}
