//! Drives a train around a closed loop and lays out sleepers along it.
//!
//! Usage:
//! ```text
//! cargo run --example loop_track
//! RUST_LOG=looptrack=debug cargo run --example loop_track
//! ```
//!
//! Coordinate system: x right, y up, z backward.

use looptrack::math::Point3;
use looptrack::operations::motion::{ConsistParams, Track, Train};
use looptrack::tessellation::{SampleCurve, SamplingParams};

const TRACK_HEIGHT: f64 = -0.375;
const SLEEPER_INTERVAL: f64 = 0.4;
const TRAIN_SPEED: f64 = 2.55;
const WAGON_COUNT: usize = 8;
const FRAME_DT: f64 = 1.0 / 60.0;

fn main() -> looptrack::Result<()> {
    // Default: WARN for everything, INFO for looptrack.
    // Override with RUST_LOG env var (e.g. RUST_LOG=looptrack=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("loop_track=info".parse().unwrap_or_default())
        .add_directive("looptrack=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let path = [
        (0.0, 7.0),
        (-6.0, 5.0),
        (-8.0, 1.0),
        (-4.0, -6.0),
        (0.0, -7.0),
        (1.0, -4.0),
        (4.0, -3.0),
        (8.0, 7.0),
    ];
    let track = Track::new(
        path.iter()
            .map(|&(x, z)| Point3::new(x, TRACK_HEIGHT, z))
            .collect(),
    )?;
    tracing::info!(
        segments = track.lengths().segment_count(),
        total = track.total_length(),
        "track ready"
    );

    let sleepers = SampleCurve::new(SamplingParams {
        spacing: SLEEPER_INTERVAL,
        ..SamplingParams::default()
    })
    .execute(track.curve())?;
    tracing::info!(count = sleepers.len(), "sleepers laid out");

    let mut train = Train::new(&track, WAGON_COUNT, ConsistParams::default(), TRAIN_SPEED)?;
    for frame in 0..600 {
        train.advance(FRAME_DT, &track)?;
        if frame % 120 == 0 {
            for (i, placement) in train.placements(&track)?.iter().enumerate() {
                let p = placement.position;
                println!(
                    "frame {frame:>3} wagon {i}: s = {:>6.3} pos = ({:>6.2}, {:>6.2}, {:>6.2}) heading = {:>7.2}",
                    placement.parameter, p.x, p.y, p.z, placement.heading_degrees
                );
            }
        }
    }
    Ok(())
}
