//! Demo mapping a scrolling test pattern onto a tilted LED disc.
//!
//! Run with `RUST_LOG=debug cargo run --example demo` to see the UV table
//! rebuilds and producer lifecycle.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use vidmap_rs::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Concentric rings of LEDs, tilted 30 degrees about X.
    let tilt = 30f32.to_radians();
    let mut points = Vec::new();
    for ring in 1..=4u8 {
        let radius = f32::from(ring) * 0.25;
        let count = u16::from(ring) * 12;
        for i in 0..count {
            let angle = std::f32::consts::TAU * f32::from(i) / f32::from(count);
            let (x, y) = (radius * angle.cos(), radius * angle.sin());
            points.push(Vec3::new(x, y * tilt.cos(), y * tilt.sin()));
        }
    }
    let model = PointModel::new(points);
    println!("model: {} points", model.num_points());

    let options = EngineOptions::new()
        .with_projection(ProjectionOptions::new().with_uv_source(UvSource::Rotated))
        .with_transform(TransformConfig::new().with_tiles(2, 1));
    let mut engine = Engine::new(options);

    let source = TestPatternSource::new(CaptureOptions::default())?;
    let mut producer = ProducerTask::spawn(
        "test pattern",
        Box::new(source),
        Arc::clone(engine.mailbox()),
        ProducerOptions::default(),
    )?;

    let table = engine.projection().table_for(&model);
    println!("plane normal: {:?}", table.plane().normal);

    let mut colors = vec![NO_COLOR; model.num_points()];
    let frame_time = Duration::from_millis(16);
    for tick in 0..120 {
        let stats = engine.tick(16.0, &model, &mut colors);
        if tick % 30 == 0 {
            println!(
                "tick {tick:3}: frame {:?}, {} sampled, {} blank, first color #{:06X}",
                stats.frame,
                stats.sampled,
                stats.blank,
                colors[0] & 0x00FF_FFFF
            );
        }
        thread::sleep(frame_time);
    }

    println!("producer published {} frames", producer.stop());
    engine.dispose();
    Ok(())
}
