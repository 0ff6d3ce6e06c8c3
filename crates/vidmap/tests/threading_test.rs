//! Producer, consumer and change-notification threads working together.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use image::{Rgb, RgbImage};
use vidmap_rs::*;

fn disc(count: u16) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = std::f32::consts::TAU * f32::from(i) / f32::from(count);
            Vec3::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect()
}

fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_producer_feeds_render_loop() {
    init_logging();
    let mut engine = Engine::default();
    let source = TestPatternSource::new(CaptureOptions::new(32, 24).unwrap()).unwrap();
    let mut producer = ProducerTask::spawn(
        "pattern",
        Box::new(source),
        Arc::clone(engine.mailbox()),
        ProducerOptions::new().with_frame_interval(Duration::from_millis(1)),
    )
    .unwrap();

    let model = PointModel::new(disc(64));
    let mut colors = vec![NO_COLOR; model.num_points()];
    let mailbox = Arc::clone(engine.mailbox());
    wait_until(|| mailbox.published_count() >= 10);

    for _ in 0..20 {
        let stats = engine.tick(1.0, &model, &mut colors);
        assert_eq!(stats.frame, Some((32, 24)));
        assert_eq!(stats.sampled + stats.blank, model.num_points());
        assert_eq!(stats.mismatched, 0);
    }
    assert!(colors.iter().all(|&c| alpha(c) == 0xFF));

    assert!(producer.stop() >= 10);
    assert!(!producer.is_running());
}

#[test]
fn test_image_sequence_loops_through_engine() {
    let images = vec![
        RgbImage::from_pixel(8, 8, Rgb([255, 0, 0])),
        RgbImage::from_pixel(8, 8, Rgb([0, 255, 0])),
    ];
    let source = ImageSequenceSource::from_images(images, CaptureOptions::new(4, 4).unwrap()).unwrap();
    let mut engine = Engine::default();
    let mut producer = ProducerTask::spawn(
        "stills",
        Box::new(source),
        Arc::clone(engine.mailbox()),
        ProducerOptions::new().with_frame_interval(Duration::from_millis(1)),
    )
    .unwrap();

    let model = PointModel::new(disc(12));
    let mut colors = vec![NO_COLOR; model.num_points()];
    let mut saw_red = false;
    let mut saw_green = false;
    let deadline = Instant::now() + Duration::from_secs(5);
    while !(saw_red && saw_green) {
        assert!(Instant::now() < deadline, "timed out");
        if engine.tick(1.0, &model, &mut colors).rendered() {
            saw_red |= colors[0] == rgb(255, 0, 0);
            saw_green |= colors[0] == rgb(0, 255, 0);
        }
        thread::sleep(Duration::from_millis(1));
    }

    producer.stop();
    engine.dispose();
    assert!(!engine.mailbox().has_frame());
}

#[test]
fn test_rebuilds_from_another_thread_never_tear() {
    let mut engine = Engine::default();
    engine
        .mailbox()
        .publish(Arc::new(Frame::from_packed_rgb(4, 4, vec![0x0033_6699; 16]).unwrap()));

    let model = PointModel::new(disc(48));
    let done = Arc::new(AtomicBool::new(false));
    let notifier = {
        let projection = Arc::clone(engine.projection());
        let done = Arc::clone(&done);
        let model = model.clone();
        thread::spawn(move || {
            let mut rebuilds = 0u32;
            while !done.load(Ordering::Acquire) {
                projection.invalidate();
                projection.rebuild(&model);
                rebuilds += 1;
            }
            rebuilds
        })
    };

    let mut colors = vec![NO_COLOR; model.num_points()];
    for _ in 0..500 {
        let stats = engine.tick(1.0, &model, &mut colors);
        assert_eq!(stats.sampled, model.num_points());
        assert!(colors.iter().all(|&c| c == rgb(0x33, 0x66, 0x99)));
    }
    done.store(true, Ordering::Release);
    assert!(notifier.join().unwrap() > 0);
}
