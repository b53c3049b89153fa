//! Benchmarks for the rep-counting pipeline.
//!
//! Run with: cargo bench --package repmeter-engine

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use repmeter_engine::clock::ManualClock;
use repmeter_engine::{
    ArmLandmarks, Confidence, Keypoint, PoseFrame, RepCounter, RepCounterConfig,
};

/// Build one synthetic frame of a rep cycle.
fn frame_at(phase: f32) -> PoseFrame {
    let angle_deg = 125.0 + 55.0 * phase.sin();
    let shoulder_y = 230.0 - 30.0 * phase.sin();
    let conf = Confidence::new(0.9).unwrap();
    let rad = angle_deg.to_radians();
    let elbow_y = shoulder_y + 100.0;
    let arm = ArmLandmarks::new(
        Keypoint::new(0.0, shoulder_y, conf),
        Keypoint::new(0.0, elbow_y, conf),
        Keypoint::new(100.0 * rad.sin(), elbow_y - 100.0 * rad.cos(), conf),
    );
    PoseFrame::new(arm, arm)
}

/// Benchmark full live-frame processing (estimate, validate, smooth, step).
fn bench_process_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("Frame Processing");

    // One simulated rep cycle worth of frames
    let frames: Vec<PoseFrame> = (0..64).map(|i| frame_at(i as f32 * 0.2)).collect();

    group.throughput(Throughput::Elements(frames.len() as u64));
    group.bench_function("process_frame x64", |b| {
        let clock = ManualClock::new();
        let mut counter =
            RepCounter::with_time_source(RepCounterConfig::default(), Box::new(clock.clone()))
                .unwrap();
        b.iter(|| {
            for frame in &frames {
                clock.advance_ms(33);
                black_box(counter.process_frame(black_box(frame)));
            }
        });
    });

    group.finish();
}

/// Benchmark the scripted-angle path (smoother plus state machine only).
fn bench_scripted_angle(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scripted Processing");

    let angles: Vec<f32> = (0..64).map(|i| 125.0 + 55.0 * (i as f32 * 0.2).sin()).collect();

    group.throughput(Throughput::Elements(angles.len() as u64));
    group.bench_function("process_scripted_angle x64", |b| {
        let clock = ManualClock::new();
        let mut counter =
            RepCounter::with_time_source(RepCounterConfig::default(), Box::new(clock.clone()))
                .unwrap();
        b.iter(|| {
            for &angle in &angles {
                clock.advance_ms(33);
                black_box(counter.process_scripted_angle(black_box(angle)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_process_frame, bench_scripted_angle);
criterion_main!(benches);
