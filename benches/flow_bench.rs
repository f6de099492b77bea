//! Performance benchmarks for segmentation and sequencing

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use synthflow::{detect_phases, recommend_sequence, FrameSeries, Track};

fn synthetic_series(seconds: f32) -> FrameSeries {
    let hop = 512.0 / 22050.0;
    let frames = (seconds / hop) as usize;
    let energy: Vec<f32> = (0..frames)
        .map(|i| 0.01 + 0.14 * i as f32 / frames as f32 + 0.01 * (i as f32 * 0.01).sin())
        .collect();
    let brightness: Vec<f32> = (0..frames)
        .map(|i| if (i as f32 * hop) % 120.0 < 60.0 { 1500.0 } else { 3500.0 })
        .collect();

    FrameSeries {
        hop_length: 512,
        energy,
        brightness,
        rolloff: vec![4000.0; frames],
        zero_crossing_rate: vec![0.05; frames],
        onsets: (0..(seconds * 2.0) as usize).map(|i| i as f32 * 0.5).collect(),
        duration: Some(seconds),
    }
}

fn bench_detect_phases(c: &mut Criterion) {
    // Ten minutes of frames at 22.05 kHz / hop 512
    let series = synthetic_series(600.0);

    c.bench_function("detect_phases_600s", |b| {
        b.iter(|| {
            let _ = detect_phases(black_box(&series), black_box(22050));
        });
    });
}

fn bench_recommend_sequence(c: &mut Criterion) {
    let moods = ["atmospheric", "calm", "warm", "driving", "dark", "euphoric", "tense"];
    let keys = ["C", "Am", "G", "Em", "D", "F#", "Bb", "Dm"];
    let tracks: Vec<Track> = (0..50)
        .map(|i| Track {
            duration: 90.0 + (i * 37 % 400) as f32,
            tempo: 70.0 + (i * 13 % 70) as f32,
            key: keys[i % keys.len()].to_string(),
            mood: moods[i * 5 % moods.len()].to_string(),
            energy: 0.005 * (i * 11 % 30) as f32,
            brightness: 1200.0 + 80.0 * (i * 7 % 40) as f32,
            cluster_id: Some((i % 4) as u32),
            ..Track::neutral(format!("track_{:02}.wav", i))
        })
        .collect();

    c.bench_function("recommend_sequence_50", |b| {
        b.iter(|| recommend_sequence(black_box(&tracks)));
    });
}

criterion_group!(benches, bench_detect_phases, bench_recommend_sequence);
criterion_main!(benches);
