//! Example: Recommend a listening order for a described collection
//!
//! Usage:
//!   cargo run --release --example sequence_collection -- [--passes N] [--json] <tracks.json>
//!
//! The input is a JSON array of track descriptors, e.g.
//!   [{"filename": "dusk.wav", "energy": 0.01, "mood": "calm", "tempo": 72, "key": "Am"}, ...]
//! Missing fields fall back to neutral defaults (set RUST_LOG=warn to see which).

use std::env;
use std::fs;
use std::time::Instant;

use synthflow::{
    FlowSequencer, RefinementStrategy, SequencingConfig, Track, TrackDescriptor,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut json = false;
    let mut passes: Option<usize> = None;
    let mut path: Option<String> = None;

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--passes" => {
                let v = args
                    .first()
                    .ok_or("--passes requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                passes = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: sequence_collection [--passes N] [--json] <tracks.json>\n\
                     \n\
                     --passes N   Refine with swap sweeps until stable (at most N)\n\
                     --json       Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => path = Some(a),
        }
    }

    let Some(path) = path else {
        eprintln!("ERROR: Provide a JSON file of track descriptors. Use --help for usage.");
        std::process::exit(2);
    };

    let descriptors: Vec<TrackDescriptor> = serde_json::from_str(&fs::read_to_string(&path)?)?;
    let tracks: Vec<Track> = descriptors.into_iter().map(Track::from_descriptor).collect();

    let refinement = match passes {
        Some(max_passes) => RefinementStrategy::UntilStable { max_passes },
        None => RefinementStrategy::SingleSweep,
    };
    let sequencer = FlowSequencer::new(SequencingConfig { refinement });

    let t0 = Instant::now();
    let sequence = sequencer.recommend(&tracks);
    let elapsed_ms = t0.elapsed().as_secs_f32() * 1000.0;

    if json {
        for entry in &sequence {
            println!("{}", serde_json::to_string(entry)?);
        }
    } else {
        println!("Sequence of {} tracks ({:.1} ms)", sequence.len(), elapsed_ms);
        for entry in &sequence {
            let score = entry
                .transition_score
                .map(|s| format!("{:5.1}", s))
                .unwrap_or_else(|| "    -".to_string());
            println!(
                "{:3}. [{}] {:<32} {:>4} {:>5.0} BPM  {}",
                entry.position, score, entry.track.filename, entry.track.key, entry.track.tempo, entry.reasoning
            );
        }
    }

    Ok(())
}
