use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sacnwire_core::{Cid, FramingOptions, Packet};
use tracing::{error, info};

struct GoldenCase {
    name: &'static str,
    packet: Packet,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        error!("{}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    for case in cases() {
        regenerate_one(&root.join(case.name), &case.packet)?;
        info!(case = case.name, "golden case written");
    }
    Ok(())
}

fn cases() -> Vec<GoldenCase> {
    let full: Vec<u8> = (0..512).map(|idx| (idx % 256) as u8).collect();
    let counting: [u8; 16] = core::array::from_fn(|idx| idx as u8);
    vec![
        GoldenCase {
            name: "reference",
            packet: Packet::new(Cid::NIL, "Test Source", 0, 1, &[255, 0, 0], 0, 3),
        },
        GoldenCase {
            name: "full_universe",
            packet: Packet::new(Cid::from_bytes(counting), "Console A", 200, 63999, &full, 0, 512)
                .with_priority(150),
        },
        GoldenCase {
            name: "terminated_preview",
            packet: Packet::new(Cid::from_bytes([0xAA; 16]), &"x".repeat(70), 255, 7, &[], 0, 0)
                .with_options(FramingOptions::PREVIEW_DATA | FramingOptions::STREAM_TERMINATED),
        },
    ]
}

fn regenerate_one(dir: &Path, packet: &Packet) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;

    let bytes = packet.to_bytes();
    let decoded = Packet::try_decode(&bytes)
        .map_err(|err| format!("golden packet does not decode: {}", err))?;
    let json = serde_json::to_string(&decoded)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;

    let bin_path = dir.join("packet.bin");
    fs::write(&bin_path, &bytes)
        .map_err(|err| format!("failed to write {}: {}", bin_path.display(), err))?;
    let json_path = dir.join("expected.json");
    fs::write(&json_path, json)
        .map_err(|err| format!("failed to write {}: {}", json_path.display(), err))?;
    Ok(())
}
