//! scene-runner: drive a DOORWAY scene headlessly from a timed command script.
//!
//! Usage:
//!   scene-runner run --scene data/lobby.json --script data/lobby_script.json --ticks 600
//!   scene-runner validate --scene data/lobby.json

use std::path::{Path, PathBuf};
use std::process;

use serde::Deserialize;

use doorway_core::commands::SceneCommand;
use doorway_core::config::SceneConfig;
use doorway_core::constants::TICK_RATE;
use doorway_sim::{EngineConfig, SceneEngine};

/// One scripted command, queued before the given tick runs.
#[derive(Debug, Deserialize)]
struct ScriptStep {
    tick: u64,
    command: SceneCommand,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "validate" => cmd_validate(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "scene-runner: DOORWAY headless scene driver\n\
         \n\
         Commands:\n\
         \n\
         run       Load a scene, replay a command script, print events as JSON lines\n\
         \n\
           --scene <path>     Scene JSON file\n\
           --script <path>    Script JSON file: [{{\"tick\": N, \"command\": {{...}}}}, ...]\n\
           --ticks <N>        Ticks to run (default: last scripted tick + 5 s)\n\
           --snapshot         Print the final snapshot after the run\n\
         \n\
         validate  Load and validate a scene without running it\n\
         \n\
           --scene <path>     Scene JSON file\n\
         \n\
         Set RUST_LOG=info (or debug) for engine diagnostics on stderr.\n"
    );
}

fn parse_path(args: &[String], flag: &str) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}

fn parse_ticks(args: &[String]) -> Option<u64> {
    for i in 0..args.len() {
        if args[i] == "--ticks" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn load_scene(path: &Path) -> SceneConfig {
    match SceneConfig::from_path(path) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error loading scene {}: {e}", path.display());
            process::exit(1);
        }
    }
}

fn load_script(path: &Path) -> Vec<ScriptStep> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error reading script {}: {e}", path.display());
            process::exit(1);
        }
    };
    match serde_json::from_str::<Vec<ScriptStep>>(&json) {
        Ok(mut steps) => {
            steps.sort_by_key(|s| s.tick);
            steps
        }
        Err(e) => {
            eprintln!("Error parsing script {}: {e}", path.display());
            process::exit(1);
        }
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let Some(scene_path) = parse_path(args, "--scene") else {
        eprintln!("Error: --scene <path> is required");
        process::exit(1);
    };
    let Some(script_path) = parse_path(args, "--script") else {
        eprintln!("Error: --script <path> is required");
        process::exit(1);
    };

    let scene = load_scene(&scene_path);
    let script = load_script(&script_path);
    let last_tick = script.last().map(|s| s.tick).unwrap_or(0);
    let ticks = parse_ticks(args).unwrap_or(last_tick + u64::from(TICK_RATE) * 5);

    log::info!(
        "script {}: {} step(s), running {ticks} ticks",
        script_path.display(),
        script.len()
    );
    let mut engine = SceneEngine::with_scene(EngineConfig::default(), &scene);
    let mut steps = script.into_iter().peekable();
    let mut event_count = 0usize;
    let mut last = None;

    for tick in 0..ticks {
        while let Some(step) = steps.next_if(|s| s.tick <= tick) {
            engine.queue_command(step.command);
        }

        let snapshot = engine.tick();
        for event in &snapshot.events {
            let line = serde_json::json!({
                "tick": tick,
                "secs": tick as f64 / f64::from(TICK_RATE),
                "event": event,
            });
            println!("{line}");
            event_count += 1;
        }
        last = Some(snapshot);
    }

    eprintln!("Ran {ticks} ticks, {event_count} event(s)");

    if args.iter().any(|a| a == "--snapshot") {
        if let Some(snapshot) = last {
            match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error serializing snapshot: {e}");
                    process::exit(1);
                }
            }
        }
    }
}

// --- Validate command ---

fn cmd_validate(args: &[String]) {
    let Some(scene_path) = parse_path(args, "--scene") else {
        eprintln!("Error: --scene <path> is required");
        process::exit(1);
    };

    let scene = load_scene(&scene_path);
    eprintln!(
        "OK: {} door(s), {} gate(s), {} panel trigger(s), {} surface(s), {} clip(s)",
        scene.doors.len(),
        scene.gates.len(),
        scene.panel_triggers.len(),
        scene.surfaces.len(),
        scene.clips.len(),
    );
}
