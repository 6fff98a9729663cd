//! KOLTO replay harness
//!
//! Runs the decision engine against a recorded JSON replay of tick inputs,
//! or against the builtin scenario when no file is given. Every decision and
//! signal is logged; a summary prints at the end of the run.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use kolto_core::config::load_profiles;
use kolto_core::{Engine, EngineSignal, TickInput};
use kolto_types::formatting::format_duration;
use tracing_subscriber::EnvFilter;

mod scenario;

use scenario::ReplayGateway;

#[derive(Parser)]
#[command(version, about = "KOLTO replay harness")]
struct Args {
    /// JSON replay file of tick inputs (builtin scenario when omitted)
    #[arg(short, long)]
    replay: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(short, long)]
    ticks: Option<usize>,

    /// Profile ID to run with
    #[arg(short, long, default_value = "field_medic")]
    profile: String,

    /// Directory of custom profile TOML files
    #[arg(long)]
    profiles_dir: Option<PathBuf>,

    /// Refuse every Nth gateway call (exercises the rejection path)
    #[arg(long)]
    fail_every: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let profiles = load_profiles(None, args.profiles_dir.as_deref())?;
    let profile = profiles
        .get(&args.profile)
        .ok_or_else(|| format!("unknown profile {:?}", args.profile))?
        .clone();

    let mut inputs: Vec<TickInput> = match &args.replay {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            serde_json::from_reader(reader)?
        }
        None => scenario::builtin_scenario(),
    };
    if let Some(limit) = args.ticks {
        inputs.truncate(limit);
    }
    if inputs.is_empty() {
        return Err("replay contains no ticks".into());
    }

    tracing::info!(
        "[SIM] running {} ticks with profile {}",
        inputs.len(),
        profile.id
    );

    let mut engine = Engine::field_medic(profile, ReplayGateway::new(args.fail_every))?;

    let mut issued_by_module: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut rejected = 0usize;
    let mut expired = 0usize;

    for input in &inputs {
        engine.evaluate_tick(input);

        for signal in engine.take_signals() {
            match signal {
                EngineSignal::ActionIssued { module, .. } => {
                    *issued_by_module.entry(module).or_default() += 1;
                }
                EngineSignal::ActionRejected { .. } => rejected += 1,
                EngineSignal::PendingHealExpired { records, .. } => expired += records,
                EngineSignal::ComboAdvanced { step, timestamp } => {
                    tracing::debug!("[SIM] combo advanced via {} at {}", step, timestamp);
                }
                EngineSignal::ComboReset { .. } => {}
            }
        }
    }

    let elapsed = inputs
        .last()
        .map(|last| (last.timestamp - inputs[0].timestamp).num_milliseconds() as f32 / 1000.0)
        .unwrap_or(0.0);

    let total_issued: usize = issued_by_module.values().sum();

    println!();
    println!(
        "Ran {} ticks over {} of encounter time",
        inputs.len(),
        format_duration(elapsed)
    );
    println!(
        "Actions issued: {} ({} rejected, {} pending heals expired unconfirmed)",
        total_issued, rejected, expired
    );
    for (module, count) in &issued_by_module {
        println!("  {:<20} {}", module, count);
    }

    let gateway = engine.gateway();
    println!(
        "Gateway: {} accepted / {} refused",
        gateway.accepted, gateway.rejected
    );

    Ok(())
}
