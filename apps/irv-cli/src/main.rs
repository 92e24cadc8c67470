use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use iv_app::{load_config, AppResult, DeviceConfig};
use iv_core::{FanSpeed, Mode, SignalAttrs, SignalQuery};
use iv_store::{select_profile, SignalIndex, SignalStore};

#[derive(Parser)]
#[command(name = "irv-cli")]
#[command(about = "irvault CLI - inspect and maintain the learned signal library", long_about = None)]
struct Cli {
    /// Path to a device config YAML; its storage_root is used unless
    /// --root overrides it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root directory of the signal library
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every learned signal
    List,
    /// Show one learned signal by its exact attribute tuple
    Show {
        #[arg(long, value_parser = parse_power)]
        power: bool,
        #[arg(long)]
        mode: Mode,
        #[arg(long)]
        temperature: i32,
        #[arg(long)]
        fan: FanSpeed,
    },
    /// Forget one learned signal by its exact attribute tuple
    Delete {
        #[arg(long, value_parser = parse_power)]
        power: bool,
        #[arg(long)]
        mode: Mode,
        #[arg(long)]
        temperature: i32,
        #[arg(long)]
        fan: FanSpeed,
    },
    /// Resolve a partial query to the signal that would be replayed,
    /// without transmitting anything
    Resolve {
        #[arg(long, value_parser = parse_power)]
        power: Option<bool>,
        #[arg(long)]
        mode: Option<Mode>,
        #[arg(long)]
        temperature: Option<i32>,
        #[arg(long)]
        fan: Option<FanSpeed>,
        /// Seed for the selection RNG, for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn parse_power(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        other => Err(format!("expected on/off, got '{}'", other)),
    }
}

fn storage_root(config: Option<&PathBuf>, root: Option<PathBuf>) -> AppResult<PathBuf> {
    if let Some(root) = root {
        return Ok(root);
    }
    if let Some(config_path) = config {
        let config = load_config(config_path)?;
        return Ok(config.storage_root);
    }
    Ok(DeviceConfig::default().storage_root)
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let root = storage_root(cli.config.as_ref(), cli.root)?;
    let store = SignalStore::new(root)?;

    match cli.command {
        Commands::List => cmd_list(&store),
        Commands::Show {
            power,
            mode,
            temperature,
            fan,
        } => cmd_show(&store, attrs(power, mode, temperature, fan)),
        Commands::Delete {
            power,
            mode,
            temperature,
            fan,
        } => cmd_delete(&store, attrs(power, mode, temperature, fan)),
        Commands::Resolve {
            power,
            mode,
            temperature,
            fan,
            seed,
        } => cmd_resolve(
            &store,
            SignalQuery {
                power_on: power,
                mode,
                temperature,
                fan_speed: fan,
            },
            seed,
        ),
    }
}

fn attrs(power_on: bool, mode: Mode, temperature: i32, fan_speed: FanSpeed) -> SignalAttrs {
    SignalAttrs {
        power_on,
        mode,
        temperature,
        fan_speed,
    }
}

fn describe(attrs: &SignalAttrs) -> String {
    format!(
        "power={} mode={} temp={} fan={}",
        if attrs.power_on { "on" } else { "off" },
        attrs.mode,
        attrs.temperature,
        attrs.fan_speed
    )
}

fn cmd_list(store: &SignalStore) -> AppResult<()> {
    let mut entries: Vec<_> = store.list_all().collect();
    entries.sort_by_key(|p| store.path_for(&p.attrs));

    if entries.is_empty() {
        println!("No signals learned yet");
        return Ok(());
    }
    println!("Learned signals:");
    for profile in entries {
        let learned = profile.learned_at.as_deref().unwrap_or("-");
        println!(
            "  {} ({} pulses, learned {})",
            describe(&profile.attrs),
            profile.pulses.len(),
            learned
        );
        println!("    {}", store.path_for(&profile.attrs).display());
    }
    Ok(())
}

fn cmd_show(store: &SignalStore, attrs: SignalAttrs) -> AppResult<()> {
    let profile = store.get_exact(&attrs)?;
    println!("{}", describe(&profile.attrs));
    println!("  location: {}", store.path_for(&profile.attrs).display());
    println!("  pulses:   {}", profile.pulses.len());
    if let Some(learned_at) = &profile.learned_at {
        println!("  learned:  {}", learned_at);
    }
    Ok(())
}

fn cmd_delete(store: &SignalStore, attrs: SignalAttrs) -> AppResult<()> {
    store.delete(&attrs)?;
    println!("Deleted {}", describe(&attrs));
    Ok(())
}

fn cmd_resolve(store: &SignalStore, query: SignalQuery, seed: Option<u64>) -> AppResult<()> {
    let index = SignalIndex::build(store);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let profile = select_profile(&index, store, &query, &mut rng)?;
    println!("Would replay {}", describe(&profile.attrs));
    println!("  {} pulses", profile.pulses.len());
    Ok(())
}
