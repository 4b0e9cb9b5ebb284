use anyhow::Result;
use clap::Parser;
use serde_json::json;
use virtual_pet::{app, config, logging, PetState};

#[derive(Parser, Debug)]
#[command(name = "virtual_pet")]
#[command(about = "A virtual pet that lives in your terminal")]
struct Cli {
    /// Seconds between decay ticks (overrides settings.json for this run)
    #[arg(long)]
    tick_secs: Option<u64>,

    /// Frame rate cap (10..=240)
    #[arg(long)]
    fps: Option<u32>,

    /// Draw without colour
    #[arg(long)]
    no_color: bool,

    /// Write debug-level diagnostics to the log file
    #[arg(long, short)]
    verbose: bool,

    /// Print a fresh pet's stats and activity log as JSON, then exit
    #[arg(long)]
    dump_stats: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.dump_stats {
        let pet = PetState::new();
        let out = json!({
            "stats": pet.stats(),
            "sleeping": pet.is_sleeping(),
            "activity_log": pet.activity_log(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let paths = config::project_paths();
    if let Some(p) = &paths {
        logging::init(&p.data_dir, cli.verbose);
    }

    let stored = config::settings_or_default(paths.as_ref());
    let mut settings = stored.clone();
    if let Some(secs) = cli.tick_secs {
        settings.tick_interval_secs = secs;
    }
    if let Some(fps) = cli.fps {
        settings.fps_cap = fps;
    }
    if cli.no_color {
        settings.enable_color = false;
    }

    // Only the file's own values are written back; CLI overrides are per run.
    config::save_after_clean_exit(app::run(settings), paths.as_ref(), &stored)
}
