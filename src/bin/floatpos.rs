use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "floatpos", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the position described by a scene JSON file and print it as JSON.
    Position(PositionArgs),
    /// List the placement names accepted in scene files.
    Placements,
}

#[derive(Parser, Debug)]
struct PositionArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Write the result here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Log pipeline passes and resets to stderr.
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Position(args) => cmd_position(args),
        Command::Placements => cmd_placements(),
    }
}

fn cmd_position(args: PositionArgs) -> anyhow::Result<()> {
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let scene = floatpos::Scene::from_path(&args.in_path)?;
    let result = scene
        .compute()
        .with_context(|| format!("compute position for '{}'", args.in_path.display()))?;
    let json = serde_json::to_string_pretty(&result).context("serialize result")?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json + "\n")
                .with_context(|| format!("write result '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_placements() -> anyhow::Result<()> {
    for p in floatpos::Placement::ALL {
        println!("{p}");
    }
    Ok(())
}
