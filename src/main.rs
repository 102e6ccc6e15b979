use clap::{Parser, Subcommand};
use paystate::OutputFormat;
use paystate::core::config::{self, ResolvedConfig, StartupLog};
use paystate::core::{replay, report};
use simplelog::{ConfigBuilder, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "paystate", about = "Replay payment and stars state updates")]
struct Args {
    /// Tab that receives actions without an explicit tabId
    #[arg(short, long, global = true)]
    tab: Option<u32>,

    /// How to render state snapshots
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Config file to use instead of ~/.paystate/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply an action log to a state snapshot
    Replay {
        /// State snapshot (JSON). Missing file = empty state
        #[arg(long)]
        state: PathBuf,
        /// Action log (JSON array)
        #[arg(long)]
        actions: PathBuf,
        /// Write the result here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a short report of a state snapshot
    Summary {
        #[arg(long)]
        state: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let mut notes = StartupLog::new();
    let loaded = match &args.config {
        Some(path) => config::load_config_from(path, &mut notes),
        None => config::load_config(&mut notes),
    };
    let file_config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&file_config, args.tab, args.format, &mut notes);

    // Initialize file logger
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let logger_ready = File::create(&resolved.log_file)
        .ok()
        .is_some_and(|log_file| WriteLogger::init(resolved.log_level, log_config, log_file).is_ok());

    // Config messages were gathered before the logger existed
    if logger_ready {
        notes.flush();
    } else {
        for warning in notes.warnings() {
            eprintln!("warning: {warning}");
        }
    }

    log::info!("paystate starting up, current {}", resolved.current_tab);

    match run(args.command, &resolved) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::warn!("Command failed: {}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &ResolvedConfig) -> Result<(), Box<dyn Error>> {
    let pretty = config.output_format == OutputFormat::Pretty;

    match command {
        Command::Replay {
            state,
            actions,
            out,
        } => {
            let initial = replay::load_state(&state)?;
            let actions = replay::load_actions(&actions)?;
            let count = actions.len();
            let result = replay::replay(initial, actions, config.current_tab);
            log::info!("Replayed {} actions", count);

            match out {
                Some(path) => replay::save_state(&path, &result, pretty)?,
                None => println!("{}", replay::to_json(&result, pretty)?),
            }
        }
        Command::Summary { state } => {
            let state = replay::load_state(&state)?;
            print!("{}", report::summarize(&state));
        }
    }
    Ok(())
}
