use anyhow::{Context, Result as AnyhowResult};
use chrono::NaiveDate;
use clap::Parser;
use moodnote::command_registry::CommandRegistry;
use moodnote::config_io::{vault_settings_path, ConfigResolver, DirectoryContext};
use moodnote::model::vault::StdVault;
use moodnote::model::workspace::BufferWorkspace;
use moodnote::plugin::{CommandOutcome, MoodnotePlugin, OPEN_TODAY_COMMAND};
use moodnote::services::log_dirs;
use moodnote::services::time_source::{FixedTimeSource, RealTimeSource, SharedTimeSource};
use moodnote::services::tracing_setup;
use std::path::PathBuf;
use std::sync::Arc;

/// Open this month's mood note at today's entry
#[derive(Parser, Debug)]
#[command(name = "moodnote")]
#[command(about = "Open or create this month's note and jump to today's entry", long_about = None)]
#[command(version)]
struct Args {
    /// Vault directory (default: current directory)
    #[arg(long, value_name = "DIR")]
    vault: Option<PathBuf>,

    /// Path to the settings file (default: <vault>/.moodnote/data.json)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Store a new folder path in the settings before running
    #[arg(long, value_name = "PATH")]
    set_folder: Option<String>,

    /// Override the locale for this run (e.g., 'ko', 'en', 'ja')
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Path to log file (default: the moodnote state directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print the paths used by moodnote and exit
    #[arg(long)]
    show_paths: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let vault_root = match &args.vault {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let dir_context = DirectoryContext::from_system()?;
    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(|| vault_settings_path(&vault_root));

    if args.show_paths {
        log_dirs::print_all_paths(&dir_context, &settings_path);
        return Ok(());
    }

    let log_file = args.log_file.clone().unwrap_or_else(log_dirs::main_log_path);
    if !tracing_setup::init_global(&log_file) {
        eprintln!("Warning: could not open log file {}", log_file.display());
    }
    log_dirs::cleanup_stale_logs();
    tracing::info!("moodnote starting in {}", vault_root.display());

    let vault = Arc::new(StdVault::new(&vault_root));
    let time: SharedTimeSource = match args.date {
        Some(date) => Arc::new(FixedTimeSource::on_date(date)),
        None => RealTimeSource::shared(),
    };
    let store = ConfigResolver::with_vault_path(&dir_context, settings_path.clone());

    let registry = CommandRegistry::new();
    let mut plugin = MoodnotePlugin::new(vault.clone(), time, Box::new(store));
    plugin
        .load(&registry)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    if let Some(folder) = &args.set_folder {
        plugin
            .set_folder_path(folder)
            .with_context(|| format!("Failed to save settings to {}", settings_path.display()))?;
        tracing::info!("Folder path set to {:?}", folder);
    }
    if let Some(locale) = &args.locale {
        plugin.settings_mut().locale = locale.clone();
    }

    if args.dump_config {
        let json = serde_json::to_string_pretty(plugin.settings())
            .context("Failed to serialize settings")?;
        println!("{}", json);
        return Ok(());
    }

    let mut workspace = BufferWorkspace::with_pane(vault.clone());
    match plugin.execute(OPEN_TODAY_COMMAND, &mut workspace) {
        CommandOutcome::Completed(report) => {
            let full_path = vault.resolve(&report.path);
            match report.cursor {
                Some(cursor) => println!("{}:{}", full_path.display(), cursor),
                None => println!("{}", full_path.display()),
            }
            Ok(())
        }
        CommandOutcome::Failed(notice) => {
            eprintln!("{}", notice.message);
            anyhow::bail!("Failed to open today's entry (see {})", log_file.display())
        }
        CommandOutcome::Unknown => anyhow::bail!("Command {} is not registered", OPEN_TODAY_COMMAND),
    }
}
