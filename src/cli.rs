//! CLI definition and dispatch.

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_storage_adapter::FileStorageAdapter;
use crate::domain::config_validation::validate_journal_config;
use crate::domain::error::JournalError;
use crate::domain::export::{export_file_name, to_csv, CSV_MIME_TYPE};
use crate::domain::journal::{TradeStore, DEFAULT_STORAGE_KEY};
use crate::domain::reference::CRITICAL_RULES;
use crate::domain::settings::JournalSettings;
use crate::domain::stats::TradeStats;
use crate::domain::trade::{
    EntryQuality, Outcome, Pair, Session, SetupType, TimeZone, TradeInput, TradeRecord,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::storage_port::StoragePort;

#[derive(Parser, Debug)]
#[command(name = "ictjournal", about = "ICT trading plan journal")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log a new trade
    Add(AddArgs),
    /// Show the trade log, newest first
    List,
    /// Delete a trade by id
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show win/loss statistics
    Stats,
    /// Export the trade log as CSV
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print session windows, setup rules and the plan's standing rules
    Reference {
        #[arg(long)]
        time_zone: Option<TimeZone>,
        #[arg(long)]
        setup: Option<SetupType>,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct AddArgs {
    /// Trade date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub session: Option<Session>,
    #[arg(long)]
    pub time_zone: Option<TimeZone>,
    #[arg(long)]
    pub pair: Option<Pair>,
    #[arg(long)]
    pub setup: Option<SetupType>,
    #[arg(long)]
    pub quality: Option<EntryQuality>,
    #[arg(long, default_value = "")]
    pub entry: String,
    #[arg(long, default_value = "")]
    pub sl: String,
    #[arg(long, default_value = "")]
    pub tp: String,
    #[arg(long, default_value = "")]
    pub rr: String,
    #[arg(long)]
    pub outcome: Option<Outcome>,
    #[arg(long, default_value = "")]
    pub pips: String,
    #[arg(long, default_value = "")]
    pub notes: String,
}

impl AddArgs {
    /// Fills the same defaults the entry form starts with.
    pub fn into_input(self, today: NaiveDate, default_time_zone: TimeZone) -> TradeInput {
        TradeInput {
            date: Some(self.date.unwrap_or(today)),
            session: self.session,
            time_zone: Some(self.time_zone.unwrap_or(default_time_zone)),
            pair: self.pair,
            setup_type: self.setup,
            entry_quality: self.quality,
            entry: self.entry,
            sl: self.sl,
            tp: self.tp,
            rr: self.rr,
            outcome: self.outcome,
            pips: self.pips,
            notes: self.notes,
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(code) => return code,
        },
        None => FileConfigAdapter::empty(),
    };

    if let Err(e) = validate_journal_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let settings = build_settings(&config);
    init_logging(&settings.log_level);

    let mut store = TradeStore::open(
        FileStorageAdapter::from_config(&config),
        settings.storage_key.clone(),
    );
    let today = Utc::now().date_naive();

    match cli.command {
        Command::Add(args) => run_add(&mut store, args.into_input(today, settings.default_time_zone)),
        Command::List => {
            print!("{}", render_log(&store));
            ExitCode::SUCCESS
        }
        Command::Delete { id, yes } => {
            if yes || !settings.confirm_delete {
                run_delete(&mut store, id, None)
            } else {
                let stdin = io::stdin();
                let mut answer = stdin.lock();
                run_delete(&mut store, id, Some(&mut answer))
            }
        }
        Command::Stats => {
            print!("{}", render_stats(&TradeStats::compute(store.records())));
            ExitCode::SUCCESS
        }
        Command::Export { output } => {
            run_export(&store, output.as_deref(), &settings.output_dir, today)
        }
        Command::Reference { time_zone, setup } => {
            print!("{}", render_reference(time_zone, setup));
            ExitCode::SUCCESS
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = JournalError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Expects a config that already passed `validate_journal_config`.
pub fn build_settings(config: &dyn ConfigPort) -> JournalSettings {
    let default_time_zone = config
        .get_string("journal", "default_time_zone")
        .and_then(|s| s.parse().ok())
        .unwrap_or(TimeZone::Cest);

    JournalSettings {
        storage_key: config
            .get_string_or("journal", "storage_key", DEFAULT_STORAGE_KEY)
            .trim()
            .to_string(),
        default_time_zone,
        output_dir: PathBuf::from(config.get_string_or("export", "output_dir", ".")),
        confirm_delete: config.get_bool("journal", "confirm_delete", true),
        log_level: config.get_string_or("logging", "level", "warn"),
    }
}

/// `RUST_LOG` wins over the configured level. Repeated calls are no-ops.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run_add<S: StoragePort>(store: &mut TradeStore<S>, input: TradeInput) -> ExitCode {
    match store.add(input) {
        Ok(record) => {
            eprintln!(
                "Logged trade {}: {} {} {} ({})",
                record.id, record.date, record.pair, record.setup_type, record.session
            );
            println!("{}", record.id);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let err = JournalError::from(e);
            eprintln!("error: {err}");
            (&err).into()
        }
    }
}

/// With `answer` set, asks for confirmation first and reads the reply from it.
pub fn run_delete<S: StoragePort>(
    store: &mut TradeStore<S>,
    id: i64,
    answer: Option<&mut dyn BufRead>,
) -> ExitCode {
    if store.get(id).is_none() {
        let err = JournalError::TradeNotFound { id };
        eprintln!("error: {err}");
        return (&err).into();
    }

    if let Some(reader) = answer {
        if !confirm("Delete this trade?", reader) {
            eprintln!("Kept trade {}", id);
            return ExitCode::SUCCESS;
        }
    }

    store.remove(id);
    eprintln!("Deleted trade {}", id);
    ExitCode::SUCCESS
}

fn confirm(prompt: &str, reader: &mut dyn BufRead) -> bool {
    eprint!("{prompt} [y/N] ");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if reader.read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn run_export<S: StoragePort>(
    store: &TradeStore<S>,
    output: Option<&Path>,
    output_dir: &Path,
    today: NaiveDate,
) -> ExitCode {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output_dir.join(export_file_name(today)));

    match write_export(store.records(), &path) {
        Ok(()) => {
            eprintln!("Exported {} trades to: {}", store.len(), path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn write_export(records: &[TradeRecord], path: &Path) -> Result<(), JournalError> {
    let csv = to_csv(records)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, csv)?;
    tracing::debug!(
        path = %path.display(),
        mime = CSV_MIME_TYPE,
        trades = records.len(),
        "export written"
    );
    Ok(())
}

pub fn render_log<S: StoragePort>(store: &TradeStore<S>) -> String {
    if store.is_empty() {
        return "No trades logged yet.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10}  {:<18}  {:<6}  {:<20}  {:<7}  {:<6}  {:<9}  {:<6}  ID",
        "Date", "Session", "Pair", "Setup", "Quality", "R:R", "Outcome", "Pips"
    );
    for r in store.display_order() {
        let _ = writeln!(
            out,
            "{:<10}  {:<18}  {:<6}  {:<20}  {:<7}  {:<6}  {:<9}  {:<6}  {}",
            r.date.format("%Y-%m-%d").to_string(),
            r.session.label(),
            r.pair.label(),
            r.setup_type.label(),
            r.entry_quality.map(|q| q.grade()).unwrap_or(""),
            r.rr,
            r.outcome.map(|o| o.label()).unwrap_or(""),
            r.pips,
            r.id,
        );
    }
    out
}

pub fn render_stats(stats: &TradeStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Trades:  {}", stats.total);
    let _ = writeln!(out, "Wins:          {}", stats.wins);
    let _ = writeln!(out, "Losses:        {}", stats.losses);
    let _ = writeln!(out, "Breakeven:     {}", stats.breakevens);
    let _ = writeln!(out, "Ongoing:       {}", stats.ongoing);
    let _ = writeln!(out, "Win Rate:      {:.1}%", stats.win_rate_percent);
    out
}

/// Without a time zone both windows are shown; without a setup every setup is.
pub fn render_reference(time_zone: Option<TimeZone>, setup: Option<SetupType>) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Berlin Session Times ===");
    for session in Session::ALL {
        match time_zone {
            Some(tz) => {
                let _ = writeln!(out, "  {:<20} {}", session.label(), session.window(tz));
            }
            None => {
                let _ = writeln!(
                    out,
                    "  {:<20} Winter: {}  Summer: {}",
                    session.label(),
                    session.window(TimeZone::Cet),
                    session.window(TimeZone::Cest)
                );
            }
        }
    }

    let _ = writeln!(out, "\n=== Setup Rules ===");
    let setups: Vec<SetupType> = match setup {
        Some(s) => vec![s],
        None => SetupType::ALL.to_vec(),
    };
    for s in setups {
        let rules = s.rules();
        let _ = writeln!(out, "\n{}", s.label());
        let _ = writeln!(out, "  {}", rules.description);
        let _ = writeln!(out, "  Pairs:       {}", rules.pairs);
        let _ = writeln!(out, "  Session:     {}", rules.session);
        let _ = writeln!(out, "  Entry Rules:");
        for step in rules.entry.lines() {
            let _ = writeln!(out, "    {}", step);
        }
        let _ = writeln!(out, "  Stop Loss:   {}", rules.stop_loss);
        let _ = writeln!(out, "  Take Profit: {}", rules.take_profit);
        let _ = writeln!(out, "  Notes:       {}", rules.notes);
    }

    let _ = writeln!(out, "\n=== Critical Trading Rules ===");
    for rule in CRITICAL_RULES {
        let _ = writeln!(out, "  - {}", rule);
    }
    out
}
