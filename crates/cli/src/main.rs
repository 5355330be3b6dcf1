use anyhow::{bail, Context, Result};
use cookiebot_autoplay::{
    launch_request, run_sweep, write_json, CountdownDisplay, LaunchRequest, SessionParts,
    SessionStatus, SessionTuning, SimulatedSurface, SweepRequest, SweepResult, SystemClock,
};
use cookiebot_core::{format_ratio, help_lines, OfflineGame, ScoreRecord};
use cookiebot_data::{default_ledger_path, LeaderboardColumn, ScoreLedger};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "COOKIEBOT_LOG";

#[derive(Debug, Clone, Default)]
struct PlayOptions {
    request: LaunchRequest,
    scores: Option<PathBuf>,
    report: Option<PathBuf>,
    tick_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
struct BoardOptions {
    column: LeaderboardColumn,
    descending: bool,
    scores: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
struct SweepOptions {
    request: SweepRequest,
    report: Option<PathBuf>,
}

#[derive(Debug, Clone)]
enum Command {
    Play(PlayOptions),
    Leaderboard(BoardOptions),
    Sweep(SweepOptions),
    Panel { scores: Option<PathBuf> },
    Help,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_command(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("run `cookiebot help` for usage");
            std::process::exit(2);
        }
    };
    if let Command::Panel { scores } = command {
        let launch = cookiebot_cui::LaunchOptions { scores };
        if let Err(err) = cookiebot_cui::run(launch) {
            eprintln!("cui launch error: {err}");
            std::process::exit(1);
        }
        return;
    }
    init_tracing();
    let outcome = match command {
        Command::Play(options) => run_play(options),
        Command::Leaderboard(options) => run_leaderboard(&options),
        Command::Sweep(options) => run_sweep_command(&options),
        Command::Help | Command::Panel { .. } => {
            print_help();
            Ok(())
        }
    };
    if let Err(err) = outcome {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_command(args: &[String]) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Help);
    };
    let rest = &args[1..];
    match first.as_str() {
        "play" => parse_play(rest).map(Command::Play),
        "leaderboard" | "board" => parse_board(rest).map(Command::Leaderboard),
        "sweep" => parse_sweep(rest).map(Command::Sweep),
        "--cui" | "panel" => {
            let mut scores = None;
            let mut idx = 0usize;
            while idx < rest.len() {
                match rest[idx].as_str() {
                    "--scores" => scores = Some(PathBuf::from(value_after(rest, &mut idx)?)),
                    other => bail!("unknown option {other:?} for panel"),
                }
                idx += 1;
            }
            Ok(Command::Panel { scores })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => bail!("unknown command {other:?}"),
    }
}

fn value_after<'a>(args: &'a [String], idx: &mut usize) -> Result<&'a str> {
    let flag = &args[*idx];
    *idx += 1;
    args.get(*idx)
        .map(String::as_str)
        .with_context(|| format!("{flag} needs a value"))
}

fn parse_play(args: &[String]) -> Result<PlayOptions> {
    let mut options = PlayOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--clicker" => options.request.clicker = true,
            "--buy-out" => options.request.buy_out = true,
            "--ratio" => options.request.ratio = value_after(args, &mut idx)?.to_string(),
            "--time" => options.request.time = value_after(args, &mut idx)?.to_string(),
            "--scores" => options.scores = Some(PathBuf::from(value_after(args, &mut idx)?)),
            "--report" => options.report = Some(PathBuf::from(value_after(args, &mut idx)?)),
            "--tick-ms" => options.tick_ms = Some(parse_number(value_after(args, &mut idx)?)?),
            other => bail!("unknown option {other:?} for play"),
        }
        idx += 1;
    }
    Ok(options)
}

fn parse_board(args: &[String]) -> Result<BoardOptions> {
    let mut options = BoardOptions {
        column: LeaderboardColumn::Cps,
        descending: true,
        scores: None,
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--sort" => {
                let name = value_after(args, &mut idx)?;
                options.column = LeaderboardColumn::from_name(name)
                    .with_context(|| format!("unknown column {name:?}, use cps, time or mode"))?;
            }
            "--asc" => options.descending = false,
            "--scores" => options.scores = Some(PathBuf::from(value_after(args, &mut idx)?)),
            other => bail!("unknown option {other:?} for leaderboard"),
        }
        idx += 1;
    }
    Ok(options)
}

fn parse_sweep(args: &[String]) -> Result<SweepOptions> {
    let mut options = SweepOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--from" => options.request.from = parse_number(value_after(args, &mut idx)?)?,
            "--to" => options.request.to = parse_number(value_after(args, &mut idx)?)?,
            "--step" => options.request.step = parse_number(value_after(args, &mut idx)?)?,
            "--time" => options.request.duration_secs = parse_number(value_after(args, &mut idx)?)?,
            "--tick-ms" => {
                options.request.tuning.tick_interval_ms = parse_number(value_after(args, &mut idx)?)?
            }
            "--no-clicker" => options.request.clicker = false,
            "--report" => options.report = Some(PathBuf::from(value_after(args, &mut idx)?)),
            other => bail!("unknown option {other:?} for sweep"),
        }
        idx += 1;
    }
    Ok(options)
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.trim()
        .parse::<T>()
        .with_context(|| format!("{text:?} is not a valid number"))
}

fn open_ledger(scores: Option<&Path>) -> ScoreLedger {
    let path = scores.map(Path::to_path_buf).unwrap_or_else(default_ledger_path);
    ScoreLedger::open(path)
}

fn run_play(options: PlayOptions) -> Result<()> {
    let mut tuning = SessionTuning::default();
    if let Some(tick_ms) = options.tick_ms {
        tuning.tick_interval_ms = tick_ms;
    }
    let clock = SystemClock::new();
    let surface = SimulatedSurface::new(OfflineGame::new(), clock.clone());
    let readiness = surface.handle();
    let ledger = open_ledger(options.scores.as_deref());
    info!(ledger = %ledger.location(), "score ledger");
    let parts = SessionParts {
        surface,
        display: ConsoleDisplay::new(),
        readiness,
        clock,
        ledger,
        tuning,
    };
    let handle = launch_request(&options.request, parts)?;
    println!("session running; press Enter to pause or resume clicking");

    let mode = handle.mode_switch();
    std::thread::Builder::new()
        .name("toggle-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                if line.is_err() {
                    break;
                }
                let now = mode.toggle();
                println!("mode: {}", now.label());
            }
        })
        .context("spawning the input thread")?;

    let outcome = handle.join()?;
    println!();
    println!("{}", outcome.report.to_text_report());
    if let Some(notice) = outcome.report.notice() {
        println!("{}: {}", notice.title, notice.body);
    }
    if let Some(path) = options.report.as_deref() {
        write_json(path, &outcome.report)
            .with_context(|| format!("writing report to {}", path.display()))?;
        debug!(path = %path.display(), "report written");
    }
    if outcome.report.status == SessionStatus::Completed {
        let mut ledger = outcome.ledger;
        println!("{}", format_leaderboard(&ledger.leaderboard()?));
    }
    Ok(())
}

fn run_leaderboard(options: &BoardOptions) -> Result<()> {
    let mut ledger = open_ledger(options.scores.as_deref());
    let rows = ledger
        .sorted_by(options.column, options.descending)
        .with_context(|| format!("reading {}", ledger.location()))?;
    println!("{}", format_leaderboard(&rows));
    Ok(())
}

fn run_sweep_command(options: &SweepOptions) -> Result<()> {
    let result = run_sweep(&options.request)?;
    println!("{}", format_sweep(&result));
    if let Some(path) = options.report.as_deref() {
        write_pretty(path, &result)?;
    }
    Ok(())
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn format_leaderboard(rows: &[ScoreRecord]) -> String {
    if rows.is_empty() {
        return "no scores recorded yet".to_string();
    }
    let mut lines = vec![format!("{:>4}  {:>12}  {:>6}  {}", "#", "CPS", "Time", "Mode")];
    for (idx, row) in rows.iter().enumerate() {
        lines.push(format!(
            "{:>4}  {:>12}  {:>6}  {}",
            idx + 1,
            format!("{:.1}", row.cps),
            row.time,
            row.mode
        ));
    }
    lines.join("\n")
}

fn format_sweep(result: &SweepResult) -> String {
    let mut lines: Vec<String> = result
        .points
        .iter()
        .map(|point| format!("ratio {:<6} cps {:.1}", format_ratio(point.ratio), point.cps))
        .collect();
    match result.best() {
        Some(best) => lines.push(format!(
            "best ratio {} ({:.1} cps)",
            format_ratio(best.ratio),
            best.cps
        )),
        None => lines.push("no ratios swept".to_string()),
    }
    lines.join("\n")
}

fn print_help() {
    println!("cookiebot - automated cookie clicker sessions");
    println!();
    println!("usage:");
    println!("  cookiebot play [--clicker] [--buy-out --ratio R] --time SECS [--scores PATH] [--report PATH] [--tick-ms N]");
    println!("  cookiebot leaderboard [--sort cps|time|mode] [--asc] [--scores PATH]");
    println!("  cookiebot sweep [--from R] [--to R] [--step R] [--time SECS] [--tick-ms N] [--no-clicker] [--report PATH]");
    println!("  cookiebot --cui [--scores PATH]");
    println!();
    println!("options:");
    for line in help_lines() {
        println!("  {line}");
    }
    println!();
    println!("The play command pauses and resumes clicking on Enter.");
    println!("Set {LOG_ENV} to adjust log output, e.g. {LOG_ENV}=debug.");
}

/// Prints the session clock in place on stdout.
struct ConsoleDisplay {
    open: bool,
}

impl ConsoleDisplay {
    fn new() -> Self {
        Self { open: true }
    }
}

impl CountdownDisplay for ConsoleDisplay {
    fn show(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = write!(out, "\rtime left {text} ");
        let _ = out.flush();
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            println!();
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
