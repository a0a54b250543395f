mod config;
mod directories;
mod render;
mod snapshot;

use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use config::RqplayConfig;
use rqplay_core::{
    AlwaysStreamable, TorrentKey, TorrentSummary, TorrentView, file_rows::FileRowsOptions,
    next_index, prev_index,
};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Parser)]
#[command(version, author, about)]
struct Opts {
    /// The loglevel
    #[arg(value_enum, short = 'v')]
    log_level: Option<LogLevel>,

    /// Path to the JSON configuration file. Defaults to the per-user config directory.
    #[arg(long = "config", env = "RQPLAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    subcommand: SubCommand,
}

#[derive(Parser)]
struct ShowOpts {
    /// The torrent summary snapshot (JSON object or array), "-" for stdin.
    snapshot: PathBuf,

    /// Print the derived views as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct WatchOpts {
    /// The torrent summary snapshot, re-read on every tick.
    snapshot: PathBuf,

    /// How often to re-read the snapshot, e.g. 1s, 500ms. Overrides the config.
    #[arg(short = 'i', long = "interval", value_parser = parse_duration::parse)]
    interval: Option<Duration>,
}

#[derive(Parser)]
struct NavigateOpts {
    /// The torrent summary snapshot, "-" for stdin.
    snapshot: PathBuf,

    /// The torrent key.
    #[arg(short = 't', long = "torrent")]
    torrent: u64,

    /// Index of the file currently playing.
    #[arg(short = 'n', long = "index")]
    index: usize,
}

#[derive(Parser)]
enum SubCommand {
    /// Render every torrent of a snapshot once.
    Show(ShowOpts),
    /// Keep rendering a snapshot as the engine rewrites it.
    Watch(WatchOpts),
    /// Print the next playable file index, or "none".
    Next(NavigateOpts),
    /// Print the previous playable file index, or "none".
    Prev(NavigateOpts),
}

fn init_logging(opts: &Opts) {
    let default_rust_log = match opts.log_level.as_ref() {
        Some(level) => match level {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        },
        None => "info",
    };
    let stderr_filter = match std::env::var("RUST_LOG").ok() {
        Some(rust_log) => EnvFilter::builder()
            .parse(&rust_log)
            .expect("can't parse RUST_LOG"),
        None => EnvFilter::builder()
            .parse(default_rust_log)
            .expect("can't parse default_rust_log"),
    };

    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(stderr_filter)
        .init();
}

fn render_all(
    w: &mut impl Write,
    config: &RqplayConfig,
    torrents: &[TorrentSummary],
) -> anyhow::Result<()> {
    if !config.download_path.exists() {
        warn!(path = ?config.download_path, "download path missing");
        render::render_missing_download_path(w, &config.download_path)?;
    }
    let opts = FileRowsOptions::from(config.display);
    for torrent in torrents {
        let view = TorrentView::build(torrent, &AlwaysStreamable, opts);
        render::render_torrent(w, &view)?;
    }
    Ok(())
}

fn show(config: &RqplayConfig, show_opts: &ShowOpts) -> anyhow::Result<()> {
    let torrents = snapshot::read_snapshot(&show_opts.snapshot)?;
    let mut stdout = std::io::stdout().lock();
    if show_opts.json {
        let opts = FileRowsOptions::from(config.display);
        let views = torrents
            .iter()
            .map(|t| TorrentView::build(t, &AlwaysStreamable, opts))
            .collect::<Vec<_>>();
        serde_json::to_writer_pretty(&mut stdout, &views)?;
        writeln!(stdout)?;
        return Ok(());
    }
    render_all(&mut stdout, config, &torrents)
}

async fn watch(config: RqplayConfig, snapshot: &Path, interval: Duration) -> anyhow::Result<()> {
    info!(?snapshot, ?interval, "watching snapshot");
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        // The engine replaces the file as a whole; a failed read just waits for the next tick.
        let torrents = match snapshot::read_snapshot(snapshot) {
            Ok(t) => t,
            Err(e) => {
                warn!("error reading snapshot: {e:#}");
                continue;
            }
        };
        debug!(count = torrents.len(), "read snapshot");
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout)?;
        render_all(&mut stdout, &config, &torrents)?;
        stdout.flush()?;
    }
}

fn navigate(w: &mut impl Write, opts: &NavigateOpts, forward: bool) -> anyhow::Result<()> {
    let torrents = snapshot::read_snapshot(&opts.snapshot)?;
    let torrent = snapshot::find_torrent(&torrents, TorrentKey(opts.torrent))?;
    let found = if forward {
        next_index(torrent, opts.index)
    } else {
        prev_index(torrent, opts.index)
    }
    .with_context(|| format!("can't navigate from file {}", opts.index))?;
    match found {
        Some(idx) => writeln!(w, "{idx}")?,
        None => writeln!(w, "none")?,
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    init_logging(&opts);

    let config = RqplayConfig::load(opts.config.as_deref()).context("error loading config")?;

    match &opts.subcommand {
        SubCommand::Show(show_opts) => show(&config, show_opts),
        SubCommand::Watch(watch_opts) => {
            let interval = watch_opts.interval.unwrap_or(config.watch.interval);
            if interval.is_zero() {
                anyhow::bail!("watch interval must be positive")
            }
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            rt.block_on(watch(config, &watch_opts.snapshot, interval))
        }
        SubCommand::Next(nav) => navigate(&mut std::io::stdout().lock(), nav, true),
        SubCommand::Prev(nav) => navigate(&mut std::io::stdout().lock(), nav, false),
    }
}
