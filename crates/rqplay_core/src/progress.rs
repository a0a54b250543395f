//! Display state derived from an engine progress snapshot.

use serde::Serialize;
use size_format::SizeFormatterBinary as SF;

use crate::{
    eta::Eta,
    media::is_playable,
    torrent_summary::{FileProgress, TorrentError, TorrentProgress, TorrentStatus, TorrentSummary},
};

pub fn format_bytes(bytes: u64) -> String {
    format!("{}B", SF::new(bytes))
}

/// Whole percents, rounded down: 99.9% is not done yet.
pub fn percent_complete(progress: f64) -> u8 {
    if progress.is_nan() {
        return 0;
    }
    (100f64 * progress).floor().clamp(0f64, 100f64) as u8
}

/// "downloaded / total", collapsed to one value when both render the same.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TotalProgress {
    pub downloaded: String,
    pub total: Option<String>,
}

impl TotalProgress {
    pub fn new(downloaded: u64, total: u64) -> Self {
        let downloaded = format_bytes(downloaded);
        let total = format_bytes(total);
        Self {
            total: (total != downloaded).then_some(total),
            downloaded,
        }
    }
}

impl std::fmt::Display for TotalProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.total {
            Some(total) => write!(f, "{} / {}", self.downloaded, total),
            None => f.write_str(&self.downloaded),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Speed {
    pub direction: Direction,
    pub bytes_per_second: f64,
}

impl Speed {
    /// None for an idle direction.
    pub fn new(direction: Direction, bytes_per_second: f64) -> Option<Self> {
        if bytes_per_second.is_nan() || bytes_per_second <= 0f64 {
            return None;
        }
        Some(Self {
            direction,
            bytes_per_second,
        })
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let glyph = match self.direction {
            Direction::Down => '↓',
            Direction::Up => '↑',
        };
        write!(f, "{} {}/s", glyph, format_bytes(self.bytes_per_second as u64))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LiveStats {
    pub percent: u8,
    pub total: TotalProgress,
    pub peers: Option<u32>,
    pub download_speed: Option<Speed>,
    pub upload_speed: Option<Speed>,
    pub eta: Option<Eta>,
}

impl From<&TorrentProgress> for LiveStats {
    fn from(progress: &TorrentProgress) -> Self {
        Self {
            percent: percent_complete(progress.progress),
            total: TotalProgress::new(progress.downloaded, progress.length),
            peers: (progress.num_peers > 0).then_some(progress.num_peers),
            download_speed: Speed::new(Direction::Down, progress.download_speed),
            upload_speed: Speed::new(Direction::Up, progress.upload_speed),
            eta: Eta::estimate(progress),
        }
    }
}

impl std::fmt::Display for LiveStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}% {}", self.percent, self.total)?;
        match self.peers {
            Some(1) => write!(f, " 1 peer")?,
            Some(n) => write!(f, " {n} peers")?,
            None => {}
        }
        if let Some(speed) = &self.download_speed {
            write!(f, " {speed}")?;
        }
        if let Some(speed) = &self.upload_speed {
            write!(f, " {speed}")?;
        }
        if let Some(eta) = &self.eta {
            write!(f, " ETA: {eta}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ErrorMessage {
    PathMissing,
    Generic(String),
}

impl From<&TorrentError> for ErrorMessage {
    fn from(e: &TorrentError) -> Self {
        match e {
            TorrentError::PathMissing => ErrorMessage::PathMissing,
            TorrentError::Message(m) => ErrorMessage::Generic(m.clone()),
            TorrentError::Unknown => ErrorMessage::Generic("Error".to_owned()),
        }
    }
}

impl std::fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorMessage::PathMissing => {
                f.write_str("Path missing. Fix and restart the app, or delete the torrent.")
            }
            ErrorMessage::Generic(m) => f.write_str(m),
        }
    }
}

/// The one-line status of a torrent. Earlier variants take precedence.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StatusLine {
    Error { error: ErrorMessage },
    Paused,
    Live { stats: LiveStats },
    Loading,
}

impl StatusLine {
    pub fn of(summary: &TorrentSummary) -> StatusLine {
        if let Some(error) = &summary.error {
            return StatusLine::Error {
                error: error.into(),
            };
        }
        if summary.status == TorrentStatus::Paused {
            return StatusLine::Paused;
        }
        match &summary.progress {
            Some(progress) => StatusLine::Live {
                stats: progress.into(),
            },
            None => StatusLine::Loading,
        }
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusLine::Error { error } => write!(f, "{error}"),
            StatusLine::Paused => f.write_str("Paused"),
            StatusLine::Live { stats } => write!(f, "{stats}"),
            StatusLine::Loading => f.write_str("Loading torrent..."),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FileProgressView {
    pub is_done: bool,
    pub percent: u8,
}

impl FileProgressView {
    /// Per-file completion. A file without pieces counts as not started.
    pub fn new(progress: &FileProgress) -> Self {
        let FileProgress {
            num_pieces_present: present,
            num_pieces: total,
        } = *progress;
        if total == 0 {
            return Self {
                is_done: false,
                percent: 0,
            };
        }
        let percent = (100f64 * present as f64 / total as f64).round();
        Self {
            is_done: present == total,
            percent: percent.min(100f64) as u8,
        }
    }

    pub fn of(summary: &TorrentSummary, index: usize) -> Option<Self> {
        summary.file_progress(index).map(Self::new)
    }
}

impl std::fmt::Display for FileProgressView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent)
    }
}

/// Decides whether a selected playable file has enough data to start streaming.
///
/// The engine owns the piece-count heuristic; this is where it plugs in.
pub trait StreamingReadiness {
    fn can_stream(&self, summary: &TorrentSummary, index: usize) -> bool;
}

/// Any playable file may be streamed, the engine fetches what the player asks for.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysStreamable;

impl StreamingReadiness for AlwaysStreamable {
    fn can_stream(&self, _summary: &TorrentSummary, _index: usize) -> bool {
        true
    }
}

impl<F> StreamingReadiness for F
where
    F: Fn(&TorrentSummary, usize) -> bool,
{
    fn can_stream(&self, summary: &TorrentSummary, index: usize) -> bool {
        self(summary, index)
    }
}

/// A row can't be opened when deselected, or when it's neither complete nor streamable.
pub fn is_row_disabled(
    summary: &TorrentSummary,
    index: usize,
    readiness: &impl StreamingReadiness,
) -> bool {
    if !summary.is_selected(index) {
        return true;
    }
    let is_done = FileProgressView::of(summary, index).is_some_and(|p| p.is_done);
    let streamable = summary
        .files
        .as_ref()
        .and_then(|files| files.get(index))
        .is_some_and(|f| is_playable(f) && readiness.can_stream(summary, index));
    !(is_done || streamable)
}

/// Angles of the radial resume indicator, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RadialProgress {
    pub fraction: f64,
    pub rotation: f64,
    pub fill: f64,
}

impl RadialProgress {
    pub fn new(fraction: f64) -> Self {
        let fraction = if fraction.is_nan() {
            0f64
        } else {
            fraction.clamp(0f64, 1f64)
        };
        let rotation = 360f64 * fraction;
        Self {
            fraction,
            rotation,
            fill: rotation / 2f64,
        }
    }
}
