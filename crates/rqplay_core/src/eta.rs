use serde::Serialize;

use crate::torrent_summary::TorrentProgress;

/// Estimated time until the download completes.
///
/// Hours wrap at 24, so multi-day estimates only show the time-of-day part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Eta {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Eta {
    /// None unless something is both missing and arriving.
    pub fn estimate(progress: &TorrentProgress) -> Option<Eta> {
        let missing = progress.remaining_bytes();
        let speed = progress.download_speed;
        if missing == 0 || speed.is_nan() || speed <= 0f64 {
            return None;
        }
        Some(Self::from_seconds(missing as f64 / speed))
    }

    pub fn from_seconds(raw: f64) -> Eta {
        Eta {
            hours: (raw / 3600f64).floor() as u64 % 24,
            minutes: (raw / 60f64).floor() as u64 % 60,
            seconds: raw.floor() as u64 % 60,
        }
    }
}

impl std::fmt::Display for Eta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Minutes always accompany hours.
        if self.hours > 0 {
            write!(f, "{}h ", self.hours)?;
        }
        if self.hours > 0 || self.minutes > 0 {
            write!(f, "{}m ", self.minutes)?;
        }
        write!(f, "{}s", self.seconds)
    }
}
