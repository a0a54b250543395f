use serde::Serialize;

use crate::{
    media::is_playable_torrent,
    progress::RadialProgress,
    torrent_summary::{PlayStatus, TorrentStatus, TorrentSummary},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayButton {
    Play,
    /// The last play attempt timed out; clicking retries.
    Timeout,
}

impl PlayButton {
    pub fn tooltip(&self) -> &'static str {
        match self {
            PlayButton::Play => "Start streaming",
            PlayButton::Timeout => "Playback timed out. No seeds? No internet? Click to try again.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadButton {
    Seeding,
    Downloading,
    Start,
}

impl DownloadButton {
    pub fn tooltip(&self) -> &'static str {
        match self {
            DownloadButton::Seeding => "Seeding. Click to stop.",
            DownloadButton::Downloading => "Torrenting. Click to stop.",
            DownloadButton::Start => "Click to start torrenting.",
        }
    }
}

/// Buttons of a torrent row. The delete button is always there.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TorrentButtons {
    pub play: Option<PlayButton>,
    pub download: Option<DownloadButton>,
    /// Saved position of the default file, drawn over the play button.
    pub resume: Option<RadialProgress>,
}

impl TorrentButtons {
    /// None until the info hash is known: there is nothing to act on yet.
    pub fn of(summary: &TorrentSummary) -> Option<TorrentButtons> {
        summary.info_hash?;
        if summary.error.is_some() {
            return Some(TorrentButtons {
                play: None,
                download: None,
                resume: None,
            });
        }

        let download = match summary.status {
            TorrentStatus::Seeding => DownloadButton::Seeding,
            TorrentStatus::Downloading => DownloadButton::Downloading,
            TorrentStatus::New | TorrentStatus::Paused => DownloadButton::Start,
        };

        // The spinner takes the resume indicator's place while a play request is pending.
        let resume = match summary.play_status {
            Some(PlayStatus::Requested) => None,
            _ => summary
                .default_play_file()
                .and_then(|f| f.resume_position())
                .map(|p| RadialProgress::new(p.fraction())),
        };

        let play = is_playable_torrent(summary).then(|| match summary.play_status {
            Some(PlayStatus::Timeout) => PlayButton::Timeout,
            _ => PlayButton::Play,
        });

        Some(TorrentButtons {
            play,
            download: Some(download),
            resume,
        })
    }
}
