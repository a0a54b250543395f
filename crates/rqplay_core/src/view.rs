use serde::Serialize;
use tracing::warn;

use crate::{
    buttons::TorrentButtons,
    file_rows::{FileRowsOptions, FilesPanel},
    hash_id::Id20,
    progress::{StatusLine, StreamingReadiness},
    torrent_summary::{TorrentKey, TorrentSummary},
};

/// Everything the UI needs to draw one torrent, recomputed on every tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TorrentView {
    pub torrent_key: TorrentKey,
    pub info_hash: Option<Id20>,
    pub name: Option<String>,
    pub status: StatusLine,
    /// Rows without an info hash can't be selected or acted upon.
    pub disabled: bool,
    pub buttons: Option<TorrentButtons>,
    pub files: FilesPanel,
}

impl TorrentView {
    pub fn build(
        summary: &TorrentSummary,
        readiness: &impl StreamingReadiness,
        opts: FileRowsOptions,
    ) -> TorrentView {
        if let Err(e) = summary.check_progress_alignment() {
            warn!(torrent_key = %summary.torrent_key, "discarding stale file progress: {e}");
        }
        TorrentView {
            torrent_key: summary.torrent_key,
            info_hash: summary.info_hash,
            name: summary.name.clone(),
            status: StatusLine::of(summary),
            disabled: summary.info_hash.is_none(),
            buttons: TorrentButtons::of(summary),
            files: FilesPanel::of(summary, readiness, opts),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Loading torrent...")
    }
}
