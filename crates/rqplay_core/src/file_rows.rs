//! The file list shown under a selected torrent.

use std::path::PathBuf;

use serde::Serialize;

use crate::{
    media::{MediaKind, is_playable},
    progress::{ErrorMessage, FileProgressView, RadialProgress, StreamingReadiness, is_row_disabled},
    torrent_summary::{TorrentError, TorrentStatus, TorrentSummary},
};

const PADDING_FILE_MARKER: &str = "/.____padding_file/";

#[derive(Clone, Copy, Debug, Default)]
pub struct FileRowsOptions {
    pub show_padding_files: bool,
}

/// What clicking a file row does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "index", rename_all = "snake_case")]
pub enum FileAction {
    Play(usize),
    /// Open with the OS default application.
    Open(usize),
    None,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileRow {
    pub index: usize,
    pub name: String,
    pub length: u64,
    pub media_kind: Option<MediaKind>,
    pub selected: bool,
    /// Only reported for files being downloaded.
    pub progress: Option<FileProgressView>,
    pub resume: Option<RadialProgress>,
    pub action: FileAction,
    pub disabled: bool,
}

impl FileRow {
    fn new(
        summary: &TorrentSummary,
        index: usize,
        readiness: &impl StreamingReadiness,
    ) -> Option<FileRow> {
        let file = summary.files.as_ref()?.get(index)?;
        let selected = summary.is_selected(index);
        let progress = FileProgressView::of(summary, index);
        let is_done = progress.is_some_and(|p| p.is_done);
        let action = if is_playable(file) {
            FileAction::Play(index)
        } else if is_done {
            FileAction::Open(index)
        } else {
            FileAction::None
        };
        Some(FileRow {
            index,
            name: file.name.clone(),
            length: file.length,
            media_kind: MediaKind::of(&file.name),
            selected,
            progress: progress.filter(|_| selected),
            resume: file
                .resume_position()
                .map(|p| RadialProgress::new(p.fraction())),
            action,
            disabled: is_row_disabled(summary, index, readiness),
        })
    }
}

/// Contents of the details panel of a torrent.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum FilesPanel {
    MissingPath { path: Option<PathBuf> },
    Error { error: ErrorMessage },
    /// Metadata fetch was stopped before the file list arrived.
    InfoFailed,
    InfoDownloading,
    Files { rows: Vec<FileRow> },
}

impl FilesPanel {
    pub fn of(
        summary: &TorrentSummary,
        readiness: &impl StreamingReadiness,
        opts: FileRowsOptions,
    ) -> FilesPanel {
        match (&summary.error, &summary.files) {
            (Some(TorrentError::PathMissing), _) => FilesPanel::MissingPath {
                path: summary.file_or_folder(),
            },
            (Some(e), _) => FilesPanel::Error { error: e.into() },
            (None, None) if summary.status == TorrentStatus::Paused => FilesPanel::InfoFailed,
            (None, None) => FilesPanel::InfoDownloading,
            (None, Some(files)) => {
                let mut rows = files
                    .iter()
                    .enumerate()
                    .filter(|(_, f)| opts.show_padding_files || !f.path.contains(PADDING_FILE_MARKER))
                    .filter_map(|(idx, _)| FileRow::new(summary, idx, readiness))
                    .collect::<Vec<_>>();
                rows.sort_by(|a, b| a.name.cmp(&b.name));
                FilesPanel::Files { rows }
            }
        }
    }
}

impl std::fmt::Display for FilesPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilesPanel::MissingPath { path: Some(path) } => {
                write!(f, "Missing path: {}", path.display())
            }
            FilesPanel::MissingPath { path: None } => f.write_str("Missing path"),
            FilesPanel::Error { error } => write!(f, "{error}"),
            FilesPanel::InfoFailed => {
                f.write_str("Failed to load torrent info. Click the download button to try again...")
            }
            FilesPanel::InfoDownloading => f.write_str("Downloading torrent info..."),
            FilesPanel::Files { rows } => write!(f, "{} files", rows.len()),
        }
    }
}
