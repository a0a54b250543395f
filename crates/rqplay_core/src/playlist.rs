//! Moving between playable files of a torrent, in torrent file order.
//!
//! Navigation stops at either end of the file list; it never wraps around.

use crate::{error::Result, media::is_playable, torrent_summary::TorrentSummary};

/// Index of the first playable file after `index`, if any.
pub fn next_index(summary: &TorrentSummary, index: usize) -> Result<Option<usize>> {
    summary.file(index)?;
    let files = summary.files()?;
    Ok(files
        .iter()
        .enumerate()
        .skip(index + 1)
        .find(|(_, f)| is_playable(f))
        .map(|(idx, _)| idx))
}

/// Index of the nearest playable file before `index`, if any.
pub fn prev_index(summary: &TorrentSummary, index: usize) -> Result<Option<usize>> {
    summary.file(index)?;
    let files = summary.files()?;
    Ok(files[..index]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, f)| is_playable(f))
        .map(|(idx, _)| idx))
}
