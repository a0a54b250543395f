//! Playback and progress model of a torrent client UI.
//!
//! Everything here is a pure function of a [`TorrentSummary`] snapshot handed
//! over by the torrent engine: which files are playable, where "next" and
//! "previous" lead in a playlist, and what to display for a torrent and each
//! of its files on a given tick.

pub mod buttons;
pub mod error;
pub mod eta;
pub mod file_rows;
pub mod hash_id;
pub mod media;
pub mod playlist;
pub mod progress;
pub mod torrent_summary;
pub mod view;

pub use error::{Error, Result};
pub use hash_id::Id20;
pub use media::{MediaKind, is_audio, is_playable, is_playable_torrent, is_video};
pub use playlist::{next_index, prev_index};
pub use progress::{AlwaysStreamable, StreamingReadiness};
pub use torrent_summary::{
    FileProgress, PlayStatus, TorrentError, TorrentFile, TorrentKey, TorrentProgress,
    TorrentStatus, TorrentSummary,
};
pub use view::TorrentView;
