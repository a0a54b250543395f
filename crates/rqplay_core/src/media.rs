use std::{ffi::OsStr, path::Path};

use serde::Serialize;

use crate::torrent_summary::{TorrentFile, TorrentSummary};

const VIDEO_EXTENSIONS: &[&str] = &["avi", "m4v", "mkv", "mov", "mp4", "mpg", "ogv", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["aac", "ac3", "mp3", "ogg", "wav"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    /// Classifies a file name by its extension. Dot-files like ".mkv" have no extension.
    pub fn of(name: &str) -> Option<MediaKind> {
        let ext = Path::new(name).extension().and_then(OsStr::to_str)?;
        let matches = |list: &[&str]| list.iter().any(|e| ext.eq_ignore_ascii_case(e));
        if matches(VIDEO_EXTENSIONS) {
            Some(MediaKind::Video)
        } else if matches(AUDIO_EXTENSIONS) {
            Some(MediaKind::Audio)
        } else {
            None
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Video => f.write_str("video"),
            MediaKind::Audio => f.write_str("audio"),
        }
    }
}

pub fn is_video(file: &TorrentFile) -> bool {
    MediaKind::of(&file.name) == Some(MediaKind::Video)
}

pub fn is_audio(file: &TorrentFile) -> bool {
    MediaKind::of(&file.name) == Some(MediaKind::Audio)
}

/// Whether the built-in player can stream this file.
pub fn is_playable(file: &TorrentFile) -> bool {
    MediaKind::of(&file.name).is_some()
}

/// False while the file list is still unknown.
pub fn is_playable_torrent(summary: &TorrentSummary) -> bool {
    summary
        .files
        .as_ref()
        .is_some_and(|files| files.iter().any(is_playable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::torrent_summary::TorrentKey;

    fn file(name: &str) -> TorrentFile {
        TorrentFile::new(name, 1)
    }

    #[test]
    fn test_video_extensions_any_case() {
        for name in [
            "a.avi", "a.M4V", "a.mkv", "a.MoV", "a.mp4", "a.mpg", "a.OGV", "a.webm",
        ] {
            assert!(is_video(&file(name)), "{name}");
            assert!(!is_audio(&file(name)), "{name}");
            assert!(is_playable(&file(name)), "{name}");
        }
    }

    #[test]
    fn test_audio_extensions_any_case() {
        for name in ["a.aac", "a.AC3", "a.mp3", "a.Ogg", "a.wav"] {
            assert!(is_audio(&file(name)), "{name}");
            assert!(!is_video(&file(name)), "{name}");
        }
    }

    #[test]
    fn test_not_playable() {
        for name in [
            "readme.txt",
            "movie",
            "movie.",
            ".mkv",
            "archive.mkv.zip",
            "notes.flac",
            "",
        ] {
            let f = file(name);
            assert!(!is_video(&f), "{name}");
            assert!(!is_audio(&f), "{name}");
            assert!(!is_playable(&f), "{name}");
        }
    }

    #[test]
    fn test_last_extension_wins() {
        assert_eq!(MediaKind::of("Some.Show.S01E01.x264.MKV"), Some(MediaKind::Video));
        assert_eq!(MediaKind::of("track.txt.mp3"), Some(MediaKind::Audio));
    }

    #[test]
    fn test_is_playable_torrent() {
        let mut ts = TorrentSummary::new(TorrentKey(1));
        assert!(!is_playable_torrent(&ts));

        ts.files = Some(vec![]);
        assert!(!is_playable_torrent(&ts));

        ts.files = Some(vec![file("cover.jpg"), file("readme.nfo")]);
        assert!(!is_playable_torrent(&ts));

        ts.files
            .get_or_insert_with(Vec::new)
            .push(file("01 - intro.mp3"));
        assert!(is_playable_torrent(&ts));
    }
}
