//! Snapshot records handed over by the torrent engine.
//!
//! These are plain data: the engine replaces them wholesale on every tick and
//! the rest of the crate only ever reads them.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

use crate::{
    error::{Error, Result},
    hash_id::Id20,
};

/// Stable identity of a torrent, assigned before its info hash is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TorrentKey(pub u64);

impl std::fmt::Display for TorrentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TorrentStatus {
    #[default]
    New,
    Downloading,
    Seeding,
    Paused,
}

/// An in-flight play request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayStatus {
    Requested,
    Timeout,
}

/// Error attached to a torrent by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TorrentError {
    /// The download folder or one of the files is gone.
    PathMissing,
    Message(String),
    Unknown,
}

impl TorrentError {
    pub fn message(&self) -> Option<&str> {
        match self {
            TorrentError::Message(m) => Some(m),
            _ => None,
        }
    }
}

const PATH_MISSING: &str = "path-missing";

impl Serialize for TorrentError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        match self {
            TorrentError::PathMissing => serializer.serialize_str(PATH_MISSING),
            TorrentError::Message(m) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("message", m)?;
                map.end()
            }
            TorrentError::Unknown => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

// The engine sends a bare error code, an error object, or occasionally
// something else entirely. None of it may fail the whole summary.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTorrentError {
    Code(String),
    Flag(bool),
    Number(f64),
    Object {
        #[serde(default)]
        message: Option<RawMessage>,
    },
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMessage {
    Text(String),
    Other(IgnoredAny),
}

impl RawTorrentError {
    /// Falsy values (empty code, `false`, `0`) mean no error.
    fn into_error(self) -> Option<TorrentError> {
        let e = match self {
            RawTorrentError::Code(code) if code.is_empty() => return None,
            RawTorrentError::Code(code) if code == PATH_MISSING => TorrentError::PathMissing,
            RawTorrentError::Code(code) => TorrentError::Message(code),
            RawTorrentError::Flag(false) => return None,
            RawTorrentError::Flag(true) => TorrentError::Message(true.to_string()),
            RawTorrentError::Number(n) if n == 0f64 || n.is_nan() => return None,
            RawTorrentError::Number(n) => TorrentError::Message(n.to_string()),
            RawTorrentError::Object {
                message: Some(RawMessage::Text(m)),
            } => TorrentError::Message(m),
            RawTorrentError::Object { .. } | RawTorrentError::Other(_) => TorrentError::Unknown,
        };
        Some(e)
    }
}

fn deserialize_torrent_error<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<TorrentError>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTorrentError>::deserialize(deserializer)?;
    Ok(raw.and_then(RawTorrentError::into_error))
}

/// Where an external player stopped playing a file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResumePosition {
    pub current_time: f64,
    pub duration: f64,
}

impl ResumePosition {
    /// Fraction of the file already watched, always within [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.duration.is_nan() || self.duration <= 0f64 || !self.current_time.is_finite() {
            return 0f64;
        }
        (self.current_time / self.duration).clamp(0f64, 1f64)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentFile {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub length: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl TorrentFile {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            length,
            current_time: None,
            duration: None,
        }
    }

    /// Saved playback position. Both halves must be present.
    pub fn resume_position(&self) -> Option<ResumePosition> {
        match (self.current_time, self.duration) {
            (Some(current_time), Some(duration)) if current_time > 0f64 => Some(ResumePosition {
                current_time,
                duration,
            }),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileProgress {
    pub num_pieces_present: u32,
    pub num_pieces: u32,
}

/// Point-in-time counters reported by the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TorrentProgress {
    pub progress: f64,
    pub downloaded: u64,
    pub length: u64,
    pub num_peers: u32,
    pub download_speed: f64,
    pub upload_speed: f64,
    pub files: Vec<FileProgress>,
}

impl TorrentProgress {
    pub fn remaining_bytes(&self) -> u64 {
        self.length.saturating_sub(self.downloaded)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentSummary {
    pub torrent_key: TorrentKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_hash: Option<Id20>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Download folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<TorrentFile>>,
    #[serde(default)]
    pub status: TorrentStatus,
    #[serde(
        default,
        deserialize_with = "deserialize_torrent_error",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<TorrentError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_status: Option<PlayStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selections: Option<Vec<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_play_file_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<TorrentProgress>,
}

impl TorrentSummary {
    /// A torrent that was just added: nothing but its key is known.
    pub fn new(torrent_key: TorrentKey) -> Self {
        Self {
            torrent_key,
            info_hash: None,
            name: None,
            path: None,
            files: None,
            status: TorrentStatus::New,
            error: None,
            play_status: None,
            selections: None,
            default_play_file_index: None,
            progress: None,
        }
    }

    pub fn files(&self) -> Result<&[TorrentFile]> {
        self.files.as_deref().ok_or(Error::FilesUnknown)
    }

    /// Validates a caller-supplied file index.
    pub fn file(&self, index: usize) -> Result<&TorrentFile> {
        let files = self.files()?;
        files.get(index).ok_or(Error::FileIndexOutOfRange {
            index,
            len: files.len(),
        })
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selections
            .as_ref()
            .and_then(|s| s.get(index).copied())
            .unwrap_or(false)
    }

    pub fn default_play_file(&self) -> Option<&TorrentFile> {
        let index = self.default_play_file_index?;
        self.files.as_ref()?.get(index)
    }

    /// Checks that the progress snapshot was produced for the current file list.
    pub fn check_progress_alignment(&self) -> Result<()> {
        let (Some(progress), Some(files)) = (&self.progress, &self.files) else {
            return Ok(());
        };
        if progress.files.len() != files.len() {
            return Err(Error::ProgressFilesMismatch {
                expected: files.len(),
                actual: progress.files.len(),
            });
        }
        Ok(())
    }

    /// Per-file progress, or None if absent or stale.
    pub fn file_progress(&self, index: usize) -> Option<&FileProgress> {
        self.check_progress_alignment().ok()?;
        self.progress.as_ref()?.files.get(index)
    }

    /// The torrent's folder on disk, for "missing path" messages.
    pub fn file_or_folder(&self) -> Option<PathBuf> {
        match (&self.path, &self.name) {
            (Some(path), Some(name)) => Some(path.join(name)),
            (Some(path), None) => Some(path.clone()),
            (None, Some(name)) => Some(PathBuf::from(name)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> TorrentSummary {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_minimal_summary() {
        let ts = parse(r#"{"torrentKey": 3}"#);
        assert_eq!(ts.torrent_key, TorrentKey(3));
        assert_eq!(ts.status, TorrentStatus::New);
        assert!(ts.files.is_none());
        assert_eq!(ts.files(), Err(Error::FilesUnknown));
    }

    #[test]
    fn test_missing_torrent_key_is_rejected() {
        assert!(serde_json::from_str::<TorrentSummary>(r#"{"status": "paused"}"#).is_err());
    }

    #[test]
    fn test_errors() {
        let ts = parse(r#"{"torrentKey": 1, "error": "path-missing"}"#);
        assert_eq!(ts.error, Some(TorrentError::PathMissing));

        let ts = parse(r#"{"torrentKey": 1, "error": "boom"}"#);
        assert_eq!(ts.error, Some(TorrentError::Message("boom".into())));

        let ts = parse(r#"{"torrentKey": 1, "error": {"message": "disk full"}}"#);
        assert_eq!(ts.error.as_ref().and_then(|e| e.message()), Some("disk full"));

        let ts = parse(r#"{"torrentKey": 1, "error": {}}"#);
        assert_eq!(ts.error, Some(TorrentError::Unknown));

        let ts = parse(r#"{"torrentKey": 1, "error": {"message": 7}}"#);
        assert_eq!(ts.error, Some(TorrentError::Unknown));

        let ts = parse(r#"{"torrentKey": 1, "error": 42}"#);
        assert_eq!(ts.error, Some(TorrentError::Message("42".into())));

        let ts = parse(r#"{"torrentKey": 1, "error": true}"#);
        assert_eq!(ts.error, Some(TorrentError::Message("true".into())));

        let ts = parse(r#"{"torrentKey": 1, "error": ["a", 1]}"#);
        assert!(ts.error.is_some());

        for falsy in [r#""""#, "false", "0", "null"] {
            let ts = parse(&format!(r#"{{"torrentKey": 1, "error": {falsy}}}"#));
            assert_eq!(ts.error, None, "{falsy}");
        }
    }

    #[test]
    fn test_empty_error_keeps_live_stats() {
        let ts = parse(r#"{"torrentKey": 1, "error": "", "progress": {"progress": 0.25, "length": 4}}"#);
        assert_eq!(ts.error, None);
        assert!(matches!(
            crate::progress::StatusLine::of(&ts),
            crate::progress::StatusLine::Live { .. }
        ));
    }

    #[test]
    fn test_error_serializes_back() {
        let mut ts = TorrentSummary::new(TorrentKey(1));
        for e in [
            TorrentError::PathMissing,
            TorrentError::Message("disk full".into()),
            TorrentError::Unknown,
        ] {
            ts.error = Some(e);
            let back: TorrentSummary = serde_json::from_str(&serde_json::to_string(&ts).unwrap()).unwrap();
            assert_eq!(back.error, ts.error);
        }
    }

    #[test]
    fn test_full_summary() {
        let ts = parse(
            r#"{
                "torrentKey": 7,
                "infoHash": "a621779b5e3d486e127c3efbca9b6f8d135f52e5",
                "name": "Sintel",
                "status": "downloading",
                "playStatus": "timeout",
                "files": [
                    {"name": "sintel.mp4", "path": "Sintel/sintel.mp4", "length": 100, "currentTime": 30, "duration": 60},
                    {"name": "sintel.srt", "path": "Sintel/sintel.srt", "length": 5}
                ],
                "selections": [true, false],
                "defaultPlayFileIndex": 0,
                "progress": {
                    "progress": 0.5, "downloaded": 50, "length": 105, "numPeers": 2,
                    "downloadSpeed": 10, "uploadSpeed": 0,
                    "files": [
                        {"numPiecesPresent": 1, "numPieces": 2},
                        {"numPiecesPresent": 0, "numPieces": 1}
                    ]
                }
            }"#,
        );
        assert!(ts.info_hash.is_some());
        assert_eq!(ts.play_status, Some(PlayStatus::Timeout));
        assert!(ts.is_selected(0));
        assert!(!ts.is_selected(1));
        assert!(!ts.is_selected(5));
        assert_eq!(ts.default_play_file().map(|f| f.name.as_str()), Some("sintel.mp4"));
        assert_eq!(ts.file_progress(1), Some(&FileProgress { num_pieces_present: 0, num_pieces: 1 }));
        assert_eq!(ts.file(2), Err(Error::FileIndexOutOfRange { index: 2, len: 2 }));
    }

    #[test]
    fn test_stale_progress_is_ignored() {
        let mut ts = TorrentSummary::new(TorrentKey(1));
        ts.files = Some(vec![TorrentFile::new("a.mp4", 1), TorrentFile::new("b.mp4", 1)]);
        ts.progress = Some(TorrentProgress {
            files: vec![FileProgress { num_pieces_present: 1, num_pieces: 1 }],
            ..Default::default()
        });
        assert_eq!(
            ts.check_progress_alignment(),
            Err(Error::ProgressFilesMismatch { expected: 2, actual: 1 })
        );
        assert_eq!(ts.file_progress(0), None);
    }

    #[test]
    fn test_resume_position() {
        let mut f = TorrentFile::new("a.mp4", 1);
        assert_eq!(f.resume_position(), None);

        f.current_time = Some(30f64);
        assert_eq!(f.resume_position(), None);

        f.duration = Some(60f64);
        assert_eq!(f.resume_position().map(|p| p.fraction()), Some(0.5));

        f.current_time = Some(90f64);
        assert_eq!(f.resume_position().map(|p| p.fraction()), Some(1f64));

        f.duration = Some(0f64);
        assert_eq!(f.resume_position().map(|p| p.fraction()), Some(0f64));
    }

    #[test]
    fn test_file_or_folder() {
        let mut ts = TorrentSummary::new(TorrentKey(1));
        assert_eq!(ts.file_or_folder(), None);
        ts.name = Some("Sintel".into());
        ts.path = Some(PathBuf::from("/downloads"));
        assert_eq!(ts.file_or_folder(), Some(PathBuf::from("/downloads/Sintel")));
    }
}
