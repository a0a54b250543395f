#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("file index {index} out of range, torrent has {len} files")]
    FileIndexOutOfRange { index: usize, len: usize },
    #[error("torrent files are not known yet")]
    FilesUnknown,
    #[error("progress reports {actual} files, torrent has {expected}")]
    ProgressFilesMismatch { expected: usize, actual: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
