use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use rqplay_core::file_rows::FileRowsOptions;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use tracing::debug;

use crate::directories::{default_config_filename, default_download_dir};

#[serde_as]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RqplayConfigWatch {
    #[serde_as(as = "serde_with::DurationSeconds")]
    pub interval: Duration,
}

impl Default for RqplayConfigWatch {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RqplayConfigDisplay {
    pub show_padding_files: bool,
}

impl From<RqplayConfigDisplay> for FileRowsOptions {
    fn from(d: RqplayConfigDisplay) -> Self {
        FileRowsOptions {
            show_padding_files: d.show_padding_files,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RqplayConfig {
    pub download_path: PathBuf,
    pub watch: RqplayConfigWatch,
    pub display: RqplayConfigDisplay,
}

impl Default for RqplayConfig {
    fn default() -> Self {
        Self {
            download_path: default_download_dir(),
            watch: Default::default(),
            display: Default::default(),
        }
    }
}

fn read_config(path: &Path) -> anyhow::Result<RqplayConfig> {
    let rdr = BufReader::new(File::open(path)?);
    let config: RqplayConfig = serde_json::from_reader(rdr)?;
    Ok(config)
}

impl RqplayConfig {
    /// An explicitly given file must exist; the default one may be absent.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<RqplayConfig> {
        if let Some(path) = explicit {
            return read_config(path).with_context(|| format!("error reading config {path:?}"));
        }
        let path = default_config_filename()?;
        if !path.exists() {
            debug!(?path, "no config file, using defaults");
            return Ok(Default::default());
        }
        read_config(&path).with_context(|| format!("error reading config {path:?}"))
    }
}
