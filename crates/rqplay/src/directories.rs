use std::path::PathBuf;

use anyhow::Context;

pub fn get_configuration_directory(application: &str) -> anyhow::Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "rqplay", application)
        .with_context(|| format!("cannot determine project directory for com.rqplay.{application}"))
}

pub fn default_config_filename() -> anyhow::Result<PathBuf> {
    Ok(get_configuration_directory("rqplay")?
        .config_dir()
        .join("config.json"))
}

/// The user's download folder, falling back to the current directory.
pub fn default_download_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|d| d.download_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
