use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::Context;
use rqplay_core::{TorrentKey, TorrentSummary};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Many(Vec<TorrentSummary>),
    One(Box<TorrentSummary>),
}

pub fn parse_snapshot(rdr: impl Read) -> anyhow::Result<Vec<TorrentSummary>> {
    let snapshot: Snapshot =
        serde_json::from_reader(rdr).context("error parsing torrent summary snapshot")?;
    Ok(match snapshot {
        Snapshot::Many(torrents) => torrents,
        Snapshot::One(torrent) => vec![*torrent],
    })
}

/// Reads a snapshot file, "-" meaning stdin.
pub fn read_snapshot(path: &Path) -> anyhow::Result<Vec<TorrentSummary>> {
    if path == Path::new("-") {
        return parse_snapshot(std::io::stdin().lock());
    }
    let file = File::open(path).with_context(|| format!("error opening {path:?}"))?;
    parse_snapshot(BufReader::new(file))
}

pub fn find_torrent(torrents: &[TorrentSummary], key: TorrentKey) -> anyhow::Result<&TorrentSummary> {
    torrents
        .iter()
        .find(|t| t.torrent_key == key)
        .with_context(|| format!("torrent {key} not found in snapshot"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_and_many() {
        let one = parse_snapshot(r#"{"torrentKey": 1}"#.as_bytes()).unwrap();
        assert_eq!(one.len(), 1);

        let many = parse_snapshot(r#"[{"torrentKey": 1}, {"torrentKey": 2}]"#.as_bytes()).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(find_torrent(&many, TorrentKey(2)).unwrap().torrent_key, TorrentKey(2));
        assert!(find_torrent(&many, TorrentKey(3)).is_err());
    }

    #[test]
    fn test_missing_key_fails() {
        assert!(parse_snapshot(r#"[{"status": "new"}]"#.as_bytes()).is_err());
    }
}
