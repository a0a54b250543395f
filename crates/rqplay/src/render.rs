use std::{io::Write, path::Path};

use rqplay_core::{
    TorrentView,
    file_rows::{FileAction, FileRow, FilesPanel},
    progress::format_bytes,
};

pub fn render_missing_download_path(w: &mut impl Write, path: &Path) -> std::io::Result<()> {
    writeln!(w, "Download path missing: {}", path.display())?;
    writeln!(w, "Check that all drives are connected?")?;
    writeln!(
        w,
        "Alternatively, choose a new download path in the configuration file"
    )
}

fn render_file_row(w: &mut impl Write, row: &FileRow) -> std::io::Result<()> {
    let icon = match row.action {
        FileAction::Play(_) => '▶',
        FileAction::Open(_) | FileAction::None => '·',
    };
    let progress = row.progress.map(|p| p.to_string()).unwrap_or_default();
    write!(
        w,
        "    {} [{}] {:>3} {:<40} {:>5} {:>10}",
        icon,
        if row.selected { 'x' } else { ' ' },
        row.index,
        row.name,
        progress,
        format_bytes(row.length)
    )?;
    if let Some(resume) = &row.resume {
        write!(w, " resume {:.0}%", resume.fraction * 100f64)?;
    }
    if row.disabled {
        write!(w, " (disabled)")?;
    }
    writeln!(w)
}

pub fn render_torrent(w: &mut impl Write, view: &TorrentView) -> std::io::Result<()> {
    write!(w, "[{}] {}", view.torrent_key, view.display_name())?;
    if let Some(info_hash) = &view.info_hash {
        write!(w, " ({info_hash})")?;
    }
    writeln!(w)?;
    writeln!(w, "  {}", view.status)?;

    if let Some(buttons) = &view.buttons {
        write!(w, "  ")?;
        if let Some(resume) = &buttons.resume {
            write!(w, "[resume {:.0}%] ", resume.fraction * 100f64)?;
        }
        if let Some(play) = &buttons.play {
            write!(w, "[{}] ", play.tooltip())?;
        }
        if let Some(download) = &buttons.download {
            write!(w, "[{}] ", download.tooltip())?;
        }
        writeln!(w, "[Remove torrent]")?;
    }

    match &view.files {
        FilesPanel::Files { rows } => {
            for row in rows {
                render_file_row(w, row)?;
            }
        }
        other => writeln!(w, "  {other}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rqplay_core::{AlwaysStreamable, TorrentSummary, file_rows::FileRowsOptions};

    use super::*;

    fn render(json: &str) -> String {
        let ts: TorrentSummary = serde_json::from_str(json).unwrap();
        let view = TorrentView::build(&ts, &AlwaysStreamable, FileRowsOptions::default());
        let mut out = Vec::new();
        render_torrent(&mut out, &view).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_loading() {
        let out = render(r#"{"torrentKey": 9}"#);
        assert!(out.starts_with("[9] Loading torrent...\n"), "{out}");
        assert!(out.contains("Downloading torrent info..."), "{out}");
        assert!(!out.contains("Remove torrent"), "{out}");
    }

    #[test]
    fn test_render_live() {
        let out = render(
            r#"{
                "torrentKey": 1,
                "infoHash": "a621779b5e3d486e127c3efbca9b6f8d135f52e5",
                "name": "Album",
                "status": "downloading",
                "files": [
                    {"name": "02.mp3", "path": "Album/02.mp3", "length": 10},
                    {"name": "01.mp3", "path": "Album/01.mp3", "length": 10, "currentTime": 5, "duration": 10}
                ],
                "selections": [true, false],
                "defaultPlayFileIndex": 1,
                "progress": {
                    "progress": 0.5, "downloaded": 10, "length": 20, "numPeers": 2,
                    "downloadSpeed": 2, "uploadSpeed": 0,
                    "files": [
                        {"numPiecesPresent": 1, "numPieces": 1},
                        {"numPiecesPresent": 0, "numPieces": 1}
                    ]
                }
            }"#,
        );
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "[1] Album (a621779b5e3d486e127c3efbca9b6f8d135f52e5)");
        assert!(lines[1].starts_with("  50% "), "{out}");
        assert!(lines[1].ends_with("ETA: 5s"), "{out}");
        assert_eq!(
            lines[2],
            "  [resume 50%] [Start streaming] [Torrenting. Click to stop.] [Remove torrent]"
        );
        // Sorted by name.
        assert!(lines[3].contains("01.mp3") && lines[3].contains("(disabled)"), "{out}");
        assert!(lines[4].contains("02.mp3") && lines[4].contains("100%"), "{out}");
    }

    #[test]
    fn test_render_missing_download_path() {
        let mut out = Vec::new();
        render_missing_download_path(&mut out, Path::new("/mnt/usb")).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Download path missing: /mnt/usb\n"));
    }
}
