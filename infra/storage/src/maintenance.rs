use crate::engine::TMP_MARKER;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{error, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Temp files younger than this may belong to a write still in flight.
const STALE_AFTER: Duration = Duration::from_secs(300);

pub(crate) async fn purge_tmp(root: &Path) {
    let root = root.to_path_buf();
    let now = SystemTime::now();

    match tokio::task::spawn_blocking(move || remove_stale(&root, now, STALE_AFTER)).await {
        Ok((removed, failed)) if removed > 0 || failed > 0 => {
            info!(removed, failed, "Removed stale temp files");
        },
        Ok(_) => {},
        Err(err) => error!(error = %err, "Temp cleanup task panicked"),
    }
}

fn remove_stale(root: &Path, now: SystemTime, threshold: Duration) -> (usize, usize) {
    let mut removed = 0;
    let mut failed = 0;

    let stale = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| is_tmp(entry) && is_stale(entry, now, threshold));

    for entry in stale {
        match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "Temp file removal failed");
                failed += 1;
            },
        }
    }

    (removed, failed)
}

fn is_tmp(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER))
}

fn is_stale(entry: &DirEntry, now: SystemTime, threshold: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|meta| meta.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_old_marked_files_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join(format!("activities.json{TMP_MARKER}1.1"));
        let keep = dir.path().join("activities.json");
        std::fs::write(&tmp, b"partial").unwrap();
        std::fs::write(&keep, b"{}").unwrap();

        // Fresh files survive a normal threshold.
        assert_eq!(remove_stale(dir.path(), SystemTime::now(), STALE_AFTER), (0, 0));

        // Looking from the future makes every marked file stale.
        let later = SystemTime::now() + Duration::from_secs(3600);
        assert_eq!(remove_stale(dir.path(), later, STALE_AFTER), (1, 0));
        assert!(!tmp.exists());
        assert!(keep.exists());
    }
}
