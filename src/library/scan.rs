use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::FileHandle;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn walk_dir(dir: &Path, settings: &LibrarySettings, out: &mut Vec<FileHandle>) {
    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            out.push(FileHandle::new(path));
        }
    }
}

/// Expand `paths` into the audio files they name, in argument order.
///
/// Files are kept when their extension is a configured audio extension.
/// Directories are walked (sorted by file name) according to `settings`.
/// Paths that do not exist are skipped with a warning.
pub fn select(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<FileHandle> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            walk_dir(path, settings, &mut files);
        } else if path.is_file() {
            if is_audio_file(path, settings) {
                files.push(FileHandle::new(path));
            } else {
                debug!("skipping non-audio file {}", path.display());
            }
        } else {
            warn!("{} does not exist, skipping", path.display());
        }
    }

    files
}
