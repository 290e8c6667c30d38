//! Directory scanning for template images

use std::path::{Path, PathBuf};

use super::error::CatalogError;
use super::template::Template;

/// Recognized raster formats for template files.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Files carrying this marker are still being written and must not be loaded.
const TEMP_MARKER: &str = ".tmp.";

/// Scan `directory` (non-recursive) for template images.
///
/// Results are sorted by path so the matching order, and therefore which
/// template wins a cycle first, is the same on every run. A file that cannot
/// be decoded is skipped with a warning rather than failing the whole scan.
pub fn scan_directory(directory: &Path) -> Result<Vec<Template>, CatalogError> {
    let entries = std::fs::read_dir(directory).map_err(|source| CatalogError::ReadDir {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!(
                    "⚠️ Unreadable entry in template directory {}: {e}",
                    directory.display()
                );
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.contains(TEMP_MARKER) {
            continue;
        }
        let recognized = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()));
        if recognized {
            paths.push(path);
        }
    }
    paths.sort();

    let mut templates = Vec::with_capacity(paths.len());
    for path in paths {
        match Template::load(&path) {
            Ok(template) => templates.push(template),
            Err(e) => log::warn!("⚠️ Skipping template: {e}"),
        }
    }
    Ok(templates)
}
