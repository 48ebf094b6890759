//! Cover art lookup next to the playing track.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{ArtworkSelection, ArtworkSettings};

/// Finds an image file sitting in the same directory as a track.
pub struct ArtworkLocator {
    extensions: Vec<String>,
    selection: ArtworkSelection,
}

impl ArtworkLocator {
    pub fn new(settings: &ArtworkSettings) -> Self {
        let extensions = settings
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            extensions,
            selection: settings.selection,
        }
    }

    fn is_image(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.extensions
            .iter()
            .any(|ext| name.ends_with(&format!(".{ext}")))
    }

    /// Return the first image directly inside `track`'s parent directory.
    ///
    /// Only the parent itself is listed; subdirectories are never entered.
    /// With [`ArtworkSelection::FirstFound`] the winner depends on the
    /// filesystem's listing order.
    pub fn find_cover(&self, track: &Path) -> Option<PathBuf> {
        let dir = track.parent()?;
        if !dir.is_dir() {
            return None;
        }

        let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1);
        if self.selection == ArtworkSelection::Lexical {
            walker = walker.sort_by_file_name();
        }

        // Unreadable entries (or an unreadable directory) are skipped.
        let found = walker.into_iter().find_map(|entry| match entry {
            Ok(e) if e.path().is_file() => {
                let name = e.file_name().to_str()?;
                self.is_image(name).then(|| e.path().to_path_buf())
            }
            _ => None,
        });

        match &found {
            Some(p) => tracing::debug!(cover = %p.display(), "found artwork"),
            None => tracing::debug!(dir = %dir.display(), "no artwork in track directory"),
        }
        found
    }
}

#[cfg(test)]
mod tests;
