//! The two sprite-sheet assets this tool manages.

use std::fmt;
use std::path::{Path, PathBuf};

/// A known sprite asset. Declaration order is processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Asset {
    Sheets,
    Renders,
}

impl Asset {
    /// All assets in processing order.
    pub const ALL: [Asset; 2] = [Asset::Sheets, Asset::Renders];

    /// Local file name, also used as the cache key.
    pub fn file_name(self) -> &'static str {
        match self {
            Asset::Sheets => "sheets.png",
            Asset::Renders => "renders.png",
        }
    }

    /// File stem matched in page links.
    pub fn stem(self) -> &'static str {
        match self {
            Asset::Sheets => "sheets",
            Asset::Renders => "renders",
        }
    }

    /// Directory the site serves this asset from (`/s/<token>/<dir>/<file>`).
    pub fn site_dir(self) -> &'static str {
        match self {
            Asset::Sheets => "img",
            Asset::Renders => "css",
        }
    }

    /// Looks up an asset by file name, ignoring ASCII case.
    pub fn from_file_name(name: &str) -> Option<Asset> {
        Asset::ALL
            .into_iter()
            .find(|a| a.file_name().eq_ignore_ascii_case(name))
    }

    /// Path of the local copy under `images_dir`.
    pub fn local_path(self, images_dir: &Path) -> PathBuf {
        images_dir.join(self.file_name())
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.file_name())
    }
}
