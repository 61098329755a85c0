//! The JSON render feed consumed by the animation page.

use std::path::Path;

use biome_types::RenderFeed;
use tracing::info;

use crate::error::StoreError;

/// Write `feed` as JSON to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`StoreError::Json`] if encoding fails and [`StoreError::Io`]
/// if the file cannot be written.
pub fn write_render_feed(path: &Path, feed: &RenderFeed) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_vec(feed)?;
    std::fs::write(path, &json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        snapshots = feed.life.len(),
        cells = feed.cells,
        "Render feed written"
    );
    Ok(())
}

/// Read a render feed back from `path`.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be read and
/// [`StoreError::Json`] if it is not a render feed.
pub fn read_render_feed(path: &Path) -> Result<RenderFeed, StoreError> {
    let bytes = std::fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}
