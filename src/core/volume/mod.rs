//! App volume seeding
//!
//! Copies the `volumes` directory shipped with an app template into the
//! app's data directory.

use crate::core::layout::KiteLayout;
use crate::util::fs::{CopyStats, copy_folder};
use anyhow::Result;
use std::path::Path;

/// Copy `<directory>/volumes` into the app's data directory.
///
/// Returns `None` when the template has no volumes.
pub fn copy_volumes(
    layout: &KiteLayout,
    directory: &Path,
    app_name: &str,
) -> Result<Option<CopyStats>> {
    let volumes = directory.join("volumes");
    if !volumes.exists() {
        return Ok(None);
    }

    let stats = copy_folder(&volumes, &layout.app_dir(app_name))?;
    tracing::info!("Copied volumes for: {}", app_name);

    Ok(Some(stats))
}
