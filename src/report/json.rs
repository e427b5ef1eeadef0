use super::types::Report;
use anyhow::{Context, Result};
use std::path::Path;

/// Write the JSON report, replacing any previous file at `path`
pub fn write(report: &Report, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    log::info!("JSON report saved to: {}", path.display());

    Ok(())
}
