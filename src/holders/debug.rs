//! Debug dump helpers for selector troubleshooting.

use std::io::Write;
use std::path::PathBuf;

pub(crate) fn enabled() -> bool {
    std::env::var("SHAREHOLDER_DEBUG").ok().as_deref() == Some("1")
}

pub(crate) fn debug_dump_html(html: &str) -> std::io::Result<PathBuf> {
    let path = std::env::temp_dir().join("shareholder_sync-target.html");
    let mut f = std::fs::File::create(&path)?;
    f.write_all(html.as_bytes())?;
    tracing::debug!("SHAREHOLDER_DEBUG: wrote target page to {}", path.display());
    Ok(path)
}
