//! JSON export of computed series
//!
//! Every binary can dump what it plotted next to the images, so runs can
//! be compared or re-plotted elsewhere. Files are pretty-printed and
//! overwritten on each run.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;

/// Create the output directory if needed and return it
pub fn ensure_output_dir(dir: &Path) -> Result<&Path> {
    std::fs::create_dir_all(dir)?;
    Ok(dir)
}

/// Write `value` as pretty JSON to `path`
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(path = %path.display(), "series exported");
    Ok(())
}

/// Write `value` to `<dir>/<stem>.json`, returning the path
pub fn export_series<T: Serialize + ?Sized>(dir: &Path, stem: &str, value: &T) -> Result<PathBuf> {
    let path = dir.join(format!("{stem}.json"));
    write_json(&path, value)?;
    Ok(path)
}
