//! Report file output

use std::fs;
use std::path::{Path, PathBuf};

use crate::report::Report;
use crate::{InsightsError, Result};

/// Render `report` and write it to `path`, replacing any existing file.
///
/// Content goes to a sibling temp file first and is renamed into place, so
/// the target is either fully replaced or left untouched.
pub fn write_report(path: &Path, report: &Report) -> Result<()> {
    let content = report.render();
    let tmp_path = temp_path_for(path)?;

    if let Err(err) = fs::write(&tmp_path, content) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(path, err));
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(path, err));
    }

    tracing::debug!("Report written to {}", path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io_error(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;

    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");

    Ok(path.with_file_name(tmp_name))
}

fn io_error(path: &Path, err: std::io::Error) -> InsightsError {
    InsightsError::Io(std::io::Error::new(
        err.kind(),
        format!("Failed to write report to {}: {}", path.display(), err),
    ))
}
