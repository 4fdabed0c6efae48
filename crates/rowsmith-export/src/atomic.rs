use std::fs::{create_dir_all, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::ExportError;

pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> Result<(), ExportError> {
    write_atomic(path, |writer| writer.write_all(data).map_err(ExportError::from))
}

/// Write `path` through a sibling `.tmp` file that is renamed into place only
/// after `fill` succeeds and the data is synced. On failure the temp file is
/// removed and the previous contents of `path` are untouched.
pub fn write_atomic<T, F>(path: &Path, fill: F) -> Result<T, ExportError>
where
    F: FnOnce(&mut BufWriter<std::fs::File>) -> Result<T, ExportError>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let result = write_temp(&tmp_path, fill);
    let value = match result {
        Ok(value) => value,
        Err(err) => {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(err);
        }
    };

    std::fs::rename(&tmp_path, path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            sync_dir(parent)?;
        }
    }

    Ok(value)
}

fn write_temp<T, F>(tmp_path: &Path, fill: F) -> Result<T, ExportError>
where
    F: FnOnce(&mut BufWriter<std::fs::File>) -> Result<T, ExportError>,
{
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    let mut writer = BufWriter::new(file);
    let value = fill(&mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(value)
}

fn temp_path(path: &Path) -> Result<PathBuf, ExportError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ExportError::InvalidPath(path.display().to_string()))?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}
