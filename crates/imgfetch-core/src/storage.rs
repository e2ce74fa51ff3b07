//! Writing image files.
//!
//! Bytes go to `<name>.part` first and are renamed onto the final name, so a
//! failed write never leaves a truncated image behind under its real name.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before the rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `cat.jpg` → `cat.jpg.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `bytes` to `final_path`, creating it or replacing an existing file.
pub fn write_file(final_path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_path(final_path);
    if let Err(e) = write_temp(&tmp, bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&tmp, final_path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e).with_context(|| {
            format!("failed to rename {} to {}", tmp.display(), final_path.display())
        });
    }
    Ok(())
}

fn write_temp(tmp: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(tmp).with_context(|| format!("create {}", tmp.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("write {}", tmp.display()))?;
    file.sync_all()
        .with_context(|| format!("sync {}", tmp.display()))?;
    Ok(())
}

/// Saves an image as `dir/filename` and returns the full path.
pub fn save_image(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(filename);
    write_file(&path, bytes)?;
    Ok(path)
}
