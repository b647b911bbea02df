use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Rename `path` in place so its extension is lowercase, returning the
/// resulting path. Paths already lowercase (or without an extension)
/// are returned untouched.
pub fn lowercase_extension(path: &Path) -> io::Result<PathBuf> {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext,
        None => return Ok(path.to_path_buf()),
    };
    let lowered = ext.to_lowercase();
    if lowered == ext {
        return Ok(path.to_path_buf());
    }
    let renamed = path.with_extension(lowered);
    fs::rename(path, &renamed)?;
    Ok(renamed)
}
