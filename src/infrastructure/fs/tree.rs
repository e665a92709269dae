//! Recursive file and directory copies

use std::fs;
use std::io;
use std::path::Path;

/// Copy the directory `source` to `destination`, which must not exist yet
///
/// Symlinks are followed and their targets copied.
pub fn copy_tree(source: &Path, destination: &Path) -> io::Result<()> {
    if destination.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("copy target already exists: {}", destination.display()),
        ));
    }
    if !source.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("source directory not found: {}", source.display()),
        ));
    }
    copy_dir_contents(source, destination)
}

/// Copy a file, creating the destination's parent directories
pub fn copy_file(source: &Path, destination: &Path) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, destination)?;
    Ok(())
}

/// Copy a file or a whole directory, merging into an existing destination
pub fn copy_path(source: &Path, destination: &Path) -> io::Result<()> {
    if fs::metadata(source)?.is_dir() {
        copy_dir_contents(source, destination)
    } else {
        copy_file(source, destination)
    }
}

fn copy_dir_contents(source: &Path, destination: &Path) -> io::Result<()> {
    fs::create_dir_all(destination)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let from = entry.path();
        let to = destination.join(entry.file_name());
        // metadata() follows symlinks, file_type() would not
        if fs::metadata(&from)?.is_dir() {
            copy_dir_contents(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    Ok(())
}
