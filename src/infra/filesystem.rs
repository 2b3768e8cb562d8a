//! Filesystem operations
//!
//! Handles file copies, reads, writes and artifact hashing.

use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

use crate::error::FilesystemError;

/// Copy a file, returning the number of bytes copied.
///
/// The destination directory must already exist. Copying a file onto itself
/// is refused: `std::fs::copy` would truncate it first.
pub fn copy_file(from: &Path, to: &Path) -> Result<u64, FilesystemError> {
    if same_file(from, to) {
        return Err(FilesystemError::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            error: "source and destination are the same file".to_string(),
        });
    }
    std::fs::copy(from, to).map_err(|e| FilesystemError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    })
}

/// Whether two existing paths refer to the same file or directory
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write content to a file
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Compute the SHA-256 of a file as lowercase hex
pub fn sha256_file(path: &Path) -> Result<String, FilesystemError> {
    let read_err = |e: std::io::Error| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    };
    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(read_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
