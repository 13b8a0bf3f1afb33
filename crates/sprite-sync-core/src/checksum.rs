//! SHA-256 fingerprints of downloaded sprite files, shown by `status`.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Size and digest of a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFingerprint {
    pub bytes: u64,
    /// Lowercase hex SHA-256.
    pub sha256: String,
}

/// Streams `path` through SHA-256.
pub fn fingerprint(path: &Path) -> Result<FileFingerprint> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    let mut bytes = 0u64;
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        bytes += n as u64;
    }
    Ok(FileFingerprint {
        bytes,
        sha256: hex::encode(hasher.finalize()),
    })
}

/// Like [`fingerprint`], but `Ok(None)` when the file does not exist.
pub fn fingerprint_if_present(path: &Path) -> Result<Option<FileFingerprint>> {
    match fingerprint(path) {
        Ok(fp) => Ok(Some(fp)),
        Err(e)
            if e.downcast_ref::<std::io::Error>()
                .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound) =>
        {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
