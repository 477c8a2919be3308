//! Save/load persistence for small JSON files
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic writes (tmp file, then rename over the old file)
//! - Data directory next to the executable

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Version written into every envelope
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    payload: T,
}

/// Directory holding scores, settings and the log file
pub fn data_dir() -> PathBuf {
    // Store next to the executable
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.to_path_buf();
        }
    }
    PathBuf::from(".")
}

/// Read and unwrap a versioned JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let envelope: Envelope<T> =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    if envelope.version != FORMAT_VERSION {
        bail!(
            "{}: unsupported format version {}",
            path.display(),
            envelope.version
        );
    }
    Ok(envelope.payload)
}

/// Wrap `value` in an envelope and write it atomically
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let envelope = Envelope {
        version: FORMAT_VERSION,
        payload: value,
    };
    let json = serde_json::to_string_pretty(&envelope).context("serialize")?;

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

/// True if the error chain bottoms out in a missing file
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
    })
}
