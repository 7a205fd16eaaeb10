// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Storage Kernel: atomic JSON-file persistence with crash-consistent
//! rename + fsync, generic over any serializable payload.
//!
//! Guarantees:
//! - **Atomic replacement**: write to a temp file in the same directory,
//!   fsync the temp file, rename over the target, then fsync the
//!   containing directory. A crash leaves either the old or the new file
//!   intact, never a partial one.
//! - **Permissive read**: a missing file loads as `None`; malformed JSON is
//!   rotated to a `.bak` file and also loads as `None`. Never panics.
//! - **No implicit concurrency**: the Kernel is single-writer; callers
//!   serialize concurrent access (see `PipelineStore`'s mutex).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

const MAX_BAK_FILES: u32 = 3;

/// Atomically persist `value` as pretty-printed JSON at `path`.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), KernelError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path)?;

    // fsync the directory so the rename itself is durable across a crash,
    // not just the file contents.
    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Load a value previously written by [`save`].
///
/// Returns `Ok(None)` if the file is missing or corrupt. A corrupt file is
/// rotated to a `.bak` (up to [`MAX_BAK_FILES`], oldest dropped) so the
/// caller can recover manually; the caller then treats the store as empty.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, KernelError> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    match serde_json::from_reader(reader) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            let bak_path = rotate_bak_path(path);
            warn!(
                error = %e,
                path = %path.display(),
                bak = %bak_path.display(),
                "corrupt JSON file, moving to .bak and starting fresh",
            );
            fs::rename(path, &bak_path)?;
            Ok(None)
        }
    }
}

/// Pick the next `.bak` / `.bak.N` path, rotating older backups out.
pub(crate) fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }

    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }

    bak(1)
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
