/*
 *  Copyright 2025 Colliery Software
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! File transport seam: the five primitives the pipeline needs against its
//! document store, plus the local-filesystem implementation shipped with the
//! crate.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Transport-level I/O failure, tagged with the path it concerned.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport i/o failure at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TransportError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        TransportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A document store the pipeline can upload to, list, copy within and delete
/// from. Directory paths are absolute from the transport's point of view.
pub trait FileTransport {
    /// Writes `bytes` at `path`, replacing any existing file.
    fn upload(&self, bytes: &[u8], path: &Path) -> Result<(), TransportError>;

    /// File names (not paths) directly under `dir`.
    fn list(&self, dir: &Path) -> Result<Vec<String>, TransportError>;

    /// Creates `dir` and any missing parents.
    fn ensure_dir(&self, dir: &Path) -> Result<(), TransportError>;

    /// Copies `src` over `dst`, replacing any existing file.
    fn copy(&self, src: &Path, dst: &Path) -> Result<(), TransportError>;

    fn delete(&self, path: &Path) -> Result<(), TransportError>;
}

/// Local-filesystem transport.
#[derive(Debug, Clone, Default)]
pub struct LocalTransport;

impl FileTransport for LocalTransport {
    fn upload(&self, bytes: &[u8], path: &Path) -> Result<(), TransportError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TransportError::io(parent, e))?;
        }
        debug!(path = %path.display(), size = bytes.len(), "uploading file");
        fs::write(path, bytes).map_err(|e| TransportError::io(path, e))
    }

    fn list(&self, dir: &Path) -> Result<Vec<String>, TransportError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| TransportError::io(dir, e))? {
            let entry = entry.map_err(|e| TransportError::io(dir, e))?;
            let is_file = entry
                .file_type()
                .map_err(|e| TransportError::io(&entry.path(), e))?
                .is_file();
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn ensure_dir(&self, dir: &Path) -> Result<(), TransportError> {
        fs::create_dir_all(dir).map_err(|e| TransportError::io(dir, e))
    }

    fn copy(&self, src: &Path, dst: &Path) -> Result<(), TransportError> {
        fs::copy(src, dst)
            .map(|_| ())
            .map_err(|e| TransportError::io(src, e))
    }

    fn delete(&self, path: &Path) -> Result<(), TransportError> {
        fs::remove_file(path).map_err(|e| TransportError::io(path, e))
    }
}
