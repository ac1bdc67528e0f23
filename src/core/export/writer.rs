//! Record writer
//!
//! Streams a metadata record to disk. Bytes go to a `.part` sibling first and
//! are renamed into place once the transfer completes, so a file with the
//! final name is always a complete copy. The exporter relies on this when it
//! skips records whose file already exists.

use crate::adapters::fedora::MetadataStream;
use crate::domain::Pid;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const PARTIAL_SUFFIX: &str = ".part";

const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Why a record could not be written
#[derive(Debug, Error)]
pub enum WriteRecordError {
    /// The record body could not be read from the server
    #[error("failed to read record body: {0}")]
    Read(#[source] io::Error),

    /// The file could not be created, written or moved into place
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl WriteRecordError {
    fn write(path: &Path, source: io::Error) -> Self {
        WriteRecordError::Write {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Output file for `pid` inside `collection_dir`
pub fn record_path(collection_dir: &Path, pid: &Pid) -> PathBuf {
    collection_dir.join(pid.fs_name())
}

/// Temporary path used while `path` is being written
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    path.with_file_name(name)
}

/// Copy `stream` to `path`, returning the number of bytes written
///
/// On failure the partial file is removed and `path` is left untouched.
pub async fn write_record(
    path: &Path,
    mut stream: MetadataStream,
) -> Result<u64, WriteRecordError> {
    let partial = partial_path(path);

    let result = async {
        let mut file = fs::File::create(&partial)
            .await
            .map_err(|e| WriteRecordError::write(path, e))?;

        let mut buf = vec![0u8; COPY_BUFFER_SIZE];
        let mut bytes = 0u64;
        loop {
            let n = stream.read(&mut buf).await.map_err(WriteRecordError::Read)?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n])
                .await
                .map_err(|e| WriteRecordError::write(path, e))?;
            bytes += n as u64;
        }

        file.flush()
            .await
            .map_err(|e| WriteRecordError::write(path, e))?;
        file.sync_all()
            .await
            .map_err(|e| WriteRecordError::write(path, e))?;
        drop(file);
        fs::rename(&partial, path)
            .await
            .map_err(|e| WriteRecordError::write(path, e))?;
        Ok::<_, WriteRecordError>(bytes)
    }
    .await;

    if result.is_err() {
        if let Err(e) = fs::remove_file(&partial).await {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %partial.display(),
                    error = %e,
                    "Failed to remove partial record"
                );
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_path_uses_fs_name() {
        let pid = Pid::new("iudl:42").unwrap();
        assert_eq!(
            record_path(Path::new("/out/iudl_maps"), &pid),
            PathBuf::from("/out/iudl_maps/iudl_42")
        );
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/out/iudl_maps/iudl_42")),
            PathBuf::from("/out/iudl_maps/iudl_42.part")
        );
    }

    #[tokio::test]
    async fn test_write_record_copies_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("iudl_1");
        let body = b"<mods xmlns=\"http://www.loc.gov/mods/v3\"/>".to_vec();

        let written = write_record(&path, Box::new(std::io::Cursor::new(body.clone())))
            .await
            .unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&path).unwrap(), body);
        assert!(!partial_path(&path).exists());
    }

    #[tokio::test]
    async fn test_write_record_failure_leaves_no_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("iudl_1");

        let result = write_record(&path, Box::new(std::io::Cursor::new(b"x".to_vec()))).await;

        assert!(matches!(result, Err(WriteRecordError::Write { .. })));
        assert!(!path.exists());
        assert!(!partial_path(&path).exists());
    }

    #[tokio::test]
    async fn test_body_read_failure_is_reported_as_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("iudl_1");
        let body = failing_body(b"<mods>", "connection reset");

        let err = write_record(&path, body).await.unwrap_err();

        assert!(matches!(err, WriteRecordError::Read(_)));
        assert!(err.to_string().starts_with("failed to read record body"));
        assert!(!path.exists());
        assert!(!partial_path(&path).exists());
    }

    /// Stream yielding `data` and then failing with `message`
    fn failing_body(data: &'static [u8], message: &'static str) -> MetadataStream {
        let chunks: Vec<io::Result<&'static [u8]>> = vec![Ok(data), Err(io::Error::other(message))];
        Box::new(tokio_util::io::StreamReader::new(futures::stream::iter(chunks)))
    }
}
