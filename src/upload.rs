use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Largest accepted upload, in bytes.
pub const UPLOAD_LIMIT: u64 = 50 * 1024 * 1024;

const TEXT_EXT: &str = ".txt";
const DOCX_EXT: &str = ".docx";
const DEFAULT_FILE_NAME: &str = "document.docx";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("only text files (.txt) can be uploaded, got {0:?}")]
    NotText(String),
    #[error("file is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A text file accepted for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub text: String,
}

impl Upload {
    /// Name of the exported document.
    pub fn docx_file_name(&self) -> String {
        docx_file_name(&self.name)
    }
}

pub fn validate_upload(name: &str, size: u64, limit: u64) -> Result<(), UploadError> {
    if !name.ends_with(TEXT_EXT) {
        return Err(UploadError::NotText(name.to_string()));
    }
    if size > limit {
        return Err(UploadError::TooLarge { size, limit });
    }
    Ok(())
}

/// Decodes uploaded bytes as UTF-8, replacing invalid sequences and dropping a BOM.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

pub fn read_upload(path: &Path, limit: u64) -> Result<Upload, UploadError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let read_err = |source| UploadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let size = fs::metadata(path).map_err(read_err)?.len();
    validate_upload(&name, size, limit)?;
    let bytes = fs::read(path).map_err(read_err)?;

    Ok(Upload {
        name,
        text: decode_text(&bytes),
    })
}

/// Swaps a trailing `.txt` for `.docx`.
pub fn docx_file_name(upload_name: &str) -> String {
    let stem = upload_name.strip_suffix(TEXT_EXT).unwrap_or(upload_name);
    if stem.is_empty() {
        return DEFAULT_FILE_NAME.to_string();
    }
    format!("{stem}{DOCX_EXT}")
}
