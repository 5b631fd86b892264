//! Content-addressed storage for uploaded product images.
//!
//! Files are stored under a single directory, named by the MD5 digest of
//! their bytes plus the original extension. Re-uploading identical bytes
//! therefore lands on the same file instead of a duplicate.

use std::fs;
use std::path::{Path, PathBuf};

use md5::{Digest, Md5};
use thiserror::Error;

/// Upper bound on upload size when `FILE_MAX_SIZE` is not set.
pub const DEFAULT_MAX_FILE_SIZE: usize = 2 * 1024 * 1024;
/// Extension allow-list when `FILE_EXTENSION` is not set.
pub const DEFAULT_ALLOWED_EXTENSIONS: &str = ".png,.jpg,.jpeg";
/// Rejection message when `FILE_MAX_MESSAGE` is not set.
pub const DEFAULT_FILE_TOO_LARGE_MESSAGE: &str = "File size too large";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid image type")]
    InvalidExtension,
    #[error("{0}")]
    FileTooLarge(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Validation limits applied to every stored image.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_size: usize,
    allowed_extensions: Vec<String>,
    too_large_message: String,
}

impl UploadPolicy {
    /// Build a policy from a size cap, a comma-separated extension list
    /// (`.png,.jpg`) and the message returned for oversized files.
    pub fn new(max_size: usize, extensions: &str, too_large_message: impl Into<String>) -> Self {
        let allowed_extensions = extensions
            .split(',')
            .map(|ext| ext.trim().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self {
            max_size,
            allowed_extensions,
            too_large_message: too_large_message.into(),
        }
    }

    fn check(&self, file_name: &str, len: usize) -> Result<String, StorageError> {
        let ext = file_name
            .rfind('.')
            .map(|idx| file_name[idx..].to_lowercase())
            .ok_or(StorageError::InvalidExtension)?;
        if !self.allowed_extensions.contains(&ext) {
            return Err(StorageError::InvalidExtension);
        }
        if len > self.max_size {
            return Err(StorageError::FileTooLarge(self.too_large_message.clone()));
        }
        Ok(ext)
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_FILE_SIZE,
            DEFAULT_ALLOWED_EXTENSIONS,
            DEFAULT_FILE_TOO_LARGE_MESSAGE,
        )
    }
}

#[derive(Clone)]
/// Directory-backed image store handing out content-hash file names.
pub struct ImageStore {
    root: PathBuf,
    policy: UploadPolicy,
}

impl ImageStore {
    /// Open (and create if missing) the store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, policy: UploadPolicy) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root, policy })
    }

    /// Check a candidate upload against the policy without writing anything.
    pub fn validate(&self, file_name: &str, len: usize) -> Result<(), StorageError> {
        self.policy.check(file_name, len)?;
        Ok(())
    }

    /// Validate `bytes` against the policy and persist them, returning the
    /// stored file name (`<md5-hex><ext>`).
    pub fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let ext = self.policy.check(file_name, bytes.len())?;
        let stored_name = format!("{}{ext}", content_hash(bytes));
        fs::write(self.root.join(&stored_name), bytes)?;
        Ok(stored_name)
    }

    /// Remove a stored file. Missing files are reported as an error so the
    /// caller can decide whether that matters.
    pub fn delete(&self, file_name: &str) -> Result<(), StorageError> {
        fs::remove_file(self.root.join(file_name))?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// MD5 digest of `bytes` rendered as lowercase hex.
fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
