use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::auth::types::Token;
use crate::errors::{corrupt_token_store_error, io_error, json_error, EmptyResult};
use crate::Error;

/// Token record kept in a single JSON file
#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name: OsString = self.path.clone().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Returns `None` when there is no token file yet
    pub async fn load(&self) -> Result<Option<Token>, Error> {
        let contents = match fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error(err)),
        };
        let token = serde_json::from_slice(&contents).map_err(corrupt_token_store_error)?;
        Ok(Some(token))
    }

    /// Writes a temporary file next to the target and renames it over
    pub async fn save(&self, token: &Token) -> EmptyResult {
        let data = serde_json::to_vec_pretty(token).map_err(json_error)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(io_error)?;
            }
        }

        let temp_path = self.sibling(".tmp");
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp_path).await.map_err(io_error)?;
        file.write_all(&data).await.map_err(io_error)?;
        file.sync_all().await.map_err(io_error)?;
        drop(file);

        fs::rename(&temp_path, &self.path).await.map_err(io_error)?;
        log::debug!("Saved token {} to {}", token.fingerprint(), self.path.display());
        Ok(())
    }

    /// Exclusive advisory lock shared by every process using this token file
    pub async fn lock(&self) -> Result<StoreLock, Error> {
        let lock_path = self.sibling(".lock");
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(io_error)?;
            }
        }
        tokio::task::spawn_blocking(move || StoreLock::acquire(&lock_path))
            .await
            .map_err(io_error)?
    }
}

/// Held while a token is loaded, refreshed and saved; released on drop
#[derive(Debug)]
pub struct StoreLock {
    file: std::fs::File,
}

impl StoreLock {
    fn acquire(path: &Path) -> Result<Self, Error> {
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(io_error)?;
        #[cfg(unix)]
        flock(&file, libc::LOCK_EX).map_err(io_error)?;
        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        #[cfg(unix)]
        if let Err(err) = flock(&self.file, libc::LOCK_UN) {
            log::warn!("Failed to release token file lock: {}", err);
        }
    }
}

#[cfg(unix)]
fn flock(file: &std::fs::File, operation: libc::c_int) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;

    // SAFETY: the descriptor is owned by `file` and stays open for the call
    let ret = unsafe { libc::flock(file.as_raw_fd(), operation) };
    if ret == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}
