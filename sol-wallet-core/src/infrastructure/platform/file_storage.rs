use crate::domain::repositories::StorageRepository;
use crate::shared::error::WalletError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const DATA_EXTENSION: &str = "dat";

/// Directory-backed storage.
///
/// Each key is one file named after the hex encoding of the key. Writes go
/// to a temporary file that is synced and then renamed over the target, so
/// a crash leaves either the old or the new value, never a torn one.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, WalletError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        restrict_permissions(&root, 0o700).await?;
        log::debug!("File storage opened at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", hex::encode(key.as_bytes()), DATA_EXTENSION))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!(
            ".{}.{}.tmp",
            hex::encode(key.as_bytes()),
            uuid::Uuid::new_v4().simple()
        ))
    }
}

#[async_trait]
impl StorageRepository for FileStorage {
    async fn store(&self, key: &str, data: &[u8]) -> Result<(), WalletError> {
        let temp = self.temp_path(key);
        let result: Result<(), WalletError> = async {
            let mut file = fs::File::create(&temp).await?;
            restrict_permissions(&temp, 0o600).await?;
            file.write_all(data).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&temp, self.file_path(key)).await?;
            Ok(())
        }
        .await;

        if let Err(e) = result {
            log::warn!("Write of {} failed, discarding temporary file", key);
            let _ = fs::remove_file(&temp).await;
            return Err(e);
        }
        Ok(())
    }

    async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>, WalletError> {
        match fs::read(self.file_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WalletError::storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), WalletError> {
        match fs::remove_file(self.file_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WalletError::storage(format!("Failed to delete {}: {}", key, e))),
        }
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, WalletError> {
        let mut keys = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DATA_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            // Foreign files in the directory are skipped
            let Some(key) = hex::decode(stem).ok().and_then(|bytes| String::from_utf8(bytes).ok()) else {
                continue;
            };
            if key.starts_with(prefix) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path, mode: u32) -> Result<(), WalletError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path, _mode: u32) -> Result<(), WalletError> {
    Ok(())
}
