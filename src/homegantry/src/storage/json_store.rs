use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// A JSON document on disk with an in-memory copy.
///
/// Reads never touch the disk. Every write persists the whole value to a
/// sibling `.tmp` file, syncs it and renames it over the target; the cache is
/// only replaced once the rename succeeded.
pub struct JsonStore<T> {
    path: PathBuf,
    cache: RwLock<Arc<T>>,
    write_lock: Mutex<()>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Loads `path`, using `default` if the file is missing or unparsable.
    pub async fn open(path: impl Into<PathBuf>, default: T) -> Self {
        let path = path.into();
        let value = match load(&path).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("{} does not exist, starting from defaults", path.display());
                default
            }
            Err(e) => {
                warn!("Ignoring unreadable store {}: {:#}", path.display(), e);
                default
            }
        };
        Self {
            path,
            cache: RwLock::new(Arc::new(value)),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self) -> Arc<T> {
        self.cache.read().await.clone()
    }

    /// Replaces the whole value.
    pub async fn set(&self, value: T) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.persist_and_swap(value).await
    }

    /// Applies `f` to a copy of the current value and persists the result.
    pub async fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let _guard = self.write_lock.lock().await;
        let mut value = T::clone(&*self.get().await);
        let result = f(&mut value);
        self.persist_and_swap(value).await?;
        Ok(result)
    }

    async fn persist_and_swap(&self, value: T) -> Result<()> {
        write_atomically(&self.path, &value).await?;
        *self.cache.write().await = Arc::new(value);
        Ok(())
    }
}

async fn load<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };
    let value = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(value))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().unwrap_or_default().to_os_string();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

async fn write_atomically<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_vec_pretty(value)?;
    let tmp = temp_path(path);
    let mut file = tokio::fs::File::create(&tmp)
        .await
        .with_context(|| format!("failed to create {}", tmp.display()))?;
    file.write_all(&json)
        .await
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    file.sync_all()
        .await
        .with_context(|| format!("failed to sync {}", tmp.display()))?;
    drop(file);

    tokio::fs::rename(&tmp, path).await.with_context(|| {
        format!(
            "failed to move {} into place at {}",
            tmp.display(),
            path.display()
        )
    })
}
