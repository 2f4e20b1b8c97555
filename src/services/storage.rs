//! # 会话存储后端
//!
//! 抽象浏览器 localStorage 的键值语义：一个键对应一段字符串。
//! - `MemoryStorage` - 进程内存储，用于测试
//! - `FileStorage` - 每个键一个 `<key>.json` 文件，位于应用数据目录
//!
//! 存储接口为同步接口：登出必须同步清除持久化条目。

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use crate::error::StorageError;

/// 键值存储后端
pub trait SessionStorage: Send + Sync {
    /// 读取键对应的值；键不存在时返回 `Ok(None)`
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// 写入（覆盖）键对应的值
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 删除键；键不存在时视为成功
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// 内存存储
///
/// 内部使用 `RwLock<HashMap>`，读多写少。锁中毒时继续使用内部数据，写入不会被丢弃。
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// 文件存储
///
/// 键 `cofoundify_user` 对应文件 `<dir>/cofoundify_user.json`。
/// 目录在首次写入时递归创建。
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // 键只允许出现在文件名中，去掉路径分隔符
        let safe: String = key
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir)?;
        }
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_survives_poisoned_lock() {
        let storage = std::sync::Arc::new(MemoryStorage::new());
        let poisoner = storage.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(storage.entries.is_poisoned());

        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_file_storage_creates_directory_and_removes() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("nested"));
        assert_eq!(storage.get("cofoundify_user").unwrap(), None);

        storage.set("cofoundify_user", "{}").unwrap();
        assert!(tmp.path().join("nested/cofoundify_user.json").exists());
        assert_eq!(storage.get("cofoundify_user").unwrap().as_deref(), Some("{}"));

        storage.remove("cofoundify_user").unwrap();
        assert_eq!(storage.get("cofoundify_user").unwrap(), None);
    }

    #[test]
    fn test_file_storage_sanitizes_key() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path());
        storage.set("../escape", "x").unwrap();
        assert!(tmp.path().join(".._escape.json").exists());
    }
}
