use crate::domain::ports::ArtifactStore;
use crate::utils::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const ARTIFACT_EXTENSION: &str = "txt";

/// 每位送禮者一個 `<name>.txt` 檔案，內容只有收禮者名稱
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    base_path: PathBuf,
}

impl DirectoryStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn artifact_path(&self, key: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", key, ARTIFACT_EXTENSION))
    }
}

impl ArtifactStore for DirectoryStore {
    fn reset(&mut self) -> Result<()> {
        if self.base_path.exists() {
            tracing::debug!("Removing previous output at {}", self.base_path.display());
            fs::remove_dir_all(&self.base_path)?;
        }
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.artifact_path(key), value)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(ARTIFACT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        Ok(keys)
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.artifact_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn location(&self) -> String {
        self.base_path.display().to_string()
    }
}

/// 記憶體中的只增記錄。同一個鍵寫入兩次會留下兩筆，讓驗證能抓到重複寫入。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<(String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ArtifactStore for MemoryStore {
    fn reset(&mut self) -> Result<()> {
        self.records.clear();
        Ok(())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.records.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.records.iter().map(|(key, _)| key.clone()).collect())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .records
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.clone()))
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_store_writes_plain_recipient() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = DirectoryStore::new(temp_dir.path().join("output"));

        store.reset().unwrap();
        store.put("Greg", "Sondra").unwrap();

        let content = fs::read_to_string(temp_dir.path().join("output/Greg.txt")).unwrap();
        assert_eq!(content, "Sondra");
        assert_eq!(store.get("Greg").unwrap(), Some("Sondra".to_string()));
        assert_eq!(store.get("Megan").unwrap(), None);
        assert_eq!(store.list().unwrap(), vec!["Greg".to_string()]);
    }

    #[test]
    fn test_directory_store_reset_clears_previous_run() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = DirectoryStore::new(temp_dir.path().join("output"));

        store.reset().unwrap();
        store.put("Greg", "Sondra").unwrap();
        store.put("Megan", "Josh").unwrap();
        store.reset().unwrap();

        assert!(store.list().unwrap().is_empty());
        assert!(store.base_path().exists());
    }

    #[test]
    fn test_directory_store_ignores_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = DirectoryStore::new(temp_dir.path());

        store.reset().unwrap();
        store.put("Greg", "Sondra").unwrap();
        fs::write(temp_dir.path().join("notes.md"), "hello").unwrap();
        fs::create_dir(temp_dir.path().join("nested.txt")).unwrap();

        assert_eq!(store.list().unwrap(), vec!["Greg".to_string()]);
    }

    #[test]
    fn test_memory_store_keeps_double_writes() {
        let mut store = MemoryStore::new();
        store.put("Greg", "Sondra").unwrap();
        store.put("Greg", "Josh").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.list().unwrap(), vec!["Greg".to_string(), "Greg".to_string()]);
        assert_eq!(store.get("Greg").unwrap(), Some("Josh".to_string()));

        store.reset().unwrap();
        assert!(store.is_empty());
    }
}
