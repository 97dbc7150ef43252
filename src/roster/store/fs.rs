use super::{decode_snapshot, encode_snapshot, StorageBackend};
use crate::error::{Result, RosterError};
use crate::model::Record;
use std::fs;
use std::path::PathBuf;

/// File-based snapshot storage: `{data_dir}/{storage_key}.json`.
pub struct FsBackend {
    data_dir: PathBuf,
    storage_key: String,
}

impl FsBackend {
    pub fn new(data_dir: impl Into<PathBuf>, storage_key: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: storage_key.into(),
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).map_err(RosterError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Option<Vec<Record>>> {
        let path = self.storage_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(RosterError::Io)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        decode_snapshot(&content).map(Some)
    }

    /// Writes to a temporary sibling first and renames it over the snapshot,
    /// so readers never see a half-written file.
    fn save(&self, records: &[Record]) -> Result<()> {
        self.ensure_dir()?;
        let content = encode_snapshot(records)?;
        let path = self.storage_path();
        let tmp = self.data_dir.join(format!(".{}.json.tmp", self.storage_key));
        fs::write(&tmp, content).map_err(RosterError::Io)?;
        fs::rename(&tmp, &path).map_err(RosterError::Io)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.storage_path().display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::records;
    use crate::store::{RecordStore, DEFAULT_STORAGE_KEY};

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path(), DEFAULT_STORAGE_KEY);
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let backend = FsBackend::new(&data_dir, DEFAULT_STORAGE_KEY);

        let original = records(3);
        backend.save(&original).unwrap();

        assert!(data_dir.join("form-data-storage.json").exists());
        assert!(!data_dir.join(".form-data-storage.json.tmp").exists());
        assert_eq!(backend.load().unwrap().unwrap(), original);
    }

    #[test]
    fn store_rehydrates_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = RecordStore::open(FsBackend::new(dir.path(), "k"), || Ok(records(2)))
                .unwrap();
            let first = store.all()[0].clone();
            store.copy(&first);
        }
        let store = RecordStore::open(FsBackend::new(dir.path(), "k"), || Ok(vec![])).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.all()[2].name, "Person 1 (Copy)");
    }

    #[test]
    fn storage_keys_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        FsBackend::new(dir.path(), "a").save(&records(1)).unwrap();
        assert!(FsBackend::new(dir.path(), "b").load().unwrap().is_none());
    }
}
