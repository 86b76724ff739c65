//! Persisted desktop data: the `files` and `trash` mappings and the chosen
//! wallpaper.
//!
//! Every mutation is a whole-blob read-modify-write of one key. There is no
//! locking and no transaction; the last writer wins.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_DOCUMENT_NAME;
use crate::error::{StoreError, StoreResult};

const FILES_KEY: &str = "files";
const TRASH_KEY: &str = "trash";
const WALLPAPER_KEY: &str = "wallpaper";

pub type FileMap = BTreeMap<String, String>;

/// String key-value backend.
pub trait Storage {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    /// Creates the directory if it does not exist yet.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for DirStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(body) => Ok(Some(body)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File and trash operations over a [`Storage`] backend.
#[derive(Debug)]
pub struct FileStore<S> {
    storage: S,
}

impl<S: Storage> FileStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn load(&self, key: &str) -> StoreResult<FileMap> {
        match self.storage.get(key)? {
            Some(body) if !body.trim().is_empty() => Ok(serde_json::from_str(&body)?),
            _ => Ok(FileMap::new()),
        }
    }

    fn store(&mut self, key: &str, map: &FileMap) -> StoreResult<()> {
        let body = serde_json::to_string(map)?;
        self.storage.set(key, &body)
    }

    pub fn files(&self) -> StoreResult<FileMap> {
        self.load(FILES_KEY)
    }

    pub fn trash(&self) -> StoreResult<FileMap> {
        self.load(TRASH_KEY)
    }

    pub fn read(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self.files()?.remove(name))
    }

    /// Writes `content` under `name`, overwriting. An empty name falls back to
    /// the default document name. Returns the name actually used.
    pub fn save(&mut self, name: &str, content: &str) -> StoreResult<String> {
        let name = match name.trim() {
            "" => DEFAULT_DOCUMENT_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        let mut files = self.files()?;
        files.insert(name.clone(), content.to_string());
        self.store(FILES_KEY, &files)?;
        tracing::debug!(file = %name, chars = content.chars().count(), "saved file");
        Ok(name)
    }

    /// Moves a live file into the trash, replacing any trashed file of the
    /// same name.
    pub fn move_to_trash(&mut self, name: &str) -> StoreResult<()> {
        let mut files = self.files()?;
        let content = files
            .remove(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        let mut trash = self.trash()?;
        trash.insert(name.to_string(), content);
        self.store(FILES_KEY, &files)?;
        self.store(TRASH_KEY, &trash)?;
        tracing::debug!(file = %name, "moved file to trash");
        Ok(())
    }

    /// Removes a live file without going through the trash.
    pub fn delete(&mut self, name: &str) -> StoreResult<()> {
        let mut files = self.files()?;
        if files.remove(name).is_none() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        self.store(FILES_KEY, &files)?;
        tracing::debug!(file = %name, "deleted file");
        Ok(())
    }

    /// Renames a live file. Returns `false` when there was nothing to do
    /// (empty or unchanged name).
    pub fn rename(&mut self, old: &str, new: &str) -> StoreResult<bool> {
        let new = new.trim();
        if new.is_empty() || new == old {
            return Ok(false);
        }
        let mut files = self.files()?;
        if files.contains_key(new) {
            return Err(StoreError::AlreadyExists(new.to_string()));
        }
        let content = files
            .remove(old)
            .ok_or_else(|| StoreError::NotFound(old.to_string()))?;
        files.insert(new.to_string(), content);
        self.store(FILES_KEY, &files)?;
        tracing::debug!(from = %old, to = %new, "renamed file");
        Ok(true)
    }

    /// Copies a live file next to itself and returns the copy's name.
    pub fn duplicate(&mut self, name: &str) -> StoreResult<String> {
        let mut files = self.files()?;
        let content = files
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        let copy = copy_name(name, |candidate| files.contains_key(candidate));
        files.insert(copy.clone(), content);
        self.store(FILES_KEY, &files)?;
        tracing::debug!(file = %name, copy = %copy, "duplicated file");
        Ok(copy)
    }

    /// Moves a trashed file back. Refuses when a live file has the name.
    pub fn restore(&mut self, name: &str) -> StoreResult<()> {
        let mut files = self.files()?;
        if files.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        let mut trash = self.trash()?;
        let content = trash
            .remove(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        files.insert(name.to_string(), content);
        self.store(FILES_KEY, &files)?;
        self.store(TRASH_KEY, &trash)?;
        tracing::debug!(file = %name, "restored file");
        Ok(())
    }

    pub fn delete_permanently(&mut self, name: &str) -> StoreResult<()> {
        let mut trash = self.trash()?;
        if trash.remove(name).is_none() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        self.store(TRASH_KEY, &trash)?;
        tracing::debug!(file = %name, "deleted file permanently");
        Ok(())
    }

    pub fn wallpaper(&self) -> StoreResult<Option<String>> {
        match self.storage.get(WALLPAPER_KEY)? {
            Some(body) if !body.trim().is_empty() => Ok(Some(serde_json::from_str(&body)?)),
            _ => Ok(None),
        }
    }

    pub fn set_wallpaper(&mut self, name: &str) -> StoreResult<()> {
        let body = serde_json::to_string(name)?;
        self.storage.set(WALLPAPER_KEY, &body)
    }
}

/// `"<stem> - Copy<ext>"`, then `"<stem> - Copy (n)<ext>"` from n = 1 until
/// `taken` says the name is free. The extension starts at the last dot.
pub fn copy_name(name: &str, taken: impl Fn(&str) -> bool) -> String {
    let (stem, ext) = match name.rfind('.') {
        Some(dot) => name.split_at(dot),
        None => (name, ""),
    };
    let mut candidate = format!("{stem} - Copy{ext}");
    let mut counter = 1u32;
    while taken(&candidate) {
        candidate = format!("{stem} - Copy ({counter}){ext}");
        counter += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FileStore<MemoryStorage> {
        FileStore::new(MemoryStorage::new())
    }

    #[test]
    fn empty_store_has_no_files() {
        let s = store();
        assert!(s.files().unwrap().is_empty());
        assert!(s.trash().unwrap().is_empty());
        assert_eq!(s.wallpaper().unwrap(), None);
    }

    #[test]
    fn save_falls_back_to_default_name() {
        let mut s = store();
        assert_eq!(s.save("  ", "hi").unwrap(), DEFAULT_DOCUMENT_NAME);
        assert_eq!(s.read(DEFAULT_DOCUMENT_NAME).unwrap().as_deref(), Some("hi"));
    }

    #[test]
    fn trash_and_restore() {
        let mut s = store();
        s.save("a.txt", "alpha").unwrap();
        s.move_to_trash("a.txt").unwrap();
        assert!(s.files().unwrap().is_empty());
        assert_eq!(s.trash().unwrap().get("a.txt").map(String::as_str), Some("alpha"));

        s.save("a.txt", "newer").unwrap();
        assert!(matches!(s.restore("a.txt"), Err(StoreError::AlreadyExists(_))));
        s.delete("a.txt").unwrap();
        s.restore("a.txt").unwrap();
        assert_eq!(s.read("a.txt").unwrap().as_deref(), Some("alpha"));
        assert!(s.trash().unwrap().is_empty());
    }

    #[test]
    fn move_missing_to_trash_is_not_found() {
        let mut s = store();
        assert!(matches!(s.move_to_trash("nope"), Err(StoreError::NotFound(_))));
        assert!(matches!(s.delete_permanently("nope"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn rename_rules() {
        let mut s = store();
        s.save("a.txt", "1").unwrap();
        s.save("b.txt", "2").unwrap();
        assert!(!s.rename("a.txt", "a.txt").unwrap());
        assert!(!s.rename("a.txt", "").unwrap());
        assert!(matches!(s.rename("a.txt", "b.txt"), Err(StoreError::AlreadyExists(_))));
        assert!(s.rename("a.txt", "c.txt").unwrap());
        let names: Vec<String> = s.files().unwrap().into_keys().collect();
        assert_eq!(names, vec!["b.txt", "c.txt"]);
    }

    #[test]
    fn duplicate_picks_next_free_copy_name() {
        let mut s = store();
        s.save("notes.txt", "x").unwrap();
        assert_eq!(s.duplicate("notes.txt").unwrap(), "notes - Copy.txt");
        assert_eq!(s.duplicate("notes.txt").unwrap(), "notes - Copy (1).txt");
        assert_eq!(s.duplicate("notes.txt").unwrap(), "notes - Copy (2).txt");
        assert_eq!(s.files().unwrap().len(), 4);
    }

    #[test]
    fn copy_name_without_extension() {
        assert_eq!(copy_name("README", |_| false), "README - Copy");
        assert_eq!(copy_name("a.b.c", |_| false), "a.b - Copy.c");
    }

    #[test]
    fn corrupt_blob_reports_json_error() {
        let mut backend = MemoryStorage::new();
        backend.set(FILES_KEY, "{not json").unwrap();
        let s = FileStore::new(backend);
        assert!(matches!(s.files(), Err(StoreError::Json(_))));
    }

    #[test]
    fn wallpaper_round_trip() {
        let mut s = store();
        s.set_wallpaper("Forest").unwrap();
        assert_eq!(s.wallpaper().unwrap().as_deref(), Some("Forest"));
    }

    #[test]
    fn dir_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut s = FileStore::new(DirStorage::open(dir.path()).unwrap());
            s.save("keep.txt", "kept").unwrap();
            s.set_wallpaper("Mint").unwrap();
        }
        let s = FileStore::new(DirStorage::open(dir.path()).unwrap());
        assert_eq!(s.read("keep.txt").unwrap().as_deref(), Some("kept"));
        assert_eq!(s.wallpaper().unwrap().as_deref(), Some("Mint"));
        assert!(dir.path().join("files.json").exists());
    }

    #[test]
    fn dir_storage_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = DirStorage::open(&nested).unwrap();
        assert_eq!(storage.root(), nested.as_path());
        assert!(nested.is_dir());
    }
}
