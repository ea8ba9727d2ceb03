//! Welcome gate — has the intro dialog been dismissed for this page?
//!
//! Dismissal is stored per page under a key derived from a hash of the page
//! URL. The default gate writes to a primary store and falls back to a
//! secondary one whenever the primary fails; failures never reach the user.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;


/// Boolean gate consulted before showing the welcome dialog.
pub trait WelcomeGate {
    fn is_dismissed(&mut self) -> bool;
    fn dismiss(&mut self);
}


#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store unavailable")]
    Unavailable,
}


/// Key/value persistence for dismissal flags.
pub trait DismissalStore {
    fn get(&self, key: &str) -> Result<bool, StoreError>;
    fn set(&mut self, key: &str) -> Result<(), StoreError>;
}


/// 32-bit string hash: `h = h * 31 + unit` over UTF-16 code units with
/// wrapping arithmetic.
pub fn hash_code(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}


/// Storage key for the welcome flag of the page at `url`.
pub fn welcome_key(prefix: &str, url: &str) -> String {
    format!("{}{}", prefix, hash_code(url))
}


// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// In-process store. Clones share the same flags.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    flags: Rc<RefCell<BTreeMap<String, bool>>>,
}


impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}


impl DismissalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.flags.borrow().get(key).copied().unwrap_or(false))
    }

    fn set(&mut self, key: &str) -> Result<(), StoreError> {
        self.flags.borrow_mut().insert(key.to_string(), true);
        Ok(())
    }
}


/// Flags kept as a JSON object in a file. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}


impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, bool>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}


impl DismissalStore for FileStore {
    fn get(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.load()?.get(key).copied().unwrap_or(false))
    }

    fn set(&mut self, key: &str) -> Result<(), StoreError> {
        let mut flags = self.load()?;
        flags.insert(key.to_string(), true);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&flags)?)?;
        Ok(())
    }
}


// ---------------------------------------------------------------------------
// Default gate
// ---------------------------------------------------------------------------

/// Gate backed by a primary store with a silent fallback.
pub struct StoredWelcome {
    key: String,
    primary: Box<dyn DismissalStore>,
    fallback: Box<dyn DismissalStore>,
}


impl StoredWelcome {
    pub fn new(
        key: String,
        primary: Box<dyn DismissalStore>,
        fallback: Box<dyn DismissalStore>,
    ) -> Self {
        StoredWelcome {
            key,
            primary,
            fallback,
        }
    }

    /// Gate for the page at `url`, keeping flags in memory only.
    pub fn in_memory(prefix: &str, url: &str) -> Self {
        StoredWelcome::new(
            welcome_key(prefix, url),
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
        )
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}


impl WelcomeGate for StoredWelcome {
    /// Dismissed if either store holds the flag. A primary that reads but
    /// cannot write leaves the flag only in the fallback.
    fn is_dismissed(&mut self) -> bool {
        match self.primary.get(&self.key) {
            Ok(true) => true,
            Ok(false) => self.fallback.get(&self.key).unwrap_or(false),
            Err(e) => {
                tracing::debug!(error = %e, "primary dismissal store failed; using fallback");
                self.fallback.get(&self.key).unwrap_or(false)
            }
        }
    }

    fn dismiss(&mut self) {
        if let Err(e) = self.primary.set(&self.key) {
            tracing::debug!(error = %e, "primary dismissal store failed; using fallback");
            if let Err(e) = self.fallback.set(&self.key) {
                tracing::debug!(error = %e, "fallback dismissal store failed");
            }
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Store that fails every call.
    struct Broken;

    impl DismissalStore for Broken {
        fn get(&self, _key: &str) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn set(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn hash_code_known_values() {
        assert_eq!(hash_code(""), 0);
        assert_eq!(hash_code("a"), 97);
        assert_eq!(hash_code("ab"), 97 * 31 + 98);
        assert_eq!(hash_code("hello"), 99162322);
    }

    #[test]
    fn hash_code_wraps() {
        let long = "http://example.com/some/fairly/long/path?with=query&and=more";
        // Must not panic on overflow and must be stable.
        assert_eq!(hash_code(long), hash_code(long));
    }

    #[test]
    fn welcome_key_uses_prefix_and_signed_hash() {
        assert_eq!(welcome_key("p_", "a"), "p_97");
    }

    #[test]
    fn memory_gate_round_trip() {
        let mut gate = StoredWelcome::in_memory("k_", "http://x/");
        assert!(!gate.is_dismissed());
        gate.dismiss();
        assert!(gate.is_dismissed());
    }

    #[test]
    fn broken_primary_falls_back() {
        let fallback = MemoryStore::new();
        let mut gate = StoredWelcome::new(
            "k".into(),
            Box::new(Broken),
            Box::new(fallback.clone()),
        );
        assert!(!gate.is_dismissed());
        gate.dismiss();
        assert!(fallback.get("k").unwrap());
        assert!(gate.is_dismissed());
    }

    /// Store that reads as empty but rejects writes, like a file store in
    /// a directory it cannot create.
    struct ReadOnly;

    impl DismissalStore for ReadOnly {
        fn get(&self, _key: &str) -> Result<bool, StoreError> {
            Ok(false)
        }

        fn set(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn read_only_primary_reads_back_fallback_dismissal() {
        let fallback = MemoryStore::new();
        let mut gate = StoredWelcome::new(
            "k".into(),
            Box::new(ReadOnly),
            Box::new(fallback.clone()),
        );
        assert!(!gate.is_dismissed());
        gate.dismiss();
        assert!(fallback.get("k").unwrap());
        assert!(gate.is_dismissed());
    }

    #[test]
    fn read_only_file_store_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let primary = FileStore::new(blocker.join("welcome.json"));
        let fallback = MemoryStore::new();
        let mut gate = StoredWelcome::new(
            "k".into(),
            Box::new(primary),
            Box::new(fallback.clone()),
        );
        gate.dismiss();
        assert!(gate.is_dismissed());
        assert!(fallback.get("k").unwrap());
    }

    #[test]
    fn working_primary_does_not_touch_fallback() {
        let fallback = MemoryStore::new();
        let mut gate = StoredWelcome::new(
            "k".into(),
            Box::new(MemoryStore::new()),
            Box::new(fallback.clone()),
        );
        gate.dismiss();
        assert!(gate.is_dismissed());
        assert!(!fallback.get("k").unwrap());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("welcome.json");

        let mut store = FileStore::new(&path);
        assert!(!store.get("k1").unwrap());
        store.set("k1").unwrap();

        let reopened = FileStore::new(&path);
        assert!(reopened.get("k1").unwrap());
        assert!(!reopened.get("k2").unwrap());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("welcome.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("k"), Err(StoreError::Json(_))));
    }
}
