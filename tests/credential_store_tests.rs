//! Tests for the credential persistence capability.

#[cfg(test)]
mod credential_store_tests {
    use std::path::PathBuf;

    use tagsmith::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tagsmith-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.load().expect("load should succeed"), None);
    }

    #[test]
    fn test_memory_store_save_then_load() {
        let store = MemoryCredentialStore::new();
        store
            .save(&Credential::new("test-key"))
            .expect("save should succeed");
        assert_eq!(
            store.load().expect("load should succeed"),
            Some(Credential::new("test-key"))
        );
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let store = FileCredentialStore::new(temp_path("missing"));
        assert_eq!(store.load().expect("load should succeed"), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("round-trip");
        let store = FileCredentialStore::new(&path);

        store
            .save(&Credential::new("file-key-123"))
            .expect("save should succeed");
        assert_eq!(
            store.load().expect("load should succeed"),
            Some(Credential::new("file-key-123"))
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_trims_whitespace() {
        let path = temp_path("trims");
        std::fs::write(&path, "  spaced-key \n").expect("write should succeed");

        let store = FileCredentialStore::new(&path);
        assert_eq!(
            store.load().expect("load should succeed"),
            Some(Credential::new("spaced-key"))
        );

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_empty_file_is_none() {
        let path = temp_path("empty");
        std::fs::write(&path, "\n").expect("write should succeed");

        let store = FileCredentialStore::new(&path);
        assert_eq!(store.load().expect("load should succeed"), None);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_overwrites_on_save() {
        let path = temp_path("overwrite");
        let store = FileCredentialStore::new(&path);

        store
            .save(&Credential::new("old-key"))
            .expect("save should succeed");
        store
            .save(&Credential::new("new-key"))
            .expect("save should succeed");
        assert_eq!(
            store.load().expect("load should succeed"),
            Some(Credential::new("new-key"))
        );

        let _ = std::fs::remove_file(&path);
    }
}
