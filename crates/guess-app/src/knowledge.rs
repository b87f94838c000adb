use anyhow::{Context, Result};
use guess_core::model::catalog::Catalog;
use guess_core::model::serialization::CatalogSnapshot;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Durable storage for the entity/question catalog.
///
/// The store never lets a broken knowledge file take the game down: a
/// missing file is seeded from the supplied default, and an unreadable or
/// unparseable one falls back to the default with a warning.
pub struct KnowledgeStore {
    path: PathBuf,
}

impl KnowledgeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog, substituting `default` when no usable file
    /// exists. Only seeding a brand-new file can fail (on write).
    pub fn load_or_default(&self, default: impl FnOnce() -> Catalog) -> Result<Catalog> {
        if !self.path.exists() {
            let catalog = default();
            self.save(&catalog)
                .context("seeding default knowledge file")?;
            return Ok(catalog);
        }

        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    %error,
                    "knowledge file unreadable; using built-in defaults"
                );
                println!("Warning: could not read the knowledge file; starting from defaults.");
                return Ok(default());
            }
        };

        match CatalogSnapshot::from_json(&json) {
            Ok(snapshot) => Ok(snapshot.restore()),
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    %error,
                    "knowledge file malformed; using built-in defaults"
                );
                println!("Warning: the knowledge file is malformed; starting from defaults.");
                Ok(default())
            }
        }
    }

    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        let json = CatalogSnapshot::to_json(catalog).context("serializing knowledge catalog")?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing knowledge file at {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::KnowledgeStore;
    use guess_core::model::starter::starter_catalog;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_seeded_from_the_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("knowledge.json");
        let store = KnowledgeStore::new(&path);

        let catalog = store
            .load_or_default(starter_catalog)
            .expect("load succeeds");
        assert_eq!(catalog.entity_count(), 5);
        assert!(path.exists(), "default knowledge not written");
    }

    #[test]
    fn roundtrip_preserves_the_catalog() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("knowledge.json");
        let store = KnowledgeStore::new(&path);

        let mut catalog = starter_catalog();
        catalog.set_attribute("Dog", "q1", 0.9);
        store.save(&catalog).expect("save succeeds");

        let reloaded = store
            .load_or_default(|| panic!("default should not be needed"))
            .expect("load succeeds");
        assert_eq!(reloaded.entity("Dog").unwrap().attribute("q1"), Some(0.9));
        assert_eq!(reloaded.question_count(), 8);
    }

    #[test]
    fn malformed_file_falls_back_to_the_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("knowledge.json");
        fs::write(&path, "{ not json").expect("write garbage");

        let store = KnowledgeStore::new(&path);
        let catalog = store
            .load_or_default(starter_catalog)
            .expect("fallback, not failure");
        assert_eq!(catalog.entity_count(), 5);
    }
}
