use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::{self, LoadError};
use super::model::{ColumnMap, RecordTable};

// ---------------------------------------------------------------------------
// TableCache – one-entry load cache keyed by path and modification time
// ---------------------------------------------------------------------------

/// Owns the most recently loaded table and serves it back for repeated
/// opens of the same unchanged file. Path or mtime mismatch forces a
/// reload, so a stale table is never handed out.
#[derive(Default)]
pub struct TableCache {
    entry: Option<CacheEntry>,
}

struct CacheEntry {
    path: PathBuf,
    modified: Option<SystemTime>,
    table: Arc<RecordTable>,
}

impl TableCache {
    /// Return the table for `path`, loading it unless the cached entry is
    /// still current.
    pub fn get_or_load(
        &mut self,
        path: &Path,
        columns: &ColumnMap,
    ) -> Result<Arc<RecordTable>, LoadError> {
        let modified = mtime(path);

        if let Some(entry) = &self.entry {
            // A file whose mtime cannot be read is never considered fresh.
            if entry.path == path && entry.modified.is_some() && entry.modified == modified {
                log::debug!("cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.table));
            }
        }

        let table = Arc::new(loader::load_file(path, columns)?);
        log::info!(
            "Loaded {} rows from {} ({} countries, {} industries)",
            table.len(),
            path.display(),
            table.countries.len(),
            table.industries.len()
        );
        self.entry = Some(CacheEntry {
            path: path.to_path_buf(),
            modified,
            table: Arc::clone(&table),
        });
        Ok(table)
    }

    /// Drop the cached entry, forcing the next open to hit the disk.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Own subdirectory so the loader's columns.json lookup cannot pick up
    // stray files from the shared temp dir.
    fn temp_csv(name: &str, body: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("wealthboard_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn unchanged_file_is_served_from_cache() {
        let path = temp_csv(
            "wealthboard_cache_hit.csv",
            "country_of_residence,industry,gender,wealth\nUS,Tech,M,1.5\n",
        );
        let mut cache = TableCache::default();
        let cols = ColumnMap::default();

        let a = cache.get_or_load(&path, &cols).unwrap();
        let b = cache.get_or_load(&path, &cols).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn modified_file_is_reloaded() {
        let path = temp_csv(
            "wealthboard_cache_stale.csv",
            "country_of_residence,industry,gender,wealth\nUS,Tech,M,1.5\n",
        );
        let mut cache = TableCache::default();
        let cols = ColumnMap::default();

        let a = cache.get_or_load(&path, &cols).unwrap();
        assert_eq!(a.len(), 1);

        // Sleep past mtime granularity (1s on some filesystems), then
        // rewrite with an extra row.
        std::thread::sleep(std::time::Duration::from_secs(1));
        std::fs::write(
            &path,
            "country_of_residence,industry,gender,wealth\nUS,Tech,M,1.5\nDE,Finance,F,2.0\n",
        )
        .unwrap();

        let b = cache.get_or_load(&path, &cols).unwrap();
        assert_eq!(b.len(), 2);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn clear_forces_a_reload() {
        let path = temp_csv(
            "wealthboard_cache_clear.csv",
            "country_of_residence,industry,gender,wealth\nUS,Tech,M,1.5\n",
        );
        let mut cache = TableCache::default();
        let cols = ColumnMap::default();

        let a = cache.get_or_load(&path, &cols).unwrap();
        cache.clear();
        let b = cache.get_or_load(&path, &cols).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), b.len());

        std::fs::remove_file(&path).unwrap();
    }
}
