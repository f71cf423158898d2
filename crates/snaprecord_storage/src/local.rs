//! File-based storage adapter.

use crate::adapter::StorageAdapter;
use crate::error::StorageResult;
use snaprecord_codec::{Attributes, Format};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file-based storage adapter.
///
/// Each collection lives in one file at `<source>.<extension>`. Reads decode
/// the whole file; writes encode the whole collection and replace the file.
///
/// # Durability
///
/// Writes go to a sibling temporary file which is synced and then renamed
/// over the target, so a reader never sees a half-written collection. There
/// is no locking: two processes saving at once race, and the last rename
/// wins.
///
/// # Example
///
/// ```no_run
/// use snaprecord_codec::{Attributes, Format};
/// use snaprecord_storage::{LocalStore, StorageAdapter};
///
/// let store = LocalStore::new(Format::Json);
/// let path = store.locate("data/posts");
/// store.write(&path, &[Attributes::new()]).unwrap();
/// assert_eq!(store.read(&path).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    format: Format,
}

impl LocalStore {
    /// Creates a local store using the given encoding.
    #[must_use]
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    /// Returns the encoding used for files.
    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn replace(path: &Path, data: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = Self::temp_path(path);
        let result = (|| {
            let mut file = File::create(&temp_path)?;
            file.write_all(data)?;
            file.sync_all()?;
            drop(file);
            fs::rename(&temp_path, path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

impl StorageAdapter for LocalStore {
    fn read(&self, source: &str) -> StorageResult<Vec<Attributes>> {
        let data = match fs::read(source) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(source, "source file missing, reading empty collection");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(self.format.decode(&data)?)
    }

    fn write(&self, source: &str, collection: &[Attributes]) -> StorageResult<()> {
        let data = self.format.encode(collection)?;
        Self::replace(Path::new(source), &data)?;
        debug!(source, records = collection.len(), bytes = data.len(), "wrote collection");
        Ok(())
    }

    fn locate(&self, source: &str) -> String {
        format!("{}.{}", source, self.format.extension())
    }
}
