use serde::Serialize;
use tracing::{debug, info, trace};

pub mod error;
pub mod filter;
pub mod render;
pub mod store;

pub use error::InventoryError;
pub use filter::PublisherFilter;
pub use store::{RegistryStore, SystemRegistry, UNINSTALL_PATH};
#[cfg(any(test, feature = "test-support"))]
pub use store::MemoryRegistry;

/// One installed application as registered under the uninstall key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoftwareRecord {
    name: String,
    version: Option<String>,
    publisher: Option<String>,
    description: Option<String>,
}

impl SoftwareRecord {
    /// Returns `None` when `name` is empty; such entries are patches or
    /// components rather than applications.
    pub fn new(
        name: impl Into<String>,
        version: Option<String>,
        publisher: Option<String>,
        description: Option<String>,
    ) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            version,
            publisher,
            description,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Registry value names read from each uninstall entry.
pub mod values {
    pub const DISPLAY_NAME: &str = "DisplayName";
    pub const DISPLAY_VERSION: &str = "DisplayVersion";
    pub const PUBLISHER: &str = "Publisher";
    pub const DESCRIPTION: &str = "Description";
}

/// Reads every application registered under [`UNINSTALL_PATH`] and keeps the
/// ones accepted by `filter`.
pub fn collect_installed_software<S: RegistryStore>(
    store: &S,
    filter: &PublisherFilter,
) -> Result<Vec<SoftwareRecord>, InventoryError> {
    collect_from(store, UNINSTALL_PATH, filter)
}

/// Same as [`collect_installed_software`] for an arbitrary uninstall-style key.
///
/// Failing to open `path` is fatal. Failures on individual entries are not:
/// the registry can change under us while we enumerate, so an entry that
/// cannot be opened or has no name is skipped and enumeration carries on.
pub fn collect_from<S: RegistryStore>(
    store: &S,
    path: &str,
    filter: &PublisherFilter,
) -> Result<Vec<SoftwareRecord>, InventoryError> {
    let root = store.open(path).map_err(|source| InventoryError::OpenRoot {
        path: path.to_string(),
        source,
    })?;

    let names = store.subkey_names(&root);
    let mut records = Vec::new();

    for name in &names {
        let Some(record) = read_entry(store, &root, name) else {
            continue;
        };

        if filter.accepts(record.publisher()) {
            records.push(record);
        } else {
            trace!(entry = %name, publisher = ?record.publisher(), "rejected by publisher filter");
        }
    }

    info!(
        path,
        entries = names.len(),
        kept = records.len(),
        "uninstall key enumerated"
    );
    Ok(records)
}

fn read_entry<S: RegistryStore>(store: &S, root: &S::Key, name: &str) -> Option<SoftwareRecord> {
    let subkey = match store.open_subkey(root, name) {
        Ok(subkey) => subkey,
        Err(e) => {
            debug!(entry = %name, error = %e, "skipping entry that could not be opened");
            return None;
        }
    };

    let display_name = match store.read_string(&subkey, values::DISPLAY_NAME) {
        Ok(display_name) => display_name,
        Err(e) => {
            debug!(entry = %name, error = %e, "skipping entry without a display name");
            return None;
        }
    };

    let optional = |value: &str| match store.read_string(&subkey, value) {
        Ok(data) => Some(data),
        Err(e) => {
            trace!(entry = %name, value, error = %e, "optional value not readable");
            None
        }
    };

    let record = SoftwareRecord::new(
        display_name,
        optional(values::DISPLAY_VERSION),
        optional(values::PUBLISHER),
        optional(values::DESCRIPTION),
    );
    if record.is_none() {
        debug!(entry = %name, "skipping entry with an empty display name");
    }
    record
}
