use std::io;

use tracing::debug;
use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ};
use winreg::RegKey;

use super::RegistryStore;

/// The live registry, rooted at `HKEY_LOCAL_MACHINE`. Keys are opened
/// read-only.
pub struct SystemRegistry {
    root: RegKey,
}

impl SystemRegistry {
    pub fn new() -> Self {
        Self {
            root: RegKey::predef(HKEY_LOCAL_MACHINE),
        }
    }
}

impl Default for SystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryStore for SystemRegistry {
    type Key = RegKey;

    fn open(&self, path: &str) -> io::Result<RegKey> {
        self.root.open_subkey_with_flags(path, KEY_READ)
    }

    fn subkey_names(&self, key: &RegKey) -> Vec<String> {
        key.enum_keys()
            .filter_map(|name| match name {
                Ok(name) => Some(name),
                Err(e) => {
                    debug!(error = %e, "failed to enumerate subkey");
                    None
                }
            })
            .collect()
    }

    fn open_subkey(&self, parent: &RegKey, name: &str) -> io::Result<RegKey> {
        parent.open_subkey_with_flags(name, KEY_READ)
    }

    fn read_string(&self, key: &RegKey, value: &str) -> io::Result<String> {
        key.get_value::<String, _>(value)
    }
}
