use std::io;

use super::RegistryStore;

/// Stand-in for the live registry on hosts that do not have one. Every open
/// fails, so a run ends at the usual "cannot open" error.
#[derive(Debug, Default)]
pub struct SystemRegistry;

/// Never constructed: [`SystemRegistry::open`] always fails.
pub enum NoKey {}

impl SystemRegistry {
    pub fn new() -> Self {
        Self
    }
}

impl RegistryStore for SystemRegistry {
    type Key = NoKey;

    fn open(&self, _path: &str) -> io::Result<NoKey> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "the Windows registry is not available on this platform",
        ))
    }

    fn subkey_names(&self, key: &NoKey) -> Vec<String> {
        match *key {}
    }

    fn open_subkey(&self, parent: &NoKey, _name: &str) -> io::Result<NoKey> {
        match *parent {}
    }

    fn read_string(&self, key: &NoKey, _value: &str) -> io::Result<String> {
        match *key {}
    }
}
