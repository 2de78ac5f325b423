//! Read-only access to a hierarchical key/value store shaped like the
//! Windows registry.
//!
//! The reader only needs four operations, so it is written against
//! [`RegistryStore`] and can run against the live registry
//! ([`SystemRegistry`]) or, with the `test-support` feature, an in-memory
//! tree (`MemoryRegistry`).

use std::io;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
#[cfg(windows)]
pub mod windows;
#[cfg(not(windows))]
pub mod unsupported;

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryRegistry;
#[cfg(windows)]
pub use windows::SystemRegistry;
#[cfg(not(windows))]
pub use unsupported::SystemRegistry;

/// Uninstall registrations of 32-bit applications, under `HKEY_LOCAL_MACHINE`.
pub const UNINSTALL_PATH: &str = r"SOFTWARE\WOW6432Node\Microsoft\Windows\CurrentVersion\Uninstall";

pub trait RegistryStore {
    /// An open key. Dropping it closes the underlying handle.
    type Key;

    fn open(&self, path: &str) -> io::Result<Self::Key>;

    /// Names of the direct subkeys of `key`, in the order the store reports
    /// them. Names that fail to enumerate are left out.
    fn subkey_names(&self, key: &Self::Key) -> Vec<String>;

    fn open_subkey(&self, parent: &Self::Key, name: &str) -> io::Result<Self::Key>;

    /// Reads a string value. Missing values and values of another type are
    /// errors.
    fn read_string(&self, key: &Self::Key, value: &str) -> io::Result<String>;
}
