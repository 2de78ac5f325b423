use std::cell::Cell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

use super::RegistryStore;

#[derive(Debug, Default)]
struct Node {
    /// Display-cased child names, in insertion order.
    children: Vec<String>,
    values: Vec<(String, String)>,
    denied: bool,
}

#[derive(Debug, Default)]
struct Counters {
    open: Cell<usize>,
    operations: Cell<usize>,
}

/// In-memory registry tree.
///
/// Paths use `\` as separator and are matched case-insensitively, like the
/// real registry. Subkeys enumerate in insertion order. The store counts open
/// handles and operations so callers can check that a run released every key
/// it opened, or never touched the store at all.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    nodes: HashMap<String, Node>,
    counters: Rc<Counters>,
}

/// Handle to a key of a [`MemoryRegistry`].
#[derive(Debug)]
pub struct MemoryKey {
    path: String,
    counters: Rc<Counters>,
}

impl Drop for MemoryKey {
    fn drop(&mut self) {
        self.counters.open.set(self.counters.open.get() - 1);
    }
}

fn normalize(path: &str) -> String {
    path.split('\\')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\\")
        .to_lowercase()
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        normalize(name)
    } else {
        format!("{parent}\\{}", normalize(name))
    }
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `path` and any missing parents.
    pub fn insert_key(&mut self, path: &str) {
        let mut current = String::new();
        for part in path.split('\\').filter(|part| !part.is_empty()) {
            let next = join(&current, part);
            if !self.nodes.contains_key(&next) {
                self.nodes.insert(next.clone(), Node::default());
                if !current.is_empty() {
                    self.node_mut(&current).children.push(part.to_string());
                }
            }
            current = next;
        }
    }

    /// Sets a string value on `path`, creating the key if needed.
    pub fn insert_value(&mut self, path: &str, name: &str, data: &str) {
        self.insert_key(path);
        let node = self.node_mut(&normalize(path));
        let existing = node
            .values
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name));
        match existing {
            Some(index) => node.values[index].1 = data.to_string(),
            None => node.values.push((name.to_string(), data.to_string())),
        }
    }

    /// Makes opening `path` fail with `PermissionDenied`. The key still shows
    /// up when its parent is enumerated.
    pub fn deny(&mut self, path: &str) {
        self.insert_key(path);
        self.node_mut(&normalize(path)).denied = true;
    }

    /// Lists `name` under `parent` without creating it, as if it was deleted
    /// between enumeration and open.
    pub fn insert_vanished_subkey(&mut self, parent: &str, name: &str) {
        self.insert_key(parent);
        self.node_mut(&normalize(parent))
            .children
            .push(name.to_string());
    }

    /// Number of keys currently open.
    pub fn open_handles(&self) -> usize {
        self.counters.open.get()
    }

    /// Number of store calls made so far.
    pub fn operations(&self) -> usize {
        self.counters.operations.get()
    }

    fn node_mut(&mut self, normalized: &str) -> &mut Node {
        self.nodes.entry(normalized.to_string()).or_default()
    }

    fn node(&self, key: &MemoryKey) -> Option<&Node> {
        self.nodes.get(&key.path)
    }

    fn count(&self) {
        self.counters
            .operations
            .set(self.counters.operations.get() + 1);
    }

    fn open_normalized(&self, path: String) -> io::Result<MemoryKey> {
        match self.nodes.get(&path) {
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("key not found: {path}"),
            )),
            Some(node) if node.denied => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("access denied: {path}"),
            )),
            Some(_) => {
                self.counters.open.set(self.counters.open.get() + 1);
                Ok(MemoryKey {
                    path,
                    counters: Rc::clone(&self.counters),
                })
            }
        }
    }
}

impl RegistryStore for MemoryRegistry {
    type Key = MemoryKey;

    fn open(&self, path: &str) -> io::Result<MemoryKey> {
        self.count();
        self.open_normalized(normalize(path))
    }

    fn subkey_names(&self, key: &MemoryKey) -> Vec<String> {
        self.count();
        self.node(key)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn open_subkey(&self, parent: &MemoryKey, name: &str) -> io::Result<MemoryKey> {
        self.count();
        self.open_normalized(join(&parent.path, name))
    }

    fn read_string(&self, key: &MemoryKey, value: &str) -> io::Result<String> {
        self.count();
        self.node(key)
            .and_then(|node| {
                node.values
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(value))
            })
            .map(|(_, data)| data.clone())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("value not found: {value}"))
            })
    }
}
