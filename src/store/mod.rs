//! Contact persistence
//!
//! The whole address book is one YAML snapshot under a fixed key, loaded
//! once and rewritten after every mutation.

mod blob;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};

use crate::error::ContactsResult;
use crate::types::Contact;
use tracing::debug;

/// Key the snapshot is stored under
pub const STORE_KEY: &str = "contacts";

/// Ordered in-memory contacts backed by a blob store
pub struct ContactStore {
    contacts: Vec<Contact>,
    backend: Box<dyn BlobStore>,
}

impl ContactStore {
    /// Load the snapshot. A missing or blank blob is an empty address book.
    pub fn load(backend: Box<dyn BlobStore>) -> ContactsResult<Self> {
        let contacts: Vec<Contact> = match backend.read(STORE_KEY)? {
            Some(text) if !text.trim().is_empty() => serde_yaml::from_str(&text)?,
            _ => Vec::new(),
        };
        debug!(count = contacts.len(), "loaded contacts");
        Ok(Self { contacts, backend })
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Apply `f` and persist the result. If persisting fails the contacts
    /// are restored to their state before `f` ran.
    pub fn mutate<T>(&mut self, f: impl FnOnce(&mut Vec<Contact>) -> T) -> ContactsResult<T> {
        let snapshot = self.contacts.clone();
        let out = f(&mut self.contacts);
        if let Err(e) = self.persist() {
            self.contacts = snapshot;
            return Err(e);
        }
        Ok(out)
    }

    fn persist(&mut self) -> ContactsResult<()> {
        let yaml = serde_yaml::to_string(&self.contacts)?;
        self.backend.write(STORE_KEY, &yaml)?;
        debug!(count = self.contacts.len(), "saved contacts");
        Ok(())
    }
}

impl std::fmt::Debug for ContactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactStore")
            .field("contacts", &self.contacts)
            .finish_non_exhaustive()
    }
}
