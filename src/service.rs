//! Address book operations
//!
//! Every user action maps to one `ContactService` call. The service owns the
//! store; callers own the service and pass it by reference.

use crate::codec::{LabelSet, MethodCodec};
use crate::error::{ContactsError, ContactsResult};
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::store::{BlobStore, ContactStore};
use crate::types::{Contact, ContactMethod, Row, Tab};
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Field-level edit. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactEdit {
    pub name: Option<String>,
    pub methods: Option<Vec<ContactMethod>>,
}

impl ContactEdit {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn methods(mut self, methods: Vec<ContactMethod>) -> Self {
        self.methods = Some(methods);
        self
    }
}

/// Proof that the user confirmed a destructive action. Front ends create it
/// only after asking.
#[derive(Debug, Clone, Copy)]
pub struct Confirmation(());

impl Confirmation {
    pub fn confirmed() -> Self {
        Confirmation(())
    }
}

pub struct ContactService {
    store: ContactStore,
    codec: MethodCodec,
}

impl ContactService {
    pub fn new(store: ContactStore, labels: LabelSet) -> Self {
        Self {
            store,
            codec: MethodCodec::new(labels),
        }
    }

    /// Load the store from `backend` and wrap it in a service
    pub fn open(backend: Box<dyn BlobStore>, labels: LabelSet) -> ContactsResult<Self> {
        Ok(Self::new(ContactStore::load(backend)?, labels))
    }

    pub fn labels(&self) -> &LabelSet {
        self.codec.labels()
    }

    pub fn contacts(&self) -> &[Contact] {
        self.store.contacts()
    }

    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    //--------------------------------------------------------------------------
    // Mutations
    //--------------------------------------------------------------------------

    /// Add a contact. Methods with blank values are dropped first.
    pub fn create(&mut self, name: &str, methods: Vec<ContactMethod>) -> ContactsResult<Contact> {
        let name = validate_name(name)?;
        let methods = validate_methods(methods)?;

        let contact = Contact::new(self.fresh_id(&[]), name, methods);
        let created = contact.clone();
        self.store.mutate(|contacts| contacts.push(contact))?;

        debug!(id = %created.id, "created contact");
        Ok(created)
    }

    /// Merge supplied fields over an existing contact. Id and favorite flag
    /// are always kept.
    pub fn edit(&mut self, id: &str, edit: ContactEdit) -> ContactsResult<Contact> {
        if !self.store.contains(id) {
            return Err(ContactsError::NotFound(id.to_string()));
        }
        let name = edit.name.as_deref().map(validate_name).transpose()?;
        let methods = edit.methods.map(validate_methods).transpose()?;

        let updated = self.store.mutate(|contacts| {
            let contact = contacts.iter_mut().find(|c| c.id == id)?;
            if let Some(name) = name {
                contact.name = name;
            }
            if let Some(methods) = methods {
                contact.methods = methods;
            }
            Some(contact.clone())
        })?;

        debug!(id, "edited contact");
        updated.ok_or_else(|| ContactsError::NotFound(id.to_string()))
    }

    /// Remove a contact. Returns whether anything was removed; an unknown id
    /// is a no-op.
    pub fn delete(&mut self, id: &str, _confirmed: Confirmation) -> ContactsResult<bool> {
        if !self.store.contains(id) {
            return Ok(false);
        }
        self.store.mutate(|contacts| contacts.retain(|c| c.id != id))?;
        debug!(id, "deleted contact");
        Ok(true)
    }

    /// Flip the favorite flag. Returns the new state, or `None` (and leaves
    /// the store untouched) for an unknown id.
    pub fn toggle_favorite(&mut self, id: &str) -> ContactsResult<Option<bool>> {
        if !self.store.contains(id) {
            return Ok(None);
        }
        self.store.mutate(|contacts| {
            contacts.iter_mut().find(|c| c.id == id).map(|contact| {
                contact.is_favorite = !contact.is_favorite;
                contact.is_favorite
            })
        })
    }

    //--------------------------------------------------------------------------
    // Queries
    //--------------------------------------------------------------------------

    /// Contacts visible under `tab`, in store order
    pub fn filter(&self, tab: Tab) -> Vec<&Contact> {
        self.store
            .contacts()
            .iter()
            .filter(|c| tab.includes(c))
            .collect()
    }

    //--------------------------------------------------------------------------
    // Export / Import
    //--------------------------------------------------------------------------

    /// Flatten every contact into a row
    pub fn export_all(&self) -> ContactsResult<Vec<Row>> {
        if self.store.is_empty() {
            return Err(ContactsError::EmptyExport);
        }
        Ok(self
            .store
            .contacts()
            .iter()
            .map(|c| self.codec.flatten(c))
            .collect())
    }

    /// Export as .xlsx bytes
    pub fn export_workbook(&self) -> ContactsResult<Vec<u8>> {
        let rows = self.export_all()?;
        self.exporter().to_bytes(&rows)
    }

    /// Export as an .xlsx file
    pub fn export_to_file(&self, path: &Path) -> ContactsResult<()> {
        let rows = self.export_all()?;
        self.exporter().export(&rows, path)?;
        info!(path = %path.display(), contacts = rows.len(), "exported contacts");
        Ok(())
    }

    fn exporter(&self) -> ExcelExporter {
        ExcelExporter::new(self.labels().sheet_name)
    }

    /// Append one contact per row that yields at least one method. Rows
    /// without methods are skipped silently. Returns the number added.
    pub fn import_rows(&mut self, rows: &[Row]) -> ContactsResult<usize> {
        let mut imported: Vec<Contact> = Vec::new();
        for row in rows {
            if let Some(rebuilt) = self.codec.reconstruct(row) {
                let id = self.fresh_id(&imported);
                imported.push(Contact::new(id, rebuilt.name, rebuilt.methods));
            }
        }

        let count = imported.len();
        if count > 0 {
            self.store.mutate(|contacts| contacts.extend(imported))?;
        }
        info!(rows = rows.len(), imported = count, "imported contacts");
        Ok(count)
    }

    /// Decode workbook bytes and import their rows. A decode failure adds
    /// nothing.
    pub fn import_workbook(&mut self, bytes: Vec<u8>) -> ContactsResult<usize> {
        let rows = ExcelImporter::read_bytes(bytes).inspect_err(|e| {
            if let Some(detail) = e.detail() {
                warn!(detail, "spreadsheet import failed");
            }
        })?;
        self.import_rows(&rows)
    }

    /// A v4 UUID not used by the store or by `pending`
    fn fresh_id(&self, pending: &[Contact]) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.store.contains(&id) && !pending.iter().any(|c| c.id == id) {
                return id;
            }
        }
    }
}

fn validate_name(name: &str) -> ContactsResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ContactsError::Validation(
            "Contact name is required".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn validate_methods(methods: Vec<ContactMethod>) -> ContactsResult<Vec<ContactMethod>> {
    let methods: Vec<ContactMethod> = methods
        .into_iter()
        .filter(ContactMethod::has_value)
        .map(|mut m| {
            m.value = m.value.trim().to_string();
            m
        })
        .collect();
    if methods.is_empty() {
        return Err(ContactsError::Validation(
            "At least one contact method is required".to_string(),
        ));
    }
    Ok(methods)
}
