//! Contacts - personal address book with Excel import/export
//!
//! This library keeps an ordered list of contacts, each with one or more
//! typed contact methods, persists it as a YAML snapshot, and converts it
//! to and from spreadsheet rows.
//!
//! # Features
//!
//! - Phone, email, chat and address methods (plus free-form kinds)
//! - Favorites and tab filtering
//! - Excel export with `Phone`, `Phone2`, ... columns for repeated kinds
//! - Excel import that classifies loosely-labeled headers
//! - English and Chinese column labels
//!
//! # Example
//!
//! ```no_run
//! use royalbit_contacts::codec::LabelSet;
//! use royalbit_contacts::service::ContactService;
//! use royalbit_contacts::store::FileBlobStore;
//! use royalbit_contacts::types::ContactMethod;
//!
//! let backend = FileBlobStore::new("./book");
//! let mut service = ContactService::open(Box::new(backend), LabelSet::ENGLISH)?;
//!
//! service.create("Alice", vec![ContactMethod::phone("555-0100")])?;
//! let rows = service.export_all()?;
//! println!("Rows: {}", rows.len());
//! # Ok::<(), royalbit_contacts::error::ContactsError>(())
//! ```

pub mod api;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod excel;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{ContactsError, ContactsResult};
pub use service::{Confirmation, ContactEdit, ContactService};
pub use types::{Contact, ContactMethod, MethodKind, Row, Tab};
