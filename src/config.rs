//! Runtime configuration shared by the CLI and the API server

use crate::codec::{LabelSet, Locale};
use crate::error::ContactsResult;
use crate::service::ContactService;
use crate::store::FileBlobStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Where the address book lives and which labels it speaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactsConfig {
    pub store_dir: PathBuf,
    pub locale: Locale,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            locale: Locale::default(),
        }
    }
}

impl ContactsConfig {
    pub fn new(store_dir: Option<PathBuf>, locale: Locale) -> Self {
        Self {
            store_dir: store_dir.unwrap_or_else(default_store_dir),
            locale,
        }
    }

    pub fn labels(&self) -> LabelSet {
        LabelSet::for_locale(self.locale)
    }

    /// Load the address book from `store_dir`
    pub fn open_service(&self) -> ContactsResult<ContactService> {
        let backend = FileBlobStore::new(&self.store_dir);
        ContactService::open(Box::new(backend), self.labels())
    }
}

/// Platform data directory, or the working directory when none exists
pub fn default_store_dir() -> PathBuf {
    ProjectDirs::from("ca", "royalbit", "contacts")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Install the global tracing subscriber (stderr). `RUST_LOG` overrides
/// `default_filter`. Calling it twice is harmless.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
