use thiserror::Error;

pub type ContactsResult<T> = Result<T, ContactsError>;

#[derive(Error, Debug)]
pub enum ContactsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Contact not found: {0}")]
    NotFound(String),

    #[error("Address book has no contacts to export")]
    EmptyExport,

    /// Display text stays generic; the decoder's detail is kept for logging.
    #[error("Import failed, please check that the file is a valid spreadsheet")]
    ImportDecode(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl ContactsError {
    /// Underlying cause for diagnostics, when the display text hides it
    pub fn detail(&self) -> Option<&str> {
        match self {
            ContactsError::ImportDecode(detail) => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_decode_display_is_generic() {
        let err = ContactsError::ImportDecode("zip header missing".to_string());
        assert!(!err.to_string().contains("zip"));
        assert_eq!(err.detail(), Some("zip header missing"));
    }

    #[test]
    fn test_validation_display() {
        let err = ContactsError::Validation("name is required".to_string());
        assert_eq!(err.to_string(), "Validation error: name is required");
        assert!(err.detail().is_none());
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ContactsError = io.into();
        assert!(matches!(err, ContactsError::Io(_)));
    }
}
