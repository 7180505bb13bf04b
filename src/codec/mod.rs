//! Contact ↔ spreadsheet row conversion
//!
//! - Flatten: a contact's ordered methods become labeled columns. Repeated
//!   labels get numeric suffixes (`Phone`, `Phone2`, `Phone3`, ...).
//! - Reconstruct: each column of a loosely-labeled row is classified by
//!   substring match against the canonical labels, in the fixed priority
//!   order Phone, Email, Chat, Address. The first label contained in the
//!   header wins, so `Address/Phone` is a phone and `Chat_Address` is a chat.
//!   Headers matching none become `Other` with the header as their label.
//!
//! The priority order is part of the file format: changing it would
//! reclassify columns of previously exported workbooks.

mod labels;

pub use labels::{LabelSet, Locale};

use crate::types::{Contact, ContactMethod, MethodKind, Row};

/// Name and methods recovered from one imported row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedContact {
    pub name: String,
    pub methods: Vec<ContactMethod>,
}

/// Converts between contacts and flat rows for one label set
#[derive(Debug, Clone, Default)]
pub struct MethodCodec {
    labels: LabelSet,
}

impl MethodCodec {
    pub fn new(labels: LabelSet) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Flatten a contact into a row: name column first, then one column per
    /// method in insertion order.
    pub fn flatten(&self, contact: &Contact) -> Row {
        let mut row = Row::new().with(self.labels.name, contact.name.as_str());

        for method in &contact.methods {
            let label = self.labels.label_of(&method.kind);
            let column = self.free_column(&row, label);
            row.push(column, method.value.as_str());
        }

        row
    }

    /// First unused column for `label`: the label itself, else `label2`,
    /// `label3`, ... Both name spellings count as used, since import reads
    /// them as the name.
    fn free_column(&self, row: &Row, label: &str) -> String {
        let taken = |column: &str| row.contains(column) || self.labels.is_name_key(column);
        if !taken(label) {
            return label.to_string();
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}{}", label, suffix);
            if !taken(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Rebuild name and methods from an imported row.
    ///
    /// Returns `None` when no column yields a method; such rows are skipped
    /// rather than treated as errors.
    pub fn reconstruct(&self, row: &Row) -> Option<ReconstructedContact> {
        let methods: Vec<ContactMethod> = row
            .iter()
            .filter(|(key, _)| !self.labels.is_name_key(key))
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| ContactMethod::new(self.classify(key), value.trim()))
            .collect();

        if methods.is_empty() {
            return None;
        }

        Some(ReconstructedContact {
            name: self.resolve_name(row),
            methods,
        })
    }

    /// Canonical name column, then the ASCII alias, then the placeholder
    fn resolve_name(&self, row: &Row) -> String {
        [self.labels.name, self.labels.name_alias]
            .iter()
            .filter_map(|key| row.get(key))
            .map(str::trim)
            .find(|name| !name.is_empty())
            .unwrap_or(self.labels.unknown_name)
            .to_string()
    }

    /// Classify a column header by substring containment
    pub fn classify(&self, key: &str) -> MethodKind {
        MethodKind::CANONICAL
            .iter()
            .find(|kind| key.contains(self.labels.label_of(kind)))
            .cloned()
            .unwrap_or_else(|| MethodKind::Other(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codec() -> MethodCodec {
        MethodCodec::default()
    }

    fn sorted(mut methods: Vec<ContactMethod>) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = methods
            .drain(..)
            .map(|m| (m.kind.tag().to_string(), m.value))
            .collect();
        pairs.sort();
        pairs
    }

    // =====================================================================
    // flatten
    // =====================================================================

    #[test]
    fn test_flatten_name_first_then_methods_in_order() {
        let contact = Contact::new(
            "1",
            "Alice",
            vec![
                ContactMethod::email("a@x.io"),
                ContactMethod::phone("555"),
                ContactMethod::address("1 Main St"),
            ],
        );
        let row = codec().flatten(&contact);
        let labels: Vec<&str> = row.labels().collect();
        assert_eq!(labels, vec!["Name", "Email", "Phone", "Address"]);
        assert_eq!(row.get("Name"), Some("Alice"));
        assert_eq!(row.get("Address"), Some("1 Main St"));
    }

    #[test]
    fn test_flatten_suffixes_repeated_labels() {
        let contact = Contact::new(
            "1",
            "Bob",
            vec![
                ContactMethod::phone("1"),
                ContactMethod::phone("2"),
                ContactMethod::email("e"),
                ContactMethod::phone("3"),
            ],
        );
        let row = codec().flatten(&contact);
        let labels: Vec<&str> = row.labels().collect();
        assert_eq!(labels, vec!["Name", "Phone", "Phone2", "Email", "Phone3"]);
        assert_eq!(row.get("Phone2"), Some("2"));
        assert_eq!(row.get("Phone3"), Some("3"));
    }

    #[test]
    fn test_flatten_custom_name_label_is_not_read_back_as_name() {
        let contact = Contact::new(
            "1",
            "X",
            vec![ContactMethod::new(MethodKind::Other("name".to_string()), "foo")],
        );
        let row = codec().flatten(&contact);
        let labels: Vec<&str> = row.labels().collect();
        assert_eq!(labels, vec!["Name", "name2"]);

        let rebuilt = codec().reconstruct(&row).unwrap();
        assert_eq!(rebuilt.name, "X");
        assert_eq!(rebuilt.methods.len(), 1);
        assert_eq!(rebuilt.methods[0].value, "foo");
    }

    #[test]
    fn test_flatten_probes_past_literal_suffixed_label() {
        // An imported Other method may already carry a label like "Phone2"
        let contact = Contact::new(
            "1",
            "Carol",
            vec![
                ContactMethod::new(MethodKind::Other("Phone2".to_string()), "x"),
                ContactMethod::phone("1"),
                ContactMethod::phone("2"),
            ],
        );
        let row = codec().flatten(&contact);
        let labels: Vec<&str> = row.labels().collect();
        assert_eq!(labels, vec!["Name", "Phone2", "Phone", "Phone3"]);
    }

    #[test]
    fn test_flatten_other_label_clashing_with_name_column() {
        let contact = Contact::new(
            "1",
            "Dan",
            vec![ContactMethod::new(MethodKind::Other("Name".to_string()), "nick")],
        );
        let row = codec().flatten(&contact);
        assert_eq!(row.get("Name"), Some("Dan"));
        assert_eq!(row.get("Name2"), Some("nick"));
    }

    #[test]
    fn test_flatten_without_methods_emits_only_name() {
        let contact = Contact::new("1", "Eve", vec![]);
        let row = codec().flatten(&contact);
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("Name"), Some("Eve"));
    }

    #[test]
    fn test_flatten_chinese_labels() {
        let codec = MethodCodec::new(LabelSet::CHINESE);
        let contact = Contact::new(
            "1",
            "张三",
            vec![ContactMethod::chat("zs"), ContactMethod::chat("zs2")],
        );
        let row = codec.flatten(&contact);
        let labels: Vec<&str> = row.labels().collect();
        assert_eq!(labels, vec!["姓名", "微信", "微信2"]);
    }

    // =====================================================================
    // reconstruct
    // =====================================================================

    #[test]
    fn test_reconstruct_decorated_headers() {
        let row = Row::new()
            .with("Name", "Alice")
            .with("Phone (home)", "111")
            .with("Work Email", "a@w.io")
            .with("Chat handle", "alice")
            .with("Address", "1 Main St");
        let rebuilt = codec().reconstruct(&row).unwrap();
        assert_eq!(rebuilt.name, "Alice");
        assert_eq!(
            rebuilt.methods,
            vec![
                ContactMethod::phone("111"),
                ContactMethod::email("a@w.io"),
                ContactMethod::chat("alice"),
                ContactMethod::address("1 Main St"),
            ]
        );
    }

    #[test]
    fn test_classify_priority_order() {
        let codec = codec();
        assert_eq!(codec.classify("Address/Phone"), MethodKind::Phone);
        assert_eq!(codec.classify("Chat_Address"), MethodKind::Chat);
        assert_eq!(codec.classify("Email or Phone"), MethodKind::Phone);
        assert_eq!(codec.classify("Address Email"), MethodKind::Email);
        assert_eq!(codec.classify("Phone2"), MethodKind::Phone);
    }

    #[test]
    fn test_classify_unmatched_is_other_with_header() {
        assert_eq!(
            codec().classify("Fax"),
            MethodKind::Other("Fax".to_string())
        );
        // Containment is case-sensitive
        assert_eq!(
            codec().classify("phone"),
            MethodKind::Other("phone".to_string())
        );
    }

    #[test]
    fn test_reconstruct_name_alias_and_placeholder() {
        let row = Row::new().with("name", "bob").with("Phone", "1");
        assert_eq!(codec().reconstruct(&row).unwrap().name, "bob");

        // Empty canonical name falls through to the alias
        let row = Row::new()
            .with("Name", "")
            .with("name", "bob")
            .with("Phone", "1");
        assert_eq!(codec().reconstruct(&row).unwrap().name, "bob");

        let row = Row::new().with("Phone", "1");
        assert_eq!(codec().reconstruct(&row).unwrap().name, "Unknown Name");
    }

    #[test]
    fn test_reconstruct_name_columns_never_become_methods() {
        let row = Row::new()
            .with("Name", "Alice")
            .with("name", "alice")
            .with("Email", "a@x.io");
        let rebuilt = codec().reconstruct(&row).unwrap();
        assert_eq!(rebuilt.methods, vec![ContactMethod::email("a@x.io")]);
    }

    #[test]
    fn test_reconstruct_skips_empty_cells() {
        let row = Row::new()
            .with("Name", "Alice")
            .with("Phone", "")
            .with("Email", "   ")
            .with("Chat", "al");
        let rebuilt = codec().reconstruct(&row).unwrap();
        assert_eq!(rebuilt.methods, vec![ContactMethod::chat("al")]);
    }

    #[test]
    fn test_reconstruct_no_methods_is_none() {
        let row = Row::new().with("Name", "Alice").with("Phone", "");
        assert!(codec().reconstruct(&row).is_none());
        assert!(codec().reconstruct(&Row::new()).is_none());
    }

    #[test]
    fn test_reconstruct_chinese_headers() {
        let codec = MethodCodec::new(LabelSet::CHINESE);
        let row = Row::new()
            .with("姓名", "李四")
            .with("电话", "138")
            .with("微信号", "lisi")
            .with("备注", "friend");
        let rebuilt = codec.reconstruct(&row).unwrap();
        assert_eq!(rebuilt.name, "李四");
        assert_eq!(
            rebuilt.methods,
            vec![
                ContactMethod::phone("138"),
                ContactMethod::chat("lisi"),
                ContactMethod::new(MethodKind::Other("备注".to_string()), "friend"),
            ]
        );
    }

    // =====================================================================
    // round trip
    // =====================================================================

    #[test]
    fn test_round_trip_preserves_name_and_method_multiset() {
        let methods = vec![
            ContactMethod::phone("1"),
            ContactMethod::phone("2"),
            ContactMethod::email("e"),
        ];
        let contact = Contact::new("1", "N", methods.clone());

        let codec = codec();
        let rebuilt = codec.reconstruct(&codec.flatten(&contact)).unwrap();
        assert_eq!(rebuilt.name, "N");
        assert_eq!(sorted(rebuilt.methods), sorted(methods));
    }

    #[test]
    fn test_round_trip_every_canonical_kind_twice() {
        let methods: Vec<ContactMethod> = MethodKind::CANONICAL
            .iter()
            .flat_map(|kind| {
                vec![
                    ContactMethod::new(kind.clone(), format!("{}-a", kind)),
                    ContactMethod::new(kind.clone(), format!("{}-b", kind)),
                ]
            })
            .collect();
        let contact = Contact::new("1", "All Kinds", methods.clone());

        for labels in [LabelSet::ENGLISH, LabelSet::CHINESE] {
            let codec = MethodCodec::new(labels);
            let rebuilt = codec.reconstruct(&codec.flatten(&contact)).unwrap();
            assert_eq!(rebuilt.methods, methods);
        }
    }
}
