use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

//==============================================================================
// Contact Methods
//==============================================================================

/// Kind of a contact method
///
/// Persisted as a lowercase tag (`phone`, `email`, `chat`, `address`).
/// `Other` kinds are persisted as `other:<label>` so a label that spells a
/// canonical tag still loads as `Other`. Unprefixed tags go through the
/// lenient [`MethodKind::parse`], which also reads older address books.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MethodKind {
    Phone,
    Email,
    Chat,
    Address,
    /// Non-canonical kind, carrying its own label
    Other(String),
}

impl MethodKind {
    /// Canonical kinds in classification priority order
    pub const CANONICAL: [MethodKind; 4] = [
        MethodKind::Phone,
        MethodKind::Email,
        MethodKind::Chat,
        MethodKind::Address,
    ];

    /// Storage tag for this kind
    pub fn tag(&self) -> &str {
        match self {
            MethodKind::Phone => "phone",
            MethodKind::Email => "email",
            MethodKind::Chat => "chat",
            MethodKind::Address => "address",
            MethodKind::Other(label) => label,
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, MethodKind::Other(_))
    }

    /// Lenient tag parse for user input and legacy stores: case-insensitive,
    /// `wechat` is a chat, anything unrecognised is `Other`.
    pub fn parse(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "phone" => MethodKind::Phone,
            "email" => MethodKind::Email,
            // "wechat" is the tag older address books were saved with
            "chat" | "wechat" => MethodKind::Chat,
            "address" => MethodKind::Address,
            _ => MethodKind::Other(tag.to_string()),
        }
    }
}

/// Storage prefix for `Other` kinds
const OTHER_PREFIX: &str = "other:";

impl From<String> for MethodKind {
    fn from(tag: String) -> Self {
        match tag.strip_prefix(OTHER_PREFIX) {
            Some(label) => MethodKind::Other(label.to_string()),
            None => MethodKind::parse(&tag),
        }
    }
}

impl From<MethodKind> for String {
    fn from(kind: MethodKind) -> Self {
        match kind {
            MethodKind::Other(label) => format!("{}{}", OTHER_PREFIX, label),
            canonical => canonical.tag().to_string(),
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One typed way to reach a contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMethod {
    #[serde(rename = "type")]
    pub kind: MethodKind,
    pub value: String,
}

impl ContactMethod {
    pub fn new(kind: MethodKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn phone(value: impl Into<String>) -> Self {
        Self::new(MethodKind::Phone, value)
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self::new(MethodKind::Email, value)
    }

    pub fn chat(value: impl Into<String>) -> Self {
        Self::new(MethodKind::Chat, value)
    }

    pub fn address(value: impl Into<String>) -> Self {
        Self::new(MethodKind::Address, value)
    }

    /// True when the value holds something other than whitespace
    pub fn has_value(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

/// Parses `kind:value`, e.g. `phone:555-0100` or `email:a@b.c`
impl FromStr for ContactMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected kind:value, got '{}'", s))?;
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(format!("Missing method kind in '{}'", s));
        }
        Ok(ContactMethod::new(
            MethodKind::parse(kind),
            value.trim(),
        ))
    }
}

//==============================================================================
// Contacts
//==============================================================================

/// A contact with one or more methods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub methods: Vec<ContactMethod>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Contact {
    pub fn new(id: impl Into<String>, name: impl Into<String>, methods: Vec<ContactMethod>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            methods,
            is_favorite: false,
        }
    }
}

/// View filter for listing contacts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    All,
    Favorite,
}

impl Tab {
    /// Lenient parse: anything other than `favorite` is `All`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "favorite" | "favorites" => Tab::Favorite,
            _ => Tab::All,
        }
    }

    pub fn includes(&self, contact: &Contact) -> bool {
        match self {
            Tab::All => true,
            Tab::Favorite => contact.is_favorite,
        }
    }
}

impl FromStr for Tab {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Tab::parse(s))
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::All => f.write_str("all"),
            Tab::Favorite => f.write_str("favorite"),
        }
    }
}

//==============================================================================
// Tabular Rows
//==============================================================================

/// One spreadsheet row: labeled cells in column order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style push
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(label, value);
        self
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.cells.push((label.into(), value.into()));
    }

    /// Value of the first cell with this exact label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.cells.iter().any(|(l, _)| l == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (label, value) in iter {
            row.push(label, value);
        }
        row
    }
}
