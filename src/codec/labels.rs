//! Locale-specific column labels

use crate::types::MethodKind;
use clap::ValueEnum;
use std::fmt;

/// Language of spreadsheet headers and sheet names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::Zh => f.write_str("zh"),
        }
    }
}

/// Every label the codec and the spreadsheet writer need for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    /// Canonical name column
    pub name: &'static str,
    /// ASCII synonym accepted for the name column on import
    pub name_alias: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    pub chat: &'static str,
    pub address: &'static str,
    /// Used when an imported row has no name
    pub unknown_name: &'static str,
    pub sheet_name: &'static str,
    pub export_file_name: &'static str,
}

impl LabelSet {
    pub const ENGLISH: LabelSet = LabelSet {
        name: "Name",
        name_alias: "name",
        phone: "Phone",
        email: "Email",
        chat: "Chat",
        address: "Address",
        unknown_name: "Unknown Name",
        sheet_name: "Contacts",
        export_file_name: "address_book_export.xlsx",
    };

    pub const CHINESE: LabelSet = LabelSet {
        name: "姓名",
        name_alias: "name",
        phone: "电话",
        email: "邮箱",
        chat: "微信",
        address: "地址",
        unknown_name: "未知姓名",
        sheet_name: "联系人",
        export_file_name: "地址簿导出.xlsx",
    };

    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self::ENGLISH,
            Locale::Zh => Self::CHINESE,
        }
    }

    /// Column label for a method kind. `Other` kinds label themselves.
    pub fn label_of<'a>(&'a self, kind: &'a MethodKind) -> &'a str {
        match kind {
            MethodKind::Phone => self.phone,
            MethodKind::Email => self.email,
            MethodKind::Chat => self.chat,
            MethodKind::Address => self.address,
            MethodKind::Other(label) => label,
        }
    }

    /// True for either spelling of the name column
    pub fn is_name_key(&self, key: &str) -> bool {
        key == self.name || key == self.name_alias
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::ENGLISH
    }
}
