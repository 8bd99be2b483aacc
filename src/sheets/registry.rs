//! Static table of supported sheet types.
//!
//! Each sheet is a configuration record rather than a handler type: where its
//! topics come from, how the stored document nests them, how a display title
//! is derived, and which site the search link is scoped to.

use serde::{Deserialize, Serialize};

use super::shape::DataShape;

/// Difficulty tag carried by company question pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    /// Value of the `difficulty` field in the source documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A directory of page documents used instead of the topic store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxiliarySource {
    /// Directory name under the configured sheets directory
    pub dir_name: &'static str,
    /// Keep only items whose `difficulty` equals this value
    pub difficulty: Option<Difficulty>,
}

/// How the display title of a topic is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleRule {
    /// Read the named field
    Field(&'static str),
    /// Use the topic ID, optionally followed by a space and a fixed word
    Id { suffix: Option<&'static str> },
}

/// Sheet grouping. The core family is parameterized by subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFamily {
    Curated,
    Core { subject: &'static str },
    CompanyDsa,
    CommandReference,
    ConceptReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetDefinition {
    pub name: &'static str,
    pub family: SheetFamily,
    /// Site the search link is restricted to
    pub display_domain: &'static str,
    pub data_shape: DataShape,
    pub title_rule: TitleRule,
    pub auxiliary: Option<AuxiliarySource>,
}

impl SheetDefinition {
    pub fn subject(&self) -> Option<&'static str> {
        match self.family {
            SheetFamily::Core { subject } => Some(subject),
            _ => None,
        }
    }
}

const TITLE: TitleRule = TitleRule::Field("title");
const NAME: TitleRule = TitleRule::Field("name");

const fn nested(inner: &'static str) -> DataShape {
    DataShape::Nested {
        outer: "sheetData",
        inner,
    }
}

const fn company(dir_name: &'static str) -> Option<AuxiliarySource> {
    Some(AuxiliarySource {
        dir_name,
        difficulty: Some(Difficulty::Moderate),
    })
}

/// All sheet definitions, in listing order.
pub const SHEETS: [SheetDefinition; 14] = [
    SheetDefinition {
        name: "sde_sheet",
        family: SheetFamily::Curated,
        display_domain: "naukri.com",
        data_shape: nested("topics"),
        title_rule: TITLE,
        auxiliary: None,
    },
    SheetDefinition {
        name: "dbms_core_sheet",
        family: SheetFamily::Core { subject: "dbms" },
        display_domain: "geeksforgeeks.org",
        data_shape: nested("data"),
        title_rule: TITLE,
        auxiliary: None,
    },
    SheetDefinition {
        name: "os_core_sheet",
        family: SheetFamily::Core { subject: "os" },
        display_domain: "geeksforgeeks.org",
        data_shape: nested("data"),
        title_rule: TITLE,
        auxiliary: None,
    },
    SheetDefinition {
        name: "cn_core_sheet",
        family: SheetFamily::Core { subject: "cn" },
        display_domain: "geeksforgeeks.org",
        data_shape: nested("data"),
        title_rule: TITLE,
        auxiliary: None,
    },
    SheetDefinition {
        name: "lc_sql_50",
        family: SheetFamily::Curated,
        display_domain: "leetcode.com",
        data_shape: nested("questions"),
        title_rule: TITLE,
        auxiliary: None,
    },
    SheetDefinition {
        name: "must_do_product_gfg",
        family: SheetFamily::Curated,
        display_domain: "geeksforgeeks.org",
        data_shape: DataShape::Wrapped { key: "sheetData" },
        title_rule: TITLE,
        auxiliary: None,
    },
    SheetDefinition {
        name: "lc_dsa_75",
        family: SheetFamily::Curated,
        display_domain: "leetcode.com",
        data_shape: nested("questions"),
        title_rule: TITLE,
        auxiliary: None,
    },
    SheetDefinition {
        name: "microsoft_dsa",
        family: SheetFamily::CompanyDsa,
        display_domain: "naukri.com",
        data_shape: DataShape::AuxiliaryPages,
        title_rule: NAME,
        auxiliary: company("microsoft_question_jsons"),
    },
    SheetDefinition {
        name: "phonepe_dsa",
        family: SheetFamily::CompanyDsa,
        display_domain: "naukri.com",
        data_shape: DataShape::AuxiliaryPages,
        title_rule: NAME,
        auxiliary: company("phonepe_question_jsons"),
    },
    SheetDefinition {
        name: "oracle_dsa",
        family: SheetFamily::CompanyDsa,
        display_domain: "leetcode.com",
        data_shape: DataShape::AuxiliaryPages,
        title_rule: NAME,
        auxiliary: company("oracle_question_jsons"),
    },
    SheetDefinition {
        name: "linux_commands",
        family: SheetFamily::CommandReference,
        display_domain: "manpages.ubuntu.com",
        data_shape: DataShape::Wrapped { key: "data" },
        title_rule: TitleRule::Id { suffix: None },
        auxiliary: None,
    },
    SheetDefinition {
        name: "docker_commands",
        family: SheetFamily::CommandReference,
        display_domain: "docs.docker.com",
        data_shape: DataShape::Wrapped { key: "data" },
        title_rule: TitleRule::Id {
            suffix: Some("command"),
        },
        auxiliary: None,
    },
    SheetDefinition {
        name: "langgraph",
        family: SheetFamily::ConceptReference,
        display_domain: "langchain.com",
        data_shape: DataShape::Wrapped { key: "data" },
        title_rule: TitleRule::Id {
            suffix: Some("langgraph"),
        },
        auxiliary: None,
    },
    SheetDefinition {
        name: "dsa_common_patterns",
        family: SheetFamily::ConceptReference,
        display_domain: "naukri.com",
        data_shape: DataShape::Wrapped { key: "data" },
        title_rule: TitleRule::Id { suffix: None },
        auxiliary: None,
    },
];

/// Find a sheet definition by its exact identifier.
pub fn lookup(name: &str) -> Option<&'static SheetDefinition> {
    SHEETS.iter().find(|s| s.name == name)
}

/// All sheet identifiers, in registry order.
pub fn list_sheet_types() -> Vec<&'static str> {
    SHEETS.iter().map(|s| s.name).collect()
}
