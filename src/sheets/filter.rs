//! Narrowing the sheet list before a topic is picked.

use rand::seq::IndexedRandom;
use serde::Deserialize;

/// How to narrow a list of sheet identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetFilter {
    /// Keep entries containing the text, case-insensitively
    Text(String),
    /// Keep only the entry at this position
    Index(usize),
    /// Keep everything (random mode picks among all entries)
    All,
}

/// A filter that produced nothing usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidFilter {
    NoMatches { text: String },
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for InvalidFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidFilter::NoMatches { text } => {
                write!(f, "No sheet types found containing '{}'", text)
            }
            InvalidFilter::IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for {} sheets", index, len)
            }
        }
    }
}

impl std::error::Error for InvalidFilter {}

/// Apply `filter` to `sheets`. Pure; the input order is preserved.
pub fn filter_sheet_types<T>(sheets: &[T], filter: &SheetFilter) -> Result<Vec<T>, InvalidFilter>
where
    T: AsRef<str> + Clone,
{
    match filter {
        SheetFilter::Text(text) => {
            let needle = text.to_lowercase();
            let matches: Vec<T> = sheets
                .iter()
                .filter(|s| s.as_ref().to_lowercase().contains(&needle))
                .cloned()
                .collect();
            if matches.is_empty() {
                Err(InvalidFilter::NoMatches { text: text.clone() })
            } else {
                Ok(matches)
            }
        }
        SheetFilter::Index(index) => sheets
            .get(*index)
            .map(|s| vec![s.clone()])
            .ok_or(InvalidFilter::IndexOutOfRange {
                index: *index,
                len: sheets.len(),
            }),
        SheetFilter::All => Ok(sheets.to_vec()),
    }
}

/// Selection hints sent by a caller that wants "a topic from some sheet".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionHints {
    #[serde(default)]
    pub filter_text: Option<String>,
    #[serde(default)]
    pub selected_index: Option<usize>,
    #[serde(default)]
    pub random_selection: bool,
}

impl SelectionHints {
    /// Text filter, if one was given and is not blank.
    pub fn text_filter(&self) -> Option<SheetFilter> {
        self.filter_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| SheetFilter::Text(t.to_string()))
    }

    /// Resolve to a single sheet.
    ///
    /// The text filter narrows first. Then random selection wins over an
    /// index; with neither, the first remaining sheet is used.
    pub fn resolve<T>(&self, sheets: &[T]) -> Result<T, InvalidFilter>
    where
        T: AsRef<str> + Clone,
    {
        let candidates = match self.text_filter() {
            Some(filter) => filter_sheet_types(sheets, &filter)?,
            None => sheets.to_vec(),
        };

        let picked = if self.random_selection {
            filter_sheet_types(&candidates, &SheetFilter::All)?
                .choose(&mut rand::rng())
                .cloned()
        } else if let Some(index) = self.selected_index {
            filter_sheet_types(&candidates, &SheetFilter::Index(index))?
                .into_iter()
                .next()
        } else {
            candidates.first().cloned()
        };

        picked.ok_or(InvalidFilter::IndexOutOfRange { index: 0, len: 0 })
    }
}
