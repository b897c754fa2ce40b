use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{Component, Style};

/// One worksheet: a named, ordered stack of components.
///
/// Component order is vertical stacking order; every component restarts at
/// the sheet's left padding, so layout is single-column top-to-bottom.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    /// Tab name. Must be unique within the document; length/character
    /// restrictions are the backend's to enforce.
    pub name: String,
    pub components: Vec<Component>,
    /// Sheet-level default style, the weakest layer of every cascade.
    pub style: Style,
    /// Worksheet gridline visibility.
    pub gridlines: bool,
}

impl Sheet {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            components: Vec::new(),
            style: Style::default(),
            gridlines: true,
        }
    }

    #[must_use]
    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// A whole spreadsheet document: output path plus ordered sheets
/// (sheet order = tab order).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub path: PathBuf,
    pub sheets: Vec<Sheet>,
}

impl Document {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, sheets: Vec<Sheet>) -> Self {
        Document {
            path: path.into(),
            sheets,
        }
    }
}
