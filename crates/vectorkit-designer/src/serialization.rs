//! Document files.
//!
//! A saved document is JSON holding the element list, viewport and some
//! metadata. Selection state is not persisted.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use vectorkit_settings::ViewportSettings;

use crate::model::{normalize_rotation, Element};
use crate::store::EditorState;
use crate::viewport::Viewport;

/// Document file format version
pub const FILE_FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub version: String,
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub viewport: Viewport,
    pub elements: Vec<Element>,
}

impl DocumentFile {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DocumentMetadata {
                name: name.into(),
                created: now,
                modified: now,
            },
            viewport: Viewport::default(),
            elements: Vec::new(),
        }
    }

    /// Captures the document part of `state`, with selection cleared.
    pub fn from_state(name: impl Into<String>, state: &EditorState) -> Self {
        let elements = state
            .elements
            .iter()
            .map(|el| {
                let mut el = el.clone();
                el.deselect();
                el
            })
            .collect();
        Self {
            viewport: state.viewport.clone(),
            elements,
            ..Self::new(name)
        }
    }

    /// A fresh editor state holding this document, nothing selected.
    pub fn into_state(self) -> EditorState {
        EditorState {
            elements: self.elements,
            viewport: self.viewport,
            ..EditorState::default()
        }
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize document")?;
        std::fs::write(path.as_ref(), json).context("Failed to write document file")?;
        Ok(())
    }

    /// Reads a document, rejecting duplicate ids.
    ///
    /// Rotations are normalized and the viewport zoom is clamped to the
    /// default limits. Every element comes back deselected.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read document file")?;
        let mut document: DocumentFile =
            serde_json::from_str(&content).context("Failed to parse document file")?;

        {
            let mut seen = HashSet::new();
            if let Some(duplicate) = document.elements.iter().find(|el| !seen.insert(&el.id)) {
                bail!("Duplicate element id {} in document", duplicate.id);
            }
        }
        for element in &mut document.elements {
            element.deselect();
            element.rotation = normalize_rotation(element.rotation);
        }
        document.viewport = document.viewport.with_limits(&ViewportSettings::default());

        document.metadata.modified = Utc::now();
        Ok(document)
    }
}
