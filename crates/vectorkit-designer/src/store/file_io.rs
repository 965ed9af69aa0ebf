use std::path::Path;

use anyhow::Result;
use tracing::info;
use vectorkit_core::SvgError;

use super::{EditorState, EditorStore};
use crate::history::HistoryMode;
use crate::serialization::DocumentFile;
use crate::svg::{export_svg, SvgImporter};

impl EditorStore {
    /// Replaces the document with the shapes in `svg`.
    ///
    /// On error the document is left untouched. The selection is cleared;
    /// tool and viewport are kept. Returns the number of imported elements.
    pub fn import_svg(&mut self, svg: &str) -> Result<usize, SvgError> {
        let imported = SvgImporter::new(self.config.canvas.clone()).import_string(svg)?;
        let count = imported.elements.len();
        info!(
            count,
            scale = imported.scale,
            width = imported.dimensions.0,
            height = imported.dimensions.1,
            "Imported SVG"
        );
        self.commit(HistoryMode::Record, |state| {
            Some(EditorState {
                elements: imported.elements,
                tool: state.tool,
                viewport: state.viewport.clone(),
                ..EditorState::default()
            })
        });
        Ok(count)
    }

    pub fn export_svg(&self) -> String {
        export_svg(&self.state().elements, &self.config.canvas)
    }

    pub fn save_document(&self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        DocumentFile::from_state(name, self.state()).save_to_file(path)?;
        info!(path = %path.display(), "Saved document");
        Ok(())
    }

    /// Loads a document file as a fresh, undoable replacement.
    pub fn load_document(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let mut document = DocumentFile::load_from_file(path)?;
        document.viewport = document.viewport.with_limits(&self.config.viewport);
        let count = document.elements.len();
        info!(path = %path.display(), count, "Loaded document");
        self.commit(HistoryMode::Record, |state| {
            Some(EditorState {
                tool: state.tool,
                ..document.into_state()
            })
        });
        Ok(count)
    }
}
