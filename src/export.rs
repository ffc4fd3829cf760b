use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::docx::{PackError, Packer};
use crate::document::build_document_from_html;
use crate::editor::Editor;

/// A packed document ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Export {
    /// Writes the package to `dir/file_name`, creating `dir` when missing.
    pub fn save(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        info!("saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Converts the editor's current content and packs it.
///
/// Returns `Ok(None)` without doing anything when there is no editor or it
/// holds no content.
pub fn export_docx<E, P>(
    editor: Option<&E>,
    file_name: &str,
    packer: &P,
) -> Result<Option<Export>, PackError>
where
    E: Editor + ?Sized,
    P: Packer + ?Sized,
{
    let Some(editor) = editor else {
        warn!("export skipped: no editor");
        return Ok(None);
    };
    let Some(html) = editor.html() else {
        warn!("export skipped: editor has no content");
        return Ok(None);
    };

    let doc = build_document_from_html(&html);
    let bytes = packer.pack(&doc)?;
    Ok(Some(Export {
        file_name: file_name.to_string(),
        bytes,
    }))
}
