//! Plain-text to `.docx` conversion.
//!
//! Uploaded text is loaded into an editor as HTML, and the editor's HTML is
//! rebuilt as a tree of paragraphs and styled runs, then packed as a
//! WordprocessingML document.

pub mod block;
pub mod docx;
pub mod document;
pub mod editor;
pub mod export;
pub mod html;
pub mod node;
pub mod runs;
pub mod style;
pub mod upload;

pub use block::{convert_top_level, BlockKind, ListKind, ListMembership, Paragraph};
pub use docx::{DocxPacker, PackError, Packer};
pub use document::{build_document, build_document_from_html, Document, NumberingDefinition};
pub use editor::{Editor, EditorBuffer};
pub use export::{export_docx, Export};
pub use node::Node;
pub use runs::{extract_runs, TextRun};
pub use style::{resolve, StyleSet};
pub use upload::{read_upload, Upload, UploadError, UPLOAD_LIMIT};
