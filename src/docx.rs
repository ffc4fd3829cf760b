//! WordprocessingML packaging for a built [`Document`].

use std::io::{Cursor, Write};

use log::debug;
use thiserror::Error;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::block::Paragraph;
use crate::document::{Alignment, Document, NumberFormat, NumberingDefinition};
use crate::runs::TextRun;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("zip: {0}")]
    Zip(#[from] ZipError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a finished document tree into downloadable bytes.
pub trait Packer {
    fn pack(&self, doc: &Document) -> Result<Vec<u8>, PackError>;
}

/// Writes `.docx` packages.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxPacker;

impl Packer for DocxPacker {
    fn pack(&self, doc: &Document) -> Result<Vec<u8>, PackError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let opts = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts: [(&str, String); 6] = [
            ("[Content_Types].xml", content_types_xml().to_string()),
            ("_rels/.rels", rels_xml().to_string()),
            ("word/document.xml", document_xml(doc)),
            ("word/styles.xml", styles_xml().to_string()),
            ("word/numbering.xml", numbering_xml(&doc.numbering)),
            ("word/_rels/document.xml.rels", document_rels_xml().to_string()),
        ];
        for (name, xml) in &parts {
            zip.start_file(*name, opts)?;
            zip.write_all(xml.as_bytes())?;
        }

        let bytes = zip.finish()?.into_inner();
        debug!("packed {} paragraphs into {} bytes", doc.paragraphs.len(), bytes.len());
        Ok(bytes)
    }
}

fn xml_escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Not allowed anywhere in an XML 1.0 document.
            '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// `w:numId` of the definition at `index` in [`Document::numbering`].
fn num_id(index: usize) -> usize {
    index + 1
}

fn run_xml(run: &TextRun) -> String {
    if run.text.is_empty() {
        return String::new();
    }
    let font = xml_escape_text(run.font);
    let mut out = String::new();
    out.push_str("<w:r><w:rPr>");
    out.push_str(&format!(
        "<w:rFonts w:ascii=\"{font}\" w:eastAsia=\"{font}\" w:hAnsi=\"{font}\" w:cs=\"{font}\"/>"
    ));
    if run.style.bold {
        out.push_str("<w:b/>");
    }
    if run.style.italic {
        out.push_str("<w:i/>");
    }
    if run.style.strike {
        out.push_str("<w:strike/>");
    }
    out.push_str(&format!(
        "<w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>",
        size = run.size
    ));
    if run.style.underline {
        out.push_str("<w:u w:val=\"single\"/>");
    }
    out.push_str("</w:rPr>");
    out.push_str("<w:t xml:space=\"preserve\">");
    out.push_str(&xml_escape_text(&run.text));
    out.push_str("</w:t></w:r>");
    out
}

fn paragraph_xml(p: &Paragraph, doc: &Document) -> String {
    let mut out = String::new();
    out.push_str("<w:p>");

    if let Some(li) = p.list {
        out.push_str("<w:pPr><w:numPr>");
        out.push_str(&format!("<w:ilvl w:val=\"{}\"/>", li.level));
        out.push_str(&format!("<w:numId w:val=\"{}\"/>", num_id(doc.numbering_index(li.kind))));
        out.push_str("</w:numPr></w:pPr>");
    }

    for run in &p.runs {
        out.push_str(&run_xml(run));
    }

    out.push_str("</w:p>");
    out
}

fn document_xml(doc: &Document) -> String {
    let mut body = String::new();
    for p in &doc.paragraphs {
        body.push_str(&paragraph_xml(p, doc));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"
 xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    {body}
    <w:sectPr>
      <w:pgSz w:w="11906" w:h="16838"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
      <w:cols w:space="708"/>
      <w:docGrid w:linePitch="360"/>
    </w:sectPr>
  </w:body>
</w:document>"#
    )
}

fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
</Types>"#
}

fn rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#
}

fn document_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#
}

fn styles_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
</w:styles>"#
}

fn numbering_xml(numbering: &[NumberingDefinition]) -> String {
    let mut abstracts = String::new();
    let mut nums = String::new();
    for (idx, def) in numbering.iter().enumerate() {
        let id = num_id(idx);
        let fmt = match def.format {
            NumberFormat::Bullet => "bullet",
            NumberFormat::Decimal => "decimal",
        };
        let jc = match def.alignment {
            Alignment::Start => "left",
        };
        abstracts.push_str(&format!(
            r#"  <w:abstractNum w:abstractNumId="{id}">
    <w:nsid w:val="{nsid:08X}"/>
    <w:multiLevelType w:val="hybridMultilevel"/>
    <w:name w:val="{name}"/>
    <w:lvl w:ilvl="{lvl}"><w:start w:val="1"/><w:numFmt w:val="{fmt}"/><w:lvlText w:val="{text}"/><w:lvlJc w:val="{jc}"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl>
  </w:abstractNum>
"#,
            nsid = id,
            name = xml_escape_text(def.reference),
            lvl = def.level,
            text = xml_escape_text(def.text),
        ));
        nums.push_str(&format!(
            "  <w:num w:numId=\"{id}\"><w:abstractNumId w:val=\"{id}\"/></w:num>\n"
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
{abstracts}{nums}</w:numbering>"#
    )
}
