use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;

use txt2docx::editor::{Editor, EditorBuffer};
use txt2docx::{export_docx, read_upload, DocxPacker, UPLOAD_LIMIT};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Uploaded text file (.txt); its content is read as Markdown.
    input: PathBuf,

    /// Export this edited HTML instead of the content derived from the input.
    #[arg(long)]
    html: Option<PathBuf>,

    /// Directory the .docx is saved into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Upload size limit in bytes.
    #[arg(long, default_value_t = UPLOAD_LIMIT)]
    max_bytes: u64,

    /// Keep inline code and block quotes instead of removing them.
    #[arg(long)]
    keep_code: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let upload = read_upload(&args.input, args.max_bytes)
        .with_context(|| format!("upload {}", args.input.display()))?;
    info!("loaded {} ({} chars)", upload.name, upload.text.chars().count());

    let mut editor = EditorBuffer::from_markdown(&upload.text);
    if let Some(path) = &args.html {
        let html = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        editor.set_html(html);
    }
    if !args.keep_code {
        editor.sanitize();
    }

    let export = export_docx(Some(&editor), &upload.docx_file_name(), &DocxPacker)
        .context("build docx")?
        .ok_or_else(|| anyhow!("editor has no content"))?;
    export
        .save(&args.out_dir)
        .with_context(|| format!("save into {}", args.out_dir.display()))?;
    Ok(())
}
