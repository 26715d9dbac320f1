//! `.docx` template rendering
//!
//! Placeholders are written `{{ name }}` in the document text. Word tends
//! to break such a tag across several runs (spell-check, formatting
//! changes), so the XML between the braces is dropped before the name is
//! read. The markup removed that way is a balanced close/open sequence,
//! which leaves the surrounding part well-formed.

use crate::core::Placeholders;
use crate::error::{ReportError, ReportResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

static CONTENT_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^word/(document|header\d*|footer\d*|footnotes|endnotes)\.xml$")
        .expect("static pattern")
});
static SPLIT_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(?:<[^>]*>)+\{").expect("static pattern"));
static SPLIT_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\}(?:<[^>]*>)+\}").expect("static pattern"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("static pattern"));
static XML_MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static pattern"));
static IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static pattern"));

/// A Word template held in memory.
#[derive(Debug, Clone)]
pub struct DocxTemplate {
    bytes: Vec<u8>,
    source: Option<PathBuf>,
}

impl DocxTemplate {
    /// Load a template from disk. A path that is not a file is reported
    /// as `MissingTemplate`.
    pub fn open<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ReportError::MissingTemplate(path.to_path_buf()));
        }
        let bytes = std::fs::read(path)?;
        debug!(path = %path.display(), size = bytes.len(), "template loaded");
        Ok(Self {
            bytes,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            source: None,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Placeholder names the template declares, across all text parts.
    pub fn placeholders(&self) -> ReportResult<BTreeSet<String>> {
        let mut archive = self.archive()?;
        let mut names = BTreeSet::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(zip_failure)?;
            if !CONTENT_PART.is_match(entry.name()) {
                continue;
            }
            let xml = read_xml(&mut entry)?;
            for tag in scan(&join_split_braces(&xml)) {
                names.insert(tag?.name);
            }
        }
        Ok(names)
    }

    /// Substitute every placeholder and return the new document bytes.
    ///
    /// Fails if the template uses a name `values` does not define.
    pub fn render(&self, values: &Placeholders) -> ReportResult<Vec<u8>> {
        let mut archive = self.archive()?;
        let mut out = ZipWriter::new(Cursor::new(Vec::new()));

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(zip_failure)?;
            let name = entry.name().to_string();
            if entry.is_dir() {
                out.add_directory(name, file_options()).map_err(zip_failure)?;
                continue;
            }

            let data = if CONTENT_PART.is_match(&name) {
                let xml = read_xml(&mut entry)?;
                let rendered = substitute(&xml, values)?;
                debug!(part = %name, "placeholders substituted");
                rendered.into_bytes()
            } else {
                let mut raw = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut raw)?;
                raw
            };

            out.start_file(name, file_options()).map_err(zip_failure)?;
            out.write_all(&data)?;
        }

        let bytes = out.finish().map_err(zip_failure)?.into_inner();
        info!(size = bytes.len(), "document rendered");
        Ok(bytes)
    }

    fn archive(&self) -> ReportResult<ZipArchive<Cursor<&[u8]>>> {
        ZipArchive::new(Cursor::new(self.bytes.as_slice())).map_err(|e| {
            ReportError::render_failure(format!("template is not a valid .docx archive: {}", e))
        })
    }
}

struct Tag {
    start: usize,
    end: usize,
    name: String,
}

/// Every `{{ ... }}` in `xml`, with its name cleaned of markup.
fn scan(xml: &str) -> impl Iterator<Item = ReportResult<Tag>> + '_ {
    TAG.captures_iter(xml).filter_map(|caps| {
        let whole = caps.get(0)?;
        let inner = XML_MARKUP.replace_all(caps.get(1)?.as_str(), "");
        let name = inner.trim();
        if !IDENT.is_match(name) {
            return Some(Err(ReportError::render_failure(format!(
                "unsupported template expression '{{{{ {} }}}}'",
                name
            ))));
        }
        Some(Ok(Tag {
            start: whole.start(),
            end: whole.end(),
            name: name.to_string(),
        }))
    })
}

/// Re-join `{` `{` and `}` `}` pairs that Word split across runs.
fn join_split_braces(xml: &str) -> String {
    let joined = SPLIT_OPEN.replace_all(xml, "{{");
    SPLIT_CLOSE.replace_all(&joined, "}}").into_owned()
}

fn substitute(xml: &str, values: &Placeholders) -> ReportResult<String> {
    let xml = join_split_braces(xml);
    let mut out = String::with_capacity(xml.len());
    let mut last = 0;
    for tag in scan(&xml) {
        let tag = tag?;
        let value = values.get(&tag.name).ok_or_else(|| {
            ReportError::render_failure(format!("placeholder '{}' has no value", tag.name))
        })?;
        out.push_str(&xml[last..tag.start]);
        out.push_str(&quick_xml::escape::escape(value.as_str()));
        last = tag.end;
    }
    out.push_str(&xml[last..]);
    Ok(out)
}

fn read_xml<R: Read>(entry: &mut R) -> ReportResult<String> {
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| ReportError::render_failure(format!("template part is not UTF-8 XML: {}", e)))?;
    Ok(xml)
}

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

fn zip_failure(e: zip::result::ZipError) -> ReportError {
    ReportError::render_failure(format!("docx archive error: {}", e))
}
