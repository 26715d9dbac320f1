//! Shared fixtures: a zone workbook (CSV or .xlsx) and a minimal .docx template.
#![allow(dead_code)]

use mpa_report::core::schema::source_columns;
use mpa_report::core::ZONE_COLUMN;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

pub const IKOYI: &str = "Ikoyi 1 Total";
pub const LEKKI: &str = "Lekki Total";

/// Raw value written for `column` in the Ikoyi row.
///
/// PBT is 1,000,000 of 2,000,000, DP Jul-25 is 500 and everything else 1,500.
pub fn ikoyi_value(column: &str) -> &'static str {
    match column {
        "PBT 2025 YTD  ACHVD" => "1,000,000",
        "PBT 2025 FULL YR BGT" => "2,000,000",
        "DP Jul-25" => "500",
        _ => "1500",
    }
}

/// Header row: `ZONES` followed by every column the report reads.
pub fn headers() -> Vec<&'static str> {
    std::iter::once(ZONE_COLUMN).chain(source_columns()).collect()
}

/// Two zones: Ikoyi fully populated, Lekki with every figure blank.
pub fn zone_rows() -> Vec<Vec<String>> {
    let columns = source_columns();
    let ikoyi = std::iter::once(IKOYI.to_string())
        .chain(columns.iter().map(|c| ikoyi_value(c).to_string()))
        .collect();
    let lekki = std::iter::once(LEKKI.to_string())
        .chain(columns.iter().map(|_| String::new()))
        .collect();
    vec![ikoyi, lekki]
}

pub fn zones_csv() -> Vec<u8> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers()).unwrap();
    for row in zone_rows() {
        writer.write_record(&row).unwrap();
    }
    writer.into_inner().unwrap()
}

/// The same zones as an .xlsx workbook. Numeric strings are written as numbers.
pub fn zones_xlsx() -> Vec<u8> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in headers().iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
    for (r, row) in zone_rows().iter().enumerate() {
        let r = r as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            let col = col as u16;
            if value.is_empty() {
                continue;
            }
            match value.replace(',', "").parse::<f64>() {
                Ok(n) => sheet.write_number(r, col, n).unwrap(),
                Err(_) => sheet.write_string(r, col, value).unwrap(),
            };
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// A .docx archive whose document body is `body` (inner XML of `<w:body>`).
pub fn docx_with_body(body: &str) -> Vec<u8> {
    let content_types = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );
    let styles = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><!-- {{ not_a_placeholder }} --></w:styles>"#;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in [
        ("[Content_Types].xml", content_types.to_string()),
        ("word/document.xml", document),
        ("word/styles.xml", styles.to_string()),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Template paragraph per placeholder key.
pub fn docx_with_placeholders(keys: &[&str]) -> Vec<u8> {
    let body: String = keys
        .iter()
        .map(|k| format!("<w:p><w:r><w:t>{}={{{{ {} }}}}</w:t></w:r></w:p>", k, k))
        .collect();
    docx_with_body(&body)
}

/// Text of one part of a rendered document.
pub fn read_part(docx: &[u8], part: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut entry = archive.by_name(part).unwrap();
    let mut xml = String::new();
    entry.read_to_string(&mut xml).unwrap();
    xml
}
