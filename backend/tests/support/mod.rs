#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rust_xlsxwriter::{Format, Workbook};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

static CWD_LOCK: Mutex<()> = Mutex::new(());

pub const HEADER: [&str; 6] = ["Job", "Owner", "Queue", "Host", "Minutes", "Start"];

/// Typed cell written into a fixture sheet.
#[derive(Debug, Clone, Copy)]
pub enum Cell {
    Text(&'static str),
    Number(f64),
    Bool(bool),
    /// Time-typed cell, `(hours, minutes, seconds)`
    Time(u32, u32, u32),
    Blank,
}

/// One data row: name (A), duration (E), start (F).
#[derive(Debug, Clone, Copy)]
pub struct JobRow {
    pub name: Cell,
    pub duration: Cell,
    pub start: Cell,
}

impl JobRow {
    /// Row with no content in any column.
    pub fn blank() -> Self {
        Self {
            name: Cell::Blank,
            duration: Cell::Blank,
            start: Cell::Blank,
        }
    }

    fn is_blank(&self) -> bool {
        matches!(
            (self.name, self.duration, self.start),
            (Cell::Blank, Cell::Blank, Cell::Blank)
        )
    }
}

/// Text row, the common case.
pub fn job(name: &'static str, duration: &'static str, start: &'static str) -> JobRow {
    JobRow {
        name: Cell::Text(name),
        duration: Cell::Text(duration),
        start: Cell::Text(start),
    }
}

/// Writes an `.xlsx` workbook with one header + rows sheet per `(name, rows)`.
pub fn write_xlsx(dir: &TempDir, file_name: &str, sheets: &[(&str, &[JobRow])]) -> PathBuf {
    let mut workbook = Workbook::new();
    let time_format = Format::new().set_num_format("hh:mm:ss");

    for (sheet_name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*sheet_name).expect("valid sheet name");

        for (col, title) in HEADER.iter().enumerate() {
            sheet
                .write_string(0, col as u16, *title)
                .expect("write header");
        }

        for (i, row) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            for (col, cell) in [(0u16, row.name), (4, row.duration), (5, row.start)] {
                match cell {
                    Cell::Text(text) => {
                        sheet.write_string(r, col, text).expect("write text");
                    }
                    Cell::Number(value) => {
                        sheet.write_number(r, col, value).expect("write number");
                    }
                    Cell::Bool(value) => {
                        sheet.write_boolean(r, col, value).expect("write bool");
                    }
                    Cell::Time(h, m, sec) => {
                        let day_fraction = f64::from(h * 3_600 + m * 60 + sec) / 86_400.0;
                        sheet
                            .write_number_with_format(r, col, day_fraction, &time_format)
                            .expect("write time");
                    }
                    Cell::Blank => {}
                }
            }
            // unused columns carry noise to prove they are ignored
            if !row.is_blank() {
                sheet.write_string(r, 1, "ops").expect("write owner");
            }
        }
    }

    let path = dir.path().join(file_name);
    workbook.save(&path).expect("save workbook");
    path
}

/// Single-sheet workbook named `Sheet1`.
pub fn write_jobs_xlsx(dir: &TempDir, rows: &[JobRow]) -> PathBuf {
    write_xlsx(dir, "jobs.xlsx", &[("Sheet1", rows)])
}

const ODS_MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

const ODS_MANIFEST: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">"#,
    r#"<manifest:file-entry manifest:full-path="/" manifest:media-type="application/vnd.oasis.opendocument.spreadsheet"/>"#,
    r#"<manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/>"#,
    r#"</manifest:manifest>"#,
);

/// Writes an OpenDocument spreadsheet with one header + rows table per
/// `(name, rows)`. Cells are written without whitespace between them, as
/// office suites do.
pub fn write_ods(dir: &TempDir, file_name: &str, sheets: &[(&str, &[JobRow])]) -> PathBuf {
    let path = dir.path().join(file_name);
    let file = File::create(&path).expect("create ods");
    let mut zip = ZipWriter::new(file);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    // mimetype must be the first, uncompressed entry
    zip.start_file("mimetype", stored).expect("start mimetype");
    zip.write_all(ODS_MIMETYPE.as_bytes()).expect("write mimetype");
    zip.start_file("META-INF/manifest.xml", stored)
        .expect("start manifest");
    zip.write_all(ODS_MANIFEST.as_bytes()).expect("write manifest");
    zip.start_file("content.xml", stored).expect("start content");
    zip.write_all(ods_content(sheets).as_bytes())
        .expect("write content");
    zip.finish().expect("finish ods");

    path
}

/// Single-table spreadsheet named `Sheet1`.
pub fn write_jobs_ods(dir: &TempDir, rows: &[JobRow]) -> PathBuf {
    write_ods(dir, "jobs.ods", &[("Sheet1", rows)])
}

fn ods_content(sheets: &[(&str, &[JobRow])]) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        r#"<office:document-content"#,
        r#" xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0""#,
        r#" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0""#,
        r#" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0""#,
        r#" office:version="1.2"><office:body><office:spreadsheet>"#,
    ));

    for (sheet_name, rows) in sheets {
        xml.push_str(&format!(r#"<table:table table:name="{}">"#, sheet_name));

        xml.push_str("<table:table-row>");
        for title in HEADER {
            xml.push_str(&ods_cell(Cell::Text(title)));
        }
        xml.push_str("</table:table-row>");

        for row in rows.iter() {
            xml.push_str("<table:table-row>");
            let cells = [
                row.name,
                if row.is_blank() { Cell::Blank } else { Cell::Text("ops") },
                Cell::Blank,
                Cell::Blank,
                row.duration,
                row.start,
            ];
            for cell in cells {
                xml.push_str(&ods_cell(cell));
            }
            xml.push_str("</table:table-row>");
        }

        xml.push_str("</table:table>");
    }

    xml.push_str("</office:spreadsheet></office:body></office:document-content>");
    xml
}

fn ods_cell(cell: Cell) -> String {
    match cell {
        Cell::Text(text) => format!(
            r#"<table:table-cell office:value-type="string"><text:p>{}</text:p></table:table-cell>"#,
            text
        ),
        Cell::Number(value) => format!(
            r#"<table:table-cell office:value-type="float" office:value="{}"><text:p>{}</text:p></table:table-cell>"#,
            value, value
        ),
        Cell::Bool(value) => format!(
            r#"<table:table-cell office:value-type="boolean" office:boolean-value="{}"><text:p>{}</text:p></table:table-cell>"#,
            value,
            if value { "TRUE" } else { "FALSE" }
        ),
        Cell::Time(h, m, s) => format!(
            r#"<table:table-cell office:value-type="time" office:time-value="PT{:02}H{:02}M{:02}S"><text:p>{:02}:{:02}:{:02}</text:p></table:table-cell>"#,
            h, m, s, h, m, s
        ),
        Cell::Blank => "<table:table-cell/>".to_string(),
    }
}

/// Runs `f` with the process working directory set to `dir`.
///
/// Serializes access to the process-global working directory and restores the
/// previous one on unwind.
pub fn with_current_dir<F, R>(dir: &Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedDir::enter(dir);
    f()
}

struct ScopedDir {
    previous: PathBuf,
}

impl ScopedDir {
    fn enter(dir: &Path) -> Self {
        let previous = std::env::current_dir().expect("current dir");
        std::env::set_current_dir(dir).expect("enter dir");
        Self { previous }
    }
}

impl Drop for ScopedDir {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}
