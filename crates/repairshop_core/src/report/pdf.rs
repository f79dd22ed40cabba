//! Fixed-layout PDF period report.
//!
//! # Responsibility
//! - Lay out title, column header, one row per group and a totals row.
//! - Serialize pages as a minimal PDF 1.4 file using the built-in
//!   Helvetica fonts.
//!
//! # Invariants
//! - Output is deterministic for the same groups and period.
//! - Rows that do not fit continue on a new page under a repeated header.
//! - Text outside printable ASCII is replaced with `?` (standard fonts only
//!   cover Latin-1).

use crate::model::period::Period;
use crate::model::summary::{GroupTotal, Totals};
use crate::report::currency::format_currency;
use crate::report::{write_artifact, ReportResult};
use std::fmt::Write;
use std::path::{Path, PathBuf};

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const TITLE_Y: u32 = 750;
const FIRST_HEADER_Y: u32 = 715;
const CONTINUATION_HEADER_Y: u32 = 750;
const BOTTOM_MARGIN: u32 = 60;
const LINE_HEIGHT: u32 = 20;
const COLUMNS_X: [u32; 4] = [50, 200, 320, 440];
const HEADER: [&str; 4] = ["Date", "Cost", "Income", "Net Profit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TextItem {
    x: u32,
    y: u32,
    font: Font,
    size: u32,
    text: String,
}

type Page = Vec<TextItem>;

/// Writes `<period>_report.pdf` into `dir`, replacing any existing file.
///
/// # Errors
/// - `ReportError::Write` when the file cannot be created or written.
pub fn render_report(groups: &[GroupTotal], period: Period, dir: &Path) -> ReportResult<PathBuf> {
    let path = dir.join(report_file_name(period));
    write_artifact(&path, &report_bytes(groups, period))?;
    Ok(path)
}

/// File name of a period's report.
pub fn report_file_name(period: Period) -> String {
    format!("{}_report.pdf", period.key())
}

/// Builds the report document in memory.
pub fn report_bytes(groups: &[GroupTotal], period: Period) -> Vec<u8> {
    serialize_pages(&layout_pages(groups, period))
}

fn layout_pages(groups: &[GroupTotal], period: Period) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut page = vec![TextItem {
        x: COLUMNS_X[0],
        y: TITLE_Y,
        font: Font::Bold,
        size: 16,
        text: format!("{} Repair Report", period.label()),
    }];
    push_row(
        &mut page,
        FIRST_HEADER_Y,
        Font::Bold,
        HEADER.map(str::to_string),
    );
    let mut y = FIRST_HEADER_Y - LINE_HEIGHT;

    let totals = Totals::of(groups);
    let rows = groups
        .iter()
        .map(|group| {
            (
                Font::Regular,
                [
                    group.label.clone(),
                    format_currency(group.cost),
                    format_currency(group.income),
                    format_currency(group.net_profit()),
                ],
            )
        })
        .chain(std::iter::once((
            Font::Bold,
            [
                "Total".to_string(),
                format_currency(totals.cost),
                format_currency(totals.income),
                format_currency(totals.net_profit()),
            ],
        )));

    for (font, cells) in rows {
        if y < BOTTOM_MARGIN {
            pages.push(std::mem::take(&mut page));
            push_row(
                &mut page,
                CONTINUATION_HEADER_Y,
                Font::Bold,
                HEADER.map(str::to_string),
            );
            y = CONTINUATION_HEADER_Y - LINE_HEIGHT;
        }
        push_row(&mut page, y, font, cells);
        y -= LINE_HEIGHT;
    }

    pages.push(page);
    pages
}

fn push_row(page: &mut Page, y: u32, font: Font, cells: [String; 4]) {
    for (x, text) in COLUMNS_X.into_iter().zip(cells) {
        page.push(TextItem {
            x,
            y,
            font,
            size: 12,
            text,
        });
    }
}

fn content_stream(page: &Page) -> String {
    let mut stream = String::new();
    for item in page {
        let _ = writeln!(
            stream,
            "BT /{} {} Tf {} {} Td ({}) Tj ET",
            item.font.resource(),
            item.size,
            item.x,
            item.y,
            escape_pdf_text(&item.text)
        );
    }
    stream
}

fn serialize_pages(pages: &[Page]) -> Vec<u8> {
    // Object layout: 1 catalog, 2 page tree, 3-4 fonts, then a page/content
    // pair per page.
    let page_ids: Vec<usize> = (0..pages.len()).map(|index| 5 + index * 2).collect();
    let kids = page_ids
        .iter()
        .map(|id| format!("{id} 0 R"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    for (page, page_id) in pages.iter().zip(&page_ids) {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            page_id + 1
        ));
        let stream = content_stream(page);
        objects.push(format!("<< /Length {} >>\nstream\n{stream}endstream", stream.len()));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        let _ = write!(out, "{} 0 obj\n{body}\nendobj\n", index + 1);
    }

    let xref_offset = out.len();
    let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(out, "{offset:010} 00000 n \n");
    }
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    );

    out.into_bytes()
}

fn escape_pdf_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ' '..='~' => escaped.push(ch),
            _ => escaped.push('?'),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_pdf_text, layout_pages, report_bytes, BOTTOM_MARGIN};
    use crate::model::period::Period;
    use crate::model::summary::GroupTotal;

    fn days(count: usize) -> Vec<GroupTotal> {
        (0..count)
            .map(|index| GroupTotal::new(format!("2024-01-{:02}", index % 28 + 1), 1.0, 2.0))
            .collect()
    }

    #[test]
    fn short_report_fits_one_page_with_totals_row() {
        let pages = layout_pages(&days(3), Period::Daily);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0].text, "Daily Repair Report");
        let last_row: Vec<_> = pages[0][pages[0].len() - 4..]
            .iter()
            .map(|item| item.text.as_str())
            .collect();
        assert_eq!(last_row, vec!["Total", "$3.00", "$6.00", "$3.00"]);
    }

    #[test]
    fn long_report_continues_on_new_page_with_header() {
        let pages = layout_pages(&days(60), Period::Monthly);

        assert!(pages.len() > 1);
        assert_eq!(pages[1][0].text, "Date");
        assert!(pages
            .iter()
            .flatten()
            .all(|item| item.y >= BOTTOM_MARGIN));
        let body_rows: usize = pages
            .iter()
            .flatten()
            .filter(|item| item.x == 50 && item.text.starts_with("2024-"))
            .count();
        assert_eq!(body_rows, 60);
    }

    #[test]
    fn document_has_valid_envelope_and_xref_offset() {
        let bytes = report_bytes(&days(2), Period::Weekly);
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("(Weekly Repair Report) Tj"));

        let startxref = text.rsplit("startxref\n").next().unwrap();
        let offset: usize = startxref.lines().next().unwrap().parse().unwrap();
        assert!(text[offset..].starts_with("xref\n"));
    }

    #[test]
    fn text_escaping_handles_delimiters_and_non_ascii() {
        assert_eq!(escape_pdf_text("a(b)c\\"), "a\\(b\\)c\\\\");
        assert_eq!(escape_pdf_text("café"), "caf?");
    }
}
