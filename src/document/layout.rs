//! Page layout for the vocabulary list.
//!
//! Layout is a pure function of its input so that the same words always
//! produce the same pages. Coordinates are PDF points with the origin at the
//! bottom-left corner.

use super::TranslationRecord;

/// US Letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

pub const FONT_SIZE: f32 = 12.0;
pub const LEFT_MARGIN: f32 = 100.0;
pub const TITLE_Y: f32 = PAGE_HEIGHT - 50.0;
pub const FIRST_ROW_Y: f32 = PAGE_HEIGHT - 100.0;
pub const ROW_HEIGHT: f32 = 20.0;
pub const BOTTOM_MARGIN: f32 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Formats one row as `word [pronunciation] : translation`.
pub fn format_row(record: &TranslationRecord) -> String {
    if record.pronunciation.is_empty() {
        format!("{} : {}", record.word, record.translation)
    } else {
        format!(
            "{} [{}] : {}",
            record.word, record.pronunciation, record.translation
        )
    }
}

/// Places the title and every row, breaking pages at the bottom margin.
///
/// The title appears on the first page only. A new page is opened only when
/// another row still has to be placed, so there is never a blank trailing page.
pub fn layout(title: &str, records: &[TranslationRecord]) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = Page {
        lines: vec![PlacedLine {
            x: LEFT_MARGIN,
            y: TITLE_Y,
            text: title.to_string(),
        }],
    };

    let mut y = FIRST_ROW_Y;
    for (index, record) in records.iter().enumerate() {
        current.lines.push(PlacedLine {
            x: LEFT_MARGIN,
            y,
            text: format_row(record),
        });

        y -= ROW_HEIGHT;
        if y <= BOTTOM_MARGIN && index + 1 < records.len() {
            pages.push(std::mem::take(&mut current));
            y = FIRST_ROW_Y;
        }
    }

    pages.push(current);
    pages
}
