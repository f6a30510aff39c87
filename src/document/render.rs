use anyhow::{Result, anyhow};
use printpdf::{IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use super::TranslationRecord;
use super::font::Font;
use super::layout::{FONT_SIZE, PAGE_HEIGHT, PAGE_WIDTH, layout};

const DOCUMENT_TITLE: &str = "Vocabulary";
const LAYER_NAME: &str = "Words";

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// Renders the vocabulary list into PDF bytes.
///
/// Everything happens in memory; the caller decides where the bytes go.
pub fn render(title: &str, records: &[TranslationRecord], font: &Font) -> Result<Vec<u8>> {
    let pages = layout(title, records);

    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        pt_to_mm(PAGE_WIDTH),
        pt_to_mm(PAGE_HEIGHT),
        LAYER_NAME,
    );
    let font_ref = add_font(&doc, font)?;

    let mut first = Some((first_page, first_layer));
    for page in pages {
        let (page_index, layer_index) = match first.take() {
            Some(indices) => indices,
            None => doc.add_page(pt_to_mm(PAGE_WIDTH), pt_to_mm(PAGE_HEIGHT), LAYER_NAME),
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for line in page.lines {
            layer.use_text(line.text, FONT_SIZE, pt_to_mm(line.x), pt_to_mm(line.y), &font_ref);
        }
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow!("Failed to write PDF document: {e}"))
}

fn add_font(doc: &PdfDocumentReference, font: &Font) -> Result<IndirectFontRef> {
    match font {
        Font::Builtin(builtin) => doc
            .add_builtin_font(*builtin)
            .map_err(|e| anyhow!("Failed to load built-in font: {e}")),
        Font::TrueType(bytes) => doc
            .add_external_font(&bytes[..])
            .map_err(|e| anyhow!("Failed to load TrueType font: {e}")),
    }
}
