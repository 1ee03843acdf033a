//! services/api/src/export/pdf.rs
//!
//! Draws a [`PageLayout`] into a PDF with the built-in Helvetica font.

use codesnack_core::layout::PageLayout;
use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};

use super::ExportError;

const LAYER_NAME: &str = "Text";

/// Serializes the layout into PDF bytes, one PDF page per layout page.
pub fn render_pdf(layout: &PageLayout, title: &str) -> Result<Vec<u8>, ExportError> {
    let options = &layout.options;
    let width: Mm = Pt(options.page_width).into();
    let height: Mm = Pt(options.page_height).into();

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    for (index, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        // use_text selects the font for each line, so new pages start with it set.
        for line in &page.lines {
            layer.use_text(
                line.text.as_str(),
                options.font_size,
                Pt(line.x).into(),
                Pt(line.y).into(),
                &font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use codesnack_core::layout::{paginate, LayoutOptions};

    #[test]
    fn renders_a_pdf_byte_stream() {
        let layout = paginate("Hello\nWorld", &LayoutOptions::default());
        let bytes = render_pdf(&layout, "greeting").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn multi_page_layouts_render() {
        let text = vec!["a line of text"; 150].join("\n");
        let layout = paginate(&text, &LayoutOptions::default());
        assert!(layout.pages.len() > 2);
        let bytes = render_pdf(&layout, "long").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn empty_layout_still_produces_a_document() {
        let layout = paginate("", &LayoutOptions::default());
        let bytes = render_pdf(&layout, "empty").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
