//! services/api/src/export/mod.rs
//!
//! Turns a session's current result into downloadable files.

pub mod pdf;

use bytes::Bytes;
use codesnack_core::layout::{paginate, LayoutOptions};
use codesnack_core::session::{CurrentResult, SessionError};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// A file ready to be offered for download.
#[derive(Debug, Clone)]
pub struct Download {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl Download {
    /// A `Content-Disposition` value with characters that would break the
    /// quoted file name replaced.
    pub fn content_disposition(&self) -> String {
        let safe: String = self
            .file_name
            .chars()
            .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
            .collect();
        format!("attachment; filename=\"{safe}\"")
    }
}

pub fn pdf_download(
    current: &CurrentResult,
    options: &LayoutOptions,
) -> Result<Download, ExportError> {
    let text = current.export_text()?;
    let stem = current.file_stem();
    let layout = paginate(&text, options);
    let bytes = pdf::render_pdf(&layout, &stem)?;
    Ok(Download {
        file_name: format!("{stem}.pdf"),
        content_type: PDF_CONTENT_TYPE,
        bytes: Bytes::from(bytes),
    })
}

pub fn text_download(current: &CurrentResult) -> Result<Download, ExportError> {
    let text = current.export_text()?;
    Ok(Download {
        file_name: format!("{}.txt", current.file_stem()),
        content_type: TEXT_CONTENT_TYPE,
        bytes: Bytes::from(text),
    })
}
