//! Text extraction backends for supported document formats

use crate::error::{Result, ScreenerError};
use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use log::{debug, warn};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

pub trait TextExtractor: Send + Sync {
    /// Short backend name used in load reports
    fn backend(&self) -> &'static str;

    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Primary PDF backend
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn backend(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs
        match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ScreenerError::PdfExtraction(format!("pdf-extract failed: {}", e))),
            Err(_) => Err(ScreenerError::PdfExtraction("pdf-extract panicked".to_string())),
        }
    }
}

/// Page-by-page PDF backend.
///
/// Encrypted documents get one attempt with the empty password, and pages
/// that fail to decode are skipped.
pub struct PagewisePdfExtractor;

impl TextExtractor for PagewisePdfExtractor {
    fn backend(&self) -> &'static str {
        "lopdf"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| ScreenerError::PdfExtraction(format!("Failed to parse PDF: {}", e)))?;

        Self::extract_document(&mut doc)
    }
}

impl PagewisePdfExtractor {
    fn extract_document(doc: &mut lopdf::Document) -> Result<String> {
        if doc.is_encrypted() {
            match doc.decrypt("") {
                Ok(()) => debug!("Decrypted PDF with empty password"),
                Err(e) => warn!("PDF is encrypted and empty password failed, continuing: {}", e),
            }
        }

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        join_pages(&page_numbers, |page| doc.extract_text(&[page]))
    }
}

/// Concatenate the pages that extract, one per line; fails only if every page fails
fn join_pages<E, F>(page_numbers: &[u32], mut extract: F) -> Result<String>
where
    E: fmt::Display,
    F: FnMut(u32) -> std::result::Result<String, E>,
{
    let mut text = String::new();
    let mut skipped = 0;

    for &page in page_numbers {
        match extract(page) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => {
                skipped += 1;
                warn!("Skipping PDF page {}: {}", page, e);
            }
        }
    }

    if skipped > 0 && skipped == page_numbers.len() {
        return Err(ScreenerError::PdfExtraction(format!(
            "All {} pages failed to decode",
            skipped
        )));
    }

    Ok(text)
}

/// DOCX body paragraphs, newline separated
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn backend(&self) -> &'static str {
        "docx-rs"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ScreenerError::DocxExtraction(format!("Failed to read DOCX: {}", e)))?;

        let mut text = String::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                collect_paragraph_text(&paragraph.children, &mut text);
                text.push('\n');
            }
        }

        Ok(text)
    }
}

fn collect_paragraph_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_paragraph_text(&link.children, out),
            _ => {}
        }
    }
}
