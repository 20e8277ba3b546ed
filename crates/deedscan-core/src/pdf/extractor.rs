//! PDF text extraction using lopdf and pdf-extract.

use std::cell::OnceCell;

use lopdf::{Document, Object};
use tracing::debug;

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text layer extractor.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    /// Text layer, extracted once per loaded document.
    text_layer: OnceCell<String>,
    /// Below this many non-whitespace characters the text layer is ignored.
    min_text_length: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::with_config(&PdfConfig::default())
    }

    pub fn with_config(config: &PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            text_layer: OnceCell::new(),
            min_text_length: config.min_text_length,
        }
    }

    /// Load a PDF and return its text layer.
    ///
    /// Scanned PDFs fail with [`PdfError::NoTextLayer`] so the caller can
    /// route them to OCR.
    pub fn read_text_layer(data: &[u8], config: &PdfConfig) -> Result<String> {
        let mut extractor = Self::with_config(config);
        extractor.load(data)?;

        match extractor.analyze() {
            PdfType::Text => extractor.extract_text(),
            PdfType::Scanned | PdfType::Empty => Err(PdfError::NoTextLayer {
                pages: extractor.page_count(),
            }),
        }
    }

    /// Number of image XObjects in the document. Images are not decoded.
    pub fn image_count(&self) -> usize {
        let Some(doc) = self.document.as_ref() else {
            return 0;
        };

        doc.objects
            .values()
            .filter(|object| match object {
                Object::Stream(stream) => stream
                    .dict
                    .get(b"Subtype")
                    .and_then(|s| s.as_name())
                    .is_ok_and(|name| name == b"Image"),
                _ => false,
            })
            .count()
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Recorder PDFs are often "encrypted" with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf_extract reads bytes, so keep the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        self.text_layer = OnceCell::new();
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text = self.extract_text().unwrap_or_default();
        let images = self.image_count();
        let pdf_type = classify(usable_len(&text), images, self.min_text_length);

        debug!(
            "PDF analysis: {} chars text, {} images -> {:?}",
            text.len(),
            images,
            pdf_type
        );
        pdf_type
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        if let Some(text) = self.text_layer.get() {
            return Ok(text.clone());
        }

        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(self.text_layer.get_or_init(|| text).clone())
    }
}

fn usable_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// A text layer wins over images; scans often carry an invisible OCR layer.
fn classify(text_len: usize, image_count: usize, min_text_length: usize) -> PdfType {
    if text_len >= min_text_length {
        PdfType::Text
    } else if image_count > 0 {
        PdfType::Scanned
    } else {
        PdfType::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Dictionary, Stream};
    use pretty_assertions::assert_eq;

    fn single_page_pdf(resources: impl FnOnce(&mut Document) -> Dictionary, content: Vec<u8>) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let resources = resources(&mut doc);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources,
            "Contents" => content_id,
        });
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        });
        if let Ok(page) = doc.get_object_mut(page_id) {
            if let Ok(dict) = page.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn scanned_pdf() -> Vec<u8> {
        let resources = |doc: &mut Document| {
            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 1,
                    "Height" => 1,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                vec![0u8],
            ));
            dictionary! {
                "XObject" => dictionary! { "Im1" => Object::Reference(image_id) },
            }
        };
        single_page_pdf(resources, Vec::new())
    }

    fn text_pdf(line: &str) -> Vec<u8> {
        let resources = |doc: &mut Document| {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Courier",
            });
            dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            }
        };
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        single_page_pdf(resources, content.encode().unwrap())
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert_eq!(extractor.image_count(), 0);
        assert!(extractor.extract_text().is_err());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(matches!(extractor.load(b"not a pdf"), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_scanned_page_counts() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&scanned_pdf()).unwrap();
        assert_eq!(extractor.page_count(), 1);
        assert_eq!(extractor.image_count(), 1);
    }

    #[test]
    fn test_analyze_scanned_page() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&scanned_pdf()).unwrap();
        assert_eq!(extractor.analyze(), PdfType::Scanned);
    }

    #[test]
    fn test_read_text_layer_rejects_scan() {
        let err = PdfExtractor::read_text_layer(&scanned_pdf(), &PdfConfig::default()).unwrap_err();
        assert!(matches!(err, PdfError::NoTextLayer { pages: 1 }));
    }

    #[test]
    fn test_read_text_layer_returns_text() {
        let config = PdfConfig { min_text_length: 10 };
        let pdf = text_pdf("GRANT DEED APN 8633-014-003");

        let mut extractor = PdfExtractor::with_config(&config);
        extractor.load(&pdf).unwrap();
        assert_eq!(extractor.analyze(), PdfType::Text);

        let text = PdfExtractor::read_text_layer(&pdf, &config).unwrap();
        assert!(text.contains("8633-014-003"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(120, 0, 50), PdfType::Text);
        assert_eq!(classify(120, 3, 50), PdfType::Text);
        assert_eq!(classify(10, 1, 50), PdfType::Scanned);
        assert_eq!(classify(0, 0, 50), PdfType::Empty);
    }

    #[test]
    fn test_usable_len_ignores_whitespace() {
        assert_eq!(usable_len(" A P\nN \t"), 3);
    }
}
