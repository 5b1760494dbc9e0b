//! Multipart form reading shared by the upload endpoints.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// A file part as received from the browser.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// All parts of a multipart body: file parts by field name, everything else as text.
#[derive(Debug, Default)]
pub struct UploadForm {
    files: Vec<(String, UploadedFile)>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    form.files.push((
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    ));
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Removes and returns the first file sent under `field`.
    pub fn take_file(&mut self, field: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|(name, _)| name == field)?;
        Some(self.files.remove(index).1)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Human-readable size: `512 B`, `1.5 KB`, `2.0 MB`.
pub fn format_file_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;

    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size_units() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_take_file_removes_first_match() {
        let file = |name: &str| UploadedFile {
            file_name: name.to_string(),
            content_type: None,
            bytes: Bytes::new(),
        };
        let mut form = UploadForm {
            files: vec![
                ("resume_files".to_string(), file("a.pdf")),
                ("resume_files".to_string(), file("b.pdf")),
            ],
            fields: HashMap::from([("jd_text".to_string(), "Rust engineer".to_string())]),
        };

        assert_eq!(form.take_file("resume_files").unwrap().file_name, "a.pdf");
        assert_eq!(form.take_file("resume_files").unwrap().file_name, "b.pdf");
        assert!(form.take_file("resume_files").is_none());
        assert_eq!(form.text("jd_text"), Some("Rust engineer"));
        assert_eq!(form.text("missing"), None);
    }
}
