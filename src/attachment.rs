//! Uploaded files, sent to the backend inline as data URLs

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// A file picked by the user (screenshot, request attachment)
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// Original file name
    pub file_name: String,

    /// MIME type, e.g. `image/png`
    pub mime_type: String,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Create a new attachment
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        }
    }

    /// Encode as a `data:` URL
    ///
    /// # Example
    ///
    /// ```
    /// use market_client::attachment::Attachment;
    ///
    /// let file = Attachment::new("a.txt", "text/plain", b"hi".to_vec());
    /// assert_eq!(file.to_data_url(), "data:text/plain;base64,aGk=");
    /// ```
    pub fn to_data_url(&self) -> String {
        let mime = if self.mime_type.is_empty() {
            "application/octet-stream"
        } else {
            &self.mime_type
        };
        format!("data:{};base64,{}", mime, BASE64.encode(&self.bytes))
    }
}
