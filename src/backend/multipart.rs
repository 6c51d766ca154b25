//! Minimal `multipart/form-data` body builder for backend uploads.
use std::time::{SystemTime, UNIX_EPOCH};

pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    /// Start a form with a boundary unique to this process and instant.
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        Self::with_boundary(format!(
            "sap-landscape-{:x}-{nanos:x}",
            std::process::id()
        ))
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn text(&mut self, name: &str, value: &str) {
        self.part_header(&format!(
            "Content-Disposition: form-data; name=\"{}\"",
            escape_quoted(name)
        ));
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }

    pub fn file(&mut self, name: &str, filename: &str, contents: &[u8]) {
        self.part_header(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream",
            escape_quoted(name),
            escape_quoted(filename)
        ));
        self.body.extend_from_slice(contents);
        self.body.extend_from_slice(b"\r\n");
    }

    /// Close the form and return the encoded body.
    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }

    fn part_header(&mut self, headers: &str) {
        self.body
            .extend_from_slice(format!("--{}\r\n{headers}\r\n\r\n", self.boundary).as_bytes());
    }
}

// Browsers percent-encode quotes and line breaks inside quoted parameters.
fn escape_quoted(raw: &str) -> String {
    raw.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_text_and_file_parts_in_order() {
        let mut form = MultipartForm::with_boundary("XYZ");
        form.text("sid", "PRD");
        form.file("file", "inventory.csv", b"sid,host\nPRD,h1\n");
        assert_eq!(form.content_type(), "multipart/form-data; boundary=XYZ");

        let body = String::from_utf8(form.finish()).expect("utf-8 body");
        assert_eq!(
            body,
            "--XYZ\r\nContent-Disposition: form-data; name=\"sid\"\r\n\r\nPRD\r\n\
             --XYZ\r\nContent-Disposition: form-data; name=\"file\"; filename=\"inventory.csv\"\r\n\
             Content-Type: application/octet-stream\r\n\r\nsid,host\nPRD,h1\n\r\n--XYZ--\r\n"
        );
    }

    #[test]
    fn quotes_in_filenames_are_escaped() {
        let mut form = MultipartForm::with_boundary("B");
        form.file("file", "odd\"name.csv", b"");
        let body = String::from_utf8(form.finish()).expect("utf-8 body");
        assert!(body.contains("filename=\"odd%22name.csv\""));
    }
}
