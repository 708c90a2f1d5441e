//! Minimal `multipart/form-data` encoder for the simulation request.

/// A form body ready to send.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::with_boundary(format!(
            "fmuviz-{:x}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// Append a plain text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
            escape(name)
        ));
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Append a file field.
    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            escape(name),
            escape(filename)
        ));
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Close the form and return the encoded body.
    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }

    fn open_part(&mut self, headers: &str) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(headers.as_bytes());
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote-safe header parameter value.
fn escape(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '"' => '\'',
            '\r' | '\n' => ' ',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_text_and_file_parts() {
        let form = MultipartForm::with_boundary("XYZ")
            .file("fmuFile", "model.fmu", b"\x00\x01PK")
            .text("parameters", "{\"mass\":1.0}");
        let content_type = form.content_type();
        let body = form.finish();

        assert_eq!(content_type, "multipart/form-data; boundary=XYZ");

        let mut expected = Vec::new();
        expected.extend_from_slice(
            b"--XYZ\r\nContent-Disposition: form-data; name=\"fmuFile\"; filename=\"model.fmu\"\r\n",
        );
        expected.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        expected.extend_from_slice(b"\x00\x01PK\r\n");
        expected.extend_from_slice(
            b"--XYZ\r\nContent-Disposition: form-data; name=\"parameters\"\r\n\r\n",
        );
        expected.extend_from_slice(b"{\"mass\":1.0}\r\n--XYZ--\r\n");
        assert_eq!(body, expected);
    }

    #[test]
    fn quotes_in_filenames_are_neutralized() {
        let body = MultipartForm::with_boundary("B")
            .file("f", "a\"b.fmu", b"")
            .finish();
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("filename=\"a'b.fmu\""));
    }

    #[test]
    fn default_boundary_is_unique_enough() {
        let form = MultipartForm::new();
        assert!(form.content_type().contains("boundary=fmuviz-"));
    }
}
