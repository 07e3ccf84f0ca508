use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;

use crate::error::ApiError;

/// An uploaded PDF with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Read the `file` part of a multipart upload.
///
/// The part's declared content type is checked before its body is read, so
/// a non-PDF upload is rejected without buffering it.
pub async fn read_pdf_upload(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some("file") {
            // Ignore unknown fields, but a broken or oversized one still fails the upload
            field.bytes().await.map_err(upload_error)?;
            continue;
        }

        if !is_pdf_content_type(field.content_type()) {
            return Err(ApiError::InvalidFileType);
        }

        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let data = field.bytes().await.map_err(upload_error)?.to_vec();

        return Ok(UploadedFile { filename, data });
    }

    Err(ApiError::MissingFile)
}

/// True for `application/pdf`, ignoring case and any `;` parameters.
pub fn is_pdf_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/pdf"))
}

fn upload_error(e: MultipartError) -> ApiError {
    ApiError::Upload {
        status: e.status(),
        message: e.body_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_pdf_mime() {
        assert!(is_pdf_content_type(Some("application/pdf")));
        assert!(is_pdf_content_type(Some("Application/PDF")));
        assert!(is_pdf_content_type(Some("application/pdf; name=invoice.pdf")));
    }

    #[test]
    fn rejects_other_mimes() {
        assert!(!is_pdf_content_type(None));
        assert!(!is_pdf_content_type(Some("")));
        assert!(!is_pdf_content_type(Some("text/plain")));
        assert!(!is_pdf_content_type(Some("application/octet-stream")));
        assert!(!is_pdf_content_type(Some("application/pdfx")));
    }
}
