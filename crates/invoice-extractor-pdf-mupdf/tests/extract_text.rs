//! Text extraction against small PDFs built in memory.

use invoice_extractor_core::{BackendError, PdfBackend};
use invoice_extractor_pdf_mupdf::MupdfBackend;

/// One page's content stream: the raw bytes and an optional `/Filter`.
struct PageStream {
    data: Vec<u8>,
    filter: Option<&'static str>,
}

impl PageStream {
    fn text(line: &str) -> Self {
        Self {
            data: format!("BT /F1 12 Tf 72 720 Td ({line}) Tj ET").into_bytes(),
            filter: None,
        }
    }
}

/// Build a valid PDF with one page per entry in `pages`, each showing a
/// single line of Helvetica text. Offsets in the xref table are computed
/// so MuPDF does not need to repair the file.
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let streams: Vec<PageStream> = pages.iter().map(|line| PageStream::text(line)).collect();
    build_pdf_from_streams(&streams)
}

fn build_pdf_from_streams(pages: &[PageStream]) -> Vec<u8> {
    let page_count = pages.len();
    // 1: catalog, 2: pages, 3: font, then (page, content) pairs
    let mut objects: Vec<Vec<u8>> = Vec::new();
    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + i * 2))
        .collect();
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        )
        .into_bytes(),
    );
    objects.push(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_vec());

    for (i, page) in pages.iter().enumerate() {
        let content_id = 5 + i * 2;
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>"
            )
            .into_bytes(),
        );
        let filter = page
            .filter
            .map(|f| format!(" /Filter /{f}"))
            .unwrap_or_default();
        let len = page.data.len();
        let mut stream = format!("<< /Length {len}{filter} >>\nstream\n").into_bytes();
        stream.extend_from_slice(&page.data);
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

fn is_read_error(result: &Result<String, BackendError>) -> bool {
    matches!(
        result,
        Err(BackendError::OpenError(_) | BackendError::ExtractionError(_))
    )
}

#[test]
fn extracts_single_page_text() {
    let pdf = build_pdf(&["Invoice INV-001 Total 120.00"]);
    let text = MupdfBackend::new().extract_text(&pdf).unwrap();
    assert!(text.contains("Invoice INV-001 Total 120.00"), "got: {text:?}");
}

#[test]
fn concatenates_pages_in_order() {
    let pdf = build_pdf(&["Vendor ACME Corp", "Amount Due 42.00"]);
    let text = MupdfBackend::new().extract_text(&pdf).unwrap();

    let vendor = text.find("Vendor ACME Corp").expect("first page text");
    let due = text.find("Amount Due 42.00").expect("second page text");
    assert!(vendor < due);
}

#[test]
fn max_pages_limits_output() {
    let pdf = build_pdf(&["Page one", "Page two"]);
    let text = MupdfBackend::new()
        .with_max_pages(1)
        .extract_text(&pdf)
        .unwrap();
    assert!(text.contains("Page one"));
    assert!(!text.contains("Page two"));
}

#[test]
fn blank_page_is_an_extraction_error() {
    let pdf = build_pdf(&[""]);
    match MupdfBackend::new().extract_text(&pdf) {
        Err(BackendError::ExtractionError(msg)) => assert!(msg.contains("no extractable text")),
        other => panic!("expected an extraction error, got {other:?}"),
    }
}

#[test]
fn rejects_non_pdf_bytes() {
    let result = MupdfBackend::new().extract_text(b"this is a plain text file, not a PDF");
    assert!(is_read_error(&result), "got: {result:?}");
}

#[test]
fn rejects_empty_input() {
    let result = MupdfBackend::new().extract_text(&[]);
    assert!(is_read_error(&result), "got: {result:?}");
}

#[test]
fn truncated_pdf_is_a_read_error() {
    let pdf = build_pdf(&["Invoice INV-002 Total 99.00"]);
    let truncated = &pdf[..pdf.len() / 2];
    assert!(truncated.starts_with(b"%PDF-"));

    let result = MupdfBackend::new().extract_text(truncated);
    assert!(is_read_error(&result), "got: {result:?}");
}

#[test]
fn undecodable_content_stream_is_a_read_error() {
    // Claims Flate compression but holds bytes zlib cannot inflate.
    let pdf = build_pdf_from_streams(&[PageStream {
        data: b"\x00\xff\x13\x37 not deflate data \xde\xad\xbe\xef".to_vec(),
        filter: Some("FlateDecode"),
    }]);

    let result = MupdfBackend::new().extract_text(&pdf);
    assert!(is_read_error(&result), "got: {result:?}");
}

#[test]
fn garbage_content_stream_is_a_read_error() {
    let pdf = build_pdf_from_streams(&[PageStream {
        data: b"\x01\x02\x03 ]]] >> \xfe\xfd garbage without text operators".to_vec(),
        filter: None,
    }]);

    let result = MupdfBackend::new().extract_text(&pdf);
    assert!(is_read_error(&result), "got: {result:?}");
}

#[test]
fn broken_xref_is_repaired_when_text_survives() {
    let pdf = build_pdf(&["Invoice INV-003 Total 15.00"]);
    // Point startxref at the first object so MuPDF has to rebuild the xref table.
    let marker = b"startxref\n";
    let pos = pdf
        .windows(marker.len())
        .rposition(|w| w == marker)
        .expect("startxref present");
    let mut damaged = pdf[..pos + marker.len()].to_vec();
    damaged.extend_from_slice(b"9\n%%EOF\n");

    let text = MupdfBackend::new().extract_text(&damaged).unwrap();
    assert!(text.contains("Invoice INV-003 Total 15.00"), "got: {text:?}");
}
