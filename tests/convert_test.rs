//! End-to-end conversion tests.
//!
//! Each test builds a minimal document package in memory with `zip` and
//! drives the public `convert_reader` API, checking the exact Markdown
//! output.

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use docmark::{ConvertOptions, Error, MediaMode, convert_reader, write_assets_to};

const RELS_PATH: &str = "word/_rels/document.xml.rels";
const STYLES_PATH: &str = "word/styles.xml";

/// Build a package containing the given entries verbatim.
fn build_package(entries: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content) in entries {
        zip.start_file(*path, SimpleFileOptions::default()).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap()
}

/// Build a package whose document body is `body`, with optional extras.
fn build_docx(body: &str, extras: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{body}</w:body></w:document>"#
    );
    let mut entries: Vec<(&str, &[u8])> = vec![("word/document.xml", document.as_bytes())];
    entries.extend_from_slice(extras);
    build_package(&entries)
}

fn convert(body: &str, extras: &[(&str, &[u8])]) -> String {
    convert_reader(build_docx(body, extras), &ConvertOptions::default())
        .expect("conversion failed")
        .markdown
}

// ============================================================================
// Minimal documents
// ============================================================================

#[test]
fn test_single_bold_run() {
    let body = "<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Hi</w:t></w:r></w:p>";
    assert_eq!(convert(body, &[]), "**Hi**\n");
}

#[test]
fn test_plain_paragraphs_in_order() {
    let body = "<w:p><w:r><w:t>first</w:t></w:r></w:p><w:p><w:r><w:t>second</w:t></w:r></w:p>";
    assert_eq!(convert(body, &[]), "first\nsecond\n");
}

#[test]
fn test_runs_concatenate_within_paragraph() {
    let body = "<w:p><w:r><w:t>a</w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>b</w:t></w:r></w:p>";
    assert_eq!(convert(body, &[]), "a*b*\n");
}

#[test]
fn test_missing_document_part_is_fatal() {
    let package = build_package(&[(STYLES_PATH, b"<w:styles/>")]);
    match convert_reader(package, &ConvertOptions::default()) {
        Err(Error::InvalidDocument(msg)) => assert!(msg.contains("word/document.xml")),
        other => panic!("expected InvalidDocument, got {other:?}"),
    }
}

#[test]
fn test_document_part_with_bom() {
    let mut document = Vec::from([0xEF, 0xBB, 0xBF]);
    document.extend_from_slice(
        b"<w:document><w:body><w:p><w:r><w:t>bom</w:t></w:r></w:p></w:body></w:document>",
    );
    let package = build_package(&[("word/document.xml", &document)]);
    let rendering = convert_reader(package, &ConvertOptions::default()).unwrap();
    assert_eq!(rendering.markdown, "bom\n");
}

// ============================================================================
// Headings and styles
// ============================================================================

fn styled_paragraph(style: &str) -> String {
    format!("<w:p><w:pPr><w:pStyle w:val=\"{style}\"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p>")
}

#[test]
fn test_heading_style_token() {
    assert_eq!(convert(&styled_paragraph("Heading2"), &[]), "## Title\n");
}

#[test]
fn test_numeric_style_token() {
    assert_eq!(convert(&styled_paragraph("2"), &[]), "## Title\n");
}

#[test]
fn test_style_table_resolves_heading_name() {
    let styles = br#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:styleId="Ttl"><w:name w:val="heading 1"/></w:style>
</w:styles>"#;
    assert_eq!(
        convert(&styled_paragraph("Ttl"), &[(STYLES_PATH, styles)]),
        "# Title\n"
    );
}

#[test]
fn test_style_table_resolves_outline_level() {
    let styles = br#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:styleId="Big"><w:name w:val="Display"/><w:pPr><w:outlineLvl w:val="1"/></w:pPr></w:style>
</w:styles>"#;
    assert_eq!(
        convert(&styled_paragraph("Big"), &[(STYLES_PATH, styles)]),
        "## Title\n"
    );
}

#[test]
fn test_unresolvable_style_degrades_to_plain() {
    assert_eq!(convert(&styled_paragraph("Quote"), &[]), "Title\n");
}

#[test]
fn test_list_items() {
    let item = |text: &str| {
        format!(
            "<w:p><w:pPr><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"1\"/></w:numPr></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"
        )
    };
    let body = format!("{}{}", item("one"), item("two"));
    assert_eq!(convert(&body, &[]), "* one\n* two\n");
}

// ============================================================================
// Hyperlinks
// ============================================================================

#[test]
fn test_hyperlink_resolved_through_relationships() {
    let rels = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/" TargetMode="External"/>
</Relationships>"#;
    let body = "<w:p><w:hyperlink r:id=\"rId1\"><w:r><w:t>site</w:t></w:r></w:hyperlink></w:p>";
    assert_eq!(
        convert(body, &[(RELS_PATH, rels)]),
        "[site](https://example.com/)\n"
    );
}

#[test]
fn test_hyperlink_without_relationship_renders_empty_target() {
    let body = "<w:p><w:hyperlink r:id=\"rId1\"><w:r><w:t>text</w:t></w:r></w:hyperlink></w:p>";
    assert_eq!(convert(body, &[]), "[text]()\n");
}

// ============================================================================
// Tables
// ============================================================================

fn cell(text: &str) -> String {
    format!("<w:tc><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:tc>")
}

#[test]
fn test_table_layout() {
    let body = format!(
        "<w:tbl><w:tr>{}{}</w:tr><w:tr>{}{}</w:tr></w:tbl>",
        cell("a"),
        cell("bb"),
        cell("c"),
        cell("d"),
    );
    assert_eq!(convert(&body, &[]), "| |  |\n|-|--|\n|a|bb|\n|c|d |\n\n");
}

#[test]
fn test_table_followed_by_paragraph() {
    let body = format!(
        "<w:tbl><w:tr>{}</w:tr></w:tbl><w:p><w:r><w:t>after</w:t></w:r></w:p>",
        cell("x"),
    );
    assert_eq!(convert(&body, &[]), "| |\n|-|\n|x|\n\nafter\n");
}

// ============================================================================
// Images
// ============================================================================

const IMAGE_RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
</Relationships>"#;

const PAYLOAD: &[u8] = &[0x89, 0x50, 0x4E, 0x47];

fn image_body() -> &'static str {
    "<w:p><w:r><w:drawing><a:blip r:embed=\"rId4\"/></w:drawing></w:r></w:p>"
}

#[test]
fn test_image_embed_mode_inlines_data_uri() {
    let package = build_docx(
        image_body(),
        &[(RELS_PATH, IMAGE_RELS), ("word/media/image1.png", PAYLOAD)],
    );
    let options = ConvertOptions {
        media: MediaMode::Embed,
    };
    let rendering = convert_reader(package, &options).unwrap();
    assert_eq!(
        rendering.markdown,
        "![](data:image/png;base64,iVBORw==)\n"
    );
    assert!(rendering.assets.is_empty());
}

#[test]
fn test_image_extract_mode_collects_asset() {
    let package = build_docx(
        image_body(),
        &[(RELS_PATH, IMAGE_RELS), ("word/media/image1.png", PAYLOAD)],
    );
    let rendering = convert_reader(package, &ConvertOptions::default()).unwrap();
    assert_eq!(rendering.markdown, "![](media/image1.png)\n");
    assert_eq!(rendering.assets.len(), 1);
    assert_eq!(rendering.assets[0].path, "media/image1.png");
    assert_eq!(rendering.assets[0].data, PAYLOAD);

    let dir = tempfile::tempdir().unwrap();
    write_assets_to(dir.path(), &rendering.assets).unwrap();
    let written = std::fs::read(dir.path().join("media/image1.png")).unwrap();
    assert_eq!(written, PAYLOAD);
}

#[test]
fn test_image_with_missing_payload_is_skipped() {
    let package = build_docx(image_body(), &[(RELS_PATH, IMAGE_RELS)]);
    let rendering = convert_reader(package, &ConvertOptions::default()).unwrap();
    assert_eq!(rendering.markdown, "\n");
    assert!(rendering.assets.is_empty());
}

#[test]
fn test_image_with_unknown_relationship_is_skipped() {
    let rendering = convert_reader(build_docx(image_body(), &[]), &ConvertOptions::default())
        .unwrap();
    assert_eq!(rendering.markdown, "\n");
}

// ============================================================================
// Mixed content
// ============================================================================

#[test]
fn test_fallback_content_is_suppressed() {
    let body = "<w:p><mc:AlternateContent><mc:Choice><w:r><w:t>shown</w:t></w:r></mc:Choice>\
<mc:Fallback><w:r><w:t>hidden</w:t></w:r></mc:Fallback></mc:AlternateContent></w:p>";
    assert_eq!(convert(body, &[]), "shown\n");
}

#[test]
fn test_text_box_renders_as_code_block() {
    let body = "<w:p><w:r><w:txbxContent><w:p><w:r><w:t>note</w:t></w:r></w:p></w:txbxContent></w:r></w:p>";
    assert_eq!(convert(body, &[]), "\n```\nnote\n```\n\n");
}
