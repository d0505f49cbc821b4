//! End-to-end tests for `extract_text` and `ocr_pdf`.
//!
//! OCR itself needs poppler and tesseract installed, so these tests only
//! cover argument handling and tool failures for `ocr_pdf`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn binary(name: &str) -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.push(name);
    path
}

fn run(name: &str, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(binary(name))
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run {}: {}", name, e));
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

/// Two-page PDF: page 1 draws a line of text, page 2 is blank (as a scan
/// without a text layer would be).
fn two_page_pdf(path: &Path) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let text = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal("Hello from page one")]),
            Operation::new("ET", vec![]),
        ],
    };
    let text_id = doc.add_object(Stream::new(dictionary! {}, text.encode().unwrap()));
    let blank_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));

    let page1 = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => text_id,
    });
    let page2 = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => blank_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page1.into(), page2.into()],
        "Count" => 2,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[test]
fn test_extract_marks_every_page() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("mixed.pdf");
    let output = tmp.path().join("mixed.txt");
    two_page_pdf(&input);

    let (stdout, stderr, success) = run("extract_text", &[path_str(&input), path_str(&output)]);
    assert!(success, "extract_text failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Wrote 2 pages"), "stdout={}", stdout);

    let out = fs::read_to_string(&output).unwrap();
    let page1 = out.find("=== PAGE 1 ===").expect("page 1 marker");
    let page2 = out.find("=== PAGE 2 ===").expect("page 2 marker");
    assert!(page1 < page2);
    assert!(
        out[page2..].contains("[NO TEXT ON PAGE - POSSIBLE SCAN/IMAGE PAGE]"),
        "page 2 should carry the no-text marker: {}",
        out
    );
}

#[test]
fn test_extract_usage_on_missing_arguments() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("only.pdf");
    two_page_pdf(&input);

    let (_, stderr, success) = run("extract_text", &[path_str(&input)]);
    assert!(!success, "missing output path must fail");
    assert!(stderr.contains("Usage"), "stderr={}", stderr);
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
}

#[test]
fn test_extract_invalid_pdf_fails() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("bad.pdf");
    let output = tmp.path().join("bad.txt");
    fs::write(&input, b"not a valid pdf").unwrap();

    let (_, stderr, success) = run("extract_text", &[path_str(&input), path_str(&output)]);
    assert!(!success);
    assert!(stderr.contains("Failed to extract text"), "stderr={}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_ocr_usage_on_missing_arguments() {
    let (stdout, stderr, success) = run("ocr_pdf", &[]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Usage"), "stderr={}", stderr);
}

#[test]
fn test_ocr_rejects_zero_dpi() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("scan.pdf");
    let output = tmp.path().join("scan.txt");
    two_page_pdf(&input);

    let (_, stderr, success) = run(
        "ocr_pdf",
        &[path_str(&input), path_str(&output), "--dpi", "0"],
    );
    assert!(!success);
    assert!(stderr.contains("dpi"), "stderr={}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_ocr_missing_renderer_fails_cleanly() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("scan.pdf");
    let output = tmp.path().join("scan.txt");
    let config_path = tmp.path().join("ocr.toml");
    two_page_pdf(&input);
    fs::write(
        &config_path,
        "[ocr]\npdftoppm = \"/nonexistent/bin/pdftoppm\"\n",
    )
    .unwrap();

    let (_, stderr, success) = run(
        "ocr_pdf",
        &[
            path_str(&input),
            path_str(&output),
            "--config",
            path_str(&config_path),
        ],
    );
    assert!(!success);
    assert!(stderr.contains("pdftoppm"), "stderr={}", stderr);
    assert!(!output.exists());
}
