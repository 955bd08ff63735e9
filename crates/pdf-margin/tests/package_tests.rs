use pdf_margin::*;
use std::io::{Cursor, Read};

fn output(name: &str, bytes: &[u8]) -> ProcessedOutput {
    ProcessedOutput {
        source_name: name.to_string(),
        bytes: bytes.to_vec(),
    }
}

fn margin(size: u32) -> MarginConfig {
    MarginConfig::new(size, MarginSide::Left)
}

#[test]
fn test_single_output_is_passed_through() {
    let result = BatchResult {
        outputs: vec![output("doc.pdf", b"pdf-bytes")],
        failures: Vec::new(),
    };

    match package(result, &margin(200)).unwrap() {
        Deliverable::Single { file_name, bytes } => {
            assert_eq!(file_name, "doc-margin-200px.pdf");
            assert_eq!(bytes, b"pdf-bytes");
        }
        other => panic!("Expected single deliverable, got {:?}", other),
    }
}

#[test]
fn test_multiple_outputs_become_archive() {
    let result = BatchResult {
        outputs: vec![output("report.pdf", b"one"), output("notes.pdf", b"two")],
        failures: Vec::new(),
    };

    let deliverable = package(result, &margin(300)).unwrap();
    assert_eq!(
        deliverable.file_name(),
        "report_and_more_pdfs_with_300px_margin.zip"
    );

    let Deliverable::Archive(archive) = deliverable else {
        panic!("Expected archive");
    };
    let names: Vec<&str> = archive.entries.iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["report-margin-300px.pdf", "notes-margin-300px.pdf"]
    );
    assert_eq!(archive.entry("notes-margin-300px.pdf").unwrap().bytes, b"two");
}

#[test]
fn test_failures_are_left_out() {
    let result = BatchResult {
        outputs: vec![output("good.pdf", b"ok")],
        failures: vec![DocumentFailure {
            source_name: "bad.pdf".to_string(),
            error: "Failed to load PDF".to_string(),
        }],
    };

    let deliverable = package(result, &margin(100)).unwrap();
    assert_eq!(deliverable.file_name(), "good-margin-100px.pdf");
}

#[test]
fn test_nothing_to_package() {
    let result = BatchResult {
        outputs: Vec::new(),
        failures: vec![DocumentFailure {
            source_name: "bad.pdf".to_string(),
            error: "boom".to_string(),
        }],
    };
    assert!(matches!(
        package(result, &margin(100)),
        Err(MarginError::NoOutputs)
    ));
}

#[test]
fn test_duplicate_source_names_get_distinct_entries() {
    let result = BatchResult {
        outputs: vec![output("scan.pdf", b"1"), output("scan.pdf", b"2")],
        failures: Vec::new(),
    };

    let Deliverable::Archive(archive) = package(result, &margin(100)).unwrap() else {
        panic!("Expected archive");
    };
    let names: Vec<&str> = archive.entries.iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(names, vec!["scan-margin-100px.pdf", "scan-margin-100px-2.pdf"]);
}

#[test]
fn test_base_name_rules() {
    use pdf_margin::package::base_name;

    assert_eq!(base_name("doc.pdf"), "doc");
    assert_eq!(base_name("my.report.v2.pdf"), "my.report.v2");
    assert_eq!(base_name("noext"), "noext");
    assert_eq!(base_name("dir/sub/file.PDF"), "file");
    assert_eq!(base_name("C:\\scans\\page.pdf"), "page");
}

#[test]
fn test_zip_encoding_is_deterministic_and_readable() {
    let archive = Archive {
        name: "a_and_more_pdfs_with_100px_margin.zip".to_string(),
        entries: vec![
            ArchiveEntry {
                file_name: "a-margin-100px.pdf".to_string(),
                bytes: b"first".to_vec(),
            },
            ArchiveEntry {
                file_name: "b-margin-100px.pdf".to_string(),
                bytes: b"second".to_vec(),
            },
        ],
    };

    let first = archive.to_zip().unwrap();
    let second = archive.to_zip().unwrap();
    assert_eq!(first, second);

    let mut zip = zip::ZipArchive::new(Cursor::new(first)).unwrap();
    assert_eq!(zip.len(), 2);

    let mut contents = String::new();
    zip.by_name("b-margin-100px.pdf")
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "second");
}
