//! Kept in its own test binary: it installs a global logger.

mod common;

use common::*;
use log::{Level, Metadata, Record};
use lopdf::Document;
use pdf_margin::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static FALLBACK_WARNINGS: AtomicUsize = AtomicUsize::new(0);

struct CountingLogger;

impl log::Log for CountingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn
            && record.args().to_string().contains("no usable MediaBox")
        {
            FALLBACK_WARNINGS.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn flush(&self) {}
}

#[test]
fn test_missing_media_box_is_resolved_once_per_page() {
    log::set_boxed_logger(Box::new(CountingLogger)).unwrap();
    log::set_max_level(log::LevelFilter::Warn);

    let mut doc = create_test_document(&[(612, 792)]);
    let page_id = page_ids(&doc)[0];
    doc.get_dictionary_mut(page_id).unwrap().remove(b"MediaBox");

    let output = process_pdf_bytes(
        &to_bytes(doc),
        &MarginOptions::new(MarginConfig::new(100, MarginSide::Left), RangeMode::All),
    )
    .unwrap();

    let out = Document::load_mem(&output).unwrap();
    assert_eq!(page_size(&out, page_ids(&out)[0]), (712.0, 792.0));
    assert_eq!(FALLBACK_WARNINGS.load(Ordering::SeqCst), 1);
}
