#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Build a PDF whose pages have the given sizes. Each page's content stream
/// ends with a `% page N` marker so output pages can be traced back.
pub fn create_test_document(sizes: &[(i64, i64)]) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for (i, &(width, height)) in sizes.iter().enumerate() {
        let content = format!("0 0 m {} {} l S % page {}\n", width, height, i + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(sizes.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

/// `num_pages` US Letter pages, serialized
pub fn create_test_pdf(num_pages: usize) -> Vec<u8> {
    let sizes = vec![(612, 792); num_pages];
    to_bytes(create_test_document(&sizes))
}

/// A catalog with no `/Pages` entry, serialized
pub fn create_pdf_without_page_tree() -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![(
        "Type",
        Object::Name(b"Catalog".to_vec()),
    )]));
    doc.trailer.set("Root", catalog_id);
    to_bytes(doc)
}

/// A content stream encoded with a filter lopdf cannot decode
pub fn undecodable_stream(content: &[u8]) -> Stream {
    let dict = Dictionary::from_iter(vec![("Filter", Object::Name(b"BogusDecode".to_vec()))]);
    Stream::new(dict, content.to_vec())
}

/// One Letter page whose `/Contents` is an array: a plain stream followed
/// by one with an unknown filter
pub fn create_pdf_with_undecodable_content_array() -> Vec<u8> {
    let mut doc = create_test_document(&[(612, 792)]);
    let page_id = page_ids(&doc)[0];
    let plain_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
    let bogus_id = doc.add_object(undecodable_stream(b"\x00\x01 garbled"));
    doc.get_dictionary_mut(page_id).unwrap().set(
        "Contents",
        Object::Array(vec![Object::Reference(plain_id), Object::Reference(bogus_id)]),
    );
    to_bytes(doc)
}

pub fn to_bytes(mut doc: Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("expected number, got {:?}", other),
    }
}

/// (width, height) of an output page's MediaBox
pub fn page_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let media_box = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap();
    (
        number(&media_box[2]) - number(&media_box[0]),
        number(&media_box[3]) - number(&media_box[1]),
    )
}

/// The page's own content stream (the placement command)
pub fn page_content(doc: &Document, page_id: ObjectId) -> String {
    let contents_id = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Contents")
        .unwrap()
        .as_reference()
        .unwrap();
    let stream = doc.get_object(contents_id).unwrap().as_stream().unwrap();
    String::from_utf8(stream.content.clone()).unwrap()
}

/// The embedded source page (Form XObject) of an output page
pub fn embedded_xobject(doc: &Document, page_id: ObjectId) -> &Stream {
    let resources = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap();
    let xobject_id = resources
        .get(b"XObject")
        .unwrap()
        .as_dict()
        .unwrap()
        .get(b"SrcPage")
        .unwrap()
        .as_reference()
        .unwrap();
    doc.get_object(xobject_id).unwrap().as_stream().unwrap()
}

/// Content of the source page embedded into an output page
pub fn embedded_content(doc: &Document, page_id: ObjectId) -> String {
    String::from_utf8(embedded_xobject(doc, page_id).content.clone()).unwrap()
}
