//! Snapshot tests for the generated C++ boilerplate.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::path::Path;

use cxscaffold_core::{Encoding, GeneratedFile};
use cxscaffold_cpp::files::{ClassHeader, ClassSource, HeaderStub, SourceStub};

#[test]
fn test_class_header() {
    let header = ClassHeader::new("Renderer", Encoding::Utf8).render();
    insta::assert_snapshot!("class_header", header);
}

#[test]
fn test_class_source() {
    let source = ClassSource::new("Renderer", Encoding::Utf8).render();
    insta::assert_snapshot!("class_source", source);
}

#[test]
fn test_header_stub() {
    let header = HeaderStub::new("Types", Encoding::Utf8).render();
    insta::assert_snapshot!("header_stub", header);
}

#[test]
fn test_source_stub() {
    let source = SourceStub::new("main", Encoding::Utf8).render();
    insta::assert_snapshot!("source_stub", source);
}

#[test]
fn test_file_names() {
    let dir = Path::new("src/Core");
    assert_eq!(
        ClassHeader::new("Foo", Encoding::Utf8).path(dir),
        dir.join("Foo.h")
    );
    assert_eq!(
        ClassSource::new("Foo", Encoding::Utf8).path(dir),
        dir.join("Foo.cpp")
    );
    assert_eq!(
        HeaderStub::new("Foo", Encoding::Utf8).path(dir),
        dir.join("Foo.h")
    );
    assert_eq!(
        SourceStub::new("Foo", Encoding::Utf8).path(dir),
        dir.join("Foo.cpp")
    );
}

#[test]
fn test_boilerplate_never_overwrites() {
    use cxscaffold_core::Overwrite;

    let files: [&dyn GeneratedFile; 4] = [
        &ClassHeader::new("Foo", Encoding::Utf8Bom),
        &ClassSource::new("Foo", Encoding::Utf8Bom),
        &HeaderStub::new("Foo", Encoding::Utf8Bom),
        &SourceStub::new("Foo", Encoding::Utf8Bom),
    ];
    for file in files {
        let rules = file.rules();
        assert_eq!(rules.overwrite, Overwrite::Never);
        assert_eq!(rules.encoding, Encoding::Utf8Bom);
    }
}
