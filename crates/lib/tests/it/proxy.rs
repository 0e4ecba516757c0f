//! AttributeProxy integration tests: prefix-bound access into nested
//! attributes, delegation semantics, and issuance rules.

use veneer::{Document, map::DocMap};

use crate::helpers::{ann, person_schema};

#[test]
fn test_proxy_over_branch_node() {
    let mut doc = Document::new(person_schema(), ann()).unwrap();

    let mut address = doc.proxy("address").unwrap();
    assert_eq!(address.prefix().as_str(), "address");
    assert_eq!(address.get("city").unwrap().unwrap(), "X");

    address.set("zip", "1000").unwrap();
    assert_eq!(doc.get("address.zip").unwrap().unwrap(), "1000");
}

#[test]
fn test_proxy_over_map_attribute_admits_extensions() {
    let mut doc = Document::new(person_schema(), ann()).unwrap();

    let mut meta = doc.proxy("meta").unwrap();
    meta.set("custom.field", 1).unwrap();
    assert_eq!(*meta.get("custom.field").unwrap().unwrap(), 1);

    assert_eq!(*doc.get("meta.custom.field").unwrap().unwrap(), 1);
}

#[test]
fn test_proxy_writes_go_through_schema_checks() {
    let mut doc = Document::new(person_schema(), ann()).unwrap();

    let mut address = doc.proxy("address").unwrap();
    // declared as text, so the write is sanitized like a direct set
    address.set("city", 42).unwrap();
    assert_eq!(address.get("city").unwrap().unwrap(), "42");

    // undeclared sub-path below a non-map branch stays rejected
    let err = address.set("country", "Z").unwrap_err();
    assert!(err.is_unknown_attribute());
}

#[test]
fn test_proxy_unset_delegates() {
    let mut doc = Document::new(person_schema(), ann()).unwrap();

    let mut address = doc.proxy("address").unwrap();
    assert_eq!(address.unset("city").unwrap(), "X");
    assert!(doc.get("address.city").unwrap().is_none());
}

#[test]
fn test_proxy_narrows_with_at() {
    let mut doc = Document::new(
        person_schema(),
        ann().with("meta.custom.field", "deep"),
    )
    .unwrap();

    let meta = doc.proxy("meta").unwrap();
    let custom = meta.at("custom");
    assert_eq!(custom.prefix().as_str(), "meta.custom");
    assert_eq!(custom.get("field").unwrap().unwrap(), "deep");
}

#[test]
fn test_proxy_rejected_for_scalar_and_unknown_paths() {
    let mut doc = Document::new(person_schema(), ann()).unwrap();

    // scalar leaf
    let err = doc.proxy("name").unwrap_err();
    assert_eq!(err.module(), "document");
    // declared scalar below a branch
    assert!(doc.proxy("address.city").is_err());
    // undeclared path
    assert!(doc.proxy("unknown").is_err());
}

#[test]
fn test_proxy_has_no_storage_of_its_own() {
    let mut doc = Document::new(person_schema(), DocMap::new()).unwrap();

    let mut address = doc.proxy("address").unwrap();
    // nothing exists under the prefix until a write lands on the document
    assert!(address.get("city").unwrap().is_none());
    address.set("city", "Y").unwrap();

    assert_eq!(doc.attributes().get("address.city").unwrap(), "Y");
}
