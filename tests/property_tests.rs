//! Property-based tests for naming and cache behavior
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use vtag::case::to_underscore_case;
use vtag::{FieldDesc, RecordDesc, Resolver, TypeDesc, encoder};

// =============================================================================
// Underscore case
// =============================================================================

proptest! {
    /// Property: alphabetic identifiers never gain doubled, leading or trailing underscores.
    #[test]
    fn underscore_case_is_well_formed(ident in "[A-Za-z]{1,24}") {
        let converted = to_underscore_case(&ident);
        prop_assert!(!converted.contains("__"), "{ident} -> {converted}");
        prop_assert!(!converted.starts_with('_'), "{ident} -> {converted}");
        prop_assert!(!converted.ends_with('_'), "{ident} -> {converted}");
        prop_assert!(!converted.chars().any(|c| c.is_ascii_uppercase()));
    }

    /// Property: conversion only lowercases and inserts separators.
    #[test]
    fn underscore_case_preserves_letters(ident in "[A-Za-z0-9]{1,24}") {
        let converted = to_underscore_case(&ident);
        prop_assert_eq!(converted.replace('_', ""), ident.to_ascii_lowercase());
    }

    /// Property: converting twice is the same as converting once.
    #[test]
    fn underscore_case_is_idempotent(ident in "[A-Za-z_]{0,24}") {
        let once = to_underscore_case(&ident);
        prop_assert_eq!(to_underscore_case(&once), once.clone());
    }
}

// =============================================================================
// Cache transparency
// =============================================================================

const LABELS: &[&str] = &["list", "detail", "admin"];

fn catalog_record() -> TypeDesc {
    let address = TypeDesc::Record(RecordDesc::from_fields(
        "props::Address",
        "Address",
        vec![
            FieldDesc::new("StreetName", TypeDesc::Scalar(vtag::ScalarKind::String)).tag("vtag", ",list,detail"),
            FieldDesc::new("ZipCode", TypeDesc::Scalar(vtag::ScalarKind::String)).tag("vtag", "zip,detail"),
        ],
    ));
    TypeDesc::Record(RecordDesc::from_fields(
        "props::Customer",
        "Customer",
        vec![
            FieldDesc::new("ID", TypeDesc::Scalar(vtag::ScalarKind::Uint)).tag("vtag", ",list,detail,admin"),
            FieldDesc::new("Home", TypeDesc::indirect(address.clone())).tag("vtag", ",detail"),
            FieldDesc::new("Billing", address.clone()).tag("vtag", "bill,list,admin"),
            FieldDesc::new("Audit", address).embed(true),
            FieldDesc::new("Secret", TypeDesc::Scalar(vtag::ScalarKind::String)).tag("vtag", "-,admin"),
        ],
    ))
}

proptest! {
    /// Property: the cache never changes what a resolution returns.
    #[test]
    fn cached_and_uncached_resolution_agree(
        picks in proptest::sample::subsequence(LABELS.to_vec(), 0..=LABELS.len()),
        prefix in "[a-z]{0,4}",
        repeats in 1usize..4,
    ) {
        let ty = catalog_record();
        let cached = Resolver::new("", Some(encoder::underscore as vtag::EncoderFn), true);
        let uncached = Resolver::new("", Some(encoder::underscore as vtag::EncoderFn), false);
        let expected = uncached.resolve(&ty, &prefix, &picks).unwrap();
        for _ in 0..repeats {
            prop_assert_eq!(cached.resolve(&ty, &prefix, &picks).unwrap(), expected.clone());
        }
    }
}

#[test]
fn customer_projection_example() {
    let ty = catalog_record();
    let resolver = Resolver::new("", Some(encoder::underscore as vtag::EncoderFn), true);
    assert_eq!(
        resolver.resolve(&ty, "", &["list"]).unwrap(),
        ["id", "bill.street_name", "street_name"]
    );
    assert_eq!(
        resolver.resolve(&ty, "", &["detail"]).unwrap(),
        ["id", "home.street_name", "home.zip", "street_name", "zip"]
    );
    assert_eq!(resolver.resolve(&ty, "", &["admin"]).unwrap(), ["id"]);
}
