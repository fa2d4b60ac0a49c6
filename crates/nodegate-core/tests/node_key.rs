//! Node key text form parsing.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use nodegate_core::key::NodeIdentity;
use nodegate_core::Snapshot;

const K1: &str = "nodekey:0101010101010101010101010101010101010101010101010101010101010101";

#[test]
fn parse_and_display_lowercase() {
    let upper = "nodekey:ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF01234567";
    let k = NodeIdentity::parse(upper).unwrap();
    assert_eq!(k.to_string(), upper.to_lowercase());
    assert_eq!(k.as_bytes()[0], 0xab);
}

#[test]
fn rejects_malformed_keys() {
    let cases = [
        "0101010101010101010101010101010101010101010101010101010101010101",
        "nodekey:0101",
        "nodekey:zz01010101010101010101010101010101010101010101010101010101010101",
        "discokey:0101010101010101010101010101010101010101010101010101010101010101",
        "",
    ];
    for c in cases {
        let err = NodeIdentity::parse(c).expect_err(c);
        assert_eq!(err.client_code().as_str(), "INVALID_KEY", "case={c}");
    }
}

#[test]
fn equality_is_exact_bytes() {
    let a = NodeIdentity::parse(K1).unwrap();
    let mut raw = *a.as_bytes();
    assert_eq!(a, NodeIdentity::from_bytes(raw));
    raw[31] ^= 1;
    assert_ne!(a, NodeIdentity::from_bytes(raw));
}

#[test]
fn serde_uses_text_form() {
    let keys: Vec<NodeIdentity> = serde_json::from_str(&format!("[\"{K1}\"]")).unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(serde_json::to_string(&keys[0]).unwrap(), format!("\"{K1}\""));

    let bad = serde_json::from_str::<Vec<NodeIdentity>>("[\"nodekey:00\"]");
    assert!(bad.is_err());
}

#[test]
fn snapshot_membership_and_dedup() {
    let a = NodeIdentity::from_bytes([1; 32]);
    let b = NodeIdentity::from_bytes([2; 32]);
    let c = NodeIdentity::from_bytes([3; 32]);

    let snap = Snapshot::from(vec![a, b, a]);
    assert_eq!(snap.len(), 2);
    assert!(snap.contains(&a));
    assert!(snap.contains(&b));
    assert!(!snap.contains(&c));

    let empty = Snapshot::empty();
    assert!(empty.is_empty());
    assert!(!empty.contains(&a));
}
