//! Node public key (text form `nodekey:<64 hex>`).
//!
//! Parsing is strict: the prefix is required and the body must decode to
//! exactly 32 bytes. Display is always lowercase.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, NodeGateError};

/// Text prefix of a node public key.
pub const NODE_KEY_PREFIX: &str = "nodekey:";

/// Raw key length in bytes.
pub const NODE_KEY_LEN: usize = 32;

/// Opaque node identity. Equality is exact byte comparison.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdentity([u8; NODE_KEY_LEN]);

impl NodeIdentity {
    pub const fn from_bytes(raw: [u8; NODE_KEY_LEN]) -> Self {
        Self(raw)
    }

    pub fn as_bytes(&self) -> &[u8; NODE_KEY_LEN] {
        &self.0
    }

    /// Parse the `nodekey:<hex>` text form.
    pub fn parse(s: &str) -> Result<Self> {
        let body = s.strip_prefix(NODE_KEY_PREFIX).ok_or_else(|| {
            NodeGateError::InvalidKey(format!("missing {NODE_KEY_PREFIX} prefix"))
        })?;
        if body.len() != NODE_KEY_LEN * 2 {
            return Err(NodeGateError::InvalidKey(format!(
                "expected {} hex digits, got {}",
                NODE_KEY_LEN * 2,
                body.len()
            )));
        }
        let mut raw = [0u8; NODE_KEY_LEN];
        hex::decode_to_slice(body, &mut raw)
            .map_err(|e| NodeGateError::InvalidKey(e.to_string()))?;
        Ok(Self(raw))
    }
}

impl FromStr for NodeIdentity {
    type Err = NodeGateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{NODE_KEY_PREFIX}{}", hex::encode(self.0))
    }
}

impl fmt::Debug for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeIdentity({self})")
    }
}

impl Serialize for NodeIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeIdentity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = NodeIdentity;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a node key string (nodekey:<64 hex>)")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<NodeIdentity, E> {
                NodeIdentity::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(KeyVisitor)
    }
}
