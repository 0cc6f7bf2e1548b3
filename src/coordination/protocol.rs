//! Client Payload Format
//!
//! The client-facing API speaks single-member JSON objects:
//!
//! - write body: `{"<key>": "<value>"}`
//! - read response: `{"<key>": "<value>"}`
//! - delete response: `1` when some node held the key, `0` otherwise
//!
//! Keys for reads and deletes come from the last segment of the URL path, so
//! a write whose key contains `/` or repeats a member is rejected.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::CacheError;

/// Client write extracted from a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutCommand {
    pub key: String,
    pub value: String,
}

/// Members of a JSON object in document order, duplicates included.
struct BodyMembers(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for BodyMembers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = BodyMembers;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<BodyMembers, A::Error> {
                let mut members = Vec::new();
                while let Some(member) = map.next_entry::<String, Value>()? {
                    members.push(member);
                }
                Ok(BodyMembers(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}

impl PutCommand {
    pub fn parse(body: &str) -> Result<Self, CacheError> {
        let BodyMembers(members) = serde_json::from_str::<BodyMembers>(body)
            .map_err(|e| CacheError::Malformed(format!("body is not a JSON object: {e}")))?;

        // Repeated names count as separate members.
        let [(key, value)]: [(String, Value); 1] =
            members.try_into().map_err(|members: Vec<(String, Value)>| {
                CacheError::Malformed(format!(
                    "expected exactly one key/value pair, got {}",
                    members.len()
                ))
            })?;

        if key.is_empty() {
            return Err(CacheError::Malformed("empty key".to_string()));
        }
        // Reads and deletes address a key by the last path segment only.
        if key.contains('/') {
            return Err(CacheError::Malformed(format!("key '{key}' must not contain '/'")));
        }
        match value {
            Value::String(value) => Ok(Self { key, value }),
            other => Err(CacheError::Malformed(format!(
                "value for key '{key}' must be a string, got {other}"
            ))),
        }
    }
}

/// Extracts the key from a request path such as `a/b/key`.
pub fn key_from_path(path: &str) -> Result<&str, CacheError> {
    let key = path.rsplit('/').next().unwrap_or_default();
    if key.is_empty() {
        return Err(CacheError::Malformed(format!("no key in path '{path}'")));
    }
    Ok(key)
}

/// Body returned for a successful read.
pub fn get_response_body(key: &str, value: String) -> Value {
    let mut body = Map::new();
    body.insert(key.to_string(), Value::String(value));
    Value::Object(body)
}
