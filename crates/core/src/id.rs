//! Record identifiers.

use core::fmt;
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

/// Identifier of an inventory or cart record (server-assigned).
///
/// Identifiers are compared numerically: the backend may hand out `7` or
/// `"7"` for the same record, and a row's `data-id` attribute is always text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Parse an optional attribute value (e.g. a row's `data-id`).
    pub fn from_attr(attr: Option<&str>) -> Result<Self, DomainError> {
        match attr {
            Some(raw) => raw.parse(),
            None => Err(DomainError::invalid_id("missing data-id attribute")),
        }
    }

    /// The id that follows this one (used when the backend assigns ids).
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("empty identifier"));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("{trimmed:?}: {e}")))
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ItemIdVisitor)
    }
}

struct ItemIdVisitor;

impl<'de> Visitor<'de> for ItemIdVisitor {
    type Value = ItemId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer or a numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
        Ok(ItemId(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ItemId, E> {
        u64::try_from(v)
            .map(ItemId)
            .map_err(|_| E::custom(format!("negative identifier {v}")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ItemId, E> {
        if v.fract() == 0.0 && v >= 0.0 && v <= u64::MAX as f64 {
            Ok(ItemId(v as u64))
        } else {
            Err(E::custom(format!("non-integral identifier {v}")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
        v.parse().map_err(E::custom)
    }
}
