//! Opaque identifiers for cards and categories
//!
//! Provides [`CardId`] and [`CategoryId`]. Both wrap the string ids the
//! hosting configuration store already uses, so they serialize transparently.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Id of the sentinel category that holds every unassigned card
pub const AVAILABLE: &str = "available";

/// Stable identifier of a dashboard card
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Create card id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier of a card category
///
/// The special value [`CategoryId::available`] names the sentinel category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Create category id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The `available` sentinel
    #[inline]
    #[must_use]
    pub fn available() -> Self {
        Self(AVAILABLE.to_string())
    }

    /// Check if this is the `available` sentinel
    #[inline]
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.0 == AVAILABLE
    }

    /// Borrow the raw id
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CategoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_sentinel() {
        assert!(CategoryId::available().is_available());
        assert!(CategoryId::from("available").is_available());
        assert!(!CategoryId::from("productivity").is_available());
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&CardId::new("weather")).unwrap();
        assert_eq!(json, "\"weather\"");

        let back: CategoryId = serde_json::from_str("\"custom-3\"").unwrap();
        assert_eq!(back, CategoryId::new("custom-3"));
    }

    #[test]
    fn display_is_raw_id() {
        assert_eq!(CardId::new("calendar").to_string(), "calendar");
        assert_eq!(CategoryId::new("team").to_string(), "team");
    }
}
