use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Store-generated identifier of a plant.
///
/// This is the value that appears in `/plant/{id}` style URLs. Parse it from
/// a path segment with [`str::parse`]; malformed input yields
/// [`InvalidIdError`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct PlantId(Uuid);

impl PlantId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for PlantId {
    type Err = InvalidIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| InvalidIdError(s.to_owned()))
    }
}

/// Error returned when a string is not a well-formed [`PlantId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {0:?}")]
pub struct InvalidIdError(pub String);

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A tracked garden entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    pub variety: String,
    pub photo_url: String,
    pub date_planted: String,
    pub created_at: DateTime<Utc>,
}

/// A dated quantity picked from one plant.
///
/// `plant_id` is not checked against `plants` on insert, so it may name a
/// plant that no longer (or never did) exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Harvest {
    pub id: Uuid,
    pub plant_id: PlantId,
    pub quantity: String,
    pub date: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Insert / update payloads
// ---------------------------------------------------------------------------

/// The four user-editable plant fields, used for both insert and
/// whole-record update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPlant {
    pub name: String,
    pub variety: String,
    pub photo_url: String,
    pub date_planted: String,
}

/// Fields of a harvest to be recorded against `plant_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHarvest {
    pub plant_id: PlantId,
    pub quantity: String,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_id_parses_hyphenated_uuid() {
        let raw = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let id: PlantId = raw.parse().expect("should parse");
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn plant_id_display_is_lowercase_hyphenated() {
        let id: PlantId = "67E5504410B1426F9247BB680E5FE0C8".parse().unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn plant_id_rejects_garbage() {
        let err = "not-an-id".parse::<PlantId>().unwrap_err();
        assert_eq!(err, InvalidIdError("not-an-id".to_string()));
        assert_eq!(err.to_string(), "invalid identifier: \"not-an-id\"");
    }

    #[test]
    fn plant_id_rejects_empty() {
        assert!("".parse::<PlantId>().is_err());
    }

    #[test]
    fn plant_id_serializes_as_plain_string() {
        let id = PlantId::new(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }
}
