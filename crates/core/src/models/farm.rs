//! Farm entity model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::pond::Pond;
use crate::types::{DbId, Timestamp};

/// A live farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Farm {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating or renaming a farm.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FarmBind {
    #[validate(length(
        min = 4,
        max = 100,
        message = "name must be between 4 and 100 characters"
    ))]
    pub name: String,
}

/// A farm together with its live ponds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FarmWithPonds {
    #[serde(flatten)]
    pub farm: Farm,
    pub ponds: Vec<Pond>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind(name: &str) -> FarmBind {
        FarmBind {
            name: name.to_string(),
        }
    }

    #[test]
    fn name_length_bounds() {
        assert!(bind("abc").validate().is_err());
        assert!(bind("abcd").validate().is_ok());
        assert!(bind(&"x".repeat(100)).validate().is_ok());
        assert!(bind(&"x".repeat(101)).validate().is_err());
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // Four two-byte characters.
        assert!(bind("éééé").validate().is_ok());
    }

    #[test]
    fn farm_with_ponds_serializes_flat() {
        let now = chrono::Utc::now();
        let farm = Farm {
            id: DbId::nil(),
            name: "Lake One".to_string(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(FarmWithPonds {
            farm,
            ponds: Vec::new(),
        })
        .unwrap();
        assert_eq!(json["name"], "Lake One");
        assert!(json["ponds"].as_array().unwrap().is_empty());
        assert!(json.get("farm").is_none());
    }
}
