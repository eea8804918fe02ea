//! Skill catalog data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Category assigned to skills created lazily through the catalog.
pub const DEFAULT_SKILL_CATEGORY: &str = "Technology";

/// Stable skill identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SkillId(Uuid);

impl SkillId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named skill members can offer or seek.
///
/// Names are unique case-insensitively; [`skill_name_key`] produces the
/// normalised form the storage layer keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Stable identifier.
    pub id: SkillId,
    /// Display name as first entered.
    pub name: String,
    /// Grouping category.
    pub category: String,
    /// Optional longer description.
    pub description: Option<String>,
}

/// Normalised lookup key for a skill name.
///
/// Case-insensitive uniqueness is defined over this form.
pub fn skill_name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Whether a skill link marks the skill as taught or sought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillDirection {
    /// The member teaches this skill.
    Offered,
    /// The member wants to learn this skill.
    Wanted,
}

impl SkillDirection {
    /// Canonical storage representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Offered => "OFFERED",
            Self::Wanted => "WANTED",
        }
    }
}

/// Error raised when parsing a [`SkillDirection`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised skill direction: {value}")]
pub struct SkillDirectionParseError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for SkillDirection {
    type Err = SkillDirectionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "OFFERED" => Ok(Self::Offered),
            "WANTED" => Ok(Self::Wanted),
            _ => Err(SkillDirectionParseError {
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for SkillDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Go", "go")]
    #[case("  Web Design  ", "web design")]
    #[case("SQL", "sql")]
    fn name_key_lowercases_and_trims(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(skill_name_key(input), expected);
    }

    #[rstest]
    #[case("offered", SkillDirection::Offered)]
    #[case("WANTED", SkillDirection::Wanted)]
    fn direction_parses_case_insensitively(#[case] input: &str, #[case] expected: SkillDirection) {
        assert_eq!(input.parse::<SkillDirection>(), Ok(expected));
    }

    #[rstest]
    fn direction_rejects_unknown_values() {
        assert!("TAUGHT".parse::<SkillDirection>().is_err());
    }
}
