//! Typed story records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::{REFERENCE_SEQUENCE, snap_to_fibonacci};

/// A story point value that is always a member of the reference sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StoryPoints(u32);

impl StoryPoints {
    /// Accept `value` only if it is already on the scale.
    pub fn new(value: u32) -> Option<Self> {
        REFERENCE_SEQUENCE.contains(&value).then_some(Self(value))
    }

    /// Snap an arbitrary number onto the scale.
    pub fn snap(value: f64) -> Self {
        Self(snap_to_fibonacci(value))
    }

    /// The underlying value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StoryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for StoryPoints {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u32::deserialize(deserializer)?;
        StoryPoints::new(value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "{} is not a valid story point value (expected one of {:?})",
                value, REFERENCE_SEQUENCE
            ))
        })
    }
}

/// One cleaned row of historical data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalStory {
    pub summary: String,
    pub description: String,
    pub acceptance_criteria: String,
    pub story_points: StoryPoints,
    /// Free-form time actually spent, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<String>,
}

/// The story a user wants estimated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStoryRequest {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "acceptance_criteria")]
    pub acceptance_criteria: String,
}

impl NewStoryRequest {
    /// Create a request from the three story fields.
    pub fn new(
        summary: impl Into<String>,
        description: impl Into<String>,
        acceptance_criteria: impl Into<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
            acceptance_criteria: acceptance_criteria.into(),
        }
    }

    /// Whether the one mandatory field is blank.
    pub fn is_missing_summary(&self) -> bool {
        self.summary.trim().is_empty()
    }
}
