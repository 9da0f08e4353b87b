//! Validated collection of historical stories.

use serde::{Deserialize, Serialize};

use super::story::HistoricalStory;

/// Historical stories that survived cleaning, in upload order.
///
/// Every row holds all four required fields and an on-scale story point
/// value. Instances come out of [`crate::validation::clean`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryTable {
    stories: Vec<HistoricalStory>,
    /// Row count of the table the stories were cleaned from.
    source_rows: usize,
}

/// Figures shown after an upload is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub row_count: usize,
    pub dropped_rows: usize,
    pub min_points: Option<u32>,
    pub max_points: Option<u32>,
}

impl StoryTable {
    pub(crate) fn new(stories: Vec<HistoricalStory>, source_rows: usize) -> Self {
        Self {
            stories,
            source_rows,
        }
    }

    /// Build a table from stories that are already typed.
    pub fn from_stories(stories: Vec<HistoricalStory>) -> Self {
        let source_rows = stories.len();
        Self::new(stories, source_rows)
    }

    pub fn stories(&self) -> &[HistoricalStory] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// The first `n` stories, in order.
    pub fn first(&self, n: usize) -> &[HistoricalStory] {
        &self.stories[..n.min(self.stories.len())]
    }

    /// Rows removed during cleaning.
    pub fn dropped_rows(&self) -> usize {
        self.source_rows.saturating_sub(self.stories.len())
    }

    pub fn summary(&self) -> TableSummary {
        let points = self.stories.iter().map(|s| s.story_points.value());
        TableSummary {
            row_count: self.stories.len(),
            dropped_rows: self.dropped_rows(),
            min_points: points.clone().min(),
            max_points: points.max(),
        }
    }
}
