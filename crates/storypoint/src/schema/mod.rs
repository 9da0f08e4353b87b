//! Typed records for historical and new stories.

mod story;
mod table;

pub use story::{HistoricalStory, NewStoryRequest, StoryPoints};
pub use table::{StoryTable, TableSummary};
