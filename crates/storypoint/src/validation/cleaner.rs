//! Schema check and row cleaning for historical story uploads.

use std::path::Path;

use thiserror::Error;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::input::{DataTable, Parser, ParserConfig};
use crate::schema::{HistoricalStory, StoryPoints, StoryTable};

/// Columns an upload must carry, matched after trimming header names.
pub const REQUIRED_COLUMNS: [&str; 4] =
    ["Summary", "Description", "AcceptanceCriteria", "StoryPoints"];

/// Optional passthrough column.
pub const ACTUAL_TIME_COLUMN: &str = "ActualTime";

/// Text stored for a missing acceptance criteria cell.
pub const MISSING_TEXT: &str = "N/A";

/// Why an upload was rejected. Always recoverable and displayable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// One or more required columns are absent.
    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The columns are present but no row survived cleaning.
    #[error("none of the {total} rows contain valid data")]
    NoValidRows { total: usize },

    /// The source could not be read or parsed at all.
    #[error("could not read data: {reason}")]
    Unreadable { reason: String },
}

impl SchemaError {
    /// Message suitable for showing to the person who uploaded the file.
    pub fn user_message(&self) -> String {
        format!(
            "CSV validation failed ({}). Please check the format. Required columns: {}",
            self,
            REQUIRED_COLUMNS.join(", ")
        )
    }
}

/// Positions of the recognised columns in a table.
struct ColumnMap {
    summary: usize,
    description: usize,
    acceptance_criteria: usize,
    story_points: usize,
    actual_time: Option<usize>,
}

impl ColumnMap {
    fn resolve(table: &DataTable) -> Result<Self, SchemaError> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| table.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns { missing });
        }

        // Presence checked above
        let index = |name| table.column_index(name).unwrap_or_default();
        Ok(Self {
            summary: index("Summary"),
            description: index("Description"),
            acceptance_criteria: index("AcceptanceCriteria"),
            story_points: index("StoryPoints"),
            actual_time: table.column_index(ACTUAL_TIME_COLUMN),
        })
    }
}

/// Parse a cell as a number, treating anything unparseable as missing.
pub fn try_parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Trimmed cell, or `None` when it is blank or a null marker.
///
/// Markers are matched after trimming so no cleaned value can read as
/// missing when the table is cleaned again.
fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!DataTable::is_null_value(trimmed)).then_some(trimmed)
}

/// Required text cell: present, not a null marker, non-empty once trimmed.
fn required_text(value: &str) -> Option<String> {
    present(value).map(str::to_string)
}

fn clean_row(row: &[String], columns: &ColumnMap) -> Option<HistoricalStory> {
    let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

    let summary = required_text(cell(columns.summary))?;
    let description = required_text(cell(columns.description))?;

    let raw_points = present(cell(columns.story_points))?;
    let story_points = StoryPoints::snap(try_parse_number(raw_points)?);

    let acceptance_criteria = required_text(cell(columns.acceptance_criteria))
        .unwrap_or_else(|| MISSING_TEXT.to_string());

    let actual_time = columns
        .actual_time
        .and_then(|i| present(cell(i)))
        .map(str::to_string);

    Some(HistoricalStory {
        summary,
        description,
        acceptance_criteria,
        story_points,
        actual_time,
    })
}

/// Check the schema of `table` and keep only its usable rows.
///
/// Rows missing a summary, description or numeric story point value are
/// dropped; surviving story points are snapped onto the reference
/// sequence and text fields are trimmed. Row order is preserved.
pub fn clean(
    table: &DataTable,
    sink: &mut dyn DiagnosticSink,
) -> Result<StoryTable, SchemaError> {
    let result = clean_inner(table, sink);
    if let Err(ref e) = result {
        sink.record(Diagnostic::ValidationFailed {
            reason: e.to_string(),
        });
    }
    result
}

fn clean_inner(
    table: &DataTable,
    sink: &mut dyn DiagnosticSink,
) -> Result<StoryTable, SchemaError> {
    let columns = ColumnMap::resolve(table)?;
    let total = table.row_count();

    let stories: Vec<HistoricalStory> = table
        .rows
        .iter()
        .filter_map(|row| clean_row(row, &columns))
        .collect();

    if stories.is_empty() {
        return Err(SchemaError::NoValidRows { total });
    }

    let dropped = total - stories.len();
    if dropped > 0 {
        sink.record(Diagnostic::RowsDropped { dropped, total });
    }

    Ok(StoryTable::new(stories, total))
}

/// Read and clean a CSV file. Read failures become [`SchemaError::Unreadable`].
pub fn load_history(
    path: impl AsRef<Path>,
    config: &ParserConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<StoryTable, SchemaError> {
    match Parser::with_config(config.clone()).parse_file(path) {
        Ok((table, _metadata)) => clean(&table, sink),
        Err(e) => unreadable(e.to_string(), sink),
    }
}

/// Read and clean CSV bytes, e.g. an uploaded file.
pub fn load_history_bytes(
    bytes: &[u8],
    config: &ParserConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<StoryTable, SchemaError> {
    match Parser::with_config(config.clone()).parse_bytes(bytes) {
        Ok(table) => clean(&table, sink),
        Err(e) => unreadable(e.to_string(), sink),
    }
}

fn unreadable(reason: String, sink: &mut dyn DiagnosticSink) -> Result<StoryTable, SchemaError> {
    let err = SchemaError::Unreadable { reason };
    sink.record(Diagnostic::ValidationFailed {
        reason: err.to_string(),
    });
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostics, NullSink};

    fn table(csv: &str) -> DataTable {
        Parser::new().parse_str(csv).unwrap()
    }

    fn points(table: &StoryTable) -> Vec<u32> {
        table.stories().iter().map(|s| s.story_points.value()).collect()
    }

    #[test]
    fn test_valid_table() {
        let t = table(
            "Summary,Description,AcceptanceCriteria,StoryPoints\n\
             Test Story,Test Description,Test AC,5\n",
        );
        let cleaned = clean(&t, &mut NullSink).unwrap();

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.stories()[0].summary, "Test Story");
        assert_eq!(points(&cleaned), vec![5]);
    }

    #[test]
    fn test_snaps_in_row_order() {
        let t = table(
            "Summary,Description,AcceptanceCriteria,StoryPoints\n\
             S1,D1,AC1,4\n\
             S2,D2,AC2,7\n\
             S3,D3,AC3,15\n",
        );
        let cleaned = clean(&t, &mut NullSink).unwrap();
        assert_eq!(points(&cleaned), vec![3, 8, 13]);
        assert_eq!(cleaned.stories()[2].summary, "S3");
    }

    #[test]
    fn test_missing_columns() {
        let t = table("Summary,Description\nTest,Test\n");
        let err = clean(&t, &mut NullSink).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumns {
                missing: vec!["AcceptanceCriteria".to_string(), "StoryPoints".to_string()]
            }
        );
        assert!(err.user_message().contains("Required columns"));
    }

    #[test]
    fn test_header_names_are_trimmed() {
        let t = table(" Summary , Description,AcceptanceCriteria ,StoryPoints\nA,B,C,2\n");
        assert_eq!(clean(&t, &mut NullSink).unwrap().len(), 1);
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        let t = table("summary,Description,AcceptanceCriteria,StoryPoints\nA,B,C,2\n");
        assert!(matches!(
            clean(&t, &mut NullSink),
            Err(SchemaError::MissingColumns { .. })
        ));
    }

    #[test]
    fn test_drop_invalid_rows() {
        let t = table(
            "Summary,Description,AcceptanceCriteria,StoryPoints\n\
             S1,D1,AC1,5\n\
             ,D2,AC2,8\n\
             S3,D3,AC3,\n",
        );
        let mut sink = Diagnostics::new();
        let cleaned = clean(&t, &mut sink).unwrap();

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.dropped_rows(), 2);
        assert_eq!(
            sink.events(),
            &[Diagnostic::RowsDropped {
                dropped: 2,
                total: 3
            }]
        );
    }

    #[test]
    fn test_non_numeric_points_dropped_others_snapped() {
        let t = table(
            "Summary,Description,AcceptanceCriteria,StoryPoints\n\
             S1,D1,AC1,invalid\n\
             S2,D2,AC2,-5\n\
             S3,D3,AC3,100\n\
             S4,D4,AC4, 2.6 \n",
        );
        let cleaned = clean(&t, &mut NullSink).unwrap();
        assert_eq!(points(&cleaned), vec![1, 21, 3]);
    }

    #[test]
    fn test_missing_acceptance_criteria_keeps_row() {
        let t = table("Summary,Description,AcceptanceCriteria,StoryPoints\nS1,D1,,3\n");
        let cleaned = clean(&t, &mut NullSink).unwrap();
        assert_eq!(cleaned.stories()[0].acceptance_criteria, MISSING_TEXT);
    }

    #[test]
    fn test_whitespace_only_summary_dropped() {
        let t = table(
            "Summary,Description,AcceptanceCriteria,StoryPoints\n   ,D1,AC,3\nS2,D2,AC,3\n",
        );
        let cleaned = clean(&t, &mut NullSink).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.stories()[0].summary, "S2");
    }

    #[test]
    fn test_text_is_trimmed_and_actual_time_passes_through() {
        let t = table(
            "Summary,Description,AcceptanceCriteria,StoryPoints,ActualTime,Extra\n\
               Login  ,\" Form \",AC,5, 3 days ,x\n\
             B,D,AC,3,,y\n",
        );
        let cleaned = clean(&t, &mut NullSink).unwrap();
        let first = &cleaned.stories()[0];

        assert_eq!(first.summary, "Login");
        assert_eq!(first.description, "Form");
        assert_eq!(first.actual_time.as_deref(), Some("3 days"));
        assert_eq!(cleaned.stories()[1].actual_time, None);
    }

    #[test]
    fn test_no_valid_rows_is_invalid() {
        let t = table("Summary,Description,AcceptanceCriteria,StoryPoints\nS1,D1,AC1,abc\n");
        let mut sink = Diagnostics::new();
        let err = clean(&t, &mut sink).unwrap_err();

        assert_eq!(err, SchemaError::NoValidRows { total: 1 });
        assert!(matches!(
            sink.events().last(),
            Some(Diagnostic::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let t = table(
            "Summary,Description,AcceptanceCriteria,StoryPoints,ActualTime\n\
             A,B,C,4, 2d \n\
             D,E,,9,\n\
              NA ,B, null ,5, None\n\
             null ,D,E, 3 ,\n",
        );
        let once = clean(&t, &mut NullSink).unwrap();
        assert_eq!(once.len(), 2);

        let rows = once
            .stories()
            .iter()
            .map(|s| {
                vec![
                    s.summary.clone(),
                    s.description.clone(),
                    s.acceptance_criteria.clone(),
                    s.story_points.to_string(),
                    s.actual_time.clone().unwrap_or_default(),
                ]
            })
            .collect();
        let mut headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        headers.push(ACTUAL_TIME_COLUMN.to_string());
        let twice = clean(&DataTable::new(headers, rows), &mut NullSink).unwrap();

        assert_eq!(once.stories(), twice.stories());
        assert_eq!(once.stories()[0].actual_time.as_deref(), Some("2d"));
        assert_eq!(once.stories()[1].acceptance_criteria, MISSING_TEXT);
    }

    #[test]
    fn test_padded_null_markers_are_missing() {
        let t = table(
            "Summary,Description,AcceptanceCriteria,StoryPoints,ActualTime\n\
              NA ,B,C,5,\n\
             null ,D,E,3,\n\
             Login,Form,AC, NaN , None\n\
             Logout,Button,AC,2, n/a\n",
        );
        let cleaned = clean(&t, &mut NullSink).unwrap();

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.stories()[0].summary, "Logout");
        assert_eq!(cleaned.stories()[0].actual_time, None);
    }

    #[test]
    fn test_try_parse_number() {
        assert_eq!(try_parse_number("5"), Some(5.0));
        assert_eq!(try_parse_number(" 2.5 "), Some(2.5));
        assert_eq!(try_parse_number("1e1"), Some(10.0));
        assert_eq!(try_parse_number("-3"), Some(-3.0));
        assert_eq!(try_parse_number("abc"), None);
        assert_eq!(try_parse_number("NaN"), None);
        assert_eq!(try_parse_number(""), None);
    }

    #[test]
    fn test_load_history_bytes_unreadable() {
        let err = load_history_bytes(b"", &ParserConfig::default(), &mut NullSink).unwrap_err();
        assert!(matches!(err, SchemaError::Unreadable { .. }));
    }

    #[test]
    fn test_load_history_missing_file() {
        let err = load_history("/nonexistent/history.csv", &ParserConfig::default(), &mut NullSink)
            .unwrap_err();
        assert!(matches!(err, SchemaError::Unreadable { .. }));
    }
}
