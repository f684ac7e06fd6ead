//! Named-column tables as handed over by the dataset metadata loader, and
//! their conversion into typed records.

use std::str::FromStr;

use crate::error::{ClipError, Result};
use crate::records::{AnnotationRecord, VideoRecord};

pub const VIDEO_NAME: &str = "video-name";
pub const NUM_FRAMES: &str = "num-frames";
pub const FRAME_START: &str = "f-init";
pub const FRAME_END: &str = "f-end";
pub const LABEL_INDEX: &str = "idx-label";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Header line followed by one row per line; blank lines are skipped.
    pub fn from_delimited(text: &str, delimiter: char) -> Self {
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());
        let split = |line: &str| -> Vec<String> {
            line.split(delimiter).map(|cell| cell.trim().to_string()).collect()
        };
        let columns = lines.next().map(split).unwrap_or_default();
        let rows = lines.map(split).collect();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header.
    pub fn column(&self, table: &'static str, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| ClipError::MissingColumn {
                table,
                column: name.to_string(),
            })
    }
}

struct Cells<'a> {
    table: &'static str,
    row: usize,
    cells: &'a [String],
}

impl Cells<'_> {
    fn text(&self, column: usize, name: &str) -> Result<&str> {
        self.cells
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| ClipError::InvalidCell {
                table: self.table,
                row: self.row,
                column: name.to_string(),
                value: String::new(),
            })
    }

    fn parse<T: FromStr>(&self, column: usize, name: &str) -> Result<T> {
        let text = self.text(column, name)?;
        text.parse().map_err(|_| ClipError::InvalidCell {
            table: self.table,
            row: self.row,
            column: name.to_string(),
            value: text.to_string(),
        })
    }

    /// Integer cell that may have been written as a float (`"120.0"`).
    /// Fractional or out-of-range values are rejected.
    fn parse_frame(&self, column: usize, name: &str) -> Result<i64> {
        let text = self.text(column, name)?;
        if let Ok(value) = text.parse::<i64>() {
            return Ok(value);
        }
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
        match text.parse::<f64>() {
            Ok(value)
                if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
            {
                Ok(value as i64)
            }
            _ => Err(ClipError::InvalidCell {
                table: self.table,
                row: self.row,
                column: name.to_string(),
                value: text.to_string(),
            }),
        }
    }
}

pub fn videos_from_table(table: &Table) -> Result<Vec<VideoRecord>> {
    const NAME: &str = "videos";
    let name_col = table.column(NAME, VIDEO_NAME)?;
    let frames_col = table.column(NAME, NUM_FRAMES)?;

    table
        .rows
        .iter()
        .enumerate()
        .map(|(row, cells)| -> Result<VideoRecord> {
            let cells = Cells { table: NAME, row, cells };
            let total_frames = cells.parse_frame(frames_col, NUM_FRAMES)?;
            Ok(VideoRecord {
                name: cells.text(name_col, VIDEO_NAME)?.to_string(),
                total_frames: u64::try_from(total_frames).map_err(|_| ClipError::InvalidCell {
                    table: NAME,
                    row,
                    column: NUM_FRAMES.to_string(),
                    value: total_frames.to_string(),
                })?,
            })
        })
        .collect()
}

pub fn annotations_from_table(table: &Table) -> Result<Vec<AnnotationRecord>> {
    const NAME: &str = "annotations";
    let name_col = table.column(NAME, VIDEO_NAME)?;
    let start_col = table.column(NAME, FRAME_START)?;
    let end_col = table.column(NAME, FRAME_END)?;
    let label_col = table.column(NAME, LABEL_INDEX)?;

    table
        .rows
        .iter()
        .enumerate()
        .map(|(row, cells)| -> Result<AnnotationRecord> {
            let cells = Cells { table: NAME, row, cells };
            Ok(AnnotationRecord {
                video_name: cells.text(name_col, VIDEO_NAME)?.to_string(),
                frame_start: cells.parse_frame(start_col, FRAME_START)?,
                frame_end: cells.parse_frame(end_col, FRAME_END)?,
                label_index: cells.parse(label_col, LABEL_INDEX)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIDEOS: &str = "video-name\tduration\tnum-frames\n\
                          v_a\t10.2\t305\n\
                          \n\
                          v_b\t3.0\t90.0\n";

    #[test]
    fn test_videos_from_table() {
        let table = Table::from_delimited(VIDEOS, '\t');
        assert_eq!(table.len(), 2);

        let videos = videos_from_table(&table).unwrap();
        assert_eq!(videos, vec![VideoRecord::new("v_a", 305), VideoRecord::new("v_b", 90)]);
    }

    #[test]
    fn test_annotations_from_table() {
        let text = "video-name\tt-init\tt-end\tidx-label\tf-init\tf-end\n\
                    v_a\t0.5\t2.0\t12\t15\t60\n";
        let annotations = annotations_from_table(&Table::from_delimited(text, '\t')).unwrap();
        assert_eq!(annotations, vec![AnnotationRecord::new("v_a", 15, 60, 12)]);
    }

    #[test]
    fn test_missing_column() {
        let table = Table::from_delimited("video-name\tduration\nv_a\t3.0\n", '\t');
        let err = videos_from_table(&table).unwrap_err();
        match err {
            ClipError::MissingColumn { table, column } => {
                assert_eq!(table, "videos");
                assert_eq!(column, NUM_FRAMES);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = annotations_from_table(&Table::from_delimited(VIDEOS, '\t')).unwrap_err();
        assert!(matches!(err, ClipError::MissingColumn { table: "annotations", .. }));
    }

    #[test]
    fn test_bad_cell() {
        let table = Table::from_delimited("video-name num-frames\nv_a lots\n", ' ');
        let err = videos_from_table(&table).unwrap_err();
        assert!(matches!(err, ClipError::InvalidCell { row: 0, ref value, .. } if value == "lots"));
    }

    #[test]
    fn test_short_row() {
        let table = Table::from_delimited("video-name\tnum-frames\nv_a\n", '\t');
        let err = videos_from_table(&table).unwrap_err();
        assert!(matches!(err, ClipError::InvalidCell { row: 0, .. }));
    }

    #[test]
    fn test_fractional_frame_is_rejected() {
        let table = Table::from_delimited("video-name\tnum-frames\nv_a\t31.9\n", '\t');
        let err = videos_from_table(&table).unwrap_err();
        assert!(matches!(err, ClipError::InvalidCell { ref value, .. } if value == "31.9"));
    }

    #[test]
    fn test_out_of_range_frame_is_rejected() {
        for cell in ["1e30", "-1e30", "NaN", "inf"] {
            let text = format!("video-name\tf-init\tf-end\tidx-label\nv_a\t{cell}\t10\t1\n");
            let err = annotations_from_table(&Table::from_delimited(&text, '\t')).unwrap_err();
            assert!(matches!(err, ClipError::InvalidCell { .. }), "{cell} was accepted");
        }
    }

    #[test]
    fn test_negative_frame_count() {
        let table = Table::from_delimited("video-name\tnum-frames\nv_a\t-3\n", '\t');
        assert!(videos_from_table(&table).is_err());
    }
}
