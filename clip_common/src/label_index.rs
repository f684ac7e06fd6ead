//! Mapping between activity names and the integer labels used in clip lists.

use serde::{Deserialize, Serialize};

use crate::error::{ClipError, Result};
use crate::records::AnnotationRecord;

/// Sorted, de-duplicated activity names; a label's index is its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LabelIndex {
    labels: Vec<String>,
}

impl LabelIndex {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.sort();
        labels.dedup();
        Self { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn index_of(&self, label: &str) -> Result<u32> {
        self.labels
            .binary_search_by(|probe| probe.as_str().cmp(label))
            .map(|idx| idx as u32)
            .map_err(|_| ClipError::UnknownLabel(label.to_string()))
    }

    pub fn label(&self, index: u32) -> Option<&str> {
        self.labels.get(index as usize).map(String::as_str)
    }

    /// First label id past the real categories, a safe background label.
    pub fn background_label(&self) -> u32 {
        self.labels.len() as u32
    }
}

/// Ground-truth segment in seconds, before label and frame conversion.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimedSegment {
    pub video_name: String,
    pub t_start: f64,
    pub t_end: f64,
    pub label: String,
}

impl TimedSegment {
    /// Frame-based annotation at `frame_rate`; frame numbers are truncated.
    pub fn to_annotation(&self, index: &LabelIndex, frame_rate: f64) -> Result<AnnotationRecord> {
        Ok(AnnotationRecord {
            video_name: self.video_name.clone(),
            frame_start: (frame_rate * self.t_start) as i64,
            frame_end: (frame_rate * self.t_end) as i64,
            label_index: index.index_of(&self.label)?,
        })
    }

    /// Same segment measured on a clock running at `to_fps` instead of `from_fps`.
    pub fn remap_frame_rate(&self, from_fps: f64, to_fps: f64) -> Self {
        Self {
            t_start: remap_frame_rate(self.t_start, from_fps, to_fps),
            t_end: remap_frame_rate(self.t_end, from_fps, to_fps),
            ..self.clone()
        }
    }
}

pub fn remap_frame_rate(t: f64, from_fps: f64, to_fps: f64) -> f64 {
    t * to_fps / from_fps
}
