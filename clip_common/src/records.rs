use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// One video of a dataset subset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VideoRecord {
    pub name: String,
    /// Number of decoded frames; frames are numbered from 1.
    pub total_frames: u64,
}

impl VideoRecord {
    pub fn new(name: impl Into<String>, total_frames: u64) -> Self {
        Self {
            name: name.into(),
            total_frames,
        }
    }
}

/// Ground-truth action instance, expressed in frames.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnnotationRecord {
    pub video_name: String,
    pub frame_start: i64,
    pub frame_end: i64,
    pub label_index: u32,
}

impl AnnotationRecord {
    pub fn new(
        video_name: impl Into<String>,
        frame_start: i64,
        frame_end: i64,
        label_index: u32,
    ) -> Self {
        Self {
            video_name: video_name.into(),
            frame_start,
            frame_end,
            label_index,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.frame_start, self.frame_end)
    }
}

/// Fixed-length clip handed to the feature extractor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Clip {
    pub video_name: String,
    pub frame_start: i64,
    pub label_index: u32,
}

impl Clip {
    /// Last frame covered by the clip, inclusive.
    pub fn frame_end(&self, window_length: u64) -> i64 {
        self.frame_start + window_length as i64 - 1
    }
}

/// Line of a clip list: `<video-name> <f-init> <idx-label>`.
impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.video_name, self.frame_start, self.label_index)
    }
}
