//! Dense temporal sampling of fixed-length clips.
//!
//! A window of `window_length` frames slides over every video with a fixed
//! stride. When ground truth is available each clip takes the label of the
//! action it overlaps the most, provided that overlap covers at least half of
//! the window; otherwise it is background.

use std::collections::HashMap;

use ndarray::{ArrayView1, Axis};

use crate::config::SamplerConfig;
use crate::error::{ClipError, Result};
use crate::interval::{intersection_length, intervals_to_array, Interval};
use crate::records::{AnnotationRecord, Clip, VideoRecord};

pub struct DenseClipSampler {
    config: SamplerConfig,
}

impl DenseClipSampler {
    pub fn new(config: SamplerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// First frame of every clip that fits inside `total_frames`.
    pub fn clip_starts(&self, total_frames: u64) -> Vec<i64> {
        let window = self.config.window_length;
        if total_frames < window {
            return Vec::new();
        }
        let last_start = (total_frames - window + 1) as i64;
        (1..=last_start)
            .step_by(self.config.stride as usize)
            .collect()
    }

    /// Sample clips for every video, in input order.
    ///
    /// With `annotations == None` every clip is background. Otherwise
    /// annotations are matched by exact video name; a video without any is
    /// skipped or treated as background depending on
    /// [`SamplerConfig::drop_unannotated`].
    ///
    /// Fails with [`ClipError::EmptyResult`] when no clip is produced at all.
    pub fn sample(
        &self,
        videos: &[VideoRecord],
        annotations: Option<&[AnnotationRecord]>,
    ) -> Result<Vec<Clip>> {
        let by_video = annotations.map(group_by_video);

        let mut clips = Vec::new();
        let mut dropped = 0usize;
        for video in videos {
            let video_annotations = match &by_video {
                None => None,
                Some(groups) => match groups.get(video.name.as_str()) {
                    Some(rows) => Some(rows.as_slice()),
                    None if self.config.drop_unannotated => {
                        log::debug!("{}: no annotations, dropped", video.name);
                        dropped += 1;
                        continue;
                    }
                    None => None,
                },
            };
            clips.extend(self.sample_video(video, video_annotations)?);
        }

        if dropped > 0 {
            log::warn!("Dropped {dropped}/{} videos without annotations", videos.len());
        }
        if clips.is_empty() {
            return Err(ClipError::EmptyResult {
                videos: videos.len(),
            });
        }
        log::info!("Sampled {} clips from {} videos", clips.len(), videos.len());
        Ok(clips)
    }

    /// Sample clips of a single video.
    ///
    /// `annotations` must already be restricted to this video. `None` or an
    /// empty slice labels every clip as background.
    pub fn sample_video(
        &self,
        video: &VideoRecord,
        annotations: Option<&[&AnnotationRecord]>,
    ) -> Result<Vec<Clip>> {
        let starts = self.clip_starts(video.total_frames);
        if starts.is_empty() {
            log::debug!(
                "{}: {} frames is shorter than the {}-frame window",
                video.name,
                video.total_frames,
                self.config.window_length
            );
            return Ok(Vec::new());
        }

        let labels = match annotations {
            Some(rows) if !rows.is_empty() => self.assign_labels(&starts, rows)?,
            _ => vec![self.config.background_label; starts.len()],
        };
        log::debug!("{}: {} clips", video.name, starts.len());

        Ok(starts
            .into_iter()
            .zip(labels)
            .map(|(frame_start, label_index)| Clip {
                video_name: video.name.clone(),
                frame_start,
                label_index,
            })
            .collect())
    }

    fn assign_labels(&self, starts: &[i64], rows: &[&AnnotationRecord]) -> Result<Vec<u32>> {
        let window = self.config.window_length as i64;
        let targets: Vec<Interval> = rows.iter().map(|row| row.interval()).collect();
        let segments: Vec<Interval> = starts
            .iter()
            .map(|&start| Interval::new(start, start + window - 1))
            .collect();

        let overlap = intersection_length(
            intervals_to_array(&targets).view(),
            intervals_to_array(&segments).view(),
        )?;

        let min_overlap = self.config.min_overlap();
        Ok(overlap
            .axis_iter(Axis(1))
            .map(|column| {
                let (best_row, best) = first_max(column);
                if best < min_overlap {
                    self.config.background_label
                } else {
                    rows[best_row].label_index
                }
            })
            .collect())
    }
}

/// Index and value of the maximum, keeping the earliest row on ties.
fn first_max(column: ArrayView1<f64>) -> (usize, f64) {
    let mut best = (0, f64::NEG_INFINITY);
    for (row, &value) in column.iter().enumerate() {
        if value > best.1 {
            best = (row, value);
        }
    }
    best
}

fn group_by_video(annotations: &[AnnotationRecord]) -> HashMap<&str, Vec<&AnnotationRecord>> {
    let mut groups: HashMap<&str, Vec<&AnnotationRecord>> = HashMap::new();
    for annotation in annotations {
        groups
            .entry(annotation.video_name.as_str())
            .or_default()
            .push(annotation);
    }
    groups
}
