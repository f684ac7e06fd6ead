//! Clip lists for training action-recognition models on untrimmed videos.
//!
//! Videos are cut into fixed-length clips with a sliding window and each clip
//! is labeled from the ground-truth action segments it overlaps.

pub mod config;
pub mod error;
pub mod interval;
pub mod label_index;
pub mod records;
pub mod sampler;
pub mod subset;
pub mod table;

pub use config::SamplerConfig;
pub use error::{ClipError, Result};
pub use records::{AnnotationRecord, Clip, VideoRecord};
pub use sampler::DenseClipSampler;
