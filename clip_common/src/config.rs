use serde::{Deserialize, Serialize};

use crate::error::{ClipError, Result};

/// Parameters of dense clip sampling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Label id given to clips that do not overlap enough with any action.
    /// Must not collide with a real label id; this is not checked.
    pub background_label: u32,
    /// Temporal length of each clip, in frames.
    pub window_length: u64,
    /// Distance between consecutive clip starts, in frames.
    pub stride: u64,
    /// Skip videos without ground-truth segments instead of labeling them background.
    pub drop_unannotated: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            background_label: 201,
            window_length: 16,
            stride: 16,
            drop_unannotated: true,
        }
    }
}

impl SamplerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_length == 0 {
            return Err(ClipError::InvalidConfig(
                "window_length must be at least one frame".to_string(),
            ));
        }
        if self.stride == 0 {
            return Err(ClipError::InvalidConfig(
                "stride must be at least one frame".to_string(),
            ));
        }
        Ok(())
    }

    /// Minimum overlap, in frames, for a clip to take an action's label.
    pub fn min_overlap(&self) -> f64 {
        self.window_length as f64 / 2.0
    }
}
