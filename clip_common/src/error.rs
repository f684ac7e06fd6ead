/// Failures surfaced by interval arithmetic, table conversion and sampling.
///
/// Every variant is a precondition or terminal-state failure; nothing in this
/// crate retries.
#[derive(Debug, thiserror::Error)]
pub enum ClipError {
    #[error("{name} intervals must have shape [n, 2], got {shape:?}")]
    InvalidShape { name: &'static str, shape: Vec<usize> },

    #[error("{name} interval at row {row} is not a finite [start, end] pair: [{start}, {end}]")]
    InvalidInterval {
        name: &'static str,
        row: usize,
        start: f64,
        end: f64,
    },

    #[error("{table} table is missing required column `{column}`")]
    MissingColumn { table: &'static str, column: String },

    #[error("{table} table, row {row}: cannot parse `{value}` in column `{column}`")]
    InvalidCell {
        table: &'static str,
        row: usize,
        column: String,
        value: String,
    },

    #[error("no clips were produced from {videos} videos")]
    EmptyResult { videos: usize },

    #[error("invalid sampler config: {0}")]
    InvalidConfig(String),

    #[error("unknown activity label: {0}")]
    UnknownLabel(String),

    #[error("unrecognized subset: {0}")]
    UnknownSubset(String),

    #[error("cannot parse sampler config: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

pub type Result<T, E = ClipError> = std::result::Result<T, E>;
