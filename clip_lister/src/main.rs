mod list_clips;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clip_common::subset::Subset;
use clip_common::SamplerConfig;
use tracing_subscriber::prelude::*;

/// Create the list of clips (video, first frame, label) consumed by the
/// C3D feature extractor.
#[derive(Debug, Parser)]
pub struct Args {
    /// Tab-separated video list with `video-name` and `num-frames` columns.
    videos: PathBuf,
    /// Tab-separated segment list with `video-name`, `f-init`, `f-end` and
    /// `idx-label` columns. Without it every clip is background.
    #[arg(long)]
    segments: Option<PathBuf>,
    /// JSON file with sampler settings; flags below take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Temporal length of the clips, in frames.
    #[arg(long, short = 'w')]
    t_res: Option<u64>,
    /// Temporal stride used to extract clips, in frames.
    #[arg(long, short = 's')]
    t_stride: Option<u64>,
    /// Integer label for background instances.
    #[arg(long)]
    bckg_label: Option<u32>,
    /// Keep videos without segments, labeling all their clips as background.
    #[arg(long, action, default_value = "false")]
    keep_unannotated: bool,
    /// Dataset subset; names the output list `<subset>.lst` when no output is given.
    #[arg(long)]
    subset: Option<Subset>,
    /// Output clip list. Written to stdout when neither this nor `--subset` is set.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl Args {
    fn sampler_config(&self) -> anyhow::Result<SamplerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {path:?}"))?;
                SamplerConfig::from_json(&json)?
            }
            None => SamplerConfig::default(),
        };
        if let Some(t_res) = self.t_res {
            config.window_length = t_res;
        }
        if let Some(t_stride) = self.t_stride {
            config.stride = t_stride;
        }
        if let Some(bckg_label) = self.bckg_label {
            config.background_label = bckg_label;
        }
        if self.keep_unannotated {
            config.drop_unannotated = false;
        }
        config.validate()?;
        Ok(config)
    }

    fn output_path(&self) -> Option<PathBuf> {
        self.output
            .clone()
            .or_else(|| self.subset.map(|subset| PathBuf::from(format!("{subset}.lst"))))
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,clip_lister=info,clip_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = args.sampler_config()?;
    log::info!(
        "Sampling {}-frame clips every {} frames, background label {}",
        config.window_length,
        config.stride,
        config.background_label
    );

    let _span = tracing::info_span!(
        "list_clips",
        subset = args.subset.map(|s| s.as_str()).unwrap_or("all")
    )
    .entered();
    list_clips::list_clips(
        &args.videos,
        args.segments.as_deref(),
        config,
        args.output_path().as_deref(),
    )
}
