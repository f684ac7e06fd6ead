use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clip_common::table::{annotations_from_table, videos_from_table, Table};
use clip_common::{DenseClipSampler, SamplerConfig};

fn read_table(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {path:?}"))?;
    Ok(Table::from_delimited(&text, '\t'))
}

/// Sample clips for the listed videos and write one `<video> <f-init> <label>`
/// line per clip. Nothing is written unless sampling succeeds.
pub fn list_clips(
    videos_path: &Path,
    segments_path: Option<&Path>,
    config: SamplerConfig,
    output: Option<&Path>,
) -> Result<()> {
    let start = Instant::now();

    let videos = videos_from_table(&read_table(videos_path)?)
        .with_context(|| format!("Invalid video list {videos_path:?}"))?;
    let annotations = match segments_path {
        Some(path) => Some(
            annotations_from_table(&read_table(path)?)
                .with_context(|| format!("Invalid segment list {path:?}"))?,
        ),
        None => {
            log::info!("No segment list given, every clip is background");
            None
        }
    };
    log::debug!(
        "Loaded {} videos, {} segments",
        videos.len(),
        annotations.as_ref().map_or(0, Vec::len)
    );

    let sampler = DenseClipSampler::new(config)?;
    let clips = sampler.sample(&videos, annotations.as_deref())?;

    let mut listing = String::with_capacity(clips.len() * 32);
    for clip in &clips {
        writeln!(listing, "{clip}")?;
    }

    match output {
        Some(path) => {
            std::fs::write(path, listing).with_context(|| format!("Failed to write {path:?}"))?;
            log::info!("Wrote {} clips to {path:?}", clips.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(listing.as_bytes())?;
            stdout.flush()?;
        }
    }
    log::info!("Done in {:.2?}", start.elapsed());

    Ok(())
}
