use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use log::{debug, warn};
use rayon::prelude::*;

use crate::atlas::TextureAtlas;
use crate::cli::CompressionLevel;
use crate::error::{Result, SparrowError};
use crate::output::{save_region_image, sprite_png_path};
use crate::sprite::{CroppableBuffer, Region};

/// Settings shared by every sprite written during one extraction
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// PNG compression applied to every written sprite
    pub compress: Option<CompressionLevel>,
    /// Keep extracting after a sprite fails instead of aborting
    pub keep_going: bool,
}

/// A sprite that could not be extracted
#[derive(Debug)]
pub struct ExtractFailure {
    pub name: String,
    pub error: SparrowError,
}

/// Outcome of extracting a whole atlas
#[derive(Debug, Default)]
pub struct ExtractReport {
    /// Written files, in atlas order
    pub written: Vec<PathBuf>,
    /// Sprites that failed, in atlas order (only filled with `keep_going`)
    pub failed: Vec<ExtractFailure>,
}

impl ExtractReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Extract a single named sprite into `out_dir`
pub fn extract_one<B>(
    atlas: &TextureAtlas,
    sheet: &B,
    name: &str,
    out_dir: &Path,
    options: &ExtractOptions,
) -> Result<PathBuf>
where
    B: CroppableBuffer + ?Sized,
{
    let region = atlas.lookup(name)?;
    extract_region(region, sheet, out_dir, options)
}

/// Extract every sprite of `atlas` into `out_dir` in parallel.
///
/// Without `keep_going` the first failure is returned as the error. With it,
/// failures are collected into the report and the remaining sprites are
/// still written.
pub fn extract_all<B>(
    atlas: &TextureAtlas,
    sheet: &B,
    out_dir: &Path,
    options: &ExtractOptions,
    progress: &ProgressBar,
) -> Result<ExtractReport>
where
    B: CroppableBuffer + Sync + ?Sized,
{
    progress.set_length(atlas.len() as u64);

    let extract = |region: &Region| {
        let result = extract_region(region, sheet, out_dir, options);
        progress.inc(1);
        result
    };

    let mut collisions = output_collisions(atlas, out_dir);

    if !options.keep_going {
        if let Some(error) = collisions.iter_mut().find_map(Option::take) {
            return Err(error);
        }
        let written = atlas
            .all()
            .par_iter()
            .map(extract)
            .collect::<Result<Vec<_>>>()?;
        return Ok(ExtractReport {
            written,
            failed: Vec::new(),
        });
    }

    let results: Vec<_> = atlas
        .all()
        .par_iter()
        .zip(collisions.into_par_iter())
        .map(|(region, collision)| {
            let result = match collision {
                Some(error) => {
                    progress.inc(1);
                    Err(error)
                }
                None => extract(region),
            };
            (region.name(), result)
        })
        .collect();

    let mut report = ExtractReport::default();
    for (name, result) in results {
        match result {
            Ok(path) => report.written.push(path),
            Err(error) => {
                warn!("Extracting {} failed: {}", name, error);
                report.failed.push(ExtractFailure {
                    name: name.to_string(),
                    error,
                });
            }
        }
    }

    Ok(report)
}

/// For each region in atlas order, an error if an earlier region already
/// claims the same output file
fn output_collisions(atlas: &TextureAtlas, out_dir: &Path) -> Vec<Option<SparrowError>> {
    let mut claimed: HashMap<PathBuf, &str> = HashMap::with_capacity(atlas.len());
    atlas
        .iter()
        .map(|region| {
            let path = sprite_png_path(out_dir, region.name());
            match claimed.get(&path) {
                Some(other) => Some(SparrowError::OutputCollision {
                    name: region.name().to_string(),
                    other: (*other).to_string(),
                    path,
                }),
                None => {
                    claimed.insert(path, region.name());
                    None
                }
            }
        })
        .collect()
}

fn extract_region<B>(
    region: &Region,
    sheet: &B,
    out_dir: &Path,
    options: &ExtractOptions,
) -> Result<PathBuf>
where
    B: CroppableBuffer + ?Sized,
{
    debug!("Extracting {}", region.name());

    let image = region.image(sheet)?;
    let path = sprite_png_path(out_dir, region.name());
    save_region_image(&image, &path, options.compress)?;

    debug!(
        "Wrote {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );

    Ok(path)
}
