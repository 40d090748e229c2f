use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use sparrow::atlas::TextureAtlas;
use sparrow::cli::{CliArgs, Command, CompressionLevel, EncodeArgs, ExtractArgs, ListArgs};
use sparrow::config::LoadedConfig;
use sparrow::extract::{
    ExtractOptions, extract_all, extract_one, load_sheet, resolve_sheet_path,
};
use sparrow::output::atlas_output_dir;
use sparrow::sprite::Trim;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    match &cli.command {
        Command::Extract(args) => run_extract(args),
        Command::List(args) => {
            init_logging(args.verbose);
            run_list(args)
        }
        Command::Encode(args) => {
            init_logging(false);
            run_encode(args)
        }
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_extract(args: &ExtractArgs) -> Result<()> {
    // Load config if specified and merge with CLI args
    let merged = merge_config_with_args(args)?;

    init_logging(merged.verbose);

    info!("Sparrow extractor v{}", env!("CARGO_PKG_VERSION"));

    if merged.input.is_empty() {
        bail!("no atlas files to extract");
    }
    if merged.image.is_some() && merged.input.len() > 1 {
        bail!("--image can only be used with a single atlas");
    }

    let options = ExtractOptions {
        compress: merged.compress,
        keep_going: merged.keep_going,
    };

    let mut failed = 0usize;
    let mut found_sub_texture = false;

    for atlas_path in &merged.input {
        let atlas = TextureAtlas::from_path(atlas_path)
            .with_context(|| format!("failed to load atlas: {}", atlas_path.display()))?;
        info!(
            "Parsed {} ({} sub-textures)",
            atlas_path.display(),
            atlas.len()
        );

        if let Some(name) = &merged.sub_texture
            && atlas.lookup(name).is_err()
        {
            debug!("{} has no sub-texture '{}'", atlas_path.display(), name);
            continue;
        }

        let sheet_path = merged
            .image
            .clone()
            .unwrap_or_else(|| resolve_sheet_path(atlas_path, &atlas));
        let sheet = load_sheet(&sheet_path)?;

        let out_dir = if merged.atlas_subdirs {
            atlas_output_dir(&merged.output, atlas_path)
        } else {
            merged.output.clone()
        };
        fs::create_dir_all(&out_dir).with_context(|| {
            format!("failed to create output directory: {}", out_dir.display())
        })?;

        if let Some(name) = &merged.sub_texture {
            let path = extract_one(&atlas, &sheet, name, &out_dir, &options)
                .with_context(|| format!("failed to extract {}", name))?;
            info!("Saved {}", path.display());
            found_sub_texture = true;
            continue;
        }

        let progress = ProgressBar::new(atlas.len() as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} extracting {pos}/{len} [{elapsed_precise}] {wide_msg}",
            )
            .context("invalid progress template")?,
        );
        progress.set_message(atlas_path.display().to_string());

        let report = extract_all(&atlas, &sheet, &out_dir, &options, &progress);
        progress.finish_and_clear();
        let report = report.with_context(|| {
            format!("failed to extract sprites from {}", atlas_path.display())
        })?;

        info!(
            "Extracted {} sprites into {}",
            report.written.len(),
            out_dir.display()
        );
        failed += report.failed.len();
    }

    if let Some(name) = &merged.sub_texture
        && !found_sub_texture
    {
        bail!("sub-texture '{}' does not exist", name);
    }

    if failed > 0 {
        bail!("{} sprites failed to extract", failed);
    }

    info!("Done!");

    Ok(())
}

#[allow(clippy::print_stdout)]
fn run_list(args: &ListArgs) -> Result<()> {
    let atlas = TextureAtlas::from_path(&args.input)
        .with_context(|| format!("failed to load atlas: {}", args.input.display()))?;

    for region in &atlas {
        if !args.verbose {
            println!("{}", region.name());
            continue;
        }

        let frame = match region.trim() {
            Trim::None => "untrimmed".to_string(),
            Trim::Frame {
                x,
                y,
                width,
                height,
            } => format!("frame {}x{}{:+}{:+}", width, height, x, y),
        };
        println!(
            "{}\t{}x{}+{}+{}\t{}",
            region.name(),
            region.width(),
            region.height(),
            region.x(),
            region.y(),
            frame
        );
    }

    Ok(())
}

fn run_encode(args: &EncodeArgs) -> Result<()> {
    let atlas = TextureAtlas::from_path(&args.input)
        .with_context(|| format!("failed to load atlas: {}", args.input.display()))?;
    let encoded = atlas.encode()?;

    match &args.output {
        Some(path) => {
            fs::write(path, encoded)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => std::io::stdout()
            .lock()
            .write_all(&encoded)
            .context("failed to write to stdout")?,
    }

    Ok(())
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    input: Vec<PathBuf>,
    image: Option<PathBuf>,
    output: PathBuf,
    sub_texture: Option<String>,
    atlas_subdirs: bool,
    keep_going: bool,
    compress: Option<CompressionLevel>,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &ExtractArgs) -> Result<MergedConfig> {
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    // Determine input files: CLI args override config
    let input = if !args.input.is_empty() {
        args.input.clone()
    } else if let Some(ref lc) = loaded_config {
        lc.resolve_inputs()
            .context("failed to resolve input files from config")?
    } else {
        // This shouldn't happen due to clap's required_unless_present
        Vec::new()
    };

    // Determine output directory: CLI > config > default
    let output = args.output.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.resolve_output_dir())
            .unwrap_or_else(|| PathBuf::from("out"))
    });

    // Boolean flags: CLI presence sets them to true, otherwise use config
    let keep_going = args.keep_going
        || loaded_config
            .as_ref()
            .is_some_and(|lc| lc.config.keep_going);

    let atlas_subdirs = args.atlas_subdirs
        || loaded_config
            .as_ref()
            .is_some_and(|lc| lc.config.atlas_subdirs);

    // Compress: CLI option overrides config
    let compress = if args.compress.is_some() {
        args.compress
    } else if let Some(ref lc) = loaded_config {
        lc.compression()?
    } else {
        None
    };

    Ok(MergedConfig {
        input,
        image: args.image.clone(),
        output,
        sub_texture: args.sub_texture.clone(),
        atlas_subdirs,
        keep_going,
        compress,
        verbose: args.verbose,
    })
}
