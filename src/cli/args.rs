use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sparrow")]
#[command(version, about = "Extract sprites from Sparrow v2 texture atlases", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract sprites as individual PNG files
    Extract(ExtractArgs),
    /// List the sub-textures of an atlas
    List(ListArgs),
    /// Re-encode an atlas in canonical form
    Encode(EncodeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Atlas XML files
    #[arg(required_unless_present = "config")]
    pub input: Vec<PathBuf>,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Packed sheet image [default: the atlas's imagePath]
    #[arg(short, long, value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Output directory for sprite files [default: out]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extract only this sub-texture
    #[arg(short = 't', long, value_name = "NAME")]
    pub sub_texture: Option<String>,

    /// Write each atlas's sprites into a subdirectory named after the atlas
    #[arg(long)]
    pub atlas_subdirs: bool,

    /// Continue with the remaining sprites when one fails
    #[arg(short = 'k', long)]
    pub keep_going: bool,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Atlas XML file
    pub input: PathBuf,

    /// Also print packed rectangles and trim frames
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    /// Atlas XML file
    pub input: PathBuf,

    /// Output file [default: print to stdout]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}
