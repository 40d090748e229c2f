mod args;

pub use args::{CliArgs, Command, CompressionLevel, EncodeArgs, ExtractArgs, ListArgs};
