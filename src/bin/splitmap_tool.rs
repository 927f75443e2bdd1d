/// Example: ./splitmap_tool ./split-banks
/// Example: ./splitmap_tool ./split-banks -o mapping.json

use std::io;
use std::path::PathBuf;

use clap::{command, Parser};

use sf2ranges::dtype::Sf2RangesError;
use sf2ranges::report::write_pretty_json;
use sf2ranges::splitmap::split_file_mapping;

#[path = "../fileutils.rs"]
mod fileutils;
use fileutils::{open_file_overwrite_rw, VERSION};

#[derive(Parser)]
#[command(version = VERSION, about = "List split SF2 files in a folder as a bank/preset JSON mapping", long_about = None)]
struct Cli {
    /// Sets the folder containing the split SF2 files
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    directory: PathBuf,

    /// Sets the file to write the JSON mapping to instead of standard output
    #[arg(short = 'o', long, value_name = "OUTPUT")]
    output_file: Option<PathBuf>,
}

fn main() -> Result<(), Sf2RangesError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mapping = split_file_mapping(&cli.directory)?;

    match &cli.output_file {
        Some(output_file) => {
            write_pretty_json(&mut open_file_overwrite_rw(output_file)?, &mapping)?;
            println!(
                "Split mapping for {} written to {}.",
                cli.directory.display(),
                output_file.display()
            );
        }
        None => write_pretty_json(&mut io::stdout().lock(), &mapping)?,
    }

    Ok(())
}
