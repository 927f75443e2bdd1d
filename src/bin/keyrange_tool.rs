/// Example: ./keyrange_tool soundbank.sf2 > ranges.json
/// Example: ./keyrange_tool soundbank.sf2 -o ranges.json

use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::{command, Parser};
use soundfont::SoundFont2;

use sf2ranges::dtype::Sf2RangesError;
use sf2ranges::ranges::{preset_coverages, presets_by_bank};
use sf2ranges::report::RangeReport;

#[path = "../fileutils.rs"]
mod fileutils;
use fileutils::{open_file_overwrite_rw, VERSION};

#[derive(Parser)]
#[command(version = VERSION, about = "Extract key ranges for each preset/instrument in an SF2 file (JSON output)", long_about = None)]
struct Cli {
    /// Sets the path of the SF2 file to analyze
    #[arg(value_name = "INPUT")]
    input_file: PathBuf,

    /// Sets the file to write the JSON report to instead of standard output
    #[arg(short = 'o', long, value_name = "OUTPUT")]
    output_file: Option<PathBuf>,
}

fn main() -> Result<(), Sf2RangesError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut raw = File::open(&cli.input_file)
        .map_err(|_| Sf2RangesError::SoundFontFileOpenFailed(cli.input_file.display().to_string()))?;
    let sf2 = SoundFont2::load(&mut raw)
        .map_err(|e| Sf2RangesError::SoundFontAnalysisFailed(format!("{:?}", e)))?;

    let banks = presets_by_bank(&sf2.presets);
    let report = RangeReport::from_coverage(preset_coverages(&banks, &sf2.instruments));

    match &cli.output_file {
        Some(output_file) => {
            report.write_pretty(&mut open_file_overwrite_rw(output_file)?)?;
            println!(
                "Report for {} written to {}.",
                cli.input_file.display(),
                output_file.display()
            );
        }
        None => report.write_pretty(&mut io::stdout().lock())?,
    }

    Ok(())
}
