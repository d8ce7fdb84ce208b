/// Frequency Analyzer - A frequency analysis tool for classical cryptanalysis
/// This tool prints the frequency of characters, tetragrams or words in a passage
///
/// The main entry point for the frequency analyzer application. It parses command-line
/// arguments and coordinates the analysis and output.

use anyhow::Result;
use clap::{ArgAction, Parser};
use colored::Colorize;
use log::{info, LevelFilter};
use std::fs::File;
use std::io;
use std::path::Path;
use std::process;

use frequency_analyzer::config::{load_config, AnalysisOptions};
use frequency_analyzer::core::extractor::{Stride, SymbolMode};
use frequency_analyzer::utils::file_utils;
use frequency_analyzer::utils::output_formatter;
use frequency_analyzer::{AnalysisError, Feature, FrequencyAnalyzer};

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "frequency_analyzer",
    author = "RUSTSEC Team",
    version = "0.1.0",
    about = "Prints out the frequency of characters in a given passage",
    long_about = "Prints out the frequency of characters in a given passage. The default
character set is the uppercase latin letters. Can also:
- count tetragrams or words instead of characters
- score the letter distribution against English
- guess a substitution cipher key from the letter ranking"
)]
struct Args {
    /// Path to the file to analyse (read from the first line of stdin when omitted)
    file_path: Option<String>,

    /// Do not ignore capitalisation
    #[arg(short = 'i', long = "case-sensitive", action = ArgAction::SetTrue)]
    case_sensitive: bool,

    /// Custom character set, e.g. 'a,b,c,d' for some lowercase letters
    #[arg(short = 'c', long = "custom")]
    custom: Option<String>,

    /// Map the letter frequency onto English as a substitution cipher key
    /// (does not work with the tetragram or word options)
    #[arg(short = 'm', long = "auto-map", action = ArgAction::SetTrue)]
    auto_map: bool,

    /// Score the character frequency against the character frequency of English
    #[arg(short = 'p', long = "correlation", action = ArgAction::SetTrue)]
    correlation: bool,

    /// Normalise the frequencies so that they sum to 1
    #[arg(short = 'v', long = "normalise", alias = "normalize", action = ArgAction::SetTrue)]
    normalize: bool,

    /// Take the logarithm of the frequencies in this base
    #[arg(short = 'b', long = "log-base")]
    log_base: Option<u32>,

    /// Count 4-long groups of letters instead of individual characters
    #[arg(short = 't', long = "tetragram", action = ArgAction::SetTrue)]
    tetragram: bool,

    /// Count words instead of characters (overrides tetragram)
    #[arg(short = 'w', long = "word", action = ArgAction::SetTrue)]
    word: bool,

    /// Analyse every nth letter; use a pair such as 3,1 to analyse all 3 interleaved sets
    #[arg(short = 'n', long = "nth-letter")]
    nth_letter: Option<String>,

    /// Don't print frequencies equal to 0
    #[arg(short = 'o', long = "strip-zeros", action = ArgAction::SetTrue)]
    strip_zeros: bool,

    /// Store the frequency table in a JSON file instead of printing it
    #[arg(short = 's', long = "save")]
    save: Option<String>,

    /// Export the frequency table to a CSV file
    #[arg(long = "csv")]
    csv: Option<String>,

    /// Print the length of the sample (number of counted symbols)
    #[arg(short = 'l', long = "length", action = ArgAction::SetTrue)]
    length: bool,

    /// Capitalise the input text
    #[arg(short = 'u', long = "upper", action = ArgAction::SetTrue)]
    upper: bool,

    /// Remove everything but letters and spaces from the input text
    #[arg(short = 'a', long = "alphabetical", action = ArgAction::SetTrue)]
    alphabetical: bool,

    /// Path to JSON configuration file
    #[arg(long = "config")]
    config: Option<String>,

    /// Set logging level (default: WARN)
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,

    /// Log file path (default: stderr)
    #[arg(long = "log-file")]
    log_file: Option<String>,
}

impl Args {
    /// Layer command-line flags over options loaded from the config file
    fn apply_to(&self, options: &mut AnalysisOptions) -> Result<(), AnalysisError> {
        options.case_sensitive |= self.case_sensitive;
        options.auto_map |= self.auto_map;
        options.correlation |= self.correlation;
        options.normalize |= self.normalize;
        options.tetragram |= self.tetragram;
        options.word |= self.word;
        options.strip_zeros |= self.strip_zeros;
        options.length |= self.length;
        options.uppercase |= self.upper;
        options.alphabetic_only |= self.alphabetical;

        if let Some(custom) = &self.custom {
            options.charset = Some(custom.clone());
        }
        if let Some(base) = self.log_base {
            options.log_base = Some(base);
        }
        if let Some(spec) = &self.nth_letter {
            options.nth_letter = spec.parse::<Stride>()?;
        }

        Ok(())
    }
}

/// Main entry point function
fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let _ = setup_logging(&args);

    if let Err(err) = run(&args) {
        output_formatter::print_error(&format!("{:#}", err));
        let code = err
            .downcast_ref::<AnalysisError>()
            .map(AnalysisError::exit_code)
            .unwrap_or(1);
        process::exit(code);
    }
}

/// Set up logging with file or console output
fn setup_logging(args: &Args) -> Result<()> {
    // Configure logging
    let mut builder = env_logger::Builder::new();

    // Set log level from arguments
    builder.filter_level(args.log_level);

    // Set format
    builder.format(|buf, record| {
        use std::io::Write;
        use chrono::Local;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    // Add file output
    if let Some(log_file) = &args.log_file {
        if let Ok(file) = File::create(log_file) {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }

    // Initialize logger
    builder.init();

    Ok(())
}

/// Resolve options and input, analyse, then print or export every section
fn run(args: &Args) -> Result<()> {
    // Load configuration, command line wins
    let mut options = load_config(args.config.as_deref().map(Path::new))?;
    args.apply_to(&mut options)?;
    let analyzer = FrequencyAnalyzer::new(options)?;

    // Get the text to analyse
    let input_path = file_utils::resolve_input_path(args.file_path.as_deref(), io::stdin().lock())?;
    let text = file_utils::read_text(&input_path)?;

    let reports = analyzer.analyze_text(&text)?;
    let options = analyzer.options();

    println!("{} {}:", "frequencies in".bold(), input_path.display());

    let total_sections = reports.len();
    for report in &reports {
        if let Some(save) = &args.save {
            let json_path = file_utils::section_output_path(save, ".json", report.index);
            output_formatter::export_output_json(&report.output, &json_path)?;
            info!("Saved section {} to {}", report.index + 1, json_path.display());
        }

        if let Some(csv) = &args.csv {
            let csv_path = file_utils::section_output_path(csv, ".csv", report.index);
            output_formatter::export_output_csv(&report.output, &csv_path)?;
            info!("Saved section {} to {}", report.index + 1, csv_path.display());
        }

        print!(
            "{}",
            output_formatter::render_section(report, total_sections, args.save.is_none(), options.length)
        );

        if report.key_map == Feature::NotApplicable && options.mode() == SymbolMode::Letters {
            output_formatter::print_warning("automatic mapping needs the 26 uppercase letters as the character set");
        }
    }

    Ok(())
}
