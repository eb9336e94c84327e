//! Command-line interface for asyncpp
//! Converts async/await C++ sources into std::async/std::future code.
//!
//! Usage:
//!   asyncpp --test                                  - Run the built-in sample conversions
//!   asyncpp -i `<input>` -o `<output>` [-v]           - Convert a file
//!   asyncpp -i `<input>` -o `<output>` -c `<config>`  - Convert with a user configuration

use asyncpp::asyncpp::config::{AsyncppConfig, Loader};
use asyncpp::asyncpp::formats::AstFormat;
use asyncpp::asyncpp::pipeline::Converter;
use asyncpp::asyncpp::selftest;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::Level;

fn main() {
    let matches = Command::new("asyncpp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("CLI for converting async/await C++ patterns to std::async/std::future usage")
        .arg_required_else_help(true)
        .arg(
            Arg::new("test")
                .long("test")
                .help("Run internal test suite")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["input", "output"]),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_name("INPUT")
                .help("Path to the input source file")
                .required_unless_present("test"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("OUTPUT")
                .help("Path to write converted code")
                .required_unless_present("test"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable verbose debug output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("CONFIG")
                .help("TOML file layered over the built-in configuration"),
        )
        .arg(
            Arg::new("ast-format")
                .long("ast-format")
                .value_name("FORMAT")
                .help("Parse tree format for --verbose")
                .value_parser(AstFormat::NAMES),
        )
        .arg(
            Arg::new("launch-policy")
                .long("launch-policy")
                .value_name("POLICY")
                .help("First argument passed to the launch call (e.g. 'std::launch::async')"),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    init_logging(verbose);

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    });
    let converter = Converter::with_config(config);

    if matches.get_flag("test") {
        handle_test_command(&converter);
        std::process::exit(0);
    }

    // Both are required unless --test, which exited above.
    let (Some(input), Some(output)) = (
        matches.get_one::<String>("input"),
        matches.get_one::<String>("output"),
    ) else {
        unreachable!()
    };
    handle_convert_command(&converter, input, output, verbose);
}

/// Diagnostics go to stderr; `--verbose` lowers the threshold to INFO so the
/// parse tree dump is shown.
fn init_logging(verbose: bool) {
    let level = if verbose { Level::INFO } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<AsyncppConfig, config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("ast-format") {
        loader = loader.set_override("diagnostics.ast_format", format.as_str())?;
    }
    if let Some(policy) = matches.get_one::<String>("launch-policy") {
        loader = loader.set_override("codegen.launch_policy", policy.as_str())?;
    }
    loader.build()
}

/// Handle --test
fn handle_test_command(converter: &Converter) {
    let outcomes = selftest::run_samples(converter);
    for outcome in &outcomes {
        println!("{}", outcome);
    }
    if outcomes.iter().all(|o| o.passed()) {
        println!("All tests passed.");
    }
}

/// Handle -i/-o conversion
fn handle_convert_command(converter: &Converter, input: &str, output: &str, verbose: bool) {
    let source = std::fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading input file: {}", e);
        std::process::exit(1);
    });

    let result = converter.convert(&source, verbose).unwrap_or_else(|e| {
        eprintln!("Conversion error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = std::fs::write(output, result) {
        eprintln!("Error writing output file: {}", e);
        std::process::exit(1);
    }

    if verbose {
        println!("Converted code written to {}", output);
    }
}
