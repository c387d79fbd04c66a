//! Code to configure and run the parser and the size annotation on one
//! expression, and to render the annotated tree.

use std::fs;

use clap::{ArgGroup, Parser, ValueEnum};
use log::{info, LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use crate::expression_tree::{size_expression, Expression, SizedExpression};
use crate::recursive_descent_parsing::{parse_expression, ParseError};
use crate::sample_expressions::{self, SAMPLE_NAMES};

/// How the annotated tree is written out.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// The expression followed by an indented outline of node sizes.
    Text,
    /// The annotated tree as JSON.
    Json,
}

/// Config for a run. Instantiate via `Config::parse()`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["expression", "src_filepath", "sample"])
))]
pub struct Config {
    /// Expression to parse. A backslash may be typed in place of `λ`.
    #[arg(short, long)]
    pub expression: Option<String>,

    /// File holding the expression to parse.
    #[arg(short, long)]
    pub src_filepath: Option<String>,

    /// Built-in sample to use: S, K, I or Y.
    #[arg(long)]
    pub sample: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level written to standard error.
    #[arg(long, default_value_t = LevelFilter::Warn)]
    pub log_level: LevelFilter,
}

/// Errors that may be thrown during a run.
#[derive(Debug)]
pub enum RunError {
    ConfigError(String),
    InputFileError(std::io::Error),
    ExpressionParseError(ParseError),
    LoggerError(SetLoggerError),
    OutputError(serde_json::Error),
}

/// Display trait implementation for RunError.
impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError(config_err_string) => {
                return write!(f, "Configuration error: {}", config_err_string);
            }

            Self::InputFileError(io_err) => {
                return write!(f, "Input file error: {}", io_err);
            }

            Self::ExpressionParseError(parse_error) => {
                return write!(f, "Parse error: {}", parse_error);
            }

            Self::LoggerError(logger_err) => {
                return write!(f, "Logger error: {}", logger_err);
            }

            Self::OutputError(json_err) => {
                return write!(f, "Output error: {}", json_err);
            }
        }
    }
}

impl std::error::Error for RunError {}

/// Type conversions for errors.
impl From<std::io::Error> for RunError {
    fn from(value: std::io::Error) -> Self {
        return Self::InputFileError(value);
    }
}

impl From<ParseError> for RunError {
    fn from(value: ParseError) -> Self {
        return Self::ExpressionParseError(value);
    }
}

impl From<SetLoggerError> for RunError {
    fn from(value: SetLoggerError) -> Self {
        return Self::LoggerError(value);
    }
}

impl From<serde_json::Error> for RunError {
    fn from(value: serde_json::Error) -> Self {
        return Self::OutputError(value);
    }
}

/// Sends log output to standard error at `level`.
pub fn init_logging(level: LevelFilter) -> Result<(), RunError> {
    TermLogger::init(
        level,
        ConfigBuilder::new()
            .set_location_level(LevelFilter::Error)
            .set_time_level(LevelFilter::Off)
            .set_thread_level(LevelFilter::Off)
            .set_target_level(LevelFilter::Off)
            .build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    Ok(())
}

// Produces the expression named by the config.
fn load_expression(config: &Config) -> Result<Expression, RunError> {
    if let Some(source) = &config.expression {
        return Ok(parse_expression(source)?);
    }

    if let Some(path) = &config.src_filepath {
        info!("reading expression from {}", path);
        let source = fs::read_to_string(path)?;
        return Ok(parse_expression(&source)?);
    }

    if let Some(name) = &config.sample {
        return sample_expressions::by_name(name).ok_or_else(|| {
            RunError::ConfigError(format!(
                "Unrecognized sample name {}, expected one of {}",
                name,
                SAMPLE_NAMES.join(", ")
            ))
        });
    }

    Err(RunError::ConfigError(String::from(
        "No expression given; use --expression, --src-filepath or --sample",
    )))
}

// Appends one line per node, children indented below their parent.
fn outline_helper(expr: &SizedExpression, indent: usize, lines: &mut Vec<String>) {
    let size = expr.metadata();
    let label = expr.match_with(
        |binder, _| format!("abstraction {}", binder),
        |_, _| String::from("application"),
        |name| format!("variable {}", name),
    );

    lines.push(format!(
        "{}{} width={} height={} root={}",
        "  ".repeat(indent),
        label,
        size.width,
        size.height,
        size.root
    ));

    match expr {
        Expression::Abstraction { body, .. } => outline_helper(body, indent + 1, lines),
        Expression::Application { func, arg, .. } => {
            outline_helper(func, indent + 1, lines);
            outline_helper(arg, indent + 1, lines);
        }
        Expression::Variable { .. } => {}
    }
}

/// Renders every node of a sized tree with its layout sizes.
pub fn render_outline(sized: &SizedExpression) -> String {
    let mut lines = Vec::new();
    outline_helper(sized, 0, &mut lines);
    lines.join("\n")
}

/// Parse, annotate and render the expression given by `config`.
pub fn run(config: &Config) -> Result<String, RunError> {
    let expr = load_expression(config)?;
    let sized = size_expression(&expr);

    match config.format {
        OutputFormat::Text => {
            return Ok(format!("{}\n{}", expr, render_outline(&sized)));
        }

        OutputFormat::Json => {
            return Ok(serde_json::to_string_pretty(&sized)?);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(args: &[&str]) -> Config {
        let mut full_args = vec!["rust-lambda-parse"];
        full_args.extend_from_slice(args);
        Config::try_parse_from(full_args).expect("config should parse")
    }

    // Test if the outline lists each node with its sizes.
    #[test]
    fn test_run_text() {
        let output = run(&config_for(&["--expression", r"(\x.x)(\y.y)"])).expect("run failed");

        let expected = "(λx. x) (λy. y)\n\
                        application width=2 height=3 root=0.5\n  \
                        abstraction x width=1 height=2 root=0\n    \
                        variable x width=1 height=1 root=0\n  \
                        abstraction y width=1 height=2 root=0\n    \
                        variable y width=1 height=1 root=0";

        assert_eq!(output, expected);
    }

    // Test if JSON output carries the sizes on every node.
    #[test]
    fn test_run_json() {
        let output = run(&config_for(&["--sample", "i", "--format", "json"])).expect("run failed");
        let value: serde_json::Value = serde_json::from_str(&output).expect("invalid json");

        assert_eq!(value["type"], "abstraction");
        assert_eq!(value["metadata"]["width"], 1);
        assert_eq!(value["metadata"]["height"], 2);
        assert_eq!(value["body"]["metadata"]["root"], 0.0);
    }

    // Test if parse errors surface as run errors.
    #[test]
    fn test_run_parse_error() {
        let result = run(&config_for(&["--expression", "x)"]));

        assert!(matches!(
            result,
            Err(RunError::ExpressionParseError(ParseError::TrailingInput(_)))
        ));
    }

    // Test if an unknown sample is a config error.
    #[test]
    fn test_unknown_sample() {
        let result = run(&config_for(&["--sample", "omega"]));

        assert!(matches!(result, Err(RunError::ConfigError(_))));
    }

    // Test if exactly one source must be given.
    #[test]
    fn test_source_required() {
        assert!(Config::try_parse_from(["rust-lambda-parse"]).is_err());
        assert!(Config::try_parse_from(["rust-lambda-parse", "-e", "x", "--sample", "I"]).is_err());
    }

    // Test if a missing file is reported as an input file error.
    #[test]
    fn test_missing_file() {
        let result = run(&config_for(&["--src-filepath", "/nonexistent/expression.lc"]));

        assert!(matches!(result, Err(RunError::InputFileError(_))));
    }
}
