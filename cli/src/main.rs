//! tablemark CLI - render CSV files, text dumps and OCR output to Markdown

mod adapters;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use tablemark::convert::{render_source, ConverterRegistry};
use tablemark::{ColumnAlignment, ColumnSelector, ConversionOptions, ConversionResult, OcrStyle};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "tablemark")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render tables, extracted text and OCR output to Markdown", long_about = None)]
struct Cli {
    /// Load conversion options from a JSON file
    #[arg(long, global = true, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Print the full result (markdown, metadata, error) as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Terminate lines with CRLF
    #[arg(long, global = true)]
    crlf: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a CSV or TSV file as a Markdown table
    Table {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Field delimiter for CSV input
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Treat the first row as data
        #[arg(long)]
        no_headers: bool,

        /// Columns to include, by index or header name (e.g., "Name,0,Price")
        #[arg(short, long)]
        columns: Option<String>,

        /// Maximum number of rows, header included
        #[arg(long)]
        max_rows: Option<i64>,

        /// Column alignment as IDX=ALIGN (left, center, right)
        #[arg(long, value_name = "IDX=ALIGN", value_parser = parse_alignment)]
        align: Vec<(usize, ColumnAlignment)>,
    },

    /// Render extracted text with heading detection
    Text {
        /// Input file, pages separated by form feeds
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Use the all-caps / title-case heading rules
        #[arg(short, long)]
        preserve: bool,

        /// Enable heading detection in preserve mode
        #[arg(long, value_name = "BOOL")]
        headings: Option<bool>,

        /// Maximum number of pages
        #[arg(long)]
        max_pages: Option<i64>,
    },

    /// Render recognized text blocks
    Ocr {
        /// Input file, blocks separated by blank lines
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output style
        #[arg(short, long, value_enum)]
        style: Option<StyleArg>,
    },

    /// Convert a file, choosing the reader from its extension
    Convert {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    /// One paragraph per block
    Plain,
    /// Every line as a bullet
    List,
    /// Everything inside a fenced code block
    Code,
}

impl From<StyleArg> for OcrStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Plain => OcrStyle::Plain,
            StyleArg::List => OcrStyle::List,
            StyleArg::Code => OcrStyle::Code,
        }
    }
}

fn parse_alignment(s: &str) -> Result<(usize, ColumnAlignment), String> {
    let (idx, align) = s
        .split_once('=')
        .ok_or_else(|| format!("expected IDX=ALIGN, got '{}'", s))?;
    let idx = idx
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid column index '{}': {}", idx, e))?;
    Ok((idx, ColumnAlignment::parse(align.trim())))
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Version => {
            cmd_version();
            Ok(true)
        }
        ref command => load_options(&cli).and_then(|options| {
            let result = run(command, options)?;
            emit(&result, cli.json, cli.output.as_deref())?;
            Ok(result.success)
        }),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Defaults, overlaid with `--config` and the global flags.
fn load_options(cli: &Cli) -> CliResult<ConversionOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
            serde_json::from_str(&json)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?
        }
        None => ConversionOptions::default(),
    };

    if cli.crlf {
        options = options.with_eol("\r\n");
    }
    Ok(options)
}

fn run(command: &Commands, options: ConversionOptions) -> CliResult<ConversionResult> {
    let registry = adapters::registry();

    match command {
        Commands::Table {
            input,
            delimiter,
            no_headers,
            columns,
            max_rows,
            align,
        } => {
            let mut options = options;
            if let Some(delimiter) = delimiter {
                options = options.with_delimiter(*delimiter);
            }
            if *no_headers {
                options = options.with_headers(false);
            }
            if let Some(columns) = columns {
                options = options.with_columns(ColumnSelector::parse_list(columns));
            }
            if let Some(max_rows) = max_rows {
                options = options.with_max_rows(*max_rows);
            }
            for (idx, alignment) in align {
                options = options.with_alignment(*idx, *alignment);
            }

            let adapter = match extension(input).as_deref() {
                Some("tsv") | Some("tab") => "tsv",
                _ => "csv",
            };
            read_with(&registry, adapter, input, &options)
        }
        Commands::Text {
            input,
            preserve,
            headings,
            max_pages,
        } => {
            let mut options = options;
            if *preserve {
                options = options.with_preserve_formatting(true);
            }
            if let Some(headings) = headings {
                options = options.with_heading_detection(*headings);
            }
            if let Some(max_pages) = max_pages {
                options = options.with_max_pages(*max_pages);
            }
            read_with(&registry, "text", input, &options)
        }
        Commands::Ocr { input, style } => {
            let mut options = options;
            if let Some(style) = style {
                options = options.with_ocr_style((*style).into());
            }
            read_with(&registry, "ocr", input, &options)
        }
        Commands::Convert { input } => Ok(registry.convert_file(input, &options)),
        Commands::Version => unreachable!("handled in main"),
    }
}

/// Read `input` with a named adapter and render the result.
fn read_with(
    registry: &ConverterRegistry,
    adapter: &str,
    input: &Path,
    options: &ConversionOptions,
) -> CliResult<ConversionResult> {
    let adapter = registry
        .get_by_name(adapter)
        .ok_or_else(|| format!("No adapter named '{}'", adapter))?;
    let bytes = fs::read(input).map_err(|e| format!("Cannot read {}: {}", input.display(), e))?;

    log::info!("Converting {} with '{}'", input.display(), adapter.name());
    let rendered = adapter
        .read(&bytes, options)
        .and_then(|source| render_source(&source, options));
    Ok(rendered.into())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

fn emit(result: &ConversionResult, json: bool, output: Option<&Path>) -> CliResult<()> {
    let text = if json {
        result.to_json()?
    } else if result.success {
        result.markdown.clone()
    } else {
        let message = result.error.as_deref().unwrap_or("conversion failed");
        eprintln!("{}: {}", "Error".red().bold(), message);
        return Ok(());
    };

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "tablemark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown rendering for tables, extracted text and OCR output");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/tablemark".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tablemark").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_alignment() {
        assert_eq!(parse_alignment("2=right"), Ok((2, ColumnAlignment::Right)));
        assert_eq!(parse_alignment(" 0 = Center"), Ok((0, ColumnAlignment::Center)));
        // Unknown names fall back to the default marker
        assert_eq!(parse_alignment("1=diagonal"), Ok((1, ColumnAlignment::Default)));
        assert!(parse_alignment("right").is_err());
        assert!(parse_alignment("-1=left").is_err());
    }

    #[test]
    fn test_load_options_from_config() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        write!(
            config,
            r#"{{"maxRows": 3, "columnsToInclude": [-1, "Name"], "columnAlignments": {{"x": "left", "1": "right"}}}}"#
        )
        .unwrap();
        let path = config.path().to_str().unwrap();

        let cli = parse(&["--config", path, "--crlf", "convert", "input.csv"]);
        let options = load_options(&cli).unwrap();

        assert_eq!(options.row_limit(), Some(3));
        assert_eq!(
            options.columns_to_include,
            vec![ColumnSelector::from("-1"), ColumnSelector::from("Name")]
        );
        assert_eq!(options.column_alignments.len(), 1);
        assert_eq!(options.line_ending(), "\r\n");
    }

    #[test]
    fn test_load_options_rejects_malformed_json() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        config.write_all(b"{ not json").unwrap();
        let path = config.path().to_str().unwrap();

        let cli = parse(&["text", "--config", path, "notes.txt"]);
        let err = load_options(&cli).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config"));
    }

    #[test]
    fn test_table_command_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prices.csv");
        fs::write(&input, "Item;Price\nTea | green;2.50\n").unwrap();

        let cli = parse(&[
            "table",
            input.to_str().unwrap(),
            "--delimiter",
            ";",
            "--align",
            "1=right",
        ]);
        let options = load_options(&cli).unwrap();
        let result = run(&cli.command, options).unwrap();

        assert!(result.success);
        assert_eq!(
            result.markdown,
            "| Item | Price |\n| --- | ---: |\n| Tea \\| green | 2.50 |"
        );
    }
}
