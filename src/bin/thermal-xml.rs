//! thermal-xml command line interface
//!
//! # Usage
//!
//! ```bash
//! # Convert a print format HTML file to thermal XML
//! thermal-xml convert receipt.html > receipt.xml
//!
//! # Validate, checking doc fields against a schema file
//! thermal-xml validate receipt.xml --doctype "POS Invoice" --schema fields.json
//!
//! # Render a (Jinja-free) ticket to an HTML preview
//! thermal-xml preview ticket.xml > preview.html
//! ```
//!
//! Inputs are read from stdin when no file is given. Logs go to stderr and
//! are controlled by `RUST_LOG`.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use thermal_xml::{
    ConverterConfig, HtmlToXmlConverter, NoSchema, PreviewConfig, SchemaLookup, StaticSchema,
    TemplateValidator, ValidatorConfig, render_preview,
};

#[derive(Parser)]
#[command(name = "thermal-xml")]
#[command(version)]
#[command(about = "Convert HTML/Jinja print formats to thermal printer XML")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Characters per printed line
    #[arg(long, global = true, default_value_t = thermal_xml::LINE_WIDTH)]
    line_width: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert HTML/Jinja to thermal XML
    Convert {
        /// Input file (reads stdin if not provided)
        file: Option<PathBuf>,

        /// Document type recorded with the conversion
        #[arg(long)]
        doctype: Option<String>,

        /// Print the whole conversion (xml, warnings, info) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate an XML+Jinja template
    Validate {
        /// Input file (reads stdin if not provided)
        file: Option<PathBuf>,

        /// Schema to check `doc.` fields against
        #[arg(long)]
        doctype: Option<String>,

        /// JSON object mapping schema ids to their field names
        #[arg(long)]
        schema: Option<PathBuf>,
    },

    /// Render ticket XML to an HTML preview
    Preview {
        /// Input file (reads stdin if not provided)
        file: Option<PathBuf>,
    },
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("thermal_xml=warn".parse()?))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Convert { file, doctype, json } => {
            cmd_convert(file.as_deref(), doctype, json, cli.line_width)
        }
        Commands::Validate {
            file,
            doctype,
            schema,
        } => cmd_validate(file.as_deref(), doctype.as_deref(), schema.as_deref(), cli.line_width),
        Commands::Preview { file } => cmd_preview(file.as_deref(), cli.line_width),
    }
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

fn cmd_convert(
    file: Option<&Path>,
    doctype: Option<String>,
    json: bool,
    line_width: usize,
) -> anyhow::Result<ExitCode> {
    let html = read_input(file)?;
    let mut converter = HtmlToXmlConverter::new(ConverterConfig::default().with_line_width(line_width));
    if let Some(doctype) = doctype {
        converter = converter.with_doc_type(doctype);
    }
    let out = converter.convert(&html);

    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for warning in &out.warnings {
            eprintln!("warning: {warning}");
        }
        for note in &out.info {
            eprintln!("info: {note}");
        }
        println!("{}", out.xml_template);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_validate(
    file: Option<&Path>,
    doctype: Option<&str>,
    schema: Option<&Path>,
    line_width: usize,
) -> anyhow::Result<ExitCode> {
    let template = read_input(file)?;
    let lookup: Box<dyn SchemaLookup> = match schema {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read schema {}", path.display()))?;
            Box::new(StaticSchema::from_json(&json).context("invalid schema file")?)
        }
        None => Box::new(NoSchema),
    };

    let validator = TemplateValidator::new(ValidatorConfig::default().with_line_width(line_width));
    let result = validator.validate(&template, doctype, lookup.as_ref());
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(if result.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_preview(file: Option<&Path>, line_width: usize) -> anyhow::Result<ExitCode> {
    let xml = read_input(file)?;
    let config = PreviewConfig {
        line_width,
        ..PreviewConfig::default()
    };
    println!("{}", render_preview(&xml, &config));
    Ok(ExitCode::SUCCESS)
}
