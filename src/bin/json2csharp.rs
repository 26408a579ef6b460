use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use is_terminal::IsTerminal;
use json2csharp::Converter;

/// Generates C# Utf8JsonWriter code that reproduces a JSON document.
///
/// json2csharp reads JSON from a file or stdin and prints C# code that,
/// when executed, writes the same document token by token through
/// System.Text.Json.Utf8JsonWriter.
#[derive(Parser, Debug)]
#[command(name = "json2csharp")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input JSON file. If not specified, reads from stdin.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output file. If not specified, writes to stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Name of the Utf8JsonWriter variable in the generated code.
    #[arg(long, default_value = "jsonWriter")]
    writer_name: String,

    /// Skip the MemoryStream/Utf8JsonWriter construction lines.
    #[arg(long)]
    no_setup: bool,

    /// Skip the trailing Flush() line.
    #[arg(long)]
    no_flush: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("json2csharp: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Read input
    let input = match &args.file {
        None => {
            if io::stdin().is_terminal() {
                // Invoked with no input at all; show usage rather than
                // blocking on an empty terminal.
                Args::command().print_help()?;
                return Ok(());
            }
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        Some(path) => fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                format!("cannot find file '{}'", path.display())
            } else {
                format!("cannot read '{}': {}", path.display(), e)
            }
        })?,
    };

    // Configure converter
    let mut converter = Converter::new();
    converter.options.writer_variable_name = args.writer_name.clone();
    converter.options.emit_setup = !args.no_setup;
    converter.options.emit_flush = !args.no_flush;

    // Convert
    let code = converter.convert(&input)?;

    // Write output
    if let Some(path) = args.output {
        fs::write(&path, &code)
            .map_err(|e| format!("cannot write '{}': {}", path.display(), e))?;
    } else {
        io::stdout().write_all(code.as_bytes())?;
    }

    Ok(())
}
