use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use stubgen_ast::{Function, StubStyle};
use stubgen_parser::error::ParseError;
use stubgen_session::{OutputMode, ParseOptions, Session, UnfinishedPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generates empty function stubs from the API block of a C header", long_about = None, bin_name = "stubgen")]
pub struct StubArgs {
    /// The header to scan. Defaults to the_debuginator.h one directory above the binary.
    pub input: Option<PathBuf>,

    /// Write the stubs to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Text that marks the line opening the declaration block.
    #[arg(long, default_value = "API START")]
    pub start_marker: String,

    /// Text that marks the line closing the declaration block.
    #[arg(long, default_value = "API END")]
    pub end_marker: String,

    /// Lines starting with this are skipped inside the block.
    #[arg(long, default_value = "//")]
    pub comment_prefix: String,

    /// Fail if a declaration is still open when the block ends.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Minimum width of the return type column.
    #[arg(long, default_value_t = 20)]
    pub return_width: usize,

    /// Minimum width of the function name column.
    #[arg(long, default_value_t = 50)]
    pub name_width: usize,

    /// Keep parameter names in the stubs.
    #[arg(long, default_value_t = false)]
    pub param_names: bool,

    /// Print only the function names.
    #[arg(long, default_value_t = false)]
    pub names: bool,
}

pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = StubArgs::parse();
    run(&args)?;

    Ok(())
}

/// Reads the input, parses it and writes the stubs. Returns how many were written.
pub fn run(args: &StubArgs) -> Result<usize> {
    let session = load_session(args)?;
    let path = session.display_path();
    let start_time = Instant::now();

    let functions = match generate(&session) {
        Ok(functions) => functions,
        Err(error) => {
            let source = std::fs::read_to_string(&session.file_path);
            if let (Some(parse_error), Ok(source)) = (error.downcast_ref::<ParseError>(), source) {
                let report = stubgen_parser::error_to_report(&path, parse_error);
                stubgen_parser::print_report(&path, &source, report)?;
            }
            return Err(error);
        }
    };

    match &session.output_file {
        Some(output) => {
            let file = File::create(output)
                .with_context(|| format!("failed to create {}", output.display()))?;
            let mut out = BufWriter::new(file);
            write_stubs(&session, &functions, &mut out)?;
            out.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            write_stubs(&session, &functions, &mut stdout.lock())?;
        }
    }

    let elapsed = start_time.elapsed();
    tracing::info!(
        count = functions.len(),
        path = path.as_str(),
        "generated stubs in {:.2?}",
        elapsed
    );

    Ok(functions.len())
}

/// Builds the session from the command line.
pub fn load_session(args: &StubArgs) -> Result<Session> {
    let file_path = match &args.input {
        Some(input) => input.clone(),
        None => default_input_path()?,
    };

    let session = Session {
        file_path,
        options: ParseOptions {
            start_marker: args.start_marker.clone(),
            end_marker: args.end_marker.clone(),
            comment_prefix: args.comment_prefix.clone(),
            unfinished: if args.strict {
                UnfinishedPolicy::Error
            } else {
                UnfinishedPolicy::Drop
            },
        },
        style: StubStyle {
            return_width: args.return_width,
            name_width: args.name_width,
            param_names: args.param_names,
        },
        output: if args.names {
            OutputMode::Names
        } else {
            OutputMode::Stubs
        },
        output_file: args.output.clone(),
    };
    tracing::debug!("Input file: {:#?}", session.file_path);
    tracing::debug!("Options: {:#?}", session.options);
    tracing::debug!("Style: {:#?}", session.style);

    Ok(session)
}

/// The header next to the directory holding the binary.
pub fn default_input_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate the stubgen binary")?;
    let dir = exe
        .parent()
        .context("the stubgen binary has no parent directory")?;
    Ok(dir.join("..").join(Session::DEFAULT_HEADER))
}

/// Parses the input file line by line, reading nothing past the end marker.
pub fn generate(session: &Session) -> Result<Vec<Function>> {
    let path = session.display_path();
    let file = File::open(&session.file_path).with_context(|| format!("failed to read {path}"))?;
    let mut reader = BufReader::new(file);

    let mut read_error = None;
    let lines = std::iter::from_fn(|| {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(error) => {
                read_error = Some(error);
                None
            }
        }
    });

    let parsed = stubgen_parser::parse_lines(lines, &session.options);
    if let Some(error) = read_error {
        return Err(error).with_context(|| format!("failed to read {path}"));
    }

    parsed.with_context(|| format!("failed to parse {path}"))
}

pub fn render_lines(session: &Session, functions: &[Function]) -> Vec<String> {
    functions
        .iter()
        .map(|func| match session.output {
            OutputMode::Stubs => func.render(&session.style),
            OutputMode::Names => func.name.name.clone(),
        })
        .collect()
}

pub fn write_stubs(session: &Session, functions: &[Function], out: &mut impl Write) -> Result<()> {
    for line in render_lines(session, functions) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
