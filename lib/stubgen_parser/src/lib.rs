use std::ops::Range;

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use stubgen_ast::Function;
use stubgen_session::ParseOptions;

use crate::{decl::Flow, error::ParseError};

pub mod cursor;
pub mod decl;
pub mod error;

pub use decl::DeclParser;

/// Parses the declaration block of a whole file.
pub fn parse_source(source: &str, options: &ParseOptions) -> Result<Vec<Function>, ParseError> {
    parse_lines(source.split_inclusive('\n'), options)
}

/// Parses lines pulled one at a time; nothing past the end marker is pulled.
///
/// Lines may keep their terminator. A line without one is taken to have been
/// followed by a single `\n` when computing spans.
pub fn parse_lines<I, S>(lines: I, options: &ParseOptions) -> Result<Vec<Function>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = DeclParser::new(options);
    let mut offset = 0;

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if parser.feed(index + 1, offset, line)? == Flow::Stop {
            break;
        }
        offset += line.len() + usize::from(!line.ends_with('\n'));
    }

    parser.finish()
}

pub fn print_report<'a>(
    path: &'a str,
    source: &'a str,
    report: Report<'static, (&'a str, Range<usize>)>,
) -> Result<(), std::io::Error> {
    let source = Source::from(source);
    report.eprint((path, source))
}

pub fn error_to_report<'a>(
    path: &'a str,
    error: &ParseError,
) -> Report<'static, (&'a str, Range<usize>)> {
    let mut colors = ColorGenerator::new();
    let span = error.span();
    let message = match error {
        ParseError::MissingReturnType { .. } => "missing return type".to_string(),
        ParseError::MissingOpenParen { .. } => "expected '('".to_string(),
        ParseError::EmptyName { .. } => "function name expected before this".to_string(),
        ParseError::MissingParamName { .. } => "parameter has no name".to_string(),
        ParseError::MissingParamTerminator { .. } => "expected ',' or ')'".to_string(),
        ParseError::EmptyParam { .. } => "empty parameter".to_string(),
        ParseError::UnexpectedTrailing { found, .. } => {
            format!("unexpected {found:?}, expected ');' or ', '")
        }
        ParseError::UnfinishedDeclaration { name, .. } => {
            format!("declaration of {name:?} starts here")
        }
    };

    let mut report = Report::build(ReportKind::Error, path, span.lo)
        .with_code(error.code())
        .with_message(error.to_string())
        .with_label(
            Label::new((path, span.into()))
                .with_message(message)
                .with_color(colors.next()),
        );

    if let ParseError::UnfinishedDeclaration { .. } = error {
        report = report.with_help("close the parameter list with ');' before the end marker");
    }

    report.finish()
}
