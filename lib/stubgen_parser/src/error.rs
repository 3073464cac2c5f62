use stubgen_span::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected whitespace after the return type")]
    MissingReturnType { line: usize, span: Span },
    #[error("line {line}: expected '(' after the function name")]
    MissingOpenParen { line: usize, span: Span },
    #[error("line {line}: expected a function name before '('")]
    EmptyName { line: usize, span: Span },
    #[error("line {line}: expected whitespace between parameter type and name")]
    MissingParamName { line: usize, span: Span },
    #[error("line {line}: expected ',' or ')' after the parameter name")]
    MissingParamTerminator { line: usize, span: Span },
    #[error("line {line}: expected a parameter type and name")]
    EmptyParam { line: usize, span: Span },
    #[error("line {line}: expected ');' or ', ' but found {found:?}")]
    UnexpectedTrailing {
        line: usize,
        span: Span,
        found: String,
    },
    #[error("line {line}: declaration of {name:?} is not finished before the end of the block")]
    UnfinishedDeclaration {
        line: usize,
        span: Span,
        name: String,
    },
}

impl ParseError {
    /// 1-based line of the offending text.
    pub fn line(&self) -> usize {
        match self {
            Self::MissingReturnType { line, .. }
            | Self::MissingOpenParen { line, .. }
            | Self::EmptyName { line, .. }
            | Self::MissingParamName { line, .. }
            | Self::MissingParamTerminator { line, .. }
            | Self::EmptyParam { line, .. }
            | Self::UnexpectedTrailing { line, .. }
            | Self::UnfinishedDeclaration { line, .. } => *line,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::MissingReturnType { span, .. }
            | Self::MissingOpenParen { span, .. }
            | Self::EmptyName { span, .. }
            | Self::MissingParamName { span, .. }
            | Self::MissingParamTerminator { span, .. }
            | Self::EmptyParam { span, .. }
            | Self::UnexpectedTrailing { span, .. }
            | Self::UnfinishedDeclaration { span, .. } => *span,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingReturnType { .. } => "P1",
            Self::MissingOpenParen { .. } => "P2",
            Self::EmptyName { .. } => "P3",
            Self::MissingParamName { .. } => "P4",
            Self::MissingParamTerminator { .. } => "P5",
            Self::EmptyParam { .. } => "P6",
            Self::UnexpectedTrailing { .. } => "P7",
            Self::UnfinishedDeclaration { .. } => "P8",
        }
    }
}
