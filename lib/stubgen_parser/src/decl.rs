use stubgen_ast::{Function, Ident, Parameter};
use stubgen_session::{ParseOptions, UnfinishedPolicy};
use tracing::{debug, warn};

use crate::{
    cursor::{Cursor, Token},
    error::ParseError,
};

/// Whether the caller should keep feeding lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

#[derive(Debug)]
enum State {
    SeekingStart,
    InBlock(Decl),
    Done,
}

#[derive(Debug)]
enum Decl {
    Idle,
    Accumulating(Function),
}

/// Line-at-a-time declaration parser.
///
/// Feed it lines in order with [`DeclParser::feed`] until it answers
/// [`Flow::Stop`], then call [`DeclParser::finish`].
#[derive(Debug)]
pub struct DeclParser<'o> {
    options: &'o ParseOptions,
    state: State,
    functions: Vec<Function>,
}

impl<'o> DeclParser<'o> {
    pub fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            state: State::SeekingStart,
            functions: Vec::new(),
        }
    }

    /// Processes one physical line.
    ///
    /// `line_no` is 1-based and `offset` is the file offset of the first byte of `raw`.
    pub fn feed(&mut self, line_no: usize, offset: usize, raw: &str) -> Result<Flow, ParseError> {
        let line = raw.trim();
        let offset = offset + (raw.len() - raw.trim_start().len());

        let state = std::mem::replace(&mut self.state, State::Done);
        self.state = match state {
            State::Done => return Ok(Flow::Stop),
            State::SeekingStart => {
                if line.contains(self.options.start_marker.as_str()) {
                    debug!(line = line_no, "entered declaration block");
                    State::InBlock(Decl::Idle)
                } else {
                    State::SeekingStart
                }
            }
            State::InBlock(decl) => {
                if line.contains(self.options.end_marker.as_str()) {
                    debug!(line = line_no, "left declaration block");
                    self.close(decl)?;
                    return Ok(Flow::Stop);
                }

                if self.is_filtered(line) {
                    State::InBlock(decl)
                } else {
                    State::InBlock(self.scan_line(decl, Cursor::new(line, offset), line_no)?)
                }
            }
        };

        Ok(Flow::Continue)
    }

    /// Ends the parse, returning the finished declarations in source order.
    pub fn finish(mut self) -> Result<Vec<Function>, ParseError> {
        match std::mem::replace(&mut self.state, State::Done) {
            State::SeekingStart => {
                warn!(
                    marker = self.options.start_marker.as_str(),
                    "start marker not found, nothing to parse"
                );
            }
            State::InBlock(decl) => {
                warn!(
                    marker = self.options.end_marker.as_str(),
                    "end marker not found, parsed until the end of the input"
                );
                self.close(decl)?;
            }
            State::Done => {}
        }

        Ok(self.functions)
    }

    fn is_filtered(&self, line: &str) -> bool {
        let prefix = self.options.comment_prefix.as_str();
        line.is_empty() || (!prefix.is_empty() && line.starts_with(prefix))
    }

    fn close(&mut self, decl: Decl) -> Result<(), ParseError> {
        let Decl::Accumulating(func) = decl else {
            return Ok(());
        };

        match self.options.unfinished {
            UnfinishedPolicy::Drop => {
                warn!(
                    name = func.name.name.as_str(),
                    line = func.line,
                    "dropping unfinished declaration"
                );
                Ok(())
            }
            UnfinishedPolicy::Error => Err(ParseError::UnfinishedDeclaration {
                line: func.line,
                span: func.span,
                name: func.name.name,
            }),
        }
    }

    fn emit(&mut self, func: Function) -> Decl {
        debug!(
            name = func.name.name.as_str(),
            line = func.line,
            params = func.params.len(),
            "parsed declaration"
        );
        self.functions.push(func);
        Decl::Idle
    }

    fn scan_line(
        &mut self,
        decl: Decl,
        mut cursor: Cursor<'_>,
        line_no: usize,
    ) -> Result<Decl, ParseError> {
        let mut func = match decl {
            Decl::Accumulating(mut func) => {
                func.span = func.span.to(cursor.line_span());
                func
            }
            Decl::Idle => {
                let func = begin(&mut cursor, line_no)?;
                // `name()` and `name(void)` declare no parameters.
                if cursor.eat(")") || cursor.eat("void)") {
                    return match cursor.rest() {
                        ";" => Ok(self.emit(func)),
                        found => Err(ParseError::UnexpectedTrailing {
                            line: line_no,
                            span: cursor.rest_span(),
                            found: found.to_string(),
                        }),
                    };
                }
                func
            }
        };

        loop {
            let param = scan_param(&mut cursor, line_no)?;
            func.params.push(param);

            match cursor.rest() {
                "," => return Ok(Decl::Accumulating(func)),
                ");" => return Ok(self.emit(func)),
                rest if rest.starts_with(',') => {
                    cursor.skip(1);
                    cursor.skip_whitespace();
                }
                found => {
                    return Err(ParseError::UnexpectedTrailing {
                        line: line_no,
                        span: cursor.rest_span(),
                        found: found.to_string(),
                    })
                }
            }
        }
    }
}

/// Reads `return_type name(` and leaves the cursor after the paren.
fn begin(cursor: &mut Cursor<'_>, line_no: usize) -> Result<Function, ParseError> {
    let Some(return_type) = cursor.take_until_whitespace() else {
        return Err(ParseError::MissingReturnType {
            line: line_no,
            span: cursor.line_span(),
        });
    };
    cursor.skip(1);

    let Some(name) = cursor.take_until('(') else {
        return Err(ParseError::MissingOpenParen {
            line: line_no,
            span: cursor.rest_span(),
        });
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::EmptyName {
            line: line_no,
            span: cursor.here(),
        });
    }
    cursor.skip(1);

    Ok(Function {
        return_type: ident(return_type),
        name: ident(name),
        params: Vec::new(),
        line: line_no,
        span: cursor.line_span(),
    })
}

/// Reads `type name` and leaves the cursor on the `,` or `)` that ended it.
fn scan_param(cursor: &mut Cursor<'_>, line_no: usize) -> Result<Parameter, ParseError> {
    let start = cursor.here();
    let Some(r#type) = cursor.take_until_whitespace() else {
        return Err(ParseError::MissingParamName {
            line: line_no,
            span: cursor.rest_span(),
        });
    };
    cursor.skip_whitespace();

    let Some(name) = cursor.take_until(',').or_else(|| cursor.take_until(')')) else {
        return Err(ParseError::MissingParamTerminator {
            line: line_no,
            span: cursor.rest_span(),
        });
    };
    let name = name.trim();

    if r#type.is_empty() || name.is_empty() {
        return Err(ParseError::EmptyParam {
            line: line_no,
            span: start.to(name.span),
        });
    }

    Ok(Parameter {
        span: r#type.span.to(name.span),
        r#type: ident(r#type),
        name: ident(name),
    })
}

fn ident(token: Token<'_>) -> Ident {
    Ident::new(token.text, token.span)
}
