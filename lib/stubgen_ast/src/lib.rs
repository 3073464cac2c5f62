use std::fmt;

use itertools::Itertools;
pub use stubgen_span::Span;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One declared argument, e.g. `const char* name`.
///
/// The type is whatever precedes the first whitespace, so `const char* name`
/// has type `const` and name `char* name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Parameter {
    pub r#type: Ident,
    pub name: Ident,
    pub span: Span,
}

/// Renders the parameter type only, which is what stubs print.
impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.r#type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Function {
    pub return_type: Ident,
    pub name: Ident,
    /// In source order.
    pub params: Vec<Parameter>,
    /// 1-based line where the declaration starts.
    pub line: usize,
    pub span: Span,
}

impl Function {
    pub fn param_types(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.r#type.name.as_str())
    }

    /// Renders the declaration as a stub with an empty body.
    pub fn render(&self, style: &StubStyle) -> String {
        let params = if style.param_names {
            self.params
                .iter()
                .map(|p| format!("{} {}", p.r#type, p.name))
                .join(", ")
        } else {
            self.param_types().join(", ")
        };

        format!(
            "{:<rw$} {:<nw$}({}) {{}}",
            self.return_type.name,
            self.name.name,
            params,
            rw = style.return_width,
            nw = style.name_width,
        )
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&StubStyle::default()))
    }
}

/// Column layout of a rendered stub. Widths are minimums, longer text is not cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StubStyle {
    pub return_width: usize,
    pub name_width: usize,
    /// Print `type name` pairs instead of bare types.
    pub param_names: bool,
}

impl Default for StubStyle {
    fn default() -> Self {
        Self {
            return_width: 20,
            name_width: 50,
            param_names: false,
        }
    }
}
