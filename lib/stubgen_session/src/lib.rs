use std::path::PathBuf;

pub use stubgen_ast::StubStyle;

#[derive(Debug, Clone)]
pub struct Session {
    pub file_path: PathBuf,
    pub options: ParseOptions,
    pub style: StubStyle,
    pub output: OutputMode,
    /// Where to write the stubs, stdout if none.
    pub output_file: Option<PathBuf>,
}

impl Session {
    /// The header scanned when no input is given, relative to the directory above the binary.
    pub const DEFAULT_HEADER: &'static str = "the_debuginator.h";

    pub fn display_path(&self) -> String {
        self.file_path.display().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    pub start_marker: String,
    pub end_marker: String,
    pub comment_prefix: String,
    pub unfinished: UnfinishedPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            start_marker: "API START".to_string(),
            end_marker: "API END".to_string(),
            comment_prefix: "//".to_string(),
            unfinished: UnfinishedPolicy::Drop,
        }
    }
}

/// What to do with a declaration still open when the block ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnfinishedPolicy {
    /// Discard it with a warning.
    #[default]
    Drop,
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    #[default]
    Stubs,
    /// Only the function names, one per line.
    Names,
}
