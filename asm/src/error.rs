use crate::msg::Msg;
use arch::TableError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Unknown mnemonic: `{name}`")]
    UnknownMnemonic { line: usize, name: String },

    #[error("Cannot parse `{text}` as a number")]
    NumericParse { line: usize, text: String },

    #[error("`{mnemonic}` requires an operand")]
    MissingOperand { line: usize, mnemonic: String },

    #[error("Undefined symbol: `{name}`")]
    UndefinedSymbol { line: usize, name: String },

    #[error("Re-defined label: `{name}`")]
    DuplicateDefinition { line: usize, name: String },

    #[error("Location counter overflow")]
    AddressOverflow { line: usize },

    #[error("Missing END directive")]
    MissingEnd,

    #[error("Corrupt intermediate stream: {0}")]
    CorruptIntermediateStream(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),
}

impl Error {
    /// Source line (1-based) the error is attributed to.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnknownMnemonic { line, .. }
            | Error::NumericParse { line, .. }
            | Error::MissingOperand { line, .. }
            | Error::UndefinedSymbol { line, .. }
            | Error::DuplicateDefinition { line, .. }
            | Error::AddressOverflow { line } => Some(*line),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, lines: &[&str]) {
        let msg = Msg::error(self.to_string());
        match self.line() {
            Some(line) => msg.diag(file, line, lines),
            None => msg.headline(),
        }
    }
}
