use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Malformed table entry at line {line}: `{text}`")]
    MalformedTableEntry { line: usize, text: String },

    #[error("Unknown statement class `{tag}` at line {line}")]
    UnknownClass { line: usize, tag: String },

    #[error("Register `{0}` conflicts with an existing entry")]
    DuplicateRegister(String),
}
