use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Statement class of a mnemonic, written as its two-letter tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
pub enum Class {
    /// Assembler directive (`START`, `END`, ...)
    #[strum(serialize = "AD")]
    #[serde(rename = "AD")]
    Directive,

    /// Executable instruction
    #[strum(serialize = "IS")]
    #[serde(rename = "IS")]
    Imperative,

    /// Data definition (`DC`, `DS`)
    #[strum(serialize = "DL")]
    #[serde(rename = "DL")]
    Declarative,
}

impl Class {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }
}
