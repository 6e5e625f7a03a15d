mod assembler;
mod config;
mod cursor;
mod error;
mod littab;
mod msg;
mod pass1;
mod pass2;
mod record;
mod symtab;
mod util;

pub use assembler::{Assembler, Assembly, Tables};
pub use config::{AsmConfig, Options};
pub use cursor::LocationCursor;
pub use error::{Error, Result};
pub use littab::{LiteralRef, LiteralTable, ResolvedLiterals};
pub use msg::Msg;
pub use pass1::{tokenize, AssemblerState, Pass1, Warning, WarningKind};
pub use pass2::{Object, Pass2};
pub use record::{Intermediate, Operand, Record, Tag};
pub use symtab::{Definition, ResolvedSymbols, SymbolRef, SymbolTable};
pub use util::{listing, print_listing, print_tables};

pub use arch::{Class, Mnemonic, MnemonicTable, RegisterTable};
