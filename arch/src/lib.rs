pub mod class;
pub mod error;
pub mod mot;
pub mod reg;

pub use class::Class;
pub use error::TableError;
pub use mot::{Mnemonic, MnemonicTable};
pub use reg::RegisterTable;
