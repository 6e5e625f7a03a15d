use crate::assembler::Tables;
use crate::error::{Error, Result};
use arch::{Mnemonic, MnemonicTable, RegisterTable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

/// Pass-1 behaviour switches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Label redefinition is an error instead of a warning
    pub strict_labels: bool,
    /// Identical literals share one table entry
    pub merge_literals: bool,
}

/// ```yaml
/// strict_labels: true
/// merge_literals: false
/// registers: { AREG: 1, BREG: 2, CREG: 3, DREG: 4, EREG: 5 }
/// mot:
///   - { name: START, class: AD, opcode: 1, length: 0 }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    #[serde(flatten)]
    pub options: Options,
    /// Replaces the built-in register table, inserted in file order
    pub registers: Option<IndexMap<String, u8>>,
    /// Replaces the built-in mnemonic table
    pub mot: Option<Vec<Mnemonic>>,
}

impl AsmConfig {
    pub fn parse(src: &str) -> Result<Self> {
        serde_yaml::from_str(src).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &str) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn tables(&self) -> Result<Tables> {
        let mot = match &self.mot {
            Some(entries) => MnemonicTable::from_entries(entries.iter().cloned()),
            None => MnemonicTable::default(),
        };
        let registers = match &self.registers {
            Some(map) => {
                let mut regs = RegisterTable::new();
                for (name, code) in map {
                    regs.insert(name, *code)?;
                }
                regs
            }
            None => RegisterTable::default(),
        };
        Ok(Tables::new(mot, registers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch::{Class, TableError};

    #[test]
    fn empty_config_is_default() {
        let cfg = AsmConfig::parse("{}").unwrap();
        assert_eq!(cfg, AsmConfig::default());
        let tables = cfg.tables().unwrap();
        assert_eq!(tables.mot.len(), 10);
        assert_eq!(tables.registers.len(), 4);
    }

    #[test]
    fn full_config() {
        let cfg = AsmConfig::parse(
            "strict_labels: true\n\
             registers: { AREG: 1, XREG: 9 }\n\
             mot:\n\
             \x20 - { name: START, class: AD, opcode: 1, length: 0 }\n\
             \x20 - { name: JMP, class: IS, opcode: 7, length: 2 }\n",
        )
        .unwrap();
        assert!(cfg.options.strict_labels);
        assert!(!cfg.options.merge_literals);

        let tables = cfg.tables().unwrap();
        assert_eq!(tables.registers.get("XREG"), Some(9));
        assert_eq!(tables.registers.get("BREG"), None);
        assert_eq!(
            tables.mot.get("JMP"),
            Some(&Mnemonic::new("JMP", Class::Imperative, 7, 2))
        );
        assert!(!tables.mot.contains("ADD"));
    }

    #[test]
    fn rejects_bad_class() {
        let err = AsmConfig::parse("mot: [{ name: X, class: QQ, opcode: 1, length: 1 }]");
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn rejects_register_clash() {
        let cfg = AsmConfig::parse("registers: { AREG: 1, BREG: 1 }").unwrap();
        assert!(matches!(cfg.tables(), Err(Error::Table(_))));
    }

    #[test]
    fn register_clash_names_later_entry() {
        let cfg = AsmConfig::parse("registers: { ZREG: 7, AREG: 1, YREG: 7, XREG: 1 }").unwrap();
        for _ in 0..8 {
            assert!(matches!(
                cfg.tables(),
                Err(Error::Table(TableError::DuplicateRegister(name))) if name == "YREG"
            ));
        }
    }
}
