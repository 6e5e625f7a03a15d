use crate::{class::Class, error::TableError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Mnemonic

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mnemonic {
    pub name: String,
    pub class: Class,
    pub opcode: u8,
    /// Words occupied by one statement
    pub length: u16,
}

impl Mnemonic {
    pub fn new(name: &str, class: Class, opcode: u8, length: u16) -> Self {
        Mnemonic {
            name: name.to_string(),
            class,
            opcode,
            length,
        }
    }

    /// Parse one `NAME CLASS OPCODE LENGTH` record.
    fn parse(line: usize, text: &str) -> Result<Self, TableError> {
        let malformed = || TableError::MalformedTableEntry {
            line,
            text: text.to_string(),
        };

        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(malformed());
        }

        let class = Class::parse(fields[1]).ok_or(TableError::UnknownClass {
            line,
            tag: fields[1].to_string(),
        })?;
        let opcode = fields[2].parse::<u8>().map_err(|_| malformed())?;
        let length = fields[3].parse::<u16>().map_err(|_| malformed())?;

        Ok(Mnemonic::new(fields[0], class, opcode, length))
    }
}

// ----------------------------------------------------------------------------
// Mnemonic Table

const DEFAULT_MOT: [(&str, Class, u8, u16); 10] = [
    ("START", Class::Directive, 1, 0),
    ("END", Class::Directive, 2, 0),
    ("LTORG", Class::Directive, 3, 0),
    ("DS", Class::Declarative, 1, 1),
    ("DC", Class::Declarative, 2, 1),
    ("ADD", Class::Imperative, 1, 1),
    ("SUB", Class::Imperative, 2, 1),
    ("MULT", Class::Imperative, 3, 1),
    ("MOVER", Class::Imperative, 4, 1),
    ("MOVEM", Class::Imperative, 5, 1),
];

/// Read-only map from mnemonic name to its definition, in definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnemonicTable(IndexMap<String, Mnemonic>);

impl MnemonicTable {
    /// Load the table from definition text. Blank lines and lines starting
    /// with `;` or `#` are skipped. A later record replaces an earlier one
    /// with the same name.
    pub fn parse(src: &str) -> Result<Self, TableError> {
        let mut table = IndexMap::new();
        for (idx, raw) in src.lines().enumerate() {
            let text = raw.trim();
            if text.is_empty() || text.starts_with(';') || text.starts_with('#') {
                continue;
            }
            let entry = Mnemonic::parse(idx + 1, text)?;
            table.insert(entry.name.clone(), entry);
        }
        Ok(MnemonicTable(table))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = Mnemonic>) -> Self {
        MnemonicTable(
            entries
                .into_iter()
                .map(|entry| (entry.name.clone(), entry))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&Mnemonic> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mnemonic> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MnemonicTable {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_MOT
                .iter()
                .map(|&(name, class, opcode, length)| Mnemonic::new(name, class, opcode, length)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_records() {
        let mot = MnemonicTable::parse(
            "START AD 01 0\n\n; comment\nMOVER IS 04 1\nDS DL 01 1\n",
        )
        .unwrap();
        assert_eq!(mot.len(), 3);
        assert_eq!(
            mot.get("MOVER"),
            Some(&Mnemonic::new("MOVER", Class::Imperative, 4, 1))
        );
        assert_eq!(mot.get("START").unwrap().class, Class::Directive);
        assert!(!mot.contains("ADD"));
    }

    #[test]
    fn short_record() {
        assert_eq!(
            MnemonicTable::parse("START AD 01 0\nEND AD 02"),
            Err(TableError::MalformedTableEntry {
                line: 2,
                text: "END AD 02".to_string()
            })
        );
    }

    #[test]
    fn bad_numbers() {
        assert!(matches!(
            MnemonicTable::parse("ADD IS one 1"),
            Err(TableError::MalformedTableEntry { line: 1, .. })
        ));
        assert!(matches!(
            MnemonicTable::parse("ADD IS 01 -1"),
            Err(TableError::MalformedTableEntry { line: 1, .. })
        ));
    }

    #[test]
    fn unknown_class() {
        assert_eq!(
            MnemonicTable::parse("ADD XX 01 1"),
            Err(TableError::UnknownClass {
                line: 1,
                tag: "XX".to_string()
            })
        );
    }

    #[test]
    fn redefinition_replaces() {
        let mot = MnemonicTable::parse("ADD IS 01 1\nADD IS 07 2").unwrap();
        assert_eq!(mot.len(), 1);
        assert_eq!(mot.get("ADD").unwrap().opcode, 7);
        assert_eq!(mot.get("ADD").unwrap().length, 2);
    }

    #[test]
    fn default_table() {
        let mot = MnemonicTable::default();
        assert_eq!(mot.len(), 10);
        assert_eq!(mot.get("LTORG").unwrap().opcode, 3);
        assert_eq!(mot.get("DC").unwrap().class, Class::Declarative);
        let names: Vec<&str> = mot.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names[0], "START");
        assert_eq!(names[9], "MOVEM");
    }
}
