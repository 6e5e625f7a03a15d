use crate::error::TableError;
use bimap::BiMap;
use once_cell::sync::Lazy;

static REG_MAP: Lazy<BiMap<&'static str, u8>> = Lazy::new(|| {
    let mut map: BiMap<&'static str, u8> = BiMap::new();
    map.insert("AREG", 1);
    map.insert("BREG", 2);
    map.insert("CREG", 3);
    map.insert("DREG", 4);
    map
});

/// Register name <-> numeric code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterTable(BiMap<String, u8>);

impl RegisterTable {
    pub fn new() -> Self {
        RegisterTable(BiMap::new())
    }

    /// Both the name and the code must be unused.
    pub fn insert(&mut self, name: &str, code: u8) -> Result<(), TableError> {
        self.0
            .insert_no_overwrite(name.to_string(), code)
            .map_err(|(name, _)| TableError::DuplicateRegister(name))
    }

    pub fn get(&self, name: &str) -> Option<u8> {
        self.0.get_by_left(name).copied()
    }

    pub fn name_of(&self, code: u8) -> Option<&str> {
        self.0.get_by_right(&code).map(|s| s.as_str())
    }

    /// Entries ordered by code.
    pub fn entries(&self) -> Vec<(&str, u8)> {
        let mut entries: Vec<(&str, u8)> = self.0.iter().map(|(n, c)| (n.as_str(), *c)).collect();
        entries.sort_by_key(|&(_, code)| code);
        entries
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RegisterTable {
    fn default() -> Self {
        RegisterTable(
            REG_MAP
                .iter()
                .map(|(name, code)| (name.to_string(), *code))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registers() {
        let regs = RegisterTable::default();
        assert_eq!(regs.get("AREG"), Some(1));
        assert_eq!(regs.get("DREG"), Some(4));
        assert_eq!(regs.get("areg"), None);
        assert_eq!(regs.name_of(2), Some("BREG"));
        assert_eq!(
            regs.entries(),
            vec![("AREG", 1), ("BREG", 2), ("CREG", 3), ("DREG", 4)]
        );
    }

    #[test]
    fn extend() {
        let mut regs = RegisterTable::default();
        regs.insert("EREG", 5).unwrap();
        assert_eq!(regs.get("EREG"), Some(5));
        assert_eq!(
            regs.insert("AREG", 9),
            Err(TableError::DuplicateRegister("AREG".to_string()))
        );
        assert_eq!(
            regs.insert("XREG", 1),
            Err(TableError::DuplicateRegister("XREG".to_string()))
        );
        assert_eq!(regs.len(), 5);
    }
}
