use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// 1-based position of a symbol, fixed when the name is first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolRef(usize);

impl SymbolRef {
    pub fn new(ordinal: usize) -> Option<Self> {
        (ordinal > 0).then_some(SymbolRef(ordinal))
    }

    pub fn ordinal(self) -> usize {
        self.0
    }

    fn from_index(idx: usize) -> Self {
        SymbolRef(idx + 1)
    }

    fn index(self) -> usize {
        self.0 - 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    address: Option<u16>,
    /// Line where the name was first seen
    line: usize,
}

/// Outcome of a plain label definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definition {
    /// Name was new
    Inserted(SymbolRef),
    /// Name had only been referenced so far
    Resolved(SymbolRef),
    /// Name already had an address, which was kept
    AlreadyDefined(SymbolRef, u16),
}

// ----------------------------------------------------------------------------
// Building table (Pass-1)

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: IndexMap<String, Entry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operand use. Inserts the name unresolved when absent.
    pub fn reference(&mut self, name: &str, line: usize) -> SymbolRef {
        if let Some(idx) = self.symbols.get_index_of(name) {
            return SymbolRef::from_index(idx);
        }
        let (idx, _) = self.symbols.insert_full(
            name.to_string(),
            Entry {
                address: None,
                line,
            },
        );
        SymbolRef::from_index(idx)
    }

    /// Plain label: the first definition wins.
    pub fn define(&mut self, name: &str, address: u16, line: usize) -> Definition {
        match self.symbols.get_full_mut(name) {
            Some((idx, _, entry)) => match entry.address {
                Some(prev) => Definition::AlreadyDefined(SymbolRef::from_index(idx), prev),
                None => {
                    entry.address = Some(address);
                    Definition::Resolved(SymbolRef::from_index(idx))
                }
            },
            None => {
                let (idx, _) = self.symbols.insert_full(
                    name.to_string(),
                    Entry {
                        address: Some(address),
                        line,
                    },
                );
                Definition::Inserted(SymbolRef::from_index(idx))
            }
        }
    }

    /// Declarative label: always rebinds. The ordinal of an existing name is
    /// kept. Returns the address that was overwritten, if any.
    pub fn bind(&mut self, name: &str, address: u16, line: usize) -> Option<u16> {
        match self.symbols.get_mut(name) {
            Some(entry) => entry.address.replace(address),
            None => {
                self.symbols.insert(
                    name.to_string(),
                    Entry {
                        address: Some(address),
                        line,
                    },
                );
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<(SymbolRef, Option<u16>)> {
        self.symbols
            .get_full(name)
            .map(|(idx, _, entry)| (SymbolRef::from_index(idx), entry.address))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolRef, &str, Option<u16>)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(idx, (name, entry))| (SymbolRef::from_index(idx), name.as_str(), entry.address))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Every symbol must have an address by now.
    pub fn freeze(self) -> Result<ResolvedSymbols> {
        let mut symbols = IndexMap::with_capacity(self.symbols.len());
        for (name, entry) in self.symbols {
            match entry.address {
                Some(addr) => {
                    symbols.insert(name, addr);
                }
                None => {
                    return Err(Error::UndefinedSymbol {
                        line: entry.line,
                        name,
                    })
                }
            }
        }
        Ok(ResolvedSymbols(symbols))
    }
}

// ----------------------------------------------------------------------------
// Frozen table (Pass-2)

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolvedSymbols(IndexMap<String, u16>);

impl ResolvedSymbols {
    pub fn from_entries<S: Into<String>>(entries: impl IntoIterator<Item = (S, u16)>) -> Self {
        let mut symbols = IndexMap::new();
        for (name, addr) in entries {
            symbols.entry(name.into()).or_insert(addr);
        }
        ResolvedSymbols(symbols)
    }

    /// Read a `name<TAB>address` dump. Row order gives the ordinals, so a
    /// repeated name is rejected.
    pub fn parse_dump(src: &str) -> Result<Self> {
        let mut symbols = IndexMap::new();
        for raw in src.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (name, addr) = parse_dump_line(line)?;
            if symbols.contains_key(&name) {
                return Err(Error::CorruptIntermediateStream(format!(
                    "symbol `{}` listed twice",
                    name
                )));
            }
            symbols.insert(name, addr);
        }
        Ok(ResolvedSymbols(symbols))
    }

    pub fn address(&self, sym: SymbolRef) -> Option<u16> {
        self.0.get_index(sym.index()).map(|(_, addr)| *addr)
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.0.iter().map(|(name, addr)| (name.as_str(), *addr))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ResolvedSymbols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, addr) in self.iter() {
            writeln!(f, "{}\t{}", name, addr)?;
        }
        Ok(())
    }
}

/// Split `name<whitespace>address` at the last run of whitespace.
pub(crate) fn parse_dump_line(line: &str) -> Result<(String, u16)> {
    let corrupt = || Error::CorruptIntermediateStream(format!("bad table entry `{}`", line));
    let (name, addr) = line
        .rsplit_once(|c: char| c.is_whitespace())
        .ok_or_else(corrupt)?;
    let name = name.trim_end();
    let addr = addr.parse::<u16>().map_err(|_| corrupt())?;
    if name.is_empty() {
        return Err(corrupt());
    }
    Ok((name.to_string(), addr))
}
