use crate::cursor::LocationCursor;
use crate::error::{Error, Result};
use crate::symtab::parse_dump_line;
use std::fmt;

/// 1-based position of a literal, fixed when the literal is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LiteralRef(usize);

impl LiteralRef {
    pub fn new(ordinal: usize) -> Option<Self> {
        (ordinal > 0).then_some(LiteralRef(ordinal))
    }

    pub fn ordinal(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Literal {
    text: String,
    address: Option<u16>,
    line: usize,
}

// ----------------------------------------------------------------------------
// Building table (Pass-1)

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LiteralTable {
    literals: Vec<Literal>,
    /// Share one entry between identical unpooled literals
    merge: bool,
}

impl LiteralTable {
    /// One entry per occurrence.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merging() -> Self {
        LiteralTable {
            literals: vec![],
            merge: true,
        }
    }

    pub fn add(&mut self, text: &str, line: usize) -> LiteralRef {
        if self.merge {
            if let Some(idx) = self
                .literals
                .iter()
                .position(|lit| lit.address.is_none() && lit.text == text)
            {
                return LiteralRef(idx + 1);
            }
        }
        self.literals.push(Literal {
            text: text.to_string(),
            address: None,
            line,
        });
        LiteralRef(self.literals.len())
    }

    /// Give every unpooled literal the next address, in table order.
    pub fn assign_pool(&mut self, cursor: &mut LocationCursor, line: usize) -> Result<()> {
        for lit in self.literals.iter_mut().filter(|lit| lit.address.is_none()) {
            lit.address = Some(cursor.take(line)?);
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (LiteralRef, &str, Option<u16>)> {
        self.literals
            .iter()
            .enumerate()
            .map(|(idx, lit)| (LiteralRef(idx + 1), lit.text.as_str(), lit.address))
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn freeze(self) -> Result<ResolvedLiterals> {
        self.literals
            .into_iter()
            .map(|lit| match lit.address {
                Some(addr) => Ok((lit.text, addr)),
                None => Err(Error::CorruptIntermediateStream(format!(
                    "literal {} from line {} was never pooled",
                    lit.text, lit.line
                ))),
            })
            .collect::<Result<Vec<_>>>()
            .map(ResolvedLiterals)
    }
}

// ----------------------------------------------------------------------------
// Frozen table (Pass-2)

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolvedLiterals(Vec<(String, u16)>);

impl ResolvedLiterals {
    pub fn from_entries<S: Into<String>>(entries: impl IntoIterator<Item = (S, u16)>) -> Self {
        ResolvedLiterals(
            entries
                .into_iter()
                .map(|(text, addr)| (text.into(), addr))
                .collect(),
        )
    }

    /// Read a `literal<TAB>address` dump.
    pub fn parse_dump(src: &str) -> Result<Self> {
        src.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(parse_dump_line)
            .collect::<Result<Vec<_>>>()
            .map(ResolvedLiterals)
    }

    pub fn address(&self, lit: LiteralRef) -> Option<u16> {
        self.0.get(lit.0 - 1).map(|(_, addr)| *addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.0.iter().map(|(text, addr)| (text.as_str(), *addr))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ResolvedLiterals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (text, addr) in self.iter() {
            writeln!(f, "{}\t{}", text, addr)?;
        }
        Ok(())
    }
}
