use crate::error::{Error, Result};
use crate::littab::ResolvedLiterals;
use crate::record::{Intermediate, Operand, Record};
use crate::symtab::ResolvedSymbols;
use arch::Class;
use std::fmt;

/// Pass-2 output for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Object {
    Code { opcode: u8, register: u8, address: u16 },
    Placeholder,
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Code {
                opcode,
                register,
                address,
            } => write!(f, "{:02} {} {}", opcode, register, address),
            Object::Placeholder => write!(f, "----"),
        }
    }
}

/// Resolves intermediate records against frozen tables.
pub struct Pass2<'a> {
    symbols: &'a ResolvedSymbols,
    literals: &'a ResolvedLiterals,
}

impl<'a> Pass2<'a> {
    pub fn new(symbols: &'a ResolvedSymbols, literals: &'a ResolvedLiterals) -> Self {
        Pass2 { symbols, literals }
    }

    pub fn run(&self, records: &Intermediate) -> Result<Vec<Object>> {
        records.iter().map(|record| self.resolve(record)).collect()
    }

    pub fn resolve(&self, record: &Record) -> Result<Object> {
        let opcode = match (record.class(), record.opcode()) {
            (Some(Class::Imperative), Some(opcode)) => opcode,
            _ => return Ok(Object::Placeholder),
        };

        let register = record
            .operands
            .iter()
            .find_map(|op| match op {
                Operand::Register(code) => Some(*code),
                _ => None,
            })
            .unwrap_or(0);

        // every address operand must resolve, only the first is encoded
        let mut address = None;
        for op in &record.operands {
            if let Some(found) = self.address(op, record)? {
                address.get_or_insert(found);
            }
        }
        let address = address.unwrap_or(0);

        Ok(Object::Code {
            opcode,
            register,
            address,
        })
    }

    /// `Ok(None)` for operands that carry no address.
    fn address(&self, op: &Operand, record: &Record) -> Result<Option<u16>> {
        let (found, kind, ordinal) = match op {
            Operand::Symbol(sym) => (self.symbols.address(*sym), "symbol", sym.ordinal()),
            Operand::Literal(lit) => (self.literals.address(*lit), "literal", lit.ordinal()),
            Operand::Register(_) | Operand::Constant(_) => return Ok(None),
        };
        found.map(Some).ok_or_else(|| {
            Error::CorruptIntermediateStream(format!(
                "{} #{} out of range in `{}`",
                kind, ordinal, record
            ))
        })
    }
}
