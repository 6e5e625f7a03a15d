use crate::config::Options;
use crate::error::Result;
use crate::littab::ResolvedLiterals;
use crate::pass1::{Pass1, Warning};
use crate::pass2::{Object, Pass2};
use crate::record::Intermediate;
use crate::symtab::ResolvedSymbols;
use arch::{MnemonicTable, RegisterTable};

// ----------------------------------------------------------------------------
// Static tables

/// The read-only tables Pass-1 consults.
#[derive(Debug, Default, Clone)]
pub struct Tables {
    pub mot: MnemonicTable,
    pub registers: RegisterTable,
}

impl Tables {
    pub fn new(mot: MnemonicTable, registers: RegisterTable) -> Self {
        Tables { mot, registers }
    }
}

// ----------------------------------------------------------------------------
// Pass-1 result

/// Intermediate code plus frozen tables. The only input Pass-2 accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    records: Intermediate,
    symbols: ResolvedSymbols,
    literals: ResolvedLiterals,
    warnings: Vec<Warning>,
}

impl Assembly {
    pub(crate) fn new(
        records: Intermediate,
        symbols: ResolvedSymbols,
        literals: ResolvedLiterals,
        warnings: Vec<Warning>,
    ) -> Self {
        Assembly {
            records,
            symbols,
            literals,
            warnings,
        }
    }

    /// Reassemble a Pass-1 result from its dumps.
    pub fn from_parts(
        records: Intermediate,
        symbols: ResolvedSymbols,
        literals: ResolvedLiterals,
    ) -> Self {
        Self::new(records, symbols, literals, vec![])
    }

    pub fn records(&self) -> &Intermediate {
        &self.records
    }

    pub fn symbols(&self) -> &ResolvedSymbols {
        &self.symbols
    }

    pub fn literals(&self) -> &ResolvedLiterals {
        &self.literals
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn pass2(&self) -> Result<Vec<Object>> {
        Pass2::new(&self.symbols, &self.literals).run(&self.records)
    }
}

// ----------------------------------------------------------------------------
// Pipeline

#[derive(Debug, Default, Clone)]
pub struct Assembler {
    tables: Tables,
    options: Options,
}

impl Assembler {
    pub fn new(tables: Tables, options: Options) -> Self {
        Assembler { tables, options }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn pass1(&self, src: &str) -> Result<Assembly> {
        Pass1::new(&self.tables, self.options).run(src)
    }

    /// Both passes. Nothing is returned unless both succeed.
    pub fn assemble(&self, src: &str) -> Result<(Assembly, Vec<Object>)> {
        let assembly = self.pass1(src)?;
        let objects = assembly.pass2()?;
        Ok((assembly, objects))
    }
}
