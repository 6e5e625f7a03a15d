use crate::assembler::{Assembly, Tables};
use crate::config::Options;
use crate::cursor::LocationCursor;
use crate::error::{Error, Result};
use crate::littab::LiteralTable;
use crate::record::{Intermediate, Operand, Record};
use crate::symtab::{Definition, SymbolTable};
use arch::{Class, Mnemonic};
use std::fmt;

const LITERAL_MARKER: char = '=';
const COMMENT_MARKER: char = ';';

// ----------------------------------------------------------------------------
// Warning

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub line: usize,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// Plain label seen again; the first address was kept
    LabelIgnored { name: String, kept: u16 },
    /// Declarative statement rebound a label that already had an address
    LabelOverwritten { name: String, previous: u16 },
    /// Line holds a single token that is not a mnemonic
    BareLabel { name: String },
    /// Statement after END
    AfterEnd,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::LabelIgnored { name, kept } => {
                write!(f, "Re-defined label: `{}` (keeping address {})", name, kept)
            }
            WarningKind::LabelOverwritten { name, previous } => {
                write!(f, "Re-defined label: `{}` (address {} overwritten)", name, previous)
            }
            WarningKind::BareLabel { name } => {
                write!(f, "`{}` is not a mnemonic; taken as a label", name)
            }
            WarningKind::AfterEnd => write!(f, "Statement after END is ignored"),
        }
    }
}

// ----------------------------------------------------------------------------
// Assembler State

/// Everything Pass-1 mutates. Owned by exactly one run.
#[derive(Debug, Default, Clone)]
pub struct AssemblerState {
    pub cursor: LocationCursor,
    pub symbols: SymbolTable,
    pub literals: LiteralTable,
    pub records: Intermediate,
    pub warnings: Vec<Warning>,
}

impl AssemblerState {
    pub fn new(options: &Options) -> Self {
        AssemblerState {
            literals: if options.merge_literals {
                LiteralTable::merging()
            } else {
                LiteralTable::new()
            },
            ..Default::default()
        }
    }
}

// ----------------------------------------------------------------------------
// Pass-1

pub struct Pass1<'t> {
    tables: &'t Tables,
    options: Options,
    state: AssemblerState,
    /// Line of the END directive once processed
    end: Option<usize>,
}

impl<'t> Pass1<'t> {
    pub fn new(tables: &'t Tables, options: Options) -> Self {
        Pass1 {
            tables,
            state: AssemblerState::new(&options),
            options,
            end: None,
        }
    }

    pub fn state(&self) -> &AssemblerState {
        &self.state
    }

    pub fn is_ended(&self) -> bool {
        self.end.is_some()
    }

    /// Process every line of `src`. Line numbers start at 1.
    pub fn run(mut self, src: &str) -> Result<Assembly> {
        for (idx, raw) in src.lines().enumerate() {
            self.statement(idx + 1, raw)?;
        }
        self.finish()
    }

    /// Freeze the tables. Requires a processed END directive.
    pub fn finish(self) -> Result<Assembly> {
        if self.end.is_none() {
            return Err(Error::MissingEnd);
        }
        let AssemblerState {
            symbols,
            literals,
            records,
            warnings,
            ..
        } = self.state;
        Ok(Assembly::new(
            records,
            symbols.freeze()?,
            literals.freeze()?,
            warnings,
        ))
    }

    pub fn statement(&mut self, line: usize, raw: &str) -> Result<()> {
        let tokens = tokenize(raw);
        if tokens.is_empty() {
            return Ok(());
        }
        if self.end.is_some() {
            self.warn(line, WarningKind::AfterEnd);
            return Ok(());
        }

        let tables = self.tables;
        let mot = &tables.mot;
        let (label, rest) = if mot.contains(tokens[0]) {
            (None, &tokens[..])
        } else {
            (Some(tokens[0]), &tokens[1..])
        };

        let Some((&op, operands)) = rest.split_first() else {
            if let Some(label) = label {
                self.warn(
                    line,
                    WarningKind::BareLabel {
                        name: label.to_string(),
                    },
                );
                self.define_label(label, line)?;
            }
            return Ok(());
        };
        let mnemonic = mot.get(op).ok_or_else(|| Error::UnknownMnemonic {
            line,
            name: op.to_string(),
        })?;

        match mnemonic.class {
            Class::Directive => {
                if let Some(label) = label {
                    self.define_label(label, line)?;
                }
                self.directive(line, mnemonic, operands)
            }
            Class::Imperative => {
                if let Some(label) = label {
                    self.define_label(label, line)?;
                }
                self.imperative(line, mnemonic, operands)
            }
            Class::Declarative => self.declarative(line, label, mnemonic, operands),
        }
    }

    fn directive(&mut self, line: usize, mnemonic: &Mnemonic, operands: &[&str]) -> Result<()> {
        match mnemonic.name.as_str() {
            "START" => {
                let origin = match operands.first() {
                    Some(text) => parse_address(text, line)?,
                    None => 0,
                };
                self.state.cursor.reset(origin);
                self.emit(Record::new(
                    None,
                    Class::Directive,
                    mnemonic.opcode,
                    vec![Operand::Constant(origin.into())],
                ));
            }
            "END" => {
                self.emit(Record::new(None, Class::Directive, mnemonic.opcode, vec![]));
                self.state.literals.assign_pool(&mut self.state.cursor, line)?;
                self.end = Some(line);
            }
            // LTORG and friends: recorded, no effect on the cursor or the pool
            _ => self.emit(Record::new(None, Class::Directive, mnemonic.opcode, vec![])),
        }
        Ok(())
    }

    fn imperative(&mut self, line: usize, mnemonic: &Mnemonic, operands: &[&str]) -> Result<()> {
        let operands = operands
            .iter()
            .map(|&tok| self.operand(tok, line))
            .collect();
        let location = self.state.cursor.get();
        self.emit(Record::new(
            Some(location),
            Class::Imperative,
            mnemonic.opcode,
            operands,
        ));
        self.state.cursor.advance(mnemonic.length, line)
    }

    fn declarative(
        &mut self,
        line: usize,
        label: Option<&str>,
        mnemonic: &Mnemonic,
        operands: &[&str],
    ) -> Result<()> {
        let text = operands.first().ok_or_else(|| Error::MissingOperand {
            line,
            mnemonic: mnemonic.name.clone(),
        })?;
        let location = self.state.cursor.get();

        let (value, words) = if mnemonic.name == "DS" {
            let words = parse_address(text, line)?;
            (i64::from(words), words)
        } else {
            (parse_constant(text, line)?, mnemonic.length)
        };

        if let Some(label) = label {
            if let Some(previous) = self.state.symbols.bind(label, location, line) {
                if self.options.strict_labels {
                    return Err(Error::DuplicateDefinition {
                        line,
                        name: label.to_string(),
                    });
                }
                self.warn(
                    line,
                    WarningKind::LabelOverwritten {
                        name: label.to_string(),
                        previous,
                    },
                );
            }
        }

        self.emit(Record::new(
            Some(location),
            Class::Declarative,
            mnemonic.opcode,
            vec![Operand::Constant(value)],
        ));
        self.state.cursor.advance(words, line)
    }

    fn operand(&mut self, tok: &str, line: usize) -> Operand {
        if let Some(code) = self.tables.registers.get(tok) {
            Operand::Register(code)
        } else if tok.starts_with(LITERAL_MARKER) {
            Operand::Literal(self.state.literals.add(tok, line))
        } else {
            Operand::Symbol(self.state.symbols.reference(tok, line))
        }
    }

    fn define_label(&mut self, label: &str, line: usize) -> Result<()> {
        let lc = self.state.cursor.get();
        if let Definition::AlreadyDefined(_, kept) = self.state.symbols.define(label, lc, line) {
            if self.options.strict_labels {
                return Err(Error::DuplicateDefinition {
                    line,
                    name: label.to_string(),
                });
            }
            self.warn(
                line,
                WarningKind::LabelIgnored {
                    name: label.to_string(),
                    kept,
                },
            );
        }
        Ok(())
    }

    fn emit(&mut self, record: Record) {
        self.state.records.push(record);
    }

    fn warn(&mut self, line: usize, kind: WarningKind) {
        self.state.warnings.push(Warning { line, kind });
    }
}

// ----------------------------------------------------------------------------
// Tokens and numbers

/// Split a statement on whitespace and commas, dropping a `;` comment.
pub fn tokenize(raw: &str) -> Vec<&str> {
    let code = match raw.split_once(COMMENT_MARKER) {
        Some((code, _)) => code,
        None => raw,
    };
    code.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .collect()
}

fn parse_with_prefix(s: &str) -> Option<i64> {
    let (neg, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0b") => (2, &s[2..]),
        Some("0o") => (8, &s[2..]),
        Some("0x") => (16, &s[2..]),
        _ => (10, s),
    };
    if digits.starts_with(['+', '-']) {
        return None;
    }
    let value = i64::from_str_radix(digits, radix).ok()?;
    Some(if neg { -value } else { value })
}

fn parse_address(text: &str, line: usize) -> Result<u16> {
    parse_with_prefix(text)
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| Error::NumericParse {
            line,
            text: text.to_string(),
        })
}

/// `5` or `'5'`.
fn parse_constant(text: &str, line: usize) -> Result<i64> {
    let inner = text
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(text);
    parse_with_prefix(inner).ok_or_else(|| Error::NumericParse {
        line,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        assert_eq!(tokenize("MOVER AREG,='5'"), vec!["MOVER", "AREG", "='5'"]);
        assert_eq!(tokenize("  ADD BREG, ONE "), vec!["ADD", "BREG", "ONE"]);
        assert_eq!(tokenize("LOOP ADD AREG ; count"), vec!["LOOP", "ADD", "AREG"]);
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("; only a comment").is_empty());
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_with_prefix("200"), Some(200));
        assert_eq!(parse_with_prefix("0x10"), Some(16));
        assert_eq!(parse_with_prefix("0b101"), Some(5));
        assert_eq!(parse_with_prefix("-3"), Some(-3));
        assert_eq!(parse_with_prefix("TEN"), None);
        assert_eq!(parse_with_prefix(""), None);
        assert_eq!(parse_constant("'5'", 1).unwrap(), 5);
        assert!(parse_address("-1", 1).is_err());
        assert!(parse_address("70000", 1).is_err());
    }
}
