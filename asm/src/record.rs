use crate::error::{Error, Result};
use crate::littab::LiteralRef;
use crate::symtab::SymbolRef;
use arch::Class;
use std::fmt;
use std::str::FromStr;

// ----------------------------------------------------------------------------
// Operand

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Register code, already looked up by Pass-1
    Register(u8),
    Symbol(SymbolRef),
    Literal(LiteralRef),
    Constant(i64),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(code) => write!(f, "{}", code),
            Operand::Symbol(sym) => write!(f, "(S,{})", sym.ordinal()),
            Operand::Literal(lit) => write!(f, "(L,{})", lit.ordinal()),
            Operand::Constant(val) => write!(f, "(C,{})", val),
        }
    }
}

// ----------------------------------------------------------------------------
// Tag

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Stmt(Class, u8),
    /// Tag text that names no statement class
    Unrecognized(String),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Stmt(class, opcode) => write!(f, "({},{:02})", class, opcode),
            Tag::Unrecognized(text) => write!(f, "({})", text),
        }
    }
}

// ----------------------------------------------------------------------------
// Record

/// One unit of intermediate code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Set for imperative and declarative statements
    pub location: Option<u16>,
    pub tag: Tag,
    pub operands: Vec<Operand>,
}

impl Record {
    pub fn new(location: Option<u16>, class: Class, opcode: u8, operands: Vec<Operand>) -> Self {
        Record {
            location,
            tag: Tag::Stmt(class, opcode),
            operands,
        }
    }

    pub fn class(&self) -> Option<Class> {
        match self.tag {
            Tag::Stmt(class, _) => Some(class),
            Tag::Unrecognized(_) => None,
        }
    }

    pub fn opcode(&self) -> Option<u8> {
        match self.tag {
            Tag::Stmt(_, opcode) => Some(opcode),
            Tag::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(lc) = self.location {
            write!(f, "{} ", lc)?;
        }
        write!(f, "{}", self.tag)?;
        for operand in &self.operands {
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}

impl FromStr for Record {
    type Err = Error;

    /// Accepts `200 (IS,04) 1 (L,1)` as well as `(IS,04)(1)(S,1)`.
    fn from_str(line: &str) -> Result<Self> {
        let corrupt = |why: &str| {
            Error::CorruptIntermediateStream(format!("{} in `{}`", why, line.trim()))
        };

        let mut words = split_groups(line).ok_or_else(|| corrupt("unbalanced parenthesis"))?;
        words.reverse();

        let location = match words.last() {
            Some(Word::Bare(text)) => {
                let lc = text
                    .parse::<u16>()
                    .map_err(|_| corrupt("bad location"))?;
                words.pop();
                Some(lc)
            }
            _ => None,
        };

        let tag = match words.pop() {
            Some(Word::Group(text)) => text,
            _ => return Err(corrupt("missing tag")),
        };
        let class = tag
            .split_once(',')
            .and_then(|(class, opcode)| Some((Class::parse(class.trim())?, opcode.trim())));
        let (class, opcode) = match class {
            Some(class) => class,
            None => {
                return Ok(Record {
                    location,
                    tag: Tag::Unrecognized(tag.to_string()),
                    operands: vec![],
                })
            }
        };
        let opcode = opcode.parse::<u8>().map_err(|_| corrupt("bad opcode"))?;

        let mut operands = vec![];
        while let Some(word) = words.pop() {
            let operand = match word {
                Word::Bare(text) => text.parse::<u8>().ok().map(Operand::Register),
                Word::Group(text) => parse_operand(text),
            };
            operands.push(operand.ok_or_else(|| corrupt("bad operand"))?);
        }

        Ok(Record::new(location, class, opcode, operands))
    }
}

fn parse_operand(text: &str) -> Option<Operand> {
    match text.split_once(',') {
        Some((kind, value)) => {
            let value = value.trim();
            match kind.trim() {
                "S" => SymbolRef::new(value.parse().ok()?).map(Operand::Symbol),
                "L" => LiteralRef::new(value.parse().ok()?).map(Operand::Literal),
                "C" => value.parse().ok().map(Operand::Constant),
                _ => None,
            }
        }
        None => text.trim().parse::<u8>().ok().map(Operand::Register),
    }
}

enum Word<'a> {
    Bare(&'a str),
    Group(&'a str),
}

/// Split into bare words and parenthesized groups (without the parentheses).
fn split_groups(line: &str) -> Option<Vec<Word<'_>>> {
    let mut words = vec![];
    let mut rest = line.trim_start();
    while !rest.is_empty() {
        if let Some(inner) = rest.strip_prefix('(') {
            let close = inner.find(')')?;
            words.push(Word::Group(&inner[..close]));
            rest = &inner[close + 1..];
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '(')
                .unwrap_or(rest.len());
            if rest[..end].contains(')') {
                return None;
            }
            words.push(Word::Bare(&rest[..end]));
            rest = &rest[end..];
        }
        rest = rest.trim_start();
    }
    Some(words)
}

// ----------------------------------------------------------------------------
// Stream

/// Pass-1 output, Pass-2 input. Append-only while Pass-1 runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Intermediate(Vec<Record>);

impl Intermediate {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.0.push(record)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.0
    }
}

impl From<Vec<Record>> for Intermediate {
    fn from(records: Vec<Record>) -> Self {
        Intermediate(records)
    }
}

impl<'a> IntoIterator for &'a Intermediate {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Intermediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.0 {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

impl FromStr for Intermediate {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self> {
        src.lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::parse::<Record>)
            .collect::<Result<Vec<_>>>()
            .map(Intermediate)
    }
}
