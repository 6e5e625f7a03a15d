use crate::pass1::Warning;
use color_print::cprintln;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warn,
    Note,
}

/// Console diagnostic, optionally pointing at a source line.
#[derive(Debug)]
pub struct Msg {
    level: Level,
    text: String,
}

impl Msg {
    pub fn error(text: impl Into<String>) -> Self {
        Msg {
            level: Level::Error,
            text: text.into(),
        }
    }

    pub fn warn(text: impl Into<String>) -> Self {
        Msg {
            level: Level::Warn,
            text: text.into(),
        }
    }

    pub fn note(text: impl Into<String>) -> Self {
        Msg {
            level: Level::Note,
            text: text.into(),
        }
    }

    pub fn headline(&self) {
        match self.level {
            Level::Error => cprintln!("<red,bold>error</>: {}", self.text),
            Level::Warn => cprintln!("<yellow,bold>warn</>: {}", self.text),
            Level::Note => cprintln!("<green,bold>note</>: {}", self.text),
        }
    }

    /// `line` is 1-based.
    pub fn diag(&self, file: &str, line: usize, lines: &[&str]) {
        let raw = line
            .checked_sub(1)
            .and_then(|idx| lines.get(idx))
            .copied()
            .unwrap_or("");
        self.headline();
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line, raw);
        cprintln!("      <blue>|</>");
    }
}

impl From<&Warning> for Msg {
    fn from(warning: &Warning) -> Self {
        Msg::warn(warning.to_string())
    }
}
