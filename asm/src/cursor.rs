use crate::error::{Error, Result};

/// Location counter of a single Pass-1 run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LocationCursor(u16);

impl LocationCursor {
    pub fn new() -> Self {
        LocationCursor(0)
    }

    pub fn get(&self) -> u16 {
        self.0
    }

    /// Program origin. The only way to move the cursor backwards.
    pub fn reset(&mut self, origin: u16) {
        self.0 = origin;
    }

    pub fn advance(&mut self, words: u16, line: usize) -> Result<()> {
        self.0 = self
            .0
            .checked_add(words)
            .ok_or(Error::AddressOverflow { line })?;
        Ok(())
    }

    /// Hand out the current address and step past it.
    pub fn take(&mut self, line: usize) -> Result<u16> {
        let addr = self.0;
        self.advance(1, line)?;
        Ok(addr)
    }
}
