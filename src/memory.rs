/*!
  Flat, fixed-size word memory. Every access is bounds checked; an address outside of
  `[0, len)` produces `MachineError::OutOfBounds`. Memory never grows or wraps.
*/

use std::fmt::{Display, Formatter};

use crate::address::Address;
use crate::bytecode::Word;
use crate::error::MachineError;

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Memory {
  cells: Vec<Word>
}

impl Memory {

  pub fn new(cells: Vec<Word>) -> Memory {
    Memory { cells }
  }

  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  pub fn as_slice(&self) -> &[Word] {
    &self.cells
  }

  pub fn contains(&self, address: Address) -> bool {
    address.idx() < self.cells.len()
  }

  /// Reads the cell at `address`.
  pub fn read(&self, address: Address) -> Result<Word, MachineError> {
    self.cells
        .get(address.idx())
        .copied()
        .ok_or_else(|| MachineError::out_of_bounds(address))
  }

  /// Overwrites the cell at `address`. Nothing else is touched.
  pub fn write(&mut self, address: Address, value: Word) -> Result<(), MachineError> {
    match self.cells.get_mut(address.idx()) {
      Some(cell) => {
        *cell = value;
        Ok(())
      }
      None => Err(MachineError::out_of_bounds(address))
    }
  }

  /**
    Interprets a stored word as an address into this memory. Fails with `OutOfBounds` carrying
    the word itself when it is negative or at least `len()`.
  */
  pub fn resolve(&self, word: Word) -> Result<Address, MachineError> {
    match Address::from_word(word) {
      Some(address) if self.contains(address) => Ok(address),
      _ => Err(MachineError::OutOfBounds { address: word })
    }
  }

  /// Performs one step of indirection: reads the cell at `address` and resolves its contents
  /// as an address.
  pub fn pointer_at(&self, address: Address) -> Result<Address, MachineError> {
    let word = self.read(address)?;
    self.resolve(word)
  }
}

impl From<Vec<Word>> for Memory {
  fn from(cells: Vec<Word>) -> Memory {
    Memory::new(cells)
  }
}

impl From<&[Word]> for Memory {
  fn from(cells: &[Word]) -> Memory {
    Memory::new(cells.to_vec())
  }
}

impl Display for Memory {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}",
      self.cells
          .iter()
          .map(Word::to_string)
          .collect::<Vec<String>>()
          .join(",")
    )
  }
}
