//! A newtype holding an index into machine memory, with some convenience functions.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::ops::Add;

use crate::bytecode::Word;

// `AddressNumberType` is `usize`, as it is naturally an index into a memory store.
pub type AddressNumberType = usize;

/// A "pointer" to a memory cell. An `Address` is not necessarily in bounds for a given
/// `Memory`; bounds are checked when the address is dereferenced.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default)]
pub struct Address(pub AddressNumberType);

impl Address {
  /// Converts the address to an index into the memory vector.
  pub fn idx(&self) -> AddressNumberType {
    self.0
  }

  /// Interprets a stored word as an address. Negative words (and words too large for the
  /// platform's `usize`) are not addresses.
  pub fn from_word(word: Word) -> Option<Address> {
    AddressNumberType::try_from(word).ok().map(Address)
  }

  /// The address as a word, for error reporting and for writing addresses back into memory.
  pub fn as_word(&self) -> Word {
    self.0 as Word
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "MEM[{}]", self.0)
  }
}

impl From<AddressNumberType> for Address {
  fn from(idx: AddressNumberType) -> Address {
    Address(idx)
  }
}

// Increment an address
impl Add<AddressNumberType> for Address {
  type Output = Address;
  fn add(self, rhs: AddressNumberType) -> Address {
    Address(self.0 + rhs)
  }
}
