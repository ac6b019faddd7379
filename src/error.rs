//! Error types for running and loading programs.

use thiserror::Error;

use crate::address::Address;
use crate::bytecode::Word;

/// Conditions that stop a single machine run. Both are terminal: the run yields no result.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Error)]
pub enum MachineError {
  /// The word fetched as an opcode is not one of `Add`, `Multiply`, or `Halt`.
  #[error("invalid opcode {value} at {position}")]
  InvalidOpcode {
    value    : Word,
    position : Address
  },

  /// A dereference fell outside of memory. The address is a word because the offending value
  /// may have been read out of memory, where it can be negative.
  #[error("address {address} is out of bounds")]
  OutOfBounds {
    address : Word
  },
}

impl MachineError {
  pub fn out_of_bounds(address: Address) -> MachineError {
    MachineError::OutOfBounds { address: address.as_word() }
  }
}

/// Errors produced while turning program or assembly text into words.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("the program is empty")]
  Empty,

  #[error("syntax error at byte offset {offset}")]
  Syntax {
    offset : usize
  },

  #[error("error on line {line}: malformed instruction")]
  MalformedLine {
    line : usize
  },

  #[error("error on line {line}: {name} is not an operation")]
  UnknownOperation {
    line : usize,
    name : String
  },

  #[error("error on line {line}: {operation} requires {expected} arguments but was given {given}")]
  WrongArity {
    line      : usize,
    operation : String,
    expected  : usize,
    given     : usize
  },

  #[error("failed to read program: {0}")]
  Io(#[from] std::io::Error),
}
