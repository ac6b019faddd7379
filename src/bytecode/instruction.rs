use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::bytecode::Word;

/**
  Opcodes of the machine. The discriminants are the opcode values as they appear in memory, so
  the order the opcodes are listed in is not significant.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[repr(u8)]
pub enum Operation {
  Add      =  1,  // MEM[MEM[pc+3]] = MEM[MEM[pc+1]] + MEM[MEM[pc+2]], pc += 4
  Multiply =  2,  // MEM[MEM[pc+3]] = MEM[MEM[pc+1]] * MEM[MEM[pc+2]], pc += 4
  Halt     = 99,  // stop; pc is not advanced
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  /// Decodes a word fetched from memory. Any value other than 1, 2, or 99 is not an opcode.
  pub fn from_word(word: Word) -> Option<Operation> {
    let byte = u8::try_from(word).ok()?;
    Operation::try_from(byte).ok()
  }

  /// The number of parameter words following the opcode.
  pub fn arity(&self) -> usize {
    match self {
      Operation::Add | Operation::Multiply => 3,
      Operation::Halt                      => 0
    }
  }

  /// The number of words the instruction occupies, opcode included.
  pub fn width(&self) -> usize {
    self.arity() + 1
  }
}

/**
  A decoded instruction. The parameters are kept as the raw words stored after the opcode;
  they are addresses, and they are only checked against the bounds of memory when the
  instruction executes.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  Add {
    lhs         : Word,
    rhs         : Word,
    destination : Word
  },
  Multiply {
    lhs         : Word,
    rhs         : Word,
    destination : Word
  },
  Halt,
}

impl Instruction {

  /// Builds an instruction from an operation and its parameter words. Returns `None` when the
  /// number of parameters does not match the operation's arity.
  pub fn from_parts(operation: Operation, parameters: &[Word]) -> Option<Instruction> {
    if parameters.len() != operation.arity() {
      return None;
    }
    let instruction =
      match operation {
        Operation::Add => Instruction::Add {
          lhs         : parameters[0],
          rhs         : parameters[1],
          destination : parameters[2]
        },
        Operation::Multiply => Instruction::Multiply {
          lhs         : parameters[0],
          rhs         : parameters[1],
          destination : parameters[2]
        },
        Operation::Halt => Instruction::Halt
      };
    Some(instruction)
  }

  pub fn operation(&self) -> Operation {
    match self {
      Instruction::Add { .. }      => Operation::Add,
      Instruction::Multiply { .. } => Operation::Multiply,
      Instruction::Halt            => Operation::Halt
    }
  }

  pub fn parameters(&self) -> Vec<Word> {
    match *self {
      | Instruction::Add      { lhs, rhs, destination }
      | Instruction::Multiply { lhs, rhs, destination } => vec![lhs, rhs, destination],
      Instruction::Halt                                  => vec![]
    }
  }

  pub fn width(&self) -> usize {
    self.operation().width()
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      | Instruction::Add      { lhs, rhs, destination }
      | Instruction::Multiply { lhs, rhs, destination } => {
        write!(f, "{}(MEM[{}], MEM[{}], MEM[{}])", self.operation(), lhs, rhs, destination)
      }

      Instruction::Halt => {
        write!(f, "{}", self.operation())
      }

    }
  }
}
