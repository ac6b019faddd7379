/*!
  This module is responsible for the encoding and decoding of instructions to and from words.

*/

use super::{Instruction, Operation, Word};
use crate::address::Address;
use crate::error::MachineError;
use crate::memory::Memory;

/**
  Fetches and decodes the instruction at `pc`. The opcode cell and every parameter cell must lie
  inside of memory. The parameter words themselves are not resolved here.
*/
pub fn try_decode_instruction(memory: &Memory, pc: Address) -> Result<Instruction, MachineError> {
  let opcode    = memory.read(pc)?;
  let operation = match Operation::from_word(opcode) {
    Some(operation) => operation,
    None => {
      return Err(MachineError::InvalidOpcode { value: opcode, position: pc });
    }
  };

  let parameters =
    (1..=operation.arity())
      .map(|offset| memory.read(pc + offset))
      .collect::<Result<Vec<Word>, MachineError>>()?;

  // The parameter count always matches the arity by construction.
  Instruction::from_parts(operation, &parameters)
    .ok_or(MachineError::InvalidOpcode { value: opcode, position: pc })
}

/// Encodes the instruction into the words it occupies in memory.
pub fn encode_instruction(instruction: &Instruction) -> Vec<Word> {
  let mut words = Vec::with_capacity(instruction.width());
  words.push(instruction.operation().code() as Word);
  words.extend(instruction.parameters());
  words
}
