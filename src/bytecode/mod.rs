/*!

  Programs are flat sequences of signed 64 bit words. There is no separate code segment: the
  same memory holds instructions and data, and instructions may overwrite each other.

  An instruction is a group of words starting at the program counter. The first word is the
  opcode. The arithmetic opcodes are followed by three parameter words, for a fixed width of
  four words:

  ```text
  [Opcode][Lhs][Rhs][Destination]
  ```

  Each parameter word holds the *address* of an operand, so an operand's value is
  `MEM[MEM[pc + 1]]` and the result is written to `MEM[MEM[pc + 3]]`. `Halt` is a lone
  opcode word.

  The textual form of a program is a comma separated list of words (`parse_program`). The
  human readable listing of a program is called assembly (`disassemble` and `assemble`).

*/

mod assembly;
mod binary;
mod instruction;

pub use assembly::{assemble, disassemble, parse_program};
pub use binary::{encode_instruction, try_decode_instruction};
pub use instruction::{Instruction, Operation};

/// A single memory cell.
pub type Word = i64;
