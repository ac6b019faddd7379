/*!
  A minimal stored-program machine. Memory is a flat vector of words that is interpreted as a
  sequence of fixed-width instructions by a fetch-decode-execute loop. A brute-force search
  driver treats the machine as a function of its two input cells and inverts it.

  ```text
  text -> [`bytecode::parse_program`] -> `Vec<Word>` -> [`Machine`] -> result at `MEM[0]`
                                                           ^
                          (noun, verb) candidates ---------┘ [`search::invert`]
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
extern crate strum;
extern crate strum_macros;

pub mod address;
pub mod bytecode;
pub mod error;
pub mod machine;
pub mod memory;
pub mod search;

pub use address::Address;
pub use bytecode::{Instruction, Operation, Word};
pub use error::{LoadError, MachineError};
pub use machine::{evaluate, run, Machine, State};
pub use memory::Memory;
pub use search::{encode_pair, find_inputs, invert, SearchSpace};
