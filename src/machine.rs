//! Structures and functions for the machine: a program counter over a flat word memory, driven
//! by a fetch-decode-execute loop.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};

use crate::address::Address;
use crate::bytecode::{try_decode_instruction, Instruction, Word};
use crate::error::MachineError;
use crate::memory::Memory;

/// The result of a run is read from here once the machine halts.
pub const OUTPUT_ADDRESS : Address = Address(0);
/// The first input cell, conventionally called the noun.
pub const NOUN_ADDRESS   : Address = Address(1);
/// The second input cell, conventionally called the verb.
pub const VERB_ADDRESS   : Address = Address(2);

#[cfg(feature = "trace_computation")]
const TRACE_WINDOW: usize = 8;

/// `Halted` and `Failed` are terminal; a machine never leaves them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
  Running,
  Halted,
  Failed(MachineError)
}

impl State {
  pub fn is_terminal(&self) -> bool {
    match self {
      State::Running => false,
      _              => true
    }
  }
}

impl Display for State {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      State::Running       => write!(f, "Running"),
      State::Halted        => write!(f, "Halted"),
      State::Failed(error) => write!(f, "Failed: {}", error)
    }
  }
}

#[derive(Clone, Debug)]
pub struct Machine {
  state  : State,
  pc     : Address, // Program counter
  memory : Memory,
}

impl Machine {

  // region Display methods

  fn make_memory_table(memory: &[Word], highlight: usize, start: usize) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    for (i, word) in memory.iter().enumerate() {
      match i + start == highlight {

        true  => {
          table.add_row(
            row![r->format!("* --> MEM[{}] =", i + start), format!("{}", word)]
          );
        }

        false => {
          table.add_row(
            row![r->format!("MEM[{}] =", i + start), format!("{}", word)]
          );
        }

      } // end match on highlight
    } // end for
    table
  }

  #[cfg(feature = "trace_computation")]
  fn trace_state(&self) {
    if !log_enabled!(log::Level::Trace) {
      return;
    }
    let cells = self.memory.as_slice();
    let start = self.pc.idx().min(cells.len());
    let end   = (start + TRACE_WINDOW).min(cells.len());
    let table = Machine::make_memory_table(&cells[start..end], self.pc.idx(), start);
    trace!("State: {}, PC: {}\n{}", self.state, self.pc, table);
  }

  // endregion

  // region Construction

  /// Loads a copy of `program` into a fresh memory. Nothing is seeded.
  pub fn new<M: Into<Memory>>(program: M) -> Machine {
    Machine {
      state  : State::Running,
      pc     : Address(0),
      memory : program.into()
    }
  }

  /// Loads a copy of `program` and writes `noun` and `verb` into the input cells. The program
  /// must be at least three words long so that both input cells exist.
  pub fn with_inputs(program: &[Word], noun: Word, verb: Word) -> Result<Machine, MachineError> {
    let mut machine = Machine::new(program);
    machine.set_inputs(noun, verb)?;
    Ok(machine)
  }

  pub fn set_inputs(&mut self, noun: Word, verb: Word) -> Result<(), MachineError> {
    self.memory.write(NOUN_ADDRESS, noun)?;
    self.memory.write(VERB_ADDRESS, verb)
  }

  // endregion

  // region Accessors

  pub fn state(&self) -> State {
    self.state
  }

  pub fn program_counter(&self) -> Address {
    self.pc
  }

  pub fn memory(&self) -> &Memory {
    &self.memory
  }

  pub fn into_memory(self) -> Memory {
    self.memory
  }

  /// The value at `OUTPUT_ADDRESS`, available only once the machine has halted.
  pub fn output(&self) -> Option<Word> {
    match self.state {
      State::Halted => self.memory.read(OUTPUT_ADDRESS).ok(),
      _             => None
    }
  }

  // endregion

  // region Execution

  /**
    Executes one fetch-decode-execute cycle. A machine in a terminal state does nothing: a halted
    machine reports `Halted` again and a failed machine reports its error again.
  */
  pub fn step(&mut self) -> Result<State, MachineError> {
    match self.state {
      State::Running       => {}
      State::Halted        => return Ok(State::Halted),
      State::Failed(error) => return Err(error)
    }

    self.state = match self.cycle() {
      Ok(state)  => state,
      Err(error) => {
        debug!("machine failed at {}: {}", self.pc, error);
        State::Failed(error)
      }
    };

    #[cfg(feature = "trace_computation")] { self.trace_state(); }

    match self.state {
      State::Failed(error) => Err(error),
      state                => Ok(state)
    }
  }

  /// Steps until the machine halts and returns the value at `OUTPUT_ADDRESS`.
  pub fn run(&mut self) -> Result<Word, MachineError> {
    while !self.step()?.is_terminal() {}
    self.memory.read(OUTPUT_ADDRESS)
  }

  fn cycle(&mut self) -> Result<State, MachineError> {
    let instruction = try_decode_instruction(&self.memory, self.pc)?;
    trace!("{}: {}", self.pc, instruction);
    self.execute(instruction)
  }

  fn execute(&mut self, instruction: Instruction) -> Result<State, MachineError> {
    match instruction {

      Instruction::Add { lhs, rhs, destination } => {
        self.arithmetic(lhs, rhs, destination, Word::wrapping_add)?;
      }

      Instruction::Multiply { lhs, rhs, destination } => {
        self.arithmetic(lhs, rhs, destination, Word::wrapping_mul)?;
      }

      Instruction::Halt => {
        // The program counter stays on the `Halt`.
        return Ok(State::Halted);
      }

    }

    self.pc = self.pc + instruction.width();
    Ok(State::Running)
  }

  /**
    `MEM[destination] = op(MEM[lhs], MEM[rhs])`, where `lhs`, `rhs`, and `destination` are the
    words stored in the instruction's parameter cells. Together with the read of the parameter
    cell this is two levels of indirection per operand.
  */
  fn arithmetic(
    &mut self,
    lhs         : Word,
    rhs         : Word,
    destination : Word,
    op          : fn(Word, Word) -> Word
  ) -> Result<(), MachineError> {
    let a      = self.memory.read(self.memory.resolve(lhs)?)?;
    let b      = self.memory.read(self.memory.resolve(rhs)?)?;
    let target = self.memory.resolve(destination)?;
    self.memory.write(target, op(a, b))
  }

  // endregion

}

/// Runs a copy of `program` with `noun` and `verb` seeded into the input cells.
pub fn run(program: &[Word], noun: Word, verb: Word) -> Result<Word, MachineError> {
  Machine::with_inputs(program, noun, verb)?.run()
}

/// Runs a copy of `program` as it is, without seeding the input cells.
pub fn evaluate(program: &[Word]) -> Result<Word, MachineError> {
  Machine::new(program).run()
}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for Machine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let table = Machine::make_memory_table(self.memory.as_slice(), self.pc.idx(), 0);
    write!(f, "State: {}\tPC: {}\n{}", self.state, self.pc, table)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
  }

  #[test]
  fn add_in_place(){
    init();
    assert_eq!(evaluate(&[1, 0, 0, 0, 99]), Ok(2));
  }

  #[test]
  fn add_then_multiply(){
    init();
    assert_eq!(evaluate(&[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]), Ok(3500));
  }

  #[test]
  fn self_modifying_program(){
    init();
    // The `Add` writes the `Multiply` opcode over the `99` at address 4.
    assert_eq!(evaluate(&[1, 1, 1, 4, 99, 5, 6, 0, 99]), Ok(30));
  }

  #[test]
  fn final_memory(){
    init();
    let mut machine = Machine::new(vec![2, 4, 4, 5, 99, 0]);
    assert_eq!(machine.run(), Ok(2));
    assert_eq!(machine.memory().as_slice(), &[2, 4, 4, 5, 99, 9801]);
  }

  #[test]
  fn seeded_inputs(){
    init();
    // MEM[0] = MEM[noun] + MEM[verb]
    let program = [1, 0, 0, 0, 99, 7, 11];
    assert_eq!(run(&program, 5, 6), Ok(18));
    assert_eq!(run(&program, 5, 5), Ok(14));
    // The caller's program is never modified.
    assert_eq!(program, [1, 0, 0, 0, 99, 7, 11]);
  }

  #[test]
  fn zero_is_a_result(){
    init();
    assert_eq!(evaluate(&[1, 5, 5, 0, 99, 0]), Ok(0));
  }

  #[test]
  fn deterministic(){
    init();
    let program = [1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50];
    assert_eq!(run(&program, 9, 10), run(&program, 9, 10));
    assert_eq!(evaluate(&program), evaluate(&program));
  }

  #[test]
  fn invalid_opcode(){
    init();
    assert_eq!(
      evaluate(&[5, 0, 0, 0, 99]),
      Err(MachineError::InvalidOpcode { value: 5, position: Address(0) })
    );
    assert_eq!(
      evaluate(&[1, 0, 0, 0, 5, 0, 0, 0, 99]),
      Err(MachineError::InvalidOpcode { value: 5, position: Address(4) })
    );
    // Zero is not a no-op.
    assert_eq!(
      evaluate(&[0, 0, 0, 0, 99]),
      Err(MachineError::InvalidOpcode { value: 0, position: Address(0) })
    );
  }

  #[test]
  fn operand_out_of_bounds(){
    init();
    assert_eq!(
      evaluate(&[1, 5, 0, 0, 99]),
      Err(MachineError::OutOfBounds { address: 5 })
    );
    assert_eq!(
      evaluate(&[2, 0, -1, 0, 99]),
      Err(MachineError::OutOfBounds { address: -1 })
    );
  }

  #[test]
  fn destination_out_of_bounds(){
    init();
    assert_eq!(
      evaluate(&[1, 0, 0, 50, 99]),
      Err(MachineError::OutOfBounds { address: 50 })
    );
  }

  #[test]
  fn program_counter_out_of_bounds(){
    init();
    // No `Halt` before the end of memory.
    assert_eq!(evaluate(&[1, 0, 0, 0]), Err(MachineError::OutOfBounds { address: 4 }));
    // The last instruction is cut short.
    assert_eq!(evaluate(&[1, 0, 0, 0, 1, 0]), Err(MachineError::OutOfBounds { address: 6 }));
    assert_eq!(evaluate(&[]), Err(MachineError::OutOfBounds { address: 0 }));
  }

  #[test]
  fn inputs_need_three_words(){
    init();
    assert_eq!(run(&[99, 0], 1, 1), Err(MachineError::OutOfBounds { address: 2 }));
    assert_eq!(run(&[99], 1, 1), Err(MachineError::OutOfBounds { address: 1 }));
  }

  #[test]
  fn state_transitions(){
    init();
    let mut machine = Machine::new(vec![1, 0, 0, 0, 99]);
    assert_eq!(machine.state(), State::Running);
    assert_eq!(machine.output(), None);

    assert_eq!(machine.step(), Ok(State::Running));
    assert_eq!(machine.program_counter(), Address(4));

    assert_eq!(machine.step(), Ok(State::Halted));
    assert_eq!(machine.program_counter(), Address(4));
    assert_eq!(machine.output(), Some(2));

    // Halted is terminal.
    assert_eq!(machine.step(), Ok(State::Halted));
    assert_eq!(machine.run(), Ok(2));
  }

  #[test]
  fn failed_is_terminal(){
    init();
    let mut machine = Machine::new(vec![7, 0, 0, 0, 99]);
    let error = MachineError::InvalidOpcode { value: 7, position: Address(0) };
    assert_eq!(machine.step(), Err(error));
    assert_eq!(machine.state(), State::Failed(error));
    assert_eq!(machine.output(), None);
    assert_eq!(machine.step(), Err(error));
    assert_eq!(machine.run(), Err(error));
    assert_eq!(machine.program_counter(), Address(0));
  }

  #[test]
  fn arithmetic_wraps(){
    init();
    let program = [2, 5, 6, 0, 99, Word::MAX, 2];
    assert_eq!(evaluate(&program), Ok(Word::MAX.wrapping_mul(2)));
  }

  #[test]
  fn display_highlights_program_counter(){
    init();
    let mut machine = Machine::new(vec![1, 0, 0, 0, 99]);
    machine.step().unwrap();
    let text = machine.to_string();
    assert!(text.starts_with("State: Running\tPC: MEM[4]"));
    assert!(text.contains("* --> MEM[4] ="));
    assert!(text.contains("MEM[0] ="));
  }
}
