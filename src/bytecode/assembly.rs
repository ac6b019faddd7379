/*!
  Text forms of a program.

  The *program* form is what programs are distributed as: a single line of comma separated
  decimal words, e.g. `1,9,10,3,2,3,11,0,99,30,40,50`.

  The *assembly* form is a listing with one instruction per line. This module leverages the
  `strum` derives of `Operation` to serialize and deserialize mnemonics. Words that are not
  executed as instructions are listed as `Data(value)`:

  ```text
  Add(MEM[9], MEM[10], MEM[3])
  Multiply(MEM[3], MEM[11], MEM[0])
  Halt
  Data(30)   # Everything after `Halt` is data.
  ```
*/

use std::str::FromStr;

use nom::{
  branch::alt,
  bytes::complete::tag,
  character::complete::{
    alpha1,
    char as one_char,
    digit1,
    multispace0,
    one_of,
    space0
  },
  combinator::{all_consuming, map, map_res, opt, recognize},
  multi::separated_list,
  sequence::{delimited, pair, preceded, tuple},
  IResult
};

use super::{encode_instruction, try_decode_instruction, Instruction, Operation, Word};
use crate::address::Address;
use crate::error::LoadError;
use crate::memory::Memory;

/// Mnemonic for a word that is not an instruction.
const DATA_MNEMONIC: &str = "Data";
const COMMENT_CHAR  : char = '#';

// region Parsers

fn word_p(input: &str) -> IResult<&str, Word> {
  map_res(
    recognize(pair(opt(one_of("+-")), digit1)),
    |text: &str| text.parse::<Word>()
  )(input)
}

fn program_p(input: &str) -> IResult<&str, Vec<Word>> {
  delimited(
    multispace0,
    separated_list(delimited(multispace0, one_char(','), multispace0), word_p),
    multispace0
  )(input)
}

/// An operand is either a bare word or `MEM[word]`.
fn operand_p(input: &str) -> IResult<&str, Word> {
  alt((
    delimited(tag("MEM["), word_p, one_char(']')),
    word_p
  ))(input)
}

/// `Name`, `Name()`, or `Name(operand, operand, ...)`.
fn line_p(input: &str) -> IResult<&str, (&str, Vec<Word>)> {
  map(
    delimited(
      space0,
      tuple((
        alpha1,
        opt(
          delimited(
            preceded(space0, one_char('(')),
            delimited(
              space0,
              separated_list(delimited(space0, one_char(','), space0), operand_p),
              space0
            ),
            one_char(')')
          )
        )
      )),
      space0
    ),
    |(name, operands): (&str, Option<Vec<Word>>)| (name, operands.unwrap_or_default())
  )(input)
}

// endregion

/**
  Parses the comma separated program form. Whitespace (including newlines) is allowed around
  the commas and at either end.
*/
pub fn parse_program(text: &str) -> Result<Vec<Word>, LoadError> {
  match all_consuming(program_p)(text) {

    Ok((_rest, words)) if words.is_empty() => Err(LoadError::Empty),

    Ok((_rest, words)) => Ok(words),

    | Err(nom::Err::Error((rest, _kind)))
    | Err(nom::Err::Failure((rest, _kind))) => {
      Err(LoadError::Syntax { offset: text.len() - rest.len() })
    }

    Err(nom::Err::Incomplete(_)) => Err(LoadError::Syntax { offset: text.len() })

  }
}

/**
  Produces the assembly listing of a program. Decoding proceeds from address 0 the same way the
  machine would walk the program. Once a `Halt` has been listed, or a group of words fails to
  decode, every remaining word is listed as data.
*/
pub fn disassemble(program: &[Word]) -> String {
  let memory     = Memory::from(program);
  let mut lines  = Vec::new();
  let mut pc     = Address(0);

  while memory.contains(pc) {
    match try_decode_instruction(&memory, pc) {
      Ok(instruction) => {
        lines.push(instruction.to_string());
        pc = pc + instruction.width();
        if instruction == Instruction::Halt {
          break;
        }
      }
      Err(_) => break
    }
  }

  for word in program.iter().skip(pc.idx()) {
    lines.push(format!("{}({})", DATA_MNEMONIC, word));
  }

  let mut listing = lines.join("\n");
  listing.push('\n');
  listing
}

/// Assembles a listing back into words. Blank lines and `#` comments are ignored.
pub fn assemble(text: &str) -> Result<Vec<Word>, LoadError> {
  let mut words = Vec::new();

  for (index, raw_line) in text.lines().enumerate() {
    let line_number = index + 1;
    let line = match raw_line.find(COMMENT_CHAR) {
      Some(start) => &raw_line[..start],
      None        => raw_line
    };
    if line.trim().is_empty() {
      continue;
    }

    let (name, operands) = match all_consuming(line_p)(line) {
      Ok((_rest, parsed)) => parsed,
      Err(_) => {
        return Err(LoadError::MalformedLine { line: line_number });
      }
    };

    if name == DATA_MNEMONIC {
      match operands.as_slice() {
        [value] => words.push(*value),
        _ => {
          return Err(LoadError::WrongArity {
            line      : line_number,
            operation : name.to_string(),
            expected  : 1,
            given     : operands.len()
          });
        }
      }
      continue;
    }

    let operation = Operation::from_str(name).map_err(|_| LoadError::UnknownOperation {
      line : line_number,
      name : name.to_string()
    })?;

    match Instruction::from_parts(operation, &operands) {
      Some(instruction) => words.extend(encode_instruction(&instruction)),
      None => {
        return Err(LoadError::WrongArity {
          line      : line_number,
          operation : operation.to_string(),
          expected  : operation.arity(),
          given     : operands.len()
        });
      }
    }
  }

  match words.is_empty() {
    true  => Err(LoadError::Empty),
    false => Ok(words)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: [Word; 12] = [1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50];

  #[test]
  fn parse_single_line(){
    assert_eq!(parse_program("1,0,0,0,99").unwrap(), vec![1, 0, 0, 0, 99]);
  }

  #[test]
  fn parse_with_whitespace(){
    assert_eq!(parse_program("  1, 9 ,10,\n3,99\n").unwrap(), vec![1, 9, 10, 3, 99]);
  }

  #[test]
  fn parse_signed_words(){
    assert_eq!(parse_program("1101,-4,+5,0").unwrap(), vec![1101, -4, 5, 0]);
  }

  #[test]
  fn parse_empty(){
    assert!(matches!(parse_program(""), Err(LoadError::Empty)));
    assert!(matches!(parse_program(" \n"), Err(LoadError::Empty)));
  }

  #[test]
  fn parse_garbage(){
    assert!(matches!(parse_program("1,2,x"), Err(LoadError::Syntax { offset: 3 })));
    assert!(matches!(parse_program("1,2;3"), Err(LoadError::Syntax { offset: 3 })));
    assert!(matches!(parse_program("abc"), Err(LoadError::Syntax { offset: 0 })));
  }

  #[test]
  fn disassemble_sample(){
    let listing = disassemble(&SAMPLE);
    assert_eq!(
      listing,
      "Add(MEM[9], MEM[10], MEM[3])\n\
       Multiply(MEM[3], MEM[11], MEM[0])\n\
       Halt\n\
       Data(30)\n\
       Data(40)\n\
       Data(50)\n"
    );
  }

  #[test]
  fn disassemble_invalid_opcode_is_data(){
    let listing = disassemble(&[5, 1, 2]);
    assert_eq!(listing, "Data(5)\nData(1)\nData(2)\n");
  }

  #[test]
  fn disassemble_truncated_instruction_is_data(){
    let listing = disassemble(&[1, 0, 0, 0, 2, 0]);
    assert_eq!(listing, "Add(MEM[0], MEM[0], MEM[0])\nData(2)\nData(0)\n");
  }

  #[test]
  fn assemble_listing(){
    let text = "
      # Compute 30 + 40 and multiply the sum by 50.
      Add(MEM[9], MEM[10], MEM[3])
      Multiply(3, 11, 0)   # bare operands are accepted too
      Halt()
      Data(30)
      Data(40)
      Data(-50)
    ";
    assert_eq!(assemble(text).unwrap(), vec![1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, -50]);
  }

  #[test]
  fn assemble_inverts_disassemble(){
    assert_eq!(assemble(&disassemble(&SAMPLE)).unwrap(), SAMPLE.to_vec());
  }

  #[test]
  fn assemble_errors(){
    assert!(matches!(
      assemble("Halt\nJump(4)"),
      Err(LoadError::UnknownOperation { line: 2, .. })
    ));
    assert!(matches!(
      assemble("Add(1, 2)"),
      Err(LoadError::WrongArity { line: 1, expected: 3, given: 2, .. })
    ));
    assert!(matches!(
      assemble("Data(1, 2)"),
      Err(LoadError::WrongArity { line: 1, expected: 1, given: 2, .. })
    ));
    assert!(matches!(
      assemble("Add(1, 2, 3"),
      Err(LoadError::MalformedLine { line: 1 })
    ));
    assert!(matches!(assemble("# nothing here"), Err(LoadError::Empty)));
  }
}
