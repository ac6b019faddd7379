/*!
  Brute-force inversion of a program. The machine is treated as a pure function
  `(noun, verb) -> MEM[0]`, and every candidate pair in `[0, bound) x [0, bound)` is tried in
  row-major order (the noun varies slowest) until one produces the target.

  Each candidate runs on its own copy of the program, so candidates share no state. A candidate
  whose run fails is simply not a match.
*/

use crate::bytecode::Word;
use crate::machine::run;

/// Iterates over `(noun, verb)` pairs in `[0, bound) x [0, bound)`, noun slowest.
#[derive(Clone, Debug)]
pub struct SearchSpace {
  bound : Word,
  noun  : Word,
  verb  : Word,
}

impl SearchSpace {
  pub fn new(bound: Word) -> SearchSpace {
    SearchSpace { bound, noun: 0, verb: 0 }
  }
}

impl Iterator for SearchSpace {
  type Item = (Word, Word);

  fn next(&mut self) -> Option<(Word, Word)> {
    if self.noun >= self.bound {
      return None;
    }
    let candidate = (self.noun, self.verb);
    self.verb += 1;
    if self.verb >= self.bound {
      self.verb  = 0;
      self.noun += 1;
    }
    Some(candidate)
  }
}

/// Scale applied to the noun when a pair is combined into one number.
pub const NOUN_SCALE: Word = 100;

/// Combines a pair into one number, `100 * noun + verb`, whatever the search bound was. For a
/// two digit verb this is the noun's digits followed by the verb's digits.
pub fn encode_pair(noun: Word, verb: Word) -> Word {
  noun * NOUN_SCALE + verb
}

/// Returns the first pair, in row-major order, whose run of `program` leaves `target` at
/// address 0.
pub fn find_inputs(program: &[Word], target: Word, bound: Word) -> Option<(Word, Word)> {
  let mut tried: u64 = 0;
  let found =
    SearchSpace::new(bound).find(|&(noun, verb)| {
      tried += 1;
      match run(program, noun, verb) {
        Ok(result) => result == target,
        Err(error) => {
          trace!("candidate ({}, {}) failed: {}", noun, verb, error);
          false
        }
      }
    });

  match found {
    Some((noun, verb)) => debug!("found noun {} and verb {} after {} runs", noun, verb, tried),
    None               => debug!("no inputs below {} produce {} ({} runs)", bound, target, tried)
  }
  found
}

/// Searches for the inputs producing `target` and returns them encoded with `encode_pair`.
pub fn invert(program: &[Word], target: Word, bound: Word) -> Option<Word> {
  find_inputs(program, target, bound).map(|(noun, verb)| encode_pair(noun, verb))
}
