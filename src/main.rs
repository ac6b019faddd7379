extern crate env_logger;
#[macro_use] extern crate log;
extern crate intcode;

use std::env;
use std::fs;
use std::process::exit;

use intcode::bytecode::{disassemble, parse_program};
use intcode::{encode_pair, evaluate, find_inputs, run, LoadError, Word};

const DEFAULT_NOUN         : Word = 12;
const DEFAULT_VERB         : Word = 2;
const DEFAULT_TARGET       : Word = 19690720;
const DEFAULT_SEARCH_BOUND : Word = 100;

const COMMANDS: [&str; 3] = ["run", "search", "disasm"];

const USAGE: &str = "\
Usage:
  intcode run <file> [noun verb]          Run with the given inputs (default 12 2).
  intcode run <file> -                    Run the program as it is, without inputs.
  intcode search <file> [target] [bound]  Find the inputs producing target (default 19690720).
                                          The bound defaults to 100; `len` uses the program length.
  intcode disasm <file>                   Print the assembly listing.";

fn load(path: &str) -> Result<Vec<Word>, LoadError> {
  let text = fs::read_to_string(path)?;
  let program = parse_program(&text)?;
  info!("loaded {} words from {}", program.len(), path);
  Ok(program)
}

fn parse_word(text: Option<&String>, default: Word, name: &str) -> Result<Word, String> {
  match text {
    None       => Ok(default),
    Some(text) => text.parse::<Word>().map_err(|_| format!("{} must be an integer: {}", name, text))
  }
}

fn run_command(args: &[String]) -> Result<String, String> {
  let command = args.get(0).ok_or_else(|| USAGE.to_string())?;
  if !COMMANDS.contains(&command.as_str()) {
    return Err(USAGE.to_string());
  }
  let path    = args.get(1).ok_or_else(|| USAGE.to_string())?;
  let program = load(path).map_err(|e| e.to_string())?;

  match command.as_str() {

    "run" => {
      let result = match args.get(2).map(String::as_str) {
        Some("-") => evaluate(&program),
        _ => {
          let noun = parse_word(args.get(2), DEFAULT_NOUN, "noun")?;
          let verb = parse_word(args.get(3), DEFAULT_VERB, "verb")?;
          run(&program, noun, verb)
        }
      };
      result.map(|value| value.to_string()).map_err(|e| e.to_string())
    }

    "search" => {
      let target = parse_word(args.get(2), DEFAULT_TARGET, "target")?;
      let bound  = match args.get(3).map(String::as_str) {
        Some("len") => program.len() as Word,
        _           => parse_word(args.get(3), DEFAULT_SEARCH_BOUND, "bound")?
      };
      match find_inputs(&program, target, bound) {
        Some((noun, verb)) => {
          info!("noun = {}, verb = {}", noun, verb);
          Ok(encode_pair(noun, verb).to_string())
        }
        None => Err(format!("no inputs below {} produce {}", bound, target))
      }
    }

    "disasm" => Ok(disassemble(&program).trim_end().to_string()),

    _ => Err(USAGE.to_string())

  }
}

fn main() {
  env_logger::init();

  let args: Vec<String> = env::args().skip(1).collect();
  match run_command(&args) {
    Ok(output) => {
      println!("{}", output);
    }
    Err(e) => {
      eprintln!("{}", e);
      exit(1);
    }
  }
}
