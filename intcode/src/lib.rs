//! An Intcode interpreter whose input and output are pluggable
//! capabilities, so a host can drive it in batch or pause it after every
//! output.

mod error;
mod instruction;
mod io;
mod machine;
mod memory;
mod program;

pub use crate::{
    error::{AddressError, DecodeError, Error, ParseError},
    instruction::{Instruction, Mode, Opcode},
    io::{Discard, Flow, InputFn, InputProvider, Latest, NoInput, OutputConsumer, OutputFn, Values},
    machine::{Config, Discipline, Exit, Machine, RunState, Step},
    memory::{Growth, Memory},
    program::{parse_program, parse_programs},
};

/// Runs a program to completion in batch mode and collects its output.
pub fn run_program(program: Vec<i64>, input: impl IntoIterator<Item = i64>) -> Result<Vec<i64>, Error> {
    let mut vm = Machine::new(program);
    let mut output = Vec::new();
    vm.run(&mut Values(input.into_iter()), &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_program() {
        let prog = parse_program("3,9,8,9,10,9,4,9,99,-1,8").unwrap();
        assert_eq!(run_program(prog.clone(), vec![8]), Ok(vec![1]));
        assert_eq!(run_program(prog.clone(), vec![3]), Ok(vec![0]));
        assert_eq!(run_program(prog, std::iter::empty()), Err(Error::InputExhausted { ip: 0 }));
    }

    #[test]
    fn test_error_messages() {
        let err = run_program(vec![1, 0, 0, 0, 42], std::iter::empty()).unwrap_err();
        assert_eq!(err.to_string(), "cannot decode 42 at ip 4: unknown opcode 42");

        let err = "1,oops".parse::<Machine>().unwrap_err();
        assert!(err.to_string().starts_with("bad program token #1 \"oops\""));
    }
}
