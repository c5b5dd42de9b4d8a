use crate::{
    error::{AddressError, DecodeError},
    memory::Memory,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Position,
    Immediate,
}

impl Mode {
    fn decode(digit: i64, param: usize) -> Result<Mode, DecodeError> {
        match digit {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            _ => Err(DecodeError::BadMode { mode: digit, param }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,  // ADD
    Mul,  // MULtiply
    Inp,  // INPut
    Out,  // OUTput
    JiT,  // Jump If True
    JiF,  // Jump If False
    Les,  // LESs than
    Equ,  // EQUal to
    Halt, // HALT machine
}

impl Opcode {
    pub fn from_code(code: i64) -> Option<Opcode> {
        use Opcode::*;
        let op = match code {
            1  => Add,
            2  => Mul,
            3  => Inp,
            4  => Out,
            5  => JiT,
            6  => JiF,
            7  => Les,
            8  => Equ,
            99 => Halt,
            _  => return None,
        };
        Some(op)
    }

    pub fn code(self) -> i64 {
        use Opcode::*;
        match self {
            Add  => 1,
            Mul  => 2,
            Inp  => 3,
            Out  => 4,
            JiT  => 5,
            JiF  => 6,
            Les  => 7,
            Equ  => 8,
            Halt => 99,
        }
    }

    pub fn param_count(self) -> usize {
        use Opcode::*;
        match self {
            Add | Mul | Les | Equ => 3,
            JiT | JiF             => 2,
            Inp | Out             => 1,
            Halt                  => 0,
        }
    }
}

const MAX_PARAMS: usize = 3;

/// An instruction word split into its opcode and one addressing mode per
/// declared parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    opcode: Opcode,
    modes: [Mode; MAX_PARAMS],
}

impl Instruction {
    /// Mode digits past the opcode's parameter count are ignored; missing
    /// ones default to position mode.
    pub fn decode(word: i64) -> Result<Instruction, DecodeError> {
        let (code, mut iword) = (word % 100, word / 100);
        let opcode = Opcode::from_code(code)
            .ok_or(DecodeError::UnknownOpcode(code))?;

        let mut modes = [Mode::Position; MAX_PARAMS];
        for (param, mode) in modes.iter_mut().enumerate().take(opcode.param_count()) {
            *mode = Mode::decode(iword % 10, param)?;
            iword /= 10;
        }

        Ok(Instruction { opcode, modes })
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes[.. self.opcode.param_count()]
    }

    /// Cells occupied by the instruction word and its parameters.
    pub fn width(&self) -> usize {
        1 + self.opcode.param_count()
    }

    pub(crate) fn fetch(&self, memory: &Memory, ip: usize) -> Result<Fetched, AddressError> {
        let raw = |n: usize| memory.load(ip + 1 + n);
        let operand = |n: usize| -> Result<Operand, AddressError> {
            let word = raw(n)?;
            let operand = match self.modes[n] {
                Mode::Position  => Operand::Mem(word),
                Mode::Immediate => Operand::Imm(word),
            };
            Ok(operand)
        };

        use Opcode::*;
        // destinations are addresses whatever their mode digit says
        let xxm = |op: OpXXM| -> Result<Fetched, AddressError> {
            Ok(Fetched::XXM(op, operand(0)?, operand(1)?, raw(2)?))
        };
        let xx = |op: OpXX| -> Result<Fetched, AddressError> {
            Ok(Fetched::XX(op, operand(0)?, operand(1)?))
        };

        let fetched = match self.opcode {
            Add  => xxm(OpXXM::Add)?,
            Mul  => xxm(OpXXM::Mul)?,
            Les  => xxm(OpXXM::Les)?,
            Equ  => xxm(OpXXM::Equ)?,
            JiT  => xx(OpXX::JiT)?,
            JiF  => xx(OpXX::JiF)?,
            Inp  => Fetched::Inp(raw(0)?),
            Out  => Fetched::Out(operand(0)?),
            Halt => Fetched::Halt,
        };

        Ok(fetched)
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Operand {
    Mem(i64),
    Imm(i64),
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum OpXXM {
    Add,
    Mul,
    Les,
    Equ,
}

impl OpXXM {
    pub(crate) fn opcode(self) -> Opcode {
        match self {
            OpXXM::Add => Opcode::Add,
            OpXXM::Mul => Opcode::Mul,
            OpXXM::Les => Opcode::Les,
            OpXXM::Equ => Opcode::Equ,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum OpXX {
    JiT,
    JiF,
}

/// An instruction with its parameter cells read out of memory.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Fetched {
    XXM(OpXXM, Operand, Operand, i64),
    XX(OpXX, Operand, Operand),
    Inp(i64),
    Out(Operand),
    Halt,
}
