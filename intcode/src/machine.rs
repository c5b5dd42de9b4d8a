use {
    crate::{
        error::Error,
        instruction::{Fetched, Instruction, OpXX, OpXXM, Operand},
        io::{Flow, InputProvider, OutputConsumer},
        memory::{Growth, Memory},
        program::parse_program,
    },
    log::{debug, trace},
    std::{fmt, str::FromStr},
};

/// How [`Machine::run`] treats the output instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discipline {
    /// Hand the value to the consumer and keep going.
    Batch,
    /// Hand the value to the consumer, then return it to the caller.
    Interactive,
}

impl Default for Discipline {
    fn default() -> Discipline {
        Discipline::Batch
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub discipline: Discipline,
    pub growth: Growth,
    /// Zeroed cells appended after the program when it is loaded.
    pub scratch: usize,
}

impl Config {
    pub fn interactive(self) -> Config {
        self.discipline(Discipline::Interactive)
    }

    pub fn discipline(mut self, discipline: Discipline) -> Config {
        self.discipline = discipline;
        self
    }

    pub fn growth(mut self, growth: Growth) -> Config {
        self.growth = growth;
        self
    }

    pub fn scratch(mut self, cells: usize) -> Config {
        self.scratch = cells;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Ready,
    Running,
    Suspended,
    Halted,
    Stopped,
    Faulted,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        match self {
            RunState::Halted | RunState::Stopped | RunState::Faulted => true,
            RunState::Ready  | RunState::Running | RunState::Suspended => false,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RunState::Ready     => "ready",
            RunState::Running   => "running",
            RunState::Suspended => "suspended",
            RunState::Halted    => "halted",
            RunState::Stopped   => "stopped",
            RunState::Faulted   => "faulted",
        };
        f.write_str(name)
    }
}

/// Outcome of executing a single instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Output(i64),
    Halted,
    /// The output consumer asked for the program to end.
    Stopped,
}

/// Why [`Machine::run`] handed control back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    Halted,
    /// Interactive mode produced a value; call `run` again to resume.
    Suspended(i64),
    Stopped,
}

#[derive(Clone, Debug)]
pub struct Machine {
    state: RunState,
    ip: usize,
    memory: Memory,
    config: Config,
}

impl Machine {
    pub fn new(program: Vec<i64>) -> Machine {
        Machine::with_config(program, Config::default())
    }

    pub fn with_config(mut program: Vec<i64>, config: Config) -> Machine {
        program.resize(program.len() + config.scratch, 0);
        Machine {
            state: RunState::Ready,
            ip: 0,
            memory: Memory::new(program, config.growth),
            config,
        }
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn memory(&self) -> &[i64] {
        self.memory.as_slice()
    }

    pub fn dump_memory(&self) -> Vec<i64> {
        self.memory.as_slice().to_vec()
    }

    pub fn into_memory(self) -> Vec<i64> {
        self.memory.into_vec()
    }

    pub fn read(&self, addr: i64) -> Result<i64, Error> {
        let ip = self.ip;
        self.memory.read(addr).map_err(|source| Error::Address { ip, source })
    }

    pub fn write(&mut self, addr: i64, value: i64) -> Result<(), Error> {
        let ip = self.ip;
        self.memory.write(addr, value).map_err(|source| Error::Address { ip, source })
    }

    /// Runs until the program halts, the output consumer stops it, or (in
    /// interactive mode) an output is produced.
    pub fn run<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<Exit, Error>
        where I: InputProvider + ?Sized,
              O: OutputConsumer + ?Sized
    {
        loop {
            match self.step(input, output)? {
                Step::Continue => { continue; }

                Step::Output(value) => {
                    if self.config.discipline == Discipline::Interactive {
                        debug!("suspended after output {} (ip {})", value, self.ip);
                        self.state = RunState::Suspended;
                        return Ok(Exit::Suspended(value));
                    }
                }

                Step::Halted  => { return Ok(Exit::Halted);  }
                Step::Stopped => { return Ok(Exit::Stopped); }
            }
        }
    }

    /// Executes exactly one instruction.
    pub fn step<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<Step, Error>
        where I: InputProvider + ?Sized,
              O: OutputConsumer + ?Sized
    {
        if self.state.is_terminal() {
            return Err(Error::NotRunnable { ip: self.ip, state: self.state });
        }

        let resume_state = self.state;
        self.state = RunState::Running;
        self.execute(input, output)
            .map_err(|err| {
                if err.is_fatal() {
                    debug!("faulted: {}", err);
                    self.state = RunState::Faulted;
                }
                else {
                    // the instruction did not execute; leave the machine as it was
                    self.state = resume_state;
                }
                err
            })
    }

    fn execute<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<Step, Error>
        where I: InputProvider + ?Sized,
              O: OutputConsumer + ?Sized
    {
        let ip = self.ip;
        let word = self.memory.load(ip)
            .map_err(|source| Error::Address { ip, source })?;
        let inst = Instruction::decode(word)
            .map_err(|source| Error::Decode { ip, word, source })?;
        let fetched = inst.fetch(&self.memory, ip)
            .map_err(|source| Error::Address { ip, source })?;
        trace!("{:>6}: {:?}", ip, fetched);

        let mut next_ip = ip + inst.width();

        match fetched {
            Fetched::XXM(op, s1, s2, d) => {
                let s1 = self.read_operand(s1)?;
                let s2 = self.read_operand(s2)?;
                use OpXXM::*;
                let result = match op {
                    Add => s1.checked_add(s2),
                    Mul => s1.checked_mul(s2),
                    Les => Some(if s1 <  s2 { 1 } else { 0 }),
                    Equ => Some(if s1 == s2 { 1 } else { 0 }),
                };
                let result = result.ok_or(Error::Overflow { ip, opcode: op.opcode() })?;
                self.write(d, result)?;
            }

            Fetched::XX(op, x1, x2) => {
                let x1 = self.read_operand(x1)?;
                let x2 = self.read_operand(x2)?;
                let taken = match op {
                    OpXX::JiT => x1 != 0,
                    OpXX::JiF => x1 == 0,
                };
                if taken {
                    next_ip = self.memory.index(x2)
                        .map_err(|source| Error::Address { ip, source })?;
                }
            }

            Fetched::Inp(d) => {
                input.next_input(self, d)?;
            }

            Fetched::Out(x) => {
                let value = self.read_operand(x)?;
                self.ip = next_ip;
                return match output.accept_output(self, value)? {
                    Flow::Continue => Ok(Step::Output(value)),
                    Flow::Stop     => {
                        debug!("stopped by output consumer after {} (ip {})", value, ip);
                        self.state = RunState::Stopped;
                        Ok(Step::Stopped)
                    }
                };
            }

            Fetched::Halt => {
                debug!("halted at ip {}", ip);
                self.state = RunState::Halted;
                return Ok(Step::Halted);
            }
        }

        self.ip = next_ip;
        Ok(Step::Continue)
    }

    fn read_operand(&self, oa: Operand) -> Result<i64, Error> {
        match oa {
            Operand::Imm(x)    => Ok(x),
            Operand::Mem(addr) => self.read(addr),
        }
    }
}

impl FromStr for Machine {
    type Err = Error;

    fn from_str(src: &str) -> Result<Machine, Error> {
        let program = parse_program(src)?;
        Ok(Machine::new(program))
    }
}
