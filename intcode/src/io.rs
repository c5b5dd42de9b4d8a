use {
    crate::{error::Error, machine::Machine},
    std::collections::VecDeque,
};

/// Supplies values for the input instruction.
///
/// The provider is handed the machine and the address the instruction
/// targets, and is expected to stage a value there with [`Machine::write`].
/// It may compute the value on demand from whatever host state it owns.
pub trait InputProvider {
    fn next_input(&mut self, machine: &mut Machine, addr: i64) -> Result<(), Error>;
}

/// Receives every value the output instruction produces.
pub trait OutputConsumer {
    fn accept_output(&mut self, machine: &mut Machine, value: i64) -> Result<Flow, Error>;
}

/// An output consumer's verdict on whether the program should keep going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl<T: InputProvider + ?Sized> InputProvider for &mut T {
    fn next_input(&mut self, machine: &mut Machine, addr: i64) -> Result<(), Error> {
        (**self).next_input(machine, addr)
    }
}

impl<T: OutputConsumer + ?Sized> OutputConsumer for &mut T {
    fn accept_output(&mut self, machine: &mut Machine, value: i64) -> Result<Flow, Error> {
        (**self).accept_output(machine, value)
    }
}

fn stage(machine: &mut Machine, addr: i64, value: Option<i64>) -> Result<(), Error> {
    let value = value.ok_or(Error::InputExhausted { ip: machine.ip() })?;
    machine.write(addr, value)
}

impl InputProvider for VecDeque<i64> {
    fn next_input(&mut self, machine: &mut Machine, addr: i64) -> Result<(), Error> {
        let value = self.pop_front();
        stage(machine, addr, value)
    }
}

/// Feeds values from an iterator until it runs dry.
#[derive(Clone, Debug)]
pub struct Values<I>(pub I);

impl<I: Iterator<Item = i64>> InputProvider for Values<I> {
    fn next_input(&mut self, machine: &mut Machine, addr: i64) -> Result<(), Error> {
        let value = self.0.next();
        stage(machine, addr, value)
    }
}

/// Asks a closure for each input; `None` means there is nothing to give.
pub struct InputFn<F>(pub F);

impl<F: FnMut() -> Option<i64>> InputProvider for InputFn<F> {
    fn next_input(&mut self, machine: &mut Machine, addr: i64) -> Result<(), Error> {
        let value = (self.0)();
        stage(machine, addr, value)
    }
}

/// For programs that never read.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl InputProvider for NoInput {
    fn next_input(&mut self, machine: &mut Machine, _addr: i64) -> Result<(), Error> {
        Err(Error::InputExhausted { ip: machine.ip() })
    }
}

impl OutputConsumer for Vec<i64> {
    fn accept_output(&mut self, _machine: &mut Machine, value: i64) -> Result<Flow, Error> {
        self.push(value);
        Ok(Flow::Continue)
    }
}

/// Keeps only the most recent output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Latest(Option<i64>);

impl Latest {
    pub fn new() -> Latest {
        Latest(None)
    }

    pub fn peek(&self) -> Option<i64> {
        self.0
    }

    /// Hands over the last output and forgets it.
    pub fn take(&mut self) -> Option<i64> {
        self.0.take()
    }
}

impl OutputConsumer for Latest {
    fn accept_output(&mut self, _machine: &mut Machine, value: i64) -> Result<Flow, Error> {
        self.0 = Some(value);
        Ok(Flow::Continue)
    }
}

pub struct OutputFn<F>(pub F);

impl<F: FnMut(i64) -> Flow> OutputConsumer for OutputFn<F> {
    fn accept_output(&mut self, _machine: &mut Machine, value: i64) -> Result<Flow, Error> {
        Ok((self.0)(value))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl OutputConsumer for Discard {
    fn accept_output(&mut self, _machine: &mut Machine, _value: i64) -> Result<Flow, Error> {
        Ok(Flow::Continue)
    }
}
