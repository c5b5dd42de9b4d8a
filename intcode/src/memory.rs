use {
    crate::error::AddressError,
    std::convert::TryFrom,
};

/// What happens when a program touches a cell past the end of memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Growth {
    /// Memory keeps the size it was loaded with; stray accesses are fatal.
    Fixed,
    /// Reads past the end see zero, writes zero-fill up to the target.
    Extend,
}

impl Default for Growth {
    fn default() -> Growth {
        Growth::Fixed
    }
}

// Bounds zero-fill growth so a garbage address can't exhaust the allocator.
const EXTEND_LIMIT: usize = 1 << 24;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i64>,
    growth: Growth,
}

impl Memory {
    pub fn new(cells: Vec<i64>, growth: Growth) -> Memory {
        Memory { cells, growth }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn growth(&self) -> Growth {
        self.growth
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.cells
    }

    pub fn read(&self, addr: i64) -> Result<i64, AddressError> {
        self.load(self.index(addr)?)
    }

    pub fn write(&mut self, addr: i64, value: i64) -> Result<(), AddressError> {
        self.store(self.index(addr)?, value)
    }

    pub(crate) fn index(&self, addr: i64) -> Result<usize, AddressError> {
        if addr < 0 {
            return Err(AddressError::Negative(addr));
        }

        usize::try_from(addr)
            .map_err(|_| AddressError::OutOfBounds { addr: usize::MAX, len: self.len() })
    }

    pub(crate) fn load(&self, addr: usize) -> Result<i64, AddressError> {
        match (self.cells.get(addr), self.growth) {
            (Some(&value), _            ) => Ok(value),
            (None,         Growth::Extend) => Ok(0),
            (None,         Growth::Fixed ) => Err(self.out_of_bounds(addr)),
        }
    }

    pub(crate) fn store(&mut self, addr: usize, value: i64) -> Result<(), AddressError> {
        if addr >= self.cells.len() {
            if self.growth == Growth::Fixed || addr >= EXTEND_LIMIT {
                return Err(self.out_of_bounds(addr));
            }
            self.cells.resize(addr + 1, 0);
        }

        self.cells[addr] = value;
        Ok(())
    }

    fn out_of_bounds(&self, addr: usize) -> AddressError {
        AddressError::OutOfBounds { addr, len: self.cells.len() }
    }
}
