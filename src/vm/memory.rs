// VM Memory: cell storage capability, dense and sparse stores, address conversion

use super::Cell;
use super::error::AddressError;
use crate::config;
use num_traits::{Signed, ToPrimitive, Zero};
use std::collections::BTreeMap;

/// Read/write capability over the VM's memory cells.
///
/// Addresses never written read back as zero. Writes extend the store as
/// needed; a store that cannot hold `address` reports `AddressError::Overflow`.
pub trait Memory {
    fn read(&self, address: usize) -> Cell;
    fn write(&mut self, address: usize, value: Cell) -> Result<(), AddressError>;
    /// Highest written address plus one, saturating at `usize::MAX`
    fn len(&self) -> usize;
    /// Stored cells in ascending address order
    fn entries(&self) -> Vec<(usize, Cell)>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Converts a resolved cell into a memory address
pub fn to_address(cell: &Cell) -> Result<usize, AddressError> {
    if cell.is_negative() {
        return Err(AddressError::Negative(cell.clone()));
    }
    cell.to_usize()
        .ok_or_else(|| AddressError::Overflow(cell.clone()))
}

/// Contiguous memory that grows on write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DenseMemory {
    cells: Vec<Cell>,
}

impl DenseMemory {
    pub fn new() -> Self {
        DenseMemory { cells: Vec::new() }
    }

    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }
}

impl Memory for DenseMemory {
    fn read(&self, address: usize) -> Cell {
        self.cells.get(address).cloned().unwrap_or_else(Cell::zero)
    }

    fn write(&mut self, address: usize, value: Cell) -> Result<(), AddressError> {
        if address >= self.cells.len() {
            let new_len = address
                .checked_add(1)
                .filter(|len| *len <= config::MAX_DENSE_CELLS)
                .ok_or_else(|| AddressError::Overflow(Cell::from(address)))?;
            self.cells.resize(new_len, Cell::zero());
        }
        self.cells[address] = value;
        Ok(())
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn entries(&self) -> Vec<(usize, Cell)> {
        self.cells.iter().cloned().enumerate().collect()
    }
}

impl From<Vec<Cell>> for DenseMemory {
    fn from(mut cells: Vec<Cell>) -> Self {
        cells.reserve(config::MEMORY_HEADROOM);
        DenseMemory { cells }
    }
}

/// Memory that only stores written cells, for programs touching far-apart addresses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseMemory {
    cells: BTreeMap<usize, Cell>,
}

impl SparseMemory {
    pub fn new() -> Self {
        SparseMemory {
            cells: BTreeMap::new(),
        }
    }
}

impl Memory for SparseMemory {
    fn read(&self, address: usize) -> Cell {
        self.cells.get(&address).cloned().unwrap_or_else(Cell::zero)
    }

    fn write(&mut self, address: usize, value: Cell) -> Result<(), AddressError> {
        if value.is_zero() {
            self.cells.remove(&address);
        } else {
            self.cells.insert(address, value);
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.cells
            .last_key_value()
            .map(|(address, _)| address.saturating_add(1))
            .unwrap_or(0)
    }

    fn entries(&self) -> Vec<(usize, Cell)> {
        self.cells
            .iter()
            .map(|(address, value)| (*address, value.clone()))
            .collect()
    }
}

impl From<Vec<Cell>> for SparseMemory {
    fn from(cells: Vec<Cell>) -> Self {
        SparseMemory {
            cells: cells
                .into_iter()
                .enumerate()
                .filter(|(_, value)| !value.is_zero())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_read_default_zero() {
        let memory = DenseMemory::from(vec![Cell::from(7)]);
        assert_eq!(memory.read(0), Cell::from(7));
        assert_eq!(memory.read(1), Cell::zero());
        assert_eq!(memory.read(10_000), Cell::zero());
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_dense_write_grows() {
        let mut memory = DenseMemory::new();
        assert!(memory.is_empty());
        memory.write(5, Cell::from(-9)).unwrap();
        assert_eq!(memory.len(), 6);
        assert_eq!(memory.read(5), Cell::from(-9));
        assert_eq!(memory.read(4), Cell::zero());
    }

    #[test]
    fn test_sparse_far_address() {
        let mut memory = SparseMemory::new();
        memory.write(1 << 40, Cell::from(3)).unwrap();
        assert_eq!(memory.read(1 << 40), Cell::from(3));
        assert_eq!(memory.read(12), Cell::zero());
        assert_eq!(memory.len(), (1 << 40) + 1);

        // Zero writes drop the entry
        memory.write(1 << 40, Cell::zero()).unwrap();
        assert!(memory.is_empty());
    }

    #[test]
    fn test_dense_write_past_limit_fails() {
        let mut memory = DenseMemory::new();
        for address in [usize::MAX, config::MAX_DENSE_CELLS] {
            assert_eq!(
                memory.write(address, Cell::from(1)),
                Err(AddressError::Overflow(Cell::from(address)))
            );
        }
        assert!(memory.is_empty());
    }

    #[test]
    fn test_sparse_last_address() {
        let mut memory = SparseMemory::new();
        memory.write(usize::MAX, Cell::from(2)).unwrap();
        assert_eq!(memory.read(usize::MAX), Cell::from(2));
        assert_eq!(memory.len(), usize::MAX);
        assert_eq!(memory.entries(), vec![(usize::MAX, Cell::from(2))]);
    }

    #[test]
    fn test_entries() {
        let dense = DenseMemory::from(vec![Cell::from(4), Cell::zero()]);
        assert_eq!(dense.entries(), vec![(0, Cell::from(4)), (1, Cell::zero())]);

        let sparse = SparseMemory::from(vec![Cell::from(4), Cell::zero(), Cell::from(-1)]);
        assert_eq!(sparse.entries(), vec![(0, Cell::from(4)), (2, Cell::from(-1))]);
    }

    #[test]
    fn test_to_address() {
        assert_eq!(to_address(&Cell::from(105)), Ok(105));
        assert_eq!(
            to_address(&Cell::from(-1)),
            Err(AddressError::Negative(Cell::from(-1)))
        );
        let huge = Cell::from(u64::MAX) * Cell::from(u64::MAX);
        assert_eq!(to_address(&huge), Err(AddressError::Overflow(huge.clone())));
    }
}
