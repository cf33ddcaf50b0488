// VM Register: the relative base used by relative addressing

use super::Cell;
use num_traits::Zero;

/// Relative base register, owned by exactly one VM instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelativeBase {
    value: Cell,
}

impl RelativeBase {
    pub fn new() -> Self {
        RelativeBase { value: Cell::zero() }
    }

    pub fn get(&self) -> &Cell {
        &self.value
    }

    /// Adds `delta` to the base; the only mutation the instruction set performs
    pub fn adjust(&mut self, delta: &Cell) {
        self.value += delta;
    }

    /// Relocates a raw operand against the current base
    pub fn offset(&self, raw: &Cell) -> Cell {
        raw + &self.value
    }

    pub fn reset(&mut self) {
        self.value = Cell::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_base_init() {
        let base = RelativeBase::new();
        assert_eq!(base.get(), &Cell::zero());
    }

    #[test]
    fn test_adjust_and_offset() {
        let mut base = RelativeBase::new();
        base.adjust(&Cell::from(100));
        base.adjust(&Cell::from(-25));
        assert_eq!(base.get(), &Cell::from(75));
        assert_eq!(base.offset(&Cell::from(-5)), Cell::from(70));

        base.reset();
        assert_eq!(base.offset(&Cell::from(-5)), Cell::from(-5));
    }
}
