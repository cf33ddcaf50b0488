pub mod config;
pub mod logging;
pub mod vm;

pub use vm::{Cell, Machine, Status, StepOutcome, VMFault};
