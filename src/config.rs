//! Configuration constants for the Intcode VM and its runner.

// Memory
pub const MAX_DENSE_CELLS: usize = 1 << 24; // Dense stores fault past this; sparse stores have no limit
pub const MEMORY_HEADROOM: usize = 1024; // Zeroed cells reserved past a loaded program

// Runner
pub const DEFAULT_MAX_STEPS: u64 = 100_000_000; // Step budget before the CLI gives up on a program
pub const DEFAULT_MACHINE_ID: u32 = 1;

// Logging
pub const LOG_TARGET_VM: &str = "vm";
pub const LOG_TARGET_INSTRUCTIONS: &str = "instructions";
