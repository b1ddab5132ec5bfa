//! Simulator for a subset of RV32I written as text, one line at a time.
//!
//! ```
//! use text_rv_simulator::core::Core;
//! use text_rv_simulator::register::RegisterFile;
//!
//! let mut core = Core::init(RegisterFile::new());
//! core.step("addi x5,x0,10");
//! core.step("sw x5,0(x0)");
//! core.step("lw x6,0(x0)");
//! assert_eq!(core.get_int_register(6), 10);
//! core.end();
//! ```

pub mod chain;
pub mod core;
pub mod decoder;
pub mod hash_table;
pub mod instruction;
pub mod memory;
pub mod program_loader;
pub mod register;
pub mod types;
pub mod utils;
