//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

pub mod config;
pub mod display;
pub mod emulator;
pub mod error;
pub mod instruction;
pub mod state;

pub use config::{Config, ShiftSource, TimerMode};
pub use display::Framebuffer;
pub use emulator::Emulator;
pub use error::{CycleError, KeyError, LoadError};
