//! Small helpers that are not specific to the emulator.

pub mod bit_splitter;
