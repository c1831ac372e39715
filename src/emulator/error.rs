use thiserror::Error;

/// Failure to copy a program image into memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("program is {size} bytes, but only {max_size} bytes fit from 0x200")]
    ProgramTooLarge { size: usize, max_size: usize },
}

/// An invalid access to the state store, before it is tied to an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("address {address:#06X} is outside of memory")]
    AddressOutOfRange { address: usize },
    #[error("call stack is full")]
    StackOverflow,
    #[error("call stack is empty")]
    StackUnderflow,
}

impl AccessError {
    /// Attach the address of the instruction that caused the access.
    pub fn at(self, pc: u16) -> CycleError {
        match self {
            AccessError::AddressOutOfRange { address } => CycleError::AddressOutOfRange { address, pc },
            AccessError::StackOverflow => CycleError::StackOverflow { pc },
            AccessError::StackUnderflow => CycleError::StackUnderflow { pc },
        }
    }
}

/// A cycle that could not complete. `pc` is always the address
/// the failing instruction was fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("illegal instruction {opcode:#06X} at {pc:#05X}")]
    IllegalInstruction { opcode: u16, pc: u16 },
    #[error("call at {pc:#05X} exceeds the stack depth")]
    StackOverflow { pc: u16 },
    #[error("return at {pc:#05X} with an empty stack")]
    StackUnderflow { pc: u16 },
    #[error("address {address:#06X} is out of range at {pc:#05X}")]
    AddressOutOfRange { address: usize, pc: u16 },
}

/// A key index outside of the 16 key keypad.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key {0:#X} does not exist, keys are 0x0 to 0xF")]
pub struct KeyError(pub usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_errors_carry_the_program_counter() {
        assert_eq!(
            AccessError::AddressOutOfRange { address: 0x1000 }.at(0x204),
            CycleError::AddressOutOfRange { address: 0x1000, pc: 0x204 }
        );
        assert_eq!(AccessError::StackUnderflow.at(0x300), CycleError::StackUnderflow { pc: 0x300 });
    }

    #[test]
    fn messages_show_hex_addresses() {
        let error = CycleError::IllegalInstruction { opcode: 0xFFFF, pc: 0x200 };
        assert_eq!(error.to_string(), "illegal instruction 0xFFFF at 0x200");
    }
}
