//! All state of the virtual machine as described at
//! https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::display::Framebuffer;
use crate::emulator::error::{AccessError, KeyError, LoadError};

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const NUM_KEYS: usize = 16;
pub const PC_START: u16 = 0x200;
pub const FONT_START: u16 = 0x050;
/// Bytes per glyph in the font.
pub const GLYPH_SIZE: u16 = 5;
/// Largest program that fits between `PC_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PC_START as usize;

const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Memory, registers, stack, timers, screen and keypad of one machine.
#[derive(Clone)]
pub struct State {
    memory: [u8; MEM_SIZE],
    registers: [u8; NUM_REGISTERS],
    index: u16,
    program_counter: u16,
    stack: [u16; STACK_SIZE],
    /// Number of used stack slots.
    stack_pointer: usize,
    delay_timer: u8,
    sound_timer: u8,
    framebuffer: Framebuffer,
    keypad: [bool; NUM_KEYS],
}

impl State {
    /// Zeroed state with the font installed and the program counter at 0x200.
    pub fn new() -> State {
        let mut memory = [0; MEM_SIZE];
        let font_start = FONT_START as usize;
        memory[font_start..font_start + FONT.len()].copy_from_slice(&FONT);

        State {
            memory,
            registers: [0; NUM_REGISTERS],
            index: 0,
            program_counter: PC_START,
            stack: [0; STACK_SIZE],
            stack_pointer: 0,
            delay_timer: 0,
            sound_timer: 0,
            framebuffer: Framebuffer::new(),
            keypad: [false; NUM_KEYS],
        }
    }

    pub fn reset(&mut self) {
        *self = State::new();
    }

    /// Copy a program into memory at 0x200.
    /// Nothing is written if the program does not fit.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::ProgramTooLarge {
                size: program.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }
        let start = PC_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read_byte(&self, address: usize) -> Result<u8, AccessError> {
        self.memory
            .get(address)
            .copied()
            .ok_or(AccessError::AddressOutOfRange { address })
    }

    pub fn write_byte(&mut self, address: usize, value: u8) -> Result<(), AccessError> {
        let byte = self
            .memory
            .get_mut(address)
            .ok_or(AccessError::AddressOutOfRange { address })?;
        *byte = value;
        Ok(())
    }

    /// Borrow `len` bytes starting at `address`.
    /// The error names the first address past the end of memory that would be touched.
    pub fn read_slice(&self, address: usize, len: usize) -> Result<&[u8], AccessError> {
        let end = address + len;
        if end > MEM_SIZE {
            return Err(AccessError::AddressOutOfRange { address: MEM_SIZE.max(address) });
        }
        Ok(&self.memory[address..end])
    }

    /// Copy `bytes` into memory starting at `address`. Either all bytes are written or none.
    pub fn write_slice(&mut self, address: usize, bytes: &[u8]) -> Result<(), AccessError> {
        let end = address + bytes.len();
        if end > MEM_SIZE {
            return Err(AccessError::AddressOutOfRange { address: MEM_SIZE.max(address) });
        }
        self.memory[address..end].copy_from_slice(bytes);
        Ok(())
    }

    pub fn register(&self, x: usize) -> u8 {
        self.registers[x % NUM_REGISTERS]
    }

    pub fn set_register(&mut self, x: usize, value: u8) {
        self.registers[x % NUM_REGISTERS] = value;
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    /// Set the VF flag register.
    pub fn set_flag(&mut self, flag: bool) {
        self.registers[0xF] = flag as u8;
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn set_index(&mut self, index: u16) {
        self.index = index;
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn set_program_counter(&mut self, address: u16) {
        self.program_counter = address;
    }

    /// Move the program counter past the next instruction.
    pub fn skip(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(2);
    }

    pub fn push(&mut self, address: u16) -> Result<(), AccessError> {
        let slot = self
            .stack
            .get_mut(self.stack_pointer)
            .ok_or(AccessError::StackOverflow)?;
        *slot = address;
        self.stack_pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, AccessError> {
        if self.stack_pointer == 0 {
            return Err(AccessError::StackUnderflow);
        }
        self.stack_pointer -= 1;
        Ok(self.stack[self.stack_pointer])
    }

    pub fn stack_depth(&self) -> usize {
        self.stack_pointer
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer = value;
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer = value;
    }

    /// Count both timers down by one, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub fn set_key(&mut self, key: usize, down: bool) -> Result<(), KeyError> {
        let state = self.keypad.get_mut(key).ok_or(KeyError(key))?;
        *state = down;
        Ok(())
    }

    pub fn set_keys(&mut self, keys: [bool; NUM_KEYS]) {
        self.keypad = keys;
    }

    /// Whether `key` is held down. Keys that do not exist are never down.
    pub fn key_state(&self, key: usize) -> bool {
        self.keypad.get(key).copied().unwrap_or(false)
    }

    /// The lowest key that is held down, if any.
    pub fn first_key_down(&self) -> Option<u8> {
        self.keypad.iter().position(|down| *down).map(|key| key as u8)
    }

    pub fn snapshot_video(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_is_installed_at_0x50() {
        let state = State::new();
        assert_eq!(state.read_slice(0x50, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(state.read_slice(0x9B, 5).unwrap(), &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
        assert_eq!(state.read_byte(0xA0), Ok(0));
        assert_eq!(state.program_counter(), 0x200);
    }

    #[test]
    fn program_is_loaded_at_0x200() {
        let mut state = State::new();
        state.load_program(&[0x12, 0x34]).unwrap();
        assert_eq!(state.read_byte(0x200), Ok(0x12));
        assert_eq!(state.read_byte(0x201), Ok(0x34));
    }

    #[test]
    fn largest_program_fits() {
        let mut state = State::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE];
        assert_eq!(state.load_program(&program), Ok(()));
        assert_eq!(state.read_byte(0xFFF), Ok(0xAB));
    }

    #[test]
    fn too_large_program_is_rejected_without_changes() {
        let mut state = State::new();
        state.load_program(&[0x60, 0x01]).unwrap();
        let program = vec![0xFF; MAX_PROGRAM_SIZE + 1];
        assert_eq!(
            state.load_program(&program),
            Err(LoadError::ProgramTooLarge { size: 3585, max_size: 3584 })
        );
        assert_eq!(state.read_byte(0x200), Ok(0x60));
        assert_eq!(state.read_byte(0x202), Ok(0x00));
    }

    #[test]
    fn memory_access_is_bounds_checked() {
        let mut state = State::new();
        assert_eq!(state.read_byte(0x1000), Err(AccessError::AddressOutOfRange { address: 0x1000 }));
        assert_eq!(state.write_byte(0x1000, 1), Err(AccessError::AddressOutOfRange { address: 0x1000 }));
        assert_eq!(state.read_slice(0xFFE, 3), Err(AccessError::AddressOutOfRange { address: 0x1000 }));
        assert_eq!(state.write_slice(0xFFF, &[1, 2]), Err(AccessError::AddressOutOfRange { address: 0x1000 }));
        assert_eq!(state.read_byte(0xFFE), Ok(0));
    }

    #[test]
    fn slice_errors_name_first_invalid_address() {
        let state = State::new();
        assert_eq!(state.read_slice(0xFFA, 16), Err(AccessError::AddressOutOfRange { address: 0x1000 }));
        assert_eq!(state.read_slice(0x10FE, 3), Err(AccessError::AddressOutOfRange { address: 0x10FE }));
    }

    #[test]
    fn stack_holds_sixteen_addresses() {
        let mut state = State::new();
        assert_eq!(state.pop(), Err(AccessError::StackUnderflow));
        for i in 0..STACK_SIZE as u16 {
            state.push(0x200 + 2 * i).unwrap();
        }
        assert_eq!(state.push(0x300), Err(AccessError::StackOverflow));
        assert_eq!(state.stack_depth(), 16);
        assert_eq!(state.pop(), Ok(0x21E));
        assert_eq!(state.stack_depth(), 15);
    }

    #[test]
    fn timers_stop_at_zero() {
        let mut state = State::new();
        state.set_delay_timer(2);
        state.set_sound_timer(1);
        state.tick_timers();
        assert_eq!((state.delay_timer(), state.sound_timer()), (1, 0));
        state.tick_timers();
        state.tick_timers();
        assert_eq!((state.delay_timer(), state.sound_timer()), (0, 0));
    }

    #[test]
    fn keys_are_bounds_checked() {
        let mut state = State::new();
        assert_eq!(state.set_key(0xF, true), Ok(()));
        assert_eq!(state.set_key(0x10, true), Err(KeyError(0x10)));
        assert!(state.key_state(0xF));
        assert!(!state.key_state(0x10));
        assert_eq!(state.first_key_down(), Some(0xF));
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut state = State::new();
        state.load_program(&[0xFF; 10]).unwrap();
        state.set_register(3, 9);
        state.push(0x400).unwrap();
        state.set_program_counter(0x300);
        state.framebuffer_mut().draw_sprite(0, 0, &[0xFF]);
        state.reset();
        assert_eq!(state.read_byte(0x200), Ok(0));
        assert_eq!(state.register(3), 0);
        assert_eq!(state.stack_depth(), 0);
        assert_eq!(state.program_counter(), 0x200);
        assert_eq!(state.snapshot_video().lit(), 0);
        assert_eq!(state.read_byte(0x50), Ok(0xF0));
    }

    #[test]
    fn instances_do_not_share_memory() {
        let mut a = State::new();
        let b = State::new();
        a.write_byte(0x300, 7).unwrap();
        assert_eq!(b.read_byte(0x300), Ok(0));
    }
}
