//! The CHIP-8 interpreter: fetching, decoding and executing instructions.

use crate::emulator::config::{Config, ShiftSource, TimerMode};
use crate::emulator::display::Framebuffer;
use crate::emulator::error::{CycleError, KeyError, LoadError};
use crate::emulator::instruction::*;
use crate::emulator::state::{State, FONT_START, GLYPH_SIZE, NUM_KEYS, NUM_REGISTERS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct Emulator {
    state: State,
    config: Config,
    rng: StdRng,
}

impl Emulator {
    /// Create a new emulator with the default configuration
    pub fn new() -> Emulator {
        Emulator::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Emulator {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Emulator {
            state: State::new(),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Clear all state and move the program counter back to 0x200.
    pub fn reset(&mut self) {
        log::debug!("Resetting emulator");
        self.state.reset();
    }

    /// Copy a program into memory at 0x200.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.state.load_program(program)?;
        log::debug!("Loaded program of {} bytes", program.len());
        Ok(())
    }

    /// Perform a single cycle: fetch and execute an instruction,
    /// then update the timers if they follow the instruction rate.
    pub fn step(&mut self) -> Result<(), CycleError> {
        let pc = self.state.program_counter();
        let result = self.fetch().and_then(|instruction| {
            log::trace!("{:#05X}: {}", pc, instruction);
            self.execute(instruction, pc)
        });

        if let Err(error) = &result {
            log::warn!("Cycle failed: {}", error);
            return result;
        }

        if self.config.timer_mode == TimerMode::PerCycle {
            self.state.tick_timers();
        }

        Ok(())
    }

    /// Run up to `cycles` steps, then tick the timers once if they are decoupled.
    /// Meant to be called once per 60 Hz frame.
    pub fn run_frame(&mut self, cycles: usize) -> Result<(), CycleError> {
        for _ in 0..cycles {
            self.step()?;
        }
        if self.config.timer_mode == TimerMode::Decoupled {
            self.state.tick_timers();
        }
        Ok(())
    }

    /// Count both timers down by one.
    pub fn tick_timers(&mut self) {
        self.state.tick_timers();
    }

    /// Decode the instruction at the program counter without moving past it.
    /// Each opcode is two bytes, the first one being the most significant.
    pub fn current_instruction(&self) -> Result<Instruction, CycleError> {
        let pc = self.state.program_counter();
        match self.state.read_slice(pc as usize, 2) {
            Ok(bytes) => Ok(Instruction::from_two_u8(bytes[0], bytes[1])),
            Err(error) => Err(error.at(pc)),
        }
    }

    /// Read the instruction at the program counter and move past it.
    fn fetch(&mut self) -> Result<Instruction, CycleError> {
        let instruction = self.current_instruction()?;
        self.state.skip();
        Ok(instruction)
    }

    /// Execute a single instruction as if it was fetched from the current program counter.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), CycleError> {
        let pc = self.state.program_counter();
        self.execute(instruction, pc)
    }

    /// Execute instructions in order, stopping at the first failure.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), CycleError> {
        instructions
            .iter()
            .try_for_each(|instruction| self.execute_single(*instruction))
    }

    /// Execute an instruction fetched from `pc`.
    fn execute(&mut self, instruction: Instruction, pc: u16) -> Result<(), CycleError> {
        let state = &mut self.state;
        match instruction {
            Instruction::ClearScreen => state.framebuffer_mut().clear(),

            // Return to the previous call site via the stack
            Instruction::Return => {
                let address = state.pop().map_err(|e| e.at(pc))?;
                state.set_program_counter(address);
            }

            Instruction::Goto(Addr(addr)) => state.set_program_counter(addr),

            // Store the address of the next instruction, then jump
            Instruction::Call(Addr(addr)) => {
                let return_address = state.program_counter();
                state.push(return_address).map_err(|e| e.at(pc))?;
                state.set_program_counter(addr);
            }

            Instruction::IfRegEqConst(x, Const(n)) => {
                if state.register(x.index()) == n {
                    state.skip();
                }
            }

            Instruction::IfRegNeqConst(x, Const(n)) => {
                if state.register(x.index()) != n {
                    state.skip();
                }
            }

            Instruction::IfRegEqReg(x, y) => {
                if state.register(x.index()) == state.register(y.index()) {
                    state.skip();
                }
            }

            Instruction::SetRegToConst(x, Const(n)) => state.set_register(x.index(), n),

            // Wraps around, VF is left alone
            Instruction::IncRegByConst(x, Const(n)) => {
                let value = state.register(x.index()).wrapping_add(n);
                state.set_register(x.index(), value);
            }

            Instruction::SetRegToReg(x, y) => state.set_register(x.index(), state.register(y.index())),

            Instruction::BitwiseOr(x, y) => {
                let value = state.register(x.index()) | state.register(y.index());
                state.set_register(x.index(), value);
            }

            Instruction::BitwiseAnd(x, y) => {
                let value = state.register(x.index()) & state.register(y.index());
                state.set_register(x.index(), value);
            }

            Instruction::BitwiseXor(x, y) => {
                let value = state.register(x.index()) ^ state.register(y.index());
                state.set_register(x.index(), value);
            }

            // VF is 1 on carry. Flags are written before the result,
            // so VF as a destination holds the result.
            Instruction::IncRegByReg(x, y) => {
                let (value, carry) = state.register(x.index()).overflowing_add(state.register(y.index()));
                state.set_flag(carry);
                state.set_register(x.index(), value);
            }

            // VF is 1 when there is no borrow
            Instruction::DecRegByReg(x, y) => {
                let (vx, vy) = (state.register(x.index()), state.register(y.index()));
                state.set_flag(vx >= vy);
                state.set_register(x.index(), vx.wrapping_sub(vy));
            }

            Instruction::BitshiftRight(x, y) => {
                let value = state.register(self.config.shift_source.pick(x, y).index());
                state.set_flag(value & 1 == 1);
                state.set_register(x.index(), value >> 1);
            }

            Instruction::SetVxVyMinusVx(x, y) => {
                let (vx, vy) = (state.register(x.index()), state.register(y.index()));
                state.set_flag(vy >= vx);
                state.set_register(x.index(), vy.wrapping_sub(vx));
            }

            Instruction::BitshiftLeft(x, y) => {
                let value = state.register(self.config.shift_source.pick(x, y).index());
                state.set_flag((value >> 7) & 1 == 1);
                state.set_register(x.index(), value << 1);
            }

            Instruction::IfRegNeqReg(x, y) => {
                if state.register(x.index()) != state.register(y.index()) {
                    state.skip();
                }
            }

            Instruction::SetI(Addr(addr)) => state.set_index(addr),

            // The target may end up outside of memory, which the next fetch reports
            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                state.set_program_counter(addr.wrapping_add(state.register(0) as u16));
            }

            Instruction::SetVxRand(x, Const(n)) => {
                let value = self.rng.gen::<u8>() & n;
                state.set_register(x.index(), value);
            }

            Instruction::Draw(x, y, Const(sprite_height)) => {
                let x_coord = state.register(x.index()) as usize;
                let y_coord = state.register(y.index()) as usize;

                // Each sprite row is 8 bits
                let sprite = state
                    .read_slice(state.index() as usize, sprite_height as usize)
                    .map_err(|e| e.at(pc))?
                    .to_vec();

                state.set_flag(false);
                let collision = state.framebuffer_mut().draw_sprite(x_coord, y_coord, &sprite);
                state.set_flag(collision);
            }

            Instruction::IfKeyEqVx(x) => {
                if state.key_state(state.register(x.index()) as usize) {
                    state.skip();
                }
            }

            Instruction::IfKeyNeqVx(x) => {
                if !state.key_state(state.register(x.index()) as usize) {
                    state.skip();
                }
            }

            Instruction::SetRegToDelayTimer(x) => state.set_register(x.index(), state.delay_timer()),

            // Wait for a key by running this instruction again until one is down
            Instruction::SetRegToGetKey(x) => match state.first_key_down() {
                Some(key) => state.set_register(x.index(), key),
                None => state.set_program_counter(pc),
            },

            Instruction::SetDelayTimerToReg(x) => state.set_delay_timer(state.register(x.index())),

            Instruction::SetSoundTimerToReg(x) => state.set_sound_timer(state.register(x.index())),

            Instruction::AddRegToI(x) => {
                let index = state.index().wrapping_add(state.register(x.index()) as u16);
                state.set_index(index);
            }

            // Each glyph in the font is 5 bytes
            Instruction::SetIToSpriteAddrVx(x) => {
                let glyph = (state.register(x.index()) & 0x0F) as u16;
                state.set_index(FONT_START + GLYPH_SIZE * glyph);
            }

            Instruction::SetIToBcdOfReg(x) => {
                let value = state.register(x.index());
                let digits = [value / 100, (value / 10) % 10, value % 10];
                state
                    .write_slice(state.index() as usize, &digits)
                    .map_err(|e| e.at(pc))?;
            }

            // Dump register values up to Vx
            Instruction::RegDump(x) => {
                let registers = &state.registers()[..=x.index()];
                let registers = registers.to_vec();
                state
                    .write_slice(state.index() as usize, &registers)
                    .map_err(|e| e.at(pc))?;
            }

            // Load register values up to Vx
            Instruction::RegLoad(x) => {
                let values = state
                    .read_slice(state.index() as usize, x.index() + 1)
                    .map_err(|e| e.at(pc))?
                    .to_vec();
                for (reg_no, value) in values.into_iter().enumerate() {
                    state.set_register(reg_no, value);
                }
            }

            Instruction::Unknown(opcode) => {
                return Err(CycleError::IllegalInstruction { opcode, pc });
            }
        };

        Ok(())
    }

    pub fn snapshot_video(&self) -> &Framebuffer {
        self.state.snapshot_video()
    }

    pub fn set_key(&mut self, key: usize, down: bool) -> Result<(), KeyError> {
        self.state.set_key(key, down)
    }

    /// Replace the state of all keys at once, usually once per frame.
    pub fn set_keys(&mut self, keys: [bool; NUM_KEYS]) {
        self.state.set_keys(keys);
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer()
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer()
    }

    /// Whether a frontend should be playing a tone.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer() > 0
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        self.state.registers()
    }

    pub fn index(&self) -> u16 {
        self.state.index()
    }

    pub fn program_counter(&self) -> u16 {
        self.state.program_counter()
    }

    pub fn stack_depth(&self) -> usize {
        self.state.stack_depth()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShiftSource {
    fn pick(self, x: Reg, y: Reg) -> Reg {
        match self {
            ShiftSource::Vx => x,
            ShiftSource::Vy => y,
        }
    }
}
