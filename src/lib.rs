/*!

The core of a CHIP-8 emulator as specified at https://en.wikipedia.org/wiki/CHIP-8.

The crate only contains the virtual machine: memory, registers, timers, the framebuffer
and the keypad. Drawing the framebuffer, reading the keyboard and pacing frames
is left to the application embedding it.

# Headless runner

To try the emulator on a program, there is a runner that executes it without a display
and prints the screen afterwards: `cargo run --release --bin headless -- <program>`.

# Library

The main way of running a program is to load it as bytes and step through it.

```rust
use chip_8_core::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let program = [0x6A, 0x05, 0x7A, 0x05, 0x3A, 0x0A];
emulator.load_program(&program).unwrap();
for _ in 0..3 {
    emulator.step().unwrap();
}
assert_eq!(emulator.registers()[0xA], 10);
assert_eq!(emulator.program_counter(), 0x208);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip_8_core::emulator::Emulator;
use chip_8_core::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(emulator.registers()[0xB], 35);
```

## Timers

By default both timers count down once per executed instruction.
Real hardware counts them down at 60 Hz regardless of how fast instructions run,
which you get by choosing `TimerMode::Decoupled` and running one frame at a time.

```rust
use chip_8_core::emulator::{Config, Emulator, TimerMode};

let mut emulator = Emulator::with_config(Config {
    timer_mode: TimerMode::Decoupled,
    ..Config::default()
});
emulator.load_program(&[0x60, 0x3C, 0xF0, 0x15, 0x12, 0x04]).unwrap();

// Ten instructions, then one timer tick
emulator.run_frame(10).unwrap();
assert_eq!(emulator.delay_timer(), 59);
```

## Input and output

Key presses are given to the emulator with `set_key` or `set_keys`,
and the screen is read back with `snapshot_video`.

```rust
use chip_8_core::emulator::Emulator;

let mut emulator = Emulator::new();
emulator.set_key(0xA, true).unwrap();
assert!(emulator.set_key(0x10, true).is_err());

let screen = emulator.snapshot_video();
assert!(!screen.get(0, 0));
print!("{}", screen);
```
*/

pub mod emulator;
pub mod util;
