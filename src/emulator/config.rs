/// Which register the shift instructions (8XY6 and 8XYE) read before shifting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftSource {
    /// Shift Vx in place, as CHIP-48 and SUPER-CHIP do.
    Vx,
    /// Shift Vy into Vx, as the COSMAC VIP interpreter did.
    Vy,
}

/// How the delay and sound timers are counted down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Decrement once after every successfully executed instruction.
    PerCycle,
    /// Only decrement when `tick_timers` is called, normally at 60 Hz.
    Decoupled,
}

/// Behaviour switches for an emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub shift_source: ShiftSource,
    pub timer_mode: TimerMode,
    /// Seed for the random number generator, entropy if `None`.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shift_source: ShiftSource::Vx,
            timer_mode: TimerMode::PerCycle,
            seed: None,
        }
    }
}
