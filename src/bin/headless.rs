use std::path::PathBuf;

use structopt::StructOpt;

use chip_8_core::emulator::{Config, CycleError, Emulator, ShiftSource, TimerMode};

/// Run a CHIP-8 program without a display and print the final screen.
#[derive(StructOpt, Debug)]
#[structopt(name = "headless")]
struct Opt {
    /// Number of 60 Hz frames to run
    #[structopt(short, long, default_value = "600")]
    frames: usize,

    /// Instructions executed per frame
    #[structopt(short, long, default_value = "10")]
    cycles: usize,

    /// Shift Vy into Vx like the COSMAC VIP instead of shifting Vx in place
    #[structopt(long)]
    shift_vy: bool,

    /// Seed for the random number generator
    #[structopt(long)]
    seed: Option<u64>,

    /// Print a disassembly of the program before running it
    #[structopt(long)]
    disassemble: bool,

    /// Print every instruction as it is executed
    #[structopt(long)]
    trace: bool,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn disassemble(program: &[u8]) {
    use chip_8_core::emulator::instruction::Instruction;
    for (i, pair) in program.chunks(2).enumerate() {
        let address = 0x200 + 2 * i;
        match *pair {
            [high, low] => println!("{:#05X}: {:02X}{:02X}  {}", address, high, low, Instruction::from_two_u8(high, low)),
            [byte] => println!("{:#05X}: {:02X}", address, byte),
            _ => {}
        }
    }
}

/// Run one frame, printing each instruction before it executes.
fn traced_frame(emulator: &mut Emulator, cycles: usize) -> Result<(), CycleError> {
    for _ in 0..cycles {
        let pc = emulator.program_counter();
        println!("{:#05X}: {}", pc, emulator.current_instruction()?);
        emulator.step()?;
    }
    emulator.tick_timers();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    if opt.disassemble {
        disassemble(&program);
    }

    let config = Config {
        shift_source: if opt.shift_vy { ShiftSource::Vy } else { ShiftSource::Vx },
        timer_mode: TimerMode::Decoupled,
        seed: opt.seed,
    };

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_config(config);
    emulator.load_program(&program)?;

    // Start execution
    let mut outcome = Ok(());
    for frame in 0..opt.frames {
        let result = if opt.trace {
            traced_frame(&mut emulator, opt.cycles)
        } else {
            emulator.run_frame(opt.cycles)
        };
        if let Err(error) = result {
            log::error!("Stopped in frame {}", frame);
            outcome = Err(error);
            break;
        }
    }

    print!("{}", emulator.snapshot_video());
    outcome?;
    Ok(())
}
