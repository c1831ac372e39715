use crate::util::bit_splitter::BitSplitter;
use std::fmt;

/// A wrapper for 12-bit addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers. Only the lowest nibble selects the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

impl Reg {
    /// The register number as an index into the register file.
    pub fn index(self) -> usize {
        (self.0 & 0x0F) as usize
    }
}

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
///
/// Bit patterns that match none of the documented instructions
/// decode to `Unknown`, which keeps the raw opcode for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg, Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg, Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
    Unknown(u16),
}

impl Instruction {
    pub fn from_u16(value: u16) -> Instruction {
        let (high, low) = BitSplitter::from_u16(value).as_two_u8();
        Instruction::from_two_u8(high, low)
    }

    /// Decode an opcode stored as two bytes, high byte first.
    pub fn from_two_u8(high: u8, low: u8) -> Instruction {
        let opcode = BitSplitter::new(high, low);
        let addr = Addr(opcode.nnn());
        let kk = Const(opcode.kk());
        match opcode.as_four_u8() {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Goto(addr),
            (2, _, _, _) => Instruction::Call(addr),
            (3, x, _, _) => Instruction::IfRegEqConst(Reg(x), kk),
            (4, x, _, _) => Instruction::IfRegNeqConst(Reg(x), kk),
            (5, x, y, 0) => Instruction::IfRegEqReg(Reg(x), Reg(y)),
            (6, x, _, _) => Instruction::SetRegToConst(Reg(x), kk),
            (7, x, _, _) => Instruction::IncRegByConst(Reg(x), kk),
            (8, x, y, 0) => Instruction::SetRegToReg(Reg(x), Reg(y)),
            (8, x, y, 1) => Instruction::BitwiseOr(Reg(x), Reg(y)),
            (8, x, y, 2) => Instruction::BitwiseAnd(Reg(x), Reg(y)),
            (8, x, y, 3) => Instruction::BitwiseXor(Reg(x), Reg(y)),
            (8, x, y, 4) => Instruction::IncRegByReg(Reg(x), Reg(y)),
            (8, x, y, 5) => Instruction::DecRegByReg(Reg(x), Reg(y)),
            (8, x, y, 6) => Instruction::BitshiftRight(Reg(x), Reg(y)),
            (8, x, y, 7) => Instruction::SetVxVyMinusVx(Reg(x), Reg(y)),
            (8, x, y, 0xE) => Instruction::BitshiftLeft(Reg(x), Reg(y)),
            (9, x, y, 0) => Instruction::IfRegNeqReg(Reg(x), Reg(y)),
            (0xA, _, _, _) => Instruction::SetI(addr),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(addr),
            (0xC, x, _, _) => Instruction::SetVxRand(Reg(x), kk),
            (0xD, x, y, n) => Instruction::Draw(Reg(x), Reg(y), Const(n)),
            (0xE, x, 9, 0xE) => Instruction::IfKeyEqVx(Reg(x)),
            (0xE, x, 0xA, 1) => Instruction::IfKeyNeqVx(Reg(x)),
            (0xF, x, 0, 7) => Instruction::SetRegToDelayTimer(Reg(x)),
            (0xF, x, 0, 0xA) => Instruction::SetRegToGetKey(Reg(x)),
            (0xF, x, 1, 5) => Instruction::SetDelayTimerToReg(Reg(x)),
            (0xF, x, 1, 8) => Instruction::SetSoundTimerToReg(Reg(x)),
            (0xF, x, 1, 0xE) => Instruction::AddRegToI(Reg(x)),
            (0xF, x, 2, 9) => Instruction::SetIToSpriteAddrVx(Reg(x)),
            (0xF, x, 3, 3) => Instruction::SetIToBcdOfReg(Reg(x)),
            (0xF, x, 5, 5) => Instruction::RegDump(Reg(x)),
            (0xF, x, 6, 5) => Instruction::RegLoad(Reg(x)),
            _ => Instruction::Unknown(opcode.as_u16()),
        }
    }
}

/// Disassembly in the conventional mnemonic syntax.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Goto(Addr(a)) => write!(f, "JP {:#05X}", a),
            Call(Addr(a)) => write!(f, "CALL {:#05X}", a),
            IfRegEqConst(x, Const(k)) => write!(f, "SE V{:X}, {:#04X}", x.0, k),
            IfRegNeqConst(x, Const(k)) => write!(f, "SNE V{:X}, {:#04X}", x.0, k),
            IfRegEqReg(x, y) => write!(f, "SE V{:X}, V{:X}", x.0, y.0),
            SetRegToConst(x, Const(k)) => write!(f, "LD V{:X}, {:#04X}", x.0, k),
            IncRegByConst(x, Const(k)) => write!(f, "ADD V{:X}, {:#04X}", x.0, k),
            SetRegToReg(x, y) => write!(f, "LD V{:X}, V{:X}", x.0, y.0),
            BitwiseOr(x, y) => write!(f, "OR V{:X}, V{:X}", x.0, y.0),
            BitwiseAnd(x, y) => write!(f, "AND V{:X}, V{:X}", x.0, y.0),
            BitwiseXor(x, y) => write!(f, "XOR V{:X}, V{:X}", x.0, y.0),
            IncRegByReg(x, y) => write!(f, "ADD V{:X}, V{:X}", x.0, y.0),
            DecRegByReg(x, y) => write!(f, "SUB V{:X}, V{:X}", x.0, y.0),
            BitshiftRight(x, y) => write!(f, "SHR V{:X}, V{:X}", x.0, y.0),
            SetVxVyMinusVx(x, y) => write!(f, "SUBN V{:X}, V{:X}", x.0, y.0),
            BitshiftLeft(x, y) => write!(f, "SHL V{:X}, V{:X}", x.0, y.0),
            IfRegNeqReg(x, y) => write!(f, "SNE V{:X}, V{:X}", x.0, y.0),
            SetI(Addr(a)) => write!(f, "LD I, {:#05X}", a),
            SetPcToV0PlusAddr(Addr(a)) => write!(f, "JP V0, {:#05X}", a),
            SetVxRand(x, Const(k)) => write!(f, "RND V{:X}, {:#04X}", x.0, k),
            Draw(x, y, Const(n)) => write!(f, "DRW V{:X}, V{:X}, {}", x.0, y.0, n),
            IfKeyEqVx(x) => write!(f, "SKP V{:X}", x.0),
            IfKeyNeqVx(x) => write!(f, "SKNP V{:X}", x.0),
            SetRegToDelayTimer(x) => write!(f, "LD V{:X}, DT", x.0),
            SetRegToGetKey(x) => write!(f, "LD V{:X}, K", x.0),
            SetDelayTimerToReg(x) => write!(f, "LD DT, V{:X}", x.0),
            SetSoundTimerToReg(x) => write!(f, "LD ST, V{:X}", x.0),
            AddRegToI(x) => write!(f, "ADD I, V{:X}", x.0),
            SetIToSpriteAddrVx(x) => write!(f, "LD F, V{:X}", x.0),
            SetIToBcdOfReg(x) => write!(f, "LD B, V{:X}", x.0),
            RegDump(x) => write!(f, "LD [I], V{:X}", x.0),
            RegLoad(x) => write!(f, "LD V{:X}, [I]", x.0),
            Unknown(opcode) => write!(f, "UNKNOWN {:#06X}", opcode),
        }
    }
}
