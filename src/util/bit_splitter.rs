/// A structure for splitting an opcode into the fields
/// used by the instruction set: the four nibbles, the
/// low byte `kk` and the 12-bit address `nnn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {
    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    /// Combine the two bytes of an opcode, the first one being the high byte.
    pub fn new(high: u8, low: u8) -> BitSplitter {
        BitSplitter(high, low)
    }

    /// Left-shift the first component 8 bits,
    /// then take bitwise or with the second component.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    pub fn as_two_u8(&self) -> (u8, u8) {
        (self.0, self.1)
    }

    /// All four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.0 >> 4, self.x(), self.y(), self.n())
    }

    /// Second nibble, usually a register.
    pub fn x(&self) -> u8 {
        self.0 & 0x0F
    }

    /// Third nibble, usually a register.
    pub fn y(&self) -> u8 {
        self.1 >> 4
    }

    /// Lowest nibble.
    pub fn n(&self) -> u8 {
        self.1 & 0x0F
    }

    pub fn kk(&self) -> u8 {
        self.1
    }

    pub fn nnn(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nibbles_are_split_in_order() {
        assert_eq!((0xA, 0xB, 0xC, 0xD), BitSplitter::from_u16(0xABCD).as_four_u8());
        assert_eq!((0x0, 0x0, 0xE, 0x0), BitSplitter::from_u16(0x00E0).as_four_u8());
    }

    #[test]
    fn fields_are_masked() {
        let opcode = BitSplitter::from_u16(0xD12F);
        assert_eq!(opcode.x(), 0x1);
        assert_eq!(opcode.y(), 0x2);
        assert_eq!(opcode.n(), 0xF);
        assert_eq!(opcode.kk(), 0x2F);
        assert_eq!(opcode.nnn(), 0x12F);
    }

    #[test]
    fn new_reads_big_endian() {
        assert_eq!(BitSplitter::new(0x12, 0x34).as_u16(), 0x1234);
        assert_eq!(BitSplitter::from_u16(0xF0F0).as_two_u8(), (0xF0, 0xF0));
    }

    proptest! {
        #[test]
        fn u16_survives_splitting(value in any::<u16>()) {
            let (high, low) = BitSplitter::from_u16(value).as_two_u8();
            prop_assert_eq!(BitSplitter::new(high, low).as_u16(), value);
        }
    }
}
