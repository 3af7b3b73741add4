//! # EVM Opcodes
//!
//! Byte values and metadata for the instructions this core executes.

use crate::errors::VmError;
use std::fmt;

/// EVM Opcode enumeration.
///
/// Covers arithmetic, comparison/bitwise, hashing, memory, storage and stack
/// instructions. Control flow, environment, logging and system opcodes are
/// handled outside this crate and do not decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // 0x01 - Arithmetic
    Add = 0x01,
    Mul = 0x02,
    Sub = 0x03,
    Div = 0x04,
    SDiv = 0x05,
    Mod = 0x06,
    SMod = 0x07,
    AddMod = 0x08,
    MulMod = 0x09,
    Exp = 0x0A,
    SignExtend = 0x0B,

    // 0x10 - Comparison & Bitwise
    Lt = 0x10,
    Gt = 0x11,
    SLt = 0x12,
    SGt = 0x13,
    Eq = 0x14,
    IsZero = 0x15,
    And = 0x16,
    Or = 0x17,
    Xor = 0x18,
    Not = 0x19,
    Byte = 0x1A,
    Shl = 0x1B,
    Shr = 0x1C,
    Sar = 0x1D,

    // 0x20 - Keccak256
    Keccak256 = 0x20,

    // 0x50 - Stack, Memory, Storage
    Pop = 0x50,
    MLoad = 0x51,
    MStore = 0x52,
    MStore8 = 0x53,
    SLoad = 0x54,
    SStore = 0x55,
    MSize = 0x59,

    // 0x5F - Push0 (EIP-3855)
    Push0 = 0x5F,

    // 0x60-0x7F - Push
    Push1 = 0x60,
    Push2 = 0x61,
    Push3 = 0x62,
    Push4 = 0x63,
    Push5 = 0x64,
    Push6 = 0x65,
    Push7 = 0x66,
    Push8 = 0x67,
    Push9 = 0x68,
    Push10 = 0x69,
    Push11 = 0x6A,
    Push12 = 0x6B,
    Push13 = 0x6C,
    Push14 = 0x6D,
    Push15 = 0x6E,
    Push16 = 0x6F,
    Push17 = 0x70,
    Push18 = 0x71,
    Push19 = 0x72,
    Push20 = 0x73,
    Push21 = 0x74,
    Push22 = 0x75,
    Push23 = 0x76,
    Push24 = 0x77,
    Push25 = 0x78,
    Push26 = 0x79,
    Push27 = 0x7A,
    Push28 = 0x7B,
    Push29 = 0x7C,
    Push30 = 0x7D,
    Push31 = 0x7E,
    Push32 = 0x7F,

    // 0x80-0x8F - Dup
    Dup1 = 0x80,
    Dup2 = 0x81,
    Dup3 = 0x82,
    Dup4 = 0x83,
    Dup5 = 0x84,
    Dup6 = 0x85,
    Dup7 = 0x86,
    Dup8 = 0x87,
    Dup9 = 0x88,
    Dup10 = 0x89,
    Dup11 = 0x8A,
    Dup12 = 0x8B,
    Dup13 = 0x8C,
    Dup14 = 0x8D,
    Dup15 = 0x8E,
    Dup16 = 0x8F,

    // 0x90-0x9F - Swap
    Swap1 = 0x90,
    Swap2 = 0x91,
    Swap3 = 0x92,
    Swap4 = 0x93,
    Swap5 = 0x94,
    Swap6 = 0x95,
    Swap7 = 0x96,
    Swap8 = 0x97,
    Swap9 = 0x98,
    Swap10 = 0x99,
    Swap11 = 0x9A,
    Swap12 = 0x9B,
    Swap13 = 0x9C,
    Swap14 = 0x9D,
    Swap15 = 0x9E,
    Swap16 = 0x9F,
}

/// PUSH1..PUSH32, indexed by operand size minus one.
const PUSH_OPCODES: [Opcode; 32] = [
    Opcode::Push1,
    Opcode::Push2,
    Opcode::Push3,
    Opcode::Push4,
    Opcode::Push5,
    Opcode::Push6,
    Opcode::Push7,
    Opcode::Push8,
    Opcode::Push9,
    Opcode::Push10,
    Opcode::Push11,
    Opcode::Push12,
    Opcode::Push13,
    Opcode::Push14,
    Opcode::Push15,
    Opcode::Push16,
    Opcode::Push17,
    Opcode::Push18,
    Opcode::Push19,
    Opcode::Push20,
    Opcode::Push21,
    Opcode::Push22,
    Opcode::Push23,
    Opcode::Push24,
    Opcode::Push25,
    Opcode::Push26,
    Opcode::Push27,
    Opcode::Push28,
    Opcode::Push29,
    Opcode::Push30,
    Opcode::Push31,
    Opcode::Push32,
];

/// DUP1..DUP16, indexed by depth minus one.
const DUP_OPCODES: [Opcode; 16] = [
    Opcode::Dup1,
    Opcode::Dup2,
    Opcode::Dup3,
    Opcode::Dup4,
    Opcode::Dup5,
    Opcode::Dup6,
    Opcode::Dup7,
    Opcode::Dup8,
    Opcode::Dup9,
    Opcode::Dup10,
    Opcode::Dup11,
    Opcode::Dup12,
    Opcode::Dup13,
    Opcode::Dup14,
    Opcode::Dup15,
    Opcode::Dup16,
];

/// SWAP1..SWAP16, indexed by N minus one.
const SWAP_OPCODES: [Opcode; 16] = [
    Opcode::Swap1,
    Opcode::Swap2,
    Opcode::Swap3,
    Opcode::Swap4,
    Opcode::Swap5,
    Opcode::Swap6,
    Opcode::Swap7,
    Opcode::Swap8,
    Opcode::Swap9,
    Opcode::Swap10,
    Opcode::Swap11,
    Opcode::Swap12,
    Opcode::Swap13,
    Opcode::Swap14,
    Opcode::Swap15,
    Opcode::Swap16,
];

impl Opcode {
    /// Try to decode an opcode from a byte.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::Add),
            0x02 => Some(Self::Mul),
            0x03 => Some(Self::Sub),
            0x04 => Some(Self::Div),
            0x05 => Some(Self::SDiv),
            0x06 => Some(Self::Mod),
            0x07 => Some(Self::SMod),
            0x08 => Some(Self::AddMod),
            0x09 => Some(Self::MulMod),
            0x0A => Some(Self::Exp),
            0x0B => Some(Self::SignExtend),

            0x10 => Some(Self::Lt),
            0x11 => Some(Self::Gt),
            0x12 => Some(Self::SLt),
            0x13 => Some(Self::SGt),
            0x14 => Some(Self::Eq),
            0x15 => Some(Self::IsZero),
            0x16 => Some(Self::And),
            0x17 => Some(Self::Or),
            0x18 => Some(Self::Xor),
            0x19 => Some(Self::Not),
            0x1A => Some(Self::Byte),
            0x1B => Some(Self::Shl),
            0x1C => Some(Self::Shr),
            0x1D => Some(Self::Sar),

            0x20 => Some(Self::Keccak256),

            0x50 => Some(Self::Pop),
            0x51 => Some(Self::MLoad),
            0x52 => Some(Self::MStore),
            0x53 => Some(Self::MStore8),
            0x54 => Some(Self::SLoad),
            0x55 => Some(Self::SStore),
            0x59 => Some(Self::MSize),
            0x5F => Some(Self::Push0),

            0x60..=0x7F => Some(PUSH_OPCODES[usize::from(byte - 0x60)]),
            0x80..=0x8F => Some(DUP_OPCODES[usize::from(byte - 0x80)]),
            0x90..=0x9F => Some(SWAP_OPCODES[usize::from(byte - 0x90)]),

            _ => None,
        }
    }

    /// PUSH opcode reading `size` immediate bytes (1..=32).
    #[must_use]
    pub fn push(size: usize) -> Option<Self> {
        size.checked_sub(1)
            .and_then(|i| PUSH_OPCODES.get(i))
            .copied()
    }

    /// DUP opcode for depth `n` (1..=16).
    #[must_use]
    pub fn dup(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| DUP_OPCODES.get(i)).copied()
    }

    /// SWAP opcode for `n` (1..=16).
    #[must_use]
    pub fn swap(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| SWAP_OPCODES.get(i)).copied()
    }

    /// The byte encoding.
    #[must_use]
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Get the number of bytes pushed for PUSH opcodes.
    #[must_use]
    pub fn push_size(self) -> Option<usize> {
        let byte = self as u8;
        if (0x60..=0x7F).contains(&byte) {
            Some(usize::from(byte - 0x5F))
        } else if self == Self::Push0 {
            Some(0)
        } else {
            None
        }
    }

    /// N for DUPN.
    #[must_use]
    pub fn dup_depth(self) -> Option<usize> {
        let byte = self as u8;
        (0x80..=0x8F)
            .contains(&byte)
            .then(|| usize::from(byte - 0x7F))
    }

    /// N for SWAPN.
    #[must_use]
    pub fn swap_depth(self) -> Option<usize> {
        let byte = self as u8;
        (0x90..=0x9F)
            .contains(&byte)
            .then(|| usize::from(byte - 0x8F))
    }

    /// Returns true if this is a PUSH opcode.
    #[must_use]
    pub fn is_push(self) -> bool {
        self.push_size().is_some()
    }

    /// Returns true if the handler moves `pc` itself (PUSH1..PUSH32).
    #[must_use]
    pub fn advances_pc(self) -> bool {
        matches!(self.push_size(), Some(size) if size > 0)
    }

    /// Upper-case mnemonic, e.g. `ADDMOD`.
    #[must_use]
    pub fn name(self) -> String {
        format!("{self:?}").to_uppercase()
    }
}

impl TryFrom<u8> for Opcode {
    type Error = VmError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_byte(byte).ok_or(VmError::InvalidOpcode(byte))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_from_byte() {
        assert_eq!(Opcode::from_byte(0x01), Some(Opcode::Add));
        assert_eq!(Opcode::from_byte(0x60), Some(Opcode::Push1));
        assert_eq!(Opcode::from_byte(0x7F), Some(Opcode::Push32));
        assert_eq!(Opcode::from_byte(0x80), Some(Opcode::Dup1));
        assert_eq!(Opcode::from_byte(0x9F), Some(Opcode::Swap16));
        assert_eq!(Opcode::from_byte(0x0C), None);
        // Control flow is not decoded here.
        assert_eq!(Opcode::from_byte(0x56), None);
    }

    #[test]
    fn test_every_byte_round_trips() {
        for byte in 0..=u8::MAX {
            if let Some(op) = Opcode::from_byte(byte) {
                assert_eq!(op.as_byte(), byte);
            }
        }
    }

    #[test]
    fn test_try_from() {
        assert_eq!(Opcode::try_from(0x20), Ok(Opcode::Keccak256));
        assert_eq!(Opcode::try_from(0xFF), Err(VmError::InvalidOpcode(0xFF)));
    }

    #[test]
    fn test_push_size() {
        assert_eq!(Opcode::Push0.push_size(), Some(0));
        assert_eq!(Opcode::Push1.push_size(), Some(1));
        assert_eq!(Opcode::Push32.push_size(), Some(32));
        assert_eq!(Opcode::Add.push_size(), None);
    }

    #[test]
    fn test_family_constructors() {
        assert_eq!(Opcode::push(1), Some(Opcode::Push1));
        assert_eq!(Opcode::push(32), Some(Opcode::Push32));
        assert_eq!(Opcode::push(0), None);
        assert_eq!(Opcode::push(33), None);

        assert_eq!(Opcode::dup(16), Some(Opcode::Dup16));
        assert_eq!(Opcode::dup(17), None);
        assert_eq!(Opcode::swap(1), Some(Opcode::Swap1));
        assert_eq!(Opcode::swap(0), None);

        assert_eq!(Opcode::Dup3.dup_depth(), Some(3));
        assert_eq!(Opcode::Swap16.swap_depth(), Some(16));
        assert_eq!(Opcode::Swap16.dup_depth(), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(Opcode::AddMod.name(), "ADDMOD");
        assert_eq!(Opcode::MStore8.to_string(), "MSTORE8");
        assert_eq!(Opcode::Keccak256.to_string(), "KECCAK256");
    }

    #[test]
    fn test_advances_pc() {
        assert!(Opcode::Push1.advances_pc());
        assert!(Opcode::Push32.advances_pc());
        assert!(Opcode::Push0.is_push());
        assert!(!Opcode::Push0.advances_pc());
        assert!(!Opcode::Dup1.advances_pc());
    }
}
