//! Instruction Table.
//!
//! Static bijection between mnemonics and opcode bytes, plus the two
//! classifications derived from it:
//! 1. **Arity:** whether an instruction consumes a following one-byte address operand.
//! 2. **Display Category:** how the assembler tags the opcode cell (simple, operand, vector).
//!
//! Both classifications come from three closed membership sets. An
//! instruction takes an operand iff it is in the operand set and not in the
//! simple set. The display category checks vector membership first, then the
//! operand set, then the simple set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::IsaError;

/// One case per machine instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mnemonic {
    /// No operation.
    Nop,
    /// Store AC to memory.
    Sta,
    /// Load memory into AC.
    Lda,
    /// Add memory to AC.
    Add,
    /// Bitwise OR memory into AC.
    Or,
    /// Bitwise AND memory into AC.
    And,
    /// Complement AC.
    Not,
    /// Unconditional jump.
    Jmp,
    /// Jump if N is set.
    Jn,
    /// Jump if Z is set.
    Jz,
    /// Halt.
    Hlt,
    /// Load four bytes into VAC.
    Vld,
    /// Store VAC to four bytes.
    Vst,
    /// Lane-wise add of memory into VAC.
    Vadd,
    /// Add AC to every VAC lane.
    Veadd,
    /// Lane-wise OR of memory into VAC.
    Vor,
    /// Lane-wise AND of memory into VAC.
    Vand,
    /// Complement every VAC lane.
    Vnot,
}

/// Whether an instruction is followed by an address byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Arity {
    /// No operand; the instruction occupies one cell.
    Implied,
    /// One-byte address operand; the instruction occupies two cells.
    Address,
}

/// Display classification attached to assembled opcode cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Scalar instruction without an operand.
    Simple,
    /// Scalar instruction with an address operand.
    Operand,
    /// Vector-unit instruction.
    Vector,
}

/// Coarse instruction grouping used for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Group {
    /// Memory to AC transfer (LDA).
    Load,
    /// AC to memory transfer (STA).
    Store,
    /// Scalar arithmetic and logic (ADD, OR, AND, NOT).
    Alu,
    /// Control transfer (JMP, JN, JZ).
    Branch,
    /// Any vector-unit instruction.
    Vector,
    /// NOP and HLT.
    System,
}

/// Instructions that name an address operand.
const OPERAND_SET: [Mnemonic; 13] = [
    Mnemonic::Sta,
    Mnemonic::Lda,
    Mnemonic::Add,
    Mnemonic::Or,
    Mnemonic::And,
    Mnemonic::Jmp,
    Mnemonic::Jn,
    Mnemonic::Jz,
    Mnemonic::Vld,
    Mnemonic::Vst,
    Mnemonic::Vadd,
    Mnemonic::Vor,
    Mnemonic::Vand,
];

/// Instructions executed by the vector unit.
const VECTOR_SET: [Mnemonic; 7] = [
    Mnemonic::Vld,
    Mnemonic::Vst,
    Mnemonic::Vadd,
    Mnemonic::Veadd,
    Mnemonic::Vor,
    Mnemonic::Vand,
    Mnemonic::Vnot,
];

/// Instructions that never take an operand.
const SIMPLE_SET: [Mnemonic; 5] = [
    Mnemonic::Nop,
    Mnemonic::Hlt,
    Mnemonic::Not,
    Mnemonic::Veadd,
    Mnemonic::Vnot,
];

impl Mnemonic {
    /// Every mnemonic in opcode order.
    pub const ALL: [Self; 18] = [
        Self::Nop,
        Self::Sta,
        Self::Lda,
        Self::Add,
        Self::Or,
        Self::And,
        Self::Not,
        Self::Jmp,
        Self::Jn,
        Self::Jz,
        Self::Hlt,
        Self::Vld,
        Self::Vst,
        Self::Vadd,
        Self::Veadd,
        Self::Vor,
        Self::Vand,
        Self::Vnot,
    ];

    /// Returns the opcode byte.
    pub const fn opcode(self) -> u8 {
        match self {
            Self::Nop => 0,
            Self::Sta => 16,
            Self::Lda => 32,
            Self::Add => 48,
            Self::Or => 64,
            Self::And => 80,
            Self::Not => 96,
            Self::Jmp => 128,
            Self::Jn => 144,
            Self::Jz => 160,
            Self::Hlt => 240,
            Self::Vld => 241,
            Self::Vst => 242,
            Self::Vadd => 243,
            Self::Veadd => 244,
            Self::Vor => 245,
            Self::Vand => 246,
            Self::Vnot => 247,
        }
    }

    /// Decodes an opcode byte. Returns `None` for bytes outside the opcode space.
    pub const fn from_opcode(opcode: u8) -> Option<Self> {
        Some(match opcode {
            0 => Self::Nop,
            16 => Self::Sta,
            32 => Self::Lda,
            48 => Self::Add,
            64 => Self::Or,
            80 => Self::And,
            96 => Self::Not,
            128 => Self::Jmp,
            144 => Self::Jn,
            160 => Self::Jz,
            240 => Self::Hlt,
            241 => Self::Vld,
            242 => Self::Vst,
            243 => Self::Vadd,
            244 => Self::Veadd,
            245 => Self::Vor,
            246 => Self::Vand,
            247 => Self::Vnot,
            _ => return None,
        })
    }

    /// Returns the canonical uppercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Sta => "STA",
            Self::Lda => "LDA",
            Self::Add => "ADD",
            Self::Or => "OR",
            Self::And => "AND",
            Self::Not => "NOT",
            Self::Jmp => "JMP",
            Self::Jn => "JN",
            Self::Jz => "JZ",
            Self::Hlt => "HLT",
            Self::Vld => "VLD",
            Self::Vst => "VST",
            Self::Vadd => "VADD",
            Self::Veadd => "VEADD",
            Self::Vor => "VOR",
            Self::Vand => "VAND",
            Self::Vnot => "VNOT",
        }
    }

    /// Looks up an exact uppercase name.
    ///
    /// The assembler uppercases the candidate token before calling this.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Returns whether the instruction consumes an address operand.
    pub fn arity(self) -> Arity {
        if OPERAND_SET.contains(&self) && !SIMPLE_SET.contains(&self) {
            Arity::Address
        } else {
            Arity::Implied
        }
    }

    /// Returns the display category of the opcode cell.
    pub fn category(self) -> Category {
        if VECTOR_SET.contains(&self) {
            Category::Vector
        } else if OPERAND_SET.contains(&self) {
            Category::Operand
        } else {
            Category::Simple
        }
    }

    /// Returns the statistics group.
    pub const fn group(self) -> Group {
        match self {
            Self::Lda => Group::Load,
            Self::Sta => Group::Store,
            Self::Add | Self::Or | Self::And | Self::Not => Group::Alu,
            Self::Jmp | Self::Jn | Self::Jz => Group::Branch,
            Self::Vld
            | Self::Vst
            | Self::Vadd
            | Self::Veadd
            | Self::Vor
            | Self::Vand
            | Self::Vnot => Group::Vector,
            Self::Nop | Self::Hlt => Group::System,
        }
    }

    /// Number of memory cells the instruction occupies (1 or 2).
    pub fn size(self) -> usize {
        match self.arity() {
            Arity::Implied => 1,
            Arity::Address => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simple => "simple",
            Self::Operand => "operand",
            Self::Vector => "vector",
        })
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mnemonic {
    type Err = IsaError;

    /// Case-insensitive lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(&s.to_uppercase()).ok_or_else(|| IsaError::UnknownMnemonic(s.to_string()))
    }
}

/// Returns the opcode byte for a mnemonic name (case-insensitive).
pub fn opcode_of(mnemonic: &str) -> Result<u8, IsaError> {
    mnemonic.parse::<Mnemonic>().map(Mnemonic::opcode)
}

/// Returns the mnemonic for an opcode byte.
pub fn mnemonic_of(opcode: u8) -> Result<Mnemonic, IsaError> {
    Mnemonic::from_opcode(opcode).ok_or(IsaError::InvalidOpcode(opcode))
}

/// Returns the arity of a mnemonic.
pub fn arity_of(mnemonic: Mnemonic) -> Arity {
    mnemonic.arity()
}

/// Returns the display category of a mnemonic.
pub fn display_category_of(mnemonic: Mnemonic) -> Category {
    mnemonic.category()
}
