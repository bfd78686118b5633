/*!
  Facets of arithmetic opcodes: the operation nibble, the operand source bit,
  and the byte-swap direction.

  For the `ALU` and `ALU64` classes the opcode byte is laid out as

    +--------+---+-------+
    |  OPC   | S | CLS   |
    | 4 bits | 1 | 3 b.  |
    +--------+---+-------+
    (MSB)           (LSB)

  The source bit selects between the instruction's immediate and the source
  register. The `Swap` operation reuses that bit for the byte-swap direction
  on the 32-bit class, so the two facets are mutually exclusive per opcode.
*/

use strum_macros::Display as StrumDisplay;
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::class::Class;
use crate::opcode::OpCode;

pub(crate) const SOURCE_MASK: u32 = 0x08;
pub(crate) const ENDIAN_MASK: u32 = 0x08;
pub(crate) const ALU_MASK:    u32 = 0xf0;

/// Where the second operand of an arithmetic or jump opcode comes from.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq,            PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum Source {
  /// Operand is the instruction's immediate.
  Imm     = 0x00,
  /// Operand is the source register.
  Reg     = 0x08,
  /// Returned by getters invoked on opcodes that carry no source.
  Invalid = 0xff,
}

impl Source {

  /// Mnemonic marker. Register sources are marked `X`, the kernel's
  /// traditional spelling; immediates are unmarked.
  pub fn suffix(&self) -> &'static str {
    match self {
      Source::Imm     => "",
      Source::Reg     => "X",
      Source::Invalid => "",
    }
  }
}

/// Direction of a 32-bit class byte swap.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq,            PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum Endianness {
  /// Convert to little endian.
  LE      = 0x00,
  /// Convert to big endian.
  BE      = 0x08,
  /// Returned by getters invoked on opcodes that carry no endianness.
  Invalid = 0xff,
}

/**
  Arithmetic operations. `Swap` converts between host and a fixed byte order
  on the 32-bit class and performs an unconditional byte swap on the 64-bit
  class; every other operation behaves the same on both, at the class's width.
*/
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq,            PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum ALUOp {
  Add     = 0x00,
  Sub     = 0x10,
  Mul     = 0x20,
  Div     = 0x30,
  Or      = 0x40,
  And     = 0x50,
  LSh     = 0x60,
  RSh     = 0x70,
  Neg     = 0x80,
  Mod     = 0x90,
  Xor     = 0xa0,
  Mov     = 0xb0,
  ArSh    = 0xc0,
  Swap    = 0xd0,
  /// Returned by getters invoked on non arithmetic opcodes.
  Invalid = 0xff,
}

impl ALUOp {

  /**
    Builds an arithmetic opcode of the given class with an immediate source.
    Returns the invalid opcode for non arithmetic classes. Use
    `OpCode::set_source` to switch the operand to a register afterwards.
  */
  pub fn op(self, class: Class) -> OpCode {
    if !class.is_alu() {
      return OpCode::INVALID;
    }
    OpCode::with_class(class).set_alu_op(self)
  }
}
