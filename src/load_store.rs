/*!
  Addressing mode and access width of load and store opcodes.

  Within the opcode byte the mode occupies bits 5..8 and the size bits 3..5:

    +------+------+-------+
    | MDE  | SIZ  | CLS   |
    | 3 b. | 2 b. | 3 b.  |
    +------+------+-------+
    (MSB)            (LSB)

  Both facets answer with their `Invalid` sentinel when the opcode is not a
  load or store. The sentinels sit outside their masks so they can never be
  mistaken for an encodable field.
*/

use strum_macros::Display as StrumDisplay;
use num_enum::{TryFromPrimitive, IntoPrimitive};

pub(crate) const MODE_MASK: u32 = 0xe0;
pub(crate) const SIZE_MASK: u32 = 0x18;

/// Addressing mode of a load or store.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq,            PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum Mode {
  /// Operand is the instruction's immediate.
  Imm     = 0x00,
  /// Legacy packet load at an absolute offset.
  Abs     = 0x20,
  /// Legacy packet load at a register-relative offset.
  Ind     = 0x40,
  /// Plain memory access through a register.
  Mem     = 0x60,
  /// Memory load with sign extension. Requires kernel 6.2.
  MemSX   = 0x80,
  /// Atomic read-modify-write. The encoding 0xc0 is also the legacy
  /// exclusive-add (XAdd) mode, which is this mode with the plain Add flavor.
  Atomic  = 0xc0,
  /// Returned by getters invoked on non load/store opcodes.
  Invalid = 0xff,
}

/// Width of the memory access.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq,            PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum Size {
  Word    = 0x00,
  Half    = 0x08,
  Byte    = 0x10,
  DWord   = 0x18,
  /// Returned by getters invoked on non load/store opcodes.
  Invalid = 0xff,
}

impl Size {

  /// The suffix the mnemonic renderer appends for this width.
  pub fn suffix(&self) -> &'static str {
    match self {
      Size::Byte    => "B",
      Size::Half    => "H",
      Size::Word    => "W",
      Size::DWord   => "DW",
      Size::Invalid => "",
    }
  }

  /// Width of the access in bytes.
  pub fn sizeof(&self) -> Option<usize> {
    match self {
      Size::Byte    => Some(1),
      Size::Half    => Some(2),
      Size::Word    => Some(4),
      Size::DWord   => Some(8),
      Size::Invalid => None,
    }
  }
}
