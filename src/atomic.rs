/*!
  Atomic read-modify-write flavors, layered over register stores with the
  `Atomic` addressing mode. Requires kernel 5.12 for everything beyond the
  legacy exclusive add.

  The flavor byte is the value the kernel expects in the instruction's imm
  field: an operation nibble plus the fetch bit 0x01, which makes the
  instruction also return the memory's prior value in the source register.
  Inside the opcode carrier the flavor sits in bits 8..16, above the
  kernel-visible opcode byte; the instruction serializer moves it back into
  imm when producing raw slots.
*/

use strum_macros::Display as StrumDisplay;
use num_enum::{TryFromPrimitive, IntoPrimitive};

/// Mask of the flavor byte: operation nibble plus the fetch bit.
pub(crate) const ATOMIC_FIELD_MASK: u32 = 0xf1;
/// Where the flavor byte sits inside the opcode carrier.
pub(crate) const ATOMIC_SHIFT: u32 = 8;
pub(crate) const ATOMIC_CARRIER_MASK: u32 = 0xff << ATOMIC_SHIFT;

/// Atomic operation flavor.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq,            PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum AtomicOp {
  /// `*dst += src`. This flavor is the legacy exclusive add.
  Add      = 0x00,
  Or       = 0x40,
  And      = 0x50,
  Xor      = 0xa0,
  FetchAdd = 0x01,
  FetchOr  = 0x41,
  FetchAnd = 0x51,
  FetchXor = 0xa1,
  /// Exchange `src` with `*dst`, returning the prior value.
  XChg     = 0xe1,
  /// Compare `*dst` with `r0`; on match store `src`. Prior value in `r0`.
  CmpXChg  = 0xf1,
  /// Returned by getters invoked on non atomic opcodes.
  Invalid  = 0xff,
}

impl AtomicOp {

  /// True when the instruction returns the memory's prior value.
  pub fn has_fetch(&self) -> bool {
    match self {
      AtomicOp::Invalid => false,
      other             => u8::from(*other) & 0x01 != 0,
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encodings_are_the_kernel_imm_values() {
    assert_eq!(u8::from(AtomicOp::Add),      0x00);
    assert_eq!(u8::from(AtomicOp::Or),       0x40);
    assert_eq!(u8::from(AtomicOp::And),      0x50);
    assert_eq!(u8::from(AtomicOp::Xor),      0xa0);
    assert_eq!(u8::from(AtomicOp::FetchAdd), 0x01);
    assert_eq!(u8::from(AtomicOp::FetchOr),  0x41);
    assert_eq!(u8::from(AtomicOp::FetchAnd), 0x51);
    assert_eq!(u8::from(AtomicOp::FetchXor), 0xa1);
    assert_eq!(u8::from(AtomicOp::XChg),     0xe1);
    assert_eq!(u8::from(AtomicOp::CmpXChg),  0xf1);
  }

  #[test]
  fn sentinel_sits_outside_the_mask() {
    assert_ne!(u8::from(AtomicOp::Invalid) as u32 & !ATOMIC_FIELD_MASK, 0);
  }

  #[test]
  fn fetch_flavors() {
    assert!(!AtomicOp::Add.has_fetch());
    assert!(!AtomicOp::Xor.has_fetch());
    assert!(AtomicOp::FetchAdd.has_fetch());
    assert!(AtomicOp::FetchXor.has_fetch());
    // Exchange flavors always hand back the prior value.
    assert!(AtomicOp::XChg.has_fetch());
    assert!(AtomicOp::CmpXChg.has_fetch());
    assert!(!AtomicOp::Invalid.has_fetch());
  }
}
