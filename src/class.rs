/*!
  The 3-bit class tag in the low bits of every opcode. The class selects how the
  rest of the opcode byte is interpreted: loads and stores carry a mode and a
  size, arithmetic and jumps carry an operation nibble and a source bit.
*/

use std::convert::TryFrom;

use strum_macros::Display as StrumDisplay;
use num_enum::{TryFromPrimitive, IntoPrimitive};

pub(crate) const CLASS_MASK: u32 = 0x07;

/**
  Operation class of an opcode.

  `Ld` loads immediate values into registers and covers the legacy packet-load
  forms; `LdX` loads memory into registers. `St` stores immediates to memory,
  `StX` stores registers to memory. `ALU` and `ALU64` are 32- and 64-bit
  arithmetic; `Jump` and `Jump32` branch on 64- and 32-bit comparisons.
*/
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq,            PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum Class {
  Ld     = 0x00,
  LdX    = 0x01,
  St     = 0x02,
  StX    = 0x03,
  ALU    = 0x04,
  Jump   = 0x05,
  Jump32 = 0x06,
  ALU64  = 0x07,
}

impl Class {

  /// Decodes the class from the low bits of an opcode. Total, since every
  /// 3-bit pattern names a class.
  pub(crate) fn from_bits(bits: u32) -> Class {
    match Class::try_from((bits & CLASS_MASK) as u8) {
      Ok(class) => class,
      Err(_)    => unreachable!(),
    }
  }

  pub fn is_load(&self) -> bool {
    *self == Class::Ld || *self == Class::LdX
  }

  pub fn is_store(&self) -> bool {
    *self == Class::St || *self == Class::StX
  }

  pub fn is_load_or_store(&self) -> bool {
    self.is_load() || self.is_store()
  }

  pub fn is_alu(&self) -> bool {
    *self == Class::ALU || *self == Class::ALU64
  }

  pub fn is_jump(&self) -> bool {
    *self == Class::Jump || *self == Class::Jump32
  }

  pub fn is_jump_or_alu(&self) -> bool {
    self.is_jump() || self.is_alu()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encodings_are_the_kernel_values() {
    assert_eq!(u8::from(Class::Ld),     0x00);
    assert_eq!(u8::from(Class::LdX),    0x01);
    assert_eq!(u8::from(Class::St),     0x02);
    assert_eq!(u8::from(Class::StX),    0x03);
    assert_eq!(u8::from(Class::ALU),    0x04);
    assert_eq!(u8::from(Class::Jump),   0x05);
    assert_eq!(u8::from(Class::Jump32), 0x06);
    assert_eq!(u8::from(Class::ALU64),  0x07);
  }

  #[test]
  fn every_three_bit_pattern_decodes() {
    for bits in 0u32..8 {
      let class = Class::from_bits(bits);
      assert_eq!(u8::from(class) as u32, bits);
    }
    // Bits above the mask are ignored.
    assert_eq!(Class::from_bits(0x61), Class::LdX);
    assert_eq!(Class::from_bits(0xffff), Class::ALU64);
  }

  #[test]
  fn category_predicates() {
    assert!(Class::Ld.is_load());
    assert!(Class::LdX.is_load());
    assert!(!Class::St.is_load());

    assert!(Class::St.is_store());
    assert!(Class::StX.is_store());
    assert!(!Class::LdX.is_store());

    for class in [Class::Ld, Class::LdX, Class::St, Class::StX] {
      assert!(class.is_load_or_store());
      assert!(!class.is_jump_or_alu());
    }

    for class in [Class::ALU, Class::ALU64] {
      assert!(class.is_alu());
      assert!(!class.is_jump());
      assert!(class.is_jump_or_alu());
    }

    for class in [Class::Jump, Class::Jump32] {
      assert!(class.is_jump());
      assert!(!class.is_alu());
      assert!(class.is_jump_or_alu());
    }
  }
}
