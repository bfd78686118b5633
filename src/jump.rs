/*!
  Branch operations. The layout mirrors the arithmetic classes, an operation
  nibble over a source bit:

    +--------+---+-------+
    |  OPC   | S | CLS   |
    +--------+---+-------+

  `Jump32` compares at 32 bits and exists since kernel 5.1. `Ja`, `Call` and
  `Exit` transfer control unconditionally and are only encodable on the 64-bit
  `Jump` class.
*/

use strum_macros::Display as StrumDisplay;
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::class::Class;
use crate::opcode::OpCode;

pub(crate) const JUMP_MASK: u32 = 0xf0;

/// Branch operations.
#[derive(
  StrumDisplay, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,             Eq,            PartialEq, Debug, Hash
)]
#[repr(u8)]
pub enum JumpOp {
  /// Unconditional jump. `Jump` class only.
  Ja      = 0x00,
  JEq     = 0x10,
  JGT     = 0x20,
  JGE     = 0x30,
  JSet    = 0x40,
  JNE     = 0x50,
  JSGT    = 0x60,
  JSGE    = 0x70,
  /// Function call. `Jump` class only.
  Call    = 0x80,
  /// Program return. `Jump` class only.
  Exit    = 0x90,
  JLT     = 0xa0,
  JLE     = 0xb0,
  JSLT    = 0xc0,
  JSLE    = 0xd0,
  /// Returned by getters invoked on non branch opcodes.
  Invalid = 0xff,
}

impl JumpOp {

  /// True for the operations restricted to the 64-bit `Jump` class.
  pub fn is_unconditional(&self) -> bool {
    matches!(self, JumpOp::Ja | JumpOp::Call | JumpOp::Exit)
  }

  /**
    Builds a branch opcode of the given class with an immediate source.
    Returns the invalid opcode for non branch classes and for unconditional
    operations on `Jump32`.
  */
  pub fn op(self, class: Class) -> OpCode {
    if !class.is_jump() {
      return OpCode::INVALID;
    }
    OpCode::with_class(class).set_jump_op(self)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encodings_are_the_kernel_values() {
    assert_eq!(u8::from(JumpOp::Ja),   0x00);
    assert_eq!(u8::from(JumpOp::JEq),  0x10);
    assert_eq!(u8::from(JumpOp::JGT),  0x20);
    assert_eq!(u8::from(JumpOp::JGE),  0x30);
    assert_eq!(u8::from(JumpOp::JSet), 0x40);
    assert_eq!(u8::from(JumpOp::JNE),  0x50);
    assert_eq!(u8::from(JumpOp::JSGT), 0x60);
    assert_eq!(u8::from(JumpOp::JSGE), 0x70);
    assert_eq!(u8::from(JumpOp::Call), 0x80);
    assert_eq!(u8::from(JumpOp::Exit), 0x90);
    assert_eq!(u8::from(JumpOp::JLT),  0xa0);
    assert_eq!(u8::from(JumpOp::JLE),  0xb0);
    assert_eq!(u8::from(JumpOp::JSLT), 0xc0);
    assert_eq!(u8::from(JumpOp::JSLE), 0xd0);
  }

  #[test]
  fn sentinel_sits_outside_the_mask() {
    assert_ne!(u8::from(JumpOp::Invalid) as u32 & !JUMP_MASK, 0);
  }

  #[test]
  fn op_builds_branch_opcodes() {
    assert_eq!(JumpOp::Exit.op(Class::Jump).raw_opcode(), Ok(0x95));
    assert_eq!(JumpOp::Call.op(Class::Jump).raw_opcode(), Ok(0x85));
    assert_eq!(JumpOp::JEq.op(Class::Jump).raw_opcode(),  Ok(0x15));
    assert_eq!(JumpOp::JEq.op(Class::Jump32).raw_opcode(), Ok(0x16));
  }

  #[test]
  fn unconditional_operations_reject_the_32_bit_class() {
    assert_eq!(JumpOp::Exit.op(Class::Jump32), OpCode::INVALID);
    assert_eq!(JumpOp::Call.op(Class::Jump32), OpCode::INVALID);
    assert_eq!(JumpOp::Ja.op(Class::Jump32),   OpCode::INVALID);
  }

  #[test]
  fn op_rejects_non_jump_classes() {
    assert_eq!(JumpOp::JEq.op(Class::ALU), OpCode::INVALID);
    assert_eq!(JumpOp::JEq.op(Class::StX), OpCode::INVALID);
  }
}
