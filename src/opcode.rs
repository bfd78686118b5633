/*!
  The composite opcode. A single carrier word holds the 3-bit class and the
  facets that class admits, packed exactly as the kernel reads them:

    7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0
                              ???                            | CLS

  For `ALU` and `ALU64`:

    7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0
                 0                 |           OPC         |S| CLS

  For `Ld`, `LdX`, `St` and `StX`:

    7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0
                           0                       | MDE |SIZ| CLS

  For `StX` where the mode is `Atomic`:

    7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0
                  0              |    ATOMIC OP    | MDE |SIZ| CLS

  For `Jump` and `Jump32`:

    7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0
                           0                       |  OPC  |S| CLS

  Every accessor first gates on the class and answers with the facet's
  sentinel when the class does not admit the facet. Every setter returns a new
  opcode, or `OpCode::INVALID` on a class mismatch or a field that overflows
  its mask. The carrier is wider than a byte so that the invalid sentinel can
  never collide with a real opcode.
*/

use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::alu::{ALUOp, Endianness, Source, ALU_MASK, ENDIAN_MASK, SOURCE_MASK};
use crate::atomic::{AtomicOp, ATOMIC_CARRIER_MASK, ATOMIC_FIELD_MASK, ATOMIC_SHIFT};
use crate::bits::{fits, replace};
use crate::class::Class;
use crate::error::EncodingError;
use crate::jump::{JumpOp, JUMP_MASK};
use crate::load_store::{Mode, Size, MODE_MASK, SIZE_MASK};

/// The kernel-visible byte of the carrier.
pub(crate) const OPCODE_MASK: u32 = 0xff;

/**
  A single eBPF operation. Not a 1:1 mapping to the opcodes the kernel
  accepts: the carrier can hold combinations the verifier would reject, and
  the atomic flavor, which the kernel reads from the imm field, travels in
  the carrier's second byte until serialization.
*/
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct OpCode(u32);

impl OpCode {

  /// Returned by every setter and builder on a violated precondition.
  pub const INVALID: OpCode = OpCode(0xffff);

  /// A bare opcode of the given class, all facets zeroed.
  pub(crate) fn with_class(class: Class) -> OpCode {
    OpCode(u8::from(class) as u32)
  }

  /**
    Wraps a raw opcode byte, as read from an instruction stream. The result
    may carry reserved bit patterns; facet getters answer with sentinels on
    such values and the renderer falls back to a hex form.
  */
  pub fn from_raw(raw: u8) -> OpCode {
    OpCode(raw as u32)
  }

  /// Folds the atomic flavor byte, read from an imm field, into the carrier.
  pub(crate) fn with_atomic_field(self, field: u8) -> OpCode {
    OpCode(replace(self.0, ATOMIC_CARRIER_MASK, (field as u32) << ATOMIC_SHIFT))
  }

  // region Constructors

  /// Register load: `dst = *(size *)(src + offset)`.
  pub fn load_mem(size: Size) -> OpCode {
    OpCode::with_class(Class::LdX).set_mode(Mode::Mem).set_size(size)
  }

  /// Sign-extending register load. A double word cannot be sign extended,
  /// so `DWord` yields the invalid opcode.
  pub fn load_mem_sx(size: Size) -> OpCode {
    if size == Size::DWord {
      return OpCode::INVALID;
    }
    OpCode::with_class(Class::LdX).set_mode(Mode::MemSX).set_size(size)
  }

  /// Immediate load: `dst = imm`. The double word form occupies two slots.
  pub fn load_imm(size: Size) -> OpCode {
    OpCode::with_class(Class::Ld).set_mode(Mode::Imm).set_size(size)
  }

  /// Legacy packet load at an absolute offset.
  pub fn load_abs(size: Size) -> OpCode {
    OpCode::with_class(Class::Ld).set_mode(Mode::Abs).set_size(size)
  }

  /// Legacy packet load at a register-relative offset.
  pub fn load_ind(size: Size) -> OpCode {
    OpCode::with_class(Class::Ld).set_mode(Mode::Ind).set_size(size)
  }

  /// Register store: `*(size *)(dst + offset) = src`.
  pub fn store_mem(size: Size) -> OpCode {
    OpCode::with_class(Class::StX).set_mode(Mode::Mem).set_size(size)
  }

  /// Immediate store: `*(size *)(dst + offset) = imm`.
  pub fn store_imm(size: Size) -> OpCode {
    OpCode::with_class(Class::St).set_mode(Mode::Mem).set_size(size)
  }

  /**
    Atomic exclusive add: `*(size *)(dst + offset) += src`. The kernel only
    accepts word and double word widths, so the narrow widths yield the
    invalid opcode.
  */
  pub fn store_xadd(size: Size) -> OpCode {
    match size {
      Size::Word | Size::DWord =>
        OpCode::with_class(Class::StX).set_mode(Mode::Atomic).set_size(size),
      _ => OpCode::INVALID,
    }
  }

  // endregion

  // region Facet getters

  /// The class of operation. Total, because the tag is 3 bits wide.
  pub fn class(&self) -> Class {
    Class::from_bits(self.0)
  }

  /// Addressing mode of a load or store, or the sentinel.
  pub fn mode(&self) -> Mode {
    if !self.class().is_load_or_store() {
      return Mode::Invalid;
    }
    Mode::try_from((self.0 & MODE_MASK) as u8).unwrap_or(Mode::Invalid)
  }

  /// Access width of a load or store, or the sentinel.
  pub fn size(&self) -> Size {
    if !self.class().is_load_or_store() {
      return Size::Invalid;
    }
    Size::try_from((self.0 & SIZE_MASK) as u8).unwrap_or(Size::Invalid)
  }

  /// Flavor of an atomic store, or the sentinel. Only register stores with
  /// the `Atomic` mode carry a flavor.
  pub fn atomic_op(&self) -> AtomicOp {
    if self.class() != Class::StX || self.mode() != Mode::Atomic {
      return AtomicOp::Invalid;
    }
    let field = ((self.0 & ATOMIC_CARRIER_MASK) >> ATOMIC_SHIFT) as u8;
    AtomicOp::try_from(field).unwrap_or(AtomicOp::Invalid)
  }

  /// Operand source of an arithmetic or branch opcode, or the sentinel.
  /// `Swap` reuses the bit for its direction and carries no source.
  pub fn source(&self) -> Source {
    if !self.class().is_jump_or_alu() || self.alu_op() == ALUOp::Swap {
      return Source::Invalid;
    }
    Source::try_from((self.0 & SOURCE_MASK) as u8).unwrap_or(Source::Invalid)
  }

  /// Operation of an arithmetic opcode, or the sentinel.
  pub fn alu_op(&self) -> ALUOp {
    if !self.class().is_alu() {
      return ALUOp::Invalid;
    }
    ALUOp::try_from((self.0 & ALU_MASK) as u8).unwrap_or(ALUOp::Invalid)
  }

  /// Byte-swap direction, or the sentinel. Only the 32-bit class `Swap`
  /// carries one; the 64-bit form swaps unconditionally.
  pub fn endianness(&self) -> Endianness {
    if self.class() != Class::ALU || self.alu_op() != ALUOp::Swap {
      return Endianness::Invalid;
    }
    Endianness::try_from((self.0 & ENDIAN_MASK) as u8).unwrap_or(Endianness::Invalid)
  }

  /// Operation of a branch opcode, or the sentinel. The unconditional
  /// operations read as the sentinel on the 32-bit class.
  pub fn jump_op(&self) -> JumpOp {
    if !self.class().is_jump() {
      return JumpOp::Invalid;
    }
    let jump = JumpOp::try_from((self.0 & JUMP_MASK) as u8).unwrap_or(JumpOp::Invalid);
    if self.class() == Class::Jump32 && jump.is_unconditional() {
      return JumpOp::Invalid;
    }
    jump
  }

  // endregion

  // region Facet setters

  /// Replaces the addressing mode of a load or store.
  pub fn set_mode(self, mode: Mode) -> OpCode {
    let field = u8::from(mode) as u32;
    if !self.class().is_load_or_store() || !fits(field, MODE_MASK) {
      return OpCode::INVALID;
    }
    OpCode(replace(self.0, MODE_MASK, field))
  }

  /// Replaces the access width of a load or store.
  pub fn set_size(self, size: Size) -> OpCode {
    let field = u8::from(size) as u32;
    if !self.class().is_load_or_store() || !fits(field, SIZE_MASK) {
      return OpCode::INVALID;
    }
    OpCode(replace(self.0, SIZE_MASK, field))
  }

  /// Replaces the flavor of an atomic store. The opcode must already be a
  /// register store with the `Atomic` mode.
  pub fn set_atomic_op(self, atomic: AtomicOp) -> OpCode {
    let field = u8::from(atomic) as u32;
    if self.class() != Class::StX
      || self.mode() != Mode::Atomic
      || !fits(field, ATOMIC_FIELD_MASK)
    {
      return OpCode::INVALID;
    }
    self.with_atomic_field(field as u8)
  }

  /// Replaces the operand source of an arithmetic or branch opcode.
  pub fn set_source(self, source: Source) -> OpCode {
    let field = u8::from(source) as u32;
    if !self.class().is_jump_or_alu() || !fits(field, SOURCE_MASK) {
      return OpCode::INVALID;
    }
    OpCode(replace(self.0, SOURCE_MASK, field))
  }

  /// Replaces the byte-swap direction of a 32-bit class `Swap`.
  pub fn set_endianness(self, endianness: Endianness) -> OpCode {
    let field = u8::from(endianness) as u32;
    if self.class() != Class::ALU
      || self.alu_op() != ALUOp::Swap
      || !fits(field, ENDIAN_MASK)
    {
      return OpCode::INVALID;
    }
    OpCode(replace(self.0, ENDIAN_MASK, field))
  }

  /// Replaces the operation of an arithmetic opcode.
  pub fn set_alu_op(self, alu: ALUOp) -> OpCode {
    let field = u8::from(alu) as u32;
    if !self.class().is_alu() || !fits(field, ALU_MASK) {
      return OpCode::INVALID;
    }
    OpCode(replace(self.0, ALU_MASK, field))
  }

  /**
    Replaces the operation of a branch opcode. The result is read back
    through `jump_op` before it is accepted: an operation whose bits fit the
    mask can still be off limits for the class, as the unconditional
    operations are on `Jump32`.
  */
  pub fn set_jump_op(self, jump: JumpOp) -> OpCode {
    let field = u8::from(jump) as u32;
    if !self.class().is_jump() || !fits(field, JUMP_MASK) {
      return OpCode::INVALID;
    }

    let new_op = OpCode(replace(self.0, JUMP_MASK, field));
    if new_op.jump_op() == JumpOp::Invalid {
      return OpCode::INVALID;
    }
    new_op
  }

  // endregion

  // region Raw projection

  /// True exactly for the two-slot double word immediate load.
  pub fn is_dword_load(&self) -> bool {
    *self == OpCode::load_imm(Size::DWord)
  }

  /// Number of 8-byte slots this opcode occupies in the instruction stream.
  pub fn raw_instructions(&self) -> usize {
    if self.is_dword_load() {
      2
    } else {
      1
    }
  }

  /**
    The kernel-visible opcode byte. Fails on the invalid sentinel and on
    carriers with bits outside the encoding. The atomic flavor byte is part
    of the encoding (a serializer emits it through the imm field), so atomic
    opcodes project cleanly.
  */
  pub fn raw_opcode(&self) -> Result<u8, EncodingError> {
    let known = match self.atomic_op() {
      AtomicOp::Invalid => OPCODE_MASK,
      _                 => OPCODE_MASK | ATOMIC_CARRIER_MASK,
    };
    if !fits(self.0, known) {
      return Err(EncodingError::InvalidOpCode(self.0));
    }
    Ok((self.0 & OPCODE_MASK) as u8)
  }

  // endregion
}

impl Display for OpCode {

  /// The conventional disassembly mnemonic, assembled from facet fragments.
  /// Carriers holding unencodable bit patterns print as `OpCode(0x..)`.
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let class = self.class();

    if class.is_load_or_store() {
      let mode = self.mode();
      let atomic = self.atomic_op();
      if mode == Mode::Invalid {
        return write!(f, "OpCode({:#x})", self.0);
      }
      if class == Class::StX && mode == Mode::Atomic && atomic == AtomicOp::Invalid {
        return write!(f, "OpCode({:#x})", self.0);
      }

      write!(f, "{}{}", class, mode)?;
      if atomic != AtomicOp::Invalid {
        write!(f, "{}", atomic)?;
      }
      write!(f, "{}", self.size().suffix())

    } else if class.is_alu() {
      let alu = self.alu_op();
      if alu == ALUOp::Invalid {
        return write!(f, "OpCode({:#x})", self.0);
      }

      if alu == ALUOp::Swap && class == Class::ALU64 {
        // B as in BSwap, the unconditional byte swap.
        write!(f, "B")?;
      }
      write!(f, "{}", alu)?;

      if alu == ALUOp::Swap {
        if class == Class::ALU {
          write!(f, "{}", self.endianness())?;
        }
        Ok(())
      } else {
        write!(f, "{}", self.source().suffix())?;
        match class {
          Class::ALU => write!(f, "32"),
          _          => Ok(()),
        }
      }

    } else {
      let jump = self.jump_op();
      if jump == JumpOp::Invalid {
        return write!(f, "OpCode({:#x})", self.0);
      }

      write!(f, "{}", jump)?;
      if !jump.is_unconditional() {
        write!(f, "{}", self.source().suffix())?;
      }
      match class {
        Class::Jump32 => write!(f, "32"),
        _             => Ok(()),
      }
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::assembly::all_opcodes;

  // region Concrete opcodes

  #[test]
  fn dword_immediate_load() {
    let op = OpCode::load_imm(Size::DWord);
    assert_eq!(format!("{}", op), "LdImmDW");
    assert_eq!(op.raw_instructions(), 2);
    assert_eq!(op.raw_opcode(), Ok(0x18));
  }

  #[test]
  fn word_register_load() {
    let op = OpCode::load_mem(Size::Word).set_mode(Mode::Mem);
    assert_eq!(op.raw_opcode(), Ok(0x61));
    assert_eq!(format!("{}", op), "LdXMemW");
  }

  #[test]
  fn thirty_two_bit_jump() {
    let op = JumpOp::JEq.op(Class::Jump32).set_source(Source::Reg);
    assert_eq!(format!("{}", op), "JEqX32");
    assert_eq!(op.set_jump_op(JumpOp::Exit), OpCode::INVALID);
  }

  #[test]
  fn add_at_both_widths() {
    let op = ALUOp::Add.op(Class::ALU).set_source(Source::Imm);
    assert_eq!(format!("{}", op), "Add32");
    assert_eq!(format!("{}", ALUOp::Add.op(Class::ALU64)), "Add");
    assert_eq!(format!("{}", ALUOp::Add.op(Class::ALU64).set_source(Source::Reg)), "AddX");
  }

  #[test]
  fn atomic_compare_exchange() {
    let op = OpCode::store_mem(Size::DWord)
      .set_mode(Mode::Atomic)
      .set_atomic_op(AtomicOp::CmpXChg);
    let text = format!("{}", op);
    assert!(text.starts_with("StXAtomic"), "{}", text);
    assert!(text.ends_with("DW"), "{}", text);
    assert_eq!(op.atomic_op(), AtomicOp::CmpXChg);
    assert_eq!(op.raw_opcode(), Ok(0xdb));
  }

  #[test]
  fn byte_swaps() {
    let op = ALUOp::Swap.op(Class::ALU).set_endianness(Endianness::BE);
    assert_eq!(format!("{}", op), "SwapBE");
    assert_eq!(op.source(), Source::Invalid);
    assert_eq!(op.raw_opcode(), Ok(0xdc));

    let op = ALUOp::Swap.op(Class::ALU).set_endianness(Endianness::LE);
    assert_eq!(format!("{}", op), "SwapLE");

    // The 64-bit swap is unconditional and direction-free.
    let op = ALUOp::Swap.op(Class::ALU64);
    assert_eq!(format!("{}", op), "BSwap");
    assert_eq!(op.endianness(), Endianness::Invalid);
    assert_eq!(op.set_endianness(Endianness::BE), OpCode::INVALID);
  }

  #[test]
  fn exclusive_add() {
    let op = OpCode::store_xadd(Size::Word);
    assert_eq!(op.raw_opcode(), Ok(0xc3));
    assert_eq!(op.atomic_op(), AtomicOp::Add);
    assert_eq!(format!("{}", op), "StXAtomicAddW");

    assert_eq!(OpCode::store_xadd(Size::Byte), OpCode::INVALID);
    assert_eq!(OpCode::store_xadd(Size::Half), OpCode::INVALID);
  }

  #[test]
  fn sign_extending_loads() {
    let op = OpCode::load_mem_sx(Size::Byte);
    assert_eq!(op.raw_opcode(), Ok(0x91));
    assert_eq!(format!("{}", op), "LdXMemSXB");
    assert_eq!(OpCode::load_mem_sx(Size::DWord), OpCode::INVALID);
  }

  #[test]
  fn canonical_raw_bytes() {
    assert_eq!(OpCode::load_abs(Size::Word).raw_opcode(),  Ok(0x20));
    assert_eq!(OpCode::load_ind(Size::Half).raw_opcode(),  Ok(0x48));
    assert_eq!(OpCode::store_imm(Size::Word).raw_opcode(), Ok(0x62));
    assert_eq!(OpCode::store_mem(Size::Word).raw_opcode(), Ok(0x63));
    assert_eq!(ALUOp::Mov.op(Class::ALU64).set_source(Source::Reg).raw_opcode(), Ok(0xbf));
  }

  // endregion

  // region Failure modes

  #[test]
  fn the_sentinel_does_not_serialize() {
    assert_eq!(
      OpCode::INVALID.raw_opcode(),
      Err(EncodingError::InvalidOpCode(0xffff))
    );
  }

  #[test]
  fn the_sentinel_propagates_through_chains() {
    // A failed step poisons everything after it.
    let op = OpCode::store_xadd(Size::Byte)
      .set_size(Size::Word)
      .set_mode(Mode::Mem);
    assert_eq!(op, OpCode::INVALID);
  }

  #[test]
  fn cross_class_setters_reject() {
    let load = OpCode::load_mem(Size::Word);
    assert_eq!(load.set_source(Source::Reg),        OpCode::INVALID);
    assert_eq!(load.set_alu_op(ALUOp::Add),         OpCode::INVALID);
    assert_eq!(load.set_jump_op(JumpOp::JEq),       OpCode::INVALID);
    assert_eq!(load.set_endianness(Endianness::LE), OpCode::INVALID);
    assert_eq!(load.set_atomic_op(AtomicOp::Add),   OpCode::INVALID);

    let alu = ALUOp::Add.op(Class::ALU64);
    assert_eq!(alu.set_mode(Mode::Mem),           OpCode::INVALID);
    assert_eq!(alu.set_size(Size::Word),          OpCode::INVALID);
    assert_eq!(alu.set_atomic_op(AtomicOp::Add),  OpCode::INVALID);
    assert_eq!(alu.set_jump_op(JumpOp::JEq),      OpCode::INVALID);
  }

  #[test]
  fn cross_class_getters_answer_with_sentinels() {
    let load = OpCode::load_mem(Size::Word);
    assert_eq!(load.source(),     Source::Invalid);
    assert_eq!(load.alu_op(),     ALUOp::Invalid);
    assert_eq!(load.jump_op(),    JumpOp::Invalid);
    assert_eq!(load.endianness(), Endianness::Invalid);
    assert_eq!(load.atomic_op(),  AtomicOp::Invalid);

    let jump = JumpOp::JEq.op(Class::Jump);
    assert_eq!(jump.mode(),      Mode::Invalid);
    assert_eq!(jump.size(),      Size::Invalid);
    assert_eq!(jump.atomic_op(), AtomicOp::Invalid);
    assert_eq!(jump.alu_op(),    ALUOp::Invalid);
  }

  #[test]
  fn sentinel_facet_values_overflow_their_masks() {
    let load = OpCode::load_mem(Size::Word);
    assert_eq!(load.set_mode(Mode::Invalid), OpCode::INVALID);
    assert_eq!(load.set_size(Size::Invalid), OpCode::INVALID);

    let alu = ALUOp::Add.op(Class::ALU);
    assert_eq!(alu.set_source(Source::Invalid), OpCode::INVALID);
    assert_eq!(alu.set_alu_op(ALUOp::Invalid),  OpCode::INVALID);
  }

  #[test]
  fn non_atomic_stores_carry_no_flavor() {
    let op = OpCode::store_mem(Size::Word);
    assert_eq!(op.atomic_op(), AtomicOp::Invalid);
    assert_eq!(op.set_atomic_op(AtomicOp::XChg), OpCode::INVALID);

    // An immediate store cannot go atomic either; the flavor needs StX.
    let op = OpCode::store_imm(Size::Word).set_mode(Mode::Atomic);
    assert_eq!(op.atomic_op(), AtomicOp::Invalid);
    assert_eq!(op.set_atomic_op(AtomicOp::Add), OpCode::INVALID);
  }

  #[test]
  fn unencodable_raw_bytes_render_as_hex() {
    // 0xa0 is a reserved addressing mode pattern.
    let op = OpCode::from_raw(0xa1);
    assert_eq!(op.mode(), Mode::Invalid);
    assert_eq!(format!("{}", op), "OpCode(0xa1)");
    assert_eq!(format!("{}", OpCode::INVALID), "OpCode(0xffff)");
  }

  // endregion

  // region Laws over the whole opcode space

  #[test]
  fn setting_a_facet_to_its_own_value_is_identity() {
    for op in all_opcodes() {
      let class = op.class();

      if class.is_load_or_store() {
        assert_eq!(op.set_mode(op.mode()), op, "{}", op);
        assert_eq!(op.set_size(op.size()), op, "{}", op);
        if op.atomic_op() != AtomicOp::Invalid {
          assert_eq!(op.set_atomic_op(op.atomic_op()), op, "{}", op);
        }
      }

      if class.is_alu() {
        assert_eq!(op.set_alu_op(op.alu_op()), op, "{}", op);
        if op.source() != Source::Invalid {
          assert_eq!(op.set_source(op.source()), op, "{}", op);
        }
        if op.endianness() != Endianness::Invalid {
          assert_eq!(op.set_endianness(op.endianness()), op, "{}", op);
        }
      }

      if class.is_jump() {
        assert_eq!(op.set_jump_op(op.jump_op()), op, "{}", op);
        if op.source() != Source::Invalid {
          assert_eq!(op.set_source(op.source()), op, "{}", op);
        }
      }
    }
  }

  #[test]
  fn successful_setters_never_change_the_class() {
    for op in all_opcodes() {
      let class = op.class();

      let candidates = [
        op.set_mode(Mode::Mem),
        op.set_size(Size::Word),
        op.set_source(Source::Reg),
        op.set_alu_op(ALUOp::Xor),
        op.set_jump_op(JumpOp::JNE),
        op.set_atomic_op(AtomicOp::FetchOr),
        op.set_endianness(Endianness::BE),
      ];
      for changed in candidates {
        if changed != OpCode::INVALID {
          assert_eq!(changed.class(), class, "{}", op);
        }
      }
    }
  }

  #[test]
  fn two_slots_exactly_for_the_dword_immediate_load() {
    for op in all_opcodes() {
      let expected = if op == OpCode::load_imm(Size::DWord) { 2 } else { 1 };
      assert_eq!(op.raw_instructions(), expected, "{}", op);
    }
  }

  #[test]
  fn every_opcode_projects_to_a_byte() {
    for op in all_opcodes() {
      assert!(op.raw_opcode().is_ok(), "{}", op);
    }
  }

  #[test]
  fn mnemonics_contain_no_type_name_suffixes() {
    for op in all_opcodes() {
      let text = format!("{}", op);
      assert!(!text.contains("Class"),  "{}", text);
      assert!(!text.contains("Mode"),   "{}", text);
      assert!(!text.contains("Source"), "{}", text);
      assert!(!text.contains("Invalid"), "{}", text);
    }
  }

  // endregion
}
