/*!
  Representation of whole instructions, abstractly and as kernel bytes.

  An instruction is an opcode plus three operand fields: two 4-bit register
  slots packed into one byte, a 16-bit offset, and a 32-bit immediate. On the
  wire each instruction is one 8-byte little-endian slot,

    [op:8][dst:4][src:4][offset:16][imm:32]

  except the double word immediate load, which spills the high half of its
  64-bit constant into the imm field of a second, otherwise-zero slot. The
  encoded form is therefore one slot or two, and decoding the first slot
  tells you whether a second must be provided.

  Two details do not survive the trip through an `Instruction` unchanged:
  atomic stores carry their flavor in the opcode rather than in `constant`
  (the serializer writes it into imm), and the double word load is the only
  instruction whose `constant` uses all 64 bits.
*/

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::alu::{ALUOp, Source};
use crate::atomic::AtomicOp;
use crate::class::Class;
use crate::error::EncodingError;
use crate::jump::JumpOp;
use crate::load_store::Mode;
use crate::opcode::OpCode;
use crate::register::{Register, R0};

/// One 8-byte slot of the kernel's instruction stream.
pub type Slot = u64;

/// An encoded instruction: one slot, or two for the double word load.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum RawInstruction {
  Slot(Slot),
  DoubleSlot { low: Slot, high: Slot },
}

/// Holds the unencoded components of an instruction.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Instruction {
  pub opcode   : OpCode,
  pub dst      : Register,
  pub src      : Register,
  pub offset   : i16,
  pub constant : i64,
}

// region Slot packing

fn pack_slot(op: u8, dst: Register, src: Register, offset: i16, imm: i32) -> Slot {
  (op as u64)
    | ((dst.nibble() as u64) << 8)
    | ((src.nibble() as u64) << 12)
    | ((offset as u16 as u64) << 16)
    | ((imm as u32 as u64) << 32)
}

fn unpack_slot(slot: Slot) -> (u8, Register, Register, i16, i32) {
  let op     = (slot & 0xff) as u8;
  let dst    = Register::new(((slot >> 8) & 0x0f) as u8);
  let src    = Register::new(((slot >> 12) & 0x0f) as u8);
  let offset = ((slot >> 16) & 0xffff) as u16 as i16;
  let imm    = ((slot >> 32) & 0xffff_ffff) as u32 as i32;
  (op, dst, src, offset, imm)
}

// endregion

impl Instruction {

  /// An instruction with zeroed operands, ready for the field setters of a
  /// struct literal or an assembler.
  pub fn with_opcode(opcode: OpCode) -> Instruction {
    Instruction {
      opcode,
      dst      : R0,
      src      : R0,
      offset   : 0,
      constant : 0,
    }
  }

  /// Number of 8-byte slots the encoded form occupies.
  pub fn slots(&self) -> usize {
    self.opcode.raw_instructions()
  }

  /**
    Encodes the instruction into kernel slots. This is the single boundary
    where an invalid opcode surfaces as an error rather than a sentinel.
  */
  pub fn encode(&self) -> Result<RawInstruction, EncodingError> {
    let op = self.opcode.raw_opcode()?;

    if self.opcode.is_dword_load() {
      let low_imm  = (self.constant as u64 & 0xffff_ffff) as u32 as i32;
      let high_imm = ((self.constant as u64) >> 32) as u32 as i32;
      return Ok(RawInstruction::DoubleSlot {
        low  : pack_slot(op, self.dst, self.src, self.offset, low_imm),
        high : pack_slot(0, R0, R0, 0, high_imm),
      });
    }

    // The atomic flavor travels in the imm field.
    let imm = match self.opcode.atomic_op() {
      AtomicOp::Invalid => self.constant as i32,
      atomic            => u8::from(atomic) as i32,
    };
    Ok(RawInstruction::Slot(pack_slot(op, self.dst, self.src, self.offset, imm)))
  }
}

impl RawInstruction {

  /// True when the slot opens a two-slot instruction, in which case the
  /// caller must supply the following slot for decoding.
  pub fn is_double_slot(slot: &Slot) -> bool {
    OpCode::from_raw((slot & 0xff) as u8).is_dword_load()
  }

  /**
    Decodes back into an instruction. Answers `None` when a single slot
    opens a two-slot load, when a second slot is not the all-but-imm-zero
    pseudo slot, or when an atomic imm does not name a flavor.
  */
  pub fn try_decode(&self) -> Option<Instruction> {
    match self {
      RawInstruction::Slot(slot) => {
        let (op, dst, src, offset, imm) = unpack_slot(*slot);
        let mut opcode = OpCode::from_raw(op);
        if opcode.is_dword_load() {
          return None;
        }

        let mut constant = imm as i64;
        if opcode.class() == Class::StX && opcode.mode() == Mode::Atomic {
          if imm as u32 & !0xff != 0 {
            return None;
          }
          opcode = opcode.with_atomic_field(imm as u8);
          if opcode.atomic_op() == AtomicOp::Invalid {
            return None;
          }
          constant = 0;
        }

        Some(Instruction { opcode, dst, src, offset, constant })
      }

      RawInstruction::DoubleSlot { low, high } => {
        let (op, dst, src, offset, low_imm) = unpack_slot(*low);
        let opcode = OpCode::from_raw(op);
        if !opcode.is_dword_load() || high & 0xffff_ffff != 0 {
          return None;
        }

        let high_imm = (high >> 32) as u32;
        let constant = ((high_imm as u64) << 32 | low_imm as u32 as u64) as i64;
        Some(Instruction { opcode, dst, src, offset, constant })
      }
    }
  }
}

impl Display for RawInstruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      RawInstruction::Slot(slot)              => write!(f, "{:#018x}", slot),
      RawInstruction::DoubleSlot { low, high } => write!(f, "{:#018x} {:#018x}", low, high),
    }
  }
}

// region Operand shapes

/// The operand fields an opcode actually reads, in their textual order.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) enum Operand {
  Dst,
  Src,
  Off,
  Imm,
}

pub(crate) fn operand_shape(op: OpCode) -> &'static [Operand] {
  use Operand::*;

  let class = op.class();
  if class.is_load_or_store() {
    match (class, op.mode()) {
      (Class::Ld, Mode::Imm) => &[Dst, Imm],
      (Class::Ld, Mode::Abs) => &[Imm],
      (Class::Ld, Mode::Ind) => &[Src, Imm],
      (Class::LdX, _)        => &[Dst, Src, Off],
      (Class::St, _)         => &[Dst, Off, Imm],
      (Class::StX, _)        => &[Dst, Src, Off],
      _                      => &[Dst, Src, Off, Imm],
    }
  } else if class.is_alu() {
    match op.alu_op() {
      ALUOp::Swap | ALUOp::Neg => &[Dst],
      _ => match op.source() {
        Source::Reg => &[Dst, Src],
        _           => &[Dst, Imm],
      },
    }
  } else {
    match op.jump_op() {
      JumpOp::Exit => &[],
      JumpOp::Call => &[Imm],
      JumpOp::Ja   => &[Off],
      _ => match op.source() {
        Source::Reg => &[Dst, Src, Off],
        _           => &[Dst, Off, Imm],
      },
    }
  }
}

// endregion

impl Display for Instruction {

  /// The assembly form, `Mnemonic(operands..)`. Operand-free instructions
  /// print as the bare mnemonic. This is the exact syntax the assembler
  /// parses back.
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let shape = operand_shape(self.opcode);
    if shape.is_empty() {
      return write!(f, "{}", self.opcode);
    }

    write!(f, "{}(", self.opcode)?;
    for (i, operand) in shape.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      match operand {
        Operand::Dst => write!(f, "{}", self.dst)?,
        Operand::Src => write!(f, "{}", self.src)?,
        Operand::Off => write!(f, "{}", self.offset)?,
        Operand::Imm => write!(f, "{}", self.constant)?,
      }
    }
    write!(f, ")")
  }
}

// region Program streams

/// Serializes a program to kernel bytes, 8 little-endian bytes per slot.
pub fn encode_program(program: &[Instruction]) -> Result<Vec<u8>, EncodingError> {
  let mut bytes = Vec::with_capacity(program.len() * 8);
  for instruction in program {
    match instruction.encode()? {
      RawInstruction::Slot(slot) => {
        bytes.extend_from_slice(&slot.to_le_bytes());
      }
      RawInstruction::DoubleSlot { low, high } => {
        bytes.extend_from_slice(&low.to_le_bytes());
        bytes.extend_from_slice(&high.to_le_bytes());
      }
    }
  }
  Ok(bytes)
}

/**
  Deserializes kernel bytes back into instructions, pairing up the slots of
  double word loads. Errors carry the byte offset of the offending slot.
*/
pub fn decode_program(bytes: &[u8]) -> Result<Vec<Instruction>, EncodingError> {
  if bytes.len() % 8 != 0 {
    return Err(EncodingError::TruncatedStream { offset: bytes.len() / 8 * 8 });
  }

  let mut program = Vec::with_capacity(bytes.len() / 8);
  let mut offset = 0;
  while offset < bytes.len() {
    let mut slot_bytes = [0u8; 8];
    slot_bytes.copy_from_slice(&bytes[offset..offset + 8]);
    let slot = Slot::from_le_bytes(slot_bytes);

    let raw = match RawInstruction::is_double_slot(&slot) {
      false => RawInstruction::Slot(slot),
      true => {
        if offset + 16 > bytes.len() {
          return Err(EncodingError::MissingPseudoSlot { offset });
        }
        slot_bytes.copy_from_slice(&bytes[offset + 8..offset + 16]);
        let high = Slot::from_le_bytes(slot_bytes);
        if high & 0xffff_ffff != 0 {
          return Err(EncodingError::MalformedPseudoSlot { offset });
        }
        RawInstruction::DoubleSlot { low: slot, high }
      }
    };

    match raw.try_decode() {
      Some(instruction) => {
        offset += instruction.slots() * 8;
        program.push(instruction);
      }
      None => {
        return Err(EncodingError::InvalidOpCode(slot as u32 & 0xff));
      }
    }
  }

  Ok(program)
}

// endregion
