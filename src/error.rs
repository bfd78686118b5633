/*!
  Errors surfaced at the serialization boundary. Facet getters and setters
  never error; they answer with sentinel values. Only turning an opcode or an
  instruction stream into kernel bytes, or reading one back, can fail loudly,
  because a serializer that has lost a bit must abort.
*/

use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum EncodingError {
  /// The opcode is the invalid sentinel, or carries bits with no meaning in
  /// the kernel encoding. The full carrier value is reported.
  InvalidOpCode(u32),
  /// The byte stream ended in the middle of an 8-byte slot.
  TruncatedStream { offset: usize },
  /// A two-slot immediate load sat in the last slot of the stream.
  MissingPseudoSlot { offset: usize },
  /// The second slot of a two-slot immediate load must have a zero opcode.
  MalformedPseudoSlot { offset: usize },
}

impl Display for EncodingError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      EncodingError::InvalidOpCode(bits) =>
        write!(f, "invalid opcode {:#x}", bits),
      EncodingError::TruncatedStream { offset } =>
        write!(f, "instruction stream truncated at byte {}", offset),
      EncodingError::MissingPseudoSlot { offset } =>
        write!(f, "two-slot load at byte {} is missing its second slot", offset),
      EncodingError::MalformedPseudoSlot { offset } =>
        write!(f, "second slot of the load at byte {} has a nonzero opcode", offset),
    }
  }
}

impl Error for EncodingError {}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_carry_the_offending_position() {
    let message = format!("{}", EncodingError::TruncatedStream { offset: 24 });
    assert!(message.contains("24"));

    let message = format!("{}", EncodingError::InvalidOpCode(0xffff));
    assert!(message.contains("0xffff"));
  }
}
