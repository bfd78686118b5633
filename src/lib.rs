/*!

  A typed model of the eBPF instruction set.

  The heart of the crate is `OpCode`, a packed carrier whose interpretation
  turns on a 3-bit class tag: loads and stores carry an addressing mode and
  an access width, arithmetic and branches carry an operation nibble and an
  operand source, and atomic stores carry a read-modify-write flavor. Facets
  a class does not admit read as sentinel values and refuse mutation, so a
  chain of setters can be validated once at the end instead of at every
  step. The same opcode projects both to the byte the kernel executes and
  to the mnemonic a disassembler prints.

  Around the opcode sit the pieces a loader or assembler needs: `Register`
  and `Instruction` complete an operation with its operands, `encode_program`
  and `decode_program` convert between instruction records and the kernel's
  8-byte little-endian slots (including the two-slot double word load), the
  `assembly` module parses the textual form back into instructions, and
  `listing` renders a table-form dump of a program.

  Opcode values are an eternal contract with the kernel; every discriminant
  in this crate matches the uapi encoding bit for bit.

*/

#[macro_use] extern crate lazy_static;
#[macro_use] extern crate prettytable;

mod bits;
mod class;
mod load_store;
mod alu;
mod jump;
mod atomic;
mod opcode;
mod error;
mod register;
mod instruction;
mod assembly;
mod listing;

pub use alu::{ALUOp, Endianness, Source};
pub use assembly::{assemble, parse_assembly, ParsedSyntax, MNEMONICS};
pub use atomic::AtomicOp;
pub use class::Class;
pub use error::EncodingError;
pub use instruction::{decode_program, encode_program, Instruction, RawInstruction, Slot};
pub use jump::JumpOp;
pub use listing::listing;
pub use load_store::{Mode, Size};
pub use opcode::OpCode;
pub use register::{Register, R0, R1, R2, R3, R4, R5, R6, R7, R8, R9, R10};
