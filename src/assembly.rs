/*!
  The human readable textual form of instructions is called assembly. One
  instruction per line, `Mnemonic(operand, ..)` with registers spelled `rN`
  and numbers as signed decimals; instructions without operands may drop the
  parentheses. `%` starts a comment that runs to the end of the line.

  Parsing leans on the mnemonic table, a bidirectional map between every
  constructible opcode and its rendered name. The table doubles as the
  authority on which operands an opcode takes, through the opcode's operand
  shape, so arity and operand kinds are checked during parsing rather than
  at encode time.
*/

use std::convert::TryFrom;
use std::fmt;
use std::fmt::{Display, Formatter};

use bimap::BiMap;
use nom::{
  branch::alt,
  character::complete::{alpha1, alphanumeric0, char as one_char, digit1, space0},
  combinator::{map_res, opt, recognize},
  multi::separated_list0,
  sequence::{delimited, pair, preceded, terminated},
  IResult,
};

use crate::alu::{ALUOp, Endianness, Source};
use crate::atomic::AtomicOp;
use crate::class::Class;
use crate::instruction::{operand_shape, Instruction, Operand};
use crate::jump::JumpOp;
use crate::load_store::Size;
use crate::opcode::OpCode;
use crate::register::Register;

/// Every constructible opcode. The mnemonic table and the exhaustive law
/// tests iterate this set.
pub(crate) fn all_opcodes() -> Vec<OpCode> {
  let mut ops = Vec::new();

  let sizes = [Size::Byte, Size::Half, Size::Word, Size::DWord];
  for size in sizes {
    ops.push(OpCode::load_imm(size));
    ops.push(OpCode::load_abs(size));
    ops.push(OpCode::load_ind(size));
    ops.push(OpCode::load_mem(size));
    ops.push(OpCode::store_mem(size));
    ops.push(OpCode::store_imm(size));
    if size != Size::DWord {
      ops.push(OpCode::load_mem_sx(size));
    }
  }

  let flavors = [
    AtomicOp::Add,      AtomicOp::Or,       AtomicOp::And,      AtomicOp::Xor,
    AtomicOp::FetchAdd, AtomicOp::FetchOr,  AtomicOp::FetchAnd, AtomicOp::FetchXor,
    AtomicOp::XChg,     AtomicOp::CmpXChg,
  ];
  for size in [Size::Word, Size::DWord] {
    for flavor in flavors {
      ops.push(OpCode::store_xadd(size).set_atomic_op(flavor));
    }
  }

  let alu_ops = [
    ALUOp::Add, ALUOp::Sub, ALUOp::Mul, ALUOp::Div,  ALUOp::Or,  ALUOp::And,
    ALUOp::LSh, ALUOp::RSh, ALUOp::Mod, ALUOp::Xor,  ALUOp::Mov, ALUOp::ArSh,
  ];
  for class in [Class::ALU, Class::ALU64] {
    for alu in alu_ops {
      for source in [Source::Imm, Source::Reg] {
        ops.push(alu.op(class).set_source(source));
      }
    }
    // Negation has no second operand, so no register-source form.
    ops.push(ALUOp::Neg.op(class));
  }
  ops.push(ALUOp::Swap.op(Class::ALU));
  ops.push(ALUOp::Swap.op(Class::ALU).set_endianness(Endianness::BE));
  ops.push(ALUOp::Swap.op(Class::ALU64));

  let jump_ops = [
    JumpOp::Ja,   JumpOp::JEq,  JumpOp::JGT,  JumpOp::JGE,  JumpOp::JSet,
    JumpOp::JNE,  JumpOp::JSGT, JumpOp::JSGE, JumpOp::Call, JumpOp::Exit,
    JumpOp::JLT,  JumpOp::JLE,  JumpOp::JSLT, JumpOp::JSLE,
  ];
  for class in [Class::Jump, Class::Jump32] {
    for jump in jump_ops {
      if jump.is_unconditional() {
        if class == Class::Jump {
          ops.push(jump.op(class));
        }
      } else {
        for source in [Source::Imm, Source::Reg] {
          ops.push(jump.op(class).set_source(source));
        }
      }
    }
  }

  ops
}

lazy_static! {
  /**
    Mnemonic to opcode, both ways. Building the table also proves that
    rendering is injective over the constructible opcodes: a collision on
    either side aborts.
  */
  pub static ref MNEMONICS: BiMap<String, OpCode> = {
    let mut table = BiMap::new();
    for op in all_opcodes() {
      let name = format!("{}", op);
      if table.insert_no_overwrite(name, op).is_err() {
        unreachable!("Error: two opcodes render as {}", op);
      }
    }
    table
  };
}

// region Parsed syntax

/// An `Either`-like enum to transparently collect source code errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParsedSyntax<'a> {
  Instruction(Instruction),
  NotAnOperation {
    line: u32,
    name: &'a str,
  },
  WrongArity {
    line: u32,
    name: &'a str,
    expected: usize,
    got: usize,
  },
  BadOperand {
    line: u32,
    name: &'a str,
    position: usize,
  },
  Malformed {
    line: u32,
  },
}
use ParsedSyntax as Syntax;

impl<'a> Display for ParsedSyntax<'a> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Syntax::Instruction(instruction) => {
        write!(f, "{}", instruction)
      }
      Syntax::NotAnOperation { line, name } => {
        write!(f, "Error on line {}: {} is not an operation.", line, name)
      }
      Syntax::WrongArity { line, name, expected, got } => {
        write!(
          f,
          "Error on line {}: {} takes {} operands but was given {}.",
          line, name, expected, got
        )
      }
      Syntax::BadOperand { line, name, position } => {
        write!(
          f,
          "Error on line {}: operand {} of {} has the wrong kind.",
          line, position, name
        )
      }
      Syntax::Malformed { line } => {
        write!(f, "Error on line {}: not an instruction.", line)
      }
    }
  }
}

// endregion

// region Line parsers

#[derive(Clone, Copy, Debug)]
enum Token {
  Reg(Register),
  Num(i64),
}

fn operand(input: &str) -> IResult<&str, Token> {
  alt((
    map_res(
      preceded(one_char('r'), digit1),
      |digits: &str| digits.parse::<u8>().map(|n| Token::Reg(Register::new(n))),
    ),
    map_res(
      recognize(pair(opt(one_char('-')), digit1)),
      |digits: &str| digits.parse::<i64>().map(Token::Num),
    ),
  ))(input)
}

/// `Mnemonic(operand, ..)`, or a bare mnemonic. Mnemonics start with a
/// letter and may contain digits (`Add32`).
fn instruction_line(input: &str) -> IResult<&str, (&str, Option<Vec<Token>>)> {
  terminated(
    pair(
      preceded(space0, recognize(pair(alpha1, alphanumeric0))),
      opt(delimited(
        preceded(space0, one_char('(')),
        separated_list0(preceded(space0, one_char(',')), preceded(space0, operand)),
        preceded(space0, one_char(')')),
      )),
    ),
    space0,
  )(input)
}

// endregion

fn build_instruction<'a>(line: u32, name: &'a str, args: Vec<Token>) -> ParsedSyntax<'a> {
  let opcode = match MNEMONICS.get_by_left(name) {
    Some(op) => *op,
    None => {
      return Syntax::NotAnOperation { line, name };
    }
  };

  let shape = operand_shape(opcode);
  if args.len() != shape.len() {
    return Syntax::WrongArity {
      line,
      name,
      expected: shape.len(),
      got: args.len(),
    };
  }

  let mut instruction = Instruction::with_opcode(opcode);
  for (index, (operand, token)) in shape.iter().zip(&args).enumerate() {
    let position = index + 1;
    match (operand, token) {

      (Operand::Dst, Token::Reg(register)) if register.is_valid() => {
        instruction.dst = *register;
      }

      (Operand::Src, Token::Reg(register)) if register.is_valid() => {
        instruction.src = *register;
      }

      (Operand::Off, Token::Num(number)) => {
        match i16::try_from(*number) {
          Ok(offset) => instruction.offset = offset,
          Err(_)     => return Syntax::BadOperand { line, name, position },
        }
      }

      (Operand::Imm, Token::Num(number)) => {
        // Only the double word load has room for more than 32 bits.
        if !instruction.opcode.is_dword_load() && i32::try_from(*number).is_err() {
          return Syntax::BadOperand { line, name, position };
        }
        instruction.constant = *number;
      }

      _ => {
        return Syntax::BadOperand { line, name, position };
      }
    }
  }

  Syntax::Instruction(instruction)
}

/**
  Parses assembly text into one `ParsedSyntax` per instruction line. Blank
  and comment-only lines produce nothing; every other line produces either
  an instruction or a diagnostic carrying its 1-based line number.
*/
pub fn parse_assembly(text: &str) -> Vec<ParsedSyntax<'_>> {
  let mut parsed = Vec::new();

  for (index, raw_line) in text.lines().enumerate() {
    let line = (index + 1) as u32;
    let code = match raw_line.find('%') {
      Some(start) => &raw_line[..start],
      None        => raw_line,
    };
    if code.trim().is_empty() {
      continue;
    }

    let syntax = match instruction_line(code) {
      Ok(("", (name, args))) => build_instruction(line, name, args.unwrap_or_default()),
      _                      => Syntax::Malformed { line },
    };

    #[cfg(feature = "trace_assembly")]
    println!("line {}: {}", line, syntax);

    parsed.push(syntax);
  }

  parsed
}

/// Assembles a whole program, or reports every bad line at once.
pub fn assemble(text: &str) -> Result<Vec<Instruction>, Vec<String>> {
  let mut program = Vec::new();
  let mut errors = Vec::new();

  for syntax in parse_assembly(text) {
    match syntax {
      Syntax::Instruction(instruction) => program.push(instruction),
      problem                          => errors.push(format!("{}", problem)),
    }
  }

  match errors.is_empty() {
    true  => Ok(program),
    false => Err(errors),
  }
}
