use log::debug;

use crate::types::*;
use crate::utils::*;

const IMM_SIGN_BIT: Int = 1 << 11;
const IMM_SIGN_EXTEND: Int = 0xffff_f000_u32 as Int;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterOp {
    Add,
    Sub,
    And,
    Or,
    Xor,
    Slt,
    Sll,
    Sra,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImmediateOp {
    Addi,
    Andi,
    Ori,
    Xori,
    Slti,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoryOp {
    Lw,
    Lb,
    Sw,
    Sb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Register(RegisterOp),
    Immediate(ImmediateOp),
    Memory(MemoryOp),
    UpperImmediate,
    Unknown,
}

/// A fully decoded line. `Mem` carries the data register (destination of a
/// load, source of a store), the offset and the base register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    R(RegisterOp, Rd, Rs1, Rs2),
    I(ImmediateOp, Rd, Rs1, Imm12),
    Mem(MemoryOp, RegisterIndex, Imm12, RegisterIndex),
    U(Rd, Imm20),
    Other,
}

impl Family {
    pub fn name(&self) -> &'static str {
        match self {
            Family::Register(op) => match op {
                RegisterOp::Add => "add",
                RegisterOp::Sub => "sub",
                RegisterOp::And => "and",
                RegisterOp::Or => "or",
                RegisterOp::Xor => "xor",
                RegisterOp::Slt => "slt",
                RegisterOp::Sll => "sll",
                RegisterOp::Sra => "sra",
            },
            Family::Immediate(op) => match op {
                ImmediateOp::Addi => "addi",
                ImmediateOp::Andi => "andi",
                ImmediateOp::Ori => "ori",
                ImmediateOp::Xori => "xori",
                ImmediateOp::Slti => "slti",
            },
            Family::Memory(op) => match op {
                MemoryOp::Lw => "lw",
                MemoryOp::Lb => "lb",
                MemoryOp::Sw => "sw",
                MemoryOp::Sb => "sb",
            },
            Family::UpperImmediate => "lui",
            Family::Unknown => "unknown",
        }
    }
}

impl Instruction {
    pub fn family(&self) -> Family {
        match self {
            Instruction::R(op, ..) => Family::Register(*op),
            Instruction::I(op, ..) => Family::Immediate(*op),
            Instruction::Mem(op, ..) => Family::Memory(*op),
            Instruction::U(..) => Family::UpperImmediate,
            Instruction::Other => Family::Unknown,
        }
    }
}

pub fn classify(mnemonic: &str) -> Family {
    match mnemonic {
        "add" => Family::Register(RegisterOp::Add),
        "sub" => Family::Register(RegisterOp::Sub),
        "and" => Family::Register(RegisterOp::And),
        "or" => Family::Register(RegisterOp::Or),
        "xor" => Family::Register(RegisterOp::Xor),
        "slt" => Family::Register(RegisterOp::Slt),
        "sll" => Family::Register(RegisterOp::Sll),
        "sra" => Family::Register(RegisterOp::Sra),
        "addi" => Family::Immediate(ImmediateOp::Addi),
        "andi" => Family::Immediate(ImmediateOp::Andi),
        "ori" => Family::Immediate(ImmediateOp::Ori),
        "xori" => Family::Immediate(ImmediateOp::Xori),
        "slti" => Family::Immediate(ImmediateOp::Slti),
        "lw" => Family::Memory(MemoryOp::Lw),
        "lb" => Family::Memory(MemoryOp::Lb),
        "sw" => Family::Memory(MemoryOp::Sw),
        "sb" => Family::Memory(MemoryOp::Sb),
        "lui" => Family::UpperImmediate,
        _ => Family::Unknown,
    }
}

/// Walks an operand string field by field without modifying it.
struct Operands<'a> {
    rest: &'a str,
}

impl<'a> Operands<'a> {
    fn new(text: &'a str) -> Self {
        Operands { rest: text }
    }

    /// Text up to the next `delim`. When there is none, everything left.
    fn until(&mut self, delim: char) -> &'a str {
        match self.rest.split_once(delim) {
            Some((field, rest)) => {
                self.rest = rest;
                field
            }
            None => std::mem::take(&mut self.rest),
        }
    }

    fn remainder(self) -> &'a str {
        self.rest
    }
}

/// Register number written after the first `x` of the token.
pub fn pull_register(token: &str) -> RegisterIndex {
    match token.find('x') {
        Some(pos) => RegisterIndex::try_from(atoi(&token[pos + 1..])).unwrap_or(RegisterIndex::MAX),
        None => ZERO,
    }
}

/// Converts an immediate token to an integer. Tokens containing `0x` are
/// read with their base taken from the prefix, anything else as decimal.
///
/// Bit 11 decides the sign: when it is set, every bit from 12 upward is set
/// too. Hexadecimal tokens are only extended when `bit_width` is 12,
/// decimal tokens always are.
pub fn decode_immediate(token: &str, bit_width: u32) -> Int {
    if token.contains("0x") {
        let value = strtol_auto(token);
        if value & IMM_SIGN_BIT != 0 && bit_width == 12 {
            value | IMM_SIGN_EXTEND
        } else {
            value
        }
    } else {
        let value = atoi(token);
        if value & IMM_SIGN_BIT != 0 {
            value | IMM_SIGN_EXTEND
        } else {
            value
        }
    }
}

/// Mnemonic and operand text, split at the first whitespace.
pub fn split_line(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.split_once(char::is_whitespace) {
        Some((mnemonic, operands)) => (mnemonic, operands),
        None => (line.trim_end(), ""),
    }
}

fn decode_r_instruction(op: RegisterOp, text: &str) -> Instruction {
    let mut operands = Operands::new(text);
    let rd = pull_register(operands.until(','));
    let rs1 = pull_register(operands.until(','));
    let rs2 = pull_register(operands.remainder());
    Instruction::R(op, rd, rs1, rs2)
}

fn decode_i_instruction(op: ImmediateOp, text: &str) -> Instruction {
    let mut operands = Operands::new(text);
    let rd = pull_register(operands.until(','));
    let rs1 = pull_register(operands.until(','));
    let imm = decode_immediate(operands.remainder(), 12);
    Instruction::I(op, rd, rs1, imm)
}

fn decode_mem_instruction(op: MemoryOp, text: &str) -> Instruction {
    let mut operands = Operands::new(text);
    let reg = pull_register(operands.until(','));
    let imm = decode_immediate(operands.until('('), 12);
    let base = pull_register(operands.until(')'));
    Instruction::Mem(op, reg, imm, base)
}

fn decode_u_instruction(text: &str) -> Instruction {
    let mut operands = Operands::new(text);
    let rd = pull_register(operands.until(','));
    let imm = decode_immediate(operands.remainder(), 20);
    Instruction::U(rd, imm)
}

pub fn decode_instruction(line: &str) -> Instruction {
    let (mnemonic, text) = split_line(line);
    let inst = match classify(mnemonic) {
        Family::Register(op) => decode_r_instruction(op, text),
        Family::Immediate(op) => decode_i_instruction(op, text),
        Family::Memory(op) => decode_mem_instruction(op, text),
        Family::UpperImmediate => decode_u_instruction(text),
        Family::Unknown => Instruction::Other,
    };
    debug!("decoded {:?} from {:?}", inst, line);
    inst
}
