use log::debug;

use crate::core::*;
use crate::decoder::*;
use crate::types::*;

const SHAMT_MASK: Int = 0x1f;

pub fn exec_instruction(inst: Instruction, core: &mut Core) {
    match inst {
        Instruction::R(op, rd, rs1, rs2) => {
            exec_r_instruction(op, rd, rs1, rs2, core);
        }
        Instruction::I(op, rd, rs1, imm) => {
            exec_i_instruction(op, rd, rs1, imm, core);
        }
        Instruction::Mem(op, reg, imm, base) => {
            exec_mem_instruction(op, reg, imm, base, core);
        }
        Instruction::U(rd, imm) => {
            exec_u_instruction(rd, imm, core);
        }
        Instruction::Other => {}
    }
}

fn exec_r_instruction(op: RegisterOp, rd: Rd, rs1: Rs1, rs2: Rs2, core: &mut Core) {
    let lhs = core.get_int_register(rs1);
    let rhs = core.get_int_register(rs2);
    let value = match op {
        RegisterOp::Add => lhs.wrapping_add(rhs),
        RegisterOp::Sub => lhs.wrapping_sub(rhs),
        RegisterOp::And => lhs & rhs,
        RegisterOp::Or => lhs | rhs,
        RegisterOp::Xor => lhs ^ rhs,
        RegisterOp::Slt => {
            if lhs < rhs {
                1
            } else {
                0
            }
        }
        RegisterOp::Sll => lhs << (rhs & SHAMT_MASK),
        // >> on a signed integer is arithmetic
        RegisterOp::Sra => lhs >> (rhs & SHAMT_MASK),
    };
    core.set_int_register(rd, value);
}

fn exec_i_instruction(op: ImmediateOp, rd: Rd, rs1: Rs1, imm: Imm12, core: &mut Core) {
    match op {
        ImmediateOp::Addi => {
            let value = core.get_int_register(rs1).wrapping_add(imm);
            core.set_int_register(rd, value);
        }
        ImmediateOp::Andi => {
            let value = core.get_int_register(rs1) & imm;
            core.set_int_register(rd, value);
        }
        ImmediateOp::Ori | ImmediateOp::Xori | ImmediateOp::Slti => {
            debug!("{:?} is recognized but not executed", op);
        }
    }
}

fn exec_mem_instruction(
    op: MemoryOp,
    reg: RegisterIndex,
    imm: Imm12,
    base: RegisterIndex,
    core: &mut Core,
) {
    let addr: Address = core.get_int_register(base).wrapping_add(imm);
    match op {
        MemoryOp::Lw => {
            let value = core.load_word(addr);
            core.set_int_register(reg, value);
        }
        MemoryOp::Lb => {
            let value = core.load_byte(addr);
            core.set_int_register(reg, value);
        }
        MemoryOp::Sw => {
            let value = core.get_int_register(reg);
            core.store_word(addr, value);
        }
        MemoryOp::Sb => {
            let value = core.get_int_register(reg);
            core.store_byte(addr, value);
        }
    }
}

fn exec_u_instruction(rd: Rd, imm: Imm20, core: &mut Core) {
    let upimm = imm << 12;
    core.set_int_register(rd, upimm);
}
