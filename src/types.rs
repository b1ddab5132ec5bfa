pub type Int = i32;
pub type Address = i32;
pub type Key = i32;
pub type Value = i32;
pub type RegisterIndex = usize;
pub type Imm12 = i32;
pub type Imm20 = i32;
pub type InstructionCount = u64;
pub type Rd = RegisterIndex;
pub type Rs1 = RegisterIndex;
pub type Rs2 = RegisterIndex;
