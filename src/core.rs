use fxhash::FxHashMap;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::time::Instant;

use crate::decoder::*;
use crate::hash_table::DEFAULT_BUCKET_COUNT;
use crate::instruction::*;
use crate::memory::*;
use crate::register::*;
use crate::types::*;
use crate::utils::*;

/// One simulation: a register file and a memory, mutated line by line.
pub struct Core {
    memory: Memory,
    int_registers: RegisterFile,
    instruction_count: InstructionCount,
    skipped_count: InstructionCount,
    inst_stats: FxHashMap<&'static str, InstructionCount>,
}

pub struct CoreProps {
    pub bucket_count: usize,
}

impl Default for CoreProps {
    fn default() -> Self {
        CoreProps {
            bucket_count: DEFAULT_BUCKET_COUNT,
        }
    }
}

pub struct RunProps {
    pub verbose: u32,
    pub take_inst_stats: bool,
    pub show_progress: bool,
}

impl Core {
    /// Takes over `starting_registers`, zeroing all of them, and allocates
    /// an empty memory.
    pub fn init(starting_registers: RegisterFile) -> Self {
        Self::init_with(starting_registers, CoreProps::default())
    }

    pub fn init_with(starting_registers: RegisterFile, props: CoreProps) -> Self {
        let mut int_registers = starting_registers;
        int_registers.clear();
        let memory = Memory::new(props.bucket_count);
        info!(
            "session started with {} memory buckets",
            memory.bucket_count()
        );
        Core {
            memory,
            int_registers,
            instruction_count: 0,
            skipped_count: 0,
            inst_stats: FxHashMap::default(),
        }
    }

    /// Executes one instruction line. Unsupported mnemonics change nothing.
    /// `x0` is zero again once this returns, whatever the line did.
    pub fn step(&mut self, line: &str) {
        let inst = decode_instruction(line);
        match inst.family() {
            Family::Unknown => {
                debug!("skipping {:?}", line);
                self.skipped_count += 1;
            }
            family => {
                self.instruction_count += 1;
                *self.inst_stats.entry(family.name()).or_insert(0) += 1;
            }
        }
        exec_instruction(inst, self);
        self.int_registers.reset_zero();
    }

    pub fn end(self) {
        info!(
            "session ended after {} instructions, {} memory slots in use",
            self.instruction_count,
            self.memory.slot_count()
        );
    }

    pub fn get_int_register(&self, index: RegisterIndex) -> Int {
        self.int_registers.get(index)
    }

    pub fn set_int_register(&mut self, index: RegisterIndex, value: Int) {
        self.int_registers.set(index, value);
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.int_registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn load_word(&self, addr: Address) -> Int {
        self.memory.load_word(addr)
    }

    pub fn store_word(&mut self, addr: Address, value: Int) {
        self.memory.store_word(addr, value);
    }

    pub fn load_byte(&self, addr: Address) -> Int {
        self.memory.load_byte(addr)
    }

    pub fn store_byte(&mut self, addr: Address, value: Int) {
        self.memory.store_byte(addr, value);
    }

    pub fn get_instruction_count(&self) -> InstructionCount {
        self.instruction_count
    }

    pub fn get_skipped_count(&self) -> InstructionCount {
        self.skipped_count
    }

    pub fn get_inst_stat(&self, mnemonic: &str) -> InstructionCount {
        self.inst_stats.get(mnemonic).copied().unwrap_or(0)
    }

    pub fn show_registers(&self) {
        for i in 0..REGISTER_COUNT {
            let value = self.int_registers.get(i);
            let text = format!("x{: <2} 0x{:>08x} ", i, value);
            if value != 0 {
                print!("{}", colorize(&text, BLUE));
            } else {
                print!("{}", text);
            }
            if i % 8 == 7 {
                println!();
            }
        }
    }

    pub fn show_memory(&self) {
        println!("---------- memory ----------");
        for (addr, value) in self.memory.slots() {
            print_filled_with_space(&format!("{}", addr), 12);
            println!("0x{:>08x}", value);
        }
    }

    fn show_inst_stats(&self) {
        println!("---------- inst stats ----------");
        let mut inst_stats: Vec<(&str, InstructionCount)> =
            self.inst_stats.iter().map(|(k, v)| (*k, *v)).collect();
        inst_stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        for inst_stat in &inst_stats {
            print_filled_with_space(&inst_stat.0.to_string(), 8);
            println!(" {}", inst_stat.1);
        }
    }

    pub fn run(&mut self, lines: &[String], props: RunProps) {
        let start_time = Instant::now();

        let pb = if props.show_progress {
            ProgressBar::new(lines.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} \n {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }

        for line in lines {
            self.step(line);
            if props.verbose >= 1 {
                pb.suspend(|| {
                    println!("{}", line);
                    self.show_registers();
                });
            }
            pb.inc(1);
        }
        pb.finish_with_message("End of program.");

        println!(
            "executed instruction count: {}\nelapsed time: {:?}",
            self.instruction_count,
            start_time.elapsed()
        );
        if self.skipped_count > 0 {
            colorized_println(
                &format!("skipped {} unsupported lines", self.skipped_count),
                RED,
            );
        }
        self.show_registers();
        if props.verbose >= 2 {
            self.show_memory();
        }
        if props.take_inst_stats {
            self.show_inst_stats();
        }
    }
}

impl Default for Core {
    fn default() -> Self {
        Core::init(RegisterFile::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    const ITER_NUM: usize = 10000;

    #[test]
    fn test_init_zeroes_registers() {
        let core = Core::init(RegisterFile::from_values([-1; REGISTER_COUNT]));
        assert_eq!(core.registers(), &RegisterFile::new());
        assert_eq!(core.memory().slot_count(), 0);
        assert_eq!(core.memory().bucket_count(), DEFAULT_BUCKET_COUNT);
    }

    #[test]
    fn test_init_with_bucket_count() {
        let core = Core::init_with(RegisterFile::new(), CoreProps { bucket_count: 7 });
        assert_eq!(core.memory().bucket_count(), 7);
    }

    #[test]
    fn test_zero_register_after_step() {
        let mut core = Core::default();
        let lines = [
            "addi x0,x0,5",
            "lui x0,3",
            "sub x0,x5,x6",
            "lw x0,0(x0)",
            "lb x0,3(x0)",
            "jal x0,16",
            "",
        ];
        core.set_int_register(5, 9);
        core.store_word(0, 77);
        for line in lines {
            core.set_int_register(ZERO, 123);
            core.step(line);
            assert_eq!(core.get_int_register(ZERO), 0, "line: {:?}", line);
        }
    }

    #[test]
    fn test_random_writes_to_zero_register() {
        let mut rng = rand::thread_rng();
        let mut core = Core::default();
        for _ in 0..ITER_NUM {
            let imm: Int = rng.gen_range(-2048..2048);
            let rs1 = rng.gen_range(0..REGISTER_COUNT);
            core.step(&format!("addi x0,x{},{}", rs1, imm));
            assert_eq!(core.get_int_register(ZERO), 0);
        }
    }

    #[test]
    fn test_stats() {
        let mut core = Core::default();
        core.step("addi x1,x0,1");
        core.step("addi x1,x1,1");
        core.step("sw x1,0(x0)");
        core.step("mul x1,x1,x1");
        core.step("ori x2,x1,1");
        assert_eq!(core.get_instruction_count(), 4);
        assert_eq!(core.get_skipped_count(), 1);
        assert_eq!(core.get_inst_stat("addi"), 2);
        assert_eq!(core.get_inst_stat("sw"), 1);
        assert_eq!(core.get_inst_stat("ori"), 1);
        assert_eq!(core.get_inst_stat("mul"), 0);
    }

    #[test]
    fn test_unknown_changes_nothing() {
        let mut core = Core::default();
        core.step("addi x3,x0,42");
        let before = core.registers().clone();
        core.step("beq x3,x3,8");
        core.step("mul x3,x3,x3");
        assert_eq!(core.registers(), &before);
        assert_eq!(core.memory().slot_count(), 0);
    }
}
