use log::warn;

use crate::types::*;
use crate::utils::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IntRegister {
    value: Int,
}

impl IntRegister {
    pub fn new() -> Self {
        IntRegister { value: 0 }
    }
    pub fn set(&mut self, value: Int) {
        self.value = value;
    }
    pub fn get(&self) -> Int {
        self.value
    }
}

/// The 32 integer registers. `x0` may be written while an instruction runs;
/// the session puts it back to zero once the instruction has finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    registers: [IntRegister; REGISTER_COUNT],
}

impl RegisterFile {
    pub fn new() -> Self {
        RegisterFile {
            registers: [IntRegister::new(); REGISTER_COUNT],
        }
    }

    pub fn from_values(values: [Int; REGISTER_COUNT]) -> Self {
        let mut registers = [IntRegister::new(); REGISTER_COUNT];
        for (register, value) in registers.iter_mut().zip(values) {
            register.set(value);
        }
        RegisterFile { registers }
    }

    /// Out-of-range indices read as 0.
    pub fn get(&self, index: RegisterIndex) -> Int {
        match self.registers.get(index) {
            Some(register) => register.get(),
            None => {
                warn!("read from nonexistent register x{}", index);
                0
            }
        }
    }

    /// Out-of-range indices are ignored.
    pub fn set(&mut self, index: RegisterIndex, value: Int) {
        match self.registers.get_mut(index) {
            Some(register) => register.set(value),
            None => warn!("write to nonexistent register x{} dropped", index),
        }
    }

    pub fn reset_zero(&mut self) {
        self.registers[ZERO].set(0);
    }

    pub fn clear(&mut self) {
        for register in self.registers.iter_mut() {
            register.set(0);
        }
    }

    pub fn values(&self) -> [Int; REGISTER_COUNT] {
        let mut values = [0; REGISTER_COUNT];
        for (value, register) in values.iter_mut().zip(self.registers.iter()) {
            *value = register.get();
        }
        values
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let registers = RegisterFile::new();
        assert_eq!(registers.values(), [0; REGISTER_COUNT]);
    }

    #[test]
    fn test_zero_register_reset() {
        let mut registers = RegisterFile::new();
        registers.set(ZERO, 99);
        assert_eq!(registers.get(ZERO), 99);
        registers.reset_zero();
        assert_eq!(registers.get(ZERO), 0);
    }

    #[test]
    fn test_out_of_range() {
        let mut registers = RegisterFile::new();
        registers.set(32, 5);
        registers.set(1000, 5);
        assert_eq!(registers.get(32), 0);
        assert_eq!(registers.values(), [0; REGISTER_COUNT]);
    }

    #[test]
    fn test_clear() {
        let mut values = [0; REGISTER_COUNT];
        for (i, value) in values.iter_mut().enumerate() {
            *value = i as Int * 7 - 50;
        }
        let mut registers = RegisterFile::from_values(values);
        assert_eq!(registers.get(31), 31 * 7 - 50);
        registers.clear();
        assert_eq!(registers, RegisterFile::new());
    }
}
