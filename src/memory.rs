use log::trace;

use crate::hash_table::*;
use crate::types::*;

pub const WORD_SIZE: usize = 4;

const BYTE0_MASK: Int = 0x0000_00ff;
const BYTE1_MASK: Int = 0x0000_ff00;
const BYTE2_MASK: Int = 0x00ff_0000;
const BYTE3_MASK: Int = 0xff00_0000_u32 as Int;
const LANE_MASKS: [Int; WORD_SIZE] = [BYTE0_MASK, BYTE1_MASK, BYTE2_MASK, BYTE3_MASK];
const BYTE_SIGN_EXTEND: Int = 0xffff_ff00_u32 as Int;

/// Sparse memory keyed by byte address.
///
/// A slot does not hold a byte. It holds the bits of the word lane that the
/// address selects, left in place: storing word `v` at `a` writes
/// `v & 0xff` to `a`, `v & 0xff00` to `a + 1` and so on, so that a word
/// load is the sum of four slots. Byte stores follow the same convention,
/// using `addr mod 4` as the lane.
pub struct Memory {
    values: ChainedHashTable,
}

pub fn lane_of(addr: Address) -> u32 {
    addr.rem_euclid(WORD_SIZE as Address) as u32
}

impl Memory {
    pub fn new(bucket_count: usize) -> Self {
        Memory {
            values: ChainedHashTable::new(bucket_count),
        }
    }

    fn load_slot(&self, addr: Address) -> Int {
        let value = self.values.get(addr);
        trace!("memory[{}] -> {:#010x}", addr, value);
        value
    }

    fn store_slot(&mut self, addr: Address, value: Int) {
        trace!("memory[{}] <- {:#010x}", addr, value);
        self.values.put(addr, value);
    }

    pub fn load_word(&self, addr: Address) -> Int {
        let mut load_value: Int = 0;
        for i in 0..WORD_SIZE as Address {
            load_value = load_value.wrapping_add(self.load_slot(addr.wrapping_add(i)));
        }
        load_value
    }

    pub fn store_word(&mut self, addr: Address, value: Int) {
        for (i, mask) in LANE_MASKS.iter().enumerate() {
            self.store_slot(addr.wrapping_add(i as Address), value & mask);
        }
    }

    /// Sign-extended byte of the lane `addr` selects.
    pub fn load_byte(&self, addr: Address) -> Int {
        let load = self.load_slot(addr) >> (8 * lane_of(addr));
        if load & 0x80 != 0 {
            load | BYTE_SIGN_EXTEND
        } else {
            load
        }
    }

    /// Stores the low byte of `value` into the lane `addr` selects,
    /// replacing whatever the slot held before.
    pub fn store_byte(&mut self, addr: Address, value: Int) {
        let store = (value & BYTE0_MASK) << (8 * lane_of(addr));
        self.store_slot(addr, store);
    }

    pub fn slot_count(&self) -> usize {
        self.values.size()
    }

    pub fn bucket_count(&self) -> usize {
        self.values.bucket_count()
    }

    /// Written slots sorted by address.
    pub fn slots(&self) -> Vec<(Address, Int)> {
        let mut slots: Vec<(Address, Int)> = self.values.iter().collect();
        slots.sort_by_key(|(addr, _)| *addr);
        slots
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    const ITER_NUM: usize = 100000;

    #[test]
    fn test_lane_of() {
        assert_eq!(lane_of(0), 0);
        assert_eq!(lane_of(7), 3);
        assert_eq!(lane_of(-1), 3);
        assert_eq!(lane_of(-4), 0);
    }

    #[test]
    fn test_store_word_layout() {
        let mut memory = Memory::default();
        memory.store_word(100, 0x1234_5678);
        assert_eq!(
            memory.slots(),
            vec![(100, 0x78), (101, 0x5600), (102, 0x34_0000), (103, 0x1200_0000)]
        );
    }

    #[test]
    fn test_unwritten_reads_zero() {
        let memory = Memory::default();
        assert_eq!(memory.load_word(12), 0);
        assert_eq!(memory.load_byte(13), 0);
        assert_eq!(memory.slot_count(), 0);
    }

    #[test]
    fn test_word_round_trip() {
        let mut rng = rand::thread_rng();
        let mut memory = Memory::default();
        for _ in 0..ITER_NUM {
            let addr = rng.gen_range(-1_000_000..1_000_000) * WORD_SIZE as Address;
            let value: Int = rng.gen();
            memory.store_word(addr, value);
            assert_eq!(memory.load_word(addr), value, "addr: {}", addr);
        }
    }

    #[test]
    fn test_byte_from_word() {
        let mut rng = rand::thread_rng();
        let mut memory = Memory::default();
        for _ in 0..ITER_NUM {
            let addr = rng.gen_range(-1_000_000..1_000_000) * WORD_SIZE as Address;
            let value: Int = rng.gen();
            memory.store_word(addr, value);
            for lane in 0..WORD_SIZE as Address {
                let expected = (value >> (8 * lane)) as i8 as Int;
                assert_eq!(
                    memory.load_byte(addr + lane),
                    expected,
                    "value: {:#010x}, lane: {}",
                    value,
                    lane
                );
            }
        }
    }

    #[test]
    fn test_bytes_make_word() {
        let mut memory = Memory::default();
        memory.store_byte(8, 0x1ef);
        memory.store_byte(9, 0xbe);
        memory.store_byte(10, 0xad);
        memory.store_byte(11, 0xde);
        assert_eq!(memory.load_word(8), 0xdead_beef_u32 as Int);
        assert_eq!(memory.load_byte(8), 0xef_u8 as i8 as Int);
        assert_eq!(memory.load_byte(10), -83);
    }

    #[test]
    fn test_store_byte_replaces_slot() {
        let mut memory = Memory::default();
        memory.store_word(0, -1);
        memory.store_byte(1, 0x12);
        assert_eq!(memory.load_word(0), 0xffff_12ff_u32 as Int);
        assert_eq!(memory.slot_count(), 4);
    }
}
