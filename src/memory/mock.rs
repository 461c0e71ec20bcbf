use super::MemoryReader;
use crate::error::Result;
use std::collections::VecDeque;

/// Memory backend returning a fixed sequence of values, repeating the last one
#[derive(Debug, Clone)]
pub struct ScriptedMemoryReader {
    pending: VecDeque<i32>,
    last: i32,
    reads: usize,
}

impl ScriptedMemoryReader {
    pub fn new<I: IntoIterator<Item = i32>>(values: I) -> Self {
        let pending: VecDeque<i32> = values.into_iter().collect();
        let last = pending.front().copied().unwrap_or_default();
        Self {
            pending,
            last,
            reads: 0,
        }
    }

    pub fn constant(value: i32) -> Self {
        Self::new([value])
    }

    /// Queue more values after the current script
    pub fn push(&mut self, value: i32) {
        self.pending.push_back(value);
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl MemoryReader for ScriptedMemoryReader {
    fn read_i32(&mut self, _address: u64) -> Result<i32> {
        self.reads += 1;
        if let Some(value) = self.pending.pop_front() {
            self.last = value;
        }
        Ok(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_then_repeat() {
        let mut reader = ScriptedMemoryReader::new([300, 100]);
        assert_eq!(reader.read_i32(0).unwrap(), 300);
        assert_eq!(reader.read_i32(0).unwrap(), 100);
        assert_eq!(reader.read_i32(0).unwrap(), 100);
        reader.push(310);
        assert_eq!(reader.read_i32(0).unwrap(), 310);
        assert_eq!(reader.reads(), 4);
    }

    #[test]
    fn test_constant() {
        let mut reader = ScriptedMemoryReader::constant(-5);
        assert_eq!(reader.read_i32(0x10).unwrap(), -5);
        assert_eq!(reader.read_i32(0x10).unwrap(), -5);
    }
}
