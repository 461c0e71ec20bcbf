mod mock;
#[cfg(target_os = "linux")]
mod proc;

use crate::error::Result;

pub use mock::ScriptedMemoryReader;
#[cfg(target_os = "linux")]
pub use proc::ProcMemoryReader;

/// Reads values out of the game process
pub trait MemoryReader {
    fn read_i32(&mut self, address: u64) -> Result<i32>;
}

impl<T: MemoryReader + ?Sized> MemoryReader for Box<T> {
    fn read_i32(&mut self, address: u64) -> Result<i32> {
        (**self).read_i32(address)
    }
}
