use super::MemoryReader;
use crate::error::{MemoryError, Result};
use std::fs::{self, File};
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads another process's memory through `/proc/<pid>/mem`
#[derive(Debug)]
pub struct ProcMemoryReader {
    pid: u32,
    mem: File,
}

impl ProcMemoryReader {
    /// Attach to the first process whose name matches `process_name`
    pub fn attach(process_name: &str) -> Result<Self> {
        Self::attach_in(Path::new("/proc"), process_name)
    }

    fn attach_in(proc_root: &Path, process_name: &str) -> Result<Self> {
        let pid = find_process(proc_root, process_name)?
            .ok_or_else(|| MemoryError::ProcessNotFound(process_name.to_string()))?;
        Self::open_pid(proc_root, pid)
    }

    fn open_pid(proc_root: &Path, pid: u32) -> Result<Self> {
        let mem_path = proc_root.join(pid.to_string()).join("mem");
        let mem = File::open(&mem_path).map_err(|e| MemoryError::Read {
            address: 0,
            len: 0,
            details: format!("cannot open {}: {}", mem_path.display(), e),
        })?;

        info!("Attached to process {}", pid);
        Ok(Self { pid, mem })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }
}

impl MemoryReader for ProcMemoryReader {
    fn read_i32(&mut self, address: u64) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.mem
            .read_exact_at(&mut buf, address)
            .map_err(|e| MemoryError::Read {
                address,
                len: buf.len(),
                details: e.to_string(),
            })?;
        Ok(i32::from_le_bytes(buf))
    }
}

/// Executable name as the kernel and the command line report it
fn process_names(entry: &Path) -> Vec<String> {
    let mut names = Vec::new();

    if let Ok(comm) = fs::read_to_string(entry.join("comm")) {
        names.push(comm.trim_end().to_string());
    }

    if let Ok(cmdline) = fs::read(entry.join("cmdline")) {
        if let Some(argv0) = cmdline.split(|&b| b == 0).next() {
            let argv0 = String::from_utf8_lossy(argv0);
            // Windows-style paths show up for programs run under a compatibility layer
            if let Some(base) = argv0.rsplit(['/', '\\']).next() {
                if !base.is_empty() {
                    names.push(base.to_string());
                }
            }
        }
    }

    names
}

fn find_process(proc_root: &Path, process_name: &str) -> Result<Option<u32>> {
    let mut entries: Vec<(u32, PathBuf)> = fs::read_dir(proc_root)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let pid = entry.file_name().to_str()?.parse::<u32>().ok()?;
            Some((pid, entry.path()))
        })
        .collect();
    entries.sort_unstable_by_key(|(pid, _)| *pid);

    for (pid, path) in entries {
        if process_names(&path).iter().any(|name| name == process_name) {
            debug!("Found process {} with pid {}", process_name, pid);
            return Ok(Some(pid));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_process(root: &Path, pid: u32, comm: &str, cmdline: &[u8], mem: &[u8]) {
        let dir = root.join(pid.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("comm"), format!("{}\n", comm)).unwrap();
        fs::write(dir.join("cmdline"), cmdline).unwrap();
        fs::write(dir.join("mem"), mem).unwrap();
    }

    #[test]
    fn test_process_not_found() {
        let root = tempfile::tempdir().unwrap();
        fake_process(root.path(), 10, "bash", b"/bin/bash\0", &[]);

        let err = ProcMemoryReader::attach_in(root.path(), "Endless.exe").unwrap_err();
        assert!(matches!(
            err,
            crate::error::ColorbotError::Memory(MemoryError::ProcessNotFound(_))
        ));
    }

    #[test]
    fn test_attach_by_cmdline_and_read() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("self")).unwrap();
        fake_process(root.path(), 10, "bash", b"/bin/bash\0", &[]);

        let mut mem = vec![0u8; 16];
        mem[8..12].copy_from_slice(&275i32.to_le_bytes());
        fake_process(
            root.path(),
            42,
            "wine-preloader",
            b"C:\\Games\\Endless\\Endless.exe\0--flag\0",
            &mem,
        );

        let mut reader = ProcMemoryReader::attach_in(root.path(), "Endless.exe").unwrap();
        assert_eq!(reader.pid(), 42);
        assert_eq!(reader.read_i32(8).unwrap(), 275);
        assert!(reader.read_i32(14).is_err());
    }
}
