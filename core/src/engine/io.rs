// ## 📂 File: `src/engine/io.rs`
// ## Normalized input sources + deferred output delivery

use std::fs::{self, File};
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use crate::types::StreamError;

/// Canonical input abstraction
pub enum InputSource {
    Reader(Box<dyn Read + Send>),
    File(PathBuf),
    Memory(Vec<u8>),
}

impl std::fmt::Debug for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Reader(_) => f.write_str("InputSource::Reader(..)"),
            InputSource::File(p) => f.debug_tuple("InputSource::File").field(p).finish(),
            InputSource::Memory(b) => write!(f, "InputSource::Memory({} bytes)", b.len()),
        }
    }
}

/// Canonical output abstraction. Nothing is opened until `deliver`.
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    File(PathBuf),
    /// Write into this directory under a name derived from the call.
    Directory(PathBuf),
    Memory,
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputSink::Writer(_) => f.write_str("OutputSink::Writer(..)"),
            OutputSink::File(p) => f.debug_tuple("OutputSink::File").field(p).finish(),
            OutputSink::Directory(p) => f.debug_tuple("OutputSink::Directory").field(p).finish(),
            OutputSink::Memory => f.write_str("OutputSink::Memory"),
        }
    }
}

/// Where delivered bytes ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Writer,
    File(PathBuf),
    Memory(Vec<u8>),
}

impl Delivery {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Delivery::File(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Delivery::Memory(b) => Some(b),
            _ => None,
        }
    }
}

/// Normalize input source into a boxed reader
pub fn open_input(src: InputSource) -> Result<Box<dyn Read + Send>, StreamError> {
    let reader: Box<dyn Read + Send> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p) => Box::new(File::open(p)?),
        InputSource::Memory(b) => Box::new(Cursor::new(b)),
    };
    Ok(reader)
}

/// Drain an input source fully.
pub fn read_all(src: InputSource) -> Result<Vec<u8>, StreamError> {
    match src {
        InputSource::Memory(b) => Ok(b),
        InputSource::File(p) => Ok(fs::read(p)?),
        InputSource::Reader(mut r) => {
            let mut buf = Vec::new();
            r.read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Hand finished bytes to the sink. `name` is only used for directory sinks.
/// A file that fails mid-write is removed.
pub fn deliver(sink: OutputSink, name: &str, data: Vec<u8>) -> Result<Delivery, StreamError> {
    match sink {
        OutputSink::Memory => Ok(Delivery::Memory(data)),
        OutputSink::Writer(mut w) => {
            w.write_all(&data)?;
            w.flush()?;
            Ok(Delivery::Writer)
        }
        OutputSink::File(path) => write_file(path, &data),
        OutputSink::Directory(dir) => write_file(dir.join(name), &data),
    }
}

fn write_file(path: PathBuf, data: &[u8]) -> Result<Delivery, StreamError> {
    let res = File::create(&path).and_then(|mut f| {
        f.write_all(data)?;
        f.sync_all()
    });
    match res {
        Ok(()) => Ok(Delivery::File(path)),
        Err(e) => {
            let _ = fs::remove_file(&path);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_roundtrip() {
        let data = read_all(InputSource::Memory(b"abc".to_vec())).unwrap();
        let out = deliver(OutputSink::Memory, "x", data).unwrap();
        assert_eq!(out.into_bytes().unwrap(), b"abc");
    }

    #[test]
    fn directory_sink_uses_name() {
        let dir = tempfile::tempdir().unwrap();
        let out = deliver(OutputSink::Directory(dir.path().to_path_buf()), "a.bin", vec![1, 2]).unwrap();
        let path = out.path().unwrap().to_path_buf();
        assert_eq!(path, dir.path().join("a.bin"));
        assert_eq!(fs::read(path).unwrap(), vec![1, 2]);
    }

    #[test]
    fn missing_input_file_is_io() {
        let err = open_input(InputSource::File(PathBuf::from("/nonexistent/chunkpress/in"))).err().unwrap();
        assert!(matches!(err, StreamError::Io(_)));
    }
}
