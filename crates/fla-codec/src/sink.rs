//! Named output streams.
//!
//! The container format that finally stores the streams is not this crate's concern; a sink
//! only has to hand out one writer per stream name.

use crate::Result;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

pub trait StreamSink {
    /// Opens (or truncates) the stream called `name`.
    fn open_stream(&mut self, name: &str) -> Result<Box<dyn Write + '_>>;
}

/// Counts bytes and reports the total when the stream is dropped.
struct TracedStream<W: Write> {
    name: String,
    inner: W,
    bytes: u64,
}

impl<W: Write> TracedStream<W> {
    fn new(name: &str, inner: W) -> Self {
        tracing::debug!(stream = name, "open stream");
        Self {
            name: name.to_string(),
            inner,
            bytes: 0,
        }
    }
}

impl<W: Write> Write for TracedStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> Drop for TracedStream<W> {
    fn drop(&mut self) {
        tracing::debug!(stream = %self.name, bytes = self.bytes, "close stream");
    }
}

/// Keeps every stream in memory, in the order the streams were first opened.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    streams: IndexMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.streams.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.streams.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn into_streams(self) -> IndexMap<String, Vec<u8>> {
        self.streams
    }
}

impl StreamSink for MemorySink {
    fn open_stream(&mut self, name: &str) -> Result<Box<dyn Write + '_>> {
        let buf = self.streams.entry(name.to_string()).or_default();
        buf.clear();
        Ok(Box::new(TracedStream::new(name, buf)))
    }
}

/// Writes each stream to `<root>/<name>`; `/` in a name creates subdirectories.
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn stream_path(&self, name: &str) -> io::Result<PathBuf> {
        let rel = Path::new(name);
        let plain = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if name.is_empty() || !plain {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid stream name: {name:?}"),
            ));
        }
        Ok(self.root.join(rel))
    }
}

impl StreamSink for DirSink {
    fn open_stream(&mut self, name: &str) -> Result<Box<dyn Write + '_>> {
        let path = self.stream_path(name)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        Ok(Box::new(TracedStream::new(name, BufWriter::new(file))))
    }
}
