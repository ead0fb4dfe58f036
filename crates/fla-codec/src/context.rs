use crate::Result;
use crate::ident::{IdGenerator, Identifier};
use crate::profile::{FormatProfile, FormatVersion};
use crate::sink::StreamSink;
use crate::symbols::{ClassRef, SymbolTable};
use crate::writer::{Determinism, FlaWriter};
use std::io::Write;

/// State shared by every stream of one document conversion.
///
/// The class table and the identifier counter span the whole document, so a context must not
/// be reused across documents or shared between concurrent conversions.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    profile: FormatProfile,
    determinism: Determinism,
    symbols: SymbolTable,
    ids: IdGenerator,
}

impl ConversionContext {
    pub fn new(profile: FormatProfile) -> Self {
        Self {
            profile,
            determinism: Determinism::Live,
            symbols: SymbolTable::new(),
            ids: IdGenerator::from_clock(),
        }
    }

    pub fn for_version(version: FormatVersion) -> Self {
        Self::new(version.profile())
    }

    pub fn with_determinism(mut self, determinism: Determinism) -> Self {
        self.determinism = determinism;
        self
    }

    /// Overrides the document creation timestamp used for identifiers.
    pub fn with_timestamp(mut self, epoch_secs: u32) -> Self {
        self.ids = IdGenerator::new(epoch_secs);
        self
    }

    pub fn profile(&self) -> &FormatProfile {
        &self.profile
    }

    pub fn determinism(&self) -> Determinism {
        self.determinism
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Creates a writer configured with this document's profile and determinism.
    pub fn writer<W: Write>(&self, inner: W) -> FlaWriter<W> {
        FlaWriter::new(inner, self.profile, self.determinism)
    }

    pub fn use_class<W: Write>(
        &mut self,
        w: &mut FlaWriter<W>,
        name: &str,
        kind: u16,
    ) -> Result<ClassRef> {
        self.symbols.use_class(w, name, kind)
    }

    pub fn record_object(&mut self) {
        self.symbols.record_object();
    }

    pub fn next_id(&mut self) -> Identifier {
        self.ids.generate()
    }

    /// Generates an identifier and writes its 8-byte form.
    pub fn write_new_id<W: Write>(&mut self, w: &mut FlaWriter<W>) -> Result<Identifier> {
        let id = self.ids.generate();
        w.write_identifier(id)?;
        Ok(id)
    }

    pub fn format_id(&self, id: Identifier) -> String {
        id.render(self.determinism.is_replay())
    }

    /// Opens `name` on `sink`, runs `encode` against it and flushes. Returns the bytes written.
    pub fn write_stream<'s, S, F>(&mut self, sink: &'s mut S, name: &str, encode: F) -> Result<u64>
    where
        S: StreamSink + ?Sized,
        F: FnOnce(&mut Self, &mut FlaWriter<Box<dyn Write + 's>>) -> Result<()>,
    {
        let stream = sink.open_stream(name)?;
        let mut w = self.writer(stream);
        encode(self, &mut w)?;
        w.flush()?;
        Ok(w.position())
    }
}
