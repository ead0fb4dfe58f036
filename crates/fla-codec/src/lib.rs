#![forbid(unsafe_code)]

//! Byte-exact encoder for the streams of legacy Flash authoring documents (FLA).
//!
//! Design goals:
//! - byte parity with the reference writer for every supported format generation
//! - deterministic, diffable output in replay mode (golden files with `X`/`U`/`YYY` wildcards)
//! - no global state: everything document-wide lives in a [`ConversionContext`]
//!
//! The crate covers the encoding layer only. Reading XFL documents, choosing stream names and
//! packaging streams into the compound container is left to the caller, which drives the
//! encoders through a [`FlaWriter`] obtained from its context.
//!
//! ```
//! use fla_codec::{ConversionContext, Determinism, EdgePathCodec, FormatVersion, StyleTriple};
//!
//! let mut ctx = ConversionContext::for_version(FormatVersion::Cs4)
//!     .with_determinism(Determinism::Replay);
//! let mut w = ctx.writer(Vec::new());
//! ctx.use_class(&mut w, "CPicShape", 1)?;
//!
//! let mut edges = EdgePathCodec::new();
//! let records = edges.write_edges(&mut w, "!0 0|10 0|10 10|0 10", StyleTriple::new(1, 0, 0))?;
//! assert_eq!(records, 3);
//! # Ok::<(), fla_codec::Error>(())
//! ```

pub mod context;
pub mod edges;
pub mod error;
pub mod geom;
pub mod golden;
pub mod ident;
pub mod matrix;
pub mod numeric;
pub mod profile;
pub mod sink;
pub mod string;
pub mod symbols;
pub mod writer;

pub use context::ConversionContext;
pub use edges::{
    EdgeOp, EdgePathCodec, LineTag, PenState, SelectionMask, StyleTriple, edges_count,
    format_hex_literal, parse_coordinate, parse_edges,
};
pub use error::{Error, Result};
pub use ident::{IdGenerator, Identifier};
pub use numeric::Tier;
pub use profile::{FormatProfile, FormatVersion};
pub use sink::{DirSink, MemorySink, StreamSink};
pub use symbols::{ClassRef, SymbolTable};
pub use writer::{Determinism, FlaWriter};

#[cfg(test)]
mod tests;
