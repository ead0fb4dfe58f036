mod edges;
mod ident;

use crate::*;

pub(crate) fn writer_for(version: FormatVersion) -> FlaWriter<Vec<u8>> {
    FlaWriter::new(Vec::new(), version.profile(), Determinism::Live)
}

pub(crate) fn replay_writer_for(version: FormatVersion) -> FlaWriter<Vec<u8>> {
    FlaWriter::new(Vec::new(), version.profile(), Determinism::Replay)
}
