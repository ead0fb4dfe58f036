//! Class interning for serialized object streams.
//!
//! The first use of a class name writes its full definition; every later use writes a
//! back-reference to the ordinal assigned at definition time. Ordinals count both defined
//! classes and objects written before the definition, so the table must live for a whole
//! document rather than a single shape.

use crate::Result;
use crate::string::encode_class_name;
use crate::writer::FlaWriter;
use indexmap::IndexMap;
use std::io::Write;

/// Marker opening a class definition.
pub const NEW_CLASS_TAG: u16 = 0xFFFF;
/// Short back-references are `CLASS_TAG + ordinal`.
pub const CLASS_TAG: u16 = 0x8000;
/// Marker introducing a 32-bit back-reference.
pub const BIG_OBJECT_TAG: u16 = 0x7FFF;
/// Long back-references are `BIG_CLASS_TAG + ordinal`.
pub const BIG_CLASS_TAG: u32 = 0x8000_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassRef {
    Defined(u32),
    Referenced(u32),
}

impl ClassRef {
    pub fn ordinal(self) -> u32 {
        match self {
            ClassRef::Defined(ordinal) | ClassRef::Referenced(ordinal) => ordinal,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    classes: IndexMap<String, u32>,
    objects: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Objects written so far, including every `use_class` call.
    pub fn object_count(&self) -> u32 {
        self.objects
    }

    pub fn ordinal(&self, name: &str) -> Option<u32> {
        self.classes.get(name).copied()
    }

    /// Defined classes in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.classes.iter().map(|(name, ordinal)| (name.as_str(), *ordinal))
    }

    /// Counts an object written without a class tag.
    pub fn record_object(&mut self) {
        self.objects += 1;
    }

    pub fn use_class<W: Write>(
        &mut self,
        w: &mut FlaWriter<W>,
        name: &str,
        kind: u16,
    ) -> Result<ClassRef> {
        let class_ref = match self.classes.get(name) {
            Some(&ordinal) => {
                write_reference(w, ordinal)?;
                ClassRef::Referenced(ordinal)
            }
            None => {
                encode_class_name(name)?;
                let ordinal = self.classes.len() as u32 + self.objects;
                w.write_u16(NEW_CLASS_TAG)?;
                w.write_u16(kind)?;
                w.write_class_name(name)?;
                self.classes.insert(name.to_string(), ordinal);
                ClassRef::Defined(ordinal)
            }
        };
        self.objects += 1;
        Ok(class_ref)
    }
}

fn write_reference<W: Write>(w: &mut FlaWriter<W>, ordinal: u32) -> Result<()> {
    if ordinal < u32::from(BIG_OBJECT_TAG) {
        return w.write_u16(CLASS_TAG + ordinal as u16);
    }
    w.write_u16(BIG_OBJECT_TAG)?;
    w.write_u32(BIG_CLASS_TAG.wrapping_add(ordinal))
}
