pub(crate) mod encode;
pub(crate) mod goldens;

pub(crate) use encode::*;
pub(crate) use goldens::*;
