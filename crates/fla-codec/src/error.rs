pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("coordinate {axis} = {value} is outside the 24.8 fixed-point range")]
    NumericRange { axis: char, value: f64 },

    #[error("matrix component {component} = {value} is outside the 32-bit fixed-point range")]
    MatrixRange { component: &'static str, value: f64 },

    #[error("invalid edge path near `{fragment}`: {message}")]
    InvalidEdgePath { fragment: String, message: String },

    #[error("invalid identifier `{text}` (expected `xxxxxxxx-xxxxxxxx`, lowercase hex)")]
    InvalidIdentifierFormat { text: String },

    #[error("class name is {len} bytes long; at most 65535 fit the length prefix")]
    ClassNameTooLong { len: usize },

    #[error("unknown format version: {name}")]
    UnknownFormatVersion { name: String },

    #[error("invalid format profile: {0}")]
    ProfileConfig(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn edge_path(fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEdgePath {
            fragment: fragment.into(),
            message: message.into(),
        }
    }
}
