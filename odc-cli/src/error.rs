//! Exit-code mapping (spec §6): `0` success, `1` any fatal report entry,
//! `2` usage error — either `clap` rejecting the arguments directly, or
//! a `--parameters` file that fails to parse, which is a malformed
//! invocation rather than an I/O failure — `3` I/O error, `4` unsupported
//! input version.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(std::io::Error),
    #[error("malformed parameters file: {0}")]
    Parameters(String),
    #[error("unsupported OpenDRIVE version: {0}")]
    UnsupportedVersion(String),
}

impl Error {
    /// The process exit code this error maps to (spec §6).
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) => 3,
            Error::Parameters(_) => 2,
            Error::UnsupportedVersion(_) => 4,
        }
    }
}
