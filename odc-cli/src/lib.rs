//! CLI surface and concurrency driver for the `opendrive-to-citygml` and
//! `validate-opendrive` subcommands (spec §5/§6). Parsing OpenDRIVE XML
//! and serializing CityGML are external collaborators (see [`io`]); this
//! crate owns argument parsing, parameter resolution, and the
//! per-dataset concurrency driver that ties validate -> O->R -> R->C
//! together.

pub mod cli;
pub mod driver;
pub mod error;
pub mod io;
pub mod parameters;

pub use cli::{Cli, Command, ConvertArgs, Options};
pub use driver::{init_logging, DatasetOutcome, Driver};
pub use error::{Error, Result};
pub use io::{CityGmlWriter, OpenDriveReader};
pub use parameters::Parameters;
