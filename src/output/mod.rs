//! Destination paths and file writing.
mod destination;
mod writer;

pub use destination::DestinationLayout;
pub use writer::{
    WriteError,
    write_file,
    write_reference,
};
