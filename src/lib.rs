pub mod libs;

// Re-export the io helpers at the crate root
pub use crate::libs::io::{reader, writer};
