//! Subcommand modules for the `segpile` binary.

pub mod depth;
