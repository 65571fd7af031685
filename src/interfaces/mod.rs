//! Outer interfaces used by the demonstration host.

pub mod csv;
