//! Services consumed by the picker engine

pub mod fs;
