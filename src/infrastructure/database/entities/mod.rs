//! Database entities module

pub mod tag;
