//! Text transformations shared by the cleaning steps and the loader.

pub mod string_ops;
