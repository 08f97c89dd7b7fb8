//! Boundary adapters for reading booking scripts and printing results.

pub mod csv;
