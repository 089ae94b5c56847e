//! Query functions, one module per table.

pub mod gardens;
pub mod placements;
pub mod plants;
