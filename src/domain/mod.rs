/// Pure game rules: cell variants, gravity state, key families, input
/// commands and the drawing capability. Nothing here touches I/O.

pub mod entity;
pub mod fall;
pub mod input;
pub mod key;
pub mod paint;
pub mod tile;
