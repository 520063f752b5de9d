pub mod check;
pub mod common;
pub mod print;
pub mod transform;
