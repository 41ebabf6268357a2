pub mod entity;
pub mod food;
pub mod grid;
