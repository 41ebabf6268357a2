pub mod input;
pub mod paint;
pub mod renderer;
