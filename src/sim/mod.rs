pub mod clock;
pub mod control;
pub mod event;
pub mod session;
pub mod step;
pub mod world;
