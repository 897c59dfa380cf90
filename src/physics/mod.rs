pub mod gravity;
pub mod vec2;
