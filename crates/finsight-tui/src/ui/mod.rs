//! Screen layout and rendering.

mod render;

pub use render::render;
