pub mod canvas;
pub mod renderer;

pub use canvas::Canvas;
pub use renderer::{Renderer, Screen};
