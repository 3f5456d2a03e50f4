pub mod log;
pub use log::*;

mod rect;
pub use rect::*;

mod stats;
pub use stats::*;

mod vec2;
pub use vec2::*;

mod vec3;
pub use vec3::*;
