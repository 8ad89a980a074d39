pub mod archive;
pub mod html;
pub mod lenient;
pub mod loader;
pub mod render;
pub mod style;
pub mod types;
pub mod variant;
mod tests;

pub use archive::*;
pub use loader::*;
pub use render::*;
pub use style::*;
pub use types::*;
pub use variant::*;
