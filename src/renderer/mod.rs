pub mod map_presenter;
pub use map_presenter::RenderInstruction;

pub mod map_renderer;
pub use map_renderer::MapRenderer;
