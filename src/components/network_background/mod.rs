mod component;
mod config;
mod grid;
mod lifecycle;
mod node;
mod packets;
mod render;
mod state;
mod surface;
mod topology;
mod types;

pub use component::NetworkBackground;
pub use types::ColorMode;
