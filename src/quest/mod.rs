pub mod definition;
pub mod payload;
mod wire;

pub use definition::*;
pub use payload::*;
