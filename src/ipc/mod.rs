pub mod framing;
pub mod pipe;

pub use framing::{Frame, FrameBuffer};
pub use pipe::{serve, serve_connection};
