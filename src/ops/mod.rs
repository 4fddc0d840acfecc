//! Tensor operations and training-time stand-ins needed to reconstruct the
//! serialized generator graph.

pub mod losses;
pub mod reflection_pad;

pub use reflection_pad::ReflectionPad2d;
