pub mod rational_basis;
pub mod tensor_basis;
pub mod tensor_surface;
pub use rational_basis::*;
pub use tensor_basis::*;
pub use tensor_surface::*;

#[cfg(test)]
mod tests;
