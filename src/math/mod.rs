//! Small linear-algebra layer: the vector and matrix value types every
//! generator works in.

mod matrix;
mod vector;

pub use matrix::Matrix4;
pub use vector::Vector3;
