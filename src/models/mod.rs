pub mod catalog;
pub mod gallery;
pub mod image;

pub use catalog::*;
pub use gallery::*;
pub use image::*;
