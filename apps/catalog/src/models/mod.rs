pub mod product;

pub use product::{ImageRef, ProductRecord};
