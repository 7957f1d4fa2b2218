// Product catalog pages: render pipeline, output naming, HTTP handlers.

pub mod handlers;
pub mod naming;
pub mod render;
