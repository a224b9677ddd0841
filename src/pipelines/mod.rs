//! End-to-end flows from a raw source to a validated recipe.

pub mod image;
pub mod url;
