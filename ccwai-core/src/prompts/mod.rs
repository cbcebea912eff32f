//! Prompt assembly

pub mod composer;

pub use composer::{compose, render_meta};
