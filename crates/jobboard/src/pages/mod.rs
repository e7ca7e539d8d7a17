pub mod cache;
pub mod catalog;
mod loader;

pub use cache::PageCache;
pub use catalog::{catalog, find, PagePreset};
