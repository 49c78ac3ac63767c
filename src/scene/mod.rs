/// Card description and its JSON boundary.
pub mod config;
