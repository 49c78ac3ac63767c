pub(crate) mod color;
pub mod fonts;
pub mod text;
