/// Element positions derived from a card description.
pub mod geometry;
/// Caption word wrapping.
pub mod wrap;
