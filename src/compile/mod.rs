/// Card description to render plan.
pub mod compiler;
/// Backend-agnostic render plan types.
pub mod plan;
