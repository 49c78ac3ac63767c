/// Backend trait and frame type.
pub mod backend;
/// Premultiplied RGBA8 compositing helpers.
pub(crate) mod composite;
/// `vello_cpu` raster backend.
pub mod cpu;
/// Vertical gradient math.
pub mod gradient;
