// Page layout: font metrics, the draw-op page model, image placement and the
// product page composer. Everything here is synchronous and allocation-only;
// serialization lives in `crate::pdf`.

pub mod composer;
pub mod font_metrics;
pub mod page;
pub mod placement;

pub use composer::LayoutConfig;
pub use placement::PlacementTable;
