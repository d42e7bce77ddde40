use crate::placement::Placement;

/// Geometry that can be handed to a viewer or an exporter.
///
/// The modeling library behind an implementor is opaque; parts only need to
/// be copied and moved.
pub trait Geometry: Clone {
    /// A copy of this geometry moved by `placement`.
    fn moved(&self, placement: &Placement) -> Self;
}
