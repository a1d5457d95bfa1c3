use core::fmt;

/// Errors surfaced by layout computations.
///
/// Range math divides by the per-item stride, so a zero item size must be
/// rejected before any range is derived; callers either fix their geometry
/// or propagate the error instead of rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum LayoutError {
    /// The per-item extent is zero in the scroll axis.
    InvalidGeometry { item_size: u32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { item_size } => {
                write!(f, "invalid geometry: item_size = {item_size}")
            }
        }
    }
}

impl core::error::Error for LayoutError {}
