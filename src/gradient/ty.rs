/// How the color of a segment is computed from its two bounding
/// colors and the relative position `t` ∈ \[0, 1\] of the distance
/// inside the segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Both bounding colors are weighted by `t`:
    /// `lower * t + upper * t`.  At `t == 0.` this yields black and
    /// at `t == 1.` the sum of both colors.  This is the historical
    /// behavior of the depth-map renderer and remains the default so
    /// that existing images are reproduced exactly.
    #[default]
    SharedWeight,
    /// Standard linear interpolation: `lower * (1 - t) + upper * t`.
    Linear,
}

impl Interpolation {
    /// Name used in gradient descriptions.
    pub fn name(self) -> &'static str {
        match self {
            Interpolation::SharedWeight => "shared-weight",
            Interpolation::Linear => "linear",
        }
    }

    /// Parse the name used in gradient descriptions.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "shared-weight" => Some(Interpolation::SharedWeight),
            "linear" => Some(Interpolation::Linear),
            _ => None,
        }
    }

    /// Weights `(w_lower, w_upper)` applied to the bounding colors.
    #[inline]
    pub(crate) fn weights(self, t: f64) -> (f64, f64) {
        match self {
            Interpolation::SharedWeight => (t, t),
            Interpolation::Linear => (1. - t, t),
        }
    }
}
