//! Validated gradient configurations and the distance → color mapping.

use lazy_static::lazy_static;
use rgb::RGB;
use tracing::{debug, trace};

use crate::error::{GradientError, Result};
use crate::{map_range, Color, RGBColor};

mod load;
pub(crate) mod ty;
use ty::Interpolation;

lazy_static! {
    /// Gradient used by the depth-map renderer: red at 0 mm, green at
    /// 2 m, blue at 4 m.  Nothing is clipped below 0 mm and points
    /// further than 4 m are drawn black.
    pub static ref DEFAULT_GRADIENT: GradientConfig = GradientConfig {
        keys: vec![0., 2000., 4000.],
        colors: vec![RGB::new(255., 0., 0.),
                     RGB::new(0., 255., 0.),
                     RGB::new(0., 0., 255.)],
        clip_low: None,
        clip_high: Some(RGB::new(0., 0., 0.)),
        interpolation: Interpolation::SharedWeight,
    };
}

/// An immutable piecewise-linear color ramp over distances.
///
/// `keys[i]` is the distance at which `colors[i]` applies.  The keys
/// are finite and strictly increasing, there are at least two of
/// them, and there are as many colors as keys.  Once built, a
/// configuration is never modified and may be shared between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientConfig {
    keys: Vec<f64>, // Invariant: length ≥ 2, finite, strictly increasing, finite gaps
    colors: Vec<Color>, // Invariant: same length as `keys`
    clip_low: Option<Color>,
    clip_high: Option<Color>,
    interpolation: Interpolation,
}

impl GradientConfig {
    /// Build a gradient from its control points.  No clip colors are
    /// set and the interpolation is [`Interpolation::SharedWeight`].
    ///
    /// # Errors
    ///
    /// Returns [`GradientError::InvalidConfig`] if `keys` and
    /// `colors` have different lengths, if there are fewer than two
    /// keys, if the keys are not finite and strictly increasing, or
    /// if the gap between two consecutive keys overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use depth_gradient::GradientConfig;
    /// let g = GradientConfig::new(&[0., 1000.],
    ///                             &[RGB8::new(255, 0, 0), RGB8::new(0, 0, 255)])?;
    /// assert_eq!(g.domain(), (0., 1000.));
    /// # Ok::<(), depth_gradient::GradientError>(())
    /// ```
    pub fn new<C: RGBColor>(keys: &[f64], colors: &[C]) -> Result<Self> {
        if keys.len() != colors.len() {
            return Err(GradientError::invalid_config(format!(
                "{} keys but {} colors", keys.len(), colors.len())));
        }
        if keys.len() < 2 {
            return Err(GradientError::invalid_config(format!(
                "at least 2 keys are required, got {}", keys.len())));
        }
        if let Some(k) = keys.iter().find(|k| !k.is_finite()) {
            return Err(GradientError::invalid_config(format!(
                "key {k} is not finite")));
        }
        if let Some(w) = keys.windows(2).find(|w| w[0] >= w[1]) {
            return Err(GradientError::invalid_config(format!(
                "keys must be strictly increasing ({} is followed by {})",
                w[0], w[1])));
        }
        if let Some(w) = keys.windows(2).find(|w| !(w[1] - w[0]).is_finite()) {
            return Err(GradientError::invalid_config(format!(
                "the gap between keys {} and {} is too large", w[0], w[1])));
        }
        debug!(keys = ?keys, "gradient configured");
        Ok(GradientConfig {
            keys: keys.to_vec(),
            colors: colors.iter().map(RGBColor::to_rgb).collect(),
            clip_low: None,
            clip_high: None,
            interpolation: Interpolation::default(),
        })
    }

    /// Use `c` for all distances below the first key.
    pub fn clip_low(mut self, c: impl RGBColor) -> Self {
        self.clip_low = Some(c.to_rgb());
        self
    }

    /// Use `c` for all distances above the last key.
    pub fn clip_high(mut self, c: impl RGBColor) -> Self {
        self.clip_high = Some(c.to_rgb());
        self
    }

    /// Select how colors are interpolated inside a segment.
    pub fn interpolation(mut self, i: Interpolation) -> Self {
        self.interpolation = i;
        self
    }

    /// The distances of the control points, in increasing order.
    pub fn keys(&self) -> &[f64] { &self.keys }

    /// The colors of the control points, one per key.
    pub fn colors(&self) -> &[Color] { &self.colors }

    /// Color of the distances below the first key, if any.
    pub fn clip_low_color(&self) -> Option<Color> { self.clip_low }

    /// Color of the distances above the last key, if any.
    pub fn clip_high_color(&self) -> Option<Color> { self.clip_high }

    /// How colors are interpolated inside a segment.
    pub fn interpolation_mode(&self) -> Interpolation { self.interpolation }

    /// The first and last keys.
    pub fn domain(&self) -> (f64, f64) {
        (self.keys[0], self.keys[self.keys.len() - 1])
    }

    /// Return the color of `distance`.
    ///
    /// Distances below the first key (resp. above the last one) get
    /// the low (resp. high) clip color when it is set.  Otherwise the
    /// segment `[keys[i-1], keys[i]]` is the first one with
    /// `distance < keys[i]`, so a distance equal to an inner key
    /// starts the next segment.  The last key belongs to the last
    /// segment.
    ///
    /// # Errors
    ///
    /// Returns [`GradientError::OutOfRange`] if `distance` falls
    /// outside the keys on a side with no clip color, or is NaN.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB;
    /// use depth_gradient::DEFAULT_GRADIENT;
    /// assert_eq!(DEFAULT_GRADIENT.color(1000.)?, RGB::new(127.5, 127.5, 0.));
    /// assert_eq!(DEFAULT_GRADIENT.color(5000.)?, RGB::new(0., 0., 0.));
    /// assert!(DEFAULT_GRADIENT.color(-5.).is_err());
    /// # Ok::<(), depth_gradient::GradientError>(())
    /// ```
    pub fn color(&self, distance: f64) -> Result<Color> {
        let (min, max) = self.domain();
        if let Some(c) = self.clip_low {
            if distance < min { return Ok(c) }
        }
        if let Some(c) = self.clip_high {
            if distance > max { return Ok(c) }
        }
        let n = self.keys.len();
        let i = match self.keys[1..].iter().position(|&k| distance < k) {
            Some(j) if distance >= min => j + 1,
            None if distance == max => n - 1,
            _ => {
                trace!(distance, min, max, "distance outside of gradient");
                return Err(GradientError::OutOfRange { distance, min, max })
            }
        };
        let t = map_range(distance, self.keys[i-1], self.keys[i], 0., 1.);
        let (wl, wu) = self.interpolation.weights(t);
        let l = self.colors[i-1];
        let u = self.colors[i];
        Ok(RGB { r: l.r * wl + u.r * wu,
                 g: l.g * wl + u.g * wu,
                 b: l.b * wl + u.b * wu })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    fn rgb(r: f64, g: f64, b: f64) -> Color { RGB::new(r, g, b) }

    #[test]
    fn default_gradient_is_valid() {
        let d = &*DEFAULT_GRADIENT;
        let g = GradientConfig::new(d.keys(), d.colors()).unwrap()
            .clip_high(rgb(0., 0., 0.));
        assert_eq!(&g, d);
    }

    #[test]
    fn midpoint_of_first_segment() {
        assert_eq!(DEFAULT_GRADIENT.color(1000.).unwrap(),
                   rgb(127.5, 127.5, 0.));
    }

    #[test]
    fn inner_key_starts_next_segment() {
        // t = 0 in [2000, 4000]: both weights vanish.
        assert_eq!(DEFAULT_GRADIENT.color(2000.).unwrap(), rgb(0., 0., 0.));
        assert_eq!(DEFAULT_GRADIENT.color(0.).unwrap(), rgb(0., 0., 0.));
        assert_eq!(DEFAULT_GRADIENT.color(3000.).unwrap(),
                   rgb(0., 127.5, 127.5));
    }

    #[test]
    fn last_key_closes_last_segment() {
        assert_eq!(DEFAULT_GRADIENT.color(4000.).unwrap(),
                   rgb(0., 255., 255.));
    }

    #[test]
    fn clip_high_is_returned_verbatim() {
        assert_eq!(DEFAULT_GRADIENT.color(5000.).unwrap(), rgb(0., 0., 0.));
        assert_eq!(DEFAULT_GRADIENT.color(f64::INFINITY).unwrap(),
                   rgb(0., 0., 0.));
    }

    #[test]
    fn below_range_without_clip_fails() {
        match DEFAULT_GRADIENT.color(-5.) {
            Err(GradientError::OutOfRange { distance, min, max }) => {
                assert_eq!((distance, min, max), (-5., 0., 4000.));
            }
            r => panic!("expected OutOfRange, got {r:?}"),
        }
    }

    #[test]
    fn above_range_without_clip_fails() {
        let g = GradientConfig::new(&[0., 10.],
                                    &[RGB8::new(0, 0, 0), RGB8::new(10, 20, 30)])
            .unwrap();
        assert!(matches!(g.color(10.5), Err(GradientError::OutOfRange { .. })));
        assert!(g.color(10.).is_ok());
    }

    #[test]
    fn nan_is_out_of_range() {
        let g = DEFAULT_GRADIENT.clone().clip_low(rgb(1., 1., 1.));
        assert!(matches!(g.color(f64::NAN),
                         Err(GradientError::OutOfRange { .. })));
    }

    #[test]
    fn clip_low_is_returned_verbatim() {
        let g = DEFAULT_GRADIENT.clone().clip_low(RGB8::new(9, 8, 7));
        assert_eq!(g.color(-0.001).unwrap(), rgb(9., 8., 7.));
        assert_eq!(g.color(0.).unwrap(), rgb(0., 0., 0.));
    }

    #[test]
    fn linear_interpolation() {
        let g = DEFAULT_GRADIENT.clone().interpolation(Interpolation::Linear);
        assert_eq!(g.color(0.).unwrap(), rgb(255., 0., 0.));
        assert_eq!(g.color(500.).unwrap(), rgb(191.25, 63.75, 0.));
        assert_eq!(g.color(2000.).unwrap(), rgb(0., 255., 0.));
        assert_eq!(g.color(4000.).unwrap(), rgb(0., 0., 255.));
        assert_eq!(DEFAULT_GRADIENT.interpolation_mode(),
                   Interpolation::SharedWeight);
    }

    #[test]
    fn repeated_queries_agree() {
        for d in [-1., 0., 1234.5, 2000., 3999.9, 4000., 7000.] {
            let a = DEFAULT_GRADIENT.color(d).ok();
            let b = DEFAULT_GRADIENT.color(d).ok();
            assert_eq!(a, b, "distance {d}");
        }
    }

    #[test]
    fn rejects_repeated_keys() {
        let c = [RGB8::new(0, 0, 0); 3];
        assert!(matches!(GradientConfig::new(&[0., 0., 10.], &c),
                         Err(GradientError::InvalidConfig { .. })));
        assert!(GradientConfig::new(&[0., 20., 10.], &c).is_err());
    }

    #[test]
    fn rejects_malformed_control_points() {
        let c = [RGB8::new(0, 0, 0); 3];
        assert!(GradientConfig::new(&[0., 10.], &c).is_err());
        assert!(GradientConfig::new(&[0.], &c[..1]).is_err());
        assert!(GradientConfig::new(&[0., f64::NAN, 10.], &c).is_err());
        assert!(GradientConfig::new(&[0., 5., f64::INFINITY], &c).is_err());
        // Finite and increasing, but 2e308 does not fit in a f64.
        let c = [RGB8::new(0, 0, 0); 2];
        assert!(matches!(GradientConfig::new(&[-1e308, 1e308], &c),
                         Err(GradientError::InvalidConfig { .. })));
        assert!(GradientConfig::new(&[-1e307, 1e307], &c).is_ok());
    }
}
