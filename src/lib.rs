//! Colors for depth maps.
//!
//! Distances measured by a depth sensor are turned into colors with a
//! piecewise-linear [`GradientConfig`]: a list of distances (keys),
//! the color at each of them, and optional clip colors for distances
//! outside of the keys.
//!
//! - [`GradientConfig::color`] (or [`map_distance`]) maps a distance.
//! - [`GradientConfig::samples`] samples a range of distances, e.g.
//!   to draw a legend.
//! - [`struct@DEFAULT_GRADIENT`] is the red → green → blue ramp over
//!   0–4 m used for the robot's depth camera.
//!
//! Colors are [`rgb::RGB<f64>`] with channels nominally in \[0, 255\]
//! but never clamped by the mapping; use [`RGBColor::from_rgb`] to
//! obtain pixels.

use rgb::{RGB, RGB8, RGB16, RGBA8, RGBA16};

pub mod error;
mod gradient;
pub use error::{GradientError, Result};
pub use gradient::{GradientConfig, DEFAULT_GRADIENT};
pub use gradient::ty::Interpolation;

/// Colors computed by a gradient.
pub type Color = RGB<f64>;

/// Rescale `x` linearly from \[`in_min`, `in_max`\] to
/// \[`out_min`, `out_max`\].  No clamping is performed.
///
/// # Example
///
/// ```
/// use depth_gradient::map_range;
/// assert_eq!(map_range(1000., 0., 2000., 0., 1.), 0.5);
/// ```
#[inline]
pub fn map_range(x: f64, in_min: f64, in_max: f64,
                 out_min: f64, out_max: f64) -> f64 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Return the color of `distance` according to `gradient`.
/// Same as [`GradientConfig::color`].
///
/// # Errors
///
/// See [`GradientConfig::color`].
#[inline]
pub fn map_distance(distance: f64, gradient: &GradientConfig) -> Result<Color> {
    gradient.color(distance)
}

/// Specifies the conversions between pixel types and [`Color`].
pub trait RGBColor: Sized {
    /// Return the red, green and blue components of the color (in
    /// \[0, 255\]).
    fn to_rgb(&self) -> Color;

    /// Create a pixel from a color.  Integer pixels round each
    /// channel and saturate it to their range.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::{RGB, RGB8};
    /// use depth_gradient::RGBColor;
    /// assert_eq!(RGB8::from_rgb(RGB::new(127.5, 300., -4.)),
    ///            RGB8::new(128, 255, 0));
    /// ```
    fn from_rgb(c: Color) -> Self;

    /// Convert the color to grayscale.
    fn to_gray(&self) -> Self {
        let RGB { r, g, b } = Self::to_rgb(self);
        let x = 0.299 * r + 0.587 * g + 0.114 * b;
        Self::from_rgb(RGB { r: x, g: x, b: x })
    }
}

// 255 on a 8 bits channel is 65535 on a 16 bits one.
const SCALE16: f64 = 257.;

impl RGBColor for Color {
    #[inline]
    fn to_rgb(&self) -> Color { *self }

    #[inline]
    fn from_rgb(c: Color) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgb(&self) -> Color {
        RGB { r: self.r as f64, g: self.g as f64, b: self.b as f64 }
    }

    #[inline]
    fn from_rgb(c: Color) -> Self {
        RGB8 { r: c.r.round() as u8,  g: c.g.round() as u8,
               b: c.b.round() as u8 }
    }
}

impl RGBColor for RGB16 {
    #[inline]
    fn to_rgb(&self) -> Color {
        RGB { r: self.r as f64 / SCALE16, g: self.g as f64 / SCALE16,
              b: self.b as f64 / SCALE16 }
    }

    #[inline]
    fn from_rgb(c: Color) -> Self {
        RGB16 { r: (SCALE16 * c.r).round() as u16,
                g: (SCALE16 * c.g).round() as u16,
                b: (SCALE16 * c.b).round() as u16 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgb(&self) -> Color {
        RGB { r: self.r as f64, g: self.g as f64, b: self.b as f64 }
    }

    #[inline]
    fn from_rgb(c: Color) -> Self {
        let RGB8 { r, g, b } = RGB8::from_rgb(c);
        RGBA8 { r, g, b, a: u8::MAX }
    }
}

impl RGBColor for RGBA16 {
    #[inline]
    fn to_rgb(&self) -> Color {
        RGB16 { r: self.r, g: self.g, b: self.b }.to_rgb()
    }

    #[inline]
    fn from_rgb(c: Color) -> Self {
        let RGB16 { r, g, b } = RGB16::from_rgb(c);
        RGBA16 { r, g, b, a: u16::MAX }
    }
}

impl GradientConfig {
    /// Return an iterator yielding a uniform sampling of `n`
    /// distances between `a` and `b` (with the bounds `a` and `b`
    /// included) together with their colors.  It is not required
    /// that `a <= b`.
    ///
    /// # Example
    ///
    /// ```
    /// use depth_gradient::DEFAULT_GRADIENT;
    /// let d: Vec<f64> = DEFAULT_GRADIENT.samples(0., 4000., 5)
    ///     .map(|(d, _)| d).collect();
    /// assert_eq!(d, [0., 1000., 2000., 3000., 4000.]);
    /// ```
    pub fn samples(&self, mut a: f64, mut b: f64, n: usize) -> Samples<'_> {
        if a == f64::INFINITY { a = f64::MAX; }
        else if a == f64::NEG_INFINITY { a = f64::MIN };
        if b == f64::NEG_INFINITY { b = f64::MIN; }
        else if b == f64::INFINITY { b = f64::MAX };
        // `a` or `b` NaN will give an iterator yielding NaN.
        if n == 0 {
            Samples { gradient: self, a, b, flast: 0., last: 0,
                      i: 1, j: 0 } // Empty iterator
        } else {
            Samples { gradient: self, a, b, flast: (n - 1) as f64,
                      last: n - 1, i: 0, j: n - 1 }
        }
    }
}

/// An iterator yielding distances in a given range together with
/// their colors.
///
/// Created by [`GradientConfig::samples`].
#[derive(Clone, Debug)]
pub struct Samples<'a> {
    gradient: &'a GradientConfig,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed (i ≤ j)
    j: usize, // last position to be consumed
}

impl Samples<'_> {
    /// Return the distance of the position `k` (assuming it is in
    /// the range `0 ..= self.last`) and its color.
    fn sample(&self, k: usize) -> (f64, Result<Color>) {
        let x = if k == 0 {
            self.a
        } else if k == self.last {
            self.b
        } else {
            let alpha = (self.last - k) as f64;
            let beta = k as f64;
            let t = beta / self.flast;
            let x = (alpha * self.a + beta * self.b) / self.flast;
            if x.is_infinite() { (1. - t) * self.a + t * self.b } else { x }
        };
        (x, self.gradient.color(x))
    }
}

impl Iterator for Samples<'_> {
    type Item = (f64, Result<Color>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.sample(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Samples<'_> {
    fn len(&self) -> usize {
        if self.i <= self.j { self.j - self.i + 1 } else { 0 }
    }
}

impl DoubleEndedIterator for Samples<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.sample(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(item)
        } else {
            None
        }
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_distance_is_color() {
        for d in [-10., 0., 999., 2000., 4000., 1e9] {
            assert_eq!(map_distance(d, &DEFAULT_GRADIENT).ok(),
                       DEFAULT_GRADIENT.color(d).ok());
        }
    }

    #[test]
    fn samples_range() {
        let g = DEFAULT_GRADIENT.clone().interpolation(Interpolation::Linear);
        for (i, (x, c)) in g.samples(0., 4000., 11).enumerate() {
            assert!((x - 400. * i as f64).abs() <= 1e-9,
                    "{} ≉ {}", x, 400. * i as f64);
            assert_eq!(g.color(x).unwrap(), c.unwrap());
        }
    }

    #[test]
    fn samples_reversed_and_empty() {
        let s = DEFAULT_GRADIENT.samples(-1000., 5000., 7);
        assert_eq!(s.len(), 7);
        let d: Vec<_> = s.rev().map(|(d, _)| d).collect();
        assert_eq!(d, [5000., 4000., 3000., 2000., 1000., 0., -1000.]);
        let (first, c) = DEFAULT_GRADIENT.samples(-1000., 5000., 7)
            .next().unwrap();
        assert_eq!(first, -1000.);
        assert!(c.is_err());
        assert_eq!(DEFAULT_GRADIENT.samples(0., 1., 0).count(), 0);
        assert_eq!(DEFAULT_GRADIENT.samples(0., 1., 1).len(), 1);
    }

    #[test]
    fn pixels() {
        let c = DEFAULT_GRADIENT.color(1000.).unwrap();
        assert_eq!(RGB8::from_rgb(c), RGB8::new(128, 128, 0));
        assert_eq!(RGBA8::from_rgb(c), RGBA8::new(128, 128, 0, 255));
        assert_eq!(RGB16::from_rgb(RGB::new(255., 0., 1.)),
                   RGB16::new(65535, 0, 257));
        assert_eq!(RGBA16::new(257, 514, 0, 7).to_rgb(), RGB::new(1., 2., 0.));
        assert_eq!(RGB8::new(10, 10, 10).to_gray(), RGB8::new(10, 10, 10));
    }
}
