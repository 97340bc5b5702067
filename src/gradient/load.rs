//! Reading gradients from Hjson (or JSON) descriptions.  See
//! [`GradientConfig::from_hjson`] for the format.

use std::{fs, path::Path};
use rgb::RGB;
use serde_hjson::Value;
use tracing::debug;

use crate::error::{GradientError, Result};
use crate::Color;
use super::{GradientConfig, ty::Interpolation};

fn number(v: &Value, what: &str) -> Result<f64> {
    match v {
        Value::I64(i) => Ok(*i as f64),
        Value::U64(u) => Ok(*u as f64),
        Value::F64(x) => Ok(*x),
        _ => Err(GradientError::invalid_config(format!(
            "{what}: expected a number, got {v:?}"))),
    }
}

fn array<'a>(v: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    match v {
        Value::Array(a) => Ok(a),
        _ => Err(GradientError::invalid_config(format!(
            "{what}: expected an array, got {v:?}"))),
    }
}

/// Convert `[r, g, b]` to a color.
fn color(v: &Value, what: &str) -> Result<Color> {
    match array(v, what)?.as_slice() {
        [r, g, b] => Ok(RGB { r: number(r, what)?,
                              g: number(g, what)?,
                              b: number(b, what)? }),
        a => Err(GradientError::invalid_config(format!(
            "{what}: expected 3 channels, got {}", a.len()))),
    }
}

fn clip_color(v: &Value, what: &str) -> Result<Option<Color>> {
    match v {
        Value::Null => Ok(None),
        v => color(v, what).map(Some),
    }
}

fn from_value(v: &Value) -> Result<GradientConfig> {
    let m = match v {
        Value::Object(m) => m,
        _ => return Err(GradientError::invalid_config(
            "a gradient description must be an object")),
    };
    let keys = m.get("keys")
        .ok_or_else(|| GradientError::invalid_config("missing \"keys\""))?;
    let keys = array(keys, "keys")?.iter()
        .map(|k| number(k, "keys"))
        .collect::<Result<Vec<_>>>()?;
    let colors = m.get("colors")
        .ok_or_else(|| GradientError::invalid_config("missing \"colors\""))?;
    let colors = array(colors, "colors")?.iter()
        .map(|c| color(c, "colors"))
        .collect::<Result<Vec<_>>>()?;
    let mut g = GradientConfig::new(&keys, &colors)?;
    if let Some(clip) = m.get("clip") {
        match array(clip, "clip")?.as_slice() {
            [low, high] => {
                g.clip_low = clip_color(low, "clip")?;
                g.clip_high = clip_color(high, "clip")?;
            }
            a => return Err(GradientError::invalid_config(format!(
                "clip: expected [low, high], got {} items", a.len()))),
        }
    }
    match m.get("interpolation") {
        None => (),
        Some(Value::String(name)) => {
            g.interpolation = Interpolation::from_name(name).ok_or_else(|| {
                GradientError::invalid_config(format!(
                    "unknown interpolation \"{name}\""))
            })?;
        }
        Some(v) => return Err(GradientError::invalid_config(format!(
            "interpolation: expected a name, got {v:?}"))),
    }
    Ok(g)
}

impl GradientConfig {
    /// Read a gradient from its Hjson (or JSON) description.  `clip`
    /// (`[low, high]`, `null` for no clip color) and `interpolation`
    /// (`"shared-weight"` or `"linear"`) are optional.  An unquoted
    /// value runs up to the end of its line, comments included, so
    /// put comments on their own line.
    ///
    /// # Errors
    ///
    /// [`GradientError::Parse`] if `s` is not valid Hjson,
    /// [`GradientError::InvalidConfig`] if the description is
    /// incomplete or describes an invalid gradient.
    ///
    /// # Example
    ///
    /// ```
    /// use depth_gradient::{GradientConfig, Interpolation};
    /// let g = GradientConfig::from_hjson(r#"{
    ///   keys: [0, 2000, 4000]
    ///   colors: [[255, 0, 0], [0, 255, 0], [0, 0, 255]]
    ///   // optional, [low, high]
    ///   clip: [null, [0, 0, 0]]
    ///   // optional, or "linear"
    ///   interpolation: shared-weight
    /// }"#)?;
    /// assert_eq!(g.interpolation_mode(), Interpolation::SharedWeight);
    /// assert_eq!(g.clip_high_color(), Some(rgb::RGB::new(0., 0., 0.)));
    /// # Ok::<(), depth_gradient::GradientError>(())
    /// ```
    pub fn from_hjson(s: &str) -> Result<Self> {
        let v: Value = serde_hjson::from_str(s)?;
        from_value(&v)
    }

    /// Read a gradient description from the file `path`.
    ///
    /// # Errors
    ///
    /// [`GradientError::Io`] if the file cannot be read, otherwise
    /// as [`GradientConfig::from_hjson`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| GradientError::io(path.to_path_buf(), e))?;
        let g = Self::from_hjson(&s)?;
        debug!(path = %path.display(), "gradient loaded");
        Ok(g)
    }
}
