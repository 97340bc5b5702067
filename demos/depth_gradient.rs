// Writes `depth_gradient.html` showing how distances are colored.
// Set `RUST_LOG=depth_gradient=trace` to see the configuration and
// out-of-range queries.

use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use tracing_subscriber::EnvFilter;
use depth_gradient::{GradientConfig, Interpolation, RGBColor,
                     DEFAULT_GRADIENT};

type Err = Box<dyn Error>;

// Distances the gradient cannot color.
const MISSING: RGB8 = RGB8 { r: 255, g: 0, b: 255 };

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn table_of_colors(fh: &mut impl Write, colors: &[RGB8],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>",
                css_string(c))?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for &c in colors {
        let c = c.to_gray();
        writeln!(fh, "  <td style=\"width: {width}px; height: 12px; \
                      background-color: {}\"></td>",
                 css_string(c))?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

/// Color `n` distances from `a` to `b` mm.
fn depths(fh: &mut impl Write, g: &GradientConfig, a: f64, b: f64,
          n: usize, width: u32, comment: &str) -> Result<(), Err> {
    let colors: Vec<_> = g.samples(a, b, n)
        .map(|(_, c)| c.map_or(MISSING, RGB8::from_rgb))
        .collect();
    table_of_colors(fh, &colors, width, comment)
}

fn main() -> Result<(), Err> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut fh = BufWriter::new(File::create("depth_gradient.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Depth gradient: {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    writeln!(fh, "<h3>Default gradient</h3>")?;
    depths(&mut fh, &DEFAULT_GRADIENT, 0., 4000., 10, 43, "0 – 4 m")?;
    depths(&mut fh, &DEFAULT_GRADIENT, -500., 5000., 150, 1,
           "-0.5 – 5 m (magenta: no color)")?;

    writeln!(fh, "<h3>Linear interpolation</h3>")?;
    let linear = DEFAULT_GRADIENT.clone()
        .interpolation(Interpolation::Linear);
    depths(&mut fh, &linear, 0., 4000., 10, 43, "0 – 4 m")?;
    depths(&mut fh, &linear, 0., 4000., 150, 1, "")?;

    if let Some(path) = env::args().nth(1) {
        let g = GradientConfig::from_file(&path)?;
        let (a, b) = g.domain();
        writeln!(fh, "<h3>{path}</h3>")?;
        depths(&mut fh, &g, a, b, 150, 1, "")?;
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
