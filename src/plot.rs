//! Figures
//!
//! The output format follows the file extension: SVG for `.svg`, bitmap otherwise.

use plotters::{coord::Shift, prelude::*};
use std::{fmt::Display, ops::Range, path::Path};

use crate::{catalog::ExcessSample, photometry::LuminosityClass, report::Comparison};

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("failed to draw the figure: {0}")]
    Drawing(String),
    #[error("nothing to plot")]
    Empty,
}
type Result<T> = std::result::Result<T, PlotError>;

fn drawing<E: Display>(e: E) -> PlotError {
    PlotError::Drawing(e.to_string())
}

fn rgb(color: colorous::Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn class_color(class: LuminosityClass) -> RGBColor {
    match class {
        LuminosityClass::Dwarf => rgb(colorous::TABLEAU10[0]),
        LuminosityClass::Giant => rgb(colorous::TABLEAU10[2]),
    }
}

/// Five-pointed star vertices around the origin, in pixels
fn star_vertices(radius: i32) -> Vec<(i32, i32)> {
    let r = radius as f64;
    (0..10)
        .map(|k| {
            let a = k as f64 * std::f64::consts::PI / 5.;
            let r = if k % 2 == 0 { r } else { 0.4 * r };
            ((r * a.sin()).round() as i32, (-r * a.cos()).round() as i32)
        })
        .collect()
}

fn minmax(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|x| x.is_finite())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

fn padded(lo: f64, hi: f64) -> Range<f64> {
    let pad = ((hi - lo) * 5e-2).max(1.);
    lo - pad..hi + pad
}

/// Photometric versus spectroscopic temperature, with the residuals underneath
pub fn teff_comparison<P: AsRef<Path>>(
    path: P,
    comparisons: &[Comparison],
    teff_range: (f64, f64),
) -> Result<()> {
    if !comparisons
        .iter()
        .any(|c| c.teff_phot.is_some() && c.teff_spec.is_finite())
    {
        return Err(PlotError::Empty);
    }
    let path = path.as_ref();
    log::info!("Plotting {:?}...", path);
    match path.extension().and_then(|e| e.to_str()) {
        Some("svg") => draw_teff_comparison(
            SVGBackend::new(path, (960, 720)).into_drawing_area(),
            comparisons,
            teff_range,
        ),
        _ => draw_teff_comparison(
            BitMapBackend::new(path, (960, 720)).into_drawing_area(),
            comparisons,
            teff_range,
        ),
    }
}

fn draw_teff_comparison<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    comparisons: &[Comparison],
    (teff_min, teff_max): (f64, f64),
) -> Result<()> {
    let points = |class: LuminosityClass| {
        comparisons
            .iter()
            .filter(move |c| c.class == class)
            .filter_map(|c| c.teff_phot.map(|(teff, _)| (c.teff_spec, teff, c.delta())))
            .filter(|(spec, _, _)| spec.is_finite())
            .collect::<Vec<_>>()
    };
    let series = [
        (LuminosityClass::Dwarf, points(LuminosityClass::Dwarf)),
        (LuminosityClass::Giant, points(LuminosityClass::Giant)),
    ];

    root.fill(&WHITE).map_err(drawing)?;
    let (upper, lower) = root.split_vertically(root.dim_in_pixel().1 * 3 / 4);

    let mut chart = ChartBuilder::on(&upper)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .margin(10)
        .build_cartesian_2d(teff_min..teff_max, teff_min..teff_max)
        .map_err(drawing)?;
    chart
        .configure_mesh()
        .x_labels(0)
        .y_desc("Teff_IRFM [K]")
        .draw()
        .map_err(drawing)?;
    chart
        .draw_series(LineSeries::new(
            vec![(teff_min, teff_min), (teff_max, teff_max)],
            &BLACK,
        ))
        .map_err(drawing)?;
    for (class, points) in series.iter() {
        let color = class_color(*class);
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(spec, phot, _)| Circle::new((spec, phot), 3, color.filled())),
            )
            .map_err(drawing)?
            .label(class.to_string())
            .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
    }
    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(drawing)?;

    let (delta_min, delta_max) = minmax(
        series
            .iter()
            .flat_map(|(_, p)| p.iter().filter_map(|&(_, _, delta)| delta)),
    )
    .unwrap_or((-500., 500.));
    let mut chart = ChartBuilder::on(&lower)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .margin(10)
        .build_cartesian_2d(teff_min..teff_max, padded(delta_min, delta_max))
        .map_err(drawing)?;
    chart
        .configure_mesh()
        .x_desc("Teff_spec [K]")
        .y_desc("delta Teff [K]")
        .draw()
        .map_err(drawing)?;
    chart
        .draw_series(LineSeries::new(
            vec![(teff_min, 0.), (teff_max, 0.)],
            &BLACK.mix(0.5),
        ))
        .map_err(drawing)?;
    for (class, points) in series.iter() {
        let color = class_color(*class);
        chart
            .draw_series(points.iter().filter_map(|&(spec, _, delta)| {
                delta.map(|d| Circle::new((spec, d), 3, color.filled()))
            }))
            .map_err(drawing)?;
    }

    root.present().map_err(drawing)?;
    Ok(())
}

/// WISE [3.4]-[22] color and A(Li) of the Hyper Li giant
pub const HYPER_LI_TARGET: (f64, f64) = (1.734, 5.2);

/// Lithium abundance versus WISE [3.4]-[22] color, IR excess stars highlighted
pub fn ir_excess<P: AsRef<Path>>(
    path: P,
    sample: &ExcessSample,
    target: Option<(f64, f64)>,
) -> Result<()> {
    if sample.is_empty() {
        return Err(PlotError::Empty);
    }
    let path = path.as_ref();
    log::info!("Plotting {:?}...", path);
    match path.extension().and_then(|e| e.to_str()) {
        Some("svg") => draw_ir_excess(
            SVGBackend::new(path, (1000, 900)).into_drawing_area(),
            sample,
            target,
        ),
        _ => draw_ir_excess(
            BitMapBackend::new(path, (1000, 900)).into_drawing_area(),
            sample,
            target,
        ),
    }
}

fn draw_ir_excess<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    sample: &ExcessSample,
    target: Option<(f64, f64)>,
) -> Result<()> {
    root.fill(&WHITE).map_err(drawing)?;
    let mut chart = ChartBuilder::on(&root)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .margin(20)
        .build_cartesian_2d(-2f64..10f64, -2f64..5.5f64)
        .map_err(drawing)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("[3.4] - [22]")
        .y_desc("A(Li) NLTE")
        .label_style(("sans-serif", 22))
        .draw()
        .map_err(drawing)?;
    chart
        .draw_series(LineSeries::new(
            vec![(0., -2.), (0., 6.)],
            RGBColor(211, 211, 211).mix(0.75).stroke_width(4),
        ))
        .map_err(drawing)?;
    chart
        .draw_series(
            sample
                .points(false)
                .map(|(x, y)| Circle::new((x, y), 6, BLACK.filled())),
        )
        .map_err(drawing)?;
    let excess = rgb(colorous::TABLEAU10[0]);
    chart
        .draw_series(
            sample
                .points(true)
                .map(|(x, y)| Circle::new((x, y), 6, excess.filled())),
        )
        .map_err(drawing)?
        .label("IR excess")
        .legend(move |(x, y)| Circle::new((x, y), 6, excess.filled()));
    if let Some((x, y)) = target {
        chart
            .draw_series(std::iter::once(
                EmptyElement::at((x, y)) + Polygon::new(star_vertices(14), RED.filled()),
            ))
            .map_err(drawing)?
            .label("Hyper Li target")
            .legend(|(x, y)| {
                let vertices = star_vertices(8)
                    .into_iter()
                    .map(|(dx, dy)| (x + dx, y + dy))
                    .collect::<Vec<_>>();
                Polygon::new(vertices, RED.filled())
            });
    }
    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(drawing)?;

    root.present().map_err(drawing)?;
    Ok(())
}
