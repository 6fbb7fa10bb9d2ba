//! Bullet charts from polars dataframes: one horizontal bar-and-marker row
//! per group, aggregated from tabular data.

use log::debug;
use polars::prelude::DataFrame;

mod agg;
mod bounds;
mod error;
mod figure;
mod render;
mod theme;

pub use agg::AggFunc;
pub use bounds::{Bounds, Range};
pub use error::{Error, Result};
pub use figure::{Axes, Axis, Figure};
pub use peniko::Color;
pub use theme::{ColorOverrides, Palette, Role};

/// Builder for a bullet chart. `x` is the actual-value column, `y` the
/// grouping key columns, `target` the target column, and `bar` the
/// comparative backdrop column.
pub struct BulletChart {
  x:       String,
  y:       Vec<String>,
  target:  String,
  bar:     String,
  agg:     AggFunc,
  size:    (f64, f64),
  title:   Option<String>,
  x_label: Option<String>,
  colors:  ColorOverrides,
  palette: Palette,
}

impl BulletChart {
  pub fn new(x: &str, y: &[&str], target: &str, bar: &str) -> BulletChart {
    BulletChart {
      x:       x.to_string(),
      y:       y.iter().map(|key| key.to_string()).collect(),
      target:  target.to_string(),
      bar:     bar.to_string(),
      agg:     AggFunc::default(),
      size:    (10.0, 7.0),
      title:   None,
      x_label: None,
      colors:  ColorOverrides::default(),
      palette: theme::DEFAULT,
    }
  }

  pub fn agg(&mut self, func: AggFunc) -> &mut Self {
    self.agg = func;
    self
  }

  pub fn size(&mut self, width: f64, height: f64) -> &mut Self {
    self.size = (width, height);
    self
  }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn x_label(&mut self, label: &str) -> &mut Self {
    self.x_label = Some(label.to_string());
    self
  }

  pub fn color(&mut self, role: Role, color: Color) -> &mut Self {
    self.colors.set(role, color);
    self
  }

  pub fn palette(&mut self, palette: Palette) -> &mut Self {
    self.palette = palette;
    self
  }

  /// Validates the configuration against `data`, aggregates, and lays out one
  /// bullet row per group. Pure and stateless: either the whole figure comes
  /// back or an error does, with nothing drawn on failure.
  pub fn render(&self, data: &DataFrame) -> Result<Figure> {
    self.validate(data)?;

    let rows = agg::aggregate(data, &self.y, &self.x, &self.bar, &self.target, self.agg)?;
    if rows.is_empty() {
      return Err(Error::Shape("grouping produced no rows to plot".to_string()));
    }
    debug!("laying out {} bullet rows", rows.len());

    let x_color = self.colors.get(Role::XValues).unwrap_or(self.palette.for_role(Role::XValues));
    let bar_color = self.colors.get(Role::Bar).unwrap_or(self.palette.for_role(Role::Bar));
    let target_color =
      self.colors.get(Role::Target).unwrap_or(self.palette.for_role(Role::Target));
    let over_target = self.palette.over_target();

    let width = self.size.0 * figure::PIXELS_PER_UNIT;
    let height = self.size.1 * figure::PIXELS_PER_UNIT;
    let area = Bounds::new(Range::new(0.0, width), Range::new(0.0, height)).shrink(80.0);

    let max_value = rows.iter().fold(0.0_f64, |m, r| m.max(r.x).max(r.bar).max(r.target));
    // All-zero data still needs a nonempty domain to lay out against.
    let x_range =
      if max_value > 0.0 { Range::new(0.0, max_value * 1.05) } else { Range::new(0.0, 1.0) };

    // Rows tile the plot area top to bottom with no vertical gap.
    let row_height = area.height() / rows.len() as f64;
    let mut axes = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
      axes.push(Axis {
        x_color:  if row.x > row.target { over_target } else { x_color },
        label:    row.label,
        x:        row.x,
        bar:      row.bar,
        target:   row.target,
        viewport: Bounds::new(
          area.x,
          Range::new(
            area.y.min + i as f64 * row_height,
            area.y.min + (i + 1) as f64 * row_height,
          ),
        ),
      });
    }

    let axes =
      if axes.len() == 1 { Axes::Single(axes.pop().unwrap()) } else { Axes::Stacked(axes) };

    Ok(Figure {
      title: self.title.clone(),
      x_label: self.x_label.clone(),
      size: self.size,
      x_range,
      bar_color,
      target_color,
      axes,
    })
  }

  fn validate(&self, data: &DataFrame) -> Result<()> {
    let (width, height) = self.size;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
      return Err(Error::Shape(format!(
        "`size` must be a pair of positive dimensions, got ({width}, {height})"
      )));
    }
    if self.y.is_empty() {
      return Err(Error::Shape("`y` must name at least one grouping column".to_string()));
    }

    let schema = data.schema();
    for key in &self.y {
      if schema.get(key.as_str()).is_none() {
        return Err(Error::MissingColumn(key.clone()));
      }
    }
    for (param, name) in [("x", &self.x), ("target", &self.target), ("bar", &self.bar)] {
      match schema.get(name.as_str()) {
        None => return Err(Error::MissingColumn(name.clone())),
        Some(dtype) if !dtype.is_primitive_numeric() => {
          return Err(Error::TypeKind {
            param,
            expected: "a numeric column",
            actual: dtype.to_string(),
          });
        }
        Some(_) => {}
      }
    }

    Ok(())
  }
}
