use std::path::Path;

use kurbo::{Affine, Line, Point, Rect, Stroke};
use parley::FontWeight;
use peniko::{Brush, Color};

use crate::{
  Bounds, Range,
  error::Result,
  render::{self, Align, DrawText, Render, RenderConfig},
};

/// Logical pixels per `size` unit, so the matplotlib-style `(10, 7)` default
/// comes out as a 1000x700 figure.
pub(crate) const PIXELS_PER_UNIT: f64 = 100.0;

/// A fully laid out bullet chart. Owned entirely by the caller, who decides
/// whether to save, show, or drop it.
#[derive(Debug)]
pub struct Figure {
  pub(crate) title:        Option<String>,
  pub(crate) x_label:      Option<String>,
  pub(crate) size:         (f64, f64),
  pub(crate) x_range:      Range,
  pub(crate) bar_color:    Color,
  pub(crate) target_color: Color,
  pub(crate) axes:         Axes,
}

/// One subplot row if the grouping produced a single group, a stack of rows
/// otherwise.
#[derive(Debug)]
pub enum Axes {
  Single(Axis),
  Stacked(Vec<Axis>),
}

/// One bullet row: a group label, its three aggregated values, the resolved
/// actual-value color, and the viewport slice the row occupies.
#[derive(Debug)]
pub struct Axis {
  pub label:    String,
  pub x:        f64,
  pub bar:      f64,
  pub target:   f64,
  pub x_color:  Color,
  pub viewport: Bounds,
}

impl Axes {
  pub fn len(&self) -> usize {
    match self {
      Axes::Single(_) => 1,
      Axes::Stacked(axes) => axes.len(),
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  pub fn iter(&self) -> std::slice::Iter<'_, Axis> {
    match self {
      Axes::Single(axis) => std::slice::from_ref(axis).iter(),
      Axes::Stacked(axes) => axes.iter(),
    }
  }
}

impl Figure {
  pub fn axes(&self) -> &Axes { &self.axes }
  pub fn x_range(&self) -> Range { self.x_range }
  pub fn size(&self) -> (f64, f64) { self.size }
  pub fn title(&self) -> Option<&str> { self.title.as_deref() }
  pub fn x_label(&self) -> Option<&str> { self.x_label.as_deref() }
  pub fn bar_color(&self) -> Color { self.bar_color }
  pub fn target_color(&self) -> Color { self.target_color }

  /// Renders the figure to a PNG at `path`.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> { render::save(self, path.as_ref()) }

  /// Opens a window displaying the figure; returns when it is closed.
  pub fn show(&self) { render::window::show(self) }

  pub(crate) fn render_config(&self) -> RenderConfig {
    RenderConfig {
      width:  (self.size.0 * PIXELS_PER_UNIT) as u32,
      height: (self.size.1 * PIXELS_PER_UNIT) as u32,
    }
  }

  pub(crate) fn draw(&self, render: &mut Render) {
    const TEXT_COLOR: Brush = Brush::Solid(Color::from_rgb8(32, 32, 32));
    const LINE_COLOR: Brush = Brush::Solid(Color::from_rgb8(128, 128, 128));
    const TICKS: u32 = 8;

    let config = self.render_config();
    let (width, height) = (f64::from(config.width), f64::from(config.height));
    let area = Bounds::new(Range::new(0.0, width), Range::new(0.0, height)).shrink(80.0);

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        size: 32.0,
        weight: FontWeight::BOLD,
        brush: TEXT_COLOR,
        position: Point::new(width / 2.0, area.y.min - 30.0),
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
      });
    }

    if let Some(x_label) = &self.x_label {
      render.draw_text(DrawText {
        text: x_label,
        size: 24.0,
        brush: TEXT_COLOR,
        position: Point::new(width / 2.0, area.y.max + 40.0),
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    for axis in self.axes.iter() {
      // Each row draws in data coordinates: x over the shared range, y in 0..1
      // top to bottom within the row's viewport slice.
      let transform = Bounds::new(self.x_range, Range::new(0.0, 1.0)).transform_to(axis.viewport);

      render.fill(&Rect::new(0.0, 0.2, axis.bar, 0.8), transform, self.bar_color);
      render.fill(&Rect::new(0.0, 0.4, axis.x, 0.6), transform, axis.x_color);

      let marker =
        transform * Line::new(Point::new(axis.target, 0.15), Point::new(axis.target, 0.85));
      render.stroke(&marker, Affine::IDENTITY, self.target_color, &Stroke::new(3.0));

      render.draw_text(DrawText {
        text: &axis.label,
        size: 16.0,
        brush: TEXT_COLOR,
        position: Point::new(area.x.min - 15.0, axis.viewport.y.min + axis.viewport.height() / 2.0),
        horizontal_align: Align::End,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    let border_stroke = Stroke::new(2.0);
    render.stroke(
      &Line::new(Point::new(area.x.min, area.y.max), Point::new(area.x.max, area.y.max)),
      Affine::IDENTITY,
      &LINE_COLOR,
      &border_stroke,
    );
    render.stroke(
      &Line::new(Point::new(area.x.min, area.y.min), Point::new(area.x.min, area.y.max)),
      Affine::IDENTITY,
      &LINE_COLOR,
      &border_stroke,
    );

    let iter = self.x_range.nice_ticks(TICKS);
    let precision = iter.precision().saturating_sub(3);
    for (value, vx) in iter
      .map(|v| (v, area.x.min + (v - self.x_range.min) / self.x_range.size() * area.width()))
      .filter(|(_, vx)| area.x.contains(vx))
    {
      render.stroke(
        &Line::new(Point::new(vx, area.y.max), Point::new(vx, area.y.max + 10.0)),
        Affine::IDENTITY,
        &LINE_COLOR,
        &border_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{:.*}", precision, value),
        size: 12.0,
        brush: TEXT_COLOR,
        position: Point::new(vx, area.y.max + 15.0),
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }
  }
}
