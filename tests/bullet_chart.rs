use bulletplot::{AggFunc, Axes, BulletChart, Error, Palette, Role};
use polars::prelude::*;

fn revenue_frame() -> DataFrame {
  df! {
    "region" => &["north", "north", "south", "west"],
    "revenue" => &[40.0, 35.0, 90.0, 20.0],
    "goal" => &[50.0, 40.0, 80.0, 30.0],
    "last_year" => &[60.0, 30.0, 100.0, 45.0],
  }
  .unwrap()
}

fn chart() -> BulletChart { BulletChart::new("revenue", &["region"], "goal", "last_year") }

#[test]
fn one_group_returns_a_single_axis() {
  let df = df! {
    "region" => &["north"],
    "revenue" => &[40.0],
    "goal" => &[50.0],
    "last_year" => &[60.0],
  }
  .unwrap();

  let figure = chart().render(&df).unwrap();
  let Axes::Single(axis) = figure.axes() else { panic!("expected a single axis") };
  assert_eq!(axis.label, "north");
  assert_eq!(figure.axes().len(), 1);
}

#[test]
fn multiple_groups_stack_one_axis_per_group() {
  let figure = chart().render(&revenue_frame()).unwrap();

  let Axes::Stacked(axes) = figure.axes() else { panic!("expected stacked axes") };
  assert_eq!(axes.len(), 3);

  // north appears twice and is sum-aggregated; the other groups pass through.
  assert_eq!(axes[0].label, "north");
  assert_eq!(axes[0].x, 75.0);
  assert_eq!(axes[0].target, 90.0);
  assert_eq!(axes[0].bar, 90.0);
  assert_eq!(axes[1].label, "south");
  assert_eq!(axes[1].x, 90.0);
  assert_eq!(axes[2].label, "west");
  assert_eq!(axes[2].x, 20.0);
}

#[test]
fn stacked_axes_tile_with_zero_gap() {
  let figure = chart().render(&revenue_frame()).unwrap();

  let Axes::Stacked(axes) = figure.axes() else { panic!("expected stacked axes") };
  for pair in axes.windows(2) {
    assert_eq!(pair[0].viewport.y.max, pair[1].viewport.y.min);
    assert_eq!(pair[0].viewport.x.min, pair[1].viewport.x.min);
    assert_eq!(pair[0].viewport.x.max, pair[1].viewport.x.max);
  }
}

#[test]
fn over_target_rows_switch_to_the_warning_color() {
  let figure = chart().render(&revenue_frame()).unwrap();
  let palette = Palette::default();

  let Axes::Stacked(axes) = figure.axes() else { panic!("expected stacked axes") };
  // north: 75 <= 90, west: 20 <= 30; south: 90 > 80.
  assert_eq!(axes[0].x_color, palette.for_role(Role::XValues));
  assert_eq!(axes[1].x_color, palette.over_target());
  assert_eq!(axes[2].x_color, palette.for_role(Role::XValues));
}

#[test]
fn singleton_groups_pass_values_through_in_order() {
  let df = df! {
    "region" => &["b", "a", "c"],
    "revenue" => &[1.0, 2.0, 3.0],
    "goal" => &[4.0, 5.0, 6.0],
    "last_year" => &[7.0, 8.0, 9.0],
  }
  .unwrap();

  let figure = chart().render(&df).unwrap();
  let Axes::Stacked(axes) = figure.axes() else { panic!("expected stacked axes") };

  let labels = axes.iter().map(|a| a.label.as_str()).collect::<Vec<_>>();
  assert_eq!(labels, ["b", "a", "c"]);
  assert_eq!(axes.iter().map(|a| a.x).collect::<Vec<_>>(), [1.0, 2.0, 3.0]);
  assert_eq!(axes.iter().map(|a| a.target).collect::<Vec<_>>(), [4.0, 5.0, 6.0]);
  assert_eq!(axes.iter().map(|a| a.bar).collect::<Vec<_>>(), [7.0, 8.0, 9.0]);
}

#[test]
fn mean_aggregation_is_applied_per_column() {
  let figure = chart().agg(AggFunc::Mean).render(&revenue_frame()).unwrap();

  let Axes::Stacked(axes) = figure.axes() else { panic!("expected stacked axes") };
  assert_eq!(axes[0].x, 37.5);
  assert_eq!(axes[0].target, 45.0);
  assert_eq!(axes[0].bar, 45.0);
}

#[test]
fn optional_title_label_and_colors_may_be_omitted() {
  let figure = chart().render(&revenue_frame()).unwrap();
  assert_eq!(figure.title(), None);
  assert_eq!(figure.x_label(), None);

  let palette = Palette::default();
  assert_eq!(figure.bar_color(), palette.for_role(Role::Bar));
  assert_eq!(figure.target_color(), palette.for_role(Role::Target));
}

#[test]
fn color_overrides_replace_only_their_role() {
  let red = bulletplot::Color::from_rgb8(200, 0, 0);
  let figure = chart().color(Role::Bar, red).render(&revenue_frame()).unwrap();

  assert_eq!(figure.bar_color(), red);
  assert_eq!(figure.target_color(), Palette::default().for_role(Role::Target));
}

#[test]
fn missing_column_is_reported_before_aggregation() {
  let err = BulletChart::new("revenue", &["region"], "goal", "nope")
    .render(&revenue_frame())
    .unwrap_err();
  assert!(matches!(err, Error::MissingColumn(name) if name == "nope"));

  let err = BulletChart::new("revenue", &["planet"], "goal", "last_year")
    .render(&revenue_frame())
    .unwrap_err();
  assert!(matches!(err, Error::MissingColumn(name) if name == "planet"));
}

#[test]
fn non_numeric_measure_is_a_type_error() {
  let err = BulletChart::new("region", &["region"], "goal", "last_year")
    .render(&revenue_frame())
    .unwrap_err();
  assert!(matches!(err, Error::TypeKind { param: "x", .. }));
}

#[test]
fn empty_grouping_keys_are_rejected() {
  let err = BulletChart::new("revenue", &[], "goal", "last_year")
    .render(&revenue_frame())
    .unwrap_err();
  assert!(matches!(err, Error::Shape(_)));
}

#[test]
fn non_positive_size_is_rejected() {
  let err = chart().size(0.0, 7.0).render(&revenue_frame()).unwrap_err();
  assert!(matches!(err, Error::Shape(_)));

  let err = chart().size(10.0, -1.0).render(&revenue_frame()).unwrap_err();
  assert!(matches!(err, Error::Shape(_)));
}

#[test]
fn empty_frame_yields_no_groups() {
  let df = df! {
    "region" => Vec::<String>::new(),
    "revenue" => Vec::<f64>::new(),
    "goal" => Vec::<f64>::new(),
    "last_year" => Vec::<f64>::new(),
  }
  .unwrap();

  let err = chart().render(&df).unwrap_err();
  assert!(matches!(err, Error::Shape(_)));
}

#[test]
fn groups_are_independent_of_each_other() {
  // The two-region example: each axis carries its own aggregates only.
  let df = df! {
    "region" => &["A", "B", "A"],
    "revenue" => &[10.0, 99.0, 5.0],
    "goal" => &[20.0, 50.0, 20.0],
    "last_year" => &[30.0, 60.0, 30.0],
  }
  .unwrap();

  let figure = chart().render(&df).unwrap();
  let Axes::Stacked(axes) = figure.axes() else { panic!("expected stacked axes") };
  assert_eq!(axes.len(), 2);
  assert_eq!((axes[0].label.as_str(), axes[0].x), ("A", 15.0));
  assert_eq!((axes[1].label.as_str(), axes[1].x), ("B", 99.0));
}
