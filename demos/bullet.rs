use bulletplot::BulletChart;
use polars::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::init();

  let df = df! {
    "region" => &["north", "north", "south", "south", "west"],
    "revenue" => &[40.0, 35.0, 55.0, 38.0, 20.0],
    "goal" => &[50.0, 40.0, 45.0, 40.0, 30.0],
    "last_year" => &[60.0, 30.0, 70.0, 42.0, 45.0],
  }?;

  let figure = BulletChart::new("revenue", &["region"], "goal", "last_year")
    .title("Revenue vs goal")
    .x_label("EUR (millions)")
    .render(&df)?;

  figure.save("bullet.png")?;

  Ok(())
}
