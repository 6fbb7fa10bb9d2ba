use bulletplot::{AggFunc, BulletChart};
use polars::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::init();

  let file = std::fs::File::open("demos/goals.csv")?;
  let df = CsvReader::new(file).finish()?;

  let figure = BulletChart::new("revenue", &["team"], "goal", "last_year")
    .agg(AggFunc::Mean)
    .title("Average revenue per team")
    .x_label("EUR (millions)")
    .render(&df)?;

  figure.show();

  Ok(())
}
