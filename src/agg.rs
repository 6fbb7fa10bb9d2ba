use polars::prelude::*;

use crate::error::{Error, Result};

/// How the measure columns are collapsed within each group.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum AggFunc {
  #[default]
  Sum,
  Mean,
  Min,
  Max,
  Median,
  First,
  Last,
}

impl AggFunc {
  fn expr(self, name: &str) -> Expr {
    let column = col(name);
    match self {
      AggFunc::Sum => column.sum(),
      AggFunc::Mean => column.mean(),
      AggFunc::Min => column.min(),
      AggFunc::Max => column.max(),
      AggFunc::Median => column.median(),
      AggFunc::First => column.first(),
      AggFunc::Last => column.last(),
    }
  }
}

impl std::str::FromStr for AggFunc {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "sum" => Ok(AggFunc::Sum),
      "mean" => Ok(AggFunc::Mean),
      "min" => Ok(AggFunc::Min),
      "max" => Ok(AggFunc::Max),
      "median" => Ok(AggFunc::Median),
      "first" => Ok(AggFunc::First),
      "last" => Ok(AggFunc::Last),
      _ => Err(Error::TypeKind {
        param:    "aggfunc",
        expected: "one of `sum`, `mean`, `min`, `max`, `median`, `first`, `last`",
        actual:   s.to_string(),
      }),
    }
  }
}

pub(crate) struct GroupRow {
  pub label:  String,
  pub x:      f64,
  pub bar:    f64,
  pub target: f64,
}

/// Groups `data` by the full `keys` sequence and applies `func` to each of the
/// three measure columns independently. Group order is the stable order of
/// first appearance; nulls in the aggregated output are errors, never zeros.
pub(crate) fn aggregate(
  data: &DataFrame,
  keys: &[String],
  x: &str,
  bar: &str,
  target: &str,
  func: AggFunc,
) -> Result<Vec<GroupRow>> {
  let key_exprs = keys.iter().map(|k| col(k.as_str())).collect::<Vec<_>>();
  let grouped = data
    .clone()
    .lazy()
    .group_by_stable(key_exprs)
    .agg([func.expr(x), func.expr(bar), func.expr(target)])
    .collect()?;

  let key_columns =
    keys.iter().map(|k| grouped.column(k.as_str())).collect::<PolarsResult<Vec<_>>>()?;
  let xs = grouped.column(x)?;
  let bars = grouped.column(bar)?;
  let targets = grouped.column(target)?;

  let mut rows = Vec::with_capacity(grouped.height());
  for i in 0..grouped.height() {
    let label = key_columns
      .iter()
      .map(|column| Ok(column.get(i)?.str_value().into_owned()))
      .collect::<Result<Vec<_>>>()?
      .join(", ");

    rows.push(GroupRow {
      label,
      x: xs.get(i)?.try_extract::<f64>()?,
      bar: bars.get(i)?.try_extract::<f64>()?,
      target: targets.get(i)?.try_extract::<f64>()?,
    });
  }

  Ok(rows)
}
