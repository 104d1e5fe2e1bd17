//! Descriptive statistics over numeric vectors.
//!
//! Plain functions over `&[f64]`; feed a table column in through
//! [`Column::to_f64s`](rho_types::Column::to_f64s). Everything here is a
//! single pass (or a sort) over the input with no hidden state, and every
//! precondition failure is an explicit [`StatsError`].

pub mod error;
pub mod vector;

pub use error::{StatsError, StatsResult};
pub use vector::{
    correlation, covariance, max, mean, median, min, mode, product, quantile, quantiles, range,
    rank, std_dev, sum, variance,
};
