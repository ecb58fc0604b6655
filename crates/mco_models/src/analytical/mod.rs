//! Closed-form analytics.
//!
//! Normal distribution helpers and the Black-Scholes formulas used for
//! control variates, stratified sampling and validation of the Monte
//! Carlo engines.

pub mod black_scholes;
pub mod distributions;

pub use black_scholes::{call_price, put_price};
pub use distributions::{inverse_norm_cdf, norm_cdf, norm_pdf};
