//! Lattice pricing methods.

mod binomial;

pub use binomial::{
    price_american_binomial, price_european_binomial, BinomialTree,
};
