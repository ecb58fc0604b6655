//! # MCO Models (Instrument Layer)
//!
//! Option contract definitions and closed-form analytics.
//!
//! This crate provides:
//! - Instrument definitions (European, Asian, American, Bermudan,
//!   barrier and lookback options) with validating constructors
//! - Intrinsic payoff evaluation
//! - Normal distribution helpers and Black-Scholes closed forms
//!
//! ## Design Principles
//!
//! - **Enum-based instruments** for static dispatch: the pricing engine
//!   matches on a closed [`instruments::Instrument`] set rather than
//!   trait objects
//! - **Validate at construction**: a successfully built contract carries
//!   only finite, in-range parameters, so pricing loops stay branch-free
//! - **Generic analytics** over `T: Float` for `f32`/`f64` flexibility

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analytical;
pub mod instruments;
