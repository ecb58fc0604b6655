//! Random number generation for the simulation engines.

mod prng;
mod stratified;

pub use prng::EngineRng;
pub use stratified::fill_stratified_normals;
