//! Domain model types.
//!
//! A [`Tour`] is the one solution container every engine works on; the
//! underlying storage is a plain index sequence.

mod tour;

pub use tour::Tour;
