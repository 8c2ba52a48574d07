//! # Application Layer
//!
//! The submit lifecycle and the generator seam, coordinating domain and
//! connector layers.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
