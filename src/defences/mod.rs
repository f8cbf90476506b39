//! Preprocessing defences.
//!
//! Input transformations applied before classification to blunt
//! adversarial perturbations. Defences implement the [`Transformer`]
//! trait, so they compose with any preprocessing pipeline.
//!
//! [`Transformer`]: crate::traits::Transformer

mod spatial_smoothing;

pub use spatial_smoothing::SpatialSmoothing;
