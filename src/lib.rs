//! **Affordance extraction** for triangulated rigid bodies.
//!
//! Splits the surface of a [`CollisionObject`] into connected regions whose
//! orientation suits a given interaction, for example surfaces a legged robot can
//! stand on ([`PredicateKind::Support`]) or lean against ([`PredicateKind::Lean`]).
//!
//! ```
//! use affordance::{CollisionObject, Predicate, affordance_analysis, shapes};
//! use nalgebra::Isometry3;
//! use std::sync::Arc;
//!
//! let table = shapes::rectangle(1.0, 1.0).unwrap();
//! let object = Arc::new(CollisionObject::from_trimesh(table, Isometry3::identity()));
//! let found = affordance_analysis(&object, &[Predicate::support(), Predicate::lean()]).unwrap();
//!
//! assert_eq!(found.by_name("Support").unwrap().len(), 1);
//! assert!(found.by_name("Lean").unwrap().is_empty());
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to analyse several objects at once
//! - **demo**: build the `affordance-demo` binary

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod adjacency;
pub mod analysis;
pub mod errors;
pub mod float_types;
pub mod object;
pub mod predicate;
pub mod region;
pub mod shapes;
pub mod triangle;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use adjacency::AdjacencyMode;
pub use analysis::{
    Affordance, AnalysisParams, SemanticsData, affordance_analysis, affordance_analysis_with,
    analyse_objects, classify_triangles,
};
pub use errors::{AffordanceError, AffordanceResult};
pub use object::CollisionObject;
pub use predicate::{Predicate, PredicateKind};
pub use triangle::{Triangle, TrianglePoints};
