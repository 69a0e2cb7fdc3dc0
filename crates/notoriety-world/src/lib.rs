//! World-state port for the notoriety rules engine.
//!
//! The resolver never reaches into ambient engine state. Everything it reads
//! goes through the [`WorldView`] trait, which the engine implements over its
//! live object graph and which [`WorldMap`] implements over plain snapshots.
//!
//! # Modules
//!
//! - [`error`] -- Errors raised while assembling a world from fixtures.
//! - [`view`] -- The [`WorldView`] trait and its derived region queries.
//! - [`world_map`] -- [`WorldMap`], an in-memory world, and [`WorldFixture`],
//!   its YAML form.

pub mod error;
pub mod view;
pub mod world_map;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use view::WorldView;
pub use world_map::{PartyFixture, WorldFixture, WorldMap};
