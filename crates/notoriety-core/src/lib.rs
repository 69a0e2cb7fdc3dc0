//! Notoriety resolution for a persistent multiplayer world.
//!
//! Given an observer and a target, the [`Resolver`] decides how the observer
//! perceives the target (innocent, ally, attackable, criminal, enemy,
//! murderer or invulnerable), whether beneficial or harmful actions between
//! them are allowed, and who may loot a corpse. Policy comes from
//! [`NotorietyConfig`]; world state is read through
//! [`WorldView`](notoriety_world::WorldView).
//!
//! # Modules
//!
//! - [`allegiance`] -- [`AllegianceProvider`] and the ethics, faction,
//!   alignment and IOB membership systems.
//! - [`config`] -- Configuration loading into strongly-typed structs.
//! - [`corpse`] -- Corpse notoriety and the looting grace window.
//! - [`duel`] -- Duel session predicates.
//! - [`gates`] -- `allow_beneficial` and `allow_harmful`.
//! - [`guild`] -- Guild relationships and derived war status.
//! - [`house`] -- The house friend flag.
//! - [`resolver`] -- [`Resolver`] and [`Resolution`].
//! - [`rules`] -- The ordered rule chain, [`MOBILE_RULES`].
//!
//! [`AllegianceProvider`]: allegiance::AllegianceProvider
//! [`MOBILE_RULES`]: rules::MOBILE_RULES

pub mod allegiance;
pub mod config;
pub mod corpse;
pub mod duel;
pub mod gates;
pub mod guild;
pub mod house;
pub mod resolver;
pub mod rules;

pub use config::{ConfigError, NotorietyConfig};
pub use house::check_house_flag;
pub use resolver::{Resolution, Resolver};
