//! Collision detection for 2D rigid bodies.
//!
//! [`broadphase`] finds pairs of bodies whose bounding volumes overlap with a
//! sweep and prune; [`narrowphase`] confirms them through a [`dispatch`]
//! table of per shape-pair tests, extending the table as it meets new pairs
//! of shape kinds.

pub mod body;
pub mod bounds;
pub mod broadphase;
pub mod config;
pub mod contact;
pub mod dispatch;
pub mod error;
pub mod groups;
pub mod intersect;
pub mod narrowphase;
pub mod phase;
pub mod scene;
pub mod shapes;
pub mod world;

pub use crate::{
    body::{Body, BodyArena, BodyHandle, BodyKind},
    broadphase::{BroadPhase, BroadPhaseAabb, BroadPhaseCbb, BroadPhaseKind, CollisionPair},
    config::CollisionConfig,
    contact::{Contact, WorldId},
    dispatch::{DispatchTable, TestEntry},
    error::{CollisionError, ConfigError},
    narrowphase::{NarrowInput, NarrowPhase},
    phase::CollisionPhase,
    world::CollisionWorld,
};
