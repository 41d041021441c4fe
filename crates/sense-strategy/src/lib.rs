//! `sense-strategy` — the per-event context and the three strategy traits
//! every sense is built from.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`buffer`]    | `Bounded<T>`, `MessageBuffer`, `Obstacle`, capacity constants   |
//! | [`context`]   | `SpatialContext<'w>` — one event as seen by one observer        |
//! | [`path`]      | `GridWalk` — the digital line walk shared by the LOS strategies |
//! | [`stimulus`]  | `Stimulus` trait                                                |
//! | [`los`]       | `LineOfSight` trait                                             |
//! | [`modifier`]  | `Modifier` trait, `EnvironmentalModifiers`                      |
//! | [`sense`]     | `Sense` — one strategy of each kind under a name                |
//!
//! # Design notes
//!
//! A sense ("system") is one implementation of each trait composed together
//! by `sense-engine`.  The engine drives a context through the strategies in
//! a fixed order:
//!
//! 1. `Stimulus::calculate_intensity` then `Stimulus::apply_stimulus_effects`
//! 2. `LineOfSight::calculate_obstruction`
//! 3. `Modifier::apply_environmental_modifiers`
//! 4. `Stimulus::generate_base_message` then `Modifier::modify_message`
//!
//! Strategies are stateless per call and shared behind `Arc`, so all three
//! traits require `Send + Sync`.

pub mod buffer;
pub mod context;
pub mod los;
pub mod modifier;
pub mod path;
pub mod sense;
pub mod stimulus;


pub use buffer::{
    Bounded, EntityList, MessageBuffer, Obstacle, ObstacleList, MAX_MESSAGE_LEN,
    MAX_NEARBY_ENTITIES, MAX_OBSTACLES,
};
pub use context::SpatialContext;
pub use los::LineOfSight;
pub use modifier::{EnvironmentalModifiers, Modifier};
pub use path::{GridStep, GridWalk};
pub use sense::Sense;
pub use stimulus::Stimulus;
