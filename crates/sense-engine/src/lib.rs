//! `sense-engine` — registry, propagation pipeline and batch dispatch.
//!
//! # Pipeline
//!
//! ```text
//! process_stimulus(ctx, system):
//!   ① Validate   — context has an observer; engine and system enabled.
//!   ② Distance   — Stimulus::measure_distance; beyond
//!                  (range_override or base_range) × range_multiplier
//!                  → BelowThreshold(OutOfRange), no strategy runs.
//!   ③ Intensity  — Stimulus::calculate_intensity, apply_stimulus_effects.
//!   ④ Obstruct   — LineOfSight::calculate_obstruction, clamped to [0, 1].
//!   ⑤ Modifiers  — Modifier::apply_environmental_modifiers.
//!   ⑥ Compose    — base × (1 − obstruction) × range_mod × intensity_multiplier.
//!   ⑦ Threshold  — final ≤ min_threshold → BelowThreshold(TooFaint).
//!   ⑧ Render     — Stimulus::generate_base_message, Modifier::modify_message.
//!   ⑨ Stats      — engine and system counters, success only.
//! ```
//!
//! With the result cache on, a fresh hit replaces ③–⑥.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`config`]    | `EngineConfig`, `CacheConfig`, default constants      |
//! | [`registry`]  | `Registry`, `System`, `SystemStats`                   |
//! | [`engine`]    | `Engine` lifecycle, per-event API, batch dispatch     |
//! | [`cache`]     | `ResultCache`, `CacheKey`, `CachedResult`             |
//! | [`broadcast`] | `Engine::broadcast` — one event to many observers     |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `serde`   | `Serialize`/`Deserialize` on config and statistics.      |
//! | `fx-hash` | FxHash for the result cache map.                         |

pub mod broadcast;
pub mod cache;
pub mod config;
pub mod engine;
mod pipeline;
pub mod registry;


pub use cache::{CacheKey, CacheStats, CachedResult, ResultCache};
pub use config::{CacheConfig, EngineConfig, MAX_SYSTEMS, MIN_THRESHOLD};
pub use engine::{Engine, EngineStats};
pub use registry::{Registry, System, SystemStats};
