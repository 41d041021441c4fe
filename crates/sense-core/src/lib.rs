//! `sense-core` — foundational types for the `sense` stimulus propagation
//! engine.
//!
//! This crate is a dependency of every other `sense-*` crate.  It has no
//! `sense-*` dependencies and only `thiserror` (plus optional `serde`)
//! externally.
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `SystemId`, `ObserverId`                                  |
//! | [`geo`]       | `Position`, 3-D / horizontal distance                     |
//! | [`time`]      | `Tick`                                                    |
//! | [`env`]       | `Weather`, `TimeOfDay`, `FrequencyBand`, `SectorType`     |
//! | [`stimulus`]  | `StimulusType`, `StimulusSet`                             |
//! | [`direction`] | `Direction` and its message phrases                       |
//! | [`host`]      | `WorldHost`, `MessageSink`, `ObserverInfo`                |
//! | [`error`]     | `SpatialError`, `ErrorKind`, `SpatialResult`              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod direction;
pub mod env;
pub mod error;
pub mod geo;
pub mod host;
pub mod ids;
pub mod stimulus;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use env::{FrequencyBand, SectorType, TimeOfDay, Weather};
pub use error::{error_to_string, ErrorKind, Imperceptible, SpatialError, SpatialResult};
pub use geo::Position;
pub use host::{MessageSink, ObserverInfo, ObserverKind, Posture, WorldHost};
pub use ids::{ObserverId, SystemId};
pub use stimulus::{StimulusSet, StimulusType};
pub use time::Tick;
