//! `sense-world` — a self-contained reference host for the sense engine.
//!
//! Real games implement [`WorldHost`](sense_core::WorldHost) over their own
//! zone and entity tables.  This crate provides a small in-memory world that
//! does the same, for tests, demos and tools.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`terrain`] | `TerrainMap`, `TerrainMapBuilder` — sector and elevation grids   |
//! | [`loader`]  | CSV terrain loader (`x,y,sector,elevation`)                      |
//! | [`index`]   | `ObserverIndex` — R-tree over observer positions                 |
//! | [`world`]   | `StaticWorld` — implements `WorldHost`                           |
//! | [`mailbox`] | `Mailbox` — implements `MessageSink` by recording messages       |
//! | [`error`]   | `WorldError`, `WorldResult<T>`                                   |

pub mod error;
pub mod index;
pub mod loader;
pub mod mailbox;
pub mod terrain;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{WorldError, WorldResult};
pub use index::ObserverIndex;
pub use loader::{load_terrain_csv, load_terrain_reader};
pub use mailbox::Mailbox;
pub use terrain::{TerrainMap, TerrainMapBuilder};
pub use world::StaticWorld;
