//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Caller-clamped `dt` (no internal clamping, the contract is explicit)
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod hazard;
pub mod lap;
pub mod player;
pub mod state;
pub mod theme;
pub mod tick;
pub mod track;

pub use collision::{Aabb, any_collision};
pub use hazard::{Hazard, HazardField, HazardKind};
pub use lap::LapTracker;
pub use player::{InputState, Player};
pub use state::{GameEvent, HazardPose, HudSnapshot, PlayerPose, RunPhase, RunState};
pub use theme::{Role, THEMES, Theme, ThemeRegistry, role_color};
pub use tick::tick;
pub use track::{Frame, Track, TrackError};
