//! Scrubline is a deterministic, scrubbable progress-to-scene timeline engine.
//!
//! A host (typically a render/animation loop that also owns a seekable clock)
//! hands the engine a single playback position in seconds plus an activation
//! flag, and gets back the complete discrete render state for that instant:
//! the active scene, the active stage within it, clamped `[0, 1]` phase
//! ratios for continuous sub-animations, typewriter text prefixes, and
//! seeded highlight samples.
//!
//! # Evaluation overview
//!
//! 1. **Select**: `progress -> Scene` via the sorted, contiguous scene table
//! 2. **Resolve**: scene-local seconds `-> stage` via the breakpoint table
//! 3. **Sample**: stage-gated phase specs `-> [0, 1]` ratios
//! 4. **Reveal**: stage-gated text specs advance per-field reveal streams
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Scrub-safe**: the same progress value yields the same state no matter
//!   when or in what order it is requested; nothing replays history. The one
//!   exception is typewriter reveal, which ticks per host frame and is reset
//!   explicitly on deactivation and backward scrubs (see [`RevealState`]).
//! - **Infallible hot path**: inputs are total over the reals and clamped at
//!   the edges; configuration defects are caught once by
//!   [`Timeline::validate`], never per tick.
//! - **Seeded randomness only**: "random" visuals come from a SplitMix64
//!   generator keyed by the timeline seed, so every run reproduces.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod eval;
mod foundation;
mod reveal;
mod timeline;

pub use animation::ease::Ease;
pub use animation::phase::phase_ratio;
pub use eval::orchestrator::{Orchestrator, RenderState};
pub use foundation::core::TimeRange;
pub use foundation::error::{ScrublineError, ScrublineResult};
pub use foundation::rng::{Rng64, stable_hash64};
pub use reveal::stream::{RevealPhase, RevealState};
pub use timeline::dsl::{SceneBuilder, TimelineBuilder};
pub use timeline::model::{HighlightSpec, PhaseSpec, Scene, StageBreakpoint, TextSpec, Timeline};
pub use timeline::stage::resolve_stage;
