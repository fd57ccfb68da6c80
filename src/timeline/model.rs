use std::collections::BTreeSet;

use crate::{
    animation::ease::Ease,
    foundation::core::TimeRange,
    foundation::error::{ScrublineError, ScrublineResult},
};

/// A complete scripted timeline.
///
/// A timeline is a pure data model that can be:
/// - built programmatically (see [`crate::TimelineBuilder`])
/// - serialized/deserialized via Serde (JSON)
///
/// It carries no playback state of its own; the [`crate::Orchestrator`]
/// owns a validated timeline and maps host progress onto it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Ordered, contiguous scenes covering the driven playback range.
    pub scenes: Vec<Scene>,
    /// Global deterministic seed used for highlight sampling.
    #[serde(default)]
    pub seed: u64,
}

/// One named interval of playback with its own stage table and specs.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Scene name for authoring/debugging and output labeling.
    pub name: String,
    /// Placement on the playback axis, half-open `[start, end)`.
    pub range: TimeRange,
    /// Stage breakpoints in scene-local seconds; empty means a single stage 0.
    #[serde(default)]
    pub stages: Vec<StageBreakpoint>,
    /// Continuous sub-animation windows, gated by their owning stage.
    #[serde(default)]
    pub phases: Vec<PhaseSpec>,
    /// Typewriter fields, gated by their owning stage.
    #[serde(default)]
    pub texts: Vec<TextSpec>,
    /// Seeded highlight samples, emitted once their stage is entered.
    #[serde(default)]
    pub highlights: Vec<HighlightSpec>,
}

/// One row of a scene's stage table: at `at` seconds into the scene, the
/// scene switches to `stage`.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct StageBreakpoint {
    /// Threshold in scene-local seconds (closed lower bound).
    pub at: f64,
    /// Stage selected at and after the threshold.
    pub stage: u32,
}

/// A continuous `[0, 1]` animation window owned by one stage.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PhaseSpec {
    /// Phase name; keys the output `phases` map.
    pub name: String,
    /// Owning stage; the phase is emitted only while this stage is active.
    #[serde(default)]
    pub stage: u32,
    /// Window start in scene-local seconds.
    #[serde(default)]
    pub start: f64,
    /// Window length in seconds; `<= 0` degenerates to a step.
    pub duration: f64,
    /// Easing shape applied to the clamped ratio.
    #[serde(default)]
    pub ease: Ease,
}

/// A typewriter field owned by one stage.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextSpec {
    /// Field name; keys the output `revealed` map.
    pub field: String,
    /// Owning stage; the field ticks and is emitted only while active.
    #[serde(default)]
    pub stage: u32,
    /// Full target text.
    pub text: String,
    /// Reveal rate in characters per host tick.
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,
}

fn default_chunk_chars() -> usize {
    2
}

/// A stable pseudo-random subset of indices, for "highlight a sample of the
/// items" visuals.
///
/// The sample is a pure function of `(timeline seed, scene name, spec name)`,
/// independent of progress and call order.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HighlightSpec {
    /// Sample name; keys the output `highlights` map.
    pub name: String,
    /// Stage from which the sample is emitted (`stage >= spec.stage`).
    #[serde(default)]
    pub stage: u32,
    /// Number of items to draw from (`0..pool`).
    pub pool: u32,
    /// How many distinct indices to draw.
    pub take: usize,
}

impl Timeline {
    /// Deserialize a timeline from JSON and validate it in one step.
    pub fn from_json_str(json: &str) -> ScrublineResult<Self> {
        let timeline: Timeline =
            serde_json::from_str(json).map_err(|e| ScrublineError::serde(e.to_string()))?;
        timeline.validate()?;
        Ok(timeline)
    }

    /// Validate timeline invariants.
    ///
    /// Run once at construction; per-tick evaluation assumes a validated
    /// timeline and performs no defensive checks of its own.
    #[tracing::instrument(skip(self))]
    pub fn validate(&self) -> ScrublineResult<()> {
        if self.scenes.is_empty() {
            return Err(ScrublineError::validation("timeline must have >= 1 scene"));
        }

        let mut names = BTreeSet::new();
        for scene in &self.scenes {
            if scene.name.trim().is_empty() {
                return Err(ScrublineError::validation("scene name must be non-empty"));
            }
            if !names.insert(scene.name.as_str()) {
                return Err(ScrublineError::validation(format!(
                    "duplicate scene name '{}'",
                    scene.name
                )));
            }
            scene.validate()?;
        }

        for pair in self.scenes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if b.range.start != a.range.end {
                return Err(ScrublineError::validation(format!(
                    "scenes '{}' and '{}' must be contiguous ({} != {})",
                    a.name, b.name, a.range.end, b.range.start
                )));
            }
        }

        Ok(())
    }

    /// Index of the scene rendered at `progress`, clamped to the edges.
    ///
    /// Before the first scene's start this is the first scene; at or after
    /// the last scene's end it is the last. Requires a validated (sorted,
    /// contiguous, non-empty) scene table.
    pub(crate) fn scene_index_at(&self, progress: f64) -> usize {
        let idx = self
            .scenes
            .partition_point(|scene| scene.range.start <= progress);
        idx.saturating_sub(1)
    }
}

impl Scene {
    fn validate(&self) -> ScrublineResult<()> {
        let name = &self.name;
        if !self.range.start.is_finite() || !self.range.end.is_finite() {
            return Err(ScrublineError::validation(format!(
                "scene '{name}' range bounds must be finite"
            )));
        }
        if self.range.start >= self.range.end {
            return Err(ScrublineError::validation(format!(
                "scene '{name}' range start must be < end"
            )));
        }

        let duration = self.range.duration();
        for pair in self.stages.windows(2) {
            if pair[1].at <= pair[0].at {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' stage thresholds must be strictly increasing"
                )));
            }
            if pair[1].stage < pair[0].stage {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' stage ids must be non-decreasing"
                )));
            }
        }
        for bp in &self.stages {
            if !bp.at.is_finite() || bp.at < 0.0 {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' stage threshold must be finite and >= 0"
                )));
            }
            if bp.at >= duration {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' stage threshold {} is unreachable (scene lasts {duration}s)",
                    bp.at
                )));
            }
        }

        // Stage 0 is always reachable via the fallback, so specs may name it
        // even when the table starts later.
        let mut known_stages: BTreeSet<u32> = self.stages.iter().map(|bp| bp.stage).collect();
        known_stages.insert(0);

        let mut phase_names = BTreeSet::new();
        for spec in &self.phases {
            if spec.name.trim().is_empty() {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' phase name must be non-empty"
                )));
            }
            if !phase_names.insert(spec.name.as_str()) {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' duplicate phase name '{}'",
                    spec.name
                )));
            }
            if !known_stages.contains(&spec.stage) {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' phase '{}' references undeclared stage {}",
                    spec.name, spec.stage
                )));
            }
            if !spec.start.is_finite() || spec.start < 0.0 {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' phase '{}' start must be finite and >= 0",
                    spec.name
                )));
            }
            if !spec.duration.is_finite() {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' phase '{}' duration must be finite",
                    spec.name
                )));
            }
        }

        let mut fields = BTreeSet::new();
        for spec in &self.texts {
            if spec.field.trim().is_empty() {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' text field must be non-empty"
                )));
            }
            if !fields.insert(spec.field.as_str()) {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' duplicate text field '{}'",
                    spec.field
                )));
            }
            if !known_stages.contains(&spec.stage) {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' text field '{}' references undeclared stage {}",
                    spec.field, spec.stage
                )));
            }
            if spec.text.is_empty() {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' text field '{}' target text must be non-empty",
                    spec.field
                )));
            }
            if spec.chunk_chars == 0 {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' text field '{}' chunk_chars must be >= 1",
                    spec.field
                )));
            }
        }

        let mut highlight_names = BTreeSet::new();
        for spec in &self.highlights {
            if spec.name.trim().is_empty() {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' highlight name must be non-empty"
                )));
            }
            if !highlight_names.insert(spec.name.as_str()) {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' duplicate highlight name '{}'",
                    spec.name
                )));
            }
            if !known_stages.contains(&spec.stage) {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' highlight '{}' references undeclared stage {}",
                    spec.name, spec.stage
                )));
            }
            if spec.pool == 0 {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' highlight '{}' pool must be > 0",
                    spec.name
                )));
            }
            if spec.take == 0 || spec.take > spec.pool as usize {
                return Err(ScrublineError::validation(format!(
                    "scene '{name}' highlight '{}' take must be in 1..=pool",
                    spec.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
