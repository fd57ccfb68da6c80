use crate::{
    animation::ease::Ease,
    foundation::core::TimeRange,
    foundation::error::ScrublineResult,
    timeline::model::{HighlightSpec, PhaseSpec, Scene, StageBreakpoint, TextSpec, Timeline},
};

/// Builder for [`Timeline`](crate::Timeline).
///
/// Scenes are appended with a duration and placed back to back on the
/// playback axis, so the contiguity invariant holds by construction; the
/// remaining invariants are checked by [`build`](TimelineBuilder::build).
pub struct TimelineBuilder {
    seed: u64,
    cursor_secs: f64,
    scenes: Vec<Scene>,
}

impl TimelineBuilder {
    /// Create a builder whose first scene starts at `0.0` seconds.
    pub fn new() -> Self {
        Self {
            seed: 0,
            cursor_secs: 0.0,
            scenes: Vec::new(),
        }
    }

    /// Set the global deterministic seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Append a scene immediately after the previous one.
    pub fn scene(mut self, scene: SceneBuilder) -> Self {
        let start = self.cursor_secs;
        self.cursor_secs = start + scene.duration_secs;
        self.scenes.push(scene.into_scene(start));
        self
    }

    /// Build and validate the final [`Timeline`](crate::Timeline).
    pub fn build(self) -> ScrublineResult<Timeline> {
        let timeline = Timeline {
            scenes: self.scenes,
            seed: self.seed,
        };
        timeline.validate()?;
        Ok(timeline)
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one [`Scene`](crate::Scene); its start is assigned by
/// [`TimelineBuilder::scene`].
pub struct SceneBuilder {
    name: String,
    duration_secs: f64,
    stages: Vec<StageBreakpoint>,
    phases: Vec<PhaseSpec>,
    texts: Vec<TextSpec>,
    highlights: Vec<HighlightSpec>,
}

impl SceneBuilder {
    /// Create a scene lasting `duration_secs` seconds.
    pub fn new(name: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            name: name.into(),
            duration_secs,
            stages: Vec::new(),
            phases: Vec::new(),
            texts: Vec::new(),
            highlights: Vec::new(),
        }
    }

    /// Add a stage breakpoint at `at` scene-local seconds.
    pub fn stage(mut self, at: f64, stage: u32) -> Self {
        self.stages.push(StageBreakpoint { at, stage });
        self
    }

    /// Add a phase window owned by `stage`.
    pub fn phase(
        mut self,
        name: impl Into<String>,
        stage: u32,
        start: f64,
        duration: f64,
        ease: Ease,
    ) -> Self {
        self.phases.push(PhaseSpec {
            name: name.into(),
            stage,
            start,
            duration,
            ease,
        });
        self
    }

    /// Add a typewriter field owned by `stage`.
    pub fn text(
        mut self,
        field: impl Into<String>,
        stage: u32,
        text: impl Into<String>,
        chunk_chars: usize,
    ) -> Self {
        self.texts.push(TextSpec {
            field: field.into(),
            stage,
            text: text.into(),
            chunk_chars,
        });
        self
    }

    /// Add a seeded highlight sample emitted from `stage` onward.
    pub fn highlight(mut self, name: impl Into<String>, stage: u32, pool: u32, take: usize) -> Self {
        self.highlights.push(HighlightSpec {
            name: name.into(),
            stage,
            pool,
            take,
        });
        self
    }

    fn into_scene(self, start_secs: f64) -> Scene {
        Scene {
            name: self.name,
            range: TimeRange {
                start: start_secs,
                end: start_secs + self.duration_secs,
            },
            stages: self.stages,
            phases: self.phases,
            texts: self.texts,
            highlights: self.highlights,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/dsl.rs"]
mod tests;
