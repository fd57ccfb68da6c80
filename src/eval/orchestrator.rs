use std::collections::BTreeMap;

use crate::{
    foundation::core::sanitize_progress,
    foundation::error::ScrublineResult,
    foundation::rng::{Rng64, stable_hash64},
    reveal::stream::RevealState,
    timeline::model::{HighlightSpec, Timeline},
    timeline::stage::resolve_stage,
};

/// Snapshot of everything the rendering layer needs for one host tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderState {
    /// Name of the active scene (empty while inactive).
    pub scene: String,
    /// Active stage within the scene.
    pub stage: u32,
    /// Phase name to clamped `[0, 1]` ratio, for the active stage's specs.
    pub phases: BTreeMap<String, f64>,
    /// Text field to revealed prefix, for the active stage's specs.
    pub revealed: BTreeMap<String, String>,
    /// Highlight name to sampled indices, for every entered stage.
    pub highlights: BTreeMap<String, Vec<u32>>,
    /// Whether the scene group is active at all.
    pub active: bool,
}

impl RenderState {
    /// The neutral record emitted while the scene group is inactive.
    pub fn inactive() -> Self {
        Self {
            scene: String::new(),
            stage: 0,
            phases: BTreeMap::new(),
            revealed: BTreeMap::new(),
            highlights: BTreeMap::new(),
            active: false,
        }
    }
}

/// Maps host playback progress onto a validated [`Timeline`](crate::Timeline).
///
/// Everything except the reveal streams is recomputed from scratch on every
/// call, which is what makes the engine safe to drive at arbitrary progress
/// values: seeking forward or backward needs no history replay. The reveal
/// streams are the documented exception (see [`crate::RevealState`]) and are
/// dropped synchronously on deactivation and on scene exit.
pub struct Orchestrator {
    timeline: Timeline,
    /// Reveal streams keyed by text field, scoped to the scene in
    /// `current_scene`.
    streams: BTreeMap<String, RevealState>,
    current_scene: Option<usize>,
}

impl Orchestrator {
    /// Take ownership of `timeline`, validating it once up front.
    pub fn new(timeline: Timeline) -> ScrublineResult<Self> {
        timeline.validate()?;
        Ok(Self {
            timeline,
            streams: BTreeMap::new(),
            current_scene: None,
        })
    }

    /// The timeline this orchestrator drives.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Map `(progress, is_active)` to the render state for this tick.
    ///
    /// Infallible: progress is sanitized and clamped to the timeline edges,
    /// and the timeline was validated at construction.
    #[tracing::instrument(skip(self), level = "debug")]
    pub fn evaluate(&mut self, progress: f64, is_active: bool) -> RenderState {
        if !is_active {
            if self.current_scene.take().is_some() {
                self.streams.clear();
                tracing::debug!("deactivated, reveal state dropped");
            }
            return RenderState::inactive();
        }

        let progress = sanitize_progress(progress);
        let index = self.timeline.scene_index_at(progress);
        if self.current_scene != Some(index) {
            // Per-scene ownership: streams never outlive their scene.
            self.streams.clear();
            self.current_scene = Some(index);
            tracing::debug!(scene = %self.timeline.scenes[index].name, "scene entered");
        }

        let scene = &self.timeline.scenes[index];
        let local = scene.range.local(progress);
        let stage = resolve_stage(local, &scene.stages);

        let mut phases = BTreeMap::new();
        for spec in scene.phases.iter().filter(|spec| spec.stage == stage) {
            phases.insert(spec.name.clone(), spec.sample(local));
        }

        let mut revealed = BTreeMap::new();
        for spec in &scene.texts {
            let stream = self
                .streams
                .entry(spec.field.clone())
                .or_insert_with(|| RevealState::new(spec.text.chars().count(), spec.chunk_chars));
            if spec.stage > stage {
                // Scrubbed back before the owning stage's start.
                stream.reset();
            } else if spec.stage == stage {
                stream.advance(true);
                revealed.insert(spec.field.clone(), stream.prefix(&spec.text).to_owned());
            }
            // Streams of stages already passed keep their counter but stop
            // ticking and are not emitted.
        }

        let mut highlights = BTreeMap::new();
        for spec in scene.highlights.iter().filter(|spec| stage >= spec.stage) {
            highlights.insert(
                spec.name.clone(),
                highlight_sample(self.timeline.seed, &scene.name, spec),
            );
        }

        RenderState {
            scene: scene.name.clone(),
            stage,
            phases,
            revealed,
            highlights,
            active: true,
        }
    }
}

/// Draw `spec.take` distinct indices from `0..spec.pool`, stable for a given
/// `(seed, scene, spec.name)`.
fn highlight_sample(seed: u64, scene: &str, spec: &HighlightSpec) -> Vec<u32> {
    let mut rng = Rng64::new(stable_hash64(stable_hash64(seed, scene), &spec.name));
    let mut pool: Vec<u32> = (0..spec.pool).collect();
    let take = spec.take.min(pool.len());
    // Partial Fisher-Yates: only the prefix we keep needs shuffling.
    for i in 0..take {
        let j = i + rng.next_below((pool.len() - i) as u64) as usize;
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}

#[cfg(test)]
#[path = "../../tests/unit/eval/orchestrator.rs"]
mod tests;
