use crate::timeline::model::PhaseSpec;

/// Clamped linear progress of a sub-animation window.
///
/// `local_elapsed` is seconds since the owning scene started; `start` and
/// `duration` describe the window in the same scene-local seconds. The result
/// is a pure function of the three inputs, recomputed on every evaluation and
/// never stored, which is what makes the engine scrub-safe.
///
/// `duration <= 0` degenerates to a step: `1` once the window has started,
/// `0` before.
pub fn phase_ratio(local_elapsed: f64, start: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if local_elapsed >= start { 1.0 } else { 0.0 };
    }
    ((local_elapsed - start) / duration).clamp(0.0, 1.0)
}

impl PhaseSpec {
    /// Sample this phase at `local_elapsed` seconds into the owning scene.
    pub fn sample(&self, local_elapsed: f64) -> f64 {
        self.ease
            .apply(phase_ratio(local_elapsed, self.start, self.duration))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/phase.rs"]
mod tests;
