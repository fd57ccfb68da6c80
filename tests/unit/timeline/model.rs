use super::*;

fn scene(name: &str, start: f64, end: f64) -> Scene {
    Scene {
        name: name.to_string(),
        range: TimeRange { start, end },
        stages: vec![
            StageBreakpoint { at: 0.0, stage: 0 },
            StageBreakpoint { at: 2.0, stage: 1 },
        ],
        phases: vec![],
        texts: vec![],
        highlights: vec![],
    }
}

fn two_scenes() -> Timeline {
    Timeline {
        scenes: vec![scene("intro", 0.0, 9.0), scene("tour", 9.0, 20.0)],
        seed: 1,
    }
}

#[test]
fn valid_timeline_passes() {
    two_scenes().validate().unwrap();
}

#[test]
fn empty_timeline_is_rejected() {
    let timeline = Timeline {
        scenes: vec![],
        seed: 0,
    };
    assert!(timeline.validate().is_err());
}

#[test]
fn gaps_and_overlaps_are_rejected() {
    let gap = Timeline {
        scenes: vec![scene("a", 0.0, 9.0), scene("b", 10.0, 20.0)],
        seed: 0,
    };
    assert!(gap.validate().unwrap_err().to_string().contains("contiguous"));

    let overlap = Timeline {
        scenes: vec![scene("a", 0.0, 9.0), scene("b", 8.0, 20.0)],
        seed: 0,
    };
    assert!(overlap.validate().is_err());
}

#[test]
fn duplicate_scene_names_are_rejected() {
    let timeline = Timeline {
        scenes: vec![scene("a", 0.0, 9.0), scene("a", 9.0, 20.0)],
        seed: 0,
    };
    assert!(timeline.validate().is_err());
}

#[test]
fn breakpoint_tables_must_be_monotonic() {
    let mut bad = two_scenes();
    bad.scenes[0].stages = vec![
        StageBreakpoint { at: 3.0, stage: 0 },
        StageBreakpoint { at: 2.0, stage: 1 },
    ];
    assert!(bad.validate().is_err());

    let mut bad = two_scenes();
    bad.scenes[0].stages = vec![
        StageBreakpoint { at: 1.0, stage: 2 },
        StageBreakpoint { at: 2.0, stage: 1 },
    ];
    assert!(bad.validate().is_err());
}

#[test]
fn unreachable_breakpoints_are_rejected() {
    let mut bad = two_scenes();
    bad.scenes[0].stages.push(StageBreakpoint { at: 9.0, stage: 2 });
    assert!(bad.validate().unwrap_err().to_string().contains("unreachable"));

    let mut bad = two_scenes();
    bad.scenes[0].stages.insert(0, StageBreakpoint { at: -1.0, stage: 0 });
    assert!(bad.validate().is_err());
}

#[test]
fn specs_must_reference_declared_stages() {
    let mut bad = two_scenes();
    bad.scenes[0].phases.push(PhaseSpec {
        name: "fade".to_string(),
        stage: 7,
        start: 0.0,
        duration: 1.0,
        ease: Ease::Linear,
    });
    assert!(bad.validate().unwrap_err().to_string().contains("undeclared"));

    // Stage 0 is implicitly declared even with an empty table.
    let mut ok = two_scenes();
    ok.scenes[0].stages.clear();
    ok.scenes[0].texts.push(TextSpec {
        field: "headline".to_string(),
        stage: 0,
        text: "hi".to_string(),
        chunk_chars: 1,
    });
    ok.validate().unwrap();
}

#[test]
fn text_and_highlight_payloads_are_checked() {
    let mut bad = two_scenes();
    bad.scenes[0].texts.push(TextSpec {
        field: "headline".to_string(),
        stage: 1,
        text: "hi".to_string(),
        chunk_chars: 0,
    });
    assert!(bad.validate().unwrap_err().to_string().contains("chunk_chars"));

    let mut bad = two_scenes();
    bad.scenes[0].highlights.push(HighlightSpec {
        name: "rows".to_string(),
        stage: 1,
        pool: 4,
        take: 5,
    });
    assert!(bad.validate().is_err());
}

#[test]
fn duplicate_keys_within_a_scene_are_rejected() {
    let mut bad = two_scenes();
    for _ in 0..2 {
        bad.scenes[0].phases.push(PhaseSpec {
            name: "fade".to_string(),
            stage: 1,
            start: 0.0,
            duration: 1.0,
            ease: Ease::Linear,
        });
    }
    assert!(bad.validate().is_err());
}

#[test]
fn json_round_trip_preserves_the_model() {
    let timeline = two_scenes();
    let json = serde_json::to_string(&timeline).unwrap();
    let back = Timeline::from_json_str(&json).unwrap();
    assert_eq!(back.seed, timeline.seed);
    assert_eq!(back.scenes.len(), 2);
    assert_eq!(back.scenes[1].name, "tour");
    assert_eq!(back.scenes[1].range, timeline.scenes[1].range);
}

#[test]
fn from_json_applies_serde_defaults() {
    let timeline = Timeline::from_json_str(
        r#"{"scenes":[{"name":"solo","range":{"start":0.0,"end":5.0}}]}"#,
    )
    .unwrap();
    assert_eq!(timeline.seed, 0);
    assert!(timeline.scenes[0].stages.is_empty());
}

#[test]
fn from_json_distinguishes_serde_and_validation_errors() {
    assert!(matches!(
        Timeline::from_json_str("not json"),
        Err(ScrublineError::Serde(_))
    ));
    assert!(matches!(
        Timeline::from_json_str(r#"{"scenes":[]}"#),
        Err(ScrublineError::Validation(_))
    ));
}

#[test]
fn scene_index_clamps_to_edges() {
    let timeline = two_scenes();
    assert_eq!(timeline.scene_index_at(-5.0), 0);
    assert_eq!(timeline.scene_index_at(0.0), 0);
    assert_eq!(timeline.scene_index_at(8.999), 0);
    assert_eq!(timeline.scene_index_at(9.0), 1);
    assert_eq!(timeline.scene_index_at(19.999), 1);
    assert_eq!(timeline.scene_index_at(20.0), 1);
    assert_eq!(timeline.scene_index_at(120.0), 1);
}
