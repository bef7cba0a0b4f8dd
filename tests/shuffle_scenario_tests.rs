//! End-to-end shuffle scenarios through the public crate surface.

use std::sync::Arc;

use font_shuffle::{
    CatalogService, DrawCommand, EffectParams, FixedMetricsBackend, FontCatalog,
    FontShuffleEffect, FrameContext, OverrideStore, ShuffleMode,
};

fn effect_with_catalog(families: &[&str]) -> FontShuffleEffect {
    let catalog = Arc::new(CatalogService::with_catalog(FontCatalog::from_families(
        families.iter().copied(),
    )));
    FontShuffleEffect::new(catalog, Arc::new(OverrideStore::new()))
}

fn ctx(frame: i64) -> FrameContext {
    FrameContext {
        frame,
        length: 300,
        fps: 30.0,
    }
}

#[test]
fn interval_30_auto_mode_cycles_abc() {
    let mut effect = effect_with_catalog(&["A", "B", "C"]);
    effect.params.display_text = "Hello".to_string();
    let mut proc = effect.create_processor_with(Ok(FixedMetricsBackend::new()));

    let expectations = [
        (0, "A"),
        (15, "A"),
        (29, "A"),
        (30, "B"),
        (59, "B"),
        (60, "C"),
        (90, "A"), // slot 3 mod 3 = 0
    ];
    for (frame, expected) in expectations {
        proc.update(&ctx(frame), &effect.params);
        assert_eq!(
            proc.current_font(),
            Some(expected),
            "wrong font at frame {frame}"
        );
    }
}

#[test]
fn direct_seek_to_frame_95_yields_a() {
    let mut effect = effect_with_catalog(&["A", "B", "C"]);
    effect.params.display_text = "Hello".to_string();
    let mut proc = effect.create_processor_with(Ok(FixedMetricsBackend::new()));

    // No frames 0–94 were ever rendered.
    proc.update(&ctx(95), &effect.params);
    assert_eq!(proc.current_font(), Some("A"));
}

#[test]
fn scrubbing_reproduces_first_visit() {
    let mut effect = effect_with_catalog(&["A", "B", "C", "D"]);
    effect.params.display_text = "Hello".to_string();
    effect.params.shuffle_mode = ShuffleMode::Random;
    let mut proc = effect.create_processor_with(Ok(FixedMetricsBackend::new()));

    proc.update(&ctx(120), &effect.params);
    let first = proc.current_font().unwrap().to_string();

    // Scrub around, then revisit.
    for frame in [300, 5, 250, 0, 119] {
        proc.update(&ctx(frame), &effect.params);
    }
    proc.update(&ctx(120), &effect.params);
    assert_eq!(proc.current_font(), Some(first.as_str()));
}

#[test]
fn selected_mode_with_empty_selection_falls_back_safely() {
    let mut effect = effect_with_catalog(&["Arial", "Yu Gothic UI", "Comic Sans MS"]);
    effect.params.display_text = "Hello".to_string();
    effect.params.shuffle_mode = ShuffleMode::Selected;
    let mut proc = effect.create_processor_with(Ok(FixedMetricsBackend::new()));

    let cmd = proc.update(&ctx(0), &effect.params);
    assert!(!cmd.is_clear());
    // Fallback chain members, not the arbitrary catalog entry.
    let font = proc.current_font().unwrap();
    assert!(font == "Arial" || font == "Yu Gothic UI");
}

#[test]
fn ordered_mode_follows_user_order_not_catalog_order() {
    let mut effect = effect_with_catalog(&["A", "B", "C"]);
    effect.params.display_text = "Hello".to_string();
    effect.params.shuffle_mode = ShuffleMode::Ordered;
    effect.params.ordered_fonts = vec!["C".to_string(), "A".to_string()];
    let mut proc = effect.create_processor_with(Ok(FixedMetricsBackend::new()));

    proc.update(&ctx(0), &effect.params);
    assert_eq!(proc.current_font(), Some("C"));
    proc.update(&ctx(30), &effect.params);
    assert_eq!(proc.current_font(), Some("A"));
    proc.update(&ctx(60), &effect.params);
    assert_eq!(proc.current_font(), Some("C"));
}

#[test]
fn format_cache_stays_bounded_across_many_fonts() {
    let families: Vec<String> = (0..120).map(|n| format!("Font {n}")).collect();
    let family_refs: Vec<&str> = families.iter().map(String::as_str).collect();
    let mut effect = effect_with_catalog(&family_refs);
    effect.params.display_text = "Hello".to_string();
    // One font per frame.
    effect.params.interval = font_shuffle::AnimatedParam::new(1.0, 1.0, 600.0);
    let mut proc = effect.create_processor_with(Ok(FixedMetricsBackend::new()));

    for frame in 0..120 {
        proc.update(&ctx(frame), &effect.params);
        assert!(proc.cached_formats() <= 50, "cache exceeded bound");
    }

    // Revisit the first font after eviction; it must rebuild cleanly.
    proc.update(&ctx(0), &effect.params);
    assert!(!proc.update(&ctx(0), &effect.params).is_clear());
}

#[test]
fn random_mode_with_same_seed_is_reproducible_across_processors() {
    let run = || {
        let mut effect = effect_with_catalog(&["A", "B", "C", "D", "E", "F"]);
        effect.params.display_text = "Hello".to_string();
        effect.params.shuffle_mode = ShuffleMode::Random;
        let mut proc = effect.create_processor_with(Ok(FixedMetricsBackend::new()));
        (0..300)
            .step_by(30)
            .map(|f| {
                proc.update(&ctx(f), &effect.params);
                proc.current_font().unwrap().to_string()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn draw_command_carries_resolved_style() {
    let mut effect = effect_with_catalog(&["A"]);
    effect.params.display_text = "Hello".to_string();
    effect.params.bold = true;
    let mut proc = effect.create_processor_with(Ok(FixedMetricsBackend::new()));

    let DrawCommand::Text(draw) = proc.update(&ctx(0), &effect.params) else {
        panic!("expected a text draw");
    };
    assert_eq!(draw.text, "Hello");
    assert_eq!(draw.format.family, "A");
    assert!(draw.format.bold);
    assert_eq!(draw.bounds, Some((1920.0, 1080.0)));
}
