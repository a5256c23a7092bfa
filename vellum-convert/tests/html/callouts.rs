//! Special-class converter tests: spacing indicators, dual-coding callouts,
//! screenplay blocks.

use vellum_convert::to_blocks;
use vellum_model::{
    Alignment, Block, CalloutBlock, Priority, ScreenplayKind, SpacingPalette,
};

fn callout(block: &Block) -> &CalloutBlock {
    match block {
        Block::Callout(callout) => callout,
        other => panic!("expected callout, got {other:?}"),
    }
}

#[test]
fn spacing_indicator_reads_label_and_message() {
    let html = "<div class=\"spacing-indicator compact\">\
        <span class=\"spacing-label\">Dense section</span>\
        <span class=\"spacing-message\">Consider a scene break here.</span>\
        </div>";
    let blocks = to_blocks(html);
    assert_eq!(blocks.len(), 1);
    match callout(&blocks[0]) {
        CalloutBlock::Spacing(spacing) => {
            assert_eq!(spacing.label, "Dense section");
            assert_eq!(
                spacing.message.as_deref(),
                Some("Consider a scene break here.")
            );
            assert_eq!(spacing.palette, SpacingPalette::compact());
        }
        other => panic!("expected spacing callout, got {other:?}"),
    }
}

#[test]
fn spacing_indicator_variants_pick_palettes() {
    let extended = to_blocks(
        "<div class=\"spacing-indicator extended\">\
         <span class=\"spacing-label\">Sparse</span></div>",
    );
    match callout(&extended[0]) {
        CalloutBlock::Spacing(s) => assert_eq!(s.palette, SpacingPalette::extended()),
        other => panic!("{other:?}"),
    }

    let neutral = to_blocks(
        "<div class=\"spacing-indicator\">\
         <span class=\"spacing-label\">Even</span></div>",
    );
    match callout(&neutral[0]) {
        CalloutBlock::Spacing(s) => assert_eq!(s.palette, SpacingPalette::neutral()),
        other => panic!("{other:?}"),
    }
}

#[test]
fn empty_spacing_indicator_is_dropped() {
    let blocks = to_blocks("<div class=\"spacing-indicator\"></div>");
    assert!(blocks.is_empty());
}

#[test]
fn dual_coding_callout_reads_fields_and_priority() {
    let html = "<div class=\"dual-coding-callout priority-high\">\
        <span class=\"callout-icon\">📈</span>\
        <span class=\"callout-title\">Add a diagram</span>\
        <span class=\"callout-reason\">Spatial relations described in prose</span>\
        <span class=\"callout-action\">Sketch the room layout</span>\
        </div>";
    let blocks = to_blocks(html);
    match callout(&blocks[0]) {
        CalloutBlock::DualCoding(dual) => {
            assert_eq!(dual.title, "Add a diagram");
            assert_eq!(dual.priority, Priority::High);
            assert_eq!(dual.icon.as_deref(), Some("📈"));
            assert_eq!(
                dual.reason.as_deref(),
                Some("Spatial relations described in prose")
            );
            assert_eq!(dual.action.as_deref(), Some("Sketch the room layout"));
            assert_eq!(dual.priority.accent(), "DC2626");
        }
        other => panic!("expected dual-coding callout, got {other:?}"),
    }
}

#[test]
fn dual_coding_priority_defaults_to_medium() {
    let html = "<div class=\"dual-coding-callout\">\
        <span class=\"callout-title\">Untagged</span></div>";
    let blocks = to_blocks(html);
    match callout(&blocks[0]) {
        CalloutBlock::DualCoding(dual) => assert_eq!(dual.priority, Priority::Medium),
        other => panic!("{other:?}"),
    }
}

#[test]
fn screenplay_character_is_uppercased_and_indented() {
    let html = "<div class=\"screenplay-block\" data-block-type=\"character\">Morgan</div>";
    let blocks = to_blocks(html);
    match callout(&blocks[0]) {
        CalloutBlock::Screenplay(s) => {
            assert_eq!(s.kind, ScreenplayKind::Character);
            let text: String = s
                .runs
                .iter()
                .filter_map(|i| match i {
                    vellum_model::Inline::Run(run) => Some(run.text.clone()),
                    _ => None,
                })
                .collect();
            assert_eq!(text, "MORGAN");
            assert!(s.kind.left_indent() > ScreenplayKind::Dialogue.left_indent());
        }
        other => panic!("{other:?}"),
    }
}

#[test]
fn screenplay_transition_is_right_aligned() {
    let html = "<div class=\"screenplay-block transition\">Cut to:</div>";
    let blocks = to_blocks(html);
    match callout(&blocks[0]) {
        CalloutBlock::Screenplay(s) => {
            assert_eq!(s.kind, ScreenplayKind::Transition);
            assert_eq!(s.kind.alignment(), Alignment::Right);
        }
        other => panic!("{other:?}"),
    }
}

#[test]
fn screenplay_runs_are_monospace() {
    let html = "<div class=\"screenplay-block\" data-block-type=\"dialogue\">Hello.</div>";
    let blocks = to_blocks(html);
    match callout(&blocks[0]) {
        CalloutBlock::Screenplay(s) => match &s.runs[0] {
            vellum_model::Inline::Run(run) => {
                assert_eq!(run.flags.font.as_deref(), Some("Courier New"));
            }
            other => panic!("{other:?}"),
        },
        other => panic!("{other:?}"),
    }
}

#[test]
fn screenplay_kind_falls_back_to_action() {
    let html = "<div class=\"screenplay-block\">She walks away.</div>";
    let blocks = to_blocks(html);
    match callout(&blocks[0]) {
        CalloutBlock::Screenplay(s) => assert_eq!(s.kind, ScreenplayKind::Action),
        other => panic!("{other:?}"),
    }
}
