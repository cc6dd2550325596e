use std::rc::Rc;

use transcroll_core::{
    Animator, Axis, ScrollError, ScrollOptions, ScrollSurface, ScrollTarget,
};
use transcroll_test_fixtures::{layouts, FakeScheduler, FakeSurface};

fn animator_for(name: &str) -> Animator<FakeSurface, FakeScheduler> {
    let layout = layouts::load(name).expect("layout fixture");
    Animator::new(
        Rc::new(FakeSurface::from_layout(&layout)),
        Rc::new(FakeScheduler::new()),
    )
}

#[test]
fn numeric_targets_clamp_into_range_plus_offset() {
    let animator = animator_for("viewport_page");
    let max = animator.surface().max_position(Axis::Y);
    assert_eq!(max, 2400.0);

    for target in [-500.0, 0.0, 123.5, 2399.0, 2400.0, 10_000.0] {
        for offset in [0.0, -40.0, 75.0] {
            let opts = ScrollOptions::default().with_offset(offset);
            let resolved = animator
                .resolve_target(&ScrollTarget::Position(target), &opts)
                .unwrap();
            let base = resolved - offset;
            assert!(
                (0.0..=max).contains(&base),
                "target {target} offset {offset} resolved to {resolved}"
            );
            assert_eq!(base, target.clamp(0.0, max));
        }
    }
}

#[test]
fn negative_scroll_range_resolves_to_zero() {
    let animator = animator_for("short_page");
    let resolved = animator
        .resolve_target(&ScrollTarget::from("#note"), &ScrollOptions::default())
        .unwrap();
    assert_eq!(resolved, 0.0);
}

#[test]
fn selector_and_element_targets_agree() {
    let animator = animator_for("viewport_page");
    let opts = ScrollOptions::default();
    let by_selector = animator
        .resolve_target(&ScrollTarget::from("#intro"), &opts)
        .unwrap();
    let by_element = animator
        .resolve_target(&ScrollTarget::Element("intro".to_string()), &opts)
        .unwrap();
    assert_eq!(by_selector, 200.0);
    assert_eq!(by_selector, by_element);
}

#[test]
fn first_matching_node_wins() {
    let animator = animator_for("viewport_page");
    // ".section" is declared only on #intro; "main" resolves to the main node.
    let opts = ScrollOptions::default();
    assert_eq!(
        animator
            .resolve_target(&ScrollTarget::from(".section"), &opts)
            .unwrap(),
        200.0
    );
    assert_eq!(
        animator
            .resolve_target(&ScrollTarget::from("main"), &opts)
            .unwrap(),
        120.0
    );
}

#[test]
fn element_beyond_scroll_range_clamps() {
    let animator = animator_for("viewport_page");
    let resolved = animator
        .resolve_target(&ScrollTarget::from("#footer"), &ScrollOptions::default())
        .unwrap();
    assert_eq!(resolved, 2400.0);
}

#[test]
fn container_offset_is_subtracted() {
    let animator = animator_for("scroll_panel");
    assert_eq!(animator.surface().container_offset(Axis::Y), 300.0);
    let opts = ScrollOptions::default();
    let item = animator
        .resolve_target(&ScrollTarget::from("#item-9"), &opts)
        .unwrap();
    // 840 + 40 + 300 - 300 = 880, clamped to the panel max of 600
    assert_eq!(item, 600.0);
}

#[test]
fn selectors_outside_the_container_are_not_found() {
    let animator = animator_for("scroll_panel");
    let err = animator
        .resolve_target(&ScrollTarget::from("#sidebar"), &ScrollOptions::default())
        .unwrap_err();
    assert_eq!(err.category(), "data");
}

#[test]
fn malformed_selector_is_invalid_target() {
    let animator = animator_for("viewport_page");
    let err = animator
        .resolve_target(&ScrollTarget::from(""), &ScrollOptions::default())
        .unwrap_err();
    assert!(matches!(err, ScrollError::InvalidTarget { .. }));
}
