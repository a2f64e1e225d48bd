// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end sessions checked against the map's observable flags.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Vec2;

use carousel_core::config::CarouselConfig;
use carousel_core::controller::CarouselEvent;
use carousel_core::layer::{LayerKey, LayerSet};
use carousel_core::preview::PreviewState;
use carousel_core::trace::Tracer;

use crate::Session;

const POLICIES: [CarouselConfig; 2] = [CarouselConfig::new(), CarouselConfig::compat()];

fn two_layers() -> LayerSet {
    let mut set = LayerSet::new();
    set.push_layer("1", true);
    set.push_layer("2", false);
    set
}

fn with_group() -> LayerSet {
    let mut set = LayerSet::new();
    set.push_layer("1", true);
    let g = set.push_group("g", false);
    set.push_child(g, "g1", false);
    set.push_child(g, "g2", false);
    set
}

fn keys(ids: &[&str]) -> Vec<LayerKey> {
    ids.iter().copied().map(LayerKey::new).collect()
}

#[test]
fn scenario_a_hover_then_leave_restores() {
    for config in POLICIES {
        let t = &mut Tracer::none();
        let mut s = Session::new(two_layers(), config.clone());

        let _ = s.hover("2", t);
        assert_eq!(s.visible(), vec![false, true]);
        let _ = s.leave(t);
        assert_eq!(s.visible(), vec![true, false], "{config:?}");
        assert!(s.selections().is_empty());
    }
}

#[test]
fn scenario_b_quick_click_commits_once() {
    for config in POLICIES {
        let t = &mut Tracer::none();
        let mut s = Session::new(two_layers(), config.clone());

        let _ = s.hover("2", t);
        let r = s.click("2", 120, t);
        assert_eq!(r.selected, Some(LayerKey::new("2")));
        assert_eq!(s.visible(), vec![false, true]);
        assert_eq!(s.selections(), keys(&["2"]), "{config:?}");
    }
}

#[test]
fn scenario_c_slow_click_is_ignored() {
    for config in POLICIES {
        let t = &mut Tracer::none();
        let mut s = Session::new(two_layers(), config.clone());
        let writes = s.map().write_count();

        let r = s.click("2", 250, t);
        assert_eq!(r.selected, None);
        assert_eq!(s.visible(), vec![true, false]);
        assert!(s.selections().is_empty());
        assert_eq!(s.map().write_count(), writes, "no flag touched");
    }
}

#[test]
fn scenario_d_group_hover_expands_members() {
    let t = &mut Tracer::none();
    let mut s = Session::new(with_group(), CarouselConfig::new());

    let _ = s.hover("g", t);
    assert_eq!(s.visible_keys(), keys(&["g", "g1", "g2"]));

    let _ = s.leave(t);
    assert_eq!(s.visible_keys(), keys(&["1"]));
}

#[test]
fn scenario_e_locked_commit_survives_leave() {
    let t = &mut Tracer::none();
    let mut s = Session::new(two_layers(), CarouselConfig::new());

    let _ = s.hover("2", t);
    let _ = s.click("2", 80, t);
    let _ = s.leave(t);
    assert_eq!(s.visible(), vec![false, true]);

    // Same without the hover: the click still sticks.
    let mut s = Session::new(two_layers(), CarouselConfig::new());
    let _ = s.click("2", 80, t);
    let _ = s.leave(t);
    assert_eq!(s.visible(), vec![false, true]);
    assert_eq!(s.selections(), keys(&["2"]));
}

#[test]
fn scenario_e_compat_leave_reverts_unhovered_click() {
    let t = &mut Tracer::none();
    let mut s = Session::new(two_layers(), CarouselConfig::compat());

    let _ = s.click("2", 80, t);
    assert_eq!(s.visible(), vec![false, true]);
    let _ = s.leave(t);
    assert_eq!(s.visible(), vec![true, false], "leave undoes the commit");
    assert_eq!(s.selections(), keys(&["2"]), "callback still fired");
}

#[test]
fn scenario_e_compat_hovered_click_is_kept() {
    let t = &mut Tracer::none();
    let mut s = Session::new(two_layers(), CarouselConfig::compat());

    let _ = s.hover("2", t);
    let _ = s.click("2", 80, t);
    let _ = s.leave(t);
    assert_eq!(s.visible(), vec![false, true]);
}

#[test]
fn threshold_is_inclusive_of_180ms() {
    let t = &mut Tracer::none();
    let mut s = Session::new(two_layers(), CarouselConfig::new());
    let r = s.click("2", 180, t);
    assert_eq!(r.selected, Some(LayerKey::new("2")));

    let mut s = Session::new(two_layers(), CarouselConfig::new());
    let r = s.click("2", 181, t);
    assert_eq!(r.selected, None);
}

#[test]
fn callback_fires_once_per_accepted_click() {
    let t = &mut Tracer::none();
    let mut s = Session::new(two_layers(), CarouselConfig::new());
    let _ = s.click("2", 50, t);
    let _ = s.click("1", 300, t);
    let _ = s.click("1", 10, t);
    let _ = s.click("2", 180, t);
    assert_eq!(s.selections(), keys(&["2", "1", "2"]));
}

#[test]
fn hover_round_trip_for_every_start_state() {
    for n in 1_usize..=5 {
        // `None` is the all-hidden start state.
        let starts = (0..n).map(Some).chain([None]);
        for start in starts {
            let mut set = LayerSet::new();
            let ids: Vec<String> = (0..n).map(|i| alloc::format!("l{i}")).collect();
            for (i, id) in ids.iter().enumerate() {
                set.push_layer(id.as_str(), start == Some(i));
            }
            let t = &mut Tracer::none();
            let mut s = Session::new(set, CarouselConfig::new());
            let before = s.visible();
            for id in &ids {
                let _ = s.hover(id, t);
                let _ = s.leave(t);
                assert_eq!(s.visible(), before, "n={n} start={start:?} hover={id}");
            }
        }
    }
}

#[test]
fn preview_shows_exactly_one_offered_layer() {
    let t = &mut Tracer::none();
    let mut s = Session::new(with_group(), CarouselConfig::new());

    let _ = s.hover("1", t);
    assert_eq!(s.visible(), vec![true, false]);
    assert_eq!(s.visible_keys(), keys(&["1"]), "members follow the group");

    let _ = s.hover("g", t);
    assert_eq!(s.visible(), vec![false, true]);
    assert_eq!(s.visible_keys(), keys(&["g", "g1", "g2"]));
}

#[test]
fn repeated_hover_writes_nothing() {
    let t = &mut Tracer::none();
    let mut s = Session::new(two_layers(), CarouselConfig::new());
    let _ = s.hover("2", t);
    let applies = s.map().apply_count();
    let _ = s.hover("2", t);
    assert_eq!(s.map().apply_count(), applies);
    assert_eq!(s.visible(), vec![false, true]);
}

#[test]
fn drag_during_hover_leaves_preview_intact() {
    let t = &mut Tracer::none();
    let mut s = Session::new(two_layers(), CarouselConfig::new());
    let _ = s.hover("2", t);
    let r = s.click("2", 400, t);
    assert_eq!(r.selected, None);
    assert_eq!(
        s.carousel().preview_state(),
        &PreviewState::Previewing {
            snapshot: Some(LayerKey::new("1"))
        }
    );
    let _ = s.leave(t);
    assert_eq!(s.visible(), vec![true, false]);
}

#[test]
fn map_moves_rerender_without_touching_selection() {
    let t = &mut Tracer::none();
    let mut s = Session::new(two_layers(), CarouselConfig::new());
    let _ = s.hover("2", t);
    let state = s.carousel().preview_state().clone();
    let extent = s.thumbnails()[0].extent;

    let r = s.pan(Vec2::new(500.0, 0.0), t);
    assert!(r.rerender);
    assert_eq!(s.rerenders(), 1);
    assert_eq!(s.carousel().preview_state(), &state);
    assert_eq!(s.visible(), vec![false, true]);
    assert_eq!(s.thumbnails()[0].extent, extent + Vec2::new(500.0, 0.0));

    // Several changes between polls are one move.
    s.map_mut().zoom(2.0);
    s.map_mut().zoom(2.0);
    let _ = s.poll_view(t);
    let _ = s.poll_view(t);
    assert_eq!(s.rerenders(), 2);
}

#[test]
fn unresolved_targets_are_ignored() {
    let t = &mut Tracer::none();
    let mut s = Session::new(two_layers(), CarouselConfig::new());
    let _ = s.hover("missing", t);
    assert_eq!(s.carousel().preview_state(), &PreviewState::Idle);
    let r = s.dispatch(CarouselEvent::ThumbnailClick(None), t);
    assert_eq!(r.selected, None);
    assert_eq!(s.visible(), vec![true, false]);
}

#[test]
fn restore_to_nothing_hides_everything() {
    let mut set = LayerSet::new();
    set.push_layer("1", false);
    set.push_layer("2", false);
    let t = &mut Tracer::none();
    let mut s = Session::new(set, CarouselConfig::new());
    let _ = s.hover("2", t);
    let _ = s.leave(t);
    assert!(s.visible_keys().is_empty());
}

#[test]
fn unpaired_release_reads_as_drag() {
    let t = &mut Tracer::none();
    let mut s = Session::new(two_layers(), CarouselConfig::new());
    let _ = s.dispatch(CarouselEvent::PressEnd, t);
    let r = s.dispatch(
        CarouselEvent::ThumbnailClick(Some(LayerKey::new("2"))),
        t,
    );
    assert_eq!(r.selected, None);
}

#[test]
fn container_click_skips_group_expansion() {
    let t = &mut Tracer::none();
    let mut s = Session::new(with_group(), CarouselConfig::new());
    let g = s.carousel().layers().find("g").unwrap();

    let r = s.click_container(g, 40, t);
    assert!(r.rerender);
    assert!(s.selections().is_empty(), "container path reports nothing");
    assert_eq!(s.visible_keys(), keys(&["g"]));
}
