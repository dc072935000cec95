//! Tests for controller edge detection and direction mapping.

use gs_cube_core::input::{
    edge, from_active_low, Direction, PadEdges, PadState, PAD_CROSS, PAD_DOWN, PAD_LEFT, PAD_RIGHT,
    PAD_UP,
};

/// Encode active-high buttons the way the pad reports them.
fn raw(buttons: u16) -> Option<u16> {
    Some(!buttons)
}

#[test]
fn edge_reports_new_presses_only() {
    assert_eq!(edge(0b0000, 0b0101), 0b0101);
    assert_eq!(edge(0b0101, 0b0101), 0);
    assert_eq!(edge(0b0101, 0b0111), 0b0010);
    assert_eq!(edge(0b0111, 0b0000), 0);
}

#[test]
fn active_low_conversion() {
    assert_eq!(from_active_low(0xFFFF), 0);
    assert_eq!(from_active_low(!PAD_LEFT), PAD_LEFT);
}

#[test]
fn held_button_fires_once() {
    let mut pad = PadState::new();
    assert_eq!(pad.poll(raw(PAD_LEFT)), PadEdges(PAD_LEFT));
    assert!(pad.poll(raw(PAD_LEFT)).is_empty());
    assert!(pad.poll(raw(PAD_LEFT)).is_empty());

    // Release and press again.
    assert!(pad.poll(raw(0)).is_empty());
    assert_eq!(pad.poll(raw(PAD_LEFT)), PadEdges(PAD_LEFT));
}

#[test]
fn previous_tracks_last_poll() {
    let mut pad = PadState::new();
    pad.update(0b0101);
    assert_eq!(pad.previous(), 0b0101);
    assert_eq!(pad.update(0b0111), PadEdges(0b0010));
    assert_eq!(pad.previous(), 0b0111);
}

#[test]
fn disconnect_yields_nothing_and_forgets_held_buttons() {
    let mut pad = PadState::new();
    pad.poll(raw(PAD_UP));

    assert!(pad.poll(None).is_empty());
    assert!(!pad.is_connected());
    assert_eq!(pad.previous(), 0);

    // Still held on reconnect: counts as a fresh press.
    assert_eq!(pad.poll(raw(PAD_UP)), PadEdges(PAD_UP));
    assert!(pad.is_connected());
}

#[test]
fn directions_ignore_other_buttons() {
    let edges = PadEdges(PAD_CROSS | PAD_RIGHT | PAD_DOWN);
    let dirs: Vec<Direction> = edges.directions().collect();
    assert_eq!(dirs, vec![Direction::Down, Direction::Right]);

    assert_eq!(PadEdges(PAD_CROSS).directions().count(), 0);
}

#[test]
fn every_direction_has_its_own_button() {
    let all = PAD_LEFT | PAD_RIGHT | PAD_UP | PAD_DOWN;
    let dirs: Vec<Direction> = PadEdges(all).directions().collect();
    assert_eq!(dirs.len(), 4);
    for dir in Direction::ALL {
        assert_eq!(dir.button().count_ones(), 1);
        assert!(dirs.contains(&dir));
    }
}
