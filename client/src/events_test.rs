use super::*;

impl SurfaceEvent {
    fn from_type(event_type: &str) -> Option<Self> {
        SURFACE_EVENTS.iter().find(|(name, _, _)| *name == event_type).map(|(_, kind, _)| *kind)
    }
}

#[test]
fn mouse_events_classify() {
    assert_eq!(SurfaceEvent::from_type("mousedown"), Some(SurfaceEvent::Down));
    assert_eq!(SurfaceEvent::from_type("mousemove"), Some(SurfaceEvent::Move));
    assert_eq!(SurfaceEvent::from_type("mouseup"), Some(SurfaceEvent::Up));
    assert_eq!(SurfaceEvent::from_type("mouseleave"), Some(SurfaceEvent::Leave));
}

#[test]
fn touch_cancel_commits_like_touch_end() {
    assert_eq!(SurfaceEvent::from_type("touchcancel"), SurfaceEvent::from_type("touchend"));
    assert_eq!(SurfaceEvent::from_type("touchend"), Some(SurfaceEvent::Up));
}

#[test]
fn unbound_types_are_none() {
    assert_eq!(SurfaceEvent::from_type("click"), None);
    assert_eq!(SurfaceEvent::from_type("pointerdown"), None);
}

#[test]
fn only_touch_types_are_touch() {
    assert!(is_touch_type("touchstart"));
    assert!(is_touch_type("touchcancel"));
    assert!(!is_touch_type("mousedown"));
    assert!(!is_touch_type("wheel"));
}

#[test]
fn every_event_type_is_bound_once() {
    let mut names: Vec<_> = SURFACE_EVENTS.iter().map(|(name, _, _)| *name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), SURFACE_EVENTS.len());
}
