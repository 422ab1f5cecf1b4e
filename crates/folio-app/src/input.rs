//! Translation of egui input into coordination events

use egui::{Event, PointerButton, Pos2, Rect, TouchPhase};
use folio_core::{InputEvent, Point};

/// Map one egui event to a coordination input, if it is one
pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        // egui scroll deltas move content, so they point opposite to the wheel
        Event::Scroll(delta) => Some(InputEvent::Wheel {
            dx: -delta.x,
            dy: -delta.y,
        }),
        Event::Touch { phase, pos, .. } => {
            let point = Point::new(pos.x, pos.y);
            match phase {
                TouchPhase::Start => Some(InputEvent::TouchStart(point)),
                TouchPhase::End => Some(InputEvent::TouchEnd(point)),
                TouchPhase::Move | TouchPhase::Cancel => None,
            }
        }
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            ..
        } => {
            let point = Point::new(pos.x, pos.y);
            Some(if *pressed {
                InputEvent::PointerDown(point)
            } else {
                InputEvent::PointerUp(point)
            })
        }
        _ => None,
    }
}

/// Translate the events that belong to `area`. Pointer and touch events must
/// land inside it; scrolling counts when the pointer hovers it (or is unknown).
pub fn within(events: &[Event], area: Rect, hover: Option<Pos2>) -> Vec<InputEvent> {
    events
        .iter()
        .filter(|event| match event {
            Event::Scroll(_) => hover.map_or(true, |pos| area.contains(pos)),
            Event::Touch { pos, .. } | Event::PointerButton { pos, .. } => area.contains(*pos),
            _ => true,
        })
        .filter_map(translate)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2, Modifiers};

    #[test]
    fn test_scroll_down_is_positive_wheel() {
        let event = Event::Scroll(vec2(0.0, -48.0));
        assert_eq!(translate(&event), Some(InputEvent::Wheel { dx: -0.0, dy: 48.0 }));
    }

    #[test]
    fn test_primary_button_becomes_pointer() {
        let down = Event::PointerButton {
            pos: pos2(10.0, 20.0),
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(translate(&down), Some(InputEvent::PointerDown(Point::new(10.0, 20.0))));

        let secondary = Event::PointerButton {
            pos: pos2(10.0, 20.0),
            button: PointerButton::Secondary,
            pressed: false,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(translate(&secondary), None);
    }

    #[test]
    fn test_events_outside_area_dropped() {
        let area = Rect::from_min_max(pos2(0.0, 40.0), pos2(800.0, 600.0));
        let press = |y: f32| Event::PointerButton {
            pos: pos2(100.0, y),
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        };
        let events = vec![press(10.0), press(300.0), Event::Scroll(vec2(0.0, -48.0))];

        assert_eq!(
            within(&events, area, Some(pos2(100.0, 300.0))),
            vec![
                InputEvent::PointerDown(Point::new(100.0, 300.0)),
                InputEvent::Wheel { dx: -0.0, dy: 48.0 }
            ]
        );
        // Wheel over the top bar
        assert_eq!(
            within(&events, area, Some(pos2(100.0, 10.0))),
            vec![InputEvent::PointerDown(Point::new(100.0, 300.0))]
        );
        assert_eq!(within(&events[2..], area, None).len(), 1);
    }

    #[test]
    fn test_other_events_ignored() {
        assert_eq!(translate(&Event::Text("k".to_string())), None);
    }
}
