//! Central message type for the ftui Elm-style architecture.
//!
//! A single `Msg` enum captures user input, view transitions, and
//! system events so all state changes go through explicit `match` arms
//! in the model.
//!
//! When adding new variants:
//! - Prefer reusing existing navigation messages over key-specific variants
//! - Keep `From<ftui::Event>` mapping shallow (Event -> Msg::KeyPressed/Resized/etc.)
//! - Update `App::update` to handle the new transition explicitly

use ftui::{Event, KeyEvent};

/// Single message type used by the ftui model update loop.
#[derive(Debug, Clone)]
pub enum Msg {
    // Input messages
    KeyPressed(KeyEvent),
    Resized { width: u16, height: u16 },
    Tick,
    FocusChanged(bool),
    Noop,

    // Series cursor (hover analog)
    SeriesNext,
    SeriesPrev,
    SeriesHome,
    SeriesEnd,

    // View messages
    DrillDown,
    ResetView,
    ToggleHelp,

    // Theme messages
    SwitchTheme(String),

    // System messages
    Quit,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => Msg::KeyPressed(key),
            Event::Resize { width, height } => Msg::Resized { width, height },
            Event::Tick => Msg::Tick,
            Event::Focus(gained) => Msg::FocusChanged(gained),
            Event::Paste(_) => Msg::Noop,
            Event::Clipboard(_) => Msg::Noop,
            Event::Mouse(_) => Msg::Noop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftui::{KeyCode, Modifiers};

    #[test]
    fn key_event_maps_to_keypressed_msg() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('q')).with_modifiers(Modifiers::CTRL));
        let msg = Msg::from(event);
        let Msg::KeyPressed(key) = msg else {
            assert!(false, "expected Msg::KeyPressed");
            return;
        };

        assert!(matches!(key.code, KeyCode::Char('q')));
        assert!(key.modifiers.contains(Modifiers::CTRL));
    }

    #[test]
    fn resize_event_maps_to_resized_msg() {
        let msg = Msg::from(Event::Resize {
            width: 123,
            height: 45,
        });
        let Msg::Resized { width, height } = msg else {
            assert!(false, "expected Msg::Resized");
            return;
        };

        assert_eq!(width, 123);
        assert_eq!(height, 45);
    }

    #[test]
    fn mouse_event_maps_to_noop() {
        let msg = Msg::from(Event::Mouse(ftui::MouseEvent::new(
            ftui::MouseEventKind::Moved,
            1,
            2,
        )));
        assert!(matches!(msg, Msg::Noop));
    }
}
