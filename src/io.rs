use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

use crate::events::AppEvent;
use crate::events::EngineEvent;
use crate::events::Event;

/// Converts a crossterm event into an automaton event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,
        CrossTermEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::AppEvent(AppEvent::Exit)),
            KeyEvent {
                code: KeyCode::Char(' '),
                ..
            } => Some(Event::EngineEvent(EngineEvent::TogglePause)),
            KeyEvent {
                code: KeyCode::Char('n'),
                ..
            } => Some(Event::EngineEvent(EngineEvent::Step)),
            _ => None,
        },
        CrossTermEvent::Resize(cols, rows) => Some(Event::AppEvent(AppEvent::Resize { cols, rows })),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyModifiers;

    use super::convert_event;
    use crate::events::AppEvent;
    use crate::events::EngineEvent;
    use crate::events::Event;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn quit_keys() {
        for ev in [
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert!(matches!(
                convert_event(ev),
                Some(Event::AppEvent(AppEvent::Exit))
            ));
        }
    }

    #[test]
    fn plain_c_is_ignored() {
        assert!(convert_event(key(KeyCode::Char('c'), KeyModifiers::NONE)).is_none());
    }

    #[test]
    fn pause_and_step() {
        assert!(matches!(
            convert_event(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Event::EngineEvent(EngineEvent::TogglePause))
        ));
        assert!(matches!(
            convert_event(key(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(Event::EngineEvent(EngineEvent::Step))
        ));
    }

    #[test]
    fn resize() {
        assert!(matches!(
            convert_event(CrossTermEvent::Resize(80, 24)),
            Some(Event::AppEvent(AppEvent::Resize { cols: 80, rows: 24 }))
        ));
    }
}
