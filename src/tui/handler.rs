//! Event handler for the TUI
//!
//! Routes keyboard events to the keypad or the label picker depending on
//! which screen is showing.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::calculator::Operator;

use super::app::{App, BackspaceMode, PickerFocus, Screen};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    let now = Instant::now();
    match event {
        Event::Key(key) => handle_key_event(app, key, now),
        Event::Tick => {
            app.poll_long_press(now);
            app.sync_changes()?;
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event at time `now`
pub fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) -> Result<()> {
    if key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && key.code == KeyCode::Char('c')
    {
        app.quit();
        return Ok(());
    }

    match app.screen {
        Screen::Keypad => handle_keypad_key(app, key, now),
        Screen::LabelPicker => handle_picker_key(app, key),
    }
    Ok(())
}

fn handle_keypad_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.code == KeyCode::Backspace && app.backspace_mode == BackspaceMode::LongPress {
        match key.kind {
            KeyEventKind::Press => app.long_press.press(now),
            KeyEventKind::Repeat => {}
            KeyEventKind::Release => {
                if let Some(action) = app.long_press.release(now) {
                    app.apply_press(action);
                }
            }
        }
        return;
    }

    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char(c @ '0'..='9') => {
            app.clear_status();
            app.calculator.digit(c as u8 - b'0');
        }
        KeyCode::Char('.') | KeyCode::Char(',') => app.calculator.decimal_point(),
        KeyCode::Char('+') => app.calculator.operator(Operator::Add),
        KeyCode::Char('-') => app.calculator.operator(Operator::Subtract),
        KeyCode::Char('=') => app.calculator.equals(),
        KeyCode::Enter => app.confirm_amount(),
        KeyCode::Backspace => app.calculator.backspace(),
        KeyCode::Delete | KeyCode::Char('c') | KeyCode::Char('C') => app.calculator.clear(),
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        _ => {}
    }
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.picker_focus {
        PickerFocus::List => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous_label(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_label(),
            KeyCode::Enter => {
                if let Err(e) = app.commit_selected_label() {
                    app.set_status(e.to_string());
                }
            }
            KeyCode::Tab | KeyCode::Char('/') => app.picker_focus = PickerFocus::CustomLabel,
            KeyCode::Esc | KeyCode::Backspace => app.back_to_keypad(),
            _ => {}
        },
        PickerFocus::CustomLabel => match key.code {
            KeyCode::Enter => {
                if let Err(e) = app.commit_custom_label() {
                    app.set_status(e.to_string());
                }
            }
            KeyCode::Tab | KeyCode::Esc => app.picker_focus = PickerFocus::List,
            KeyCode::Backspace => app.custom_label.backspace(),
            KeyCode::Delete => app.custom_label.delete(),
            KeyCode::Left => app.custom_label.move_left(),
            KeyCode::Right => app.custom_label.move_right(),
            KeyCode::Char(c) => app.custom_label.insert(c),
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::LongPress;
    use crate::config::paths::PennywisePaths;
    use crate::models::{Money, UserId};
    use crate::storage::Storage;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PennywisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &UserId::parse("tester").unwrap()).unwrap();
        storage.initialize().unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn type_str(app: &mut App, keys: &str, now: Instant) {
        for c in keys.chars() {
            handle_key_event(app, press(KeyCode::Char(c)), now).unwrap();
        }
    }

    #[test]
    fn test_keypad_arithmetic() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage, LongPress::default(), BackspaceMode::ShortPress).unwrap();
        let now = Instant::now();

        type_str(&mut app, "12+5", now);
        handle_key_event(&mut app, press(KeyCode::Enter), now).unwrap();
        assert_eq!(app.calculator.display(), "17");
        assert_eq!(app.screen, Screen::Keypad);

        handle_key_event(&mut app, press(KeyCode::Enter), now).unwrap();
        assert_eq!(app.screen, Screen::LabelPicker);
        assert_eq!(app.pending_amount, Some(Money::from_cents(1700)));
    }

    #[test]
    fn test_short_press_mode() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage, LongPress::default(), BackspaceMode::ShortPress).unwrap();
        let now = Instant::now();

        type_str(&mut app, "123", now);
        handle_key_event(&mut app, press(KeyCode::Backspace), now).unwrap();
        assert_eq!(app.calculator.display(), "12");

        handle_key_event(&mut app, press(KeyCode::Delete), now).unwrap();
        assert_eq!(app.calculator.display(), "0");
    }

    #[test]
    fn test_long_press_mode() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage, LongPress::from_millis(500), BackspaceMode::LongPress)
            .unwrap();
        let start = Instant::now();

        type_str(&mut app, "123", start);

        // quick tap removes one digit on release
        handle_key_event(&mut app, press(KeyCode::Backspace), start).unwrap();
        assert_eq!(app.calculator.display(), "123");
        handle_key_event(
            &mut app,
            release(KeyCode::Backspace),
            start + Duration::from_millis(100),
        )
        .unwrap();
        assert_eq!(app.calculator.display(), "12");

        // holding past the threshold clears on the next tick
        let held = start + Duration::from_millis(200);
        handle_key_event(&mut app, press(KeyCode::Backspace), held).unwrap();
        app.poll_long_press(held + Duration::from_millis(600));
        assert_eq!(app.calculator.display(), "0");

        handle_key_event(
            &mut app,
            release(KeyCode::Backspace),
            held + Duration::from_millis(700),
        )
        .unwrap();
        assert_eq!(app.calculator.display(), "0");
    }

    #[test]
    fn test_picker_flow() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage, LongPress::default(), BackspaceMode::ShortPress).unwrap();
        let now = Instant::now();

        type_str(&mut app, "4", now);
        handle_key_event(&mut app, press(KeyCode::Enter), now).unwrap();

        // Esc goes back to the keypad with the amount intact
        handle_key_event(&mut app, press(KeyCode::Esc), now).unwrap();
        assert_eq!(app.screen, Screen::Keypad);
        assert_eq!(app.calculator.display(), "4");

        handle_key_event(&mut app, press(KeyCode::Enter), now).unwrap();
        handle_key_event(&mut app, press(KeyCode::Down), now).unwrap();
        handle_key_event(&mut app, press(KeyCode::Down), now).unwrap();
        handle_key_event(&mut app, press(KeyCode::Enter), now).unwrap();

        let txns = storage.transactions.get_all().unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].label, "Shopping");
        assert_eq!(txns[0].amount, Money::from_cents(400));
    }

    #[test]
    fn test_custom_label_typing() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage, LongPress::default(), BackspaceMode::ShortPress).unwrap();
        let now = Instant::now();

        type_str(&mut app, "3", now);
        handle_key_event(&mut app, press(KeyCode::Enter), now).unwrap();
        handle_key_event(&mut app, press(KeyCode::Tab), now).unwrap();
        assert_eq!(app.picker_focus, PickerFocus::CustomLabel);

        // letters that are keypad shortcuts are plain text here
        type_str(&mut app, "qc", now);
        assert_eq!(app.custom_label.value(), "qc");
        assert!(!app.should_quit);

        handle_key_event(&mut app, press(KeyCode::Enter), now).unwrap();
        let txns = storage.transactions.get_all().unwrap();
        assert_eq!(txns[0].label, "qc");
    }

    #[test]
    fn test_quit_keys() {
        let (_temp_dir, storage) = create_test_storage();
        let mut app = App::new(&storage, LongPress::default(), BackspaceMode::ShortPress).unwrap();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        )
        .unwrap();
        assert!(app.should_quit);
    }
}
