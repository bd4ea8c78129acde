use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::{FieldKind, format_rate};

/// Applies an editing key to a text buffer. Returns whether the buffer changed.
pub(crate) fn handle_text_edit(buffer: &mut String, kind: FieldKind, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Left => adjust_numeric_value(buffer, kind, -1),
        KeyCode::Right => adjust_numeric_value(buffer, kind, 1),
        KeyCode::Char(ch) => {
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                return false;
            }
            buffer.push(ch);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Delete => {
            if buffer.is_empty() {
                return false;
            }
            buffer.clear();
            true
        }
        _ => false,
    }
}

/// Toggles a boolean field with Space or the horizontal arrows.
pub(crate) fn handle_bool_edit(value: &mut bool, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
            *value = !*value;
            true
        }
        _ => false,
    }
}

fn adjust_numeric_value(buffer: &mut String, kind: FieldKind, step: i64) -> bool {
    match kind {
        FieldKind::Integer => {
            let current = buffer.trim().parse::<i64>().unwrap_or(0);
            *buffer = current.saturating_add(step).max(0).to_string();
            true
        }
        FieldKind::Number => {
            let current = buffer.trim().parse::<f64>().unwrap_or(0.0);
            let next = (current + step as f64).max(0.0);
            *buffer = format_rate(next);
            true
        }
        _ => false,
    }
}
