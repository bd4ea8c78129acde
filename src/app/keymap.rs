use std::sync::{Arc, LazyLock};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

macro_rules! keymap_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/keymap/default.keymap.json"
        ))
    };
}

/// Which surface currently owns the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeymapContext {
    List,
    Form,
    Confirm,
}

impl KeymapContext {
    fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "list" => Some(KeymapContext::List),
            "form" => Some(KeymapContext::Form),
            "confirm" => Some(KeymapContext::Confirm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Refresh,
    AddCar,
    EditCar,
    DeleteCar,
    CycleFilter,
    ToggleView,
    SelectStep(i32),
    FieldStep(i32),
    Submit,
    Cancel,
    Confirm,
}

impl KeyAction {
    /// Actions that open a mutation workflow; unavailable on the public listing.
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            KeyAction::AddCar | KeyAction::EditCar | KeyAction::DeleteCar
        )
    }
}

#[derive(Deserialize)]
struct RawEntry {
    id: String,
    description: String,
    contexts: Vec<String>,
    action: RawAction,
    combos: Vec<String>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawAction {
    Quit,
    Refresh,
    AddCar,
    EditCar,
    DeleteCar,
    CycleFilter,
    ToggleView,
    SelectStep { delta: i32 },
    FieldStep { delta: i32 },
    Submit,
    Cancel,
    Confirm,
}

impl RawAction {
    fn into_action(self) -> KeyAction {
        match self {
            RawAction::Quit => KeyAction::Quit,
            RawAction::Refresh => KeyAction::Refresh,
            RawAction::AddCar => KeyAction::AddCar,
            RawAction::EditCar => KeyAction::EditCar,
            RawAction::DeleteCar => KeyAction::DeleteCar,
            RawAction::CycleFilter => KeyAction::CycleFilter,
            RawAction::ToggleView => KeyAction::ToggleView,
            RawAction::SelectStep { delta } => KeyAction::SelectStep(delta),
            RawAction::FieldStep { delta } => KeyAction::FieldStep(delta),
            RawAction::Submit => KeyAction::Submit,
            RawAction::Cancel => KeyAction::Cancel,
            RawAction::Confirm => KeyAction::Confirm,
        }
    }
}

#[derive(Debug)]
struct KeyBinding {
    action: KeyAction,
    contexts: Vec<KeymapContext>,
    combos: Vec<KeyPattern>,
    snippet: String,
}

impl KeyBinding {
    fn from_raw(raw: RawEntry) -> Result<Self, String> {
        let contexts = raw
            .contexts
            .iter()
            .map(|ctx| {
                KeymapContext::from_str(ctx)
                    .ok_or_else(|| format!("unknown context '{ctx}' in {}", raw.id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if contexts.is_empty() {
            return Err(format!(
                "keymap entry {} must declare at least one context",
                raw.id
            ));
        }
        let combos = raw
            .combos
            .iter()
            .map(|combo| {
                KeyPattern::parse(combo)
                    .map_err(|err| format!("failed to parse combo '{combo}' for {}: {err}", raw.id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if combos.is_empty() {
            return Err(format!("keymap entry {} must declare combos", raw.id));
        }
        let combos_display = combos
            .iter()
            .map(|pattern| pattern.display.as_str())
            .collect::<Vec<_>>()
            .join("/");
        Ok(Self {
            action: raw.action.into_action(),
            contexts,
            combos,
            snippet: format!("{combos_display} -> {}", raw.description),
        })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        self.combos.iter().any(|pattern| pattern.matches(key))
    }
}

#[derive(Debug)]
struct KeyPattern {
    matcher: CodeMatcher,
    required: KeyModifiers,
    allow_shift: bool,
    display: String,
}

impl KeyPattern {
    fn parse(spec: &str) -> Result<Self, String> {
        let display = spec.trim().to_string();
        if display.is_empty() {
            return Err("combo cannot be empty".into());
        }
        let mut tokens = display
            .split('+')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>();
        let Some(key_token) = tokens.pop() else {
            return Err("combo must contain key".into());
        };
        let matcher = CodeMatcher::from_token(key_token)?;
        let mut required = KeyModifiers::empty();
        for token in tokens {
            match token.to_lowercase().as_str() {
                "ctrl" | "control" => required |= KeyModifiers::CONTROL,
                "shift" => required |= KeyModifiers::SHIFT,
                "alt" => required |= KeyModifiers::ALT,
                other => return Err(format!("unsupported modifier '{other}'")),
            }
        }
        let allow_shift = matcher.allows_extra_shift() && !required.contains(KeyModifiers::SHIFT);
        Ok(Self {
            matcher,
            required,
            allow_shift,
            display,
        })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        if !self.matcher.matches(&key.code) {
            return false;
        }
        if !key.modifiers.contains(self.required) {
            return false;
        }
        let extra = key.modifiers - self.required;
        if self.allow_shift {
            (extra - KeyModifiers::SHIFT).is_empty()
        } else {
            extra.is_empty()
        }
    }
}

#[derive(Debug, Clone)]
enum CodeMatcher {
    Literal(KeyCode),
    Alpha(char),
}

impl CodeMatcher {
    fn from_token(token: &str) -> Result<Self, String> {
        let normalized = token.to_lowercase();
        let matcher = match normalized.as_str() {
            "tab" => CodeMatcher::Literal(KeyCode::Tab),
            "backtab" => CodeMatcher::Literal(KeyCode::BackTab),
            "enter" => CodeMatcher::Literal(KeyCode::Enter),
            "esc" | "escape" => CodeMatcher::Literal(KeyCode::Esc),
            "space" => CodeMatcher::Literal(KeyCode::Char(' ')),
            "delete" | "del" => CodeMatcher::Literal(KeyCode::Delete),
            "backspace" => CodeMatcher::Literal(KeyCode::Backspace),
            "left" => CodeMatcher::Literal(KeyCode::Left),
            "right" => CodeMatcher::Literal(KeyCode::Right),
            "up" => CodeMatcher::Literal(KeyCode::Up),
            "down" => CodeMatcher::Literal(KeyCode::Down),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => CodeMatcher::Alpha(ch),
                    _ => return Err(format!("unsupported key '{token}'")),
                }
            }
        };
        Ok(matcher)
    }

    fn matches(&self, code: &KeyCode) -> bool {
        match (self, code) {
            (CodeMatcher::Literal(expected), actual) => actual == expected,
            (CodeMatcher::Alpha(expected), KeyCode::Char(actual)) => {
                actual.to_ascii_lowercase() == *expected
            }
            _ => false,
        }
    }

    fn allows_extra_shift(&self) -> bool {
        matches!(
            self,
            CodeMatcher::Alpha(_) | CodeMatcher::Literal(KeyCode::BackTab)
        )
    }
}

/// Parsed key bindings, resolved per context.
#[derive(Debug)]
pub struct KeymapStore {
    bindings: Vec<KeyBinding>,
}

impl KeymapStore {
    pub fn from_json(source: &str) -> Result<Self, String> {
        let raw_entries: Vec<RawEntry> =
            serde_json::from_str(source).map_err(|err| format!("invalid keymap: {err}"))?;
        let bindings = raw_entries
            .into_iter()
            .map(KeyBinding::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bindings })
    }

    /// First binding in `context` matching `key`. Mutation actions resolve only
    /// when `allow_mutations` is set.
    pub fn classify(
        &self,
        context: KeymapContext,
        key: &KeyEvent,
        allow_mutations: bool,
    ) -> Option<KeyAction> {
        self.bindings
            .iter()
            .filter(|binding| binding.contexts.contains(&context))
            .filter(|binding| allow_mutations || !binding.action.is_mutation())
            .find(|binding| binding.matches(key))
            .map(|binding| binding.action)
    }

    pub fn help_text(&self, context: KeymapContext, allow_mutations: bool) -> Option<String> {
        let snippets = self
            .bindings
            .iter()
            .filter(|binding| binding.contexts.contains(&context))
            .filter(|binding| allow_mutations || !binding.action.is_mutation())
            .map(|binding| binding.snippet.as_str())
            .collect::<Vec<_>>();
        if snippets.is_empty() {
            None
        } else {
            Some(snippets.join(" • "))
        }
    }
}

static DEFAULT_STORE: LazyLock<Arc<KeymapStore>> = LazyLock::new(|| {
    Arc::new(
        KeymapStore::from_json(keymap_source!())
            .unwrap_or_else(|err| panic!("invalid keymap/default.keymap.json: {err}")),
    )
});

pub fn default_store() -> Arc<KeymapStore> {
    Arc::clone(&DEFAULT_STORE)
}
