mod console;
mod dispatch;
pub(crate) mod keymap;
mod options;
mod popup;
mod runtime;
mod status;
mod terminal;
mod toast;

pub use console::FleetConsole;
pub use keymap::{KeyAction, KeymapContext, KeymapStore};
pub use options::{ConsoleMode, UiOptions};
pub use toast::{Mutation, Toast, ToastLevel};

#[cfg(test)]
pub(crate) use runtime::App;
