//! `ratatui-combobox-core` is the headless half of a filterable, keyboard-navigable single-select
//! combobox.
//!
//! It owns no terminal and draws nothing. The rendered widget lives in the facade crate
//! `ratatui-combobox`; use this crate directly if you render the combobox yourself or mirror it
//! into another UI layer.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input and rendering from your app.
//! - No async runtime: every transition completes synchronously on the UI thread.
//! - One state record, one transition function: [`state::reduce`] maps a [`state::ComboEvent`]
//!   to a new [`state::ComboState`] plus [`state::Effect`]s, so behavior is testable without a
//!   terminal.
//! - Controlled value: the owner pushes its value in with [`state::ComboEvent::ExternalValue`]
//!   and only hears back about committed selections and clears.
//!
//! ## Entry points
//!
//! - [`option::Catalog`]: validated option list.
//! - [`filter::filter`]: case-insensitive substring filter.
//! - [`state::reduce`]: the state machine.
//! - [`navigator::ComboBindings`]: configurable navigation keys.
//! - [`outside::PointerHub`]: scoped outside-click detection.
//! - [`aria::project`]: display value and ARIA attributes.
pub mod error;
pub mod input;
pub mod keymap;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod option;
pub mod filter;
pub mod navigator;
pub mod config;
pub mod state;
pub mod text_input;
pub mod outside;
pub mod aria;

pub use error::ComboboxError;
