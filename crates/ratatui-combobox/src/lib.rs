//! `ratatui-combobox` is a filterable, keyboard-navigable single-select combobox for ratatui.
//!
//! The state machine, filter and accessibility projection live in `ratatui-combobox-core` and
//! are re-exported here as [`core`]. This crate adds the mounted widget ([`combobox::Combobox`]),
//! its rendering, and a thin form-field adapter ([`field::FormField`]).
//!
//! Enable the `crossterm` feature for `core::crossterm_input`.
pub use ratatui_combobox_core as core;
pub use ratatui_combobox_core::ComboboxError;
pub use ratatui_combobox_core::config::ComboboxOptions;
pub use ratatui_combobox_core::option::Catalog;
pub use ratatui_combobox_core::option::ComboOption;
pub use ratatui_combobox_core::outside::PointerHub;

pub mod theme;

pub mod render;
pub mod viewport;

pub mod combobox;
pub mod field;
pub mod help;
