//! Client-side shopping cart state for the storefront.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It keeps the
//! cart's line items in browser storage, survives a disabled or full
//! `localStorage` by falling back to a per-tab slot, migrates records written
//! by older storefront scripts, and keeps every observer (the header badge,
//! page scripts, other open tabs) consistent after each change.
//!
//! Everything except [`web`] is plain Rust and runs natively, so the storage,
//! merge and notification rules are tested without a browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`cart`] | [`cart::CartStore`]: add/remove/update/clear, totals, cross-tab relay |
//! | [`dual_store`] | Primary/Secondary storage pair with read-repair |
//! | [`backend`] | [`backend::Backend`] trait, in-memory backend, errors |
//! | [`codec`] | JSON text codec and Secondary slot framing |
//! | [`normalize`] | Legacy/caller record migration into [`item::CartItem`] |
//! | [`item`] | Canonical item type, draft builder, totals |
//! | [`notifier`] | Observer list and change events |
//! | [`badge`] | Item-count badge synchronization |
//! | [`config`] | Storage key, slot prefix, event and DOM names |
//! | [`format`] | Spanish-locale price formatting |
//! | [`prefill`] | Product pre-fill from query parameters |
//! | [`color_preset`] | Garment color overlay presets |
//! | `web` | Browser backends, DOM wiring and the JS API (feature `browser`) |

pub mod backend;
pub mod badge;
pub mod cart;
pub mod codec;
pub mod color_preset;
pub mod config;
pub mod dual_store;
pub mod format;
pub mod item;
pub mod normalize;
pub mod notifier;
pub mod prefill;
#[cfg(feature = "browser")]
pub mod web;

#[cfg(test)]
mod test_support;

pub use cart::CartStore;
pub use item::{CartItem, ItemDraft};
