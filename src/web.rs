//! Browser binding: web-sys backends, DOM badge and the `CartManager` JS API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything that touches `window` lives here so the rest of the crate stays
//! testable natively. Primary is `localStorage`, Secondary is `window.name`
//! framed with the configured prefix. Page scripts talk to the cart through
//! `window.cartManager`, installed by [`install_cart_manager`], and observe it
//! either through `cartManager.addListener(cb)` or the window-level change
//! event (`cart:change` by default, `detail = { items }`).
//!
//! TRADE-OFFS
//! ==========
//! Storage handles are looked up on every call instead of cached, so a
//! storage area that becomes available (or disappears) mid-session is picked
//! up on the next operation.

use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::backend::{Backend, BackendError};
use crate::badge::{BadgeSurface, BadgeSync};
use crate::cart::CartStore;
use crate::codec;
use crate::color_preset;
use crate::config::CartConfig;
use crate::dual_store::DualStore;
use crate::format::{DEFAULT_CURRENCY, format_price};
use crate::item::{self, CartItem};
use crate::normalize::normalize;
use crate::notifier::Subscription;
use crate::prefill::Prefill;

const LOCAL_STORAGE: &str = "localStorage";
const WINDOW_NAME: &str = "window.name";

// =============================================================
// Backends
// =============================================================

/// Primary backend: one `localStorage` key.
pub struct LocalStorageBackend {
    key: String,
}

impl LocalStorageBackend {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

fn local_storage() -> Result<web_sys::Storage, BackendError> {
    let unavailable = BackendError::Unavailable { backend: LOCAL_STORAGE };
    let Some(window) = web_sys::window() else {
        return Err(unavailable);
    };
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(unavailable),
        Err(err) => {
            log::debug!("cart: localStorage access threw: {}", describe(&err));
            Err(unavailable)
        }
    }
}

impl Backend for LocalStorageBackend {
    fn name(&self) -> &'static str {
        LOCAL_STORAGE
    }

    fn load(&self) -> Result<Option<String>, BackendError> {
        local_storage()?
            .get_item(&self.key)
            .map_err(|err| BackendError::Read { backend: LOCAL_STORAGE, detail: describe(&err) })
    }

    fn store(&self, raw: &str) -> Result<(), BackendError> {
        local_storage()?
            .set_item(&self.key, raw)
            .map_err(|err| BackendError::Write { backend: LOCAL_STORAGE, detail: describe(&err) })
    }
}

/// Secondary backend: the tab's `window.name` slot, framed with a prefix.
pub struct WindowNameBackend {
    prefix: String,
}

impl WindowNameBackend {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

fn window() -> Result<web_sys::Window, BackendError> {
    web_sys::window().ok_or(BackendError::Unavailable { backend: WINDOW_NAME })
}

impl Backend for WindowNameBackend {
    fn name(&self) -> &'static str {
        WINDOW_NAME
    }

    fn load(&self) -> Result<Option<String>, BackendError> {
        let slot = window()?
            .name()
            .map_err(|err| BackendError::Read { backend: WINDOW_NAME, detail: describe(&err) })?;
        Ok(codec::unwrap_slot(&self.prefix, &slot).map(str::to_owned))
    }

    fn store(&self, raw: &str) -> Result<(), BackendError> {
        window()?
            .set_name(&codec::wrap_slot(&self.prefix, raw))
            .map_err(|err| BackendError::Write { backend: WINDOW_NAME, detail: describe(&err) })
    }
}

// =============================================================
// Badge surface
// =============================================================

/// Count badge elements in the live document.
pub struct DomBadge {
    selector: String,
    legacy_id: String,
}

impl DomBadge {
    #[must_use]
    pub fn new(config: &CartConfig) -> Self {
        Self { selector: config.count_selector(), legacy_id: config.legacy_badge_id.clone() }
    }
}

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

impl BadgeSurface for DomBadge {
    fn write_flagged(&self, text: &str) -> usize {
        let Some(document) = document() else {
            return 0;
        };
        let nodes = match document.query_selector_all(&self.selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::warn!("badge: bad selector {}: {}", self.selector, describe(&err));
                return 0;
            }
        };
        let mut written = 0;
        for index in 0..nodes.length() {
            if let Some(node) = nodes.get(index) {
                node.set_text_content(Some(text));
                written += 1;
            }
        }
        written
    }

    fn write_legacy(&self, text: &str) -> bool {
        let Some(element) = document().and_then(|d| d.get_element_by_id(&self.legacy_id)) else {
            return false;
        };
        element.set_text_content(Some(text));
        true
    }
}

// =============================================================
// JS conversions
// =============================================================

#[derive(Serialize)]
struct ChangeDetail<'a> {
    items: &'a [CartItem],
}

/// Convert a serializable value into a plain JS value via JSON.
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    let text = match serde_json::to_string(value) {
        Ok(text) => text,
        Err(err) => {
            log::error!("cart: failed to serialize for JS: {err}");
            return JsValue::NULL;
        }
    };
    js_sys::JSON::parse(&text).unwrap_or(JsValue::NULL)
}

/// JSON text of a JS value; `None` for `undefined`, functions and cycles.
fn json_text(value: &JsValue) -> Option<String> {
    if value.is_undefined() {
        return None;
    }
    match js_sys::JSON::stringify(value) {
        Ok(text) => JsValue::from(text).as_string(),
        Err(_) => None,
    }
}

/// Convert a JS value into JSON. Anything JSON can't express becomes `null`.
fn from_js(value: &JsValue) -> Value {
    let Some(text) = json_text(value) else {
        return Value::Null;
    };
    serde_json::from_str(&text).unwrap_or(Value::Null)
}

/// Item list argument: `None` when absent or not an array.
fn items_arg(value: &JsValue) -> Option<Vec<CartItem>> {
    match from_js(value) {
        Value::Array(raw) => Some(normalize(&raw)),
        _ => None,
    }
}

/// Item id argument: strings as-is, numbers as their text.
fn id_arg(value: &JsValue) -> Option<String> {
    match from_js(value) {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn describe(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    match err.dyn_ref::<js_sys::Error>() {
        Some(error) => format!("{}: {}", String::from(error.name()), String::from(error.message())),
        None => format!("{err:?}"),
    }
}

// =============================================================
// Window wiring
// =============================================================

/// Re-dispatch every cart change as a window-level `CustomEvent`.
fn bridge_change_event(cart: &CartStore, event_name: String) -> Subscription {
    cart.add_listener(move |change| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let init = web_sys::CustomEventInit::new();
        init.set_detail(&to_js(&ChangeDetail { items: &change.items }));
        match web_sys::CustomEvent::new_with_event_init_dict(&event_name, &init) {
            Ok(event) => {
                if let Err(err) = window.dispatch_event(&event) {
                    log::warn!("cart: {event_name} dispatch failed: {}", describe(&err));
                }
            }
            Err(err) => log::warn!("cart: could not build {event_name}: {}", describe(&err)),
        }
    })
}

/// Forward cross-tab `storage` events to the cart.
fn listen_storage(cart: &Rc<CartStore>) -> Option<Closure<dyn FnMut(web_sys::StorageEvent)>> {
    let window = web_sys::window()?;
    let weak = Rc::downgrade(cart);
    let listener = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |event: web_sys::StorageEvent| {
        if let Some(cart) = weak.upgrade() {
            if !cart.on_storage_change(event.key().as_deref()) {
                log::trace!("cart: ignoring storage change for another key");
            }
        }
    });
    match window.add_event_listener_with_callback("storage", listener.as_ref().unchecked_ref()) {
        Ok(()) => Some(listener),
        Err(err) => {
            log::warn!("cart: cross-tab sync disabled: {}", describe(&err));
            None
        }
    }
}

/// Refresh the badge now, or on `DOMContentLoaded` while the document is loading.
fn refresh_when_ready(badge: &Rc<BadgeSync<DomBadge>>) -> Option<Closure<dyn FnMut()>> {
    let document = document()?;
    if document.ready_state() != "loading" {
        badge.refresh(None);
        return None;
    }
    let weak = Rc::downgrade(badge);
    let listener = Closure::<dyn FnMut()>::new(move || {
        if let Some(badge) = weak.upgrade() {
            badge.refresh(None);
        }
    });
    match document.add_event_listener_with_callback("DOMContentLoaded", listener.as_ref().unchecked_ref()) {
        Ok(()) => Some(listener),
        Err(err) => {
            log::warn!("cart: deferring badge failed: {}", describe(&err));
            badge.refresh(None);
            None
        }
    }
}

fn noop_function() -> js_sys::Function {
    js_sys::Function::new_no_args("")
}

/// Wrap a subscription as a JS function that unsubscribes on first call.
fn unsubscribe_function(subscription: Subscription) -> js_sys::Function {
    let mut slot = Some(subscription);
    Closure::<dyn FnMut()>::new(move || {
        if let Some(subscription) = slot.take() {
            subscription.unsubscribe();
        }
    })
    .into_js_value()
    .unchecked_into()
}

// =============================================================
// CartManager
// =============================================================

/// The cart API exposed to page scripts as `window.cartManager`.
#[wasm_bindgen]
pub struct CartManager {
    cart: Rc<CartStore>,
    badge: Rc<BadgeSync<DomBadge>>,
    subscriptions: Vec<Subscription>,
    storage_listener: Option<Closure<dyn FnMut(web_sys::StorageEvent)>>,
    ready_listener: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl CartManager {
    /// Build a manager. `config` is an optional partial [`CartConfig`] object.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(config: JsValue) -> CartManager {
        let config = CartConfig::from_json(json_text(&config).as_deref());
        let store = DualStore::new(
            LocalStorageBackend::new(config.storage_key.clone()),
            WindowNameBackend::new(config.slot_prefix.clone()),
        );
        let cart = Rc::new(CartStore::new(store, config.storage_key.clone()));

        // Badge first so page listeners on the change event see it updated.
        let badge = BadgeSync::new(Rc::clone(&cart), DomBadge::new(&config));
        let badge_subscription = badge.attach();
        let bridge = bridge_change_event(&cart, config.change_event.clone());
        let storage_listener = listen_storage(&cart);
        let ready_listener = refresh_when_ready(&badge);

        CartManager {
            cart,
            badge,
            subscriptions: vec![badge_subscription, bridge],
            storage_listener,
            ready_listener,
        }
    }

    #[wasm_bindgen(js_name = getItems)]
    pub fn get_items(&self) -> JsValue {
        to_js(&self.cart.get_items())
    }

    /// Replace the list. Non-array arguments are ignored.
    #[wasm_bindgen(js_name = setItems)]
    pub fn set_items(&self, items: JsValue) {
        match from_js(&items) {
            Value::Array(raw) => self.cart.set_items(&raw),
            _ => log::warn!("cart: setItems expects an array; ignored"),
        }
    }

    #[wasm_bindgen(js_name = clearCart)]
    pub fn clear_cart(&self) {
        self.cart.clear_cart();
    }

    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(&self, partial: JsValue) -> String {
        self.cart.add_item(&from_js(&partial))
    }

    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&self, id: JsValue) {
        if let Some(id) = id_arg(&id) {
            self.cart.remove_item(&id);
        }
    }

    #[wasm_bindgen(js_name = updateQuantity)]
    pub fn update_quantity(&self, id: JsValue, qty: JsValue) {
        if let Some(id) = id_arg(&id) {
            self.cart.update_quantity(&id, from_js(&qty));
        }
    }

    /// Total units over `items`, or over the stored cart when omitted.
    #[wasm_bindgen(js_name = getTotalCount)]
    #[allow(clippy::cast_precision_loss)]
    pub fn get_total_count(&self, items: JsValue) -> f64 {
        let count = match items_arg(&items) {
            Some(items) => item::total_count(&items),
            None => self.cart.get_total_count(None),
        };
        count as f64
    }

    /// Total price over `items`, or over the stored cart when omitted.
    #[wasm_bindgen(js_name = getTotalPrice)]
    pub fn get_total_price(&self, items: JsValue) -> f64 {
        match items_arg(&items) {
            Some(items) => item::total_price(&items),
            None => self.cart.get_total_price(None),
        }
    }

    #[wasm_bindgen(js_name = formatPrice)]
    pub fn format_price(&self, amount: f64, currency: Option<String>) -> String {
        format_price(amount, currency.as_deref().unwrap_or(DEFAULT_CURRENCY))
    }

    /// Register `callback(items)` for local and cross-tab changes.
    ///
    /// Returns a function that removes the listener. A non-function argument
    /// registers nothing and returns a function that does nothing.
    #[wasm_bindgen(js_name = addListener)]
    pub fn add_listener(&self, callback: JsValue) -> js_sys::Function {
        let Ok(callback) = callback.dyn_into::<js_sys::Function>() else {
            return noop_function();
        };
        let subscription = self.cart.add_listener(move |change| {
            if let Err(err) = callback.call1(&JsValue::NULL, &to_js(&change.items)) {
                log::warn!("cart: listener threw: {}", describe(&err));
            }
        });
        unsubscribe_function(subscription)
    }

    /// Product pre-fill from the current URL's query string.
    #[wasm_bindgen(js_name = parseUrlParams)]
    pub fn parse_url_params(&self) -> JsValue {
        to_js(&current_prefill())
    }

    /// Overlay settings for a garment color, or `null` for unknown colors.
    #[wasm_bindgen(js_name = colorPreset)]
    pub fn color_preset(&self, name: JsValue) -> JsValue {
        match color_preset::lookup(&name.as_string().unwrap_or_default()) {
            Some(preset) => to_js(&preset),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = updateBadge)]
    pub fn update_badge(&self) {
        self.badge.refresh(None);
    }
}

impl Drop for CartManager {
    fn drop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        if let (Some(window), Some(listener)) = (web_sys::window(), self.storage_listener.take()) {
            if let Err(err) = window.remove_event_listener_with_callback("storage", listener.as_ref().unchecked_ref())
            {
                log::debug!("cart: storage listener removal failed: {}", describe(&err));
            }
        }
        if let (Some(document), Some(listener)) = (document(), self.ready_listener.take()) {
            if let Err(err) =
                document.remove_event_listener_with_callback("DOMContentLoaded", listener.as_ref().unchecked_ref())
            {
                log::debug!("cart: ready listener removal failed: {}", describe(&err));
            }
        }
    }
}

fn current_prefill() -> Prefill {
    let Some(window) = web_sys::window() else {
        return Prefill::default();
    };
    let search = match window.location().search() {
        Ok(search) => search,
        Err(err) => {
            log::debug!("cart: no query string: {}", describe(&err));
            return Prefill::default();
        }
    };
    let params = match web_sys::UrlSearchParams::new_with_str(&search) {
        Ok(params) => params,
        Err(err) => {
            log::debug!("cart: unparseable query string: {}", describe(&err));
            return Prefill::default();
        }
    };
    let pairs = ["name", "price", "image"]
        .into_iter()
        .filter_map(|key| params.get(key).map(|value| (key, value)));
    Prefill::from_query_pairs(pairs)
}

fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("cart: console logger already installed");
    }
}

/// Install `window.cartManager` and the legacy `window.updateCartCount`.
#[wasm_bindgen(js_name = installCartManager)]
pub fn install_cart_manager(config: JsValue) {
    init_logging();
    let Some(window) = web_sys::window() else {
        log::warn!("cart: no window; cart manager not installed");
        return;
    };
    let manager = CartManager::new(config);

    let badge = Rc::clone(&manager.badge);
    let update_badge = Closure::<dyn FnMut()>::new(move || badge.refresh(None)).into_js_value();
    if let Err(err) = js_sys::Reflect::set(&window, &JsValue::from_str("updateCartCount"), &update_badge) {
        log::warn!("cart: could not expose updateCartCount: {}", describe(&err));
    }
    if let Err(err) = js_sys::Reflect::set(&window, &JsValue::from_str("cartManager"), &JsValue::from(manager)) {
        log::warn!("cart: could not expose cartManager: {}", describe(&err));
    }
}
