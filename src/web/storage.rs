//! Browser storage backing for the session.
//!
//! Wraps `web_sys::Storage` directly; values are stored as raw strings under
//! the session keys, the same shape other clients of the backend read.

use wasm_bindgen::prelude::*;

use crate::session::SessionStorage;

/// Thin wrapper over the browser's localStorage.
struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// `None` when the key is absent or storage is unavailable.
    fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// `false` when storage rejected the write.
    fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// localStorage-backed [`SessionStorage`]. A blocked storage area behaves
/// like an empty one.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSessionStorage;

impl SessionStorage for WebSessionStorage {
    fn read(&self, key: &str) -> Option<String> {
        LocalStorage::get(key)
    }

    fn write(&self, key: &str, value: &str) -> bool {
        LocalStorage::set(key, value)
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// Runs `handler` whenever another tab or window writes to localStorage.
/// Browsers do not fire this event in the tab that wrote; same-tab changes
/// reach subscribers through the session service itself.
pub fn on_storage_event(handler: impl Fn() + 'static) {
    let closure = Closure::<dyn Fn()>::new(handler);

    if let Some(window) = web_sys::window() {
        let _ =
            window.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
    }

    // Leak the closure to keep the listener alive for the app's lifetime
    closure.forget();
}
