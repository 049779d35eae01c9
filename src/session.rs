//! Session-scoped "has visited" flag
//!
//! Lives in `sessionStorage`: survives reloads and navigation within the
//! tab, gone when the tab closes.

/// Read/set access to the visited flag. Absent reads as `false`.
pub trait SessionFlagStore {
    fn get(&self) -> bool;
    /// Mark the session as visited. There is no way back.
    fn set(&mut self);
}

/// In-memory flag for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    visited: bool,
    writes: u32,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that has already seen the intro
    pub fn visited() -> Self {
        Self {
            visited: true,
            writes: 0,
        }
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl SessionFlagStore for MemorySession {
    fn get(&self) -> bool {
        self.visited
    }

    fn set(&mut self) {
        self.visited = true;
        self.writes += 1;
    }
}

/// `window.sessionStorage` backed flag (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct BrowserSession {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl BrowserSession {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.session_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("sessionStorage unavailable - intro will play on every load");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionFlagStore for BrowserSession {
    fn get(&self) -> bool {
        let Some(storage) = &self.storage else {
            return false;
        };
        // Any non-empty value counts as visited
        matches!(storage.get_item(crate::consts::SESSION_KEY), Ok(Some(v)) if !v.is_empty())
    }

    fn set(&mut self) {
        use crate::consts::{SESSION_KEY, SESSION_VALUE};

        if let Some(storage) = &self.storage {
            if storage.set_item(SESSION_KEY, SESSION_VALUE).is_err() {
                log::warn!("Failed to write {SESSION_KEY} to sessionStorage");
            } else {
                log::info!("Session marked as visited");
            }
        }
    }
}
