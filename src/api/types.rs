//! Shared types for the API layer: the request context and the bearer
//! token registry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::store::TableStore;
use crate::view::PatientView;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Everything the request path needs, constructed once before the server
/// accepts traffic. All of it is read-only afterwards, so handlers share
/// it without locking.
pub struct AppState {
    pub store: TableStore,
    pub auth: AuthRegistry,
}

/// Cheap-to-clone context handed to every route and middleware layer.
#[derive(Clone)]
pub struct ApiContext {
    state: Arc<AppState>,
}

impl ApiContext {
    pub fn new(store: TableStore, auth: AuthRegistry) -> Self {
        Self {
            state: Arc::new(AppState { store, auth }),
        }
    }

    pub fn store(&self) -> &TableStore {
        &self.state.store
    }

    pub fn view(&self) -> &PatientView {
        self.state.store.view()
    }

    pub fn auth(&self) -> &AuthRegistry {
        &self.state.auth
    }
}

// ═══════════════════════════════════════════════════════════
// Identity — injected by auth middleware
// ═══════════════════════════════════════════════════════════

/// Resolved caller identity, injected into request extensions by the auth
/// middleware after successful token validation.
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject: String,
}

// ═══════════════════════════════════════════════════════════
// Bearer token registry
// ═══════════════════════════════════════════════════════════

/// Accepted bearer tokens, stored as SHA-256 hashes mapped to the subject
/// they resolve to. Populated once at startup; read-only afterwards.
#[derive(Default)]
pub struct AuthRegistry {
    tokens: HashMap<[u8; 32], String>,
}

impl AuthRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, token: &str, subject: impl Into<String>) {
        self.tokens.insert(hash_token(token), subject.into());
    }

    /// Resolve a presented token to an identity, or `None` when unknown.
    pub fn resolve(&self, token: &str) -> Option<Identity> {
        self.tokens
            .get(&hash_token(token))
            .map(|subject| Identity {
                subject: subject.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
