//! Document event routing.
//!
//! The event substrate delivers "document written" events; handlers register
//! against path patterns with `{param}` segments. Handler errors are caught
//! here, logged, and swallowed: the substrate may redeliver events it
//! considers failed, and every handler is already safe to run more than once,
//! so a processing error must never surface as a delivery failure.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use safegate_core::AppResult;
use serde_json::Value;

/// A delivered document event. `before` is absent for creations.
#[derive(Debug, Clone)]
pub struct DocEvent {
    pub path: String,
    /// Captured `{param}` segments from the matched pattern.
    pub params: HashMap<String, String>,
    pub before: Option<Value>,
    pub after: Option<Value>,
}

impl DocEvent {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[async_trait]
pub trait DocEventHandler: Send + Sync {
    async fn handle(&self, event: DocEvent) -> AppResult<()>;
}

/// Path pattern with literal and `{param}` segments, e.g.
/// `tenants/{tenantId}/alerts/{alertId}`.
#[derive(Debug, Clone)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param(String),
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Match `path` against the pattern, returning captured params on success.
    pub fn capture(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

struct Route {
    pattern: PathPattern,
    handler: Arc<dyn DocEventHandler>,
}

/// Registry of create/update handlers, fed by the document store.
#[derive(Default)]
pub struct EventRouter {
    on_create: RwLock<Vec<Route>>,
    on_update: RwLock<Vec<Route>>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(&self, pattern: &str, handler: Arc<dyn DocEventHandler>) {
        self.on_create
            .write()
            .expect("event router lock poisoned")
            .push(Route {
                pattern: PathPattern::parse(pattern),
                handler,
            });
    }

    pub fn on_update(&self, pattern: &str, handler: Arc<dyn DocEventHandler>) {
        self.on_update
            .write()
            .expect("event router lock poisoned")
            .push(Route {
                pattern: PathPattern::parse(pattern),
                handler,
            });
    }

    pub async fn dispatch_create(&self, path: &str, after: Value) {
        let matches = Self::matching(&self.on_create, path);
        for (params, handler) in matches {
            let event = DocEvent {
                path: path.to_string(),
                params,
                before: None,
                after: Some(after.clone()),
            };
            Self::run(path, "create", handler, event).await;
        }
    }

    pub async fn dispatch_update(&self, path: &str, before: Value, after: Value) {
        let matches = Self::matching(&self.on_update, path);
        for (params, handler) in matches {
            let event = DocEvent {
                path: path.to_string(),
                params,
                before: Some(before.clone()),
                after: Some(after.clone()),
            };
            Self::run(path, "update", handler, event).await;
        }
    }

    fn matching(
        routes: &RwLock<Vec<Route>>,
        path: &str,
    ) -> Vec<(HashMap<String, String>, Arc<dyn DocEventHandler>)> {
        // Clone matching handlers out so no lock is held across awaits.
        routes
            .read()
            .expect("event router lock poisoned")
            .iter()
            .filter_map(|route| {
                route
                    .pattern
                    .capture(path)
                    .map(|params| (params, Arc::clone(&route.handler)))
            })
            .collect()
    }

    async fn run(path: &str, kind: &str, handler: Arc<dyn DocEventHandler>, event: DocEvent) {
        if let Err(e) = handler.handle(event).await {
            tracing::error!(path = %path, event = kind, error = %e, "Event handler failed");
        }
    }
}
