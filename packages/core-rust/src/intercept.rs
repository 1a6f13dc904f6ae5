//! Delivery interceptors: hooks that observe or rewrite a freshly built
//! message before any part is resolved.

use std::sync::Arc;

use crate::message::Message;

/// A hook invoked with every message right after its action builds it.
pub trait Interceptor: Send + Sync {
    fn intercept(&self, message: &mut Message);
}

impl<F> Interceptor for F
where
    F: Fn(&mut Message) + Send + Sync,
{
    fn intercept(&self, message: &mut Message) {
        self(message);
    }
}

/// Ordered list of interceptors, run in registration order.
#[derive(Clone, Default)]
pub struct Interceptors {
    hooks: Vec<Arc<dyn Interceptor>>,
}

impl Interceptors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.hooks.push(Arc::new(interceptor));
        self
    }

    pub fn apply(&self, message: &mut Message) {
        for hook in &self.hooks {
            hook.intercept(message);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptors")
            .field("len", &self.hooks.len())
            .finish()
    }
}
