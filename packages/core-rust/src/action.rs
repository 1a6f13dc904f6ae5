//! Registry of named preview actions.
//!
//! An action is a zero-argument function producing a fresh [`Message`].
//! The registry is assembled once through [`ActionRegistryBuilder`] and is
//! immutable afterwards, so it can be shared across concurrent requests
//! behind an `Arc` without locking.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::RegistryError;
use crate::intercept::Interceptors;
use crate::message::Message;

type ActionFn = Arc<dyn Fn() -> Message + Send + Sync>;

/// A named, zero-argument message producer.
#[derive(Clone)]
pub struct Action {
    name: String,
    build: ActionFn,
}

impl Action {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the action, producing a new message.
    #[must_use]
    pub fn build(&self) -> Message {
        (self.build)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Immutable name -> action mapping, iterated in ascending name order.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Action>,
}

impl ActionRegistry {
    #[must_use]
    pub fn builder() -> ActionRegistryBuilder {
        ActionRegistryBuilder::default()
    }

    /// Registered action names, sorted ascending.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Builds the named action's message and runs every interceptor on it.
    ///
    /// Returns `None` if no action has that name.
    #[must_use]
    pub fn build_message(&self, name: &str, interceptors: &Interceptors) -> Option<Message> {
        let action = self.get(name)?;
        let mut message = action.build();
        interceptors.apply(&mut message);
        debug!(action = name, interceptors = interceptors.len(), "built preview message");
        Some(message)
    }
}

/// Collects actions before freezing them into an [`ActionRegistry`].
#[derive(Default)]
pub struct ActionRegistryBuilder {
    actions: BTreeMap<String, Action>,
}

impl ActionRegistryBuilder {
    /// Registers `build` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] if `name` contains anything
    /// outside `[A-Za-z0-9_]`, and [`RegistryError::Duplicate`] if the
    /// name is already taken.
    pub fn register<F>(mut self, name: &str, build: F) -> Result<Self, RegistryError>
    where
        F: Fn() -> Message + Send + Sync + 'static,
    {
        if !is_action_name(name) {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
            });
        }
        if self.actions.contains_key(name) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
            });
        }
        self.actions.insert(
            name.to_string(),
            Action {
                name: name.to_string(),
                build: Arc::new(build),
            },
        );
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> ActionRegistry {
        ActionRegistry {
            actions: self.actions,
        }
    }
}

fn is_action_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
