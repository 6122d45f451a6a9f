// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named attribute states (hover, pressed, selected, ...).
//!
//! A state bundles attribute overrides with an optional activation callback.
//! Entering a state applies its attributes through
//! [`set`](ComponentTree::set), so a state change schedules exactly the
//! updates a direct assignment of the same attributes would.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::attributes::Attribute;
use crate::trace::{StateWarningEvent, Tracer};

use super::id::ComponentId;
use super::tree::ComponentTree;

/// Attributes and side effect applied when a component enters a state.
#[derive(Default)]
pub struct StateBundle {
    /// Attributes applied on entry.
    pub attributes: Vec<Attribute>,
    /// Called on entry, before the attributes are applied.
    pub on_set: Option<Box<dyn FnMut()>>,
}

impl StateBundle {
    /// Creates a bundle that applies `attributes`.
    #[must_use]
    pub fn new(attributes: impl IntoIterator<Item = Attribute>) -> Self {
        Self {
            attributes: attributes.into_iter().collect(),
            on_set: None,
        }
    }

    /// Adds an activation callback.
    #[must_use]
    pub fn with_on_set(mut self, on_set: impl FnMut() + 'static) -> Self {
        self.on_set = Some(Box::new(on_set));
        self
    }
}

impl fmt::Debug for StateBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateBundle")
            .field("attributes", &self.attributes)
            .field("on_set", &self.on_set.is_some())
            .finish()
    }
}

/// The states of one component and which one is active.
#[derive(Debug, Default)]
pub struct StateTable {
    bundles: HashMap<String, StateBundle>,
    current: Option<String>,
}

impl StateTable {
    /// Returns the active state, if any.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Returns whether a state named `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bundles.contains_key(name)
    }

    /// Returns the bundle registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StateBundle> {
        self.bundles.get(name)
    }
}

/// Error returned by [`ComponentTree::set_state`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateError {
    /// No state with this name was set up on the component.
    Unknown {
        /// The requested name.
        name: String,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown { name } => write!(f, "state `{name}` was never set up"),
        }
    }
}

impl core::error::Error for StateError {}

impl ComponentTree {
    /// Registers (or replaces) the bundle for state `name`.
    ///
    /// Pure bookkeeping: nothing is applied or scheduled, even if `name` is
    /// the active state.
    pub fn setup_state(&mut self, id: ComponentId, name: impl Into<String>, bundle: StateBundle) {
        self.validate(id);
        self.states[id.idx as usize]
            .bundles
            .insert(name.into(), bundle);
    }

    /// Returns the state table of a component.
    #[must_use]
    pub fn states(&self, id: ComponentId) -> &StateTable {
        self.validate(id);
        &self.states[id.idx as usize]
    }

    /// Returns the active state of a component, if any.
    #[must_use]
    pub fn current_state(&self, id: ComponentId) -> Option<&str> {
        self.states(id).current()
    }

    /// Enters state `name`.
    ///
    /// Runs the bundle's callback, then applies its attributes as
    /// [`set`](Self::set) would. Entering the active state again does
    /// nothing and returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Unknown`] if `name` was never set up. The active
    /// state is left unchanged and nothing is scheduled.
    pub fn set_state(&mut self, id: ComponentId, name: &str) -> Result<bool, StateError> {
        self.set_state_traced(id, name, &mut Tracer::none())
    }

    /// Like [`set_state`](Self::set_state), emitting a warning event for
    /// unknown states.
    pub fn set_state_traced(
        &mut self,
        id: ComponentId,
        name: &str,
        tracer: &mut Tracer<'_>,
    ) -> Result<bool, StateError> {
        self.validate(id);
        let table = &mut self.states[id.idx as usize];
        let Some(bundle) = table.bundles.get_mut(name) else {
            tracer.state_warning(&StateWarningEvent {
                component_index: id.idx,
                state: name,
            });
            return Err(StateError::Unknown {
                name: name.to_owned(),
            });
        };
        if table.current.as_deref() == Some(name) {
            return Ok(false);
        }

        if let Some(on_set) = bundle.on_set.as_mut() {
            on_set();
        }
        let attributes = bundle.attributes.clone();
        table.current = Some(name.to_owned());

        if !attributes.is_empty() {
            self.set_traced(id, attributes, tracer);
        }
        Ok(true)
    }
}
