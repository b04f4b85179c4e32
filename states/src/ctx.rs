use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use log::debug;

use crate::{Error, State};

/// Storage for every state the application registers, keyed by type.
#[derive(Default)]
pub struct StateCtx {
    storage: BTreeMap<TypeId, Box<dyn Any>>,
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.storage.len())
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a state, replacing any previous value of the same type.
    pub fn add_state<T: State>(&mut self, state: T) {
        debug!("Register state {}", state.name());
        self.storage.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn contains<T: State>(&self) -> bool {
        self.storage.contains_key(&TypeId::of::<T>())
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.storage
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found::<T>("read"))
    }

    pub fn try_state_mut<T: State>(&mut self) -> Result<&mut T, Error> {
        self.storage
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut::<T>())
            .ok_or_else(|| Error::state_not_found::<T>("write"))
    }

    /// Reads a registered state.
    ///
    /// # Panics
    /// Panics if the state type was never registered.
    pub fn state<T: State>(&self) -> &T {
        match self.try_state::<T>() {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mutable access to a registered state.
    ///
    /// # Panics
    /// Panics if the state type was never registered.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        match self.try_state_mut::<T>() {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    /// Applies `f` to a registered state, returning its result.
    ///
    /// # Panics
    /// Panics if the state type was never registered.
    pub fn update<T: State, R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        f(self.state_mut::<T>())
    }

    pub fn clear(&mut self) {
        self.storage.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Counter {
        value: i32,
    }

    impl State for Counter {}

    #[derive(Debug, Default)]
    struct Missing;

    impl State for Missing {}

    #[test]
    fn add_and_read_state() {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter { value: 42 });

        assert!(ctx.contains::<Counter>());
        assert_eq!(ctx.state::<Counter>().value, 42);
    }

    #[test]
    fn update_mutates_in_place() {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter::default());

        let after = ctx.update::<Counter, _>(|counter| {
            counter.value += 2;
            counter.value
        });

        assert_eq!(after, 2);
        assert_eq!(ctx.state::<Counter>(), &Counter { value: 2 });
    }

    #[test]
    fn add_state_replaces_previous_value() {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter { value: 1 });
        ctx.add_state(Counter { value: 7 });

        assert_eq!(ctx.state::<Counter>().value, 7);
    }

    #[test]
    fn missing_state_is_an_error() {
        let ctx = StateCtx::new();
        let err = ctx.try_state::<Missing>().expect_err("state was never added");
        assert!(err.to_string().contains("Missing"), "error names the type: {err}");
    }

    #[test]
    #[should_panic(expected = "State not found")]
    fn state_panics_when_missing() {
        let ctx = StateCtx::new();
        let _missing: &Missing = ctx.state::<Missing>();
    }
}
