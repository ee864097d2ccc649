use crate::binding::Binding;
use crate::platform::EventSource;
use indexmap::IndexMap;
use log::debug;

/// Named bindings kept in insertion order.
pub struct BindingSet<S: EventSource> {
    bindings: IndexMap<String, Binding<S>>,
}

impl<S: EventSource> BindingSet<S> {
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    /// Adds a binding, disabling and replacing any existing binding with the same name
    pub fn insert(&mut self, name: impl Into<String>, binding: Binding<S>) {
        let name = name.into();
        if let Some(previous) = self.bindings.insert(name.clone(), binding) {
            previous.disable();
            debug!("Replaced binding '{name}'");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Binding<S>> {
        self.bindings.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Binding<S>> {
        self.bindings.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding<S>)> {
        self.bindings.iter().map(|(name, binding)| (name.as_str(), binding))
    }

    pub fn enable_all(&self) {
        for binding in self.bindings.values() {
            binding.enable();
        }
    }

    pub fn disable_all(&self) {
        for binding in self.bindings.values() {
            binding.disable();
        }
    }

    pub fn enabled_count(&self) -> usize {
        self.bindings.values().filter(|b| b.is_enabled()).count()
    }
}

impl<S: EventSource> Default for BindingSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSource> Drop for BindingSet<S> {
    fn drop(&mut self) {
        self.disable_all();
    }
}
