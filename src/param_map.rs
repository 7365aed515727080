use crate::compat::{String, ToOwned, Vec};

/// Where a parameter lives inside a [`ParamMap`].
/// The controller and action are positional in generated URLs, every other
/// name is a plain named pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    Controller,
    Action,
    Named(&'a str),
}

/// Reserved parameter names, resolved once from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedKeys {
    controller: String,
    /// `None` outside MVC style, where the action key is an ordinary name
    action: Option<String>,
}

impl ReservedKeys {
    pub fn new(controller: &str, action: Option<&str>) -> Self {
        Self {
            controller: controller.to_owned(),
            action: action.map(ToOwned::to_owned),
        }
    }

    /// Resolve a parameter name to its slot
    pub fn slot<'a>(&self, name: &'a str) -> Slot<'a> {
        if name == self.controller {
            Slot::Controller
        } else if self.action.as_deref() == Some(name) {
            Slot::Action
        } else {
            Slot::Named(name)
        }
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

/// Parameter storage with tagged reserved slots.
/// Named keys are unique and keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    controller: Option<String>,
    action: Option<String>,
    named: Vec<(String, String)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot<'_>) -> Option<&str> {
        match slot {
            Slot::Controller => self.controller.as_deref(),
            Slot::Action => self.action.as_deref(),
            Slot::Named(name) => self
                .named
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
        }
    }

    /// Store a value, replacing any previous one in place
    pub fn insert(&mut self, slot: Slot<'_>, value: String) {
        match slot {
            Slot::Controller => self.controller = Some(value),
            Slot::Action => self.action = Some(value),
            Slot::Named(name) => {
                if let Some((_, v)) = self.named.iter_mut().find(|(k, _)| k == name) {
                    *v = value;
                } else {
                    self.named.push((name.to_owned(), value));
                }
            }
        }
    }

    pub fn remove(&mut self, slot: Slot<'_>) -> Option<String> {
        match slot {
            Slot::Controller => self.controller.take(),
            Slot::Action => self.action.take(),
            Slot::Named(name) => {
                let pos = self.named.iter().position(|(k, _)| k == name)?;
                Some(self.named.remove(pos).1)
            }
        }
    }

    pub fn contains(&self, slot: Slot<'_>) -> bool {
        self.get(slot).is_some()
    }

    pub fn controller(&self) -> Option<&str> {
        self.controller.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Named pairs in insertion order
    pub fn named(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn has_named(&self) -> bool {
        !self.named.is_empty()
    }

    /// Number of stored parameters, reserved slots included
    pub fn len(&self) -> usize {
        usize::from(self.controller.is_some()) + usize::from(self.action.is_some()) + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Append-merge: values from `overlay` win on collision, keys new to
    /// `self` are appended after the existing ones.
    pub fn merge(&mut self, overlay: &Self) {
        if let Some(controller) = &overlay.controller {
            self.controller = Some(controller.clone());
        }
        if let Some(action) = &overlay.action {
            self.action = Some(action.clone());
        }
        for (name, value) in &overlay.named {
            self.insert(Slot::Named(name), value.clone());
        }
    }

    /// Copy entries from `base` whose keys are not set in `self`
    pub fn fill_missing(&mut self, base: &Self) {
        if base.is_empty() {
            return;
        }
        if self.controller.is_none() {
            self.controller.clone_from(&base.controller);
        }
        if self.action.is_none() {
            self.action.clone_from(&base.action);
        }
        for (name, value) in &base.named {
            if !self.contains(Slot::Named(name)) {
                self.named.push((name.clone(), value.clone()));
            }
        }
    }

    /// Keep only entries matching `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(Slot<'_>, &str) -> bool) {
        if self.controller.as_deref().is_some_and(|v| !keep(Slot::Controller, v)) {
            self.controller = None;
        }
        if self.action.as_deref().is_some_and(|v| !keep(Slot::Action, v)) {
            self.action = None;
        }
        self.named.retain(|(k, v)| keep(Slot::Named(k), v));
    }

    /// Flatten into `(name, value)` pairs: controller, action, then named
    pub fn to_pairs(&self, keys: &ReservedKeys) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.len());
        if let Some(controller) = &self.controller {
            pairs.push((keys.controller().to_owned(), controller.clone()));
        }
        if let (Some(action), Some(key)) = (&self.action, keys.action()) {
            pairs.push((key.to_owned(), action.clone()));
        }
        pairs.extend(self.named.iter().cloned());
        pairs
    }
}
