// Variable bindings for expression evaluation.
// A flat name -> value table owned by one session.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, f64>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding, overwriting any previous value for `name`
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Collect all bindings sorted by name.
    pub fn collect_bindings(&self) -> Vec<(String, f64)> {
        let mut out: Vec<(String, f64)> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut bindings = Bindings::new();
        bindings.extend(iter);
        bindings
    }
}

impl<S: Into<String>> Extend<(S, f64)> for Bindings {
    fn extend<T: IntoIterator<Item = (S, f64)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}
