//! Objects whose numeric properties tracks write into

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::rc::Rc;

/// Receiver of interpolated property values.
///
/// Implement this on render-side state (a star's alpha, a mesh's offset) to
/// animate it directly, or use [`PropertyMap`] as a loose bag of values.
pub trait AnimationTarget {
    fn set_property(&mut self, name: &str, value: f32);
}

/// Target handle shared between the caller (who reads it each frame) and
/// the track that writes it.
///
/// A typed `Rc<RefCell<T>>` coerces into this, so the caller keeps full
/// access to `T`.
pub type SharedTarget = Rc<RefCell<dyn AnimationTarget>>;

/// Wrap `target` for sharing with a track
pub fn shared<T: AnimationTarget>(target: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(target))
}

/// Name → value map, the default animation target
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyMap {
    values: FxHashMap<String, f32>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seed a property
    pub fn with(mut self, name: impl Into<String>, value: f32) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    pub fn set(&mut self, name: impl Into<String>, value: f32) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Properties sorted by name
    pub fn sorted(&self) -> Vec<(&str, f32)> {
        let mut entries: Vec<_> = self.values.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl AnimationTarget for PropertyMap {
    fn set_property(&mut self, name: &str, value: f32) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.to_owned(), value);
            }
        }
    }
}

impl<S: BuildHasher> AnimationTarget for HashMap<String, f32, S> {
    fn set_property(&mut self, name: &str, value: f32) {
        match self.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.insert(name.to_owned(), value);
            }
        }
    }
}
