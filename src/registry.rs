//! Concrete value registries and a minimal graphics state.
//!
//! [`ValueRegistry`] deduplicates numeric values into small integer ids.
//! Values are snapped to a quantum before lookup, and any stored value
//! within that quantum is reused.
//!
//! # Usage
//!
//! ```
//! use line_compositor::registry::ValueRegistry;
//!
//! let mut widths = ValueRegistry::new(0.5);
//! let a = widths.install(3.1);
//! let b = widths.install(2.9);
//! assert_eq!(a.id, b.id);
//! assert!((a.actual - 3.0).abs() < 1e-9);
//! ```
//!
//! # Invariants
//!
//! - Ids are assigned in install order starting at 0 and never reused
//! - An installed value is stored once; `actual` is always the stored value
//! - A full registry answers with id −1 and the snapped value

use crate::context::{GraphicsState, Installed, Quantity, Registries, StyleSnapshot};
use crate::math;

/// Epsilon-quantizing value-to-id map.
#[derive(Clone, Debug, Default)]
pub struct ValueRegistry {
    quantum: f64,
    capacity: Option<usize>,
    /// Sorted by value.
    entries: Vec<(f64, i64)>,
    current: Option<Installed>,
}

impl ValueRegistry {
    /// Create a registry snapping values to multiples of `quantum`.
    ///
    /// A non-positive quantum stores values as given, merging only values
    /// within [`math::EPS`].
    #[must_use]
    pub fn new(quantum: f64) -> Self {
        Self {
            quantum,
            ..Self::default()
        }
    }

    /// Limit the number of distinct ids this registry hands out.
    #[must_use]
    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Install `value` and return its id with the represented value.
    pub fn install(&mut self, value: f64) -> Installed {
        let snapped = math::snap(value, self.quantum);
        let tolerance = self.tolerance();

        let pos = self
            .entries
            .partition_point(|&(stored, _)| stored < snapped - tolerance);
        let installed = match self.entries.get(pos) {
            Some(&(stored, id)) if (stored - snapped).abs() <= tolerance => {
                Installed::new(id, stored)
            }
            _ if self.is_full() => {
                tracing::debug!(value, capacity = ?self.capacity, "value registry exhausted");
                Installed::new(Installed::INVALID_ID, snapped)
            }
            _ => {
                let id = self.entries.len() as i64;
                self.entries.insert(pos, (snapped, id));
                Installed::new(id, snapped)
            }
        };

        self.current = Some(installed);
        installed
    }

    /// Look up the id of `value` without installing it.
    #[must_use]
    pub fn get(&self, value: f64) -> Option<i64> {
        let snapped = math::snap(value, self.quantum);
        let tolerance = self.tolerance();
        let pos = self
            .entries
            .partition_point(|&(stored, _)| stored < snapped - tolerance);
        self.entries
            .get(pos)
            .filter(|(stored, _)| (stored - snapped).abs() <= tolerance)
            .map(|&(_, id)| id)
    }

    /// Most recently installed value.
    #[must_use]
    pub fn current(&self) -> Option<Installed> {
        self.current
    }

    /// Number of distinct ids handed out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(id, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        let mut pairs: Vec<(i64, f64)> = self.entries.iter().map(|&(v, id)| (id, v)).collect();
        pairs.sort_unstable_by_key(|&(id, _)| id);
        pairs.into_iter()
    }

    /// Forget every installed value.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
    }

    fn tolerance(&self) -> f64 {
        if self.quantum > 0.0 {
            self.quantum / 2.0
        } else {
            math::EPS
        }
    }

    fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.entries.len() >= cap)
    }
}

/// One [`ValueRegistry`] per [`Quantity`].
#[derive(Clone, Debug, Default)]
pub struct DocumentRegistries {
    pub height: ValueRegistry,
    pub left: ValueRegistry,
    pub bottom: ValueRegistry,
    pub whitespace: ValueRegistry,
    pub word_space: ValueRegistry,
}

impl DocumentRegistries {
    /// Registries for positions and sizes snapped to `position_quantum`,
    /// and gap widths snapped to `width_quantum`.
    #[must_use]
    pub fn new(position_quantum: f64, width_quantum: f64) -> Self {
        Self {
            height: ValueRegistry::new(position_quantum),
            left: ValueRegistry::new(position_quantum),
            bottom: ValueRegistry::new(position_quantum),
            whitespace: ValueRegistry::new(width_quantum),
            word_space: ValueRegistry::new(width_quantum),
        }
    }

    /// Registry backing `quantity`.
    pub fn registry_mut(&mut self, quantity: Quantity) -> &mut ValueRegistry {
        match quantity {
            Quantity::Height => &mut self.height,
            Quantity::Left => &mut self.left,
            Quantity::Bottom => &mut self.bottom,
            Quantity::Whitespace => &mut self.whitespace,
            Quantity::WordSpace => &mut self.word_space,
        }
    }
}

impl Registries for DocumentRegistries {
    fn install(&mut self, quantity: Quantity, value: f64) -> Installed {
        self.registry_mut(quantity).install(value)
    }
}

/// Graphics state backed by an affine matrix and a style snapshot.
///
/// The matrix is `[a, b, c, d, e, f]`, mapping `(x, y)` to
/// `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimpleGraphicsState {
    pub matrix: [f64; 6],
    pub transform_id: i64,
    pub style: StyleSnapshot,
}

impl SimpleGraphicsState {
    /// Identity transform with id 0.
    pub const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

    #[must_use]
    pub fn new(style: StyleSnapshot) -> Self {
        Self {
            matrix: Self::IDENTITY,
            transform_id: 0,
            style,
        }
    }

    /// Replace the transform and its id.
    #[must_use]
    pub fn with_transform(mut self, matrix: [f64; 6], transform_id: i64) -> Self {
        self.matrix = matrix;
        self.transform_id = transform_id;
        self
    }
}

impl GraphicsState for SimpleGraphicsState {
    fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.matrix;
        (a * x + c * y + e, b * x + d * y + f)
    }

    fn transform_id(&self) -> i64 {
        self.transform_id
    }

    fn style(&self) -> StyleSnapshot {
        self.style
    }
}
