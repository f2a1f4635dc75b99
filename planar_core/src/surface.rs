// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render target.
//!
//! A [`Surface`] is owned by the caller. Chart code never creates or destroys one; it reads its
//! size and reconciles its own marks into it with [`Surface::join`]. Each join is scoped, so a
//! chart only ever enters, updates or exits elements it created under that scope.

use core::fmt;
use core::time::Duration;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use peniko::Brush;
use tracing::{trace, warn};

use crate::mark::{Mark, MarkKey, Shape, ShapeKind};

/// A change applied to the surface by a join.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A new element was created.
    Enter {
        /// Element key.
        key: MarkKey,
        /// Shape kind.
        kind: ShapeKind,
        /// Bounds of the new element.
        bounds: Rect,
    },
    /// An existing element changed.
    Update {
        /// Element key.
        key: MarkKey,
        /// Shape kind.
        kind: ShapeKind,
        /// Bounds before the update.
        old_bounds: Rect,
        /// Bounds after the update.
        new_bounds: Rect,
    },
    /// An element was removed.
    Exit {
        /// Element key.
        key: MarkKey,
        /// Shape kind.
        kind: ShapeKind,
        /// Bounds of the removed element.
        bounds: Rect,
    },
}

impl MarkDiff {
    /// Returns the key of the affected element.
    pub fn key(&self) -> &MarkKey {
        match self {
            Self::Enter { key, .. } | Self::Update { key, .. } | Self::Exit { key, .. } => key,
        }
    }

    /// Returns `true` for [`MarkDiff::Enter`].
    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter { .. })
    }

    /// Returns `true` for [`MarkDiff::Update`].
    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }

    /// Returns `true` for [`MarkDiff::Exit`].
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }
}

/// A pending visual transition attached to an element.
///
/// Transitions are fire-and-forget: the surface records them and renderers play them back. No
/// completion is reported.
#[derive(Clone, Debug, PartialEq)]
pub enum Animation {
    /// Progressive stroke reveal (dash offset from `length` to `0`).
    Reveal {
        /// Transition duration.
        duration: Duration,
        /// Total stroke length.
        length: f64,
    },
    /// Opacity from `0` to `1`.
    FadeIn {
        /// Transition duration.
        duration: Duration,
    },
    /// Interpolation from the previous geometry and paint.
    Morph {
        /// Transition duration.
        duration: Duration,
        /// Previous geometry.
        from: Shape,
        /// Previous stroke paint.
        from_stroke: Brush,
        /// Previous fill paint.
        from_fill: Brush,
    },
}

/// A mark as held by the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// The current mark.
    pub mark: Mark,
    /// Owning join scope; `None` for caller-inserted elements.
    pub scope: Option<String>,
    /// Transition started by the last change, if any.
    pub animation: Option<Animation>,
}

/// Receives pointer events dispatched through a [`Surface`].
///
/// The marks a listener returns are joined under [`PointerListener::scope`], so returning an
/// empty list removes everything the listener drew previously.
pub trait PointerListener {
    /// Join scope for the marks this listener produces.
    fn scope(&self) -> &str;

    /// Called for every pointer move; returns the full set of marks to show.
    fn pointer_moved(&mut self, pos: Point) -> Vec<Mark>;

    /// Called when the pointer leaves the surface.
    fn pointer_left(&mut self) -> Vec<Mark> {
        Vec::new()
    }
}

/// A caller-owned drawing surface.
pub struct Surface {
    size: Size,
    elements: HashMap<MarkKey, Element>,
    listeners: HashMap<String, Box<dyn PointerListener>>,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.listeners.keys().collect();
        names.sort();
        f.debug_struct("Surface")
            .field("size", &self.size)
            .field("elements", &self.elements.len())
            .field("listeners", &names)
            .finish()
    }
}

impl Surface {
    /// Creates an empty surface of the given pixel size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            elements: HashMap::new(),
            listeners: HashMap::new(),
        }
    }

    /// Returns the measured pixel size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Inserts an unscoped element, replacing any element with the same key.
    ///
    /// Joins never remove unscoped elements.
    pub fn insert(&mut self, mark: Mark) -> Option<Element> {
        self.elements.insert(
            mark.key.clone(),
            Element {
                mark,
                scope: None,
                animation: None,
            },
        )
    }

    /// Removes an element by key.
    pub fn remove(&mut self, key: &MarkKey) -> Option<Element> {
        self.elements.remove(key)
    }

    /// Looks up an element by key.
    pub fn get(&self, key: &MarkKey) -> Option<&Element> {
        self.elements.get(key)
    }

    /// Returns all elements in paint order: `(z_index, key)`.
    pub fn elements(&self) -> Vec<&Element> {
        let mut out: Vec<&Element> = self.elements.values().collect();
        out.sort_by(|a, b| {
            (a.mark.z_index, &a.mark.key).cmp(&(b.mark.z_index, &b.mark.key))
        });
        out
    }

    /// Returns the elements owned by `scope`, in paint order.
    pub fn select(&self, scope: &str) -> Vec<&Element> {
        let mut out = self.elements();
        out.retain(|e| e.scope.as_deref() == Some(scope));
        out
    }

    /// Returns the elements carrying the class `class`, in paint order.
    pub fn select_class(&self, class: &str) -> Vec<&Element> {
        let mut out = self.elements();
        out.retain(|e| e.mark.class.split_whitespace().any(|c| c == class));
        out
    }

    /// Reconciles `marks` against the elements currently owned by `scope`.
    ///
    /// - keys not yet present enter,
    /// - keys present with a different visual update,
    /// - keys owned by `scope` but absent from `marks` exit.
    ///
    /// Identical marks produce no diff, so repeating a join is a no-op. Elements owned by other
    /// scopes, and unscoped elements, are never touched: a mark whose key collides with one is
    /// dropped with a warning and produces no diff.
    pub fn join(&mut self, scope: &str, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut diffs = Vec::new();
        let mut seen: hashbrown::HashSet<MarkKey> = hashbrown::HashSet::new();

        for mark in marks {
            seen.insert(mark.key.clone());
            match self.elements.get_mut(&mark.key) {
                Some(existing) => {
                    if existing.scope.as_deref() != Some(scope) {
                        warn!(
                            scope,
                            key = %mark.key,
                            owner = existing.scope.as_deref().unwrap_or("caller"),
                            "key already in use; mark skipped"
                        );
                        continue;
                    }
                    if existing.mark.same_visual(&mark) {
                        continue;
                    }
                    let old_bounds = existing.mark.bounds();
                    let new_bounds = mark.bounds();
                    let kind = mark.shape.kind();
                    existing.animation = mark.transition.map(|duration| Animation::Morph {
                        duration,
                        from: existing.mark.shape.clone(),
                        from_stroke: existing.mark.stroke.clone(),
                        from_fill: existing.mark.fill.clone(),
                    });
                    diffs.push(MarkDiff::Update {
                        key: mark.key.clone(),
                        kind,
                        old_bounds,
                        new_bounds,
                    });
                    existing.mark = mark;
                }
                None => {
                    let animation = mark.transition.map(|duration| {
                        if mark.reveal {
                            Animation::Reveal {
                                duration,
                                length: mark.shape.stroke_length(),
                            }
                        } else {
                            Animation::FadeIn { duration }
                        }
                    });
                    diffs.push(MarkDiff::Enter {
                        key: mark.key.clone(),
                        kind: mark.shape.kind(),
                        bounds: mark.bounds(),
                    });
                    self.elements.insert(
                        mark.key.clone(),
                        Element {
                            mark,
                            scope: Some(scope.to_owned()),
                            animation,
                        },
                    );
                }
            }
        }

        let mut stale: Vec<MarkKey> = self
            .elements
            .iter()
            .filter(|(key, e)| e.scope.as_deref() == Some(scope) && !seen.contains(*key))
            .map(|(key, _)| key.clone())
            .collect();
        stale.sort();
        for key in stale {
            if let Some(e) = self.elements.remove(&key) {
                diffs.push(MarkDiff::Exit {
                    kind: e.mark.shape.kind(),
                    bounds: e.mark.bounds(),
                    key,
                });
            }
        }

        trace!(
            scope,
            enter = diffs.iter().filter(|d| d.is_enter()).count(),
            update = diffs.iter().filter(|d| d.is_update()).count(),
            exit = diffs.iter().filter(|d| d.is_exit()).count(),
            "join"
        );
        diffs
    }

    /// Removes every element owned by `scope`.
    pub fn clear_scope(&mut self, scope: &str) -> Vec<MarkDiff> {
        self.join(scope, core::iter::empty())
    }

    /// Registers a pointer-move listener under `name`, replacing any previous one.
    pub fn on_pointer_move(
        &mut self,
        name: impl Into<String>,
        listener: impl PointerListener + 'static,
    ) {
        self.listeners.insert(name.into(), Box::new(listener));
    }

    /// Unregisters the listener named `name`.
    pub fn off_pointer_move(&mut self, name: &str) -> bool {
        self.listeners.remove(name).is_some()
    }

    /// Returns `true` if a listener named `name` is registered.
    pub fn has_listener(&self, name: &str) -> bool {
        self.listeners.contains_key(name)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatches a pointer move to every listener and applies the marks they return.
    pub fn pointer_move(&mut self, pos: Point) -> Vec<MarkDiff> {
        let produced: Vec<(String, Vec<Mark>)> = self
            .listeners
            .values_mut()
            .map(|l| {
                let marks = l.pointer_moved(pos);
                (l.scope().to_owned(), marks)
            })
            .collect();
        self.apply_listener_marks(produced)
    }

    /// Dispatches a pointer leave to every listener and applies the marks they return.
    pub fn pointer_leave(&mut self) -> Vec<MarkDiff> {
        let produced: Vec<(String, Vec<Mark>)> = self
            .listeners
            .values_mut()
            .map(|l| {
                let marks = l.pointer_left();
                (l.scope().to_owned(), marks)
            })
            .collect();
        self.apply_listener_marks(produced)
    }

    fn apply_listener_marks(&mut self, mut produced: Vec<(String, Vec<Mark>)>) -> Vec<MarkDiff> {
        produced.sort_by(|a, b| a.0.cmp(&b.0));
        let mut diffs = Vec::new();
        for (scope, marks) in produced {
            diffs.extend(self.join(&scope, marks));
        }
        diffs
    }
}
