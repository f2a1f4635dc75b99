// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-target core for Planar charts.
//!
//! Chart code describes what should be on screen as a list of [`Mark`]s with stable
//! [`MarkKey`]s. A caller-owned [`Surface`] reconciles each list against what it already holds
//! (a keyed join), producing [`MarkDiff`]s:
//! - **Enter** for keys it has not seen,
//! - **Update** for keys whose visual changed,
//! - **Exit** for keys the scope no longer produces.
//!
//! Because joins are keyed and scoped, re-rendering is idempotent and never disturbs elements
//! that belong to other scopes or to the caller.

mod mark;
mod surface;
mod svg;

pub use kurbo;
pub use peniko;

pub use mark::{Mark, MarkKey, Shape, ShapeKind, TextAnchor, TextBaseline, TextShape};
pub use surface::{Animation, Element, MarkDiff, PointerListener, Surface};
