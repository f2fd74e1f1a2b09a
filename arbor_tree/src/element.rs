// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element data: properties, kind, and per-element strategies.

use alloc::boxed::Box;

use arbor_property::Property;

use crate::panel::Panel;
use crate::render::Paint;
use crate::window::Window;
use crate::{Bounds, ElementFlags, ElementId, Tree};

/// Callback that rebuilds an element's children from its current properties.
///
/// Runs from [`Tree::reinitialize`] after the old children have been removed.
pub type InitFn = Box<dyn FnMut(&mut Tree, ElementId)>;

/// What kind of element this is, with its kind-specific state.
#[derive(Debug)]
pub enum ElementKind {
    /// A plain element: bounds, flags, children, optional painter.
    Plain,
    /// A scrollable container.
    Panel(Panel),
    /// A movable, maximizable, closable window.
    Window(Window),
}

impl ElementKind {
    /// Short name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Panel(_) => "panel",
            Self::Window(_) => "window",
        }
    }
}

/// An element before and after insertion into a [`Tree`].
///
/// Build one with [`Element::new`], [`Element::panel`], or [`Element::window`],
/// then hand it to [`Tree::insert`].
pub struct Element {
    pub(crate) bounds: Property<Bounds>,
    pub(crate) flags: Property<ElementFlags>,
    pub(crate) kind: ElementKind,
    pub(crate) painter: Option<Box<dyn Paint>>,
    pub(crate) init: Option<InitFn>,
}

impl core::fmt::Debug for Element {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Element")
            .field("bounds", self.bounds.get())
            .field("flags", self.flags.get())
            .field("kind", &self.kind)
            .field("painter", &self.painter.is_some())
            .field("init", &self.init.is_some())
            .finish()
    }
}

impl Element {
    /// A plain element with default flags.
    pub fn new(bounds: Bounds) -> Self {
        Self::with_kind(bounds, ElementKind::Plain)
    }

    /// A scroll panel.
    pub fn panel(bounds: Bounds, panel: Panel) -> Self {
        Self::with_kind(bounds, ElementKind::Panel(panel))
    }

    /// A window. Windows are focusable by default.
    pub fn window(bounds: Bounds, window: Window) -> Self {
        Self::with_kind(bounds, ElementKind::Window(window))
            .with_flags(ElementFlags::default() | ElementFlags::FOCUSABLE)
    }

    fn with_kind(bounds: Bounds, kind: ElementKind) -> Self {
        Self {
            bounds: Property::new("bounds", bounds),
            flags: Property::new("flags", ElementFlags::default()),
            kind,
            painter: None,
            init: None,
        }
    }

    /// Replace the flags.
    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags = Property::new("flags", flags);
        self
    }

    /// Attach a painter strategy.
    pub fn with_painter(mut self, painter: impl Paint + 'static) -> Self {
        self.painter = Some(Box::new(painter));
        self
    }

    /// Attach an init callback. It runs once on insertion and again on every
    /// [`Tree::reinitialize`].
    pub fn with_init(mut self, init: impl FnMut(&mut Tree, ElementId) + 'static) -> Self {
        self.init = Some(Box::new(init));
        self
    }

    /// Current bounds.
    pub fn bounds(&self) -> Bounds {
        *self.bounds.get()
    }

    /// Current flags.
    pub fn flags(&self) -> ElementFlags {
        *self.flags.get()
    }

    /// Kind and kind-specific state.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Read access to the bounds property (value, last writer).
    pub fn bounds_property(&self) -> &Property<Bounds> {
        &self.bounds
    }

    /// Read access to the flags property.
    pub fn flags_property(&self) -> &Property<ElementFlags> {
        &self.flags
    }

    /// Whether an init callback is attached.
    pub fn has_init(&self) -> bool {
        self.init.is_some()
    }
}
