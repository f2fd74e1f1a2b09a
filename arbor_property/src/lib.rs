// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_property --heading-base-level=0

//! Arbor Property: observable value cells with filters, listeners, and writer tags.
//!
//! A [`Property`] owns a value, an ordered list of filters that may substitute a
//! candidate value before it is committed, and an ordered list of listeners that
//! observe committed transitions.
//!
//! - Filters run in registration order on every [`Property::set`].
//! - Listeners run in registration order, and only when the filtered value differs
//!   from the stored one.
//! - Every successful write records a [`Writer`] tag. The tag is provenance for
//!   debugging; it carries no access control.
//!
//! ## Minimal usage
//!
//! ```
//! use arbor_property::{Property, filters, writer};
//!
//! let mut opacity = Property::new("opacity", 0.5_f64);
//! opacity.add_filter(filters::clamp(0.0, 1.0));
//!
//! assert!(opacity.set(4.0, writer!()));
//! assert_eq!(*opacity.get(), 1.0);
//!
//! // Equal after filtering: no transition, listeners stay silent.
//! assert!(!opacity.set(9.0, writer!()));
//! ```
//!
//! ## Listeners and re-entrancy
//!
//! Listeners receive a [`Change`] borrowing the old and new values. They cannot
//! reach the property they observe, so a listener can never write back into it
//! synchronously. Layout reactions that need to mutate a tree are driven by the
//! owner of the property after [`Property::set`] reports a transition.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

pub mod filters;

/// Provenance tag naming the code unit that wrote a property.
///
/// Usually produced with [`writer!`], which captures the calling module path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Writer(pub &'static str);

impl Writer {
    /// Tag used for values installed at construction time.
    pub const INITIAL: Self = Self("<initial>");

    /// Name of the writing code unit.
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl core::fmt::Display for Writer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

/// Build a [`Writer`] tag for the calling module.
#[macro_export]
macro_rules! writer {
    () => {
        $crate::Writer(::core::module_path!())
    };
}

/// A committed transition, as seen by listeners.
#[derive(Debug)]
pub struct Change<'a, T> {
    /// Name the property was created with.
    pub property: &'static str,
    /// Who performed the write.
    pub writer: Writer,
    /// Value before the write.
    pub old: &'a T,
    /// Value after the write (already filtered).
    pub new: &'a T,
}

type Filter<T> = Box<dyn Fn(T) -> T>;
type Listener<T> = Box<dyn FnMut(&Change<'_, T>)>;

/// Observable, filterable value cell.
pub struct Property<T> {
    name: &'static str,
    value: T,
    filters: Vec<Filter<T>>,
    listeners: Vec<Listener<T>>,
    last_writer: Writer,
}

impl<T: core::fmt::Debug> core::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("filters", &self.filters.len())
            .field("listeners", &self.listeners.len())
            .field("last_writer", &self.last_writer)
            .finish()
    }
}

impl<T> Property<T> {
    /// Create a property holding `value`.
    pub fn new(name: &'static str, value: T) -> Self {
        Self {
            name,
            value,
            filters: Vec::new(),
            listeners: Vec::new(),
            last_writer: Writer::INITIAL,
        }
    }

    /// Name given at construction.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// The writer of the most recent committed value.
    pub fn last_writer(&self) -> Writer {
        self.last_writer
    }

    /// Append a change listener.
    pub fn add_listener(&mut self, listener: impl FnMut(&Change<'_, T>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Borrow a handle that can only register hooks.
    pub fn hooks(&mut self) -> Hooks<'_, T> {
        Hooks(self)
    }
}

impl<T: PartialEq> Property<T> {
    /// Write `value` on behalf of `writer`.
    ///
    /// Filters run in registration order. If the result equals the stored value
    /// nothing happens and `false` is returned. Otherwise the value is stored,
    /// `writer` becomes the last writer, listeners are notified, and `true` is
    /// returned.
    pub fn set(&mut self, value: T, writer: Writer) -> bool {
        let value = self.filter(value);
        if value == self.value {
            return false;
        }
        let old = core::mem::replace(&mut self.value, value);
        self.last_writer = writer;
        log::trace!("property `{}` written by {}", self.name, writer);
        let change = Change {
            property: self.name,
            writer,
            old: &old,
            new: &self.value,
        };
        for listener in &mut self.listeners {
            listener(&change);
        }
        true
    }

    /// Append a filter and re-filter the stored value.
    ///
    /// The re-filtered value replaces the stored one without notifying listeners
    /// and without touching the last writer.
    pub fn add_filter(&mut self, filter: impl Fn(T) -> T + 'static)
    where
        T: Clone,
    {
        let filtered = filter(self.value.clone());
        self.value = filtered;
        self.filters.push(Box::new(filter));
    }

    fn filter(&self, mut value: T) -> T {
        for f in &self.filters {
            value = f(value);
        }
        value
    }
}

impl<T: Default> Default for Property<T> {
    fn default() -> Self {
        Self::new("<unnamed>", T::default())
    }
}

/// Registration-only view of a [`Property`].
///
/// Owners that react to writes (for example a layout tree) hand this out so
/// observers can attach filters and listeners without bypassing the owner's
/// setters.
pub struct Hooks<'a, T>(&'a mut Property<T>);

impl<T> core::fmt::Debug for Hooks<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Hooks").field(&self.0.name).finish()
    }
}

impl<T: PartialEq + Clone> Hooks<'_, T> {
    /// See [`Property::add_filter`].
    pub fn add_filter(&mut self, filter: impl Fn(T) -> T + 'static) -> &mut Self {
        self.0.add_filter(filter);
        self
    }

    /// See [`Property::add_listener`].
    pub fn add_listener(&mut self, listener: impl FnMut(&Change<'_, T>) + 'static) -> &mut Self {
        self.0.add_listener(listener);
        self
    }
}
