//! Lifecycle hooks.
//!
//! Each record type carries a fixed set of named hook points. Every point
//! holds an ordered list of callbacks which run synchronously, in
//! registration order, around `save`, `create` and `destroy`.
//!
//! A failing callback aborts the surrounding operation and its error is
//! returned to the caller as-is. Nothing already written is rolled back.

use crate::error::CoreResult;
use crate::record::{Record, RecordId, ID};
use std::fmt;
use std::sync::Arc;

const POINT_COUNT: usize = 7;

/// A named point in a record's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// First thing `save` does.
    BeforeValidation,
    /// Before the collection is loaded for a save.
    BeforeSave,
    /// After a successful save.
    AfterSave,
    /// Before the first save of a new record.
    BeforeCreate,
    /// After the first successful save of a new record.
    AfterCreate,
    /// Before the collection is loaded for a destroy.
    BeforeDestroy,
    /// After a successful destroy.
    AfterDestroy,
}

impl HookPoint {
    /// Every hook point, in declaration order.
    pub const ALL: [HookPoint; POINT_COUNT] = [
        HookPoint::BeforeValidation,
        HookPoint::BeforeSave,
        HookPoint::AfterSave,
        HookPoint::BeforeCreate,
        HookPoint::AfterCreate,
        HookPoint::BeforeDestroy,
        HookPoint::AfterDestroy,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    /// Returns the snake_case name of this point.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HookPoint::BeforeValidation => "before_validation",
            HookPoint::BeforeSave => "before_save",
            HookPoint::AfterSave => "after_save",
            HookPoint::BeforeCreate => "before_create",
            HookPoint::AfterCreate => "after_create",
            HookPoint::BeforeDestroy => "before_destroy",
            HookPoint::AfterDestroy => "after_destroy",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lifecycle callback.
pub type Hook = Arc<dyn Fn(&mut Record) -> CoreResult<()> + Send + Sync>;

/// Ordered callbacks for every [`HookPoint`].
#[derive(Clone, Default)]
pub struct Hooks {
    chains: [Vec<Hook>; POINT_COUNT],
}

impl Hooks {
    /// Creates an empty set of hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the hooks every record type starts with: id assignment at
    /// [`HookPoint::BeforeCreate`].
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut hooks = Self::new();
        hooks.register(HookPoint::BeforeCreate, assign_id);
        hooks
    }

    /// Appends a callback to `point`.
    pub fn register<F>(&mut self, point: HookPoint, hook: F)
    where
        F: Fn(&mut Record) -> CoreResult<()> + Send + Sync + 'static,
    {
        self.chains[point.index()].push(Arc::new(hook));
    }

    /// Returns the number of callbacks registered at `point`.
    #[must_use]
    pub fn len(&self, point: HookPoint) -> usize {
        self.chains[point.index()].len()
    }

    /// Returns true if no callbacks are registered anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.iter().all(Vec::is_empty)
    }

    /// Runs every callback at `point` in registration order.
    ///
    /// Stops at the first failing callback.
    ///
    /// # Errors
    ///
    /// Returns the first callback error.
    pub fn run(&self, point: HookPoint, record: &mut Record) -> CoreResult<()> {
        for hook in &self.chains[point.index()] {
            hook(record)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for point in HookPoint::ALL {
            map.entry(&point.name(), &self.len(point));
        }
        map.finish()
    }
}

/// Gives a record a fresh [`RecordId`] unless it already has an id.
///
/// # Errors
///
/// Never fails; the signature matches [`Hook`].
pub fn assign_id(record: &mut Record) -> CoreResult<()> {
    if record.id().is_none() {
        record.set(ID, RecordId::new());
    }
    Ok(())
}
