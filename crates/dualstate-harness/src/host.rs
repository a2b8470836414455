#![forbid(unsafe_code)]

//! Deterministic host: mount, dispatch, settle.
//!
//! # Render cycle
//!
//! 1. [`Host::mount`] renders the root once, then settles.
//! 2. [`Host::dispatch`] hands the current view to an event handler (for
//!    example a button click that calls a `SetState`), then settles.
//! 3. Settling re-renders the root while
//!    [`Component::needs_rerender`] reports pending state, up to
//!    [`HarnessConfig::max_passes`] renders.
//!
//! State writes made during an event are therefore visible in the view as
//! soon as `dispatch` returns, mirroring a framework that flushes its update
//! queue after each event.

use crate::error::{HarnessError, Result};

/// A component the host can render.
pub trait Component {
    /// What a render produces; event handlers act on it.
    type View;

    /// Run the component once.
    fn render(&mut self) -> Result<Self::View>;

    /// Whether state written since the last render requires another render.
    fn needs_rerender(&self) -> bool;
}

/// Host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Maximum re-renders per settle before giving up.
    pub max_passes: u32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self { max_passes: 16 }
    }
}

impl HarnessConfig {
    #[must_use]
    pub fn with_max_passes(mut self, max_passes: u32) -> Self {
        self.max_passes = max_passes;
        self
    }
}

/// Owns a mounted component and its latest view.
pub struct Host<C: Component> {
    root: C,
    view: C::View,
    config: HarnessConfig,
    renders: u64,
}

impl<C: Component> Host<C> {
    /// Mount `root` with the default configuration.
    pub fn mount(root: C) -> Result<Self> {
        Self::mount_with_config(root, HarnessConfig::default())
    }

    pub fn mount_with_config(mut root: C, config: HarnessConfig) -> Result<Self> {
        let view = root.render()?;
        let mut host = Self {
            root,
            view,
            config,
            renders: 1,
        };
        host.settle()?;
        Ok(host)
    }

    /// Latest view.
    #[must_use]
    pub fn view(&self) -> &C::View {
        &self.view
    }

    #[must_use]
    pub fn root(&self) -> &C {
        &self.root
    }

    /// Mutable access to the root, for changing its inputs between events.
    /// Call [`settle`](Self::settle) or [`rerender`](Self::rerender)
    /// afterwards.
    pub fn root_mut(&mut self) -> &mut C {
        &mut self.root
    }

    /// Total renders since mount, including the mount render.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    #[must_use]
    pub fn config(&self) -> HarnessConfig {
        self.config
    }

    /// Run an event handler against the current view, then settle.
    pub fn dispatch<R>(&mut self, handler: impl FnOnce(&C::View) -> Result<R>) -> Result<R> {
        let out = handler(&self.view)?;
        self.settle()?;
        Ok(out)
    }

    /// Render once unconditionally, then settle.
    pub fn rerender(&mut self) -> Result<()> {
        self.render_once()?;
        self.settle()?;
        Ok(())
    }

    /// Re-render while the tree reports pending state.
    ///
    /// Returns the number of renders performed.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Unsettled`] if the tree still has pending state after
    /// `max_passes` renders.
    pub fn settle(&mut self) -> Result<u32> {
        #[cfg(feature = "tracing")]
        let settle_span = tracing::debug_span!("harness.settle", passes = tracing::field::Empty);
        #[cfg(feature = "tracing")]
        let _settle_guard = settle_span.enter();

        let mut passes = 0;
        while self.root.needs_rerender() {
            if passes == self.config.max_passes {
                #[cfg(feature = "tracing")]
                tracing::warn!(message = "harness.unsettled", passes);
                return Err(HarnessError::Unsettled { passes });
            }
            self.render_once()?;
            passes += 1;
        }

        #[cfg(feature = "tracing")]
        settle_span.record("passes", passes);
        Ok(passes)
    }

    fn render_once(&mut self) -> Result<()> {
        self.view = self.root.render()?;
        self.renders += 1;
        Ok(())
    }
}
