//! The current input: which buffer is being processed and where.
//!
//! Diagnostics raised deep inside a grammar need to know which buffer their
//! [`Location`]s refer to. Front ends either thread an [`InputContext`]
//! through explicitly, or use the per-thread ambient slot through the free
//! functions in this module. Both forms switch buffers with a scope guard
//! that puts the previous buffer and location back when it drops, on every
//! exit path.
//!
//! ```ignore
//! let mut ctx = InputContext::new();
//! {
//!     let mut input = ctx.enter(Arc::new(Buffer::named("main.calc", src)));
//!     input.set_location(tok.location());
//!     // `?` and panics restore the outer input too.
//!     evaluate(&mut input)?;
//! }
//! assert!(ctx.buffer().is_none());
//! ```

use core::cell::RefCell;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::source::{BoundLocation, Buffer, Location};

/// The buffer currently being processed and the current position in it.
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    buffer: Option<Arc<Buffer>>,
    location: Location,
}

impl InputContext {
    /// A context with no buffer installed.
    pub const fn new() -> Self {
        Self {
            buffer: None,
            location: Location::NONE,
        }
    }

    #[inline]
    pub fn buffer(&self) -> Option<&Arc<Buffer>> {
        self.buffer.as_ref()
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// The current location resolved against the current buffer.
    ///
    /// `None` if no buffer is installed or the location is unknown.
    pub fn bound_location(&self) -> Option<BoundLocation<'_>> {
        let buffer = self.buffer.as_deref()?;
        self.location.is_some().then(|| buffer.location(self.location))
    }

    /// Make `buffer` the current input until the returned guard drops.
    ///
    /// The location moves to the start of the new buffer. The guard
    /// dereferences to this context.
    pub fn enter(&mut self, buffer: Arc<Buffer>) -> InputGuard<'_> {
        log::debug!("entering input {}", display_name(&buffer));
        let saved_buffer = self.buffer.replace(buffer);
        let saved_location = mem::replace(&mut self.location, Location::new(0));
        InputGuard {
            ctx: self,
            saved_buffer,
            saved_location,
        }
    }

    fn restore(&mut self, buffer: Option<Arc<Buffer>>, location: Location) {
        if let Some(leaving) = &self.buffer {
            log::debug!("leaving input {}", display_name(leaving));
        }
        self.buffer = buffer;
        self.location = location;
    }
}

fn display_name(buffer: &Buffer) -> &str {
    buffer.name().unwrap_or("<anonymous>")
}

/// Scope guard returned by [`InputContext::enter`].
#[must_use = "the previous input is restored as soon as the guard drops"]
#[derive(Debug)]
pub struct InputGuard<'a> {
    ctx: &'a mut InputContext,
    saved_buffer: Option<Arc<Buffer>>,
    saved_location: Location,
}

impl Deref for InputGuard<'_> {
    type Target = InputContext;

    fn deref(&self) -> &InputContext {
        self.ctx
    }
}

impl DerefMut for InputGuard<'_> {
    fn deref_mut(&mut self) -> &mut InputContext {
        self.ctx
    }
}

impl Drop for InputGuard<'_> {
    fn drop(&mut self) {
        let buffer = self.saved_buffer.take();
        self.ctx.restore(buffer, self.saved_location);
    }
}

thread_local! {
    static AMBIENT: RefCell<InputContext> = const { RefCell::new(InputContext::new()) };
}

/// Make `buffer` the current input of this thread until the guard drops.
pub fn enter(buffer: Arc<Buffer>) -> AmbientGuard {
    let (saved_buffer, saved_location) = AMBIENT.with_borrow_mut(|ctx| {
        log::debug!("entering ambient input {}", display_name(&buffer));
        let saved_buffer = ctx.buffer.replace(buffer);
        let saved_location = mem::replace(&mut ctx.location, Location::new(0));
        (saved_buffer, saved_location)
    });
    AmbientGuard {
        saved_buffer,
        saved_location,
        _not_send: PhantomData,
    }
}

/// Run `f` with `buffer` as this thread's current input.
pub fn with_input<R>(buffer: Arc<Buffer>, f: impl FnOnce() -> R) -> R {
    let _guard = enter(buffer);
    f()
}

/// This thread's current input buffer.
pub fn current_buffer() -> Option<Arc<Buffer>> {
    AMBIENT.with_borrow(|ctx| ctx.buffer.clone())
}

/// This thread's current input location.
pub fn current_location() -> Location {
    AMBIENT.with_borrow(|ctx| ctx.location)
}

pub fn set_current_location(location: Location) {
    AMBIENT.with_borrow_mut(|ctx| ctx.location = location);
}

/// Scope guard returned by [`enter`]. Tied to the thread that created it.
#[must_use = "the previous input is restored as soon as the guard drops"]
#[derive(Debug)]
pub struct AmbientGuard {
    saved_buffer: Option<Arc<Buffer>>,
    saved_location: Location,
    _not_send: PhantomData<*const ()>,
}

impl Drop for AmbientGuard {
    fn drop(&mut self) {
        let buffer = self.saved_buffer.take();
        let location = self.saved_location;
        // The slot may already be gone during thread teardown.
        let _ = AMBIENT.try_with(|slot| {
            if let Ok(mut ctx) = slot.try_borrow_mut() {
                ctx.restore(buffer, location);
            }
        });
    }
}
