//! Scroll animator: resolves a target, optionally jumps, then drives the
//! per-frame tween until it finishes or wheel input interrupts it.
//!
//! Overlapping calls on the same container are not coordinated. Each call
//! owns its own loop and the last write in a frame wins; callers that need
//! exclusivity wait on the previous handle before starting another.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};

use crate::axis::Axis;
use crate::config::ScrollOptions;
use crate::error::ScrollError;
use crate::handle::{ScrollHandle, ScrollResult};
use crate::host::{FrameScheduler, ListenerId, ScrollSurface};
use crate::target::{self, ScrollTarget};
use crate::tween::{plan_jump, ScrollTween};

/// Animates one scroll surface using one frame scheduler.
pub struct Animator<S, F> {
    surface: Rc<S>,
    scheduler: Rc<F>,
}

impl<S, F> Clone for Animator<S, F> {
    fn clone(&self) -> Self {
        Self {
            surface: Rc::clone(&self.surface),
            scheduler: Rc::clone(&self.scheduler),
        }
    }
}

impl<S, F> Animator<S, F>
where
    S: ScrollSurface + 'static,
    F: FrameScheduler + 'static,
{
    pub fn new(surface: Rc<S>, scheduler: Rc<F>) -> Self {
        Self { surface, scheduler }
    }

    #[inline]
    pub fn surface(&self) -> &Rc<S> {
        &self.surface
    }

    #[inline]
    pub fn scheduler(&self) -> &Rc<F> {
        &self.scheduler
    }

    /// Resolve the target position `target` would animate to, without
    /// touching the scroll position.
    pub fn resolve_target(
        &self,
        target: &ScrollTarget<S::Node>,
        options: &ScrollOptions,
    ) -> Result<f64, ScrollError> {
        target::resolve(&*self.surface, target, options.axis, options.offset)
    }

    /// Start animating toward `target`.
    ///
    /// Fails before any position change if the options are invalid or the
    /// target cannot be resolved. Without frame scheduling the position is set
    /// immediately and the returned handle is already settled.
    pub fn animate(
        &self,
        target: impl Into<ScrollTarget<S::Node>>,
        options: ScrollOptions,
    ) -> Result<ScrollHandle, ScrollError> {
        options.validate()?;
        let target = target.into();
        let axis = options.axis;
        let target_position = self.resolve_target(&target, &options)?;

        if !self.scheduler.can_schedule_frames() {
            debug!(
                "transcroll: no frame scheduler, setting {axis} position to {target_position} directly"
            );
            self.surface.set_position(axis, target_position);
            return Ok(ScrollHandle::settled(ScrollResult::default()));
        }

        let mut start_position = self.surface.position(axis);
        let start_time = self.scheduler.now();
        let mut result = ScrollResult::default();

        if let Some(jump_to) = plan_jump(
            start_position,
            target_position,
            options.duration,
            options.jump,
        ) {
            self.surface.set_position(axis, jump_to);
            start_position = self.surface.position(axis);
            result.jumped = true;
            debug!("transcroll: jumped to {start_position} on its way to {target_position}");
        }

        debug!(
            "transcroll: animating {axis} from {start_position} to {target_position} ({}) over {}ms",
            target.describe(),
            options.duration
        );

        let run = Rc::new(Run {
            surface: Rc::clone(&self.surface),
            scheduler: Rc::clone(&self.scheduler),
            axis,
            tween: ScrollTween {
                start_position,
                target_position,
                start_time,
                duration: options.duration,
                easing: options.easing,
            },
            result: Cell::new(result),
            handle: ScrollHandle::new(),
            listener: Cell::new(None),
        });

        if options.interrupt {
            let weak = Rc::downgrade(&run);
            let id = self.surface.add_wheel_listener(Rc::new(move || {
                if let Some(run) = weak.upgrade() {
                    run.interrupt();
                }
            }));
            run.listener.set(Some(id));
        }

        let handle = run.handle.clone();
        Run::schedule(&run);
        Ok(handle)
    }
}

/// State of one in-flight animation, shared by queued frames and the wheel
/// listener.
struct Run<S: ScrollSurface, F: FrameScheduler> {
    surface: Rc<S>,
    scheduler: Rc<F>,
    axis: Axis,
    tween: ScrollTween,
    result: Cell<ScrollResult>,
    handle: ScrollHandle,
    listener: Cell<Option<ListenerId>>,
}

impl<S, F> Run<S, F>
where
    S: ScrollSurface + 'static,
    F: FrameScheduler + 'static,
{
    fn schedule(run: &Rc<Self>) {
        let next = Rc::clone(run);
        if let Err(err) = run.scheduler.request_frame(Box::new(move || next.step())) {
            warn!(
                "transcroll: frame request failed ({}), snapping to target",
                err
            );
            run.surface
                .set_position(run.axis, run.tween.target_position);
            run.finish();
        }
    }

    fn step(self: Rc<Self>) {
        // Interrupted while this frame was queued.
        if self.handle.is_settled() {
            return;
        }
        let sample = self.tween.sample(self.scheduler.now());
        self.surface.set_position(self.axis, sample.position);
        if sample.finished() {
            debug!("transcroll: reached {}", sample.position);
            self.finish();
        } else {
            Self::schedule(&self);
        }
    }

    fn interrupt(&self) {
        if self.handle.is_settled() {
            return;
        }
        let mut result = self.result.get();
        result.interrupted = true;
        self.result.set(result);
        debug!(
            "transcroll: interrupted by wheel input at {}",
            self.surface.position(self.axis)
        );
        self.finish();
    }

    fn finish(&self) {
        if let Some(id) = self.listener.take() {
            self.surface.remove_wheel_listener(id);
        }
        self.handle.settle(self.result.get());
    }
}
