use std::{
    cell::RefCell,
    future::Future,
    mem,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use futures::channel::oneshot;

use super::{Frame, RandomSource, ScrambleJob, ScrambleState};

/// Host primitive that runs a callback before the next display refresh.
pub trait FrameScheduler {
    type Handle;

    /// Queues `callback` for the next frame. Implementations must never run
    /// the callback synchronously from inside this call.
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Option<Self::Handle>;

    fn cancel_frame(&self, handle: Self::Handle);
}

/// The element a scrambler animates.
pub trait TextSink {
    /// Text currently displayed, used as the source of the next transition.
    fn current_text(&self) -> String;

    fn render(&self, frame: Frame);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every cell reached its target and was rendered.
    Settled,
    /// A newer transition replaced this one, or the scrambler was dropped.
    Superseded,
}

/// Completes when the transition started by [`Scrambler::set_text`] ends.
#[derive(Debug)]
pub struct Transition {
    done: oneshot::Receiver<()>,
}

impl Future for Transition {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.done).poll(cx).map(|res| match res {
            Ok(()) => Outcome::Settled,
            Err(_) => Outcome::Superseded,
        })
    }
}

struct Run<H, R> {
    rng: R,
    state: ScrambleState,
    generation: u64,
    pending: Option<H>,
    resolve: Option<oneshot::Sender<()>>,
}

struct Shared<K: FrameScheduler, S, R> {
    scheduler: K,
    sink: S,
    run: RefCell<Run<K::Handle, R>>,
}

/// Drives one [`TextSink`] through scramble transitions, one frame per
/// scheduler tick. At most one transition is live at a time.
pub struct Scrambler<K: FrameScheduler, S, R> {
    shared: Rc<Shared<K, S, R>>,
}

impl<K: FrameScheduler, S, R> Clone for Scrambler<K, S, R> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<K, S, R> Scrambler<K, S, R>
where
    K: FrameScheduler + 'static,
    S: TextSink + 'static,
    R: RandomSource + 'static,
{
    pub fn new(scheduler: K, sink: S, rng: R) -> Self {
        Self {
            shared: Rc::new(Shared {
                scheduler,
                sink,
                run: RefCell::new(Run {
                    rng,
                    state: ScrambleState::Idle,
                    generation: 0,
                    pending: None,
                    resolve: None,
                }),
            }),
        }
    }

    pub fn sink(&self) -> &S {
        &self.shared.sink
    }

    pub fn is_animating(&self) -> bool {
        self.shared.run.borrow().state.is_scrambling()
    }

    /// Starts scrambling from the currently displayed text to `target`.
    ///
    /// Any transition still in flight is cancelled and its [`Transition`]
    /// resolves as [`Outcome::Superseded`]. The first frame renders before
    /// this returns. If the scheduler refuses a frame, the target text is
    /// rendered at once and the transition settles.
    pub fn set_text(&self, target: &str) -> Transition {
        let source = self.shared.sink.current_text();
        let (resolve, done) = oneshot::channel();
        let generation = {
            let mut run = self.shared.run.borrow_mut();
            if let Some(handle) = run.pending.take() {
                self.shared.scheduler.cancel_frame(handle);
            }
            let run = &mut *run;
            run.generation += 1;
            run.state = ScrambleState::Scrambling(ScrambleJob::new(&source, target, &mut run.rng));
            run.resolve = Some(resolve);
            run.generation
        };
        Self::update(&self.shared, generation);
        Transition { done }
    }

    fn update(shared: &Rc<Shared<K, S, R>>, generation: u64) {
        let (frame, settled) = {
            let mut run = shared.run.borrow_mut();
            // stale callback from a replaced transition
            if run.generation != generation {
                return;
            }
            run.pending = None;
            let run = &mut *run;
            let frame = run.state.advance(&mut run.rng);
            (frame, !run.state.is_scrambling())
        };
        if let Some(frame) = frame {
            shared.sink.render(frame);
        }

        let mut run = shared.run.borrow_mut();
        if run.generation != generation {
            return;
        }
        if settled {
            if let Some(resolve) = run.resolve.take() {
                let _ = resolve.send(());
            }
            return;
        }
        let weak = Rc::downgrade(shared);
        let handle = shared.scheduler.request_frame(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                Self::update(&shared, generation);
            }
        }));
        if handle.is_some() {
            run.pending = handle;
            return;
        }

        // no more frames from the host: jump straight to the target
        let target = match mem::replace(&mut run.state, ScrambleState::Settled) {
            ScrambleState::Scrambling(job) => job.target().to_string(),
            _ => String::new(),
        };
        let resolve = run.resolve.take();
        drop(run);
        shared.sink.render(Frame::from_text(&target));
        if let Some(resolve) = resolve {
            let _ = resolve.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::VecDeque};

    use futures::FutureExt;
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;

    type Callback = Box<dyn FnOnce()>;

    /// Scheduler that only advances when the test asks it to.
    #[derive(Clone)]
    struct ManualScheduler {
        queue: Rc<RefCell<VecDeque<(usize, Callback)>>>,
        next_id: Rc<Cell<usize>>,
        honor_cancel: bool,
    }

    impl ManualScheduler {
        fn new(honor_cancel: bool) -> Self {
            Self {
                queue: Rc::default(),
                next_id: Rc::default(),
                honor_cancel,
            }
        }

        fn pending(&self) -> usize {
            self.queue.borrow().len()
        }

        fn run_frame(&self) -> bool {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some((_, callback)) => {
                    callback();
                    true
                }
                None => false,
            }
        }

        fn run_all(&self) -> usize {
            let mut ran = 0;
            while self.run_frame() {
                ran += 1;
                assert!(ran <= 200, "frame loop should terminate");
            }
            ran
        }
    }

    impl FrameScheduler for ManualScheduler {
        type Handle = usize;

        fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Option<usize> {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            self.queue.borrow_mut().push_back((id, callback));
            Some(id)
        }

        fn cancel_frame(&self, handle: usize) {
            if self.honor_cancel {
                self.queue.borrow_mut().retain(|(id, _)| *id != handle);
            }
        }
    }

    /// Sink that records every rendered frame.
    #[derive(Clone, Default)]
    struct Recorder {
        initial: String,
        frames: Rc<RefCell<Vec<Frame>>>,
    }

    impl Recorder {
        fn showing(text: &str) -> Self {
            Self {
                initial: text.to_string(),
                ..Default::default()
            }
        }

        fn rendered(&self) -> usize {
            self.frames.borrow().len()
        }

        fn text(&self) -> String {
            self.current_text()
        }
    }

    impl TextSink for Recorder {
        fn current_text(&self) -> String {
            self.frames
                .borrow()
                .last()
                .map(Frame::text)
                .unwrap_or_else(|| self.initial.clone())
        }

        fn render(&self, frame: Frame) {
            self.frames.borrow_mut().push(frame);
        }
    }

    fn scrambler(
        scheduler: &ManualScheduler,
        sink: &Recorder,
        seed: u64,
    ) -> Scrambler<ManualScheduler, Recorder, SmallRng> {
        Scrambler::new(scheduler.clone(), sink.clone(), SmallRng::seed_from_u64(seed))
    }

    #[test]
    fn test_scrambles_into_target() {
        let scheduler = ManualScheduler::new(true);
        let sink = Recorder::showing("");
        let scrambler = scrambler(&scheduler, &sink, 10);

        let mut transition = scrambler.set_text("HELLO");
        // first frame is rendered synchronously
        assert_eq!(sink.rendered(), 1);
        assert!(scrambler.is_animating());
        assert_eq!((&mut transition).now_or_never(), None);

        let ran = scheduler.run_all();
        assert!(ran < 80);
        assert_eq!(sink.text(), "HELLO");
        assert!(!scrambler.is_animating());
        assert_eq!(transition.now_or_never(), Some(Outcome::Settled));
    }

    #[test]
    fn test_shrinks_to_shorter_target() {
        let scheduler = ManualScheduler::new(true);
        let sink = Recorder::showing("ABCDE");
        let scrambler = scrambler(&scheduler, &sink, 11);

        let transition = scrambler.set_text("AB");
        scheduler.run_all();
        assert_eq!(sink.text(), "AB");
        assert_eq!(transition.now_or_never(), Some(Outcome::Settled));
    }

    #[test]
    fn test_new_transition_cancels_pending_frame() {
        let scheduler = ManualScheduler::new(true);
        let sink = Recorder::showing("portfolio");
        let scrambler = scrambler(&scheduler, &sink, 12);

        let first = scrambler.set_text("first target");
        scheduler.run_frame();
        scheduler.run_frame();
        assert_eq!(scheduler.pending(), 1);

        let second = scrambler.set_text("second");
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(first.now_or_never(), Some(Outcome::Superseded));

        scheduler.run_all();
        assert_eq!(sink.text(), "second");
        assert_eq!(second.now_or_never(), Some(Outcome::Settled));
    }

    #[test]
    fn test_stale_frames_never_render() {
        // the host failed to cancel, so the stale callback still fires
        let scheduler = ManualScheduler::new(false);
        let sink = Recorder::showing("");
        let scrambler = scrambler(&scheduler, &sink, 13);

        let _first = scrambler.set_text("stale text that keeps going");
        scheduler.run_frame();
        let second = scrambler.set_text("fresh");
        assert_eq!(scheduler.pending(), 2);

        let before = sink.rendered();
        scheduler.run_frame();
        assert_eq!(sink.rendered(), before, "stale frame was rendered");

        scheduler.run_all();
        assert_eq!(sink.text(), "fresh");
        assert_eq!(second.now_or_never(), Some(Outcome::Settled));
    }

    #[test]
    fn test_instant_windows_settle_on_first_frame() {
        struct Instant;

        impl RandomSource for Instant {
            fn below(&mut self, _bound: u32) -> u32 {
                0
            }

            fn chance(&mut self, _p: f64) -> bool {
                false
            }
        }

        let scheduler = ManualScheduler::new(true);
        let sink = Recorder::showing("ab");
        let scrambler = Scrambler::new(scheduler.clone(), sink.clone(), Instant);

        let transition = scrambler.set_text("xyz");
        assert_eq!(sink.text(), "xyz");
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(transition.now_or_never(), Some(Outcome::Settled));
    }

    #[test]
    fn test_dropped_scrambler_abandons_transition() {
        let scheduler = ManualScheduler::new(true);
        let sink = Recorder::showing("");
        let transition = scrambler(&scheduler, &sink, 14).set_text("gone");
        let rendered = sink.rendered();

        scheduler.run_all();
        assert_eq!(sink.rendered(), rendered);
        assert_eq!(transition.now_or_never(), Some(Outcome::Superseded));
    }

    #[test]
    fn test_identical_text_runs_full_sequence() {
        let scheduler = ManualScheduler::new(true);
        let sink = Recorder::showing("same");
        let scrambler = scrambler(&scheduler, &sink, 15);

        let transition = scrambler.set_text("same");
        scheduler.run_all();
        assert!(sink.rendered() > 1);
        assert_eq!(sink.text(), "same");
        assert_eq!(transition.now_or_never(), Some(Outcome::Settled));
    }

    struct RefusingScheduler;

    impl FrameScheduler for RefusingScheduler {
        type Handle = ();

        fn request_frame(&self, _callback: Box<dyn FnOnce()>) -> Option<()> {
            None
        }

        fn cancel_frame(&self, _handle: ()) {}
    }

    #[test]
    fn test_refused_frame_snaps_to_target() {
        let sink = Recorder::showing("");
        let scrambler = Scrambler::new(RefusingScheduler, sink.clone(), SmallRng::seed_from_u64(16));

        let transition = scrambler.set_text("HELLO WORLD");
        assert!(!scrambler.is_animating());
        assert_eq!(sink.rendered(), 2);
        assert_eq!(sink.text(), "HELLO WORLD");
        assert_eq!(transition.now_or_never(), Some(Outcome::Settled));

        // the scrambler stays usable afterwards
        let next = scrambler.set_text("bye");
        assert_eq!(sink.text(), "bye");
        assert_eq!(next.now_or_never(), Some(Outcome::Settled));
    }
}
