use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use futures::channel::oneshot;
use leptos::{either::Either, prelude::*, task::spawn_local};
use rand::{rngs::SmallRng, SeedableRng};

use crate::scramble::{Frame, FrameScheduler, Outcome, Scrambler, Segment, TextSink};

const PHRASE_HOLD: Duration = Duration::from_millis(2400);

/// Schedules scramble frames on `requestAnimationFrame`.
pub struct RafScheduler;

impl FrameScheduler for RafScheduler {
    type Handle = AnimationFrameRequestHandle;

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Option<Self::Handle> {
        request_animation_frame_with_handle(callback)
            .map_err(|e| log::warn!("couldn't request animation frame: {e:?}"))
            .ok()
    }

    fn cancel_frame(&self, handle: Self::Handle) {
        handle.cancel();
    }
}

impl TextSink for RwSignal<Frame> {
    fn current_text(&self) -> String {
        self.try_with_untracked(Frame::text).unwrap_or_default()
    }

    fn render(&self, frame: Frame) {
        // the owning view may already be gone
        let _ = self.try_set(frame);
    }
}

fn seeded_rng() -> SmallRng {
    SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
}

async fn pause(duration: Duration) {
    let (tx, rx) = oneshot::channel();
    set_timeout(
        move || {
            let _ = tx.send(());
        },
        duration,
    );
    let _ = rx.await;
}

fn render_frame(frame: &Frame) -> impl IntoView {
    frame
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => Either::Left(text.clone()),
            Segment::Scrambled(c) => Either::Right(view! {
                <span class="scramble-char">{c.to_string()}</span>
            }),
        })
        .collect_view()
}

/// Cycles through `phrases`, scrambling from one to the next and holding
/// each settled phrase for `hold`.
#[component]
pub fn ScrambleText(
    phrases: Vec<String>,
    #[prop(default = PHRASE_HOLD)] hold: Duration,
) -> impl IntoView {
    let first = phrases.first().cloned().unwrap_or_default();
    let frame = RwSignal::new(Frame::from_text(&first));
    let label = RwSignal::new(first);
    let stopped = Arc::new(AtomicBool::new(false));
    on_cleanup({
        let stopped = Arc::clone(&stopped);
        move || stopped.store(true, Ordering::Relaxed)
    });

    Effect::new(move |_| {
        if phrases.len() < 2 {
            return;
        }
        let phrases = phrases.clone();
        let stopped = Arc::clone(&stopped);
        spawn_local(async move {
            let scrambler = Scrambler::new(RafScheduler, frame, seeded_rng());
            for phrase in phrases.iter().cycle().skip(1) {
                pause(hold).await;
                if stopped.load(Ordering::Relaxed) {
                    break;
                }
                label.set(phrase.clone());
                if scrambler.set_text(phrase).await == Outcome::Superseded {
                    log::debug!("scramble to {phrase:?} was superseded");
                    break;
                }
            }
        });
    });

    view! {
        <span class="scramble-text" aria-label=move || label.get()>
            {move || frame.with(render_frame)}
        </span>
    }
}
