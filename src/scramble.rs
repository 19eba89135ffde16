mod animator;
mod glyphs;

pub use animator::{FrameScheduler, Outcome, Scrambler, TextSink, Transition};
pub use glyphs::{RandomSource, GLYPHS, REROLL_PROBABILITY, REVEAL_WINDOW};

use std::mem;

/// One character position of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub from: Option<char>,
    pub to: Option<char>,
    pub reveal_start: u32,
    pub reveal_end: u32,
    glyph: Option<char>,
}

impl Cell {
    pub fn new(from: Option<char>, to: Option<char>, reveal_start: u32, span: u32) -> Self {
        Self {
            from,
            to,
            reveal_start,
            reveal_end: reveal_start.saturating_add(span),
            glyph: None,
        }
    }

    /// The glyph last drawn for this cell, if it has started scrambling.
    pub fn current_glyph(&self) -> Option<char> {
        self.glyph
    }

    pub fn is_settled(&self, frame_index: u32) -> bool {
        frame_index >= self.reveal_end
    }
}

/// A single in-flight transition from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrambleJob {
    source: String,
    target: String,
    cells: Vec<Cell>,
    frame_index: u32,
}

impl ScrambleJob {
    pub fn new<R: RandomSource + ?Sized>(source: &str, target: &str, rng: &mut R) -> Self {
        let from = source.chars().collect::<Vec<_>>();
        let to = target.chars().collect::<Vec<_>>();
        let length = from.len().max(to.len());
        let cells = (0..length)
            .map(|i| {
                let start = rng.reveal_offset();
                let span = rng.reveal_offset();
                Cell::new(from.get(i).copied(), to.get(i).copied(), start, span)
            })
            .collect();
        Self::with_cells(source, target, cells)
    }

    /// Builds a job from precomputed cells.
    pub fn with_cells(source: &str, target: &str, cells: Vec<Cell>) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            cells,
            frame_index: 0,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn is_settled(&self) -> bool {
        self.cells.iter().all(|c| c.is_settled(self.frame_index))
    }

    /// Composes the frame for the current `frame_index`, drawing glyphs for
    /// scrambling cells as needed.
    fn compose<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Frame {
        let frame_index = self.frame_index;
        let mut frame = Frame::default();
        for cell in self.cells.iter_mut() {
            if frame_index >= cell.reveal_end {
                frame.push_text(cell.to);
            } else if frame_index >= cell.reveal_start {
                let glyph = match cell.glyph {
                    Some(g) if !rng.chance(REROLL_PROBABILITY) => g,
                    _ => rng.glyph(),
                };
                cell.glyph = Some(glyph);
                frame.push_scrambled(glyph);
            } else {
                frame.push_text(cell.from);
            }
        }
        frame
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScrambleState {
    #[default]
    Idle,
    Scrambling(ScrambleJob),
    Settled,
}

impl ScrambleState {
    pub fn is_scrambling(&self) -> bool {
        matches!(self, Self::Scrambling(_))
    }

    /// In-place form of [`advance_frame`].
    pub fn advance<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Option<Frame> {
        let (next, frame) = advance_frame(mem::take(self), rng);
        *self = next;
        frame
    }
}

/// Runs one frame of the state machine.
///
/// A scrambling job renders its current frame; once every cell is settled
/// the state moves to `Settled`, otherwise the frame index advances. Idle and
/// settled states render nothing.
pub fn advance_frame<R: RandomSource + ?Sized>(
    state: ScrambleState,
    rng: &mut R,
) -> (ScrambleState, Option<Frame>) {
    match state {
        ScrambleState::Scrambling(mut job) => {
            let frame = job.compose(rng);
            if job.is_settled() {
                (ScrambleState::Settled, Some(frame))
            } else {
                job.frame_index += 1;
                (ScrambleState::Scrambling(job), Some(frame))
            }
        }
        other => (other, None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal characters, settled or not yet started.
    Text(String),
    /// A placeholder glyph of a scrambling cell.
    Scrambled(char),
}

/// Rendered output of one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    segments: Vec<Segment>,
}

impl Frame {
    pub fn from_text(text: &str) -> Self {
        let mut frame = Self::default();
        if !text.is_empty() {
            frame.segments.push(Segment::Text(text.to_string()));
        }
        frame
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The displayed text, as a reader of the element would see it.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(s) => out.push_str(s),
                Segment::Scrambled(c) => out.push(*c),
            }
        }
        out
    }

    fn push_text(&mut self, c: Option<char>) {
        let Some(c) = c else {
            return;
        };
        match self.segments.last_mut() {
            Some(Segment::Text(s)) => s.push(c),
            _ => self.segments.push(Segment::Text(c.to_string())),
        }
    }

    fn push_scrambled(&mut self, c: char) {
        self.segments.push(Segment::Scrambled(c));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    /// Deterministic source: never rerolls, always draws `#`.
    struct Fixed;

    impl RandomSource for Fixed {
        fn below(&mut self, _bound: u32) -> u32 {
            0
        }

        fn chance(&mut self, _p: f64) -> bool {
            false
        }

        fn glyph(&mut self) -> char {
            '#'
        }
    }

    fn run_to_completion(job: ScrambleJob, rng: &mut SmallRng) -> (Vec<Frame>, ScrambleState) {
        let mut state = ScrambleState::Scrambling(job);
        let mut frames = Vec::new();
        while state.is_scrambling() {
            frames.push(state.advance(rng).expect("scrambling state renders a frame"));
            assert!(frames.len() <= 80, "transition should settle within 80 frames");
        }
        (frames, state)
    }

    #[test]
    fn test_cell_window_saturates() {
        let cell = Cell::new(None, Some('a'), u32::MAX, 1);
        assert_eq!(cell.reveal_end, u32::MAX);
        assert!(!cell.is_settled(u32::MAX - 1));
        assert!(cell.is_settled(u32::MAX));
    }

    #[test]
    fn test_cell_count_is_longest_text() {
        let mut rng = SmallRng::seed_from_u64(1);
        for (a, b) in [("", "HELLO"), ("ABCDE", "AB"), ("same", "same"), ("", "")] {
            let job = ScrambleJob::new(a, b, &mut rng);
            assert_eq!(job.cells().len(), a.chars().count().max(b.chars().count()));
            assert_eq!(job.frame_index(), 0);
        }
    }

    #[test]
    fn test_reveal_windows_are_bounded() {
        let mut rng = SmallRng::seed_from_u64(2);
        let job = ScrambleJob::new("the quick brown fox", "jumps over the lazy dog", &mut rng);
        for cell in job.cells() {
            assert!(cell.reveal_start < REVEAL_WINDOW);
            assert!(cell.reveal_end >= cell.reveal_start);
            assert!(cell.reveal_end - cell.reveal_start < REVEAL_WINDOW);
            assert_eq!(cell.current_glyph(), None);
        }
    }

    #[test]
    fn test_hello_from_empty() {
        let mut rng = SmallRng::seed_from_u64(3);
        let job = ScrambleJob::new("", "HELLO", &mut rng);
        assert_eq!(job.cells().len(), 5);
        assert!(job.cells().iter().all(|c| c.from.is_none()));

        let (frames, state) = run_to_completion(job, &mut rng);
        assert_eq!(state, ScrambleState::Settled);
        assert!(frames.len() <= 79);
        assert_eq!(frames.last().map(Frame::text).as_deref(), Some("HELLO"));
    }

    #[test]
    fn test_shrinking_text_drops_trailing_cells() {
        let mut rng = SmallRng::seed_from_u64(4);
        let job = ScrambleJob::new("ABCDE", "AB", &mut rng);
        assert_eq!(job.cells().len(), 5);
        assert!(job.cells()[2..].iter().all(|c| c.to.is_none()));

        let (frames, _) = run_to_completion(job, &mut rng);
        assert_eq!(frames.last().map(Frame::text).as_deref(), Some("AB"));
    }

    #[test]
    fn test_cells_follow_their_windows() {
        let mut rng = SmallRng::seed_from_u64(5);
        let job = ScrambleJob::new("source text", "target words!", &mut rng);
        let cells = job.cells().to_vec();
        let mut state = ScrambleState::Scrambling(job);
        let mut frame_index = 0;
        while state.is_scrambling() {
            let frame = state.advance(&mut rng).expect("frame");
            let text = frame.text().chars().collect::<Vec<_>>();
            let mut pos = 0;
            for cell in &cells {
                let rendered = if frame_index >= cell.reveal_end {
                    cell.to
                } else if frame_index >= cell.reveal_start {
                    let c = text[pos];
                    assert!(GLYPHS.contains(&c));
                    Some(c)
                } else {
                    cell.from
                };
                if let Some(c) = rendered {
                    assert_eq!(text[pos], c, "cell window mismatch at frame {frame_index}");
                    pos += 1;
                }
            }
            assert_eq!(pos, text.len());
            frame_index += 1;
        }
    }

    #[test]
    fn test_settled_cells_never_revert() {
        let cells = vec![
            Cell::new(Some('a'), Some('x'), 0, 2),
            Cell::new(Some('b'), Some('y'), 3, 0),
            Cell::new(Some('c'), Some('z'), 5, 1),
        ];
        let job = ScrambleJob::with_cells("abc", "xyz", cells);
        let mut state = ScrambleState::Scrambling(job);
        let texts = std::iter::from_fn(|| state.advance(&mut Fixed).map(|f| f.text()))
            .collect::<Vec<_>>();
        assert_eq!(
            texts,
            vec!["#bc", "#bc", "xbc", "xyc", "xyc", "xy#", "xyz"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
        assert_eq!(state, ScrambleState::Settled);
    }

    #[test]
    fn test_identity_transition_still_scrambles() {
        let cells = vec![Cell::new(Some('a'), Some('a'), 0, 3)];
        let mut state = ScrambleState::Scrambling(ScrambleJob::with_cells("a", "a", cells));
        let first = state.advance(&mut Fixed).expect("frame");
        assert_eq!(first.segments(), &[Segment::Scrambled('#')]);

        let mut rng = SmallRng::seed_from_u64(6);
        let (frames, _) = run_to_completion(ScrambleJob::new("abc", "abc", &mut rng), &mut rng);
        assert_eq!(frames.last().map(Frame::text).as_deref(), Some("abc"));
    }

    #[test]
    fn test_glyph_is_kept_without_reroll() {
        let cells = vec![Cell::new(None, Some('z'), 0, 4)];
        let mut state = ScrambleState::Scrambling(ScrambleJob::with_cells("", "z", cells));
        state.advance(&mut Fixed);
        let ScrambleState::Scrambling(job) = &state else {
            panic!("job should still be scrambling");
        };
        assert_eq!(job.cells()[0].current_glyph(), Some('#'));
        assert_eq!(job.frame_index(), 1);
    }

    #[test]
    fn test_idle_and_settled_render_nothing() {
        assert_eq!(advance_frame(ScrambleState::Idle, &mut Fixed), (ScrambleState::Idle, None));
        assert_eq!(
            advance_frame(ScrambleState::Settled, &mut Fixed),
            (ScrambleState::Settled, None)
        );
    }

    #[test]
    fn test_empty_to_empty_settles_immediately() {
        let state = ScrambleState::Scrambling(ScrambleJob::with_cells("", "", Vec::new()));
        let (state, frame) = advance_frame(state, &mut Fixed);
        assert_eq!(state, ScrambleState::Settled);
        assert_eq!(frame, Some(Frame::default()));
    }
}
