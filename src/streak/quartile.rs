use tracing::trace;

/// Colours from no activity to the busiest days.
pub const DEFAULT_COLORS: [&str; 5] = ["#eeeeee", "#d6e685", "#8cc665", "#44a340", "#1e6823"];

/// `[0, Q1, Q2, Q3, max]`, non-decreasing when built from sorted scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuartileBoundaries(pub [u32; 5]);

impl QuartileBoundaries {
    /// Severity level in `0..=4`: how many boundaries lie strictly below `score`.
    ///
    /// Zero always lands in level 0 because the first boundary is 0. Scores above
    /// `max` are held at the top level.
    pub fn classify(&self, score: u32) -> usize {
        self.0
            .iter()
            .filter(|&&q| score > q)
            .count()
            .min(self.0.len() - 1)
    }
}

/// Computes quartile boundaries from per-day scores.
///
/// The scores must already be sorted ascending. Medians are taken positionally
/// (the element at `len / 2`), Q1 from the elements before Q2 and Q3 from the
/// elements after it. Nothing is re-sorted here.
///
/// Returns `None` for an empty slice.
///
/// # Panics
///
/// Panics if `scores` is not sorted ascending.
pub fn quartile_boundaries(scores: &[u32]) -> Option<QuartileBoundaries> {
    assert!(
        scores.windows(2).all(|w| w[0] <= w[1]),
        "quartile scores must be sorted ascending: {scores:?}"
    );

    let boundaries = match scores {
        [] => return None,
        [s] => [0, *s, *s, *s, *s],
        [s0, s1] => [0, *s0, *s1, *s1, *s1],
        _ => {
            let (q2_index, q2) = median(scores);
            let (_, q1) = median(&scores[..q2_index]);
            let (_, q3) = median(&scores[q2_index + 1..]);
            let max = scores.iter().copied().max().unwrap_or(q3);
            [0, q1, q2, q3, max]
        }
    };
    trace!(?boundaries, "quartile boundaries");
    Some(QuartileBoundaries(boundaries))
}

fn median(scores: &[u32]) -> (usize, u32) {
    let index = scores.len() / 2;
    (index, scores[index])
}

/// Five colours indexed by [`QuartileBoundaries::classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [&'static str; 5],
}

impl Palette {
    pub fn new(colors: [&'static str; 5]) -> Self {
        Self { colors }
    }

    pub fn color(&self, level: usize) -> &'static str {
        self.colors[level.min(self.colors.len() - 1)]
    }

    /// Colour for `score`. Without boundaries (no stats at all) every score is level 0.
    pub fn fill(&self, boundaries: Option<&QuartileBoundaries>, score: u32) -> &'static str {
        self.color(boundaries.map_or(0, |b| b.classify(score)))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS)
    }
}
