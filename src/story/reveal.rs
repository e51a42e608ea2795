//! Typewriter reveal of scene text
//!
//! Progress is a closed form of elapsed time, so large or uneven frame deltas
//! reveal exactly as much text as many small ones. Character `k` (1-based)
//! appears at `delay + (k - 1) * interval`; the reveal completes one interval
//! after the last character.

use serde::{Deserialize, Serialize};

use crate::consts::{REVEAL_INITIAL_DELAY_MS, REVEAL_INTERVAL_MS};

/// Reveal timing in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealPacing {
    pub initial_delay_ms: f64,
    pub interval_ms: f64,
    /// Skip the animation entirely
    pub instant: bool,
}

impl Default for RevealPacing {
    fn default() -> Self {
        Self {
            initial_delay_ms: REVEAL_INITIAL_DELAY_MS,
            interval_ms: REVEAL_INTERVAL_MS,
            instant: false,
        }
    }
}

impl RevealPacing {
    pub fn instant() -> Self {
        Self {
            instant: true,
            ..Self::default()
        }
    }
}

/// Identifies one reveal run. A timer callback holding a stale handle is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevealHandle(u64);

impl RevealHandle {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl From<u64> for RevealHandle {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<RevealHandle> for u64 {
    fn from(handle: RevealHandle) -> Self {
        handle.0
    }
}

/// One in-flight reveal of a scene's text
#[derive(Debug, Clone)]
pub struct TextReveal {
    handle: RevealHandle,
    text: String,
    /// Byte offset after each char, for slicing on char boundaries
    boundaries: Vec<usize>,
    pacing: RevealPacing,
    elapsed_ms: f64,
    revealed: usize,
    complete: bool,
    cancelled: bool,
}

impl TextReveal {
    pub fn start(handle: RevealHandle, text: &str, pacing: RevealPacing) -> Self {
        let boundaries = text.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
        let mut reveal = Self {
            handle,
            text: text.to_string(),
            boundaries,
            pacing,
            elapsed_ms: 0.0,
            revealed: 0,
            complete: false,
            cancelled: false,
        };
        reveal.recompute();
        reveal
    }

    pub fn handle(&self) -> RevealHandle {
        self.handle
    }

    /// Advance the timer. Returns true if visible text or completion changed.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if self.cancelled || self.complete || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return false;
        }
        let before = (self.revealed, self.complete);
        self.elapsed_ms += dt_ms;
        self.recompute();
        before != (self.revealed, self.complete)
    }

    /// Stop for good; later ticks do nothing
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Show everything now
    pub fn finish(&mut self) {
        if !self.cancelled {
            self.revealed = self.char_count();
            self.complete = true;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Choices become selectable once this is true
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn visible_text(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.text[..self.boundaries[n - 1]],
        }
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    fn char_count(&self) -> usize {
        self.boundaries.len()
    }

    fn recompute(&mut self) {
        let len = self.char_count();
        if self.pacing.instant {
            self.revealed = len;
            self.complete = true;
            return;
        }
        if self.elapsed_ms < self.pacing.initial_delay_ms {
            return;
        }
        // Steps taken since the delay: step k reveals char k, step len + 1 completes
        let taken = if self.pacing.interval_ms > 0.0 {
            ((self.elapsed_ms - self.pacing.initial_delay_ms) / self.pacing.interval_ms).floor()
        } else {
            f64::INFINITY
        };
        // Clamp in f64 so huge elapsed times cannot overflow the cast
        let steps = if taken >= len as f64 {
            len + 1
        } else {
            taken as usize + 1
        };
        self.revealed = steps.min(len);
        self.complete = steps > len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(text: &str) -> TextReveal {
        TextReveal::start(RevealHandle(0), text, RevealPacing::default())
    }

    #[test]
    fn test_nothing_before_delay() {
        let mut reveal = start("Night");
        reveal.advance(499.0);
        assert_eq!(reveal.visible_text(), "");
        assert!(!reveal.is_complete());
    }

    #[test]
    fn test_one_char_per_interval() {
        let mut reveal = start("Night");
        reveal.advance(500.0);
        assert_eq!(reveal.visible_text(), "N");
        reveal.advance(30.0);
        assert_eq!(reveal.visible_text(), "Ni");
        reveal.advance(29.0);
        assert_eq!(reveal.visible_text(), "Ni");
        reveal.advance(1.0);
        assert_eq!(reveal.visible_text(), "Nig");
    }

    #[test]
    fn test_completes_one_interval_after_last_char() {
        let mut reveal = start("abc");
        // Last char at 500 + 2 * 30
        reveal.advance(560.0);
        assert_eq!(reveal.visible_text(), "abc");
        assert!(!reveal.is_complete());
        reveal.advance(30.0);
        assert!(reveal.is_complete());
    }

    #[test]
    fn test_large_step_matches_small_steps() {
        let mut coarse = start("The scent of chickens");
        let mut fine = start("The scent of chickens");
        coarse.advance(700.0);
        for _ in 0..70 {
            fine.advance(10.0);
        }
        assert_eq!(coarse.visible_text(), fine.visible_text());
    }

    #[test]
    fn test_multibyte_text() {
        let mut reveal = start("né★ok");
        reveal.advance(560.0);
        assert_eq!(reveal.visible_text(), "né★");
    }

    #[test]
    fn test_empty_text_completes_after_delay() {
        let mut reveal = start("");
        reveal.advance(499.0);
        assert!(!reveal.is_complete());
        reveal.advance(1.0);
        assert!(reveal.is_complete());
        assert_eq!(reveal.visible_text(), "");
    }

    #[test]
    fn test_cancel_stops_progress() {
        let mut reveal = start("abc");
        reveal.advance(500.0);
        reveal.cancel();
        assert!(!reveal.advance(1000.0));
        assert_eq!(reveal.visible_text(), "a");
        assert!(!reveal.is_complete());
    }

    #[test]
    fn test_non_finite_step_ignored() {
        let mut reveal = start("abc");
        assert!(!reveal.advance(f64::NAN));
        assert!(!reveal.advance(f64::INFINITY));
        assert_eq!(reveal.visible_text(), "");
        reveal.advance(600.0);
        assert!(reveal.is_complete());
        assert_eq!(reveal.visible_text(), "abc");
    }

    #[test]
    fn test_huge_step_completes() {
        let mut reveal = start("abc");
        assert!(reveal.advance(1e21));
        assert!(reveal.is_complete());
        assert_eq!(reveal.visible_text(), "abc");
    }

    #[test]
    fn test_instant_pacing() {
        let reveal = TextReveal::start(RevealHandle(0), "abc", RevealPacing::instant());
        assert!(reveal.is_complete());
        assert_eq!(reveal.visible_text(), "abc");
    }
}
