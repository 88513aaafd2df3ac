//! Count-up animation for the statistics section.
//!
//! Each counter element carries its final value in `data-target`. The
//! displayed number climbs from 0 in equal increments, one per tick, and the
//! tick that reaches the target shows the target exactly.

use web_sys::Element;

use crate::config::CounterTiming;
use crate::timing::{TickControl, Ticker};

pub const TARGET_ATTR: &str = "data-target";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    Idle,
    Animating,
    Settled,
}

#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
    state: CounterState,
}

impl CounterAnimation {
    pub fn new(target: i64, timing: CounterTiming) -> Self {
        let steps = timing.duration_ms as f64 / timing.tick_ms.max(1) as f64;
        Self {
            target,
            increment: target as f64 / steps,
            current: 0.0,
            state: CounterState::Idle,
        }
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    /// Advances one tick and returns the value to display, or `None` once
    /// the animation has settled. Targets at or below zero settle on the
    /// first tick.
    pub fn tick(&mut self) -> Option<i64> {
        if self.state == CounterState::Settled {
            return None;
        }
        self.current += self.increment;
        if self.current >= self.target as f64 {
            self.state = CounterState::Settled;
            Some(self.target)
        } else {
            self.state = CounterState::Animating;
            Some(self.current.floor() as i64)
        }
    }
}

/// Parses the leading integer of a `data-target` value, so `"1500+"` is 1500
/// and `"-5"` is -5.
pub fn parse_target(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Starts a count-up on `element`. Returns `None` when it has no usable target.
pub fn animate(element: Element, timing: CounterTiming) -> Option<Ticker> {
    let raw = element.get_attribute(TARGET_ATTR)?;
    let Some(target) = parse_target(&raw) else {
        log::warn!("counter has unusable {}={:?}", TARGET_ATTR, raw);
        return None;
    };

    let mut animation = CounterAnimation::new(target, timing);
    let ticker = Ticker::start(timing.tick_ms, move || {
        if !element.is_connected() {
            return TickControl::Stop;
        }
        match animation.tick() {
            Some(value) => {
                element.set_text_content(Some(&value.to_string()));
                if animation.state() == CounterState::Settled {
                    TickControl::Stop
                } else {
                    TickControl::Continue
                }
            }
            None => TickControl::Stop,
        }
    });
    Some(ticker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(target: i64) -> Vec<i64> {
        let mut animation = CounterAnimation::new(target, CounterTiming::default());
        std::iter::from_fn(|| animation.tick()).collect()
    }

    #[test]
    fn ends_exactly_on_target() {
        for target in [1, 7, 98, 1000, 12345] {
            let frames = run(target);
            assert_eq!(*frames.last().unwrap(), target);
            let before_last = frames[frames.len().saturating_sub(2)];
            if frames.len() > 1 {
                assert!(before_last < target, "target {target}: {before_last}");
            }
        }
    }

    #[test]
    fn display_never_decreases() {
        let frames = run(4321);
        assert!(frames.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn takes_duration_over_tick_steps() {
        // 2000ms / 16ms = 125 ticks with an increment of 8.
        let frames = run(1000);
        assert_eq!(frames.len(), 125);
        assert_eq!(frames[0], 8);
        assert_eq!(frames[123], 992);
    }

    #[test]
    fn zero_target_settles_immediately() {
        assert_eq!(run(0), vec![0]);
    }

    #[test]
    fn negative_target_is_shown_at_once() {
        assert_eq!(run(-5), vec![-5]);
        assert_eq!(run(-1200), vec![-1200]);
    }

    #[test]
    fn settled_animation_stays_settled() {
        let mut animation = CounterAnimation::new(3, CounterTiming { duration_ms: 16, tick_ms: 16 });
        assert_eq!(animation.state(), CounterState::Idle);
        assert_eq!(animation.tick(), Some(3));
        assert_eq!(animation.state(), CounterState::Settled);
        assert_eq!(animation.tick(), None);
    }

    #[test]
    fn parses_integer_prefix() {
        assert_eq!(parse_target("1500"), Some(1500));
        assert_eq!(parse_target(" 1500+"), Some(1500));
        assert_eq!(parse_target("98%"), Some(98));
        assert_eq!(parse_target("+12"), Some(12));
        assert_eq!(parse_target("-5"), Some(-5));
        assert_eq!(parse_target(" -40%"), Some(-40));
        assert_eq!(parse_target("-"), None);
        assert_eq!(parse_target("--5"), None);
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target(""), None);
    }
}
