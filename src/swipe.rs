use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
}

impl SwipeDirection {
    pub fn label(self) -> &'static str {
        match self {
            SwipeDirection::Up => "swipe up",
            SwipeDirection::Down => "swipe down",
        }
    }
}

pub fn classify_swipe(start_y: i32, end_y: i32, threshold: i32) -> Option<SwipeDirection> {
    let diff = start_y - end_y;
    if diff.abs() <= threshold {
        return None;
    }
    if diff > 0 {
        Some(SwipeDirection::Up)
    } else {
        Some(SwipeDirection::Down)
    }
}

/// Remembers where the current touch began.
#[derive(Debug)]
pub struct SwipeTracker {
    start_y: Cell<i32>,
    threshold: i32,
}

impl SwipeTracker {
    pub fn new(threshold: i32) -> Self {
        Self {
            start_y: Cell::new(0),
            threshold,
        }
    }

    pub fn begin(&self, y: i32) {
        self.start_y.set(y);
    }

    pub fn finish(&self, y: i32) -> Option<SwipeDirection> {
        classify_swipe(self.start_y.get(), y, self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finger_moving_up_is_swipe_up() {
        assert_eq!(classify_swipe(400, 300, 50), Some(SwipeDirection::Up));
    }

    #[test]
    fn finger_moving_down_is_swipe_down() {
        assert_eq!(classify_swipe(300, 400, 50), Some(SwipeDirection::Down));
    }

    #[test]
    fn short_moves_are_ignored() {
        assert_eq!(classify_swipe(300, 350, 50), None);
        assert_eq!(classify_swipe(350, 300, 50), None);
        assert_eq!(classify_swipe(300, 300, 50), None);
    }

    #[test]
    fn tracker_uses_last_start() {
        let tracker = SwipeTracker::new(50);
        tracker.begin(100);
        tracker.begin(500);
        assert_eq!(tracker.finish(420), Some(SwipeDirection::Up));
        assert_eq!(tracker.finish(480), None);
    }
}
