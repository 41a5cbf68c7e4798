use crate::direction::ScrollDirection;
use crate::sample::ScrollSample;

/// Accumulation state for the direction classifier.
///
/// `gesture_start_offset_y` anchors the window the cumulative delta is
/// measured against; it is re-anchored at every reversal point. Crate
/// internal, never published to consumers.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DirectionAnchor {
    pub previous_offset_y: f32,
    pub gesture_start_offset_y: f32,
}

impl DirectionAnchor {
    /// Forget the current gesture so the next sample starts a fresh one
    pub fn clear_gesture(&mut self) {
        self.gesture_start_offset_y = self.previous_offset_y;
    }
}

/// Result of one classification step
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ClassifyOutcome {
    pub direction: ScrollDirection,
    pub offset_y: f32,
    pub started_gesture: bool,
}

/// Advance the classifier by one sample.
///
/// Classification is asymmetric on purpose: any downward accumulation
/// reports "down" immediately, while flipping to "up" requires the
/// cumulative reverse movement to exceed `threshold`. Inside that hysteresis
/// band the previous direction (`current`) holds.
pub(crate) fn classify(
    sample: &ScrollSample,
    anchor: &mut DirectionAnchor,
    threshold: f32,
    was_scrolling: bool,
    current: ScrollDirection,
) -> ClassifyOutcome {
    let clamped = sample.clamped_offset();
    let delta = clamped - anchor.previous_offset_y;

    let started_gesture = !was_scrolling;
    if started_gesture {
        anchor.gesture_start_offset_y = clamped;
    }

    let mut total = clamped - anchor.gesture_start_offset_y;

    // A reversal re-anchors the accumulation window at the turn-around
    // point, which is the previous sample's offset. A gesture that just
    // started has no history to reverse against.
    if !started_gesture {
        let reversed = (total > 0.0 && delta < 0.0)
            || (total < 0.0 && delta > 0.0)
            || (total == 0.0 && delta != 0.0);
        if reversed {
            anchor.gesture_start_offset_y = anchor.previous_offset_y;
            total = clamped - anchor.gesture_start_offset_y;
        }
    }

    let direction = if total > 0.0 {
        ScrollDirection::Down
    } else if total < -threshold {
        ScrollDirection::Up
    } else {
        current
    };

    anchor.previous_offset_y = clamped;

    ClassifyOutcome {
        direction,
        offset_y: clamped,
        started_gesture,
    }
}
