//! Scroll-linked scale and opacity for the hero and the tool cards.

use serde::Serialize;

/// Bounding box of an element relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub height: f64,
    /// Document scroll offset
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(height: f64, scroll_y: f64) -> Self {
        Self { height, scroll_y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Effect {
    pub scale: f64,
    pub opacity: f64,
}

impl Effect {
    pub const IDENTITY: Effect = Effect {
        scale: 1.0,
        opacity: 1.0,
    };

    /// Card state before the first measurement
    pub const CARD_INITIAL: Effect = Effect {
        scale: 0.9,
        opacity: 0.0,
    };
}

const HERO_SHRINK: f64 = 0.3;
const HERO_FADE_DISTANCE: f64 = 600.0;
const CARD_MIN_SCALE: f64 = 0.85;
const CARD_MAX_SCALE: f64 = 1.05;

/// Hero shrinks towards 0.7 as its centre leaves the viewport and fades out
/// over the first 600px of scroll.
pub fn hero_effect(rect: Rect, viewport: Viewport) -> Effect {
    if viewport.height <= 0.0 {
        return Effect::IDENTITY;
    }
    let progress = (1.0 - rect.center() / (viewport.height * 1.5)).clamp(0.0, 1.0);
    Effect {
        scale: 1.0 - progress * HERO_SHRINK,
        opacity: (1.0 - viewport.scroll_y / HERO_FADE_DISTANCE).clamp(0.0, 1.0),
    }
}

/// Cards peak at 1.05 when centred, fall to 0.85 when far away, and fade in
/// as they enter from the bottom.
pub fn card_effect(rect: Rect, viewport: Viewport) -> Effect {
    let vh = viewport.height;
    if vh <= 0.0 {
        return Effect::CARD_INITIAL;
    }

    let distance = (rect.center() - vh / 2.0).abs();
    let normalized = (distance / (vh * 0.8)).min(1.0);
    let scale = CARD_MIN_SCALE + (CARD_MAX_SCALE - CARD_MIN_SCALE) * (1.0 - normalized);

    let visible = (vh - rect.top.max(0.0)) / (vh * 0.6);

    Effect {
        scale: scale.clamp(CARD_MIN_SCALE, CARD_MAX_SCALE),
        opacity: visible.clamp(0.0, 1.0),
    }
}

/// Coalesces scroll events so effects are recomputed at most once per
/// animation frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    scheduled: bool,
    frames: u64,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scroll event. Returns `true` when the caller should schedule
    /// a frame callback.
    pub fn on_scroll(&mut self) -> bool {
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    /// Run the frame callback, if one is scheduled.
    pub fn on_frame<T>(&mut self, update: impl FnOnce() -> T) -> Option<T> {
        if !self.scheduled {
            return None;
        }
        let out = update();
        self.scheduled = false;
        self.frames += 1;
        Some(out)
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Frames actually rendered
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
