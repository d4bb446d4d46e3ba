//! Smooth scrolling over an abstract viewport.
//!
//! The shell owns exactly one [`ScrollController`] for the lifetime of a
//! mounted page and feeds it animation frames through [`ScrollController::advance`].
//! When smooth scrolling is unavailable the controller jumps straight to the
//! target, so callers reach the same position either way.

use std::time::Duration;

/// Duration used by navigation links and fragment scrolls.
pub const LINK_SCROLL_DURATION: Duration = Duration::from_millis(1500);
/// Duration used when a caller has no preference.
pub const DEFAULT_SCROLL_DURATION: Duration = Duration::from_millis(1200);
/// Extra offset for the contact section so a bit of the previous section shows.
pub const CONTACT_SCROLL_OFFSET: f64 = -30.0;

/// Exponential ease-out: fast start, long deceleration.
pub fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        return 1.0;
    }
    (1.001 - 2f64.powf(-10.0 * t.max(0.0))).min(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOptions {
    pub duration: Duration,
    pub offset: f64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            duration: DEFAULT_SCROLL_DURATION,
            offset: 0.0,
        }
    }
}

impl ScrollOptions {
    /// Options used for in-page links to `selector`.
    pub fn for_link(selector: &str) -> Self {
        let offset = if selector == "#contact" {
            CONTACT_SCROLL_OFFSET
        } else {
            0.0
        };
        Self {
            duration: LINK_SCROLL_DURATION,
            offset,
        }
    }
}

/// The scrollable document as seen by the controller.
pub trait Viewport {
    fn scroll_offset(&self) -> f64;
    fn set_scroll_offset(&mut self, offset: f64);
    /// Document-relative top of the element matching `selector`.
    fn element_top(&self, selector: &str) -> Option<f64>;
    fn max_scroll_offset(&self) -> f64;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScrollError {
    #[error("no element matches {selector}")]
    ElementNotFound { selector: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn position(&self) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_out_expo(t)
    }

    fn advance(&mut self, dt: Duration) -> f64 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.position()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollMode {
    Smooth,
    Native,
}

pub struct ScrollController<V: Viewport> {
    viewport: V,
    mode: ScrollMode,
    animation: Option<ScrollAnimation>,
}

impl<V: Viewport> ScrollController<V> {
    /// Controller with the animation engine available.
    pub fn smooth(viewport: V) -> Self {
        Self {
            viewport,
            mode: ScrollMode::Smooth,
            animation: None,
        }
    }

    /// Controller without an animation engine: every scroll is a jump.
    pub fn native(viewport: V) -> Self {
        Self {
            viewport,
            mode: ScrollMode::Native,
            animation: None,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Scrolls so the element's top sits at the viewport top plus `offset`.
    ///
    /// Returns the clamped target offset.
    pub fn scroll_to_element(
        &mut self,
        selector: &str,
        options: ScrollOptions,
    ) -> Result<f64, ScrollError> {
        let top = self
            .viewport
            .element_top(selector)
            .ok_or_else(|| ScrollError::ElementNotFound {
                selector: selector.to_string(),
            })?;
        Ok(self.scroll_to(top + options.offset, options.duration))
    }

    pub fn scroll_to_top(&mut self, duration: Duration) -> f64 {
        self.scroll_to(0.0, duration)
    }

    /// Moves to `offset` immediately, dropping any running animation.
    pub fn jump_to(&mut self, offset: f64) -> f64 {
        self.animation = None;
        let target = self.clamp(offset);
        self.viewport.set_scroll_offset(target);
        target
    }

    /// Steps the running animation by `dt`; returns the new offset if one ran.
    pub fn advance(&mut self, dt: Duration) -> Option<f64> {
        let animation = self.animation.as_mut()?;
        let position = animation.advance(dt);
        let finished = animation.is_finished();
        self.viewport.set_scroll_offset(position);
        if finished {
            self.animation = None;
        }
        Some(position)
    }

    fn scroll_to(&mut self, offset: f64, duration: Duration) -> f64 {
        let target = self.clamp(offset);
        match self.mode {
            ScrollMode::Native => self.jump_to(target),
            ScrollMode::Smooth if duration.is_zero() => self.jump_to(target),
            ScrollMode::Smooth => {
                let from = self.viewport.scroll_offset();
                self.animation = Some(ScrollAnimation::new(from, target, duration));
                target
            }
        }
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.viewport.max_scroll_offset().max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedViewport {
        offset: f64,
        max: f64,
    }

    impl Viewport for FixedViewport {
        fn scroll_offset(&self) -> f64 {
            self.offset
        }
        fn set_scroll_offset(&mut self, offset: f64) {
            self.offset = offset;
        }
        fn element_top(&self, selector: &str) -> Option<f64> {
            match selector {
                "#projects" => Some(1_000.0),
                "#contact" => Some(2_000.0),
                _ => None,
            }
        }
        fn max_scroll_offset(&self) -> f64 {
            self.max
        }
    }

    fn viewport() -> FixedViewport {
        FixedViewport {
            offset: 0.0,
            max: 5_000.0,
        }
    }

    #[test]
    fn easing_starts_fast_and_ends_at_one() {
        assert!(ease_out_expo(0.1) > 0.45);
        assert!(ease_out_expo(0.5) > 0.95);
        assert_eq!(ease_out_expo(1.0), 1.0);
        assert_eq!(ease_out_expo(3.0), 1.0);
    }

    #[test]
    fn smooth_scroll_reaches_target_after_duration() {
        let mut controller = ScrollController::smooth(viewport());
        let target = controller
            .scroll_to_element("#projects", ScrollOptions::for_link("#projects"))
            .unwrap();
        assert_eq!(target, 1_000.0);
        assert_eq!(controller.viewport().offset, 0.0);

        let mid = controller.advance(Duration::from_millis(450)).unwrap();
        assert!(mid > 800.0 && mid < 1_000.0, "mid = {mid}");
        assert!(controller.is_animating());

        controller.advance(Duration::from_secs(2));
        assert!(!controller.is_animating());
        assert_eq!(controller.viewport().offset, 1_000.0);
        assert_eq!(controller.advance(Duration::from_millis(16)), None);
    }

    #[test]
    fn native_mode_jumps_to_same_target() {
        let mut controller = ScrollController::native(viewport());
        let target = controller
            .scroll_to_element("#contact", ScrollOptions::for_link("#contact"))
            .unwrap();
        assert_eq!(target, 1_970.0);
        assert_eq!(controller.viewport().offset, 1_970.0);
        assert!(!controller.is_animating());
    }

    #[test]
    fn target_is_clamped_to_document() {
        let mut controller = ScrollController::native(FixedViewport {
            offset: 500.0,
            max: 1_500.0,
        });
        controller
            .scroll_to_element("#contact", ScrollOptions::default())
            .unwrap();
        assert_eq!(controller.viewport().offset, 1_500.0);
        controller.scroll_to_top(DEFAULT_SCROLL_DURATION);
        assert_eq!(controller.viewport().offset, 0.0);
    }

    #[test]
    fn unknown_selector_leaves_viewport_alone() {
        let mut controller = ScrollController::smooth(viewport());
        let err = controller
            .scroll_to_element("#nowhere", ScrollOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            ScrollError::ElementNotFound {
                selector: "#nowhere".into()
            }
        );
        assert!(!controller.is_animating());
    }

    #[test]
    fn new_command_restarts_from_current_position() {
        let mut controller = ScrollController::smooth(viewport());
        controller
            .scroll_to_element("#contact", ScrollOptions::default())
            .unwrap();
        let partway = controller.advance(Duration::from_millis(100)).unwrap();
        controller.scroll_to_top(Duration::from_millis(500));
        let next = controller.advance(Duration::from_millis(16)).unwrap();
        assert!(next < partway);
        controller.advance(Duration::from_secs(1));
        assert_eq!(controller.viewport().offset, 0.0);
    }
}
