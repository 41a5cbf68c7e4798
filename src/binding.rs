use crate::config::{MotionConfig, TranslateRange};
use crate::direction::{HideDirection, ScrollDirection};
use crate::easing;
use crate::interpolate::InterpolationSpec;
use crate::style::{AngleUnit, Style, StyleChannel, StyleValue};
use crate::tween::Tween;

/// How a direction-bound component leaves the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HideEffect {
    /// Translate only
    #[default]
    Slide,
    /// Translate with opacity and scale animated in lockstep
    SlideFadeScale,
}

/// Immutable configuration for one direction-bound component instance
#[derive(Clone)]
pub struct AnimationBindingConfig {
    /// Direction that hides the component
    pub hide_direction: HideDirection,
    /// Translation endpoints: `from` is visible, `to` is hidden
    pub translate_range: TranslateRange,
    /// Transition duration in milliseconds
    pub duration_ms: u32,
    /// Easing curve applied to the transition
    pub easing: fn(f32) -> f32,
    /// Hide effect variant
    pub effect: HideEffect,
    /// Routes on which the component stays visible regardless of direction
    pub pinned_routes: Vec<String>,
}

impl Default for AnimationBindingConfig {
    fn default() -> Self {
        Self {
            hide_direction: HideDirection::Down,
            translate_range: TranslateRange::default(),
            duration_ms: 300,
            easing: easing::ease_in_out_quad,
            effect: HideEffect::Slide,
            pinned_routes: Vec::new(),
        }
    }
}

impl AnimationBindingConfig {
    /// Derive a binding config from the scope configuration
    pub fn from_motion_config(config: &MotionConfig) -> Self {
        Self {
            hide_direction: config.hide_on,
            translate_range: config.translate_range,
            duration_ms: config.animation_duration_ms,
            ..Self::default()
        }
    }
}

/// Visibility states for direction-based bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

type DirectionOverrideFn = dyn Fn(ScrollDirection) -> Vec<(StyleChannel, StyleValue)> + Send + Sync;
type OffsetOverrideFn = dyn Fn(f32) -> Vec<(StyleChannel, StyleValue)> + Send + Sync;

/// Direction-driven show/hide binding.
///
/// Long-lived two-state machine: visible when the direction differs from the
/// configured hide direction, hidden when it matches, toggling indefinitely.
/// The caller forwards direction changes and ticks the transition with its
/// frame delta, then reads `style()` for the current output.
pub struct DirectionBinding {
    config: AnimationBindingConfig,
    visibility: Visibility,
    tween: Tween,
    route: Option<String>,
    last_direction: ScrollDirection,
    overrides: Option<Box<DirectionOverrideFn>>,
}

impl DirectionBinding {
    pub fn new(config: AnimationBindingConfig) -> Self {
        let visible_at = config.translate_range.from;
        Self {
            config,
            visibility: Visibility::Visible,
            tween: Tween::settled(visible_at),
            route: None,
            last_direction: ScrollDirection::Idle,
            overrides: None,
        }
    }

    /// Install a hook producing extra style entries from the direction.
    /// Merged last, so its entries win on channel collision.
    pub fn with_overrides(
        mut self,
        hook: impl Fn(ScrollDirection) -> Vec<(StyleChannel, StyleValue)> + Send + Sync + 'static,
    ) -> Self {
        self.overrides = Some(Box::new(hook));
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the current route pins the component visible
    pub fn is_pinned(&self) -> bool {
        self.route
            .as_ref()
            .is_some_and(|route| self.config.pinned_routes.iter().any(|p| p == route))
    }

    /// React to a direction change from the store
    pub fn on_direction(&mut self, direction: ScrollDirection) {
        self.last_direction = direction;
        let target = if !self.is_pinned() && self.config.hide_direction.matches(direction) {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
        self.transition_to(target);
    }

    /// Route/identity change: snap to visible immediately, regardless of the
    /// current direction
    pub fn set_route(&mut self, route: impl Into<String>) {
        let route = route.into();
        if self.route.as_deref() == Some(route.as_str()) {
            return;
        }
        self.route = Some(route);
        self.visibility = Visibility::Visible;
        self.tween.snap_to(self.config.translate_range.from);
    }

    /// Advance the transition by the frame delta
    pub fn tick(&mut self, dt_ms: u32) {
        self.tween.tick(dt_ms);
    }

    /// Current style output
    pub fn style(&self) -> Style {
        let mut style = Style::new();
        style.set(StyleChannel::TranslateY, StyleValue::Number(self.tween.value()));

        if self.config.effect == HideEffect::SlideFadeScale {
            let hidden = self.hidden_fraction();
            style.set(StyleChannel::Opacity, StyleValue::Number(1.0 - hidden));
            style.set(StyleChannel::Scale, StyleValue::Number(1.0 - 0.1 * hidden));
        }

        if let Some(hook) = &self.overrides {
            style.merge(hook(self.last_direction));
        }
        style
    }

    fn transition_to(&mut self, target: Visibility) {
        if self.visibility == target {
            return;
        }
        self.visibility = target;
        let end = match target {
            Visibility::Visible => self.config.translate_range.from,
            Visibility::Hidden => self.config.translate_range.to,
        };
        self.tween
            .retarget(end, self.config.duration_ms, self.config.easing);
    }

    /// Normalized progress toward hidden: 0 fully visible, 1 fully hidden
    fn hidden_fraction(&self) -> f32 {
        let TranslateRange { from, to } = self.config.translate_range;
        let span = to - from;
        if span == 0.0 {
            return match self.visibility {
                Visibility::Hidden => 1.0,
                Visibility::Visible => 0.0,
            };
        }
        ((self.tween.value() - from) / span).clamp(0.0, 1.0)
    }
}

/// Offset-driven style binding: one optional interpolation per channel,
/// evaluated against the raw clamped offset every sample
#[derive(Default)]
pub struct OffsetBinding {
    opacity: Option<InterpolationSpec>,
    translate_x: Option<InterpolationSpec>,
    translate_y: Option<InterpolationSpec>,
    scale: Option<InterpolationSpec>,
    scale_x: Option<InterpolationSpec>,
    scale_y: Option<InterpolationSpec>,
    rotate: Option<InterpolationSpec>,
    overrides: Option<Box<OffsetOverrideFn>>,
}

impl OffsetBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, spec: InterpolationSpec) -> Self {
        self.opacity = Some(spec);
        self
    }

    pub fn translate_x(mut self, spec: InterpolationSpec) -> Self {
        self.translate_x = Some(spec);
        self
    }

    pub fn translate_y(mut self, spec: InterpolationSpec) -> Self {
        self.translate_y = Some(spec);
        self
    }

    pub fn scale(mut self, spec: InterpolationSpec) -> Self {
        self.scale = Some(spec);
        self
    }

    pub fn scale_x(mut self, spec: InterpolationSpec) -> Self {
        self.scale_x = Some(spec);
        self
    }

    pub fn scale_y(mut self, spec: InterpolationSpec) -> Self {
        self.scale_y = Some(spec);
        self
    }

    pub fn rotate(mut self, spec: InterpolationSpec) -> Self {
        self.rotate = Some(spec);
        self
    }

    /// Install a hook producing extra style entries from the offset.
    /// Merged last, so its entries win on channel collision.
    pub fn with_overrides(
        mut self,
        hook: impl Fn(f32) -> Vec<(StyleChannel, StyleValue)> + Send + Sync + 'static,
    ) -> Self {
        self.overrides = Some(Box::new(hook));
        self
    }

    /// Evaluate every configured channel at the given offset
    pub fn style_at(&self, offset_y: f32) -> Style {
        let channels = [
            (StyleChannel::Opacity, &self.opacity),
            (StyleChannel::TranslateX, &self.translate_x),
            (StyleChannel::TranslateY, &self.translate_y),
            (StyleChannel::Scale, &self.scale),
            (StyleChannel::ScaleX, &self.scale_x),
            (StyleChannel::ScaleY, &self.scale_y),
            (StyleChannel::Rotate, &self.rotate),
        ];

        let mut style = Style::new();
        for (channel, spec) in channels {
            let Some(spec) = spec else { continue };
            let value = match (channel, spec.sample_value(offset_y)) {
                // A numeric rotate result is an angle in degrees
                (StyleChannel::Rotate, StyleValue::Number(v)) => {
                    StyleValue::Angle(v, AngleUnit::Degrees)
                }
                (_, value) => value,
            };
            style.set(channel, value);
        }

        if let Some(hook) = &self.overrides {
            style.merge(hook(offset_y));
        }
        style
    }
}
