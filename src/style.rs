use std::fmt;

/// Angle unit carried by rotation-valued styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            AngleUnit::Degrees => "deg",
            AngleUnit::Radians => "rad",
        }
    }
}

/// The closed set of style channels a binding may emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleChannel {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
    ScaleX,
    ScaleY,
    Rotate,
    RotateX,
    RotateY,
    RotateZ,
    SkewX,
    SkewY,
}

/// A single computed style value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleValue {
    Number(f32),
    Angle(f32, AngleUnit),
}

impl StyleValue {
    /// Numeric magnitude, ignoring any unit
    pub fn magnitude(&self) -> f32 {
        match self {
            StyleValue::Number(v) => *v,
            StyleValue::Angle(v, _) => *v,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(v) => write!(f, "{v}"),
            StyleValue::Angle(v, unit) => write!(f, "{v}{}", unit.suffix()),
        }
    }
}

/// An ordered list of (channel, value) entries.
///
/// Later writers win on channel collision, which is what makes user override
/// hooks authoritative: they are merged after the binding's own output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: Vec<(StyleChannel, StyleValue)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a channel, replacing any existing entry in place
    pub fn set(&mut self, channel: StyleChannel, value: StyleValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == channel) {
            entry.1 = value;
        } else {
            self.entries.push((channel, value));
        }
    }

    /// Look up a channel's current value
    pub fn get(&self, channel: StyleChannel) -> Option<StyleValue> {
        self.entries
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, v)| *v)
    }

    /// Apply an ordered override list; later entries win
    pub fn merge(&mut self, overrides: impl IntoIterator<Item = (StyleChannel, StyleValue)>) {
        for (channel, value) in overrides {
            self.set(channel, value);
        }
    }

    pub fn entries(&self) -> &[(StyleChannel, StyleValue)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
