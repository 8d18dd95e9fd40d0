//! Axis label and unit defaults
//!
//! Axes drawn against synthesized index coordinates are labelled `i`, `j` or `k`
//! without units. Axes with real coordinates default to geographic names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An axis label with optional units
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub label: String,
    pub units: String,
}

impl AxisLabel {
    pub fn new(label: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            units: units.into(),
        }
    }

    pub fn longitude() -> Self {
        Self::new("Longitude", "\u{00B0}E")
    }

    pub fn latitude() -> Self {
        Self::new("Latitude", "\u{00B0}N")
    }

    pub fn elevation() -> Self {
        Self::new("Elevation", "m")
    }

    /// Unitless index axis, e.g. `i`
    pub fn index(name: &str) -> Self {
        Self::new(name, "")
    }

    /// Replace the label and/or units where an override is given.
    pub fn with_overrides(mut self, label: Option<&str>, units: Option<&str>) -> Self {
        if let Some(label) = label {
            self.label = label.to_string();
        }
        if let Some(units) = units {
            self.units = units.to_string();
        }
        self
    }

    /// Nothing to draw
    pub fn is_empty(&self) -> bool {
        self.label.is_empty() && self.units.is_empty()
    }

    /// `"label [units]"`, or just `"label"` when there are no units
    pub fn text(&self) -> String {
        if self.units.is_empty() {
            self.label.clone()
        } else {
            format!("{} [{}]", self.label, self.units)
        }
    }
}

impl fmt::Display for AxisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Default (x, y) labels for a horizontal plot.
pub fn horizontal_labels(has_x: bool, has_y: bool) -> (AxisLabel, AxisLabel) {
    let x = if has_x { AxisLabel::longitude() } else { AxisLabel::index("i") };
    let y = if has_y { AxisLabel::latitude() } else { AxisLabel::index("j") };
    (x, y)
}

/// Default (y, z) labels for a vertical section.
pub fn section_labels(has_y: bool, has_z: bool) -> (AxisLabel, AxisLabel) {
    let y = if has_y { AxisLabel::latitude() } else { AxisLabel::index("j") };
    let z = if has_z { AxisLabel::elevation() } else { AxisLabel::index("k") };
    (y, z)
}
