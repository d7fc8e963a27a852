/// Unit system used for every temperature a provider hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    /// Lenient parse: only `imperial` selects Fahrenheit, anything else is metric.
    pub fn from_tag(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("imperial") {
            Unit::Imperial
        } else {
            Unit::Metric
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a numeric temperature with one decimal place and the unit glyph, e.g. `18.0°C`.
pub fn format_temperature(value: f64, unit: Unit) -> String {
    format!("{value:.1}{}", unit.glyph())
}
