//! Simulation parameters sent with each request.

use serde::{Deserialize, Serialize};

/// One tunable model parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Key sent to the backend
    pub name: String,
    /// Display label
    pub label: String,
    /// Display unit
    #[serde(default)]
    pub unit: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Parameter {
    pub fn new(name: &str, label: &str, unit: &str, value: f64, min: f64, max: f64, step: f64) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            unit: unit.to_string(),
            value,
            min,
            max,
            step,
        }
    }

    /// Move the value by `steps` increments, staying within bounds.
    pub fn nudge(&mut self, steps: i32) {
        let next = self.value + self.step * steps as f64;
        // Round to the step grid to avoid float drift from repeated nudges
        let snapped = if self.step > 0.0 {
            ((next - self.min) / self.step).round() * self.step + self.min
        } else {
            next
        };
        self.value = snapped.clamp(self.min.min(self.max), self.max.max(self.min));
    }

    /// Set the value directly. Non-finite values are ignored.
    pub fn set(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.value = value;
        true
    }

    /// Position of the value within `[min, max]`, for slider rendering.
    pub fn ratio(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 1.0;
        }
        ((self.value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Ordered set of parameters for the loaded model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameters {
    items: Vec<Parameter>,
}

impl Parameters {
    pub fn new(items: Vec<Parameter>) -> Self {
        Self { items }
    }

    /// Mass and stiffness of the mass-spring-damper model.
    pub fn mass_spring_defaults() -> Vec<Parameter> {
        vec![
            Parameter::new("mass", "Mass", "kg", 1.0, 0.1, 10.0, 0.1),
            Parameter::new("stiffness", "Stiffness", "N/m", 100.0, 0.0, 1000.0, 5.0),
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.items.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Parameter> {
        self.items.get_mut(index)
    }

    /// Set a named value. Returns false for unknown names.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        self.items
            .iter_mut()
            .find(|p| p.name == name)
            .map(|p| p.set(value))
            .unwrap_or(false)
    }

    /// The JSON object sent as the `parameters` form field.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .items
            .iter()
            .map(|p| (p.name.clone(), serde_json::Value::from(p.value)))
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Parse a `name=value` override from the command line.
pub fn parse_override(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{}'", raw));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", value));
    }
    Ok((name.to_string(), value))
}
