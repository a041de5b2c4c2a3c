//! Control panel: labeled, range-checked controls over the parameter store.
//!
//! One control per exposed entry (the big-wave frequency vector gets one per
//! axis). The panel is the only range guard in the system: every edit made
//! through it is clamped to the entry's declared range before it is written.
//! Color controls step through a fixed swatch list and write through the store,
//! which fires its color observer.

use std::fmt;

use crate::params::{
    OceanParams, ParamError, ParamId, ParamRange, ParamValue, ParameterStore, Rgb,
    DEFAULT_DEPTH_COLOR, DEFAULT_SURFACE_COLOR,
};

/// Colors offered by the color controls, in cycling order
pub const COLOR_SWATCHES: [&str; 8] = [
    DEFAULT_DEPTH_COLOR,
    DEFAULT_SURFACE_COLOR,
    "#186691",
    "#9bd8ff",
    "#0b1e3f",
    "#2ec4b6",
    "#ffffff",
    "#000000",
];

/// What a control edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTarget {
    /// A float or integer entry
    Scalar(ParamId),
    /// One component of a vector entry
    Axis(ParamId, usize),
    /// A color entry
    Color(ParamId),
}

impl ControlTarget {
    pub fn param(self) -> ParamId {
        match self {
            ControlTarget::Scalar(id) | ControlTarget::Axis(id, _) | ControlTarget::Color(id) => id,
        }
    }
}

/// A registered control
#[derive(Debug, Clone)]
pub struct Control {
    pub label: &'static str,
    pub target: ControlTarget,
    pub range: Option<ParamRange>,
}

impl Control {
    fn new(label: &'static str, target: ControlTarget) -> Self {
        Self {
            label,
            target,
            range: target.param().range(),
        }
    }
}

/// Keyboard-driven control panel
pub struct ControlPanel {
    controls: Vec<Control>,
    selected: usize,
    defaults: OceanParams,
}

impl ControlPanel {
    /// Register every panel control; `defaults` are restored by [`ControlPanel::reset`]
    pub fn new(defaults: OceanParams) -> Self {
        use ControlTarget::*;

        let controls = vec![
            Control::new("big wave elevation", Scalar(ParamId::BigWaveElevation)),
            Control::new("big wave speed", Scalar(ParamId::BigWaveSpeed)),
            Control::new(
                "big wave frequency X axis",
                Axis(ParamId::BigWaveFrequency, 0),
            ),
            Control::new(
                "big wave frequency Z axis",
                Axis(ParamId::BigWaveFrequency, 1),
            ),
            Control::new("small wave elevation", Scalar(ParamId::SmallWaveElevation)),
            Control::new("small wave speed", Scalar(ParamId::SmallWaveSpeed)),
            Control::new("small wave frequency", Scalar(ParamId::SmallWaveFrequency)),
            Control::new(
                "small wave iterations",
                Scalar(ParamId::SmallWaveIterations),
            ),
            Control::new("depth color", Color(ParamId::DepthColor)),
            Control::new("surface color", Color(ParamId::SurfaceColor)),
            Control::new("color offset", Scalar(ParamId::ColorOffset)),
            Control::new("color multiplier", Scalar(ParamId::ColorMultiplier)),
        ];

        Self {
            controls,
            selected: 0,
            defaults,
        }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn selected(&self) -> &Control {
        &self.controls[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.controls.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + self.controls.len() - 1) % self.controls.len();
    }

    /// Move the selected control by `steps` increments and write the result
    pub fn nudge(&self, store: &mut ParameterStore, steps: i32) -> Result<ParamValue, ParamError> {
        let control = self.selected();
        let id = control.target.param();

        let value = match (control.target, store.get(id)) {
            (ControlTarget::Scalar(_), ParamValue::Float(v)) => {
                ParamValue::Float(step_float(v, steps, control.range))
            }
            (ControlTarget::Scalar(_), ParamValue::Int(v)) => {
                ParamValue::Int(step_int(v, steps, control.range))
            }
            (ControlTarget::Axis(_, axis), ParamValue::Vec2(mut v)) => {
                v[axis] = step_float(v[axis], steps, control.range);
                ParamValue::Vec2(v)
            }
            (ControlTarget::Color(_), ParamValue::Color(current)) => {
                let current = current.to_string();
                let len = COLOR_SWATCHES.len() as i64;
                let next = match COLOR_SWATCHES.iter().position(|&s| s == current) {
                    Some(i) => (i as i64 + steps as i64).rem_euclid(len) as usize,
                    None => 0,
                };
                ParamValue::Color(Rgb::from_hex(COLOR_SWATCHES[next])?)
            }
            (_, other) => {
                return Err(ParamError::KindMismatch {
                    id,
                    expected: id.kind(),
                    actual: other.kind(),
                })
            }
        };

        // Fires the color observer for color entries
        store.set(id, value)?;
        log::debug!("{} = {}", control.label, self.display_value(store));
        Ok(value)
    }

    /// Restore the selected control to its startup value
    pub fn reset(&self, store: &mut ParameterStore) -> Result<(), ParamError> {
        let control = self.selected();
        let id = control.target.param();
        let default = ParameterStore::new(self.defaults).get(id);

        match (control.target, store.get(id), default) {
            (ControlTarget::Axis(_, axis), ParamValue::Vec2(mut v), ParamValue::Vec2(d)) => {
                v[axis] = d[axis];
                store.set(id, ParamValue::Vec2(v))
            }
            _ => store.set(id, default),
        }
    }

    /// Current value of the selected control, formatted for display
    pub fn display_value(&self, store: &ParameterStore) -> String {
        let control = self.selected();
        match (control.target, store.get(control.target.param())) {
            (ControlTarget::Axis(_, axis), ParamValue::Vec2(v)) => format!("{:.2}", v[axis]),
            (_, value) => value.to_string(),
        }
    }

    /// One-line status: `[3/12] big wave frequency Z axis = 1.50`
    pub fn status(&self, store: &ParameterStore) -> String {
        format!(
            "[{}/{}] {} = {}",
            self.selected + 1,
            self.controls.len(),
            self.selected().label,
            self.display_value(store)
        )
    }
}

impl fmt::Debug for ControlPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlPanel")
            .field("controls", &self.controls.len())
            .field("selected", &self.selected().label)
            .finish()
    }
}

fn step_float(value: f32, steps: i32, range: Option<ParamRange>) -> f32 {
    match range {
        Some(r) => {
            // Snap to the step grid so repeated nudges do not accumulate drift
            let stepped = value + steps as f32 * r.step;
            r.clamp((stepped / r.step).round() * r.step)
        }
        None => value,
    }
}

fn step_int(value: u32, steps: i32, range: Option<ParamRange>) -> u32 {
    let stepped = (value as i64 + steps as i64).max(0);
    match range {
        Some(r) => stepped.clamp(r.min as i64, r.max as i64) as u32,
        None => stepped as u32,
    }
}
