//! Live-editable parameter store shared by the animation driver, the control
//! panel and the surface evaluators.
//!
//! Entries are addressed by [`ParamId`]. Numeric entries advertise a
//! [`ParamRange`] for the control panel; the store itself never validates
//! ranges. Color entries accept one observer each, invoked synchronously on
//! every write.

use std::fmt;

use thiserror::Error;

use super::{OceanParams, Rgb};

/// Errors raised by parameter access
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Parameter {id} expects a {expected} value, got {actual}")]
    KindMismatch {
        id: ParamId,
        expected: ParamKind,
        actual: ParamKind,
    },

    #[error("Invalid color {0:?} (expected #rrggbb)")]
    InvalidColor(String),

    #[error("Parameter {0} is not a color")]
    NotAColor(ParamId),
}

/// Every entry of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    ElapsedTime,
    BigWaveElevation,
    BigWaveFrequency,
    BigWaveSpeed,
    SmallWaveElevation,
    SmallWaveFrequency,
    SmallWaveSpeed,
    SmallWaveIterations,
    DepthColor,
    SurfaceColor,
    ColorOffset,
    ColorMultiplier,
}

impl ParamId {
    pub const ALL: [ParamId; 12] = [
        ParamId::ElapsedTime,
        ParamId::BigWaveElevation,
        ParamId::BigWaveFrequency,
        ParamId::BigWaveSpeed,
        ParamId::SmallWaveElevation,
        ParamId::SmallWaveFrequency,
        ParamId::SmallWaveSpeed,
        ParamId::SmallWaveIterations,
        ParamId::DepthColor,
        ParamId::SurfaceColor,
        ParamId::ColorOffset,
        ParamId::ColorMultiplier,
    ];

    /// Stable camelCase name
    pub fn name(self) -> &'static str {
        match self {
            ParamId::ElapsedTime => "elapsedTime",
            ParamId::BigWaveElevation => "bigWaveElevation",
            ParamId::BigWaveFrequency => "bigWaveFrequency",
            ParamId::BigWaveSpeed => "bigWaveSpeed",
            ParamId::SmallWaveElevation => "smallWaveElevation",
            ParamId::SmallWaveFrequency => "smallWaveFrequency",
            ParamId::SmallWaveSpeed => "smallWaveSpeed",
            ParamId::SmallWaveIterations => "smallWaveIterations",
            ParamId::DepthColor => "depthColor",
            ParamId::SurfaceColor => "surfaceColor",
            ParamId::ColorOffset => "colorOffset",
            ParamId::ColorMultiplier => "colorMultiplier",
        }
    }

    /// Look an entry up by its camelCase name
    pub fn from_name(name: &str) -> Result<Self, ParamError> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or_else(|| ParamError::UnknownParameter(name.to_string()))
    }

    /// Human-readable label shown in the control panel
    pub fn label(self) -> &'static str {
        match self {
            ParamId::ElapsedTime => "elapsed time",
            ParamId::BigWaveElevation => "big wave elevation",
            ParamId::BigWaveFrequency => "big wave frequency",
            ParamId::BigWaveSpeed => "big wave speed",
            ParamId::SmallWaveElevation => "small wave elevation",
            ParamId::SmallWaveFrequency => "small wave frequency",
            ParamId::SmallWaveSpeed => "small wave speed",
            ParamId::SmallWaveIterations => "small wave iterations",
            ParamId::DepthColor => "depth color",
            ParamId::SurfaceColor => "surface color",
            ParamId::ColorOffset => "color offset",
            ParamId::ColorMultiplier => "color multiplier",
        }
    }

    pub fn kind(self) -> ParamKind {
        match self {
            ParamId::BigWaveFrequency => ParamKind::Vec2,
            ParamId::SmallWaveIterations => ParamKind::Int,
            ParamId::DepthColor | ParamId::SurfaceColor => ParamKind::Color,
            _ => ParamKind::Float,
        }
    }

    /// Panel range for numeric entries (per component for vectors).
    ///
    /// `None` for colors and for `elapsedTime`, which only the driver writes.
    pub fn range(self) -> Option<ParamRange> {
        let range = match self {
            ParamId::ElapsedTime | ParamId::DepthColor | ParamId::SurfaceColor => return None,
            ParamId::BigWaveElevation | ParamId::SmallWaveElevation => {
                ParamRange::new(0.0, 1.0, 0.01)
            }
            ParamId::BigWaveFrequency | ParamId::SmallWaveFrequency => {
                ParamRange::new(0.0, 10.0, 0.01)
            }
            ParamId::BigWaveSpeed | ParamId::SmallWaveSpeed => ParamRange::new(0.0, 3.0, 0.01),
            ParamId::SmallWaveIterations => ParamRange::new(0.0, 5.0, 1.0),
            ParamId::ColorOffset => ParamRange::new(0.0, 2.0, 0.01),
            ParamId::ColorMultiplier => ParamRange::new(0.0, 5.0, 0.01),
        };
        Some(range)
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value shape of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Float,
    Vec2,
    Int,
    Color,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamKind::Float => "float",
            ParamKind::Vec2 => "vec2",
            ParamKind::Int => "integer",
            ParamKind::Color => "color",
        })
    }
}

/// A stored value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Vec2([f32; 2]),
    Int(u32),
    Color(Rgb),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Vec2(_) => ParamKind::Vec2,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Color(_) => ParamKind::Color,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{:.2}", v),
            ParamValue::Vec2([x, z]) => write!(f, "({:.2}, {:.2})", x, z),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Color(c) => write!(f, "{}", c),
        }
    }
}

/// Valid panel range for a numeric entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Observer invoked with the new color after each write to a color entry
pub type ColorObserver = Box<dyn FnMut(Rgb)>;

/// Named, live-editable parameters
pub struct ParameterStore {
    values: OceanParams,
    depth_color_observer: Option<ColorObserver>,
    surface_color_observer: Option<ColorObserver>,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(OceanParams::default())
    }
}

impl fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterStore")
            .field("values", &self.values)
            .field("depth_color_observer", &self.depth_color_observer.is_some())
            .field(
                "surface_color_observer",
                &self.surface_color_observer.is_some(),
            )
            .finish()
    }
}

impl ParameterStore {
    pub fn new(values: OceanParams) -> Self {
        Self {
            values,
            depth_color_observer: None,
            surface_color_observer: None,
        }
    }

    /// Copy of all current values, as read by the evaluators
    pub fn snapshot(&self) -> OceanParams {
        self.values
    }

    pub fn elapsed_time(&self) -> f32 {
        self.values.elapsed_time
    }

    pub fn get(&self, id: ParamId) -> ParamValue {
        let v = &self.values;
        match id {
            ParamId::ElapsedTime => ParamValue::Float(v.elapsed_time),
            ParamId::BigWaveElevation => ParamValue::Float(v.big_wave_elevation),
            ParamId::BigWaveFrequency => ParamValue::Vec2(v.big_wave_frequency),
            ParamId::BigWaveSpeed => ParamValue::Float(v.big_wave_speed),
            ParamId::SmallWaveElevation => ParamValue::Float(v.small_wave_elevation),
            ParamId::SmallWaveFrequency => ParamValue::Float(v.small_wave_frequency),
            ParamId::SmallWaveSpeed => ParamValue::Float(v.small_wave_speed),
            ParamId::SmallWaveIterations => ParamValue::Int(v.small_wave_iterations),
            ParamId::DepthColor => ParamValue::Color(v.depth_color),
            ParamId::SurfaceColor => ParamValue::Color(v.surface_color),
            ParamId::ColorOffset => ParamValue::Float(v.color_offset),
            ParamId::ColorMultiplier => ParamValue::Float(v.color_multiplier),
        }
    }

    /// Write an entry. Fails only when the value has the wrong shape.
    pub fn set(&mut self, id: ParamId, value: ParamValue) -> Result<(), ParamError> {
        let v = &mut self.values;
        match (id, value) {
            (ParamId::ElapsedTime, ParamValue::Float(x)) => v.elapsed_time = x,
            (ParamId::BigWaveElevation, ParamValue::Float(x)) => v.big_wave_elevation = x,
            (ParamId::BigWaveFrequency, ParamValue::Vec2(x)) => v.big_wave_frequency = x,
            (ParamId::BigWaveSpeed, ParamValue::Float(x)) => v.big_wave_speed = x,
            (ParamId::SmallWaveElevation, ParamValue::Float(x)) => v.small_wave_elevation = x,
            (ParamId::SmallWaveFrequency, ParamValue::Float(x)) => v.small_wave_frequency = x,
            (ParamId::SmallWaveSpeed, ParamValue::Float(x)) => v.small_wave_speed = x,
            (ParamId::SmallWaveIterations, ParamValue::Int(x)) => v.small_wave_iterations = x,
            (ParamId::DepthColor, ParamValue::Color(c)) => {
                v.depth_color = c;
                if let Some(observer) = self.depth_color_observer.as_mut() {
                    observer(c);
                }
            }
            (ParamId::SurfaceColor, ParamValue::Color(c)) => {
                v.surface_color = c;
                if let Some(observer) = self.surface_color_observer.as_mut() {
                    observer(c);
                }
            }
            (ParamId::ColorOffset, ParamValue::Float(x)) => v.color_offset = x,
            (ParamId::ColorMultiplier, ParamValue::Float(x)) => v.color_multiplier = x,
            (id, value) => {
                return Err(ParamError::KindMismatch {
                    id,
                    expected: id.kind(),
                    actual: value.kind(),
                })
            }
        }
        Ok(())
    }

    /// Write a scalar entry
    pub fn set_f32(&mut self, id: ParamId, value: f32) -> Result<(), ParamError> {
        self.set(id, ParamValue::Float(value))
    }

    /// Write a color entry (fires its observer)
    pub fn set_color(&mut self, id: ParamId, color: Rgb) -> Result<(), ParamError> {
        self.set(id, ParamValue::Color(color))
    }

    /// Write a color entry from `#rrggbb`, the panel's color format
    pub fn set_color_hex(&mut self, id: ParamId, hex: &str) -> Result<(), ParamError> {
        self.set_color(id, Rgb::from_hex(hex)?)
    }

    /// Driver-side clock update
    pub fn set_elapsed_time(&mut self, seconds: f32) {
        self.values.elapsed_time = seconds;
    }

    /// Register the observer for a color entry, replacing any previous one
    pub fn on_color_change<F>(&mut self, id: ParamId, observer: F) -> Result<(), ParamError>
    where
        F: FnMut(Rgb) + 'static,
    {
        let slot = match id {
            ParamId::DepthColor => &mut self.depth_color_observer,
            ParamId::SurfaceColor => &mut self.surface_color_observer,
            other => return Err(ParamError::NotAColor(other)),
        };
        *slot = Some(Box::new(observer));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_names_round_trip() {
        for id in ParamId::ALL {
            assert_eq!(ParamId::from_name(id.name()), Ok(id));
        }
        assert_eq!(
            ParamId::from_name("uTime"),
            Err(ParamError::UnknownParameter("uTime".to_string()))
        );
    }

    #[test]
    fn test_set_then_get() {
        let mut store = ParameterStore::default();
        store.set_f32(ParamId::BigWaveElevation, 0.42).unwrap();
        store
            .set(ParamId::BigWaveFrequency, ParamValue::Vec2([1.0, 2.0]))
            .unwrap();
        store
            .set(ParamId::SmallWaveIterations, ParamValue::Int(2))
            .unwrap();

        assert_eq!(store.get(ParamId::BigWaveElevation), ParamValue::Float(0.42));
        assert_eq!(
            store.get(ParamId::BigWaveFrequency),
            ParamValue::Vec2([1.0, 2.0])
        );
        assert_eq!(store.snapshot().small_wave_iterations, 2);
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let mut store = ParameterStore::default();
        let err = store
            .set(ParamId::SmallWaveIterations, ParamValue::Float(2.5))
            .unwrap_err();
        assert_eq!(
            err,
            ParamError::KindMismatch {
                id: ParamId::SmallWaveIterations,
                expected: ParamKind::Int,
                actual: ParamKind::Float,
            }
        );
        // Unchanged
        assert_eq!(store.snapshot().small_wave_iterations, 4);
    }

    #[test]
    fn test_store_does_not_validate_ranges() {
        let mut store = ParameterStore::default();
        store.set_f32(ParamId::ColorMultiplier, 50.0).unwrap();
        store.set_f32(ParamId::BigWaveSpeed, -2.0).unwrap();
        assert_eq!(store.snapshot().color_multiplier, 50.0);
        assert_eq!(store.snapshot().big_wave_speed, -2.0);
    }

    #[test]
    fn test_color_observer_fires_on_write() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = ParameterStore::default();

        let sink = Rc::clone(&seen);
        store
            .on_color_change(ParamId::DepthColor, move |c| sink.borrow_mut().push(c))
            .unwrap();

        store.set_color_hex(ParamId::DepthColor, "#000000").unwrap();
        // Other entries do not notify
        store.set_color_hex(ParamId::SurfaceColor, "#ffffff").unwrap();
        store.set_f32(ParamId::ColorOffset, 0.3).unwrap();

        assert_eq!(*seen.borrow(), vec![Rgb::new(0.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_color_observer_is_replaced() {
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        let mut store = ParameterStore::default();

        let a = Rc::clone(&first);
        store
            .on_color_change(ParamId::SurfaceColor, move |_| *a.borrow_mut() += 1)
            .unwrap();
        let b = Rc::clone(&second);
        store
            .on_color_change(ParamId::SurfaceColor, move |_| *b.borrow_mut() += 1)
            .unwrap();

        store.set_color_hex(ParamId::SurfaceColor, "#102030").unwrap();
        assert_eq!(*first.borrow(), 0);
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn test_observer_requires_color_entry() {
        let mut store = ParameterStore::default();
        assert_eq!(
            store.on_color_change(ParamId::ColorOffset, |_| {}),
            Err(ParamError::NotAColor(ParamId::ColorOffset))
        );
    }

    #[test]
    fn test_invalid_hex_leaves_color_untouched() {
        let mut store = ParameterStore::default();
        let before = store.snapshot().depth_color;
        assert!(store.set_color_hex(ParamId::DepthColor, "purple").is_err());
        assert_eq!(store.snapshot().depth_color, before);
    }

    #[test]
    fn test_ranges_cover_every_panel_entry() {
        for id in ParamId::ALL {
            let has_range = id.range().is_some();
            let panel_numeric = id != ParamId::ElapsedTime && id.kind() != ParamKind::Color;
            assert_eq!(has_range, panel_numeric, "{}", id);
        }
        let iterations = ParamId::SmallWaveIterations.range().unwrap();
        assert_eq!((iterations.min, iterations.max, iterations.step), (0.0, 5.0, 1.0));
    }
}
