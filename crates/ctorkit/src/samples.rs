//! Sample signal filters
//!
//! A small library of targets registered into the global catalog, used by
//! the CLI and as a worked example of target declarations. Every filter is
//! activated as `dyn Filter`.
//!
//! | Name | Parameters |
//! |------|------------|
//! | `Moving Average[simple]` | `Period` count |
//! | `Moving Average[exponential]` | `Period` count, `Smoothing` quantity |
//! | `Gain` | `Factor` quantity, `Unit` label |
//! | `Window` | `Shape` single selection over `window-shapes` |
//! | `Band Stack` | `Bands` composite selection over `bands` |
//! | `Low Pass` | `Cutoff` quantity, [`SampleClock`] dependency |
//! | `Clip Guard` | permanent, context only |
//! | `Dump` | development only |

use ctorkit_application::context::Context;
use ctorkit_application::ports::registry::{
    ConverterRegistration, TargetRegistration, ENTITY_CONVERTERS, TARGETS,
};
use ctorkit_application::ports::FromContext;
use ctorkit_application::schema::{Constructor, Parameter, Target, TargetSchema};
use ctorkit_domain::error::Result;
use ctorkit_domain::ports::{CompositeEntityConverter, EntityConverter};
use ctorkit_domain::value_objects::TargetInfo;
use std::f64::consts::PI;

/// Context variable consulted for the default moving average period
pub const DEFAULT_PERIOD_VARIABLE: &str = "Default Period";

/// Context variable holding the sample rate used by [`SampleClock`]
pub const SAMPLE_RATE_VARIABLE: &str = "Sample Rate";

/// Transforms a sequence of samples
pub trait Filter {
    /// Short human-readable description of the configured filter
    fn label(&self) -> String;

    /// Apply the filter to `input`, producing one output per sample
    fn apply(&self, input: &[f64]) -> Vec<f64>;
}

/// Sampling clock injected into rate-dependent filters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleClock {
    /// Samples per second
    pub rate_hz: f64,
}

// ============================================================================
// Entity converters
// ============================================================================

/// Tapering function applied by [`Window`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowShape {
    Rectangular,
    Hann,
    Hamming,
}

impl WindowShape {
    fn coefficient(self, index: usize, len: usize) -> f64 {
        if len < 2 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let phase = 2.0 * PI * index as f64 / (len - 1) as f64;
        match self {
            Self::Rectangular => 1.0,
            Self::Hann => 0.5 - 0.5 * phase.cos(),
            Self::Hamming => 0.54 - 0.46 * phase.cos(),
        }
    }
}

const WINDOW_SHAPES: [(&str, WindowShape); 3] = [
    ("rectangular", WindowShape::Rectangular),
    ("hann", WindowShape::Hann),
    ("hamming", WindowShape::Hamming),
];

/// Identifiers of the available window shapes
pub struct WindowShapes;

impl FromContext for WindowShapes {
    fn from_context(_context: &Context) -> Result<Self> {
        Ok(Self)
    }
}

impl EntityConverter for WindowShapes {
    type Entity = WindowShape;

    fn identifiers(&self) -> Vec<String> {
        WINDOW_SHAPES.iter().map(|(id, _)| (*id).to_string()).collect()
    }

    fn default_identifier(&self) -> String {
        "hann".to_string()
    }

    fn entity(&self, id: &str) -> Option<WindowShape> {
        WINDOW_SHAPES
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, shape)| *shape)
    }
}

/// Frequency band, as a gain applied to the signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub gain: f64,
}

const BANDS: [(&str, Band); 3] = [
    ("low", Band { gain: 1.2 }),
    ("mid", Band { gain: 1.0 }),
    ("high", Band { gain: 0.8 }),
];

/// Identifier sets of bands; the development build adds a muted band
pub struct Bands {
    development: bool,
}

impl FromContext for Bands {
    fn from_context(context: &Context) -> Result<Self> {
        Ok(Self {
            development: context.is_development(),
        })
    }
}

impl CompositeEntityConverter for Bands {
    type Entity = Band;

    fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = BANDS.iter().map(|(id, _)| (*id).to_string()).collect();
        if self.development {
            ids.push("mute".to_string());
        }
        ids
    }

    fn default_identifiers(&self) -> Vec<String> {
        vec!["low".to_string(), "high".to_string()]
    }

    fn entity(&self, id: &str) -> Option<Band> {
        if self.development && id == "mute" {
            return Some(Band { gain: 0.0 });
        }
        BANDS
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, band)| *band)
    }
}

// ============================================================================
// Targets
// ============================================================================

/// Mean over the trailing `period` samples
pub struct SimpleMovingAverage {
    pub period: usize,
}

impl Filter for SimpleMovingAverage {
    fn label(&self) -> String {
        format!("SMA({})", self.period)
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        (0..input.len())
            .map(|i| {
                let window = &input[i.saturating_sub(self.period - 1)..=i];
                #[allow(clippy::cast_precision_loss)]
                let len = window.len() as f64;
                window.iter().sum::<f64>() / len
            })
            .collect()
    }
}

impl Target for SimpleMovingAverage {
    fn schema() -> TargetSchema {
        TargetSchema::builder::<Self>(
            TargetInfo::new("Moving Average")
                .with_discriminator("simple")
                .with_description("Arithmetic mean over a trailing window"),
        )
        .implements::<dyn Filter>(|t| Box::new(t))
        .property("family", "smoothing")
        .property("weighting", "uniform")
        .constructor(
            Constructor::activation(|args| {
                Ok(SimpleMovingAverage {
                    period: positive_period(args.count(0)?)?,
                })
            })
            .parameter(
                Parameter::count("Period")
                    .description("Window length in samples")
                    .default_named_or(DEFAULT_PERIOD_VARIABLE, 14_i64)
                    .count_bounds(1, 500, 1),
            ),
        )
        .build()
    }
}

/// Exponentially weighted mean
pub struct ExponentialMovingAverage {
    pub period: usize,
    pub smoothing: f64,
}

impl Filter for ExponentialMovingAverage {
    fn label(&self) -> String {
        format!("EMA({}, {})", self.period, self.smoothing)
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        #[allow(clippy::cast_precision_loss)]
        let alpha = self.smoothing / (1.0 + self.period as f64);
        let mut state = None;
        input
            .iter()
            .map(|&x| {
                let next = state.map_or(x, |prev: f64| prev + alpha * (x - prev));
                state = Some(next);
                next
            })
            .collect()
    }
}

impl Target for ExponentialMovingAverage {
    fn schema() -> TargetSchema {
        TargetSchema::builder::<Self>(
            TargetInfo::new("Moving Average")
                .with_discriminator("exponential")
                .with_description("Exponentially weighted mean"),
        )
        .implements::<dyn Filter>(|t| Box::new(t))
        .property("family", "smoothing")
        .property("weighting", "exponential")
        .constructor(
            Constructor::activation(|args| {
                Ok(ExponentialMovingAverage {
                    period: positive_period(args.count(0)?)?,
                    smoothing: args.quantity(1)?,
                })
            })
            .parameter(
                Parameter::count("Period")
                    .description("Equivalent window length in samples")
                    .default_named_or(DEFAULT_PERIOD_VARIABLE, 14_i64)
                    .count_bounds(1, 500, 1),
            )
            .parameter(
                Parameter::quantity("Smoothing")
                    .default_value(2.0)
                    .quantity_bounds(0.1, 10.0, 2),
            ),
        )
        .build()
    }
}

/// Multiplies every sample by a constant
pub struct Gain {
    pub factor: f64,
    pub unit: String,
}

impl Filter for Gain {
    fn label(&self) -> String {
        format!("Gain({} {})", self.factor, self.unit)
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|x| x * self.factor).collect()
    }
}

impl Target for Gain {
    fn schema() -> TargetSchema {
        TargetSchema::builder::<Self>(
            TargetInfo::new("Gain").with_description("Scale the signal by a factor"),
        )
        .implements::<dyn Filter>(|t| Box::new(t))
        .property("family", "amplitude")
        .constructor(
            Constructor::activation(|args| {
                Ok(Gain {
                    factor: args.quantity(0)?,
                    unit: args.label(1)?,
                })
            })
            .parameter(
                Parameter::quantity("Factor")
                    .default_value(1.0)
                    .quantity_bounds(-100.0, 100.0, 3),
            )
            .parameter(
                Parameter::label("Unit")
                    .description("Display unit of the output")
                    .default_value("x")
                    .label_bounds(1, 8)
                    .pattern("^[A-Za-z%]+$")
                    .optional(),
            ),
        )
        .build()
    }
}

/// Tapers the signal with a window function
pub struct Window {
    pub shape: WindowShape,
}

impl Filter for Window {
    fn label(&self) -> String {
        format!("Window({:?})", self.shape)
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        input
            .iter()
            .enumerate()
            .map(|(i, x)| x * self.shape.coefficient(i, input.len()))
            .collect()
    }
}

impl Target for Window {
    fn schema() -> TargetSchema {
        TargetSchema::builder::<Self>(
            TargetInfo::new("Window").with_description("Taper the signal ends"),
        )
        .implements::<dyn Filter>(|t| Box::new(t))
        .property("family", "amplitude")
        .constructor(
            Constructor::activation(|args| Ok(Window { shape: args.entity(0)? }))
                .parameter(Parameter::single("Shape", "window-shapes")),
        )
        .build()
    }
}

/// Sum of band gains applied to the signal
pub struct BandStack {
    pub bands: Vec<Band>,
}

impl Filter for BandStack {
    fn label(&self) -> String {
        format!("BandStack({})", self.bands.len())
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        let gain: f64 = self.bands.iter().map(|band| band.gain).sum();
        input.iter().map(|x| x * gain).collect()
    }
}

impl Target for BandStack {
    fn schema() -> TargetSchema {
        TargetSchema::builder::<Self>(
            TargetInfo::new("Band Stack")
                .with_description("Combined gain of selected bands")
                .experimental(),
        )
        .implements::<dyn Filter>(|t| Box::new(t))
        .property("family", "amplitude")
        .constructor(
            Constructor::activation(|args| Ok(BandStack { bands: args.entities(0)? }))
                .parameter(Parameter::composite("Bands", "bands")),
        )
        .build()
    }
}

/// First-order low-pass filter at a cutoff frequency
pub struct LowPass {
    pub cutoff_hz: f64,
    pub clock: SampleClock,
}

impl Filter for LowPass {
    fn label(&self) -> String {
        format!("LowPass({} Hz @ {} Hz)", self.cutoff_hz, self.clock.rate_hz)
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        let rc = 1.0 / (2.0 * PI * self.cutoff_hz);
        let dt = 1.0 / self.clock.rate_hz;
        let alpha = dt / (rc + dt);
        let mut state = None;
        input
            .iter()
            .map(|&x| {
                let next = state.map_or(x, |prev: f64| prev + alpha * (x - prev));
                state = Some(next);
                next
            })
            .collect()
    }
}

impl Target for LowPass {
    fn schema() -> TargetSchema {
        TargetSchema::builder::<Self>(
            TargetInfo::new("Low Pass").with_description("First-order low-pass filter"),
        )
        .implements::<dyn Filter>(|t| Box::new(t))
        .property("family", "smoothing")
        .constructor(
            Constructor::activation(|args| {
                let cutoff_hz = args.quantity(0)?;
                let clock = args.dependency::<SampleClock>(1)?;
                if cutoff_hz <= 0.0 {
                    return Err(format!("cutoff must be positive, got {cutoff_hz}").into());
                }
                Ok(LowPass {
                    cutoff_hz,
                    clock: *clock,
                })
            })
            .parameter(
                Parameter::quantity("Cutoff")
                    .description("Cutoff frequency in Hz")
                    .default_value(10.0)
                    .quantity_bounds(0.01, 1000.0, 2),
            )
            .parameter(Parameter::dependency::<SampleClock>()),
        )
        .build()
    }
}

/// Clamps samples to the unit range; always active
pub struct ClipGuard {
    pub limit: f64,
}

impl Filter for ClipGuard {
    fn label(&self) -> String {
        format!("ClipGuard(±{})", self.limit)
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        input
            .iter()
            .map(|x| x.clamp(-self.limit, self.limit))
            .collect()
    }
}

impl Target for ClipGuard {
    fn schema() -> TargetSchema {
        TargetSchema::builder::<Self>(
            TargetInfo::new("Clip Guard")
                .with_description("Clamp output to a safe range")
                .permanent(),
        )
        .implements::<dyn Filter>(|t| Box::new(t))
        .constructor(
            Constructor::activation(|args| {
                // Development builds let larger excursions through for inspection
                let limit = if args.context().is_development() { 10.0 } else { 1.0 };
                Ok(ClipGuard { limit })
            })
            .parameter(Parameter::context()),
        )
        .build()
    }
}

/// Logs every sample at debug level and passes it through
pub struct Dump;

impl Filter for Dump {
    fn label(&self) -> String {
        "Dump".to_string()
    }

    fn apply(&self, input: &[f64]) -> Vec<f64> {
        for (i, x) in input.iter().enumerate() {
            tracing::debug!(index = i, sample = x, "dump");
        }
        input.to_vec()
    }
}

impl Target for Dump {
    fn schema() -> TargetSchema {
        TargetSchema::builder::<Self>(TargetInfo::new("Dump").development())
            .implements::<dyn Filter>(|t| Box::new(t))
            .constructor(Constructor::activation(|_| Ok(Dump)))
            .build()
    }
}

fn positive_period(period: i64) -> std::result::Result<usize, ctorkit_domain::error::BoxError> {
    match usize::try_from(period) {
        Ok(period) if period > 0 => Ok(period),
        _ => Err(format!("period must be positive, got {period}").into()),
    }
}

// ============================================================================
// Registration
// ============================================================================

#[linkme::distributed_slice(ENTITY_CONVERTERS)]
static WINDOW_SHAPES_CONVERTER: ConverterRegistration = ConverterRegistration {
    name: "window-shapes",
    register: |catalog| {
        catalog.entity_converter::<WindowShapes>("window-shapes", "Window functions")
    },
};

#[linkme::distributed_slice(ENTITY_CONVERTERS)]
static BANDS_CONVERTER: ConverterRegistration = ConverterRegistration {
    name: "bands",
    register: |catalog| catalog.composite_converter::<Bands>("bands", "Frequency bands"),
};

#[linkme::distributed_slice(TARGETS)]
static SIMPLE_MOVING_AVERAGE: TargetRegistration = TargetRegistration {
    name: "simple-moving-average",
    register: |catalog| catalog.target::<SimpleMovingAverage>(),
};

#[linkme::distributed_slice(TARGETS)]
static EXPONENTIAL_MOVING_AVERAGE: TargetRegistration = TargetRegistration {
    name: "exponential-moving-average",
    register: |catalog| catalog.target::<ExponentialMovingAverage>(),
};

#[linkme::distributed_slice(TARGETS)]
static GAIN: TargetRegistration = TargetRegistration {
    name: "gain",
    register: |catalog| catalog.target::<Gain>(),
};

#[linkme::distributed_slice(TARGETS)]
static WINDOW: TargetRegistration = TargetRegistration {
    name: "window",
    register: |catalog| catalog.target::<Window>(),
};

#[linkme::distributed_slice(TARGETS)]
static BAND_STACK: TargetRegistration = TargetRegistration {
    name: "band-stack",
    register: |catalog| catalog.target::<BandStack>(),
};

#[linkme::distributed_slice(TARGETS)]
static LOW_PASS: TargetRegistration = TargetRegistration {
    name: "low-pass",
    register: |catalog| catalog.target::<LowPass>(),
};

#[linkme::distributed_slice(TARGETS)]
static CLIP_GUARD: TargetRegistration = TargetRegistration {
    name: "clip-guard",
    register: |catalog| catalog.target::<ClipGuard>(),
};

#[linkme::distributed_slice(TARGETS)]
static DUMP: TargetRegistration = TargetRegistration {
    name: "dump",
    register: |catalog| catalog.target::<Dump>(),
};
