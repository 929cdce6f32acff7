//! Meteorological constants and classification thresholds
//!
//! Frozen tables used throughout the analysis pipeline. Values follow
//! National Weather Service and WMO observational standards; pressure
//! bands are sea-level inHg, wind thresholds are Beaufort-derived mph.
//! Grouped per concern so each analyzer pulls one table.

/// Fog detection thresholds and scoring weights.
///
/// Fog forms when near-surface air saturates (RH approaching 100%) and the
/// temperature-dewpoint spread collapses. Light winds let fog persist;
/// strong winds disperse it. The scorer adds the factor weights below and
/// classifies the 0-100 total.
pub struct FogThresholds;

impl FogThresholds {
    /// Minimum humidity (%) before fog scoring starts at all
    pub const HUMIDITY_FLOOR: f64 = 88.0;

    // Humidity bands (%)
    pub const HUMIDITY_DENSE: f64 = 98.0;
    pub const HUMIDITY_PROBABLE: f64 = 95.0;
    pub const HUMIDITY_POSSIBLE: f64 = 92.0;

    // Humidity factor weights (max 40 points)
    pub const SCORE_HUMIDITY_DENSE: i32 = 40;
    pub const SCORE_HUMIDITY_PROBABLE: i32 = 30;
    pub const SCORE_HUMIDITY_POSSIBLE: i32 = 20;
    pub const SCORE_HUMIDITY_MARGINAL: i32 = 10;

    // Temperature-dewpoint spread bands (°F)
    pub const SPREAD_SATURATED: f64 = 0.5;
    pub const SPREAD_VERY_CLOSE: f64 = 1.0;
    pub const SPREAD_CLOSE: f64 = 2.0;
    pub const SPREAD_MARGINAL: f64 = 3.0;

    // Spread factor weights (max 30 points)
    pub const SCORE_SPREAD_SATURATED: i32 = 30;
    pub const SCORE_SPREAD_VERY_CLOSE: i32 = 25;
    pub const SCORE_SPREAD_CLOSE: i32 = 15;
    pub const SCORE_SPREAD_MARGINAL: i32 = 5;

    // Wind bands (mph)
    pub const WIND_CALM: f64 = 2.0;
    pub const WIND_LIGHT: f64 = 5.0;
    pub const WIND_MODERATE: f64 = 8.0;

    // Wind factor weights (max 15, strong wind penalized)
    pub const SCORE_WIND_CALM: i32 = 15;
    pub const SCORE_WIND_LIGHT: i32 = 10;
    pub const SCORE_WIND_MODERATE: i32 = 5;
    pub const PENALTY_WIND_STRONG: i32 = -10;

    // Daytime solar radiation bands (W/m²)
    pub const SOLAR_VERY_LOW: f64 = 50.0;
    pub const SOLAR_LOW: f64 = 150.0;
    pub const SOLAR_REDUCED: f64 = 300.0;

    // Nighttime solar radiation bands (W/m²)
    pub const SOLAR_NIGHT_MINIMAL: f64 = 2.0;
    pub const SOLAR_NIGHT_TWILIGHT: f64 = 10.0;

    // Solar factor weights
    pub const SCORE_SOLAR_DAY_DENSE: i32 = 15;
    pub const SCORE_SOLAR_DAY_MODERATE: i32 = 10;
    pub const SCORE_SOLAR_DAY_LIGHT: i32 = 5;
    pub const SCORE_SOLAR_NIGHT: i32 = 10;
    pub const SCORE_SOLAR_NIGHT_TWILIGHT: i32 = 5;
    pub const PENALTY_SOLAR_NIGHT: i32 = -5;

    /// Warm enough for evaporation fog (°F)
    pub const EVAPORATION_TEMP: f64 = 40.0;
    /// Humidity needed for the evaporation bonus (%)
    pub const EVAPORATION_HUMIDITY: f64 = 95.0;
    /// Spread needed for the evaporation bonus (°F)
    pub const EVAPORATION_SPREAD: f64 = 2.0;
    /// Evaporation bonus points
    pub const SCORE_EVAPORATION: i32 = 5;

    /// Daytime sanity check: radiation above this fraction of the clear-sky
    /// expectation rules fog out entirely
    pub const DAYTIME_CLEAR_SKY_FRACTION: f64 = 0.5;

    // Classification bands on the 0-100 score
    pub const THRESHOLD_DENSE: i32 = 70;
    pub const THRESHOLD_MODERATE: i32 = 55;
    pub const THRESHOLD_LIGHT: i32 = 45;
    /// Light fog additionally requires this much humidity (%)
    pub const LIGHT_HUMIDITY_CONFIRM: f64 = 95.0;
}

/// Wind speed thresholds adapted from the Beaufort scale (mph).
pub struct WindThresholds;

impl WindThresholds {
    /// Below this: calm (Beaufort 0-1)
    pub const CALM: f64 = 1.0;
    /// Light air to light breeze upper bound (Beaufort 2-3)
    pub const LIGHT: f64 = 8.0;
    /// Fresh to strong breeze lower bound (Beaufort 5-6)
    pub const STRONG: f64 = 19.0;
    /// Gale force (Beaufort 7+)
    pub const GALE: f64 = 32.0;

    // Gust-factor turbulence thresholds (gust / sustained ratio)
    pub const GUST_FACTOR_MODERATE: f64 = 1.5;
    pub const GUST_FACTOR_STRONG: f64 = 2.0;
    pub const GUST_FACTOR_SEVERE: f64 = 3.0;

    // Absolute gust thresholds (mph)
    pub const GUST_MODERATE: f64 = 10.0;
    pub const GUST_STRONG: f64 = 15.0;
    pub const GUST_SEVERE: f64 = 20.0;
    pub const GUST_EXTREME: f64 = 40.0;

    /// Division guard for the gust factor
    pub const SPEED_EPSILON: f64 = 1.0;
}

/// Sea-level pressure bands (inHg) and trend parameters.
pub struct PressureThresholds;

impl PressureThresholds {
    /// Severe storm / hurricane territory
    pub const EXTREMELY_LOW: f64 = 29.20;
    /// Strong storm system
    pub const VERY_LOW: f64 = 29.50;
    /// Low pressure system / lower edge of normal
    pub const LOW: f64 = 29.80;
    /// Above-normal threshold
    pub const HIGH: f64 = 30.00;
    /// Upper edge of normal / high pressure system
    pub const VERY_HIGH: f64 = 30.20;

    /// Pressure falls roughly 1 hPa per 8 m of elevation
    pub const HPA_PER_METER: f64 = 1.0 / 8.0;

    // Storm probability point weights (see analysis::pressure_wind)
    /// Points per 0.01 inHg/h of negative 3-hour slope
    pub const STORM_PTS_PER_UNIT_3H: f64 = 2.0;
    pub const STORM_CAP_3H: f64 = 40.0;
    /// Points per 0.01 inHg/h of negative 24-hour slope
    pub const STORM_PTS_PER_UNIT_24H: f64 = 1.5;
    pub const STORM_CAP_24H: f64 = 30.0;
    /// Flat award for pressure below the very-low band
    pub const STORM_PTS_VERY_LOW: f64 = 40.0;
    /// Additional award below the extremely-low band
    pub const STORM_PTS_EXTREMELY_LOW: f64 = 30.0;
    /// Award for gust factor above 2
    pub const STORM_PTS_GUSTY: f64 = 10.0;
    /// Points per hour of sustained sub-very-low pressure
    pub const STORM_PTS_PER_SUSTAINED_HOUR: f64 = 5.0;
    pub const STORM_CAP_SUSTAINED: f64 = 15.0;
    /// Wind-direction shift awards
    pub const STORM_PTS_DIRECTION_SHIFT: f64 = 15.0;
    pub const STORM_PTS_RAPID_VEER: f64 = 20.0;
    pub const STORM_PTS_UNSTABLE_LOW: f64 = 10.0;

    // Storm severity bands on the 0-100 probability
    pub const SEVERE_STORM: f64 = 70.0;
    pub const ELEVATED_STORM: f64 = 40.0;

    /// Cloud-cover nudge per hPa of 3-hour pressure change
    pub const CLOUD_NUDGE_PER_HPA: f64 = 5.0;
    /// Cap on the pressure-trend cloud nudge (points)
    pub const CLOUD_NUDGE_CAP: f64 = 10.0;
}

/// Precipitation intensity thresholds (in/h).
pub struct PrecipitationThresholds;

impl PrecipitationThresholds {
    /// Single active-precipitation threshold for the classifier
    pub const ACTIVE: f64 = 0.05;
    /// Light rain
    pub const LIGHT: f64 = 0.1;
    /// Moderate rain, the pouring boundary
    pub const MODERATE: f64 = 0.25;
    /// Heavy rain
    pub const HEAVY: f64 = 0.5;

    /// Storm classification: moderate rate with strong wind
    pub const STORM_MODERATE_RATE: f64 = 0.1;
    /// Storm classification: heavy rate with severe gusts
    pub const STORM_HEAVY_RATE: f64 = 0.25;
}

/// Temperature-related thresholds (°F).
pub struct TemperatureThresholds;

impl TemperatureThresholds {
    /// Water freezing point; at or below, precipitation is snow
    pub const FREEZING: f64 = 32.0;

    // Dewpoint spread bands for moisture analysis
    pub const SPREAD_SATURATED: f64 = 5.0;
    pub const SPREAD_MODERATE: f64 = 10.0;
}

/// Cloud-cover bands (%) for condition mapping.
///
/// Derived from the okta scale; the classifier maps the analyzed
/// percentage onto the three daytime tiers with half-open intervals.
pub struct CloudCoverThresholds;

impl CloudCoverThresholds {
    /// At or below: sunny / clear
    pub const SUNNY: f64 = 30.0;
    /// At or below: partly cloudy
    pub const PARTLY_CLOUDY: f64 = 60.0;

    /// Neutral value when no solar signal is usable
    pub const NEUTRAL: f64 = 50.0;

    // Graded absolute fallback values for the low-light regime
    pub const FALLBACK_HEAVY_OVERCAST: f64 = 85.0;
    pub const FALLBACK_MOSTLY_CLOUDY: f64 = 70.0;
    pub const FALLBACK_PARTLY_CLOUDY: f64 = 40.0;

    /// Clear-sky reference illuminance (lx) for the lux channel
    pub const LUX_CLEAR_SKY: f64 = 100_000.0;
    /// Clear-sky reference UV index
    pub const UV_CLEAR_SKY: f64 = 11.0;
}

/// Hysteresis limits for the condition filter and cloud-cover smoothing.
pub struct HysteresisThresholds;

impl HysteresisThresholds {
    /// Condition candidate history retention (hours)
    pub const HISTORY_HOURS: i64 = 24;
    /// Recency window for candidate acceptance (hours)
    pub const RECENCY_HOURS: i64 = 1;
    /// Cloud-cover delta needed for an adjacent-tier change
    pub const ADJACENT_DELTA: f64 = 15.0;
    /// Cloud-cover delta needed for a non-adjacent jump
    pub const NON_ADJACENT_DELTA: f64 = 25.0;
    /// Maximum believable cloud-cover change per update
    pub const MAX_CLOUD_DELTA: f64 = 30.0;
}

/// Solar model and daytime detection parameters.
pub struct SolarThresholds;

impl SolarThresholds {
    /// Base solar constant (W/m²)
    pub const SOLAR_CONSTANT: f64 = 1366.0;
    /// Amplitude of the Earth-Sun distance variation
    pub const DISTANCE_VARIATION: f64 = 0.033;

    // Multiplicative extinction coefficients
    pub const K_RAYLEIGH: f64 = 0.1;
    pub const K_OZONE: f64 = 0.02;
    pub const K_WATER_VAPOR: f64 = 0.05;
    pub const K_AEROSOL: f64 = 0.1;

    /// Below this elevation the relative cloud regime is unreliable
    pub const RELATIVE_REGIME_MIN_ELEVATION: f64 = 15.0;

    // Daytime predicate bounds
    pub const DAYTIME_RADIATION: f64 = 5.0;
    pub const DAYTIME_LUX: f64 = 50.0;
    pub const DAYTIME_UV: f64 = 0.1;

    // Twilight detection bounds
    pub const TWILIGHT_LUX_LOW: f64 = 10.0;
    pub const TWILIGHT_LUX_HIGH: f64 = 100.0;
    pub const TWILIGHT_RADIATION_LOW: f64 = 1.0;
    pub const TWILIGHT_RADIATION_HIGH: f64 = 50.0;

    // Elevation estimator bands (W/m² measured → degrees assumed)
    pub const ESTIMATE_HIGH_RADIATION: f64 = 800.0;
    pub const ESTIMATE_HIGH_ELEVATION: f64 = 60.0;
    pub const ESTIMATE_MID_RADIATION: f64 = 500.0;
    pub const ESTIMATE_MID_ELEVATION: f64 = 45.0;
    pub const ESTIMATE_LOW_RADIATION: f64 = 200.0;
    pub const ESTIMATE_LOW_ELEVATION: f64 = 25.0;
    pub const ESTIMATE_FLOOR_ELEVATION: f64 = 15.0;
}

// Default values substituted for missing sensors
pub const DEFAULT_TEMPERATURE_F: f64 = 70.0;
pub const DEFAULT_HUMIDITY_PCT: f64 = 50.0;
pub const DEFAULT_PRESSURE_INHG: f64 = 29.92;
pub const DEFAULT_WIND_MPH: f64 = 0.0;
pub const DEFAULT_SOLAR_WM2: f64 = 0.0;
/// Typical clear-sky maximum at zenith (W/m²)
pub const DEFAULT_ZENITH_MAX_WM2: f64 = 1000.0;
/// Accepted calibration band for the zenith maximum (W/m²)
pub const ZENITH_MAX_RANGE: (f64, f64) = (800.0, 2000.0);

/// Trends store retention (hours)
pub const TRENDS_RETENTION_HOURS: i64 = 168;
/// Minimum samples for a least-squares trend
pub const TREND_MIN_SAMPLES: usize = 3;
