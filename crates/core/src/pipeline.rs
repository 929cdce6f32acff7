//! Pipeline orchestration
//!
//! Wires the analyzers into the per-update inference sequence and owns the
//! station state the caller threads between calls:
//!
//! 1. canonicalize units
//! 2. altitude-correct pressure
//! 3. dewpoint (computed or external)
//! 4. solar/astronomical context
//! 5. solar-radiation moving average
//! 6. cloud cover (with all adjustments)
//! 7. fog score
//! 8. pressure/wind analysis
//! 9. priority-ladder classification
//! 10. hysteresis filtering
//! 11. history append + eviction
//! 12. inference assembly
//!
//! `observe` is pure at the boundary: it never mutates the caller's state,
//! it returns a fresh one. A failed observation therefore leaves the
//! caller exactly where it was.

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::classifier::{classify, ClassifierInputs};
use crate::analysis::cloud_cover::{analyze_cloud_cover, CloudInputs};
use crate::analysis::fog::{score_fog, FogClass, FogInputs};
use crate::analysis::hysteresis::HysteresisFilter;
use crate::analysis::pressure_wind::{
    GustClass, PressureSystem, PressureWindAnalysis, StormSeverity, WindClass,
};
use crate::analysis::visibility::{estimate_visibility_km, VisibilityInputs};
use crate::atmosphere::altitude::{station_to_sea_level, PressureBands};
use crate::atmosphere::dewpoint::resolve_dewpoint_f;
use crate::atmosphere::solar::SolarContext;
use crate::core_types::condition::Condition;
use crate::core_types::snapshot::SensorSnapshot;
use crate::core_types::units::{Fahrenheit, InchesOfMercury, UnitSystem};
use crate::error::{CoreError, Warning};
use crate::forecast::state::{ForecastBasis, MeteoState};
use crate::forecast::{generate_daily, generate_hourly, Forecast, ForecastHorizon};
use crate::trends::{TrendSample, TrendsStore};

/// 1 km ≡ 0.621371 miles (visibility output)
const KM_TO_MILES: f64 = 0.621_371;

/// Station configuration: everything `new_state` needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    /// Station altitude in meters; 0 disables altitude correction
    pub altitude_m: f64,
    /// The pressure sensor already reports sea-level values
    pub pressure_is_sea_level_hint: bool,
    /// Luminance correction for sensor siting, clamped to [0.1, 5.0]
    pub luminance_multiplier: f64,
    /// Clear-sky maximum at zenith; out of [800, 2000] falls back to 1000
    pub zenith_max_radiation_wm2: f64,
    /// Output unit system for inferences and forecasts
    pub units_out: UnitSystem,
    /// Sunrise used by the hourly forecast when the host supplies nothing
    pub sunrise_default: NaiveTime,
    /// Sunset counterpart
    pub sunset_default: NaiveTime,
    /// Solar moving-average window
    pub solar_avg_window_minutes: i64,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            altitude_m: 0.0,
            pressure_is_sea_level_hint: false,
            luminance_multiplier: 1.0,
            zenith_max_radiation_wm2: 1000.0,
            units_out: UnitSystem::Metric,
            sunrise_default: NaiveTime::from_hms_opt(6, 0, 0).expect("valid time"),
            sunset_default: NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
            solar_avg_window_minutes: 15,
        }
    }
}

/// Per-update derived quantities, canonical analysis units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedState {
    pub dewpoint_f: f64,
    pub dewpoint_spread_f: f64,
    pub sea_level_pressure_inhg: f64,
    pub cloud_cover_pct: f64,
    pub expected_clear_sky_wm2: f64,
    pub fog_score: i32,
    pub fog_class: FogClass,
    pub pressure_system: PressureSystem,
    /// inHg per hour; `None` with insufficient history
    pub pressure_trend_3h: Option<f64>,
    pub pressure_trend_24h: Option<f64>,
    pub storm_probability: f64,
    pub storm_severity: StormSeverity,
    pub wind_class: WindClass,
    pub gust_factor: f64,
    pub gust_class: GustClass,
    pub is_daytime: bool,
    pub solar_elevation_deg: f64,
    /// Ladder output before hysteresis
    pub condition_raw: Condition,
    /// Emitted condition
    pub condition: Condition,
}

/// The inference emitted for one observation. Scalar outputs follow the
/// configured unit system; `derived` keeps the canonical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    pub condition: Condition,
    /// Dewpoint in the output unit system
    pub dewpoint: f64,
    pub cloud_cover_pct: f64,
    pub fog_score: i32,
    /// Visibility: km (metric) or miles (imperial)
    pub visibility: f64,
    /// Sea-level pressure: hPa (metric) or inHg (imperial)
    pub pressure_sea_level: f64,
    pub pressure_system: PressureSystem,
    pub storm_probability: f64,
    pub wind_class: WindClass,
    pub gust_class: GustClass,
    pub is_daytime: bool,
    pub solar_elevation_deg: f64,
    pub warnings: Vec<Warning>,
    /// The full derived bundle, canonical units
    pub derived: DerivedState,
}

/// Station state threaded through `observe` calls. Exclusively owned by
/// the caller between invocations; every successful `observe` returns the
/// successor value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationState {
    config: StationConfig,
    trends: TrendsStore,
    hysteresis: HysteresisFilter,
    previous_condition: Option<Condition>,
    previous_cloud_pct: Option<f64>,
    last_timestamp: Option<DateTime<Utc>>,
    last_basis: Option<ForecastBasis>,
    last_pressure: Option<PressureWindAnalysis>,
}

impl StationState {
    /// The configuration this state was created with.
    #[must_use]
    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    /// Read-only view of the history store.
    #[must_use]
    pub fn trends(&self) -> &TrendsStore {
        &self.trends
    }

    /// Timestamp of the newest absorbed observation.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_timestamp
    }
}

/// Create a fresh station state for a configuration.
#[must_use]
pub fn new_state(config: StationConfig) -> StationState {
    StationState {
        config,
        trends: TrendsStore::new(),
        hysteresis: HysteresisFilter::new(),
        previous_condition: None,
        previous_cloud_pct: None,
        last_timestamp: None,
        last_basis: None,
        last_pressure: None,
    }
}

/// Absorb one snapshot: returns the inference and the successor state.
///
/// Errors leave `state` untouched (it is never mutated); back-dated
/// snapshots are rejected, equal timestamps replace the prior entry.
pub fn observe(
    snapshot: &SensorSnapshot,
    state: &StationState,
) -> Result<(Inference, StationState), CoreError> {
    // 1. Canonicalize
    let (canon, mut warnings) = snapshot.canonicalize()?;
    let now = canon.timestamp;

    if let Some(last) = state.last_timestamp {
        if now < last {
            return Err(CoreError::OutOfOrderObservation);
        }
    }

    let config = &state.config;

    // 2. Altitude correction. Snapshot altitude overrides the configured
    // one; zero or negative means no correction.
    let altitude_m = canon.altitude_m.unwrap_or(config.altitude_m);
    let sea_level_pressure_inhg =
        if canon.pressure_is_sea_level || config.pressure_is_sea_level_hint {
            canon.pressure_inhg
        } else {
            station_to_sea_level(canon.pressure_inhg, altitude_m)
        };
    // Corrected pressure classifies against the sea-level bands; a station
    // working in uncorrected pressure would use PressureBands::at_altitude.
    let bands = PressureBands::sea_level();

    // 3. Dewpoint
    let (dewpoint_f, dewpoint_warning) =
        resolve_dewpoint_f(canon.temp_f, canon.humidity_pct, canon.external_dewpoint_f)?;
    if let Some(warning) = dewpoint_warning {
        warnings.push(warning);
    }
    let spread_f = canon.temp_f - dewpoint_f;

    // 4. Solar context
    let solar = SolarContext::from_observation(
        now,
        canon.solar_wm2,
        canon.lux,
        canon.uv_index,
        canon.solar_elevation_deg,
    );

    // 5. Solar moving average over the configured window
    let solar_avg_wm2 = state.trends.solar_radiation_average(
        now,
        Duration::minutes(config.solar_avg_window_minutes),
        canon.solar_wm2,
    );

    // 8 (early). Pressure/wind analysis; the cloud analyzer consumes the
    // 3-hour trend and system classification.
    let pressure = PressureWindAnalysis::analyze(
        sea_level_pressure_inhg,
        canon.wind_mph,
        canon.gust_mph,
        &bands,
        &state.trends,
        now,
    );
    if pressure.trend_3h_inhg_per_hour.is_none() {
        warnings.push(Warning::InsufficientHistory {
            quantity: "pressure".into(),
        });
    }

    // 6. Cloud cover
    let clear_fraction_6h = state.trends.condition_fraction(
        now,
        Duration::hours(6),
        |c| matches!(c, Condition::Sunny | Condition::ClearNight),
    );
    let solar_degraded = snapshot.solar_radiation_wm2.is_none() || solar.elevation_estimated;
    let cloud = analyze_cloud_cover(&CloudInputs {
        solar_avg_wm2,
        lux: canon.lux,
        uv_index: canon.uv_index,
        solar: &solar,
        zenith_max_wm2: config.zenith_max_radiation_wm2,
        luminance_multiplier: config.luminance_multiplier,
        pressure_trend_3h: pressure.trend_3h_inhg_per_hour,
        pressure_system: pressure.system,
        clear_fraction_6h,
        solar_degraded,
        hour_of_day: now.hour(),
        previous_cloud_pct: state.previous_cloud_pct,
    });
    if let Some(warning) = &cloud.warning {
        warnings.push(warning.clone());
    }

    // 7. Fog score
    let fog = score_fog(&FogInputs {
        temp_f: canon.temp_f,
        humidity_pct: canon.humidity_pct,
        spread_f,
        wind_mph: canon.wind_mph,
        solar_wm2: canon.solar_wm2,
        expected_clear_sky_wm2: solar.clear_sky_wm2,
        is_daytime: solar.is_daytime,
    });

    // 9. Classification
    let (condition_raw, _rung) = classify(&ClassifierInputs {
        rain_rate_inh: canon.rain_rate_inh,
        rain_state: canon.rain_state,
        temp_f: canon.temp_f,
        humidity_pct: canon.humidity_pct,
        wind_mph: canon.wind_mph,
        gust_mph: canon.gust_mph,
        gust: pressure.gust,
        pressure_inhg: sea_level_pressure_inhg,
        bands,
        system: pressure.system,
        fog,
        cloud_cover_pct: cloud.cloud_cover_pct,
        is_daytime: solar.is_daytime,
        is_twilight: solar.is_twilight,
        lux: canon.lux,
    });

    // 10. Hysteresis
    let mut next = state.clone();
    let (condition, _decision) = next.hysteresis.apply(
        now,
        state.previous_condition,
        condition_raw,
        cloud.raw_delta,
    );

    // 11. History append (emitted condition) + eviction
    next.trends.insert(
        now,
        TrendSample {
            temperature_f: canon.temp_f,
            humidity_pct: canon.humidity_pct,
            pressure_inhg: sea_level_pressure_inhg,
            wind_speed_mph: canon.wind_mph,
            wind_direction_deg: canon.wind_direction_deg,
            solar_radiation_wm2: canon.solar_wm2,
            condition,
        },
    );
    next.previous_condition = Some(condition);
    next.previous_cloud_pct = Some(cloud.cloud_cover_pct);
    next.last_timestamp = Some(now);

    let basis = ForecastBasis {
        timestamp: now,
        condition,
        temp_f: canon.temp_f,
        humidity_pct: canon.humidity_pct,
        wind_mph: canon.wind_mph,
        wind_bearing_deg: canon.wind_direction_deg,
        dewpoint_f,
        cloud_cover_pct: cloud.cloud_cover_pct,
        rain_rate_inh: canon.rain_rate_inh,
        is_daytime: solar.is_daytime,
    };
    next.last_basis = Some(basis);
    next.last_pressure = Some(pressure.clone());

    // 12. Assemble the inference
    let visibility_km = estimate_visibility_km(&VisibilityInputs {
        condition,
        spread_f,
        humidity_pct: canon.humidity_pct,
        rain_rate_inh: canon.rain_rate_inh,
        wind_mph: canon.wind_mph,
        gust_mph: canon.gust_mph,
        solar_wm2: canon.solar_wm2,
        lux: canon.lux,
        is_daytime: solar.is_daytime,
    });

    let derived = DerivedState {
        dewpoint_f,
        dewpoint_spread_f: spread_f,
        sea_level_pressure_inhg,
        cloud_cover_pct: cloud.cloud_cover_pct,
        expected_clear_sky_wm2: cloud.expected_clear_sky_wm2,
        fog_score: fog.score,
        fog_class: fog.class,
        pressure_system: pressure.system,
        pressure_trend_3h: pressure.trend_3h_inhg_per_hour,
        pressure_trend_24h: pressure.trend_24h_inhg_per_hour,
        storm_probability: pressure.storm_probability,
        storm_severity: pressure.storm_severity,
        wind_class: pressure.wind_class,
        gust_factor: pressure.gust.factor,
        gust_class: pressure.gust.class,
        is_daytime: solar.is_daytime,
        solar_elevation_deg: solar.elevation_deg,
        condition_raw,
        condition,
    };

    let inference = Inference {
        condition,
        dewpoint: match config.units_out {
            UnitSystem::Imperial => dewpoint_f,
            UnitSystem::Metric => Fahrenheit(dewpoint_f).to_celsius().value(),
        },
        cloud_cover_pct: cloud.cloud_cover_pct,
        fog_score: fog.score,
        visibility: match config.units_out {
            UnitSystem::Imperial => visibility_km * KM_TO_MILES,
            UnitSystem::Metric => visibility_km,
        },
        pressure_sea_level: match config.units_out {
            UnitSystem::Imperial => sea_level_pressure_inhg,
            UnitSystem::Metric => InchesOfMercury(sea_level_pressure_inhg)
                .to_hectopascals()
                .value(),
        },
        pressure_system: pressure.system,
        storm_probability: pressure.storm_probability,
        wind_class: pressure.wind_class,
        gust_class: pressure.gust.class,
        is_daytime: solar.is_daytime,
        solar_elevation_deg: solar.elevation_deg,
        warnings,
        derived,
    };

    Ok((inference, next))
}

/// Project a forecast from the state alone. Deterministic; an empty record
/// list before the first observation.
#[must_use]
pub fn forecast(state: &StationState, horizon: ForecastHorizon) -> Forecast {
    let (Some(basis), Some(pressure)) = (&state.last_basis, &state.last_pressure) else {
        return match horizon {
            ForecastHorizon::Hourly24 => Forecast::Hourly(Vec::new()),
            ForecastHorizon::Daily120 => Forecast::Daily(Vec::new()),
        };
    };

    let now = basis.timestamp;
    let meteo = MeteoState::derive(basis, pressure, &state.trends, now);

    match horizon {
        ForecastHorizon::Daily120 => Forecast::Daily(generate_daily(
            basis,
            &meteo,
            state.config.units_out,
        )),
        ForecastHorizon::Hourly24 => Forecast::Hourly(generate_hourly(
            basis,
            &meteo,
            state.config.units_out,
            state.config.sunrise_default,
            state.config.sunset_default,
        )),
    }
}
