//! 24-hour hourly forecast
//!
//! Hour-by-hour projection with astronomical context: a diurnal sine for
//! temperature anchored at 06:00, day/night condition rendering from the
//! configured sunrise/sunset, and a pressure-aware evolution cadence:
//! fast-moving pressure evolves the sky every 3 hours, storms every 4,
//! quiet regimes every 6.

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};

use crate::core_types::condition::Condition;
use crate::core_types::units::{Fahrenheit, UnitSystem, INCHES_TO_MM, MPH_TO_KMH};
use crate::forecast::evolution::{Evolution, TrendSeverity};
use crate::forecast::state::{ForecastBasis, MeteoState};
use crate::forecast::{
    condition_target_humidity, condition_temperature_range_f, condition_wind_factor,
    HourlyForecast,
};

/// Generate the 24-hour forecast.
#[must_use]
pub fn generate_hourly(
    basis: &ForecastBasis,
    state: &MeteoState,
    units: UnitSystem,
    sunrise: NaiveTime,
    sunset: NaiveTime,
) -> Vec<HourlyForecast> {
    let evolution = Evolution::from_state(state);
    let cadence = evolution_cadence(&evolution, state.pressure.storm_probability);

    let amplitude_f = condition_temperature_range_f(basis.condition, state.stability) / 2.0;
    let now_frac = hour_fraction(basis.timestamp);

    let mut condition = basis.condition;
    let mut records = Vec::with_capacity(24);

    for hour_idx in 0u32..24 {
        let datetime = basis.timestamp + Duration::hours(i64::from(hour_idx) + 1);
        let daytime = is_daytime_at(datetime, sunrise, sunset);

        // Micro-evolution at the cadence hours
        let step = hour_idx + 1;
        if step % cadence == 0 {
            condition = evolve_condition(condition, state, daytime, basis.cloud_cover_pct);
        }

        // Diurnal remapping on top of the ladder position
        let elevation = interpolated_elevation(datetime, sunrise, sunset);
        condition = diurnal_remap(condition, datetime.hour(), elevation, state);

        // Day/night rendering
        condition = if daytime {
            condition.day_equivalent()
        } else {
            condition.night_equivalent()
        };

        let temperature_f = hourly_temperature_f(
            basis,
            &evolution,
            amplitude_f,
            now_frac,
            datetime,
            hour_idx,
        );
        let precipitation_mm = hourly_precipitation_mm(basis, condition);
        let wind_mph = hourly_wind_mph(basis, condition, datetime.hour());
        let humidity = hourly_humidity(basis, condition, datetime.hour(), hour_idx);
        let probability = hourly_precipitation_probability(state, condition, hour_idx);

        let wind_bearing = state
            .pressure
            .wind_direction
            .map(|summary| summary.mean_direction_deg)
            .or(basis.wind_bearing_deg);

        records.push(HourlyForecast {
            datetime,
            condition,
            temperature: match units {
                UnitSystem::Imperial => temperature_f,
                UnitSystem::Metric => Fahrenheit(temperature_f).to_celsius().value(),
            },
            precipitation: match units {
                UnitSystem::Imperial => precipitation_mm / INCHES_TO_MM,
                UnitSystem::Metric => precipitation_mm,
            },
            precipitation_probability: probability,
            wind_speed: match units {
                UnitSystem::Imperial => wind_mph,
                UnitSystem::Metric => wind_mph * MPH_TO_KMH,
            },
            wind_bearing,
            humidity,
        });
    }

    records
}

/// Hours between condition evolution steps.
fn evolution_cadence(evolution: &Evolution, storm_probability: f64) -> u32 {
    if evolution.severity == TrendSeverity::Rapid {
        3
    } else if storm_probability > 30.0 {
        4
    } else {
        6
    }
}

/// Daytime test against the configured (or default) sun times.
fn is_daytime_at(datetime: DateTime<Utc>, sunrise: NaiveTime, sunset: NaiveTime) -> bool {
    let t = datetime.time();
    t >= sunrise && t < sunset
}

/// Solar elevation linearly interpolated across the daylight arc: zero at
/// the horizon, 90° at the midpoint.
#[must_use]
pub fn interpolated_elevation(
    datetime: DateTime<Utc>,
    sunrise: NaiveTime,
    sunset: NaiveTime,
) -> f64 {
    if !is_daytime_at(datetime, sunrise, sunset) {
        return 0.0;
    }
    let day_len = (sunset - sunrise).num_seconds() as f64;
    if day_len <= 0.0 {
        return 0.0;
    }
    let since_sunrise = (datetime.time() - sunrise).num_seconds() as f64;
    let progress = since_sunrise / day_len;
    90.0 * (1.0 - (2.0 * progress - 1.0).abs())
}

fn hour_fraction(t: DateTime<Utc>) -> f64 {
    f64::from(t.hour()) + f64::from(t.minute()) / 60.0
}

/// Diurnal sine anchored at 06:00 (rising through the anchor, peaking at
/// 12:00, bottoming at 00:00), offset so the current hour matches the
/// current temperature, with a trajectory term layered on.
fn hourly_temperature_f(
    basis: &ForecastBasis,
    evolution: &Evolution,
    amplitude_f: f64,
    now_frac: f64,
    datetime: DateTime<Utc>,
    hour_idx: u32,
) -> f64 {
    let angle = |h: f64| 2.0 * std::f64::consts::PI * (h - 6.0) / 24.0;
    let diurnal = amplitude_f * (angle(hour_fraction(datetime)).sin() - angle(now_frac).sin());

    // Trajectory modulation: deteriorating trends pull temperatures down,
    // improving trends nudge them up, growing with forecast distance.
    let trajectory = (evolution.trajectory_score / 100.0)
        * (f64::from(hour_idx + 1) / 24.0)
        * 2.0;

    basis.temp_f + diurnal + trajectory
}

/// One ladder step at the evolution cadence, pressure-driven overrides
/// first.
fn evolve_condition(
    condition: Condition,
    state: &MeteoState,
    daytime: bool,
    cloud_cover_pct: f64,
) -> Condition {
    let storm = state.pressure.storm_probability;
    let trend_3h = state.trend_3h_hpa();

    // Storm probability is the strongest signal
    if storm > 70.0 {
        return if cloud_cover_pct > 60.0 {
            Condition::LightningRainy
        } else {
            Condition::Rainy
        };
    }
    if storm > 40.0 && (trend_3h < -0.5 || cloud_cover_pct > 70.0) {
        return Condition::Rainy;
    }

    // Rapid swings move a full tier regardless of the slower trajectory
    if trend_3h < -1.5 {
        return match condition.day_equivalent() {
            Condition::Sunny => Condition::PartlyCloudy,
            Condition::PartlyCloudy => Condition::Cloudy,
            Condition::Cloudy if storm > 30.0 => Condition::Rainy,
            other => other,
        };
    }
    if trend_3h > 1.5 {
        return match condition.day_equivalent() {
            Condition::Cloudy => Condition::PartlyCloudy,
            Condition::PartlyCloudy => {
                if daytime {
                    Condition::Sunny
                } else {
                    Condition::ClearNight
                }
            }
            other => other,
        };
    }

    // Otherwise follow the long-term direction one tier at a time
    let trend_24h = state.trend_24h_hpa();
    if trend_24h < -0.5 {
        match condition.day_equivalent() {
            Condition::Sunny => Condition::PartlyCloudy,
            Condition::PartlyCloudy => Condition::Cloudy,
            other => other,
        }
    } else if trend_24h > 0.5 {
        match condition.day_equivalent() {
            Condition::Cloudy => Condition::PartlyCloudy,
            Condition::PartlyCloudy => Condition::Sunny,
            other => other,
        }
    } else {
        condition
    }
}

/// Time-of-day condition nudges that do not move the underlying ladder:
/// morning clearing (once the sun is genuinely up), afternoon cloud-up,
/// late-night clearing under a strongly rising barometer.
fn diurnal_remap(
    condition: Condition,
    hour: u32,
    solar_elevation_deg: f64,
    state: &MeteoState,
) -> Condition {
    let trend_3h = state.trend_3h_hpa();

    if (6..10).contains(&hour)
        && solar_elevation_deg > 10.0
        && condition == Condition::Cloudy
        && trend_3h > 0.0
    {
        return Condition::PartlyCloudy;
    }
    if (15..18).contains(&hour) && condition == Condition::Sunny && trend_3h < -0.3 {
        return Condition::PartlyCloudy;
    }
    if (hour >= 22 || hour < 3) && condition == Condition::Cloudy && trend_3h > 0.5 {
        return Condition::ClearNight;
    }
    condition
}

fn hourly_precipitation_mm(basis: &ForecastBasis, condition: Condition) -> f64 {
    let current_mm = basis.rain_rate_inh * INCHES_TO_MM;
    let factor = match condition {
        Condition::LightningRainy => 1.5,
        Condition::Pouring => 1.3,
        Condition::Rainy => 1.1,
        Condition::Snowy => 0.8,
        Condition::Cloudy => 0.5,
        Condition::Fog => 0.3,
        _ => 0.0,
    };
    let amount = current_mm * factor;
    if condition.is_precipitating() {
        amount.max(0.1)
    } else {
        amount
    }
}

fn hourly_precipitation_probability(
    state: &MeteoState,
    condition: Condition,
    hour_idx: u32,
) -> f64 {
    let mut probability: f64 = state.pressure.storm_probability * 0.5;
    let trend_3h = state.trend_3h_hpa();
    if trend_3h < 0.0 {
        probability += (-trend_3h * 20.0).min(40.0);
    }
    probability += state.moisture.condensation_potential * 20.0;
    if condition.is_precipitating() {
        probability = probability.max(55.0);
    }

    // Confidence thins out across the day
    let dampening = (1.0 - f64::from(hour_idx) * 0.01).max(0.7);
    (probability * dampening).clamp(0.0, 100.0)
}

fn diurnal_wind_offset_mph(hour: u32) -> f64 {
    match hour {
        5..=6 => -1.0,
        7..=11 => 0.5,
        12..=14 => 1.0,
        15..=18 => 1.5,
        19..=21 => 0.5,
        22..=23 | 0..=1 => -0.5,
        _ => -1.0,
    }
}

fn hourly_wind_mph(basis: &ForecastBasis, condition: Condition, hour: u32) -> f64 {
    let wind = (basis.wind_mph + diurnal_wind_offset_mph(hour)) * condition_wind_factor(condition);
    wind.max(1.0)
}

fn diurnal_humidity_offset(hour: u32) -> f64 {
    match hour {
        5..=6 => 5.0,
        7..=11 => -5.0,
        12..=14 => -10.0,
        15..=18 => -5.0,
        19..=21 => 5.0,
        22..=23 | 0..=1 => 10.0,
        _ => 5.0,
    }
}

fn hourly_humidity(basis: &ForecastBasis, condition: Condition, hour: u32, hour_idx: u32) -> f64 {
    let target = condition_target_humidity(condition);
    // Converge toward the condition target at 30% of the gap per hour
    let fraction = (0.3 * f64::from(hour_idx + 1)).min(1.0);
    let converged = basis.humidity_pct + (target - basis.humidity_pct) * fraction;
    (converged + diurnal_humidity_offset(hour)).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pressure_wind::{
        GustAnalysis, PressureSystem, PressureWindAnalysis, StormSeverity, WindClass,
    };
    use crate::forecast::state::{MoistureAnalysis, WeatherSystemKind, WindPattern};
    use chrono::{TimeZone, Utc};

    fn sunrise() -> NaiveTime {
        NaiveTime::from_hms_opt(6, 0, 0).unwrap()
    }

    fn sunset() -> NaiveTime {
        NaiveTime::from_hms_opt(18, 0, 0).unwrap()
    }

    fn basis(condition: Condition, hour: u32) -> ForecastBasis {
        ForecastBasis {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 15, hour, 0, 0).unwrap(),
            condition,
            temp_f: 70.0,
            humidity_pct: 55.0,
            wind_mph: 6.0,
            wind_bearing_deg: Some(270.0),
            dewpoint_f: 53.0,
            cloud_cover_pct: 30.0,
            rain_rate_inh: 0.0,
            is_daytime: true,
        }
    }

    fn quiet_state() -> MeteoState {
        MeteoState {
            pressure: PressureWindAnalysis {
                sea_level_pressure_inhg: 30.00,
                system: PressureSystem::Normal,
                trend_3h_inhg_per_hour: Some(0.0),
                trend_24h_inhg_per_hour: Some(0.0),
                storm_probability: 0.0,
                storm_severity: StormSeverity::None,
                wind_class: WindClass::Light,
                gust: GustAnalysis::analyze(6.0, 8.0),
                wind_direction: None,
            },
            stability: 0.7,
            system: WeatherSystemKind::Transitional,
            moisture: MoistureAnalysis {
                condensation_potential: 0.2,
                transport_potential: 0.5,
                humidity_trend_per_hour: 0.0,
            },
            wind: WindPattern {
                direction_stability: 0.6,
                gust_factor: 1.3,
                gradient_wind_effect: 0.0,
            },
            temp_volatility: 2.0,
            temp_trend_per_hour: 0.0,
        }
    }

    #[test]
    fn produces_24_hours() {
        let b = basis(Condition::Sunny, 9);
        let forecast = generate_hourly(&b, &quiet_state(), UnitSystem::Metric, sunrise(), sunset());
        assert_eq!(forecast.len(), 24);
        for (i, hour) in forecast.iter().enumerate() {
            assert_eq!(hour.datetime, b.timestamp + Duration::hours(i as i64 + 1));
            assert!((0.0..=100.0).contains(&hour.humidity));
            assert!((0.0..=100.0).contains(&hour.precipitation_probability));
        }
    }

    #[test]
    fn night_hours_render_night_conditions() {
        let b = basis(Condition::Sunny, 9);
        let forecast =
            generate_hourly(&b, &quiet_state(), UnitSystem::Metric, sunrise(), sunset());
        for hour in &forecast {
            let is_day = hour.datetime.time() >= sunrise() && hour.datetime.time() < sunset();
            if is_day {
                assert_ne!(hour.condition, Condition::ClearNight, "{}", hour.datetime);
                assert_ne!(
                    hour.condition,
                    Condition::PartlyCloudyNight,
                    "{}",
                    hour.datetime
                );
            } else {
                assert_ne!(hour.condition, Condition::Sunny, "{}", hour.datetime);
                assert_ne!(hour.condition, Condition::PartlyCloudy, "{}", hour.datetime);
            }
        }
    }

    #[test]
    fn afternoon_is_warmer_than_predawn() {
        let b = basis(Condition::Sunny, 9);
        let forecast =
            generate_hourly(&b, &quiet_state(), UnitSystem::Imperial, sunrise(), sunset());

        // 15:00 is hour index 5 (9 + 6); 04:00 is index 18
        let afternoon = forecast[5].temperature;
        let predawn = forecast[18].temperature;
        assert!(
            afternoon > predawn,
            "afternoon {afternoon} should exceed predawn {predawn}"
        );
    }

    #[test]
    fn rising_pressure_clears_the_sky_over_the_day() {
        let mut state = quiet_state();
        state.pressure.trend_3h_inhg_per_hour = Some(0.01);
        state.pressure.trend_24h_inhg_per_hour = Some(0.002);
        let b = basis(Condition::Cloudy, 9);
        let forecast =
            generate_hourly(&b, &state, UnitSystem::Metric, sunrise(), sunset());

        // +0.002 inHg/h over 24 h ≈ +1.6 hPa: long-term rising, the sky
        // should improve somewhere along the day
        let improved = forecast
            .iter()
            .any(|h| matches!(h.condition, Condition::PartlyCloudy | Condition::Sunny));
        assert!(improved, "rising pressure never cleared the sky");
    }

    #[test]
    fn high_storm_probability_turns_wet() {
        let mut state = quiet_state();
        state.pressure.storm_probability = 80.0;
        let b = basis(Condition::Cloudy, 9);
        let forecast = generate_hourly(&b, &state, UnitSystem::Metric, sunrise(), sunset());

        // Cadence for storm>30 without rapid trend is 4 h; by hour 4 the
        // override lands
        assert!(forecast
            .iter()
            .any(|h| h.condition.is_precipitating()));
    }

    #[test]
    fn precipitating_hours_carry_minimum_amount() {
        let mut state = quiet_state();
        state.pressure.storm_probability = 80.0;
        let b = basis(Condition::Rainy, 9);
        let forecast = generate_hourly(&b, &state, UnitSystem::Metric, sunrise(), sunset());
        for hour in forecast.iter().filter(|h| h.condition.is_precipitating()) {
            assert!(hour.precipitation >= 0.1);
            assert!(hour.precipitation_probability >= 38.0);
        }
    }

    #[test]
    fn interpolated_elevation_peaks_at_midday() {
        let noon = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let morning = Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 6, 15, 22, 0, 0).unwrap();

        let at_noon = interpolated_elevation(noon, sunrise(), sunset());
        let at_morning = interpolated_elevation(morning, sunrise(), sunset());
        assert!((at_noon - 90.0).abs() < 1e-9);
        assert!(at_morning > 0.0 && at_morning < at_noon);
        assert_eq!(interpolated_elevation(night, sunrise(), sunset()), 0.0);
    }

    #[test]
    fn deterministic_output() {
        let b = basis(Condition::PartlyCloudy, 14);
        let a = generate_hourly(&b, &quiet_state(), UnitSystem::Metric, sunrise(), sunset());
        let c = generate_hourly(&b, &quiet_state(), UnitSystem::Metric, sunrise(), sunset());
        assert_eq!(a, c);
    }
}
