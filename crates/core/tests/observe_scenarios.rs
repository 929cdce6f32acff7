//! End-to-end classification scenarios through `observe`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use skywatch_core::core_types::snapshot::{
    PressureReading, RainRateReading, SensorSnapshot, SpeedReading, TemperatureReading,
};
use skywatch_core::{new_state, observe, Condition, RainState, StationConfig, UnitSystem};

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn night() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 2, 0, 0).unwrap()
}

fn snapshot(t: DateTime<Utc>) -> SensorSnapshot {
    let mut snap = SensorSnapshot::new(t);
    snap.pressure_is_sea_level = true;
    snap
}

fn imperial_config() -> StationConfig {
    StationConfig {
        units_out: UnitSystem::Imperial,
        ..StationConfig::default()
    }
}

/// Scenario 1: bright summer noon reads sunny.
#[test]
fn clear_summer_noon_is_sunny() {
    let mut snap = snapshot(noon());
    snap.outdoor_temp = Some(TemperatureReading::fahrenheit(75.0));
    snap.humidity = Some(45.0);
    snap.rain_rate = Some(RainRateReading::inches_per_hour(0.0));
    snap.rain_state = Some(RainState::Dry);
    snap.pressure = Some(PressureReading::inhg(30.05));
    snap.wind_speed = Some(SpeedReading::mph(3.0));
    snap.wind_gust = Some(SpeedReading::mph(5.0));
    snap.solar_radiation_wm2 = Some(850.0);
    snap.solar_lux = Some(85_000.0);
    snap.uv_index = Some(7.0);
    snap.solar_elevation_deg = Some(60.0);

    let (inference, _) = observe(&snap, &new_state(imperial_config())).unwrap();
    assert_eq!(inference.condition, Condition::Sunny);
    assert!(inference.cloud_cover_pct <= 30.0);
    assert!(inference.is_daytime);
    assert_eq!(inference.fog_score, 0);
}

/// Scenario 2: saturated, calm, dark: dense fog even with a wet sensor.
#[test]
fn saturated_calm_night_is_fog() {
    let mut snap = snapshot(night());
    snap.outdoor_temp = Some(TemperatureReading::fahrenheit(34.0));
    snap.humidity = Some(99.0);
    snap.rain_rate = Some(RainRateReading::inches_per_hour(0.0));
    snap.rain_state = Some(RainState::Wet);
    snap.pressure = Some(PressureReading::inhg(29.90));
    snap.wind_speed = Some(SpeedReading::mph(1.0));
    snap.solar_radiation_wm2 = Some(0.0);
    snap.solar_lux = Some(0.0);
    snap.uv_index = Some(0.0);

    let (inference, _) = observe(&snap, &new_state(imperial_config())).unwrap();
    assert_eq!(inference.condition, Condition::Fog);
    assert!(inference.fog_score >= 70, "score was {}", inference.fog_score);
}

/// Scenario 3: freezing precipitation is snow.
#[test]
fn freezing_rain_rate_is_snowy() {
    let mut snap = snapshot(noon());
    snap.outdoor_temp = Some(TemperatureReading::fahrenheit(28.0));
    snap.humidity = Some(85.0);
    snap.rain_rate = Some(RainRateReading::inches_per_hour(0.20));
    snap.rain_state = Some(RainState::Wet);
    snap.pressure = Some(PressureReading::inhg(29.70));
    snap.wind_speed = Some(SpeedReading::mph(10.0));
    snap.wind_gust = Some(SpeedReading::mph(18.0));

    let (inference, _) = observe(&snap, &new_state(imperial_config())).unwrap();
    assert_eq!(inference.condition, Condition::Snowy);
}

/// Scenario 4: deep low with heavy rain is a thunderstorm with severe
/// storm probability.
#[test]
fn deep_low_heavy_rain_is_lightning_rainy() {
    let mut snap = snapshot(noon());
    snap.outdoor_temp = Some(TemperatureReading::fahrenheit(70.0));
    snap.humidity = Some(90.0);
    snap.rain_rate = Some(RainRateReading::inches_per_hour(0.35));
    snap.rain_state = Some(RainState::Wet);
    snap.pressure = Some(PressureReading::inhg(29.10));
    snap.wind_speed = Some(SpeedReading::mph(22.0));
    snap.wind_gust = Some(SpeedReading::mph(40.0));

    let (inference, _) = observe(&snap, &new_state(imperial_config())).unwrap();
    assert_eq!(inference.condition, Condition::LightningRainy);
    assert!(
        inference.storm_probability >= 70.0,
        "storm probability was {}",
        inference.storm_probability
    );
}

/// Scenario 5: sunny sky but strong sustained wind: the windy override.
#[test]
fn sunny_with_strong_wind_is_windy() {
    let mut snap = snapshot(noon());
    snap.outdoor_temp = Some(TemperatureReading::fahrenheit(72.0));
    snap.humidity = Some(50.0);
    snap.rain_rate = Some(RainRateReading::inches_per_hour(0.0));
    snap.pressure = Some(PressureReading::inhg(30.10));
    snap.wind_speed = Some(SpeedReading::mph(25.0));
    snap.wind_gust = Some(SpeedReading::mph(33.0));
    snap.solar_radiation_wm2 = Some(900.0);
    snap.solar_lux = Some(90_000.0);
    snap.uv_index = Some(8.0);
    snap.solar_elevation_deg = Some(55.0);

    let (inference, _) = observe(&snap, &new_state(imperial_config())).unwrap();
    assert_eq!(inference.condition, Condition::Windy);
}

/// Scenario 6: mild, humid, calm night under normal pressure falls to the
/// default night condition.
#[test]
fn humid_calm_normal_night_is_partly_cloudy_night() {
    let mut snap = snapshot(night());
    snap.outdoor_temp = Some(TemperatureReading::fahrenheit(60.0));
    snap.humidity = Some(88.0);
    snap.rain_rate = Some(RainRateReading::inches_per_hour(0.0));
    snap.pressure = Some(PressureReading::inhg(29.95));
    snap.wind_speed = Some(SpeedReading::mph(4.0));
    snap.solar_radiation_wm2 = Some(0.0);
    snap.solar_lux = Some(0.0);
    snap.uv_index = Some(0.0);

    let (inference, _) = observe(&snap, &new_state(imperial_config())).unwrap();
    assert_eq!(inference.condition, Condition::PartlyCloudyNight);
}

/// Scenario 7: a 35 → 80 cloud jump in ten minutes is treated as sensor
/// noise; the condition holds.
#[test]
fn oversized_cloud_jump_is_suppressed() {
    let state = new_state(imperial_config());

    // Partly cloudy reference reading (~35% cloud at 45° elevation)
    let mut first = snapshot(noon());
    first.outdoor_temp = Some(TemperatureReading::fahrenheit(70.0));
    first.humidity = Some(55.0);
    first.pressure = Some(PressureReading::inhg(29.92));
    first.wind_speed = Some(SpeedReading::mph(4.0));
    first.solar_radiation_wm2 = Some(304.0);
    first.solar_lux = Some(65_000.0);
    first.uv_index = Some(0.0);
    first.solar_elevation_deg = Some(45.0);

    let (inference, state) = observe(&first, &state).unwrap();
    assert_eq!(inference.condition, Condition::PartlyCloudy);
    let first_cloud = inference.cloud_cover_pct;
    assert!(
        (30.0..=45.0).contains(&first_cloud),
        "reference cloud cover was {first_cloud}"
    );

    // Ten minutes later the sensors collapse to heavy-overcast readings
    let mut second = snapshot(noon() + Duration::minutes(10));
    second.outdoor_temp = Some(TemperatureReading::fahrenheit(70.0));
    second.humidity = Some(55.0);
    second.pressure = Some(PressureReading::inhg(29.92));
    second.wind_speed = Some(SpeedReading::mph(4.0));
    second.solar_radiation_wm2 = Some(40.0);
    second.solar_lux = Some(4_000.0);
    second.uv_index = Some(0.0);
    second.solar_elevation_deg = Some(45.0);

    let (inference, _) = observe(&second, &state).unwrap();
    assert_eq!(
        inference.condition,
        Condition::PartlyCloudy,
        "a >30-point swing must not switch the condition"
    );
    // The emitted cloud cover itself is capped at +30
    assert!(inference.cloud_cover_pct <= first_cloud + 30.0 + 1e-9);
}

/// Scenario 8: storm probability climbs while pressure stays at storm
/// depths.
#[test]
fn sustained_deep_low_increases_storm_probability() {
    let state = new_state(imperial_config());

    let mut probabilities = Vec::new();
    let mut state = state;
    for step in 0..4 {
        let mut snap = snapshot(night() + Duration::minutes(20 * step));
        snap.outdoor_temp = Some(TemperatureReading::fahrenheit(55.0));
        snap.humidity = Some(70.0);
        snap.pressure = Some(PressureReading::inhg(29.15));
        snap.wind_speed = Some(SpeedReading::mph(5.0));
        snap.solar_radiation_wm2 = Some(0.0);
        snap.solar_lux = Some(0.0);
        snap.uv_index = Some(0.0);

        let (inference, next) = observe(&snap, &state).unwrap();
        probabilities.push(inference.storm_probability);
        state = next;
    }

    for pair in probabilities.windows(2) {
        assert!(
            pair[1] > pair[0],
            "storm probability must strictly increase: {probabilities:?}"
        );
    }
    assert!(probabilities[0] >= 70.0, "deep low starts severe");
}

/// Priority preservation: once precipitation classifies the update, solar
/// fields (used only by lower rungs) cannot change the outcome.
#[test]
fn lower_priority_fields_cannot_flip_precipitation() {
    let mut base = snapshot(noon());
    base.outdoor_temp = Some(TemperatureReading::fahrenheit(50.0));
    base.humidity = Some(80.0);
    base.rain_rate = Some(RainRateReading::inches_per_hour(0.15));
    base.rain_state = Some(RainState::Wet);
    base.pressure = Some(PressureReading::inhg(29.92));
    base.wind_speed = Some(SpeedReading::mph(5.0));

    let (reference, _) = observe(&base, &new_state(imperial_config())).unwrap();
    assert_eq!(reference.condition, Condition::Rainy);

    for (radiation, lux, uv) in [(0.0, 0.0, 0.0), (400.0, 40_000.0, 3.0), (900.0, 95_000.0, 9.0)]
    {
        let mut varied = base.clone();
        varied.solar_radiation_wm2 = Some(radiation);
        varied.solar_lux = Some(lux);
        varied.uv_index = Some(uv);

        let (inference, _) = observe(&varied, &new_state(imperial_config())).unwrap();
        assert_eq!(
            inference.condition,
            Condition::Rainy,
            "solar variation changed a precipitation classification"
        );
    }
}

/// Classification is altitude-invariant: a mountain station reporting
/// station pressure classifies like a sea-level station reporting the
/// equivalent sea-level pressure.
#[test]
fn classification_is_altitude_invariant() {
    use skywatch_core::analysis::PressureSystem;
    use skywatch_core::atmosphere::altitude::{sea_level_to_station, PressureBands};

    // The linear 1 hPa / 8 m shift tracks the barometric formula closely
    // only for the first few hundred meters; higher stations should report
    // corrected pressure instead.
    for sea_level in [29.10, 29.40, 29.70, 29.92, 30.10, 30.30] {
        for altitude in [0.0, 150.0, 250.0] {
            let station = sea_level_to_station(sea_level, altitude);
            let shifted = PressureSystem::classify(station, &PressureBands::at_altitude(altitude));
            let reference = PressureSystem::classify(sea_level, &PressureBands::sea_level());
            // The 1 hPa / 8 m band shift approximates the barometric
            // correction; they agree away from band edges
            if (sea_level - 29.20).abs() > 0.05
                && (sea_level - 29.50).abs() > 0.05
                && (sea_level - 29.80).abs() > 0.05
                && (sea_level - 30.00).abs() > 0.05
                && (sea_level - 30.20).abs() > 0.05
            {
                assert_eq!(
                    shifted, reference,
                    "station {station:.2} at {altitude} m vs sea level {sea_level:.2}"
                );
            }
        }
    }
}
