//! Solar position and clear-sky irradiance model
//!
//! The cloud-cover analyzer needs to know how much sun *should* be
//! reaching the station; this module supplies it:
//!
//! - solar "constant" with the annual Earth-Sun distance variation
//! - Gueymard (2003) relative optical air mass
//! - multiplicative atmospheric extinction (Rayleigh scattering, ozone,
//!   water vapor, aerosol)
//! - theoretical clear-sky surface irradiance for a given elevation
//! - a coarse elevation estimator for stations without a sun sensor
//!
//! # References
//!
//! - Gueymard, C. (2003). "Direct solar transmittance and irradiance
//!   predictions with broadband models." Solar Energy, 74(5), 355-379.

use chrono::{DateTime, Datelike, Utc};

use crate::core_types::constants::SolarThresholds;

/// Relative Earth-Sun distance factor for a day of year.
///
/// Peaks near perihelion (early January), troughs near aphelion.
#[must_use]
pub fn solar_constant_variation(day_of_year: u32) -> f64 {
    let angle = 2.0 * std::f64::consts::PI * (day_of_year as f64 - 4.0) / 365.25;
    1.0 + SolarThresholds::DISTANCE_VARIATION * angle.cos()
}

/// Gueymard-2003 relative optical air mass for a solar elevation.
///
/// Returns `+∞` at or below the horizon: the optical path is unbounded and
/// downstream transmission terms correctly collapse to zero.
#[must_use]
pub fn air_mass(elevation_deg: f64) -> f64 {
    if elevation_deg <= 0.0 {
        return f64::INFINITY;
    }

    let zenith_deg = 90.0 - elevation_deg;
    let sin_elevation = elevation_deg.to_radians().sin();
    let correction = 0.48353 * elevation_deg.powf(0.095846) / (96.741 - zenith_deg).powf(1.754);

    1.0 / (sin_elevation + correction)
}

/// Combined atmospheric transmission for an air mass: the product of the
/// per-component Beer-Lambert extinction terms.
#[must_use]
pub fn atmospheric_transmission(air_mass: f64) -> f64 {
    if !air_mass.is_finite() {
        return 0.0;
    }

    let k = [
        SolarThresholds::K_RAYLEIGH,
        SolarThresholds::K_OZONE,
        SolarThresholds::K_WATER_VAPOR,
        SolarThresholds::K_AEROSOL,
    ];
    k.iter().map(|k| (-k * air_mass).exp()).product()
}

/// Theoretical clear-sky surface irradiance (W/m²) for a base zenith
/// irradiance, day of year, and solar elevation.
///
/// Zero at or below the horizon.
#[must_use]
pub fn clear_sky_irradiance(base_wm2: f64, day_of_year: u32, elevation_deg: f64) -> f64 {
    if elevation_deg <= 0.0 {
        return 0.0;
    }

    let variation = solar_constant_variation(day_of_year);
    let transmission = atmospheric_transmission(air_mass(elevation_deg));
    base_wm2 * variation * transmission * elevation_deg.to_radians().sin()
}

/// Estimate the solar elevation from the measured irradiance magnitude.
///
/// Used when the station has no sun sensor; coarse on purpose.
#[must_use]
pub fn estimate_elevation(solar_wm2: f64) -> f64 {
    if solar_wm2 >= SolarThresholds::ESTIMATE_HIGH_RADIATION {
        SolarThresholds::ESTIMATE_HIGH_ELEVATION
    } else if solar_wm2 >= SolarThresholds::ESTIMATE_MID_RADIATION {
        SolarThresholds::ESTIMATE_MID_ELEVATION
    } else if solar_wm2 >= SolarThresholds::ESTIMATE_LOW_RADIATION {
        SolarThresholds::ESTIMATE_LOW_ELEVATION
    } else {
        SolarThresholds::ESTIMATE_FLOOR_ELEVATION
    }
}

/// Daytime predicate: any solar channel above its noise floor.
#[must_use]
pub fn is_daytime(solar_wm2: f64, lux: f64, uv_index: f64) -> bool {
    solar_wm2 > SolarThresholds::DAYTIME_RADIATION
        || lux > SolarThresholds::DAYTIME_LUX
        || uv_index > SolarThresholds::DAYTIME_UV
}

/// Twilight predicate: weak but measurable light.
#[must_use]
pub fn is_twilight(solar_wm2: f64, lux: f64) -> bool {
    (lux > SolarThresholds::TWILIGHT_LUX_LOW && lux < SolarThresholds::TWILIGHT_LUX_HIGH)
        || (solar_wm2 > SolarThresholds::TWILIGHT_RADIATION_LOW
            && solar_wm2 < SolarThresholds::TWILIGHT_RADIATION_HIGH)
}

/// Astronomical context for one observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarContext {
    /// Solar elevation in degrees (sensor-supplied or estimated)
    pub elevation_deg: f64,
    /// True when the elevation came from the radiation-magnitude estimator
    pub elevation_estimated: bool,
    /// Day of year (1-366) from the observation timestamp
    pub day_of_year: u32,
    pub is_daytime: bool,
    pub is_twilight: bool,
    /// Clear-sky irradiance from the 1366 W/m² solar constant
    pub clear_sky_wm2: f64,
}

impl SolarContext {
    /// Assemble the context for an observation.
    #[must_use]
    pub fn from_observation(
        timestamp: DateTime<Utc>,
        solar_wm2: f64,
        lux: f64,
        uv_index: f64,
        sensor_elevation_deg: Option<f64>,
    ) -> Self {
        let day_of_year = timestamp.ordinal();
        let daytime = is_daytime(solar_wm2, lux, uv_index);

        let (elevation_deg, elevation_estimated) = match sensor_elevation_deg {
            Some(elevation) => (elevation, false),
            None if daytime => (estimate_elevation(solar_wm2), true),
            None => (0.0, true),
        };

        Self {
            elevation_deg,
            elevation_estimated,
            day_of_year,
            is_daytime: daytime,
            is_twilight: is_twilight(solar_wm2, lux),
            clear_sky_wm2: clear_sky_irradiance(
                SolarThresholds::SOLAR_CONSTANT,
                day_of_year,
                elevation_deg,
            ),
        }
    }

    /// Expected surface irradiance for a station-calibrated zenith maximum
    /// instead of the raw solar constant.
    #[must_use]
    pub fn expected_irradiance(&self, zenith_max_wm2: f64) -> f64 {
        clear_sky_irradiance(zenith_max_wm2, self.day_of_year, self.elevation_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn distance_variation_peaks_near_perihelion() {
        let january = solar_constant_variation(4);
        let july = solar_constant_variation(186);
        assert!((january - 1.033).abs() < 1e-6);
        assert!(july < 1.0);
        // Bounded by the 3.3% amplitude
        for doy in 1..=366 {
            let v = solar_constant_variation(doy);
            assert!((0.967..=1.033).contains(&v));
        }
    }

    #[test]
    fn air_mass_is_one_at_zenith() {
        let am = air_mass(90.0);
        assert!((am - 1.0).abs() < 0.01, "zenith air mass was {am}");
    }

    #[test]
    fn air_mass_grows_toward_horizon() {
        let am_45 = air_mass(45.0);
        let am_10 = air_mass(10.0);
        let am_2 = air_mass(2.0);
        assert!(am_45 > 1.0 && am_45 < 2.0);
        assert!(am_10 > am_45);
        assert!(am_2 > am_10);
        // Low-sun air mass stays physical (tens, not thousands)
        assert!(am_2 < 40.0);
    }

    #[test]
    fn air_mass_infinite_below_horizon() {
        assert!(air_mass(0.0).is_infinite());
        assert!(air_mass(-5.0).is_infinite());
        assert_eq!(atmospheric_transmission(air_mass(-5.0)), 0.0);
    }

    #[test]
    fn transmission_decreases_with_air_mass() {
        let t1 = atmospheric_transmission(1.0);
        let t2 = atmospheric_transmission(2.0);
        // Zenith transmission is exp(-0.27) ≈ 0.763
        assert!((t1 - (-0.27f64).exp()).abs() < 1e-9);
        assert!(t2 < t1);
    }

    #[test]
    fn clear_sky_magnitude_is_physical() {
        // Midsummer, high sun: expect several hundred W/m², below the
        // exoatmospheric constant.
        let irradiance = clear_sky_irradiance(1366.0, 172, 65.0);
        assert!(
            irradiance > 700.0 && irradiance < 1200.0,
            "clear-sky irradiance was {irradiance}"
        );
        assert_eq!(clear_sky_irradiance(1366.0, 172, -1.0), 0.0);
    }

    #[test]
    fn elevation_estimator_bands() {
        assert_eq!(estimate_elevation(900.0), 60.0);
        assert_eq!(estimate_elevation(600.0), 45.0);
        assert_eq!(estimate_elevation(300.0), 25.0);
        assert_eq!(estimate_elevation(50.0), 15.0);
    }

    #[test]
    fn daytime_and_twilight_predicates() {
        assert!(is_daytime(10.0, 0.0, 0.0));
        assert!(is_daytime(0.0, 60.0, 0.0));
        assert!(is_daytime(0.0, 0.0, 0.5));
        assert!(!is_daytime(1.0, 10.0, 0.0));

        assert!(is_twilight(3.0, 0.0));
        assert!(is_twilight(0.0, 50.0));
        assert!(!is_twilight(200.0, 50_000.0));
    }

    #[test]
    fn context_estimates_elevation_without_sensor() {
        let t = Utc.with_ymd_and_hms(2024, 6, 21, 18, 0, 0).unwrap();
        let ctx = SolarContext::from_observation(t, 850.0, 80_000.0, 7.0, None);
        assert!(ctx.elevation_estimated);
        assert_eq!(ctx.elevation_deg, 60.0);
        assert!(ctx.is_daytime);
        assert_eq!(ctx.day_of_year, 173);
    }
}
