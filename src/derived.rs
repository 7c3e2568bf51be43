//! Quantities derived from air temperature and relative humidity.

/// Magnus coefficients (Alduchov & Eskridge).
const MAGNUS_C1: f32 = 243.04;
const MAGNUS_C2: f32 = 17.625;

/// Dew point and heat index of one temperature/humidity reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derived {
    /// Degrees Celsius.
    pub dew_point: f32,
    /// Degrees Celsius, or `None` if the heat index is not defined for the
    /// reading.
    pub heat_index: Option<f32>,
}

impl Derived {
    pub fn new(temperature: f32, humidity: f32) -> Self {
        Self {
            dew_point: dew_point(temperature, humidity),
            heat_index: heat_index(temperature, humidity),
        }
    }
}

pub fn fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32.0
}

pub fn celsius(fahrenheit: f32) -> f32 {
    (fahrenheit - 32.0) / 1.8
}

/// Dew point in °C, using the Magnus approximation.
///
/// Humidity is clamped to `[1, 100]` %, so that the logarithm stays finite.
pub fn dew_point(temperature: f32, humidity: f32) -> f32 {
    let h = (humidity / 100.0).clamp(0.01, 1.0);
    let ln_h = h.ln();

    let t = temperature;
    let t_term = t * MAGNUS_C2 / (t + MAGNUS_C1);

    MAGNUS_C1 * (ln_h + t_term) / (MAGNUS_C2 - ln_h - t_term)
}

/// Heat index in °C, following the NWS procedure.
///
/// Returns `None` outside of the range covered by the NWS reference table:
/// temperatures that do not round to 76..=126 °F, humidity outside of
/// 0..=100 %, or a result of 183.5 °F and above.
pub fn heat_index(temperature: f32, humidity: f32) -> Option<f32> {
    let t = fahrenheit(temperature);
    let rh = humidity;

    let t_rounded = (t + 0.5).floor();
    if !(76.0..=126.0).contains(&t_rounded) || !(0.0..=100.0).contains(&rh) {
        return None;
    }

    // NWS: use the simple formula if its average with the temperature is
    // below 80 °F.
    let simple = 0.5 * (t + 61.0 + (t - 68.0) * 1.2 + rh * 0.094);
    if simple + t < 160.0 {
        return Some(celsius(simple));
    }

    let t2 = t * t;
    let rh2 = rh * rh;

    let regression = -42.379 + 2.049_015_2 * t + 10.143_331 * rh
        - 0.224_755_41 * t * rh
        - 0.006_837_83 * t2
        - 0.054_817_17 * rh2
        + 0.001_228_74 * t2 * rh
        + 0.000_852_82 * t * rh2
        - 0.000_001_99 * t2 * rh2;

    let adjustment = if rh < 13.0 && (80.0..=112.0).contains(&t) {
        -((13.0 - rh) / 4.0) * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt()
    } else if rh > 85.0 && (80.0..=87.0).contains(&t) {
        ((rh - 85.0) / 10.0) * ((87.0 - t) / 5.0)
    } else {
        0.0
    };

    let result = regression + adjustment;

    if result >= 183.5 {
        log::trace!("Heat index {result} °F is above the reference table");
        None
    } else {
        Some(celsius(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(expected: f32, actual: f32, tolerance: f32) {
        assert!(
            (expected - actual).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn dew_point_reference() {
        approx(13.86, dew_point(25.0, 50.0), 0.01);
        approx(20.0, dew_point(20.0, 100.0), 0.001);
        approx(0.05, dew_point(10.0, 50.0), 0.01);
    }

    #[test]
    fn dew_point_clamps_humidity() {
        assert_eq!(dew_point(20.0, 100.0), dew_point(20.0, 150.0));
        assert_eq!(dew_point(0.0, 1.0), dew_point(0.0, 0.0));
        assert_eq!(dew_point(0.0, 1.0), dew_point(0.0, -20.0));
        assert!(dew_point(0.0, 0.0).is_finite());
    }

    #[test]
    fn heat_index_reference_table() {
        // NWS table: 96 °F at 65 %: 121 °F, 95 °F at 50 %: 105 °F.
        let hi = heat_index(celsius(95.0), 50.0).map(fahrenheit);
        approx(105.0, hi.unwrap(), 1.0);

        let hi = heat_index(celsius(96.0), 65.0).map(fahrenheit);
        approx(121.0, hi.unwrap(), 1.0);

        let hi = heat_index(celsius(80.0), 40.0).map(fahrenheit);
        approx(80.0, hi.unwrap(), 1.0);
    }

    #[test]
    fn heat_index_simple_formula() {
        let hi = heat_index(25.0, 50.0).map(fahrenheit);
        approx(76.75, hi.unwrap(), 0.01);
    }

    #[test]
    fn heat_index_dry_adjustment() {
        // 110 °F at 5 %: regression alone gives about 102.1 °F.
        let hi = heat_index(celsius(110.0), 5.0).map(fahrenheit).unwrap();
        approx(102.09 - 2.0 * (2.0f32 / 17.0).sqrt(), hi, 0.05);
    }

    #[test]
    fn heat_index_humid_adjustment() {
        // 82 °F at 95 %: regression alone gives 92.97 °F, plus 1 * 1.
        let hi = heat_index(celsius(82.0), 95.0).map(fahrenheit).unwrap();
        approx(92.97 + 1.0, hi, 0.05);

        // Above 87 °F the correction would be negative, and is not applied.
        let hi = heat_index(celsius(88.0), 95.0).map(fahrenheit).unwrap();
        approx(117.11, hi, 0.05);
    }

    #[test]
    fn heat_index_not_applicable() {
        // Too cold, too hot.
        assert_eq!(None, heat_index(20.0, 50.0));
        assert_eq!(None, heat_index(celsius(75.0), 50.0));
        assert_eq!(None, heat_index(60.0, 50.0));

        // Humidity outside of 0..=100.
        assert_eq!(None, heat_index(35.0, -1.0));
        assert_eq!(None, heat_index(35.0, 100.5));

        // Beyond the reference table.
        assert_eq!(None, heat_index(celsius(126.0), 100.0));
        assert_eq!(None, heat_index(celsius(110.0), 70.0));
    }

    #[test]
    fn heat_index_domain_edges() {
        assert!(heat_index(celsius(75.6), 50.0).is_some());
        assert!(heat_index(celsius(126.4), 0.0).is_some());
        assert!(heat_index(celsius(80.0), 0.0).is_some());
        assert!(heat_index(celsius(80.0), 100.0).is_some());
    }

    #[test]
    fn derived_pair() {
        let derived = Derived::new(35.0, 50.0);
        approx(23.0, derived.dew_point, 0.1);
        assert!(derived.heat_index.is_some());
    }
}
