//! Physical constants (SI 2019 exact values)
//!
//! Planck, light speed and Boltzmann are exact by definition since the 2019
//! SI redefinition, so the derived Wien constant is reproducible bit-for-bit.

/// Planck constant h in joule-seconds (J·s)
pub const PLANCK: f64 = 6.626_070_15e-34;

/// Speed of light in vacuum c in meters per second (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Boltzmann constant k_B in joules per kelvin (J/K)
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Second radiation constant h·c/k_B in meter-kelvins (m·K)
#[inline]
#[must_use]
pub fn second_radiation_constant() -> f64 {
    PLANCK * SPEED_OF_LIGHT / BOLTZMANN
}

/// Helium-neon laser line (m)
pub const HE_NE_WAVELENGTH: f64 = 632.8e-9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_radiation_constant() {
        // CODATA: c2 = 1.438776877... × 10⁻² m·K
        let c2 = second_radiation_constant();
        assert!((c2 - 1.438_776_877e-2).abs() < 1e-11, "c2 = {}", c2);
    }
}
