//! Frequency-domain reduction: network adaptation and phasor arithmetic.

use crate::error::{AnalysisError, AnalysisResult};
use lib_types::{FrequencyNetwork, NetworkTransmission, Phasor};

/// Restate an external network object as a typed [`NetworkTransmission`].
///
/// A pure adaptation boundary: no numeric transformation happens, the
/// shape is validated and the data copied across. Valid for any number of
/// frequency points, including a single-point sweep.
pub fn convert_to_network_transmission(
    network: &impl FrequencyNetwork,
) -> AnalysisResult<NetworkTransmission> {
    let frequency = network.frequency_hz();
    let scattering = network.scattering();
    let shape = scattering.shape();

    if frequency.len() != shape[0] {
        return Err(AnalysisError::LengthMismatch(format!(
            "frequency axis has {} points but the scattering tensor's leading dimension is {}",
            frequency.len(),
            shape[0]
        )));
    }
    if shape[1] != shape[2] {
        return Err(AnalysisError::InvalidNetwork(format!(
            "scattering tensor port dimensions must be square, got {}x{}",
            shape[1], shape[2]
        )));
    }

    NetworkTransmission::try_new(frequency.to_vec(), scattering.clone())
        .map_err(|message| AnalysisError::InvalidNetwork(message.to_string()))
}

/// Return a new phasor with its magnitude offset by `offset`.
///
/// Phase, frequency and every unit field are copied unchanged; the input
/// is not mutated.
pub fn offset_phasor_magnitude(phasor: &Phasor, offset: f64) -> Phasor {
    Phasor {
        magnitude: phasor.magnitude + offset,
        ..phasor.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::{Complex64, DEGREE, HZ, V};
    use ndarray::Array3;

    #[test]
    fn test_conversion_preserves_shape_and_data() {
        let mut scattering = Array3::<Complex64>::zeros((2, 2, 2));
        scattering[[0, 1, 0]] = Complex64::new(0.9, 0.1);
        let source = NetworkTransmission::try_new(vec![1e9, 2e9], scattering).unwrap();

        let converted = convert_to_network_transmission(&source).unwrap();
        assert_eq!(converted.len(), 2);
        assert_eq!(converted.network.shape(), &[2, 2, 2]);
        assert!((converted.network[[0, 1, 0]].re - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_conversion_single_frequency_point() {
        let scattering = Array3::<Complex64>::zeros((1, 2, 2));
        let source = NetworkTransmission::try_new(vec![1e9], scattering).unwrap();

        let converted = convert_to_network_transmission(&source).unwrap();
        assert_eq!(converted.len(), 1);
        assert_eq!(converted.num_ports(), 2);
    }

    #[test]
    fn test_phasor_offset_leaves_other_fields_unchanged() {
        let phasor = Phasor {
            magnitude: 10.0,
            phase: 30.0,
            frequency: 60.0,
            magnitude_unit: V,
            phase_unit: DEGREE,
            frequency_unit: HZ,
        };

        let shifted = offset_phasor_magnitude(&phasor, 5.0);
        assert!((shifted.magnitude - 15.0).abs() < 1e-12);
        assert!((shifted.phase - phasor.phase).abs() < 1e-12);
        assert!((shifted.frequency - phasor.frequency).abs() < 1e-12);
        assert_eq!(shifted.magnitude_unit, phasor.magnitude_unit);
        assert_eq!(shifted.phase_unit, phasor.phase_unit);
        assert_eq!(shifted.frequency_unit, phasor.frequency_unit);

        // Offsetting by zero round-trips to an equal phasor.
        assert_eq!(offset_phasor_magnitude(&phasor, 0.0), phasor);
    }
}
