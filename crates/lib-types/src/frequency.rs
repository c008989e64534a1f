//! Frequency-domain types: phasors and network transmissions.

use crate::units::{Unit, DEGREE, HZ, RATIO};
use ndarray::Array3;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// A steady-state sinusoidal quantity: magnitude, phase and frequency,
/// each with its own unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Phasor {
    pub magnitude: f64,
    pub phase: f64,
    pub frequency: f64,
    pub magnitude_unit: Unit,
    pub phase_unit: Unit,
    pub frequency_unit: Unit,
}

impl Phasor {
    /// Phasor with default units (dimensionless magnitude, degrees, hertz).
    pub fn new(magnitude: f64, phase: f64, frequency: f64) -> Self {
        Self {
            magnitude,
            phase,
            frequency,
            magnitude_unit: RATIO,
            phase_unit: DEGREE,
            frequency_unit: HZ,
        }
    }
}

/// A frequency-indexed tensor of complex scattering parameters.
///
/// `network` has shape `[F, P, P]` where `F` is the number of frequency
/// points and `P` the port count; `frequency` is index-aligned with the
/// leading dimension.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkTransmission {
    /// Frequency points in Hz.
    pub frequency: Vec<f64>,

    /// Scattering parameters indexed `[frequency, out_port, in_port]`.
    pub network: Array3<Complex64>,
}

impl NetworkTransmission {
    /// Construct a transmission, checking the shape invariant.
    pub fn try_new(
        frequency: Vec<f64>,
        network: Array3<Complex64>,
    ) -> Result<Self, &'static str> {
        let shape = network.shape();
        if frequency.len() != shape[0] {
            return Err("frequency count must equal the tensor's leading dimension");
        }
        if shape[1] != shape[2] {
            return Err("scattering tensor port dimensions must be square");
        }
        Ok(Self { frequency, network })
    }

    /// Number of frequency points.
    pub fn len(&self) -> usize {
        self.frequency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequency.is_empty()
    }

    /// Port count.
    pub fn num_ports(&self) -> usize {
        self.network.shape()[1]
    }

    /// One scattering parameter across all frequencies.
    pub fn parameter(&self, out_port: usize, in_port: usize) -> Vec<Complex64> {
        (0..self.len())
            .map(|f| self.network[[f, out_port, in_port]])
            .collect()
    }
}

/// Contract for external frequency-domain network objects.
///
/// Implementors expose a monotonic frequency axis in Hz and a complex
/// 3-tensor `[F, P, P]` of scattering parameters; the conversion reducer
/// restates them as a typed [`NetworkTransmission`].
pub trait FrequencyNetwork {
    fn frequency_hz(&self) -> &[f64];
    fn scattering(&self) -> &Array3<Complex64>;
}

impl FrequencyNetwork for NetworkTransmission {
    fn frequency_hz(&self) -> &[f64] {
        &self.frequency
    }

    fn scattering(&self) -> &Array3<Complex64> {
        &self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_invariant() {
        let network = Array3::<Complex64>::zeros((3, 2, 2));
        let nt = NetworkTransmission::try_new(vec![1e9, 2e9, 3e9], network).unwrap();
        assert_eq!(nt.len(), 3);
        assert_eq!(nt.num_ports(), 2);

        let network = Array3::<Complex64>::zeros((3, 2, 2));
        assert!(NetworkTransmission::try_new(vec![1e9], network).is_err());

        let network = Array3::<Complex64>::zeros((1, 2, 3));
        assert!(NetworkTransmission::try_new(vec![1e9], network).is_err());
    }

    #[test]
    fn test_parameter_extraction() {
        let mut network = Array3::<Complex64>::zeros((2, 2, 2));
        network[[0, 1, 0]] = Complex64::new(0.9, 0.0);
        network[[1, 1, 0]] = Complex64::new(0.8, -0.1);
        let nt = NetworkTransmission::try_new(vec![1e9, 2e9], network).unwrap();

        let s21 = nt.parameter(1, 0);
        assert!((s21[0].re - 0.9).abs() < 1e-12);
        assert!((s21[1].im + 0.1).abs() < 1e-12);
    }
}
