//! Read-only summary of a population for metric collectors.
use super::Population;
use crate::record::{Record, RecordValue};

/// Summary of a population.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PopulationStats {
    /// Number of macro-classifiers.
    pub macro_size: usize,

    /// Number of micro-classifiers.
    pub numerosity: usize,

    /// Number of reliable macro-classifiers.
    pub reliable: usize,

    /// Mean fitness over macro-classifiers, zero for an empty population.
    pub mean_fitness: f64,
}

impl Population {
    /// Computes the summary of the population.
    pub fn stats(&self, theta_r: f64) -> PopulationStats {
        let macro_size = self.len();
        let mean_fitness = match macro_size {
            0 => 0.0,
            n => self.iter().map(|(_, cl)| cl.fitness()).sum::<f64>() / n as f64,
        };

        PopulationStats {
            macro_size,
            numerosity: self.numerosity(),
            reliable: self.iter().filter(|(_, cl)| cl.is_reliable(theta_r)).count(),
            mean_fitness,
        }
    }
}

impl From<PopulationStats> for Record {
    fn from(stats: PopulationStats) -> Self {
        Record::from_slice(&[
            ("population", RecordValue::Scalar(stats.macro_size as _)),
            ("numerosity", RecordValue::Scalar(stats.numerosity as _)),
            ("reliable", RecordValue::Scalar(stats.reliable as _)),
            ("mean_fitness", RecordValue::Scalar(stats.mean_fitness)),
        ])
    }
}
