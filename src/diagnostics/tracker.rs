//! Diagnostics snapshots and their accumulation over a run.
//!
//! # Example
//!
//! ```
//! use qg_rs::diagnostics::{DiagnosticsCadence, DiagnosticsTracker, FlowState};
//! use qg_rs::grid::SpectralGrid;
//! use qg_rs::model::{BarotropicModel, BarotropicParams, QgModel, initialize_model};
//!
//! # fn main() -> qg_rs::QgResult<()> {
//! let grid = SpectralGrid::new(8, 8, 1.0e6, 1.0e6)?;
//! let mut model = BarotropicModel::new(BarotropicParams::default().with_u(0.05))?;
//! initialize_model(&mut model, &grid)?;
//!
//! let (u, v, ph) = (grid.physical_zeros(1), grid.physical_zeros(1), grid.spectral_zeros(1));
//! let cadence = DiagnosticsCadence::new(2)?;
//! let dt = 600.0;
//!
//! let mut tracker = DiagnosticsTracker::new();
//! for tc in 0..=6u64 {
//!     let state = FlowState { grid: &grid, u: &u, v: &v, ph: &ph, t: tc as f64 * dt, dt, tc };
//!     if let Some(diag) = model.on_diagnostics_cycle(&state, &cadence)? {
//!         tracker.update(diag);
//!     }
//! }
//! assert_eq!(tracker.n_updates(), 3);
//! assert!(tracker.is_stable());
//! tracker.log_summary();
//! # Ok(())
//! # }
//! ```

/// Scalar diagnostics for one diagnostics cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct QgDiagnostics {
    /// Model time of the snapshot (s)
    pub time: f64,
    /// Step counter of the snapshot
    pub step: u64,
    /// Maximum advective Courant number
    pub cfl: f64,
    /// Kinetic energy (m² s⁻²)
    pub kinetic_energy: f64,
    /// Eddy turnover time in model years, `f64::INFINITY` at rest
    pub eddy_time: f64,
}

impl QgDiagnostics {
    /// Format diagnostics as a single-line summary.
    pub fn summary_line(&self) -> String {
        format!(
            "step={} t={:.4e}s CFL={:.3} KE={:.4e} T_eddy={:.4e}",
            self.step, self.time, self.cfl, self.kinetic_energy, self.eddy_time
        )
    }

    /// Whether the snapshot indicates a numerically healthy state.
    ///
    /// An infinite eddy time is the documented rest-state value, not a failure.
    pub fn is_stable(&self) -> bool {
        self.cfl.is_finite()
            && self.cfl < 1.0
            && self.kinetic_energy.is_finite()
            && !self.eddy_time.is_nan()
    }
}

/// Running accumulation of diagnostics snapshots.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticsTracker {
    /// First snapshot recorded
    initial: Option<QgDiagnostics>,
    /// Most recent snapshot
    current: Option<QgDiagnostics>,
    /// Number of updates
    n_updates: usize,
    /// Running sum of kinetic energy
    ke_sum: f64,
    /// Running sum of CFL numbers
    cfl_sum: f64,
    /// Maximum CFL seen during simulation
    max_cfl_seen: f64,
}

impl DiagnosticsTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new snapshot.
    pub fn update(&mut self, diag: QgDiagnostics) {
        self.n_updates += 1;
        self.ke_sum += diag.kinetic_energy;
        self.cfl_sum += diag.cfl;
        if diag.cfl.is_nan() || diag.cfl > self.max_cfl_seen {
            self.max_cfl_seen = diag.cfl;
        }
        if self.initial.is_none() {
            self.initial = Some(diag.clone());
        }
        self.current = Some(diag);
    }

    /// Number of snapshots recorded.
    pub fn n_updates(&self) -> usize {
        self.n_updates
    }

    /// First snapshot, if any.
    pub fn initial(&self) -> Option<&QgDiagnostics> {
        self.initial.as_ref()
    }

    /// Most recent snapshot, if any.
    pub fn current(&self) -> Option<&QgDiagnostics> {
        self.current.as_ref()
    }

    /// Time-mean kinetic energy over all snapshots.
    pub fn mean_kinetic_energy(&self) -> Option<f64> {
        (self.n_updates > 0).then(|| self.ke_sum / self.n_updates as f64)
    }

    /// Time-mean CFL number over all snapshots.
    pub fn mean_cfl(&self) -> Option<f64> {
        (self.n_updates > 0).then(|| self.cfl_sum / self.n_updates as f64)
    }

    /// Maximum CFL number seen, NaN once any snapshot had a NaN CFL.
    pub fn max_cfl(&self) -> f64 {
        self.max_cfl_seen
    }

    /// Relative kinetic energy change since the first snapshot.
    pub fn energy_change(&self) -> f64 {
        match (&self.initial, &self.current) {
            (Some(first), Some(last)) if first.kinetic_energy.abs() > 1e-300 => {
                (last.kinetic_energy - first.kinetic_energy) / first.kinetic_energy.abs()
            }
            _ => 0.0,
        }
    }

    /// Check if simulation appears stable (no blow-up indicators).
    pub fn is_stable(&self) -> bool {
        self.current.as_ref().map_or(true, QgDiagnostics::is_stable)
    }

    /// Log a summary of the run at info level.
    pub fn log_summary(&self) {
        log::info!("=== Diagnostics Summary ({} updates) ===", self.n_updates);
        if let Some(mean_ke) = self.mean_kinetic_energy() {
            log::info!("  Mean KE:       {:.6e}", mean_ke);
        }
        if let Some(mean_cfl) = self.mean_cfl() {
            log::info!("  Mean CFL:      {:.4}", mean_cfl);
        }
        log::info!("  Max CFL:       {:.4}", self.max_cfl_seen);
        log::info!("  KE change:     {:.2e}", self.energy_change());
        if let Some(current) = &self.current {
            log::info!("  Current:       {}", current.summary_line());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(step: u64, cfl: f64, ke: f64) -> QgDiagnostics {
        QgDiagnostics {
            time: step as f64,
            step,
            cfl,
            kinetic_energy: ke,
            eddy_time: 1.0,
        }
    }

    #[test]
    fn test_empty_tracker() {
        let tracker = DiagnosticsTracker::new();
        assert_eq!(tracker.n_updates(), 0);
        assert!(tracker.mean_kinetic_energy().is_none());
        assert!(tracker.current().is_none());
        assert!(tracker.is_stable());
        assert_eq!(tracker.energy_change(), 0.0);
    }

    #[test]
    fn test_running_means_and_extrema() {
        let mut tracker = DiagnosticsTracker::new();
        tracker.update(snapshot(1, 0.1, 2.0));
        tracker.update(snapshot(2, 0.4, 4.0));
        tracker.update(snapshot(3, 0.2, 6.0));

        assert_eq!(tracker.n_updates(), 3);
        assert!((tracker.mean_kinetic_energy().unwrap() - 4.0).abs() < 1e-14);
        assert!((tracker.mean_cfl().unwrap() - 0.7 / 3.0).abs() < 1e-14);
        assert_eq!(tracker.max_cfl(), 0.4);
        assert_eq!(tracker.initial().unwrap().step, 1);
        assert_eq!(tracker.current().unwrap().step, 3);
        assert!((tracker.energy_change() - 2.0).abs() < 1e-14);
    }

    #[test]
    fn test_unstable_snapshot_detected() {
        let mut tracker = DiagnosticsTracker::new();
        tracker.update(snapshot(1, 0.5, 1.0));
        assert!(tracker.is_stable());

        tracker.update(snapshot(2, 1.5, 1.0));
        assert!(!tracker.is_stable());

        tracker.update(snapshot(3, 0.5, f64::NAN));
        assert!(!tracker.is_stable());
    }

    #[test]
    fn test_nan_cfl_is_sticky_and_unstable() {
        let mut tracker = DiagnosticsTracker::new();
        tracker.update(snapshot(1, 0.3, 1.0));
        tracker.update(snapshot(2, f64::NAN, 1.0));
        assert!(tracker.max_cfl().is_nan());
        assert!(!tracker.is_stable());

        // A later finite snapshot does not hide the earlier blow-up
        tracker.update(snapshot(3, 0.9, 1.0));
        assert!(tracker.max_cfl().is_nan());
    }

    #[test]
    fn test_rest_state_is_stable() {
        let diag = QgDiagnostics {
            time: 1.0,
            step: 1,
            cfl: 0.0,
            kinetic_energy: 0.0,
            eddy_time: f64::INFINITY,
        };
        assert!(diag.is_stable());
        assert!(diag.summary_line().contains("T_eddy=inf"));
    }
}
