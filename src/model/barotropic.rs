//! Single-layer (barotropic) QG model.
//!
//! The PV anomaly of a single layer of depth H on a β-plane,
//!
//! ```text
//! q = ∇²ψ - kd² ψ
//! ```
//!
//! with a uniform background zonal flow U and background PV gradient β.
//! Because there is only one layer, the inversion is diagonal in spectral
//! space and never needs a linear solve.

use rand::Rng;

use super::background::BackgroundState;
use super::forcing::{ForcingHook, NoForcing};
use super::inversion::InversionOperator;
use super::params::BarotropicParams;
use super::traits::{QgModel, QgModelInfo, SpectralEngine, initialize_model};
use crate::diagnostics::{
    DiagnosticsCadence, FlowState, QgDiagnostics, calc_cfl, calc_eddy_time, calc_ke,
};
use crate::error::{QgError, QgResult};
use crate::grid::{SpectralField, SpectralGrid};
use crate::initial::pv_noise;
use crate::types::LayerProfile;

/// Barotropic QG model hooks.
///
/// # Example
///
/// ```
/// use qg_rs::grid::{PhysicalField, SpectralGrid};
/// use qg_rs::model::{BarotropicModel, BarotropicParams, SpectralEngine};
/// use qg_rs::QgResult;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// struct Engine {
///     grid: SpectralGrid,
///     q: Option<PhysicalField>,
/// }
///
/// impl SpectralEngine for Engine {
///     fn grid(&self) -> &SpectralGrid {
///         &self.grid
///     }
///
///     fn set_q(&mut self, q: PhysicalField) -> QgResult<()> {
///         self.q = Some(q);
///         Ok(())
///     }
/// }
///
/// # fn main() -> QgResult<()> {
/// let mut engine = Engine { grid: SpectralGrid::new(16, 16, 1.0e6, 1.0e6)?, q: None };
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let params = BarotropicParams::default().with_beta(1.5e-11).with_u(0.1);
/// let model = BarotropicModel::build(params, &mut engine, &mut rng)?;
/// assert!(engine.q.is_some());
///
/// let qh = engine.grid.spectral_zeros(1);
/// let ph = model.invert(&qh)?;
/// assert_eq!(ph.shape(), (1, 16, 9));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct BarotropicModel<F: ForcingHook = NoForcing> {
    params: BarotropicParams,
    kd2: f64,
    background: Option<BackgroundState>,
    inversion: Option<InversionOperator>,
    forcing: F,
}

impl BarotropicModel<NoForcing> {
    /// Create an uninitialized model with no forcing.
    pub fn new(params: BarotropicParams) -> QgResult<Self> {
        Self::with_forcing(params, NoForcing)
    }

    /// Create, initialize and seed a model against `engine`.
    ///
    /// Runs the background, inversion and forcing hooks, then sets the PV
    /// field to small uniform noise drawn from `rng`.
    pub fn build<E, R>(params: BarotropicParams, engine: &mut E, rng: &mut R) -> QgResult<Self>
    where
        E: SpectralEngine + ?Sized,
        R: Rng + ?Sized,
    {
        let mut model = Self::new(params)?;
        initialize_model(&mut model, engine.grid())?;

        let q = pv_noise(engine.grid(), model.n_layers(), rng);
        engine.set_q(q)?;
        log::debug!("seeded initial PV noise for {} model", model.name());

        Ok(model)
    }
}

impl<F: ForcingHook> BarotropicModel<F> {
    /// Create an uninitialized model with a custom forcing hook.
    pub fn with_forcing(params: BarotropicParams, forcing: F) -> QgResult<Self> {
        params.validate()?;
        let kd2 = params.kd2()?;
        Ok(Self {
            params,
            kd2,
            background: None,
            inversion: None,
            forcing,
        })
    }

    /// Physical parameters.
    pub fn params(&self) -> &BarotropicParams {
        &self.params
    }

    /// Squared deformation wavenumber.
    pub fn kd2(&self) -> f64 {
        self.kd2
    }

    /// Background state, available after [`QgModel::init_background`].
    pub fn background(&self) -> QgResult<&BackgroundState> {
        self.background
            .as_ref()
            .ok_or(QgError::NotInitialized("background state"))
    }

    /// Inversion operator, available after [`QgModel::init_inversion`].
    pub fn inversion(&self) -> QgResult<&InversionOperator> {
        self.inversion
            .as_ref()
            .ok_or(QgError::NotInitialized("inversion operator"))
    }

    /// Forcing hook.
    pub fn forcing(&self) -> &F {
        &self.forcing
    }

    /// Reset the background zonal flow.
    ///
    /// Re-derives `Ubg` only; the PV gradient terms depend on β and are kept.
    pub fn set_u(&mut self, u: impl Into<LayerProfile>) -> QgResult<()> {
        let u = u.into();
        if !u.is_finite() {
            return Err(QgError::InvalidConfig(format!(
                "background velocity U must be finite, got {:?}",
                u
            )));
        }
        if let Some(background) = self.background.as_mut() {
            background.set_u(&u)?;
        } else {
            u.expand(self.n_layers())?;
        }
        self.params.u = u;
        Ok(())
    }

    /// Streamfunction coefficients for the PV coefficients `qh`.
    pub fn invert(&self, qh: &SpectralField) -> QgResult<SpectralField> {
        self.inversion()?.apply(qh)
    }
}

impl<F: ForcingHook> QgModelInfo for BarotropicModel<F> {
    fn name(&self) -> &'static str {
        "barotropic"
    }

    fn description(&self) -> &str {
        "Single-layer quasi-geostrophic model"
    }

    fn n_layers(&self) -> usize {
        1
    }
}

impl<F: ForcingHook> QgModel for BarotropicModel<F> {
    fn init_background(&mut self, grid: &SpectralGrid) -> QgResult<()> {
        let background =
            BackgroundState::new(grid, self.n_layers(), &self.params.beta, &self.params.u)?;
        log::debug!(
            "background: Qy={:?} Ubg={:?}",
            background.qy,
            background.ubg
        );
        self.background = Some(background);
        Ok(())
    }

    fn init_inversion(&mut self, grid: &SpectralGrid) -> QgResult<()> {
        self.inversion = Some(InversionOperator::barotropic(grid, self.kd2));
        log::debug!("inversion operator built with kd2={:.4e}", self.kd2);
        Ok(())
    }

    fn init_forcing(&mut self, grid: &SpectralGrid) -> QgResult<()> {
        self.forcing.initialize(grid)?;
        log::debug!("forcing: {}", self.forcing.name());
        Ok(())
    }

    fn on_diagnostics_cycle(
        &self,
        state: &FlowState<'_>,
        cadence: &DiagnosticsCadence,
    ) -> QgResult<Option<QgDiagnostics>> {
        if !cadence.should_fire(state.t, state.dt, state.tc) {
            return Ok(None);
        }

        let background = self.background()?;
        state.grid.check_physical(state.u)?;

        let cfl = calc_cfl(state.u, state.v, &background.ubg, state.dt, state.grid.dx)?;
        let kinetic_energy = calc_ke(state.grid, state.ph)?;
        let eddy_time = calc_eddy_time(state.grid, state.ph, self.params.h)?;

        let diag = QgDiagnostics {
            time: state.t,
            step: state.tc,
            cfl,
            kinetic_energy,
            eddy_time,
        };

        if !cfl.is_finite() {
            log::warn!("non-finite CFL number at step {}", state.tc);
        } else if cfl >= 1.0 {
            log::warn!("CFL={:.3} >= 1 at step {}", cfl, state.tc);
        }
        if !kinetic_energy.is_finite() {
            log::warn!("non-finite kinetic energy at step {}", state.tc);
        }
        log::debug!("{}", diag.summary_line());

        Ok(Some(diag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    const BETA: f64 = 1.5e-11;

    fn grid() -> SpectralGrid {
        SpectralGrid::new(8, 8, 1.0e6, 1.0e6).unwrap()
    }

    fn initialized(params: BarotropicParams) -> BarotropicModel {
        let mut model = BarotropicModel::new(params).unwrap();
        initialize_model(&mut model, &grid()).unwrap();
        model
    }

    #[test]
    fn test_hooks_populate_state() {
        let model = initialized(BarotropicParams::default().with_beta(BETA).with_u(0.1));
        let bg = model.background().unwrap();
        assert_eq!(bg.qy, vec![BETA]);
        assert_eq!(bg.ubg, vec![0.1]);
        assert_eq!(model.inversion().unwrap().shape(), (1, 1, 8, 5));
        assert_eq!(model.kd2(), 0.0);
    }

    #[test]
    fn test_uninitialized_access_fails() {
        let model = BarotropicModel::new(BarotropicParams::default()).unwrap();
        assert!(matches!(
            model.background(),
            Err(QgError::NotInitialized(_))
        ));
        let qh = grid().spectral_zeros(1);
        assert!(model.invert(&qh).is_err());
    }

    #[test]
    fn test_invalid_params_rejected_at_construction() {
        let params = BarotropicParams::default().with_rd(-1.0);
        assert!(BarotropicModel::new(params).is_err());

        let params = BarotropicParams::default().with_u(vec![0.1, 0.2]);
        let mut model = BarotropicModel::new(params).unwrap();
        assert!(matches!(
            model.init_background(&grid()),
            Err(QgError::ShapeMismatch { .. })
        ));
    }

    #[derive(Debug, Default)]
    struct RecordingForcing {
        grid_size: Option<(usize, usize)>,
    }

    impl ForcingHook for RecordingForcing {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn initialize(&mut self, grid: &SpectralGrid) -> QgResult<()> {
            self.grid_size = Some((grid.nl, grid.nk));
            Ok(())
        }
    }

    #[test]
    fn test_forcing_hook_initialized_with_grid() {
        let mut model =
            BarotropicModel::with_forcing(BarotropicParams::default(), RecordingForcing::default())
                .unwrap();
        assert_eq!(model.forcing().grid_size, None);

        initialize_model(&mut model, &grid()).unwrap();
        assert_eq!(model.forcing().grid_size, Some((8, 5)));
        assert_eq!(model.forcing().name(), "recording");
    }

    #[test]
    fn test_set_u_before_init_checks_layer_count() {
        let mut model = BarotropicModel::new(BarotropicParams::default()).unwrap();
        model.set_u(vec![0.3]).unwrap();
        assert_eq!(model.params().u, LayerProfile::PerLayer(vec![0.3]));

        let err = model.set_u(vec![0.1, 0.2]).unwrap_err();
        assert!(matches!(err, QgError::ShapeMismatch { .. }));
        assert_eq!(model.params().u, LayerProfile::PerLayer(vec![0.3]));
    }

    #[test]
    fn test_set_u_updates_background_only() {
        let mut model = initialized(BarotropicParams::default().with_beta(BETA).with_u(0.1));
        let ik_qy = model.background().unwrap().ik_qy.clone();

        model.set_u(0.4).unwrap();
        let bg = model.background().unwrap();
        assert_eq!(bg.ubg, vec![0.4]);
        assert_eq!(bg.qy, vec![BETA]);
        assert_eq!(bg.ik_qy, ik_qy);
        assert_eq!(model.params().u, LayerProfile::Uniform(0.4));

        assert!(model.set_u(vec![0.1, 0.2]).is_err());
        assert!(model.set_u(f64::NAN).is_err());
        assert_eq!(model.background().unwrap().ubg, vec![0.4]);
    }

    #[test]
    fn test_invert_uses_deformation_radius() {
        let model = initialized(BarotropicParams::default().with_rd(1.0e4));
        let g = grid();
        let qh = SpectralField::uniform(1, g.nl, g.nk, Complex64::new(1.0, 0.0));
        let ph = model.invert(&qh).unwrap();
        let kd2 = model.kd2();
        assert!((kd2 - 1.0e-8).abs() < 1e-20);
        assert_eq!(ph.get(0, 0, 0).re, -kd2);
        assert_eq!(ph.get(0, 1, 1).re, -(g.wv2i[g.nk + 1] + kd2));
        assert_eq!(ph.get(0, 1, 1).im, 0.0);
    }

    #[test]
    fn test_diagnostics_skipped_off_cadence() {
        let model = initialized(BarotropicParams::default());
        let g = grid();
        let u = g.physical_zeros(1);
        let ph = g.spectral_zeros(1);
        let cadence = DiagnosticsCadence::new(2).unwrap();

        let first_step = FlowState { grid: &g, u: &u, v: &u, ph: &ph, t: 0.0, dt: 1.0, tc: 0 };
        assert!(model.on_diagnostics_cycle(&first_step, &cadence).unwrap().is_none());

        let odd_step = FlowState { t: 3.0, tc: 3, ..first_step };
        assert!(model.on_diagnostics_cycle(&odd_step, &cadence).unwrap().is_none());

        let even_step = FlowState { t: 4.0, tc: 4, ..first_step };
        let diag = model.on_diagnostics_cycle(&even_step, &cadence).unwrap().unwrap();
        assert_eq!(diag.step, 4);
        assert_eq!(diag.kinetic_energy, 0.0);
        assert!(diag.eddy_time.is_infinite());
    }

    #[test]
    fn test_diagnostics_include_background_flow() {
        let model = initialized(BarotropicParams::default().with_u(0.2));
        let g = grid();
        let u = g.physical_zeros(1);
        let ph = g.spectral_zeros(1);
        let state = FlowState { grid: &g, u: &u, v: &u, ph: &ph, t: 10.0, dt: 10.0, tc: 1 };

        let diag = model
            .on_diagnostics_cycle(&state, &DiagnosticsCadence::every_step())
            .unwrap()
            .unwrap();
        assert!((diag.cfl - 0.2 * 10.0 / g.dx).abs() < 1e-15);
    }

    #[test]
    fn test_diagnostics_flag_nan_velocity() {
        let model = initialized(BarotropicParams::default().with_u(0.1));
        let g = grid();
        let mut u = g.physical_zeros(1);
        let v = g.physical_zeros(1);
        u.set(0, 2, 2, f64::NAN);
        let ph = g.spectral_zeros(1);
        let state = FlowState { grid: &g, u: &u, v: &v, ph: &ph, t: 600.0, dt: 600.0, tc: 1 };

        let diag = model
            .on_diagnostics_cycle(&state, &DiagnosticsCadence::every_step())
            .unwrap()
            .unwrap();
        assert!(diag.cfl.is_nan());
        assert!(!diag.is_stable());
    }
}
