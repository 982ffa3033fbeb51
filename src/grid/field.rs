//! Layered field storage.

use num_complex::Complex64;

use crate::error::{QgError, QgResult};

/// Dense layered field with layout `[n_layers, n_rows, n_cols]`.
///
/// Physical fields use `(nz, ny, nx)`; spectral fields use `(nz, nl, nk)`.
/// Values are stored as `data[(z * n_rows + j) * n_cols + i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerField<T> {
    /// Field values, row-major per layer
    pub data: Vec<T>,
    /// Number of layers
    pub n_layers: usize,
    /// Number of rows (y or l)
    pub n_rows: usize,
    /// Number of columns (x or k)
    pub n_cols: usize,
}

/// Real-valued field on the physical grid.
pub type PhysicalField = LayerField<f64>;

/// Complex spectral coefficients on the real-FFT wavenumber grid.
pub type SpectralField = LayerField<Complex64>;

impl<T: Copy + Default> LayerField<T> {
    /// Create a zero-initialized field.
    pub fn zeros(n_layers: usize, n_rows: usize, n_cols: usize) -> Self {
        Self::uniform(n_layers, n_rows, n_cols, T::default())
    }

    /// Create a field with every entry set to `value`.
    pub fn uniform(n_layers: usize, n_rows: usize, n_cols: usize, value: T) -> Self {
        Self {
            data: vec![value; n_layers * n_rows * n_cols],
            n_layers,
            n_rows,
            n_cols,
        }
    }

    /// Wrap existing data, checking its length against the shape.
    pub fn from_vec(n_layers: usize, n_rows: usize, n_cols: usize, data: Vec<T>) -> QgResult<Self> {
        let expected = n_layers * n_rows * n_cols;
        if data.len() != expected {
            return Err(QgError::shape_mismatch(
                format!("{} values for shape {}x{}x{}", expected, n_layers, n_rows, n_cols),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self {
            data,
            n_layers,
            n_rows,
            n_cols,
        })
    }

    /// Shape as `(n_layers, n_rows, n_cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n_layers, self.n_rows, self.n_cols)
    }

    /// Number of values in one layer.
    #[inline]
    pub fn layer_len(&self) -> usize {
        self.n_rows * self.n_cols
    }

    /// Values of layer `z`.
    pub fn layer(&self, z: usize) -> &[T] {
        let start = z * self.layer_len();
        &self.data[start..start + self.layer_len()]
    }

    /// Mutable values of layer `z`.
    pub fn layer_mut(&mut self, z: usize) -> &mut [T] {
        let n = self.layer_len();
        let start = z * n;
        &mut self.data[start..start + n]
    }

    #[inline]
    fn index(&self, z: usize, j: usize, i: usize) -> usize {
        (z * self.n_rows + j) * self.n_cols + i
    }

    /// Value at layer `z`, row `j`, column `i`.
    #[inline]
    pub fn get(&self, z: usize, j: usize, i: usize) -> T {
        self.data[self.index(z, j, i)]
    }

    /// Set the value at layer `z`, row `j`, column `i`.
    #[inline]
    pub fn set(&mut self, z: usize, j: usize, i: usize, value: T) {
        let idx = self.index(z, j, i);
        self.data[idx] = value;
    }

    /// Fail with [`QgError::ShapeMismatch`] unless `other` has the same shape.
    pub fn check_same_shape<U>(&self, other: &LayerField<U>) -> QgResult<()> {
        let other_shape = (other.n_layers, other.n_rows, other.n_cols);
        if self.shape() != other_shape {
            return Err(QgError::shape_mismatch(
                format!("{:?}", self.shape()),
                format!("{:?}", other_shape),
            ));
        }
        Ok(())
    }
}

impl LayerField<f64> {
    /// Get maximum absolute value.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|&x| x.abs()).fold(0.0, f64::max)
    }

    /// Scale all values by a constant.
    pub fn scale(&mut self, c: f64) {
        for v in &mut self.data {
            *v *= c;
        }
    }
}

impl LayerField<Complex64> {
    /// Get maximum coefficient modulus.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|z| z.norm()).fold(0.0, f64::max)
    }

    /// Multiply every layer pointwise by a real `(n_rows, n_cols)` weight.
    ///
    /// Used for spectral weighting such as `wv ⊙ ph`.
    pub fn weighted(&self, weight: &[f64]) -> QgResult<Self> {
        if weight.len() != self.layer_len() {
            return Err(QgError::shape_mismatch(
                format!("{} weights", self.layer_len()),
                format!("{} weights", weight.len()),
            ));
        }
        let mut out = self.clone();
        for z in 0..out.n_layers {
            for (c, &w) in out.layer_mut(z).iter_mut().zip(weight) {
                *c *= w;
            }
        }
        Ok(out)
    }
}
