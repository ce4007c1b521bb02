//! Shape-preserving elementwise mapping over scalars and arrays.
//!
//! Every conversion is written once against [`Elementwise`] and therefore works
//! on a bare `f64`, fixed-size arrays, slices and vectors (and `ndarray` arrays
//! of any dimension with the `ndarray` feature). The output always has the same
//! shape as the input and is freshly allocated.

use std::convert::Infallible;

/// A scalar or collection of `f64` values that can be mapped element by element.
pub trait Elementwise {
    /// Result of mapping, same shape as the input.
    type Output;

    /// Maps every element through `f`, stopping at the first error.
    ///
    /// `f` receives the flat (row-major) position of the element, or `None`
    /// when the input is a scalar.
    fn try_map_indexed<E, F>(self, f: F) -> Result<Self::Output, E>
    where
        F: FnMut(Option<usize>, f64) -> Result<f64, E>;

    /// Maps every element through an infallible `f`.
    fn map_values<F>(self, mut f: F) -> Self::Output
    where
        Self: Sized,
        F: FnMut(f64) -> f64,
    {
        match self.try_map_indexed(|_, x| Ok::<f64, Infallible>(f(x))) {
            Ok(out) => out,
            Err(never) => match never {},
        }
    }
}

impl Elementwise for f64 {
    type Output = f64;

    fn try_map_indexed<E, F>(self, mut f: F) -> Result<f64, E>
    where
        F: FnMut(Option<usize>, f64) -> Result<f64, E>,
    {
        f(None, self)
    }
}

impl Elementwise for &f64 {
    type Output = f64;

    fn try_map_indexed<E, F>(self, f: F) -> Result<f64, E>
    where
        F: FnMut(Option<usize>, f64) -> Result<f64, E>,
    {
        (*self).try_map_indexed(f)
    }
}

impl<const N: usize> Elementwise for [f64; N] {
    type Output = [f64; N];

    fn try_map_indexed<E, F>(self, f: F) -> Result<[f64; N], E>
    where
        F: FnMut(Option<usize>, f64) -> Result<f64, E>,
    {
        (&self).try_map_indexed(f)
    }
}

impl<const N: usize> Elementwise for &[f64; N] {
    type Output = [f64; N];

    fn try_map_indexed<E, F>(self, mut f: F) -> Result<[f64; N], E>
    where
        F: FnMut(Option<usize>, f64) -> Result<f64, E>,
    {
        let mut out = [0.0; N];
        for (i, (slot, &x)) in out.iter_mut().zip(self.iter()).enumerate() {
            *slot = f(Some(i), x)?;
        }
        Ok(out)
    }
}

impl Elementwise for &[f64] {
    type Output = Vec<f64>;

    fn try_map_indexed<E, F>(self, mut f: F) -> Result<Vec<f64>, E>
    where
        F: FnMut(Option<usize>, f64) -> Result<f64, E>,
    {
        self.iter()
            .enumerate()
            .map(|(i, &x)| f(Some(i), x))
            .collect()
    }
}

impl Elementwise for &Vec<f64> {
    type Output = Vec<f64>;

    fn try_map_indexed<E, F>(self, f: F) -> Result<Vec<f64>, E>
    where
        F: FnMut(Option<usize>, f64) -> Result<f64, E>,
    {
        self.as_slice().try_map_indexed(f)
    }
}

impl Elementwise for Vec<f64> {
    type Output = Vec<f64>;

    fn try_map_indexed<E, F>(self, f: F) -> Result<Vec<f64>, E>
    where
        F: FnMut(Option<usize>, f64) -> Result<f64, E>,
    {
        self.as_slice().try_map_indexed(f)
    }
}

#[cfg(feature = "ndarray")]
impl<S, D> Elementwise for &ndarray::ArrayBase<S, D>
where
    S: ndarray::Data<Elem = f64>,
    D: ndarray::Dimension,
{
    type Output = ndarray::Array<f64, D>;

    fn try_map_indexed<E, F>(self, mut f: F) -> Result<ndarray::Array<f64, D>, E>
    where
        F: FnMut(Option<usize>, f64) -> Result<f64, E>,
    {
        let mut out = ndarray::Array::<f64, D>::zeros(self.raw_dim());
        for (i, (slot, &x)) in out.iter_mut().zip(self.iter()).enumerate() {
            *slot = f(Some(i), x)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_has_no_index() {
        let seen = 2.0_f64.try_map_indexed(|i, x| {
            assert_eq!(i, None);
            Ok::<_, ()>(x * 3.0)
        });
        assert_eq!(seen, Ok(6.0));
    }

    #[test]
    fn arrays_keep_shape_and_positions() {
        let out = [1.0, 2.0, 3.0].try_map_indexed(|i, x| Ok::<_, ()>(x + i.unwrap_or(99) as f64));
        assert_eq!(out, Ok([1.0, 3.0, 5.0]));

        let v = vec![4.0, 5.0];
        let doubled = (&v).map_values(|x| x * 2.0);
        assert_eq!(doubled, vec![8.0, 10.0]);
        // input untouched
        assert_eq!(v, vec![4.0, 5.0]);
    }

    #[test]
    fn first_error_stops_mapping() {
        let mut visited = Vec::new();
        let result = vec![1.0, -1.0, 2.0].try_map_indexed(|i, x| {
            visited.push(i);
            if x < 0.0 {
                Err(i)
            } else {
                Ok(x)
            }
        });
        assert_eq!(result, Err(Some(1)));
        assert_eq!(visited, vec![Some(0), Some(1)]);
    }

    #[test]
    fn empty_slice_maps_to_empty_vec() {
        let empty: &[f64] = &[];
        assert!(empty.map_values(|x| x + 1.0).is_empty());
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn ndarray_uses_row_major_positions() {
        let a = ndarray::arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        let out = (&a).try_map_indexed(|i, _| Ok::<_, ()>(i.unwrap_or(99) as f64));
        assert_eq!(out, Ok(ndarray::arr2(&[[0.0, 1.0], [2.0, 3.0]])));
    }
}
