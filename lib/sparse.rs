//! Minimal compressed-sparse-row support for the step operators.
//!
//! Assembly goes through unordered `(row, col, value)` triplets compressed
//! in a single `O(nnz)` pass; the stencil operators are never materialized
//! densely. [`CsrMatrix::to_dense`] exists for toy grids and tests only.

use ndarray as nd;
use num_complex::Complex32 as C32;
use num_traits::Zero;
use crate::{ Arr1, error::BuildError };

pub type SparseResult<T> = Result<T, BuildError>;

/// One matrix entry: `(row, col, value)`.
pub type Triplet = (usize, usize, C32);

/// Complex sparse matrix in compressed-sparse-row form.
///
/// Column indices are strictly increasing within each row.
#[derive(Clone, Debug, PartialEq)]
pub struct CsrMatrix {
    nrows: usize,
    ncols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<C32>,
}

impl CsrMatrix {
    /// Compress a list of triplets.
    ///
    /// Triplets may arrive in any order; entries at a repeated position are
    /// summed. Runs in `O(nnz + nrows)` time and memory for bounded row
    /// lengths, with all storage acquired through fallible reservation.
    ///
    /// *Panics if any triplet lies outside `nrows × ncols`.*
    pub fn from_triplets(nrows: usize, ncols: usize, triplets: &[Triplet])
        -> SparseResult<Self>
    {
        let nnz = triplets.len();
        let mut indptr: Vec<usize> = Vec::new();
        indptr.try_reserve_exact(nrows + 1)?;
        indptr.resize(nrows + 1, 0);
        let mut indices: Vec<usize> = Vec::new();
        indices.try_reserve_exact(nnz)?;
        indices.resize(nnz, 0);
        let mut data: Vec<C32> = Vec::new();
        data.try_reserve_exact(nnz)?;
        data.resize(nnz, C32::zero());

        for &(i, j, _) in triplets.iter() {
            assert!(
                i < nrows && j < ncols,
                "triplet ({}, {}) out of bounds for a {}x{} matrix",
                i, j, nrows, ncols,
            );
            indptr[i + 1] += 1;
        }
        for i in 0..nrows {
            indptr[i + 1] += indptr[i];
        }
        // indptr[i] doubles as the write cursor for row i, then shifts back
        for &(i, j, v) in triplets.iter() {
            let p = indptr[i];
            indices[p] = j;
            data[p] = v;
            indptr[i] += 1;
        }
        for i in (1..=nrows).rev() {
            indptr[i] = indptr[i - 1];
        }
        indptr[0] = 0;

        // per-row insertion sort; stencil rows hold a handful of entries
        for i in 0..nrows {
            let (start, end) = (indptr[i], indptr[i + 1]);
            for p in start + 1..end {
                let mut q = p;
                while q > start && indices[q - 1] > indices[q] {
                    indices.swap(q - 1, q);
                    data.swap(q - 1, q);
                    q -= 1;
                }
            }
        }

        // coalesce duplicate positions
        let mut w: usize = 0;
        let mut start = 0;
        for i in 0..nrows {
            let end = indptr[i + 1];
            indptr[i] = w;
            let mut p = start;
            while p < end {
                let col = indices[p];
                let mut val = data[p];
                p += 1;
                while p < end && indices[p] == col {
                    val += data[p];
                    p += 1;
                }
                indices[w] = col;
                data[w] = val;
                w += 1;
            }
            start = end;
        }
        indptr[nrows] = w;
        indices.truncate(w);
        data.truncate(w);

        Ok(Self { nrows, ncols, indptr, indices, data })
    }

    /// Matrix dimensions `(nrows, ncols)`.
    pub fn shape(&self) -> (usize, usize) { (self.nrows, self.ncols) }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize { self.data.len() }

    /// Column indices and values of row `i`.
    ///
    /// *Panics if `i ≥ nrows`.*
    pub fn row(&self, i: usize) -> (&[usize], &[C32]) {
        let (start, end) = (self.indptr[i], self.indptr[i + 1]);
        (&self.indices[start..end], &self.data[start..end])
    }

    /// Stored value at `(i, j)`, if present.
    ///
    /// *Panics if `i ≥ nrows`.*
    pub fn get(&self, i: usize, j: usize) -> Option<C32> {
        let (cols, vals) = self.row(i);
        cols.binary_search(&j).ok().map(|p| vals[p])
    }

    /// Iterate over stored entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, C32)> + '_ {
        (0..self.nrows)
            .flat_map(move |i| {
                let (cols, vals) = self.row(i);
                cols.iter().zip(vals).map(move |(&j, &v)| (i, j, v))
            })
    }

    /// Compute `y = self · x`, reusing the storage of `y`.
    ///
    /// *Panics if `x.len() != ncols` or `y.len() != nrows`.*
    pub fn mul_vec_into<S>(
        &self,
        x: &Arr1<S>,
        y: &mut nd::Array1<C32>,
    )
    where S: nd::Data<Elem = C32>
    {
        assert_eq!(
            x.len(), self.ncols,
            "input length does not match matrix columns",
        );
        assert_eq!(
            y.len(), self.nrows,
            "output length does not match matrix rows",
        );
        for (i, yi) in y.iter_mut().enumerate() {
            let (cols, vals) = self.row(i);
            *yi = cols.iter().zip(vals)
                .map(|(&j, &v)| v * x[j])
                .sum();
        }
    }

    /// Compute `self · x` into fresh storage.
    ///
    /// *Panics if `x.len() != ncols`.*
    pub fn mul_vec<S>(&self, x: &Arr1<S>) -> nd::Array1<C32>
    where S: nd::Data<Elem = C32>
    {
        let mut y: nd::Array1<C32> = nd::Array1::zeros(self.nrows);
        self.mul_vec_into(x, &mut y);
        y
    }

    /// Expand to dense storage.
    ///
    /// Quadratic in memory; intended for toy grids and tests only.
    pub fn to_dense(&self) -> nd::Array2<C32> {
        let mut a: nd::Array2<C32>
            = nd::Array2::zeros((self.nrows, self.ncols));
        for (i, j, v) in self.iter() {
            a[[i, j]] = v;
        }
        a
    }
}
