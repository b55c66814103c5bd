//! Miscellaneous tools.

use std::ops::Add;
use ndarray as nd;
use ndarray_linalg::Scalar;
use num_traits::{ Float, Zero };
use crate::Arr1;

pub use ndarray_npy::NpzWriter;

/// Create a directory, parents included, if it doesn't already exist.
#[macro_export]
macro_rules! mkdir {
    ( $dir:expr ) => {
        match std::fs::create_dir_all(&$dir) {
            Ok(_) => {},
            Err(err) => {
                panic!("couldn't create directory {:?}: {}", $dir, err)
            },
        }
    }
}

/// Write arrays to a `.npz` archive.
#[macro_export]
macro_rules! write_npz {
    ( $path:expr, arrays: { $( $name:expr => $arr:expr ),* $(,)? } ) => {
        {
            let mut npz
                = $crate::utils::NpzWriter::new(
                    std::fs::File::create(&$path)
                        .unwrap_or_else(|err| {
                            panic!(
                                "couldn't create file {:?}: {}", $path, err)
                        })
                );
            $(
                npz.add_array($name, $arr)
                    .unwrap_or_else(|err| {
                        panic!("couldn't write array '{}': {}", $name, err)
                    });
            )*
            npz.finish()
                .unwrap_or_else(|err| {
                    panic!("couldn't write archive {:?}: {}", $path, err)
                });
        }
    }
}

/// Calculate the total probability carried by a flattened wavefunction.
///
/// The interior samples all sit on a uniform mesh, so the squared moduli are
/// summed without measure weights.
pub fn wf_probability<S, A>(q: &Arr1<S>) -> A::Real
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    q.iter().map(|qk| qk.square())
        .fold(<A as Scalar>::Real::zero(), <A as Scalar>::Real::add)
}

/// Find the largest modulus among the samples of a flattened wavefunction,
/// or `None` if the array is empty.
pub fn wf_max_modulus<S, A>(q: &Arr1<S>) -> Option<A::Real>
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    if q.is_empty() { return None; }
    Some(
        q.iter().map(|qk| qk.abs())
            .fold(<A as Scalar>::Real::zero(), Float::max)
    )
}
