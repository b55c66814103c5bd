//! Collection of pre-defined scattering studies.

pub mod double_slit;
