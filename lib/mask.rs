//! Double-slit barrier geometry.
//!
//! The barrier occupies `thickness` columns centered on the grid mid-column.
//! Within those columns three solid segments block the field: a wall of
//! `height` rows down from the top edge, its mirror image up from the bottom
//! edge, and a central bar of `width` rows, leaving two slit openings.
//! [`DoubleSlit`] resolves the segments to flattened interior indices once,
//! at construction; the evolution engine clears those indices every frame.

use crate::grid::Grid;

/// Default barrier thickness as a fraction of `Nx`.
pub const DEF_THICKNESS_FRAC: f32 = 0.02;

/// Default central-bar height as a fraction of `Ny`.
pub const DEF_BAR_FRAC: f32 = 0.18;

/// Default slit-opening height as a fraction of `Ny`.
pub const DEF_OPENING_FRAC: f32 = 0.04;

/// Integer barrier parameters, in grid cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlitParams {
    /// Barrier thickness, in columns.
    pub thickness: usize,
    /// Central-bar height, in rows.
    pub width: usize,
    /// Wall height from the top and bottom edges, in rows.
    pub height: usize,
}

impl SlitParams {
    /// Derive parameters from grid-relative fractions: the barrier spans
    /// `thickness_frac · Nx` columns and the central bar `bar_frac · Ny`
    /// rows, with the walls sized to leave two openings of
    /// `opening_frac · Ny` rows each.
    pub fn scaled(
        grid: &Grid,
        thickness_frac: f32,
        bar_frac: f32,
        opening_frac: f32,
    ) -> Self
    {
        let thickness = (thickness_frac * grid.nx() as f32) as usize;
        let width = (bar_frac * grid.ny() as f32) as usize;
        let opening = (opening_frac * grid.ny() as f32) as usize;
        let height = (grid.ny() / 2).saturating_sub(width / 2 + opening);
        Self { thickness, width, height }
    }

    /// [`Self::scaled`] with the reference fractions.
    pub fn default_for(grid: &Grid) -> Self {
        Self::scaled(grid, DEF_THICKNESS_FRAC, DEF_BAR_FRAC, DEF_OPENING_FRAC)
    }
}

/// Double-slit interaction mask over a fixed grid.
///
/// Construction clips every segment to the interior block and resolves it to
/// a strictly increasing set of flattened indices, so each emitted index is
/// valid for the grid the mask was built from and per-frame interaction
/// allocates nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoubleSlit {
    params: SlitParams,
    mid: (usize, usize),
    edges: (usize, usize),
    slit: (isize, isize),
    indices: Vec<usize>,
}

impl DoubleSlit {
    /// Resolve the barrier geometry on a grid.
    pub fn new(grid: &Grid, params: SlitParams) -> Self {
        let ny = grid.ny() as isize;
        let nx = grid.nx() as isize;
        let mid = (grid.nx() / 2, grid.ny() / 2);
        let top: isize = 0;
        let bottom: isize = ny - 1;
        let slit = (
            mid.0 as isize - (params.thickness / 2) as isize,
            mid.1 as isize - (params.width / 2) as isize,
        );

        let interior_row
            = |iy: isize| (1..=ny - 2).contains(&iy).then_some(iy as usize);
        let height = params.height as isize;
        let width = params.width as isize;
        let mut rows: Vec<usize> = Vec::new();
        rows.extend((top..top + height).filter_map(interior_row));
        rows.extend((bottom - height + 1..=bottom).filter_map(interior_row));
        rows.extend((slit.1..slit.1 + width).filter_map(interior_row));
        rows.sort_unstable();
        rows.dedup();

        let cols: Vec<usize> = (slit.0..slit.0 + params.thickness as isize)
            .filter_map(|jx| (1..=nx - 2).contains(&jx).then_some(jx as usize))
            .collect();

        let mut indices: Vec<usize>
            = Vec::with_capacity(rows.len() * cols.len());
        for &jx in cols.iter() {
            for &iy in rows.iter() {
                indices.push(grid.flatten(iy, jx));
            }
        }

        Self {
            params,
            mid,
            edges: (top as usize, bottom as usize),
            slit,
            indices,
        }
    }

    /// Barrier parameters.
    pub fn params(&self) -> SlitParams { self.params }

    /// Grid midpoints, `(Nx/2, Ny/2)`.
    pub fn mid_point(&self) -> (usize, usize) { self.mid }

    /// Top and bottom full-grid rows the walls grow from.
    pub fn edge_rows(&self) -> (usize, usize) { self.edges }

    /// First barrier column and first central-bar row before clipping; either
    /// may lie outside the interior on degenerate grids.
    pub fn slit_origin(&self) -> (isize, isize) { self.slit }

    /// Flattened interior indices blocked by the barrier, strictly
    /// increasing.
    pub fn indices_to_zero(&self) -> &[usize] { &self.indices }
}

#[cfg(test)]
mod test {
    use super::*;

    fn reference_grid() -> Grid {
        Grid::new((6.0, 4.0), (0.04, 0.04)).unwrap()
    }

    #[test]
    fn scaled_parameters_match_reference() {
        let grid = reference_grid();
        let params = SlitParams::default_for(&grid);
        assert_eq!(params, SlitParams { thickness: 3, width: 18, height: 37 });
    }

    #[test]
    fn derived_geometry() {
        let grid = reference_grid();
        let slit = DoubleSlit::new(&grid, SlitParams::default_for(&grid));
        assert_eq!(slit.mid_point(), (75, 50));
        assert_eq!(slit.edge_rows(), (0, 100));
        assert_eq!(slit.slit_origin(), (74, 41));
    }

    #[test]
    fn indices_are_valid_and_increasing() {
        let grid = reference_grid();
        let slit = DoubleSlit::new(&grid, SlitParams::default_for(&grid));
        let ks = slit.indices_to_zero();
        assert!(!ks.is_empty());
        assert!(ks.windows(2).all(|w| w[0] < w[1]));
        assert!(ks.iter().all(|&k| k < grid.n_interior()));
    }

    #[test]
    fn segments_leave_two_openings() {
        let grid = reference_grid();
        let slit = DoubleSlit::new(&grid, SlitParams::default_for(&grid));
        let blocked: Vec<(usize, usize)> = slit.indices_to_zero().iter()
            .map(|&k| grid.unflatten(k))
            .collect();

        // thickness 3 centered on the mid-column
        let cols: std::collections::BTreeSet<usize>
            = blocked.iter().map(|&(_, jx)| jx).collect();
        assert_eq!(cols.into_iter().collect::<Vec<usize>>(), vec![74, 75, 76]);

        // walls of height 37 grow from rows 0 and 100; their interior parts
        // are [1, 36] and [64, 99], and the bar spans [41, 58]
        let rows: std::collections::BTreeSet<usize>
            = blocked.iter().map(|&(iy, _)| iy).collect();
        let expected: std::collections::BTreeSet<usize>
            = (1..=36).chain(41..=58).chain(64..=99).collect();
        assert_eq!(rows, expected);

        // openings at [37, 40] and [59, 63] stay clear
        for iy in (37..=40).chain(59..=63) {
            assert!(!rows.contains(&iy), "row {} should be open", iy);
        }
    }

    #[test]
    fn degenerate_parameters_make_empty_or_clipped_sets() {
        let grid = reference_grid();
        let none = DoubleSlit::new(
            &grid,
            SlitParams { thickness: 0, width: 18, height: 37 },
        );
        assert!(none.indices_to_zero().is_empty());

        // walls taller than the grid block whole columns
        let solid = DoubleSlit::new(
            &grid,
            SlitParams { thickness: 1, width: 0, height: 1000 },
        );
        assert_eq!(solid.indices_to_zero().len(), grid.rows());
    }

    #[test]
    fn overlapping_segments_stay_a_set() {
        let grid = Grid::with_sizes((1.0, 1.0), (8, 8)).unwrap();
        let slit = DoubleSlit::new(
            &grid,
            SlitParams { thickness: 2, width: 6, height: 4 },
        );
        let ks = slit.indices_to_zero();
        assert!(ks.windows(2).all(|w| w[0] < w[1]));
    }
}
