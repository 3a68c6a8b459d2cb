use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint};

use super::FloatingPoint;

/// Control points laid out as rows along the `v` direction and columns along the `u` direction
pub type ControlGrid<T, D> = Vec<Vec<OPoint<T, D>>>;

/// One weight per control point, same layout as [`ControlGrid`]
pub type WeightGrid<T> = Vec<Vec<T>>;

/// Returns `(rows, columns)` of a rectangular grid,
/// or `None` if the grid is empty or ragged
pub fn grid_shape<P>(grid: &[Vec<P>]) -> Option<(usize, usize)> {
    let columns = grid.first()?.len();
    if columns == 0 || grid.iter().any(|row| row.len() != columns) {
        return None;
    }
    Some((grid.len(), columns))
}

/// Transpose a rectangular grid so that rows become columns
pub fn transpose_grid<P: Clone>(grid: &[Vec<P>]) -> Vec<Vec<P>> {
    let columns = grid.first().map(|row| row.len()).unwrap_or(0);
    let mut transposed = vec![vec![]; columns];
    grid.iter().for_each(|row| {
        row.iter().enumerate().for_each(|(i, p)| {
            transposed[i].push(p.clone());
        })
    });
    transposed
}

/// Cast every point of a control grid to another floating point type
pub fn cast_control_grid<T, F, D>(grid: &ControlGrid<T, D>) -> ControlGrid<F, D>
where
    T: FloatingPoint,
    F: FloatingPoint + simba::scalar::SupersetOf<T>,
    D: DimName,
    DefaultAllocator: Allocator<D>,
{
    grid.iter()
        .map(|row| row.iter().map(|p| p.clone().cast::<F>()).collect())
        .collect()
}
