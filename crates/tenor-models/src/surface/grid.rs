//! Bilinearly-interpolated grid surface.

use crate::error::{VolError, VolResult};

use super::traits::Surface;

/// A surface defined on a rectangular grid of nodes with bilinear
/// interpolation inside the hull and flat extrapolation beyond it.
///
/// Values are stored row-major: `values[i][j]` is the node at
/// `(x_nodes[i], y_nodes[j])`.
#[derive(Debug, Clone)]
pub struct GridSurface {
    x_nodes: Vec<f64>,
    y_nodes: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl GridSurface {
    /// Creates a grid surface.
    ///
    /// # Errors
    ///
    /// Returns an error if either axis is empty or not strictly
    /// increasing, or if `values` does not match the axes' dimensions.
    pub fn new(
        x_nodes: Vec<f64>,
        y_nodes: Vec<f64>,
        values: Vec<Vec<f64>>,
    ) -> VolResult<Self> {
        Self::check_axis(&x_nodes, "x")?;
        Self::check_axis(&y_nodes, "y")?;
        if values.len() != x_nodes.len() {
            return Err(VolError::invalid_parameter(
                "values.rows",
                values.len() as f64,
            ));
        }
        for row in &values {
            if row.len() != y_nodes.len() {
                return Err(VolError::invalid_parameter(
                    "values.cols",
                    row.len() as f64,
                ));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(VolError::invalid_parameter("values", f64::NAN));
            }
        }
        Ok(Self {
            x_nodes,
            y_nodes,
            values,
        })
    }

    fn check_axis(nodes: &[f64], name: &'static str) -> VolResult<()> {
        if nodes.is_empty() {
            return Err(VolError::invalid_parameter(name, 0.0));
        }
        for (i, &v) in nodes.iter().enumerate() {
            if !v.is_finite() || (i > 0 && v <= nodes[i - 1]) {
                return Err(VolError::invalid_parameter(name, v));
            }
        }
        Ok(())
    }

    /// Clamped bracket: (lower index, weight on lower node).
    fn bracket(nodes: &[f64], v: f64) -> (usize, f64) {
        let n = nodes.len();
        if v <= nodes[0] || n == 1 {
            return (0, 1.0);
        }
        if v >= nodes[n - 1] {
            return (n - 1, 1.0);
        }
        let idx = match nodes.binary_search_by(|probe| probe.partial_cmp(&v).unwrap()) {
            Ok(i) => return (i, 1.0),
            Err(i) => i - 1,
        };
        let w = (nodes[idx + 1] - v) / (nodes[idx + 1] - nodes[idx]);
        (idx, w)
    }
}

impl Surface for GridSurface {
    fn z_value(&self, x: f64, y: f64) -> f64 {
        let (i, wx) = Self::bracket(&self.x_nodes, x);
        let (j, wy) = Self::bracket(&self.y_nodes, y);
        let i1 = if wx < 1.0 { i + 1 } else { i };
        let j1 = if wy < 1.0 { j + 1 } else { j };
        wx * wy * self.values[i][j]
            + wx * (1.0 - wy) * self.values[i][j1]
            + (1.0 - wx) * wy * self.values[i1][j]
            + (1.0 - wx) * (1.0 - wy) * self.values[i1][j1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> GridSurface {
        GridSurface::new(
            vec![0.25, 1.0, 5.0],
            vec![-0.1, 0.0, 0.1],
            vec![
                vec![0.30, 0.25, 0.28],
                vec![0.27, 0.22, 0.24],
                vec![0.24, 0.20, 0.21],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_node_recovery() {
        let surface = sample();
        assert_relative_eq!(surface.z_value(1.0, 0.0), 0.22, epsilon = 1e-15);
        assert_relative_eq!(surface.z_value(0.25, -0.1), 0.30, epsilon = 1e-15);
        assert_relative_eq!(surface.z_value(5.0, 0.1), 0.21, epsilon = 1e-15);
    }

    #[test]
    fn test_bilinear_midpoint() {
        let surface = sample();
        // Midpoint of the four corner nodes of the lower-left cell.
        let expected = (0.30 + 0.25 + 0.27 + 0.22) / 4.0;
        assert_relative_eq!(surface.z_value(0.625, -0.05), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolation_along_one_axis() {
        let surface = sample();
        // y fixed on a node, x midway between 1.0 and 5.0.
        let expected = (0.22 + 0.20) / 2.0;
        assert_relative_eq!(surface.z_value(3.0, 0.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_extrapolation() {
        let surface = sample();
        assert_relative_eq!(surface.z_value(10.0, 0.0), 0.20, epsilon = 1e-15);
        assert_relative_eq!(surface.z_value(1.0, -1.0), 0.27, epsilon = 1e-15);
        assert_relative_eq!(surface.z_value(-1.0, 1.0), 0.28, epsilon = 1e-15);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let result = GridSurface::new(
            vec![1.0, 2.0],
            vec![0.0],
            vec![vec![0.2], vec![0.2], vec![0.2]],
        );
        assert!(result.is_err());

        let result = GridSurface::new(vec![2.0, 1.0], vec![0.0], vec![vec![0.2], vec![0.2]]);
        assert!(result.is_err());
    }
}
