//! Cartesian axis indices.

/// Cartesian axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cartesian {
    /// x-axis.
    X = 0,
    /// y-axis.
    Y = 1,
    /// z-axis.
    Z = 2,
}

/// Index of the x-axis.
pub const X: usize = Cartesian::X as usize;
/// Index of the y-axis.
pub const Y: usize = Cartesian::Y as usize;
/// Index of the z-axis.
pub const Z: usize = Cartesian::Z as usize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices() {
        assert_eq!(X, 0);
        assert_eq!(Y, 1);
        assert_eq!(Z, 2);
    }
}
