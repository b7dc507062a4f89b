//! Build trait.

use crate::err::Error;

/// Types implementing this trait describe a not-yet-validated configuration
/// that can be built into a ready-to-use instance.
pub trait Build {
    /// End type to be built.
    type Inst;

    /// Validate and build the instance type.
    ///
    /// # Errors
    /// Returns `Error::Config` if the builder's fields describe an invalid
    /// configuration (e.g. a grid resolution of zero).
    fn build(self) -> Result<Self::Inst, Error>;
}

impl<T: Build> Build for Vec<T> {
    type Inst = Vec<T::Inst>;

    #[inline]
    fn build(self) -> Result<Self::Inst, Error> {
        let mut built = Vec::with_capacity(self.len());
        for item in self {
            built.push(item.build()?);
        }
        Ok(built)
    }
}
