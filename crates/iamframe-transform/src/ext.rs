//! Method-style access to the swap engine.

use iamframe_model::IamFrame;

use crate::downcast::{downcast, downcast_in_place};
use crate::error::Result;
use crate::subannual::Subannual;
use crate::upcast::{upcast, upcast_in_place};

/// Domain swapping as methods on a frame.
///
/// ```ignore
/// use iamframe_transform::TimeDomainExt;
///
/// let yearly = frame.swap_time_for_year(true)?;
/// let restored = yearly.swap_year_for_time()?;
/// ```
pub trait TimeDomainExt: Sized {
    /// See [`downcast`].
    fn swap_time_for_year(&self, subannual: impl Into<Subannual>) -> Result<Self>;

    /// See [`downcast_in_place`].
    fn swap_time_for_year_in_place(&mut self, subannual: impl Into<Subannual>) -> Result<()>;

    /// See [`upcast`].
    fn swap_year_for_time(&self) -> Result<Self>;

    /// See [`upcast_in_place`].
    fn swap_year_for_time_in_place(&mut self) -> Result<()>;
}

impl TimeDomainExt for IamFrame {
    fn swap_time_for_year(&self, subannual: impl Into<Subannual>) -> Result<Self> {
        downcast(self, &subannual.into())
    }

    fn swap_time_for_year_in_place(&mut self, subannual: impl Into<Subannual>) -> Result<()> {
        downcast_in_place(self, &subannual.into())
    }

    fn swap_year_for_time(&self) -> Result<Self> {
        upcast(self)
    }

    fn swap_year_for_time_in_place(&mut self) -> Result<()> {
        upcast_in_place(self)
    }
}
