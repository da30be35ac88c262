//! Time/year domain swapping.
//!
//! This crate converts an [`IamFrame`](iamframe_model::IamFrame) between its
//! two temporal representations:
//!
//! - **downcast**: `time` (datetime) key column to `year` (integer), with an
//!   optional `subannual` column keeping the discarded sub-year part
//! - **upcast**: `year` (plus `subannual`) back to `time`
//! - **guard**: key uniqueness check run before a downcast is committed
//! - **datetime**: lenient datetime parsing and strftime formatting
//! - **subannual**: the subannual encoding options
//!
//! Every operation is all-or-nothing: the new key is built on a scratch copy
//! and only assigned to the frame once every check has passed.

pub mod datetime;
pub mod downcast;
mod error;
mod ext;
pub mod guard;
pub mod subannual;
pub mod upcast;

pub use downcast::{downcast, downcast_in_place};
pub use error::{Result, SwapError};
pub use ext::TimeDomainExt;
pub use subannual::{DEFAULT_SUBANNUAL_FORMAT, Subannual, SubannualFn};
pub use upcast::{upcast, upcast_in_place};
