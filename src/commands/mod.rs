//! CLI command implementations
//!
//! Every command works on an [`RtcDevice`](spirtc_core::RtcDevice) that has
//! already been bound to a chip family, either by probing or by an explicit
//! `--chip`.

mod list;
mod probe;
mod reg;
mod time;

pub use list::list_programmers;
pub use probe::run_probe;
pub use reg::{run_get_reg, run_set_reg};
pub use time::{parse_time, run_read, run_set, run_systohc};
