use crate::ir::MonitorSpec;
use crate::parser::{DataError, parse_monitors};

const BUILTIN_MONITORS: &str = include_str!("../data/monitors.json5");

/// The monitor list shipped with the crate, used when no input is given.
pub fn builtin_monitors() -> Result<Vec<MonitorSpec>, DataError> {
    parse_monitors(BUILTIN_MONITORS)
}
