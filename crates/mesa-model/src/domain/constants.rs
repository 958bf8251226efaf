/// Environment assigned to task templates that do not name one.
pub const DEFAULT_ENVIRONMENT: &str = "devel";

/// Host attribute reserved for dedicated-host placement.
pub const DEDICATED_ATTRIBUTE: &str = "dedicated";

/// Host attribute used by the synthesized same-host limit constraint.
pub const HOST_ATTRIBUTE: &str = "host";

/// Host attribute used by the synthesized same-rack limit constraint.
pub const RACK_ATTRIBUTE: &str = "rack";
