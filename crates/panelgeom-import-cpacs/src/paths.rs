//! CPACS path expressions and identifier fallbacks.

pub const MODEL: &str = "/cpacs/vehicles/aircraft/model";
pub const REFERENCE: &str = "/cpacs/vehicles/aircraft/model/reference";
pub const WINGS: &str = "/cpacs/vehicles/aircraft/model/wings";
pub const WING_AIRFOILS: &str = "/cpacs/vehicles/profiles/wingAirfoils";

/// Path of the `index`-th (1-based) `child` element under `parent`.
pub fn indexed(parent: &str, child: &str, index: usize) -> String {
    format!("{parent}/{child}[{index}]")
}

/// Generated identifier for an entity whose `uID` attribute is missing or
/// unreadable, e.g. `WING03` or `MainWing_SEGMENT02`.
pub fn fallback_uid(prefix: &str, index: usize) -> String {
    format!("{prefix}{index:02}")
}
