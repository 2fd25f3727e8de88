use crate::error::LoadError;
use panelgeom_core::geom::Point3;
use panelgeom_core::model::SymmetryPlane;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("missing location in source: {0}")]
    MissingPath(String),
    #[error("geometry query failed: {0}")]
    Query(String),
}

/// Which side of the lifting surface a point query samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Lower,
    Upper,
}

/// Span-wise boundary of a segment: `Inner` faces the root, `Outer` the tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentBoundary {
    Inner,
    Outer,
}

impl fmt::Display for SegmentBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentBoundary::Inner => write!(f, "inner"),
            SegmentBoundary::Outer => write!(f, "outer"),
        }
    }
}

/// One opened aircraft description: document queries addressed by slash-path
/// expressions with 1-based `[i]` child indices, and geometry queries keyed
/// by 1-based wing/segment ordinals.
///
/// Geometry queries take `&mut self`: the kernel handle tracks the currently
/// queried configuration and is not reentrant, so all extraction for one
/// load runs as one sequence of calls against one handle. Concurrent loads
/// need separate handles.
pub trait GeometrySource {
    fn child_count(&self, path: &str, child_name: &str) -> Result<usize, SourceError>;
    fn text_attribute(&self, path: &str, attr_name: &str) -> Result<String, SourceError>;
    fn text_element(&self, path: &str) -> Result<String, SourceError>;
    fn double_element(&self, path: &str) -> Result<f64, SourceError>;

    /// Point on the lifting surface at relative span coordinate `eta` and
    /// relative chord coordinate `xsi` of one segment's parametric patch.
    fn surface_point(
        &mut self,
        wing: usize,
        segment: usize,
        eta: f64,
        xsi: f64,
        surface: Surface,
    ) -> Result<Point3, SourceError>;

    fn wing_symmetry(&mut self, wing: usize) -> Result<SymmetryPlane, SourceError>;

    /// (section, element) index pair cutting the given segment boundary.
    fn section_element_index(
        &mut self,
        wing: usize,
        segment: usize,
        boundary: SegmentBoundary,
    ) -> Result<(usize, usize), SourceError>;

    fn profile_name(
        &mut self,
        wing: usize,
        section: usize,
        element: usize,
    ) -> Result<String, SourceError>;
}

/// Capability for opening aircraft descriptions. Resolved once at startup
/// and passed to `load`; whether kernel support is present in the runtime
/// environment is a property of the value, not a global flag.
pub trait GeometryKernel {
    fn open(&self, path: &Path) -> Result<Box<dyn GeometrySource>, LoadError>;
}

/// The kernel capability in environments without geometry kernel support.
/// Every open fails; there is no degraded mode.
#[derive(Debug, Clone)]
pub struct UnavailableKernel {
    reason: String,
}

impl UnavailableKernel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl GeometryKernel for UnavailableKernel {
    fn open(&self, _path: &Path) -> Result<Box<dyn GeometrySource>, LoadError> {
        Err(LoadError::KernelUnavailable(self.reason.clone()))
    }
}
