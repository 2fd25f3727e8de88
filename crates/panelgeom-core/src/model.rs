use crate::geom::Point3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Mirror plane of a wing, as reported by the geometry kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SymmetryPlane {
    #[default]
    None,
    Xy,
    Xz,
    Yz,
}

/// Corner points of one wing segment in the canonical panel winding:
/// `a` and `d` sit on the root-side edge, `b` and `c` on the tip-side edge,
/// and the path a -> b -> c -> d is what the solver derives the panel normal
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SegmentVertices {
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
    pub d: Point3,
}

/// Coordinate-file references for the airfoils cutting a segment's inner and
/// outer boundary. Paths only; the profile data itself is written separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AirfoilRefs {
    pub inner: PathBuf,
    pub outer: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub uid: String,
    pub vertices: SegmentVertices,
    pub airfoils: AirfoilRefs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wing {
    pub uid: String,
    pub symmetry: SymmetryPlane,
    pub segments: Vec<Segment>,
}

impl Wing {
    pub fn segment(&self, uid: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.uid == uid)
    }
}

/// Whole-aircraft reference quantities. The source format carries a single
/// reference point and a single reference length, so `rotation_center`
/// duplicates `geometric_center` and `chord` duplicates `span`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ReferenceFrame {
    pub geometric_center: Point3,
    pub rotation_center: Point3,
    pub area: f64,
    pub span: f64,
    pub chord: f64,
}

/// Aircraft model as consumed by the panel solver. Wings and their segments
/// keep the declaration order of the source document; downstream numbering
/// depends on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Aircraft {
    pub uid: String,
    pub wings: Vec<Wing>,
    pub refs: ReferenceFrame,
}

impl Aircraft {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            wings: Vec::new(),
            refs: ReferenceFrame::default(),
        }
    }

    /// Drop all loaded state, keeping the allocation.
    pub fn reset(&mut self) {
        self.uid.clear();
        self.wings.clear();
        self.refs = ReferenceFrame::default();
    }

    pub fn wing(&self, uid: &str) -> Option<&Wing> {
        self.wings.iter().find(|w| w.uid == uid)
    }
}
