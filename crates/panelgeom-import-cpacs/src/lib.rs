pub mod error;
pub mod paths;
pub mod source;

pub use error::LoadError;
pub use source::{GeometryKernel, GeometrySource, SegmentBoundary, Surface, UnavailableKernel};

use log::{debug, info, warn};
use panelgeom_core::airfoil::{coordinate_file_name, AirfoilTable};
use panelgeom_core::canonical::canonical_panel_order;
use panelgeom_core::geom::Point3;
use panelgeom_core::model::{Aircraft, AirfoilRefs, ReferenceFrame, Segment, SegmentVertices, Wing};
use source::SourceError;
use std::path::{Path, PathBuf};

/// Consumed settings subset: where airfoil coordinate files go.
#[derive(Debug, Clone)]
pub struct Settings {
    pub airfoil_dir: PathBuf,
}

/// Identifier used when the aircraft description carries no model name.
const UNNAMED_AIRCRAFT: &str = "NAME_NOT_FOUND";

/// Load `aircraft` from the description at `path`.
///
/// The target is reset up front and extraction runs against a staged model
/// that replaces the target only on full success: after an error the caller
/// holds an empty model, never a partially populated one. The source handle
/// is dropped on every exit path.
pub fn load(
    aircraft: &mut Aircraft,
    path: &Path,
    settings: &Settings,
    kernel: &dyn GeometryKernel,
) -> Result<(), LoadError> {
    info!("loading aircraft from '{}'", path.display());
    if !path.exists() {
        return Err(LoadError::SourceNotFound(path.to_path_buf()));
    }

    let mut source = kernel.open(path)?;
    aircraft.reset();

    let mut staged = Aircraft::default();
    let mut extractor = Extractor {
        source: source.as_mut(),
        settings,
    };
    extractor.populate(&mut staged)?;

    *aircraft = staged;
    Ok(())
}

struct Extractor<'a> {
    source: &'a mut dyn GeometrySource,
    settings: &'a Settings,
}

impl Extractor<'_> {
    fn populate(&mut self, aircraft: &mut Aircraft) -> Result<(), LoadError> {
        aircraft.uid = self.aircraft_uid()?;
        self.extract_wings(aircraft)?;
        self.write_airfoil_files()?;
        aircraft.refs = self.extract_reference_frame()?;
        Ok(())
    }

    /// Model name from the `uID` attribute. A missing model node degrades to
    /// a placeholder name; any other failure aborts the load.
    fn aircraft_uid(&mut self) -> Result<String, LoadError> {
        match self.source.text_attribute(paths::MODEL, "uID") {
            Ok(uid) => {
                let uid = uid.trim().to_string();
                debug!("aircraft name: '{uid}'");
                Ok(uid)
            }
            Err(SourceError::MissingPath(path)) => {
                warn!("could not find path '{path}'");
                Ok(UNNAMED_AIRCRAFT.to_string())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn extract_wings(&mut self, aircraft: &mut Aircraft) -> Result<(), LoadError> {
        info!("loading aircraft wings");
        let num_wings = match self.source.child_count(paths::WINGS, "wing") {
            Ok(n) => n,
            Err(SourceError::MissingPath(_)) => 0,
            Err(err) => return Err(err.into()),
        };
        if num_wings == 0 {
            return Err(LoadError::Validation(
                "the aircraft must have at least one wing".to_string(),
            ));
        }

        for idx_wing in 1..=num_wings {
            let wing_path = paths::indexed(paths::WINGS, "wing", idx_wing);
            let uid = match self.source.text_attribute(&wing_path, "uID") {
                Ok(uid) => uid.trim().to_string(),
                Err(_) => paths::fallback_uid("WING", idx_wing),
            };
            debug!("wing name: '{uid}'");

            let symmetry = self.source.wing_symmetry(idx_wing)?;
            let segments = self.extract_segments(&wing_path, &uid, idx_wing)?;
            aircraft.wings.push(Wing {
                uid,
                symmetry,
                segments,
            });
        }
        Ok(())
    }

    fn extract_segments(
        &mut self,
        wing_path: &str,
        wing_uid: &str,
        idx_wing: usize,
    ) -> Result<Vec<Segment>, LoadError> {
        let segments_path = format!("{wing_path}/segments");
        let num_segments = self.source.child_count(&segments_path, "segment")?;
        debug!("loading segments of wing '{wing_uid}'");

        let mut segments = Vec::with_capacity(num_segments);
        for idx_segment in 1..=num_segments {
            let segment_path = paths::indexed(&segments_path, "segment", idx_segment);
            let uid = match self.source.text_attribute(&segment_path, "uID") {
                Ok(uid) => uid.trim().to_string(),
                Err(_) => paths::fallback_uid(&format!("{wing_uid}_SEGMENT"), idx_segment),
            };
            debug!("loading segment '{uid}'");

            let a = self.segment_mid_point(idx_wing, idx_segment, 0.0, 0.0)?;
            let b = self.segment_mid_point(idx_wing, idx_segment, 1.0, 0.0)?;
            let c = self.segment_mid_point(idx_wing, idx_segment, 1.0, 1.0)?;
            let d = self.segment_mid_point(idx_wing, idx_segment, 0.0, 1.0)?;
            let vertices = canonical_panel_order(SegmentVertices { a, b, c, d });

            let airfoils = self.resolve_airfoils(idx_wing, idx_segment)?;
            segments.push(Segment {
                uid,
                vertices,
                airfoils,
            });
        }
        Ok(segments)
    }

    /// Camber-line point: midpoint of the lower- and upper-surface points at
    /// the same patch coordinates.
    fn segment_mid_point(
        &mut self,
        idx_wing: usize,
        idx_segment: usize,
        eta: f64,
        xsi: f64,
    ) -> Result<Point3, LoadError> {
        let lower = self
            .source
            .surface_point(idx_wing, idx_segment, eta, xsi, Surface::Lower)?;
        let upper = self
            .source
            .surface_point(idx_wing, idx_segment, eta, xsi, Surface::Upper)?;
        Ok(lower.midpoint(upper))
    }

    fn resolve_airfoils(
        &mut self,
        idx_wing: usize,
        idx_segment: usize,
    ) -> Result<AirfoilRefs, LoadError> {
        Ok(AirfoilRefs {
            inner: self.airfoil_ref(idx_wing, idx_segment, SegmentBoundary::Inner)?,
            outer: self.airfoil_ref(idx_wing, idx_segment, SegmentBoundary::Outer)?,
        })
    }

    /// Expected coordinate-file path for the profile cutting one segment
    /// boundary. Records the reference only; the file is written separately.
    fn airfoil_ref(
        &mut self,
        idx_wing: usize,
        idx_segment: usize,
        boundary: SegmentBoundary,
    ) -> Result<PathBuf, LoadError> {
        let (idx_section, idx_element) =
            self.source
                .section_element_index(idx_wing, idx_segment, boundary)?;
        let name = self
            .source
            .profile_name(idx_wing, idx_section, idx_element)?
            .trim()
            .to_string();
        if name.is_empty() {
            return Err(LoadError::Validation(format!(
                "could not resolve the {boundary} airfoil name for wing {idx_wing}, segment {idx_segment}"
            )));
        }
        Ok(self.settings.airfoil_dir.join(coordinate_file_name(&name)))
    }

    fn write_airfoil_files(&mut self) -> Result<(), LoadError> {
        debug!("extracting airfoil data");
        let num_airfoils = self.source.child_count(paths::WING_AIRFOILS, "wingAirfoil")?;

        for idx in 1..=num_airfoils {
            let airfoil_path = paths::indexed(paths::WING_AIRFOILS, "wingAirfoil", idx);
            let name = match self.source.text_element(&format!("{airfoil_path}/name")) {
                Ok(name) => name.trim().to_string(),
                Err(_) => paths::fallback_uid("AIRFOIL", idx),
            };

            let point_list = format!("{airfoil_path}/pointList");
            let x = self.coordinate_column(&format!("{point_list}/x"), &name)?;
            let z = self.coordinate_column(&format!("{point_list}/z"), &name)?;
            let table = AirfoilTable::from_columns(name, &x, &z)?;

            info!("copying airfoil {} to file", table.name);
            table.write_into(&self.settings.airfoil_dir)?;
        }
        Ok(())
    }

    fn coordinate_column(&mut self, path: &str, name: &str) -> Result<Vec<f64>, LoadError> {
        let raw = self.source.text_element(path)?;
        parse_coordinate_list(&raw).map_err(|value| LoadError::InvalidCoordinate {
            name: name.to_string(),
            value,
        })
    }

    fn extract_reference_frame(&mut self) -> Result<ReferenceFrame, LoadError> {
        let center = Point3::new(
            self.source
                .double_element(&format!("{}/point/x", paths::REFERENCE))?,
            self.source
                .double_element(&format!("{}/point/y", paths::REFERENCE))?,
            self.source
                .double_element(&format!("{}/point/z", paths::REFERENCE))?,
        );
        let area = self
            .source
            .double_element(&format!("{}/area", paths::REFERENCE))?;
        let length = self
            .source
            .double_element(&format!("{}/length", paths::REFERENCE))?;

        // The source carries one reference point and one reference length;
        // rotation center and chord reuse them.
        Ok(ReferenceFrame {
            geometric_center: center,
            rotation_center: center,
            area,
            span: length,
            chord: length,
        })
    }
}

/// Parse a `;`-delimited coordinate column. Empty tokens (trailing
/// separators, stray whitespace) are skipped; any other malformed token is
/// returned as the error.
pub fn parse_coordinate_list(raw: &str) -> Result<Vec<f64>, String> {
    let mut values = Vec::new();
    for token in raw.split(';') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.parse::<f64>() {
            Ok(value) => values.push(value),
            Err(_) => return Err(token.to_string()),
        }
    }
    Ok(values)
}
