//! Test double for the geometry kernel capability: document queries are
//! answered from a CPACS XML snippet, geometry queries from explicit tables.

use panelgeom_core::geom::Point3;
use panelgeom_core::model::SymmetryPlane;
use panelgeom_import_cpacs::source::{
    GeometryKernel, GeometrySource, SegmentBoundary, SourceError, Surface,
};
use panelgeom_import_cpacs::LoadError;
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::path::Path;

type PointKey = (usize, usize, u8, u8, Surface);

#[derive(Debug, Clone, Default)]
pub struct KernelTables {
    pub symmetry: HashMap<usize, SymmetryPlane>,
    pub points: HashMap<PointKey, Point3>,
    pub boundaries: HashMap<(usize, usize, SegmentBoundary), (usize, usize)>,
    pub profiles: HashMap<(usize, usize, usize), String>,
}

impl KernelTables {
    /// Register the lifting-surface points at one patch corner so that
    /// their midpoint comes out as `mid`.
    pub fn set_corner(&mut self, wing: usize, segment: usize, eta: f64, xsi: f64, mid: Point3) {
        let lower = Point3::new(mid.x, mid.y, mid.z - 0.05);
        let upper = Point3::new(mid.x, mid.y, mid.z + 0.05);
        self.points
            .insert((wing, segment, eta as u8, xsi as u8, Surface::Lower), lower);
        self.points
            .insert((wing, segment, eta as u8, xsi as u8, Surface::Upper), upper);
    }

    /// Corner points of an unswept segment of `wing` covering
    /// y in [2(segment-1), 2*segment], chord from x = 0 to x = 1, in the
    /// already canonical query order.
    pub fn set_plain_segment(&mut self, wing: usize, segment: usize) {
        let y_root = 2.0 * (segment - 1) as f64;
        let y_tip = 2.0 * segment as f64;
        self.set_corner(wing, segment, 0.0, 0.0, Point3::new(0.0, y_root, 0.0));
        self.set_corner(wing, segment, 1.0, 0.0, Point3::new(0.0, y_tip, 0.0));
        self.set_corner(wing, segment, 1.0, 1.0, Point3::new(1.0, y_tip, 0.0));
        self.set_corner(wing, segment, 0.0, 1.0, Point3::new(1.0, y_root, 0.0));
    }

    /// Section/element indices and a shared profile name for one segment.
    pub fn set_profile(&mut self, wing: usize, segment: usize, name: &str) {
        self.boundaries
            .insert((wing, segment, SegmentBoundary::Inner), (segment, 1));
        self.boundaries
            .insert((wing, segment, SegmentBoundary::Outer), (segment + 1, 1));
        self.profiles.insert((wing, segment, 1), name.to_string());
        self.profiles.insert((wing, segment + 1, 1), name.to_string());
    }

    /// Everything a `wings x segments` aircraft needs from the kernel side.
    pub fn plain_aircraft(wings: usize, segments: usize) -> Self {
        let mut tables = Self::default();
        for wing in 1..=wings {
            tables.symmetry.insert(wing, SymmetryPlane::Xz);
            for segment in 1..=segments {
                tables.set_plain_segment(wing, segment);
                tables.set_profile(wing, segment, "NACA0012");
            }
        }
        tables
    }
}

pub struct FakeKernel {
    pub xml: String,
    pub tables: KernelTables,
}

impl GeometryKernel for FakeKernel {
    fn open(&self, _path: &Path) -> Result<Box<dyn GeometrySource>, LoadError> {
        Ok(Box::new(FakeSource {
            xml: self.xml.clone(),
            tables: self.tables.clone(),
        }))
    }
}

/// A kernel that must not be reached; proves ordering of up-front checks.
pub struct UnreachableKernel;

impl GeometryKernel for UnreachableKernel {
    fn open(&self, path: &Path) -> Result<Box<dyn GeometrySource>, LoadError> {
        panic!("the kernel was opened for '{}'", path.display());
    }
}

pub struct FakeSource {
    xml: String,
    tables: KernelTables,
}

impl FakeSource {
    fn with_node<T>(
        &self,
        path: &str,
        read: impl FnOnce(Node<'_, '_>) -> Result<T, SourceError>,
    ) -> Result<T, SourceError> {
        let doc = Document::parse(&self.xml).expect("fixture XML parses");
        let node =
            find_node(&doc, path).ok_or_else(|| SourceError::MissingPath(path.to_string()))?;
        read(node)
    }
}

impl GeometrySource for FakeSource {
    fn child_count(&self, path: &str, child_name: &str) -> Result<usize, SourceError> {
        self.with_node(path, |node| {
            Ok(node
                .children()
                .filter(|c| c.has_tag_name(child_name))
                .count())
        })
    }

    fn text_attribute(&self, path: &str, attr_name: &str) -> Result<String, SourceError> {
        self.with_node(path, |node| {
            node.attribute(attr_name)
                .map(str::to_string)
                .ok_or_else(|| SourceError::MissingPath(format!("{path}[@{attr_name}]")))
        })
    }

    fn text_element(&self, path: &str) -> Result<String, SourceError> {
        self.with_node(path, |node| Ok(node.text().unwrap_or("").to_string()))
    }

    fn double_element(&self, path: &str) -> Result<f64, SourceError> {
        let text = self.text_element(path)?;
        text.trim()
            .parse()
            .map_err(|_| SourceError::Query(format!("not a number at {path}: '{text}'")))
    }

    fn surface_point(
        &mut self,
        wing: usize,
        segment: usize,
        eta: f64,
        xsi: f64,
        surface: Surface,
    ) -> Result<Point3, SourceError> {
        self.tables
            .points
            .get(&(wing, segment, eta as u8, xsi as u8, surface))
            .copied()
            .ok_or_else(|| {
                SourceError::Query(format!(
                    "no surface point for wing {wing} segment {segment} at ({eta}, {xsi})"
                ))
            })
    }

    fn wing_symmetry(&mut self, wing: usize) -> Result<SymmetryPlane, SourceError> {
        self.tables
            .symmetry
            .get(&wing)
            .copied()
            .ok_or_else(|| SourceError::Query(format!("no symmetry for wing {wing}")))
    }

    fn section_element_index(
        &mut self,
        wing: usize,
        segment: usize,
        boundary: SegmentBoundary,
    ) -> Result<(usize, usize), SourceError> {
        self.tables
            .boundaries
            .get(&(wing, segment, boundary))
            .copied()
            .ok_or_else(|| {
                SourceError::Query(format!(
                    "no {boundary} boundary for wing {wing} segment {segment}"
                ))
            })
    }

    fn profile_name(
        &mut self,
        wing: usize,
        section: usize,
        element: usize,
    ) -> Result<String, SourceError> {
        self.tables
            .profiles
            .get(&(wing, section, element))
            .cloned()
            .ok_or_else(|| {
                SourceError::Query(format!(
                    "no profile at wing {wing} section {section} element {element}"
                ))
            })
    }
}

fn find_node<'a>(doc: &'a Document<'a>, path: &str) -> Option<Node<'a, 'a>> {
    let mut parts = path.trim_start_matches('/').split('/');
    let (root_name, root_index) = split_index(parts.next()?);
    let mut node = doc.root_element();
    if node.tag_name().name() != root_name || root_index != 1 {
        return None;
    }
    for part in parts {
        let (name, index) = split_index(part);
        node = node
            .children()
            .filter(|c| c.has_tag_name(name))
            .nth(index - 1)?;
    }
    Some(node)
}

/// `"wing[2]"` -> `("wing", 2)`; a bare name addresses the first match.
fn split_index(part: &str) -> (&str, usize) {
    match part.find('[') {
        Some(open) if part.ends_with(']') => {
            let index = part[open + 1..part.len() - 1]
                .parse()
                .expect("numeric child index");
            (&part[..open], index)
        }
        _ => (part, 1),
    }
}

/// CPACS snippet with named wings/segments and one default airfoil entry.
pub fn cpacs_xml(wings: &[(Option<&str>, &[Option<&str>])]) -> String {
    let mut wings_xml = String::new();
    for (wing_uid, segment_uids) in wings {
        wings_xml.push_str(&match wing_uid {
            Some(uid) => format!("      <wing uID=\"{uid}\">\n"),
            None => "      <wing>\n".to_string(),
        });
        wings_xml.push_str("        <segments>\n");
        for segment_uid in *segment_uids {
            wings_xml.push_str(&match segment_uid {
                Some(uid) => format!("          <segment uID=\"{uid}\"/>\n"),
                None => "          <segment/>\n".to_string(),
            });
        }
        wings_xml.push_str("        </segments>\n      </wing>\n");
    }
    format!(
        "<cpacs>\n\
         <vehicles>\n\
         <aircraft>\n\
         <model uID=\"TestCraft\">\n\
         <reference>\n\
         <point><x>0.5</x><y>0.0</y><z>0.0</z></point>\n\
         <area>12.0</area>\n\
         <length>4.0</length>\n\
         </reference>\n\
         <wings>\n{wings_xml}</wings>\n\
         </model>\n\
         </aircraft>\n\
         <profiles>\n\
         <wingAirfoils>\n\
         <wingAirfoil>\n\
         <name>NACA0012</name>\n\
         <pointList>\n\
         <x>0;1;2</x>\n\
         <z>0;0.1;0.2</z>\n\
         </pointList>\n\
         </wingAirfoil>\n\
         </wingAirfoils>\n\
         </profiles>\n\
         </vehicles>\n\
         </cpacs>\n"
    )
}
