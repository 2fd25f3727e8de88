use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name under which a profile's coordinates are written and referenced.
pub fn coordinate_file_name(profile: &str) -> String {
    format!("blade.{profile}")
}

#[derive(Debug, Error)]
pub enum AirfoilError {
    #[error("airfoil '{name}': {x_count} x coordinates but {z_count} z coordinates")]
    ColumnMismatch {
        name: String,
        x_count: usize,
        z_count: usize,
    },
    #[error("failed to write airfoil file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirfoilPoint {
    pub x: f64,
    pub z: f64,
}

/// One named airfoil profile as an ordered coordinate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirfoilTable {
    pub name: String,
    pub points: Vec<AirfoilPoint>,
}

impl AirfoilTable {
    /// Zip separately listed x and z columns into ordered pairs. Unequal
    /// column lengths are rejected; truncating would silently desynchronize
    /// the written table from the source profile.
    pub fn from_columns(name: impl Into<String>, x: &[f64], z: &[f64]) -> Result<Self, AirfoilError> {
        let name = name.into();
        if x.len() != z.len() {
            return Err(AirfoilError::ColumnMismatch {
                name,
                x_count: x.len(),
                z_count: z.len(),
            });
        }
        let points = x
            .iter()
            .zip(z)
            .map(|(&x, &z)| AirfoilPoint { x, z })
            .collect();
        Ok(Self { name, points })
    }

    /// Render the coordinate table: one header line with the profile name,
    /// then one row per point with an explicit sign and 7 decimals.
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.name);
        for p in &self.points {
            let _ = writeln!(out, "{:+.7} {:+.7}", p.x, p.z);
        }
        out
    }

    /// Write the table as `blade.{name}` into `dir`, replacing any existing
    /// file, and return the written path.
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf, AirfoilError> {
        let path = dir.join(coordinate_file_name(&self.name));
        fs::write(&path, self.to_table())?;
        debug!("wrote airfoil file '{}'", path.display());
        Ok(path)
    }
}
