use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::gcibm::Sphere;
use crate::grid::Grid;
use crate::hydro::error::Error;
use crate::model::Model;
use crate::solvers::sweep::Scheme;




/**
 * Extent and resolution of the computational box, in dimensional units.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpaceConfig {
    pub cells: [usize; 3],
    pub ghost: usize,
    pub lower: [f64; 3],
    pub upper: [f64; 3],
}




/**
 * Dimensional reference quantities of the flow, in SI units.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowConfig {
    pub length: f64,
    pub density: f64,
    pub velocity: f64,
    pub temperature: f64,
    pub viscosity: f64,
}




/**
 * A complete case description: the box, the reference flow, the numerical
 * scheme, and the obstacles placed in the box.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub space: SpaceConfig,
    pub flow: FlowConfig,
    pub scheme: Scheme,
    pub obstacles: Vec<Sphere>,
}




// ============================================================================
impl SpaceConfig {

    pub fn validate(&self) -> Result<(), Error> {
        if self.cells.iter().any(|m| *m == 0) {
            return Err(Error::Config("each axis needs at least one cell".into()));
        }
        if self.ghost == 0 {
            return Err(Error::Config("ghost depth must be at least one".into()));
        }
        for axis in 0..3 {
            if !(self.upper[axis] > self.lower[axis]) {
                return Err(Error::Config(format!(
                    "bounds along axis {} are inverted: [{}, {}]",
                    axis, self.lower[axis], self.upper[axis])));
            }
        }
        Ok(())
    }
}

impl FlowConfig {

    pub fn validate(&self) -> Result<(), Error> {
        let quantities = [
            ("length", self.length),
            ("density", self.density),
            ("velocity", self.velocity),
            ("temperature", self.temperature),
            ("viscosity", self.viscosity),
        ];
        for (name, value) in quantities.iter() {
            if !(*value > 0.0) {
                return Err(Error::Config(format!("reference {} must be positive, got {}", name, value)));
            }
        }
        Ok(())
    }
}




// ============================================================================
impl Config {

    pub fn validate(&self) -> Result<(), Error> {
        self.space.validate()?;
        self.flow.validate()
    }

    /**
     * Build the grid in normalized coordinates: bounds are divided by the
     * reference length.
     */
    pub fn grid(&self) -> Result<Grid, Error> {
        self.validate()?;
        let l = self.flow.length;
        let lower = [self.space.lower[0] / l, self.space.lower[1] / l, self.space.lower[2] / l];
        let upper = [self.space.upper[0] / l, self.space.upper[1] / l, self.space.upper[2] / l];
        Grid::new(self.space.cells, self.space.ghost, lower, upper)
    }

    pub fn model(&self) -> Result<Model, Error> {
        Model::from_reference(&self.flow)
    }

    /**
     * The obstacles in normalized coordinates.
     */
    pub fn obstacles(&self) -> Vec<Sphere> {
        self.obstacles.iter().map(|s| s.normalized_by(self.flow.length)).collect()
    }

    pub fn read_cbor<R: Read>(reader: R) -> Result<Self, Error> {
        let config: Self = ciborium::de::from_reader(reader).map_err(|e| Error::Cbor(format!("{:?}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn write_cbor<W: Write>(&self, writer: W) -> Result<(), Error> {
        ciborium::ser::into_writer(self, writer).map_err(|e| Error::Cbor(format!("{:?}", e)))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::read_cbor(BufReader::new(File::open(path)?))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut buffer = BufWriter::new(File::create(path)?);
        self.write_cbor(&mut buffer)?;
        buffer.flush()?;
        Ok(())
    }
}




/**
 * A quasi two-dimensional channel, one cell thick along z, with a single
 * cylinder-like sphere section in it.
 */
impl Default for Config {
    fn default() -> Self {
        Self {
            space: SpaceConfig {
                cells: [60, 30, 1],
                ghost: 2,
                lower: [0.0, 0.0, 0.0],
                upper: [0.2, 0.1, 0.01],
            },
            flow: FlowConfig {
                length: 0.1,
                density: 1.225,
                velocity: 40.0,
                temperature: 288.15,
                viscosity: 1.7894e-5,
            },
            scheme: Scheme::default(),
            obstacles: vec![Sphere::new(0.05, 0.05, 0.005, 0.015)],
        }
    }
}
