use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use log::{debug, info};
use crate::gcibm::Sphere;
use crate::grid::Grid;
use crate::hydro::error::Error;
use crate::hydro::geometry::Direction;
use crate::index_space::IndexSpace;
use crate::model::Model;
use crate::node::{Node, NodeFlag};
use crate::partition::{Partition, NORMAL_NODES};




/// Width of the fixed ASCII records in Ensight binary files.
pub const HEADER_LEN: usize = 80;

const SCALARS: [&str; 6] = ["rho", "u", "v", "w", "p", "T"];




/**
 * Writes Ensight Gold output: for every export a steady case file, a
 * geometry file, one binary file per scalar, a velocity vector file, and a
 * plain text obstacle file for restarts. A transient `<base>.case` index
 * listing every export time is kept up to date alongside.
 */
pub struct EnsightWriter {
    directory: PathBuf,
    base_name: String,
    times: Vec<f64>,
}




// ============================================================================
impl EnsightWriter {

    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            base_name: "ensight".into(),
            times: Vec::new(),
        }
    }

    /**
     * Number of exports written so far.
     */
    pub fn output_count(&self) -> usize {
        self.times.len()
    }

    pub fn transient_case_path(&self) -> PathBuf {
        self.directory.join(format!("{}.case", self.base_name))
    }

    /**
     * Export bank `tn` of the normal nodes, and return the path of the
     * steady case file written.
     */
    #[allow(clippy::too_many_arguments)]
    pub fn write(
        &mut self,
        step: usize,
        time: f64,
        grid: &Grid,
        partition: &Partition,
        nodes: &[Node],
        tn: usize,
        model: &Model,
        obstacles: &[Sphere]) -> Result<PathBuf, Error>
    {
        fs::create_dir_all(&self.directory)?;

        let order = self.times.len();
        let stem = format!("{}{:05}", self.base_name, order);
        let part = partition.get(NORMAL_NODES);
        info!("writing field data to {}", self.directory.join(&stem).display());

        let case = self.write_case_file(&stem, order, step, time)?;
        self.write_geometry_file(&stem, grid, &part.name, &part.space, nodes)?;
        self.write_variable_files(&stem, grid, &part.space, nodes, tn, model)?;
        self.write_particle_file(&stem, obstacles)?;

        self.times.push(time);
        self.write_transient_case_file()?;
        Ok(case)
    }

    fn create(&self, name: &str) -> Result<BufWriter<File>, Error> {
        Ok(BufWriter::new(File::create(self.directory.join(name))?))
    }

    fn write_case_file(&self, stem: &str, order: usize, step: usize, time: f64) -> Result<PathBuf, Error> {
        let name = format!("{}.case", stem);
        let mut file = self.create(&name)?;

        writeln!(file, "FORMAT")?;
        writeln!(file, "type: ensight gold")?;
        writeln!(file)?;
        writeln!(file, "GEOMETRY")?;
        writeln!(file, "model:  {}.geo", stem)?;
        writeln!(file)?;
        writeln!(file, "VARIABLE")?;
        writeln!(file, "constant per case:  Order {}", order)?;
        writeln!(file, "constant per case:  Time  {}", format_general(time))?;
        writeln!(file, "constant per case:  Step  {}", step)?;

        for name in SCALARS.iter() {
            writeln!(file, "scalar per node:    {:<5} {}.{}", name, stem, name)?;
        }
        writeln!(file, "vector per node:    Vel   {}.Vel", stem)?;
        writeln!(file)?;
        file.flush()?;
        Ok(self.directory.join(name))
    }

    fn write_transient_case_file(&self) -> Result<(), Error> {
        let base = &self.base_name;
        let mut file = self.create(&format!("{}.case", base))?;

        writeln!(file, "FORMAT")?;
        writeln!(file, "type: ensight gold")?;
        writeln!(file)?;
        writeln!(file, "GEOMETRY")?;
        writeln!(file, "model:            1       {}*****.geo", base)?;
        writeln!(file)?;
        writeln!(file, "VARIABLE")?;

        for name in SCALARS.iter() {
            writeln!(file, "scalar per node:  1  {:<4} {}*****.{}", name, base, name)?;
        }
        writeln!(file, "vector per node:  1  Vel  {}*****.Vel", base)?;
        writeln!(file)?;
        writeln!(file, "TIME")?;
        writeln!(file, "time set:         1")?;
        writeln!(file, "number of steps:          {}", self.times.len())?;
        writeln!(file, "filename start number:    0")?;
        writeln!(file, "filename increment:       1")?;
        write!(file, "time values:  ")?;

        for (n, t) in self.times.iter().enumerate() {
            if n % 5 == 0 {
                writeln!(file)?;
            }
            write!(file, "{} ", format_general(*t))?;
        }
        writeln!(file)?;
        file.flush()?;
        Ok(())
    }

    fn write_geometry_file(&self, stem: &str, grid: &Grid, name: &str, space: &IndexSpace, nodes: &[Node]) -> Result<(), Error> {
        debug!("write geometry {}.geo", stem);
        let mut file = self.create(&format!("{}.geo", stem))?;

        write_header(&mut file, "C Binary")?;
        write_header(&mut file, "Ensight Geometry File")?;
        write_header(&mut file, "Written by artra")?;
        write_header(&mut file, "node id off")?;
        write_header(&mut file, "element id off")?;

        write_header(&mut file, "part")?;
        file.write_all(&1i32.to_ne_bytes())?;
        write_header(&mut file, name)?;
        write_header(&mut file, "block iblanked")?;

        let (nk, nj, ni) = space.dim();
        for count in [ni, nj, nk].iter() {
            file.write_all(&(*count as i32).to_ne_bytes())?;
        }

        for axis in Direction::ALL.iter() {
            for index in space.iter() {
                let s = grid.point_of(index).component(*axis) as f32;
                file.write_all(&s.to_ne_bytes())?;
            }
        }

        for index in space.iter() {
            file.write_all(&iblank(nodes[grid.index(index)].flag).to_ne_bytes())?;
        }
        file.flush()?;
        Ok(())
    }

    fn write_variable_files(
        &self,
        stem: &str,
        grid: &Grid,
        space: &IndexSpace,
        nodes: &[Node],
        tn: usize,
        model: &Model) -> Result<(), Error>
    {
        let state = |index| nodes[grid.index(index)].conserved(tn);

        for (n, name) in SCALARS.iter().enumerate() {
            debug!("write scalar {}.{}", stem, name);
            let mut file = self.create(&format!("{}.{}", stem, name))?;
            write_part_header(&mut file, "scalar variable")?;

            for index in space.iter() {
                let u = state(index);
                let value = match n {
                    0 => u.mass_density(),
                    1 => u.velocity(Direction::X),
                    2 => u.velocity(Direction::Y),
                    3 => u.velocity(Direction::Z),
                    4 => u.gas_pressure(model.gamma),
                    _ => u.temperature(model.cv),
                };
                file.write_all(&(value as f32).to_ne_bytes())?;
            }
            file.flush()?;
        }

        let mut file = self.create(&format!("{}.Vel", stem))?;
        write_part_header(&mut file, "vector variable")?;

        for axis in Direction::ALL.iter() {
            for index in space.iter() {
                file.write_all(&(state(index).velocity(*axis) as f32).to_ne_bytes())?;
            }
        }
        file.flush()?;
        Ok(())
    }

    fn write_particle_file(&self, stem: &str, obstacles: &[Sphere]) -> Result<(), Error> {
        let mut file = self.create(&format!("{}.particle", stem))?;
        writeln!(file, "N: {}", obstacles.len())?;

        for obstacle in obstacles {
            let record: Vec<String> = obstacle.to_record().iter().map(|x| format_general(*x)).collect();
            writeln!(file, "{}", record.join(", "))?;
        }
        file.flush()?;
        Ok(())
    }
}




/**
 * Geometry blanking: 1 for nodes that are drawn, 0 for nodes blanked out.
 * Solid and ghost nodes are both blanked, so viewers cannot tell them apart.
 */
pub fn iblank(flag: NodeFlag) -> i32 {
    match flag {
        NodeFlag::Fluid | NodeFlag::Exterior => 1,
        NodeFlag::Solid | NodeFlag::Ghost => 0,
    }
}

fn write_header<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    let mut record = [0u8; HEADER_LEN];
    let bytes = text.as_bytes();
    let n = bytes.len().min(HEADER_LEN);
    record[..n].copy_from_slice(&bytes[..n]);
    writer.write_all(&record)
}

fn write_part_header<W: Write>(writer: &mut W, description: &str) -> io::Result<()> {
    write_header(writer, description)?;
    write_header(writer, "part")?;
    writer.write_all(&1i32.to_ne_bytes())?;
    write_header(writer, "block")
}




/**
 * Format a number with six significant digits the way C's `%.6g` does:
 * fixed notation for decimal exponents in [-4, 6), scientific otherwise,
 * with trailing zeros removed.
 */
pub fn format_general(x: f64) -> String {
    if x == 0.0 || !x.is_finite() {
        return format!("{}", x);
    }
    let sci = format!("{:.5e}", x);
    let (mantissa, exponent) = match sci.find('e') {
        Some(n) => (&sci[..n], sci[n + 1..].parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if exponent < -4 || exponent >= 6 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (5 - exponent) as usize;
        trim_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn general_format_matches_printf() {
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(0.1), "0.1");
        assert_eq!(format_general(100.0), "100");
        assert_eq!(format_general(-2.5), "-2.5");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(999999.7), "1e+06");
        assert_eq!(format_general(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn headers_are_nul_padded() {
        let mut buffer = Vec::new();
        write_header(&mut buffer, "part").unwrap();
        assert_eq!(buffer.len(), HEADER_LEN);
        assert_eq!(&buffer[..4], b"part");
        assert!(buffer[4..].iter().all(|b| *b == 0));
    }

    #[test]
    fn solid_and_ghost_are_blanked() {
        assert_eq!(iblank(NodeFlag::Fluid), 1);
        assert_eq!(iblank(NodeFlag::Exterior), 1);
        assert_eq!(iblank(NodeFlag::Solid), 0);
        assert_eq!(iblank(NodeFlag::Ghost), 0);
    }
}
