//! Saving and loading a `SpringSystem` as text.
//!
//! The encoding is line-oriented and deterministic. Fields are separated by whitespace and floats are written with six decimals:
//!
//! ```text
//! <nb_dim>
//! <n_masses>
//! <id>
//! <pos.x> <pos.y> <pos.z>
//! <vel.x> <vel.y> <vel.z>
//! <stress.x> <stress.y> <stress.z>
//! <mass>
//! <fixed: 0|1>
//! ...
//! <n_springs>
//! <id>
//! <length>
//! <k>
//! <rest_length>
//! <stress>
//! <min_stress> <max_stress>
//! <mass_id_0> <mass_id_1>
//! <breakable: 0|1>
//! ...
//! ```
//!
//! All three components of every vector are written, whatever the number of dimensions. The dissipation is not persisted, so a loaded system starts with
//! [`SpringSystem::DEFAULT_DISSIPATION`].

use std::{
    io::{BufWriter, Read, Write},
    path::Path,
    str::FromStr,
};

use crate::{Id, Mass, Spring, SpringSysError, SpringSystem};

/// Methods for saving and loading a `SpringSystem`.
impl SpringSystem {
    /// Writes the `SpringSystem` to the given writer.
    ///
    /// # Errors
    ///
    /// - If writing fails.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<(), SpringSysError> {
        writeln!(writer, "{}", self.nb_dim())?;

        writeln!(writer, "{}", self.n_masses())?;
        for m in self.masses() {
            let [px, py, pz] = *m.position();
            let [vx, vy, vz] = *m.velocity();
            let [sx, sy, sz] = *m.stress();
            writeln!(writer, "{}", m.id())?;
            writeln!(writer, "{px:.6} {py:.6} {pz:.6}")?;
            writeln!(writer, "{vx:.6} {vy:.6} {vz:.6}")?;
            writeln!(writer, "{sx:.6} {sy:.6} {sz:.6}")?;
            writeln!(writer, "{:.6}", m.mass())?;
            writeln!(writer, "{}", u8::from(m.is_fixed()))?;
        }

        writeln!(writer, "{}", self.n_springs())?;
        for s in self.springs() {
            let [min_stress, max_stress] = s.stress_bounds();
            let [a, b] = s.masses();
            writeln!(writer, "{}", s.id())?;
            writeln!(writer, "{:.6}", s.length())?;
            writeln!(writer, "{:.6}", s.k())?;
            writeln!(writer, "{:.6}", s.rest_length())?;
            writeln!(writer, "{:.6}", s.stress())?;
            writeln!(writer, "{min_stress:.6} {max_stress:.6}")?;
            writeln!(writer, "{a} {b}")?;
            writeln!(writer, "{}", u8::from(s.is_breakable()))?;
        }

        Ok(())
    }

    /// Reads a `SpringSystem` from the given reader.
    ///
    /// Every `Mass` and `Spring` goes through [`add_mass`](Self::add_mass) and [`add_spring`](Self::add_spring), so a loaded system satisfies the same
    /// invariants as one built by hand. Nothing partially built is returned on failure.
    ///
    /// # Errors
    ///
    /// - [`SpringSysError::Io`] if reading fails.
    /// - [`SpringSysError::Construction`] if the number of dimensions cannot produce a system.
    /// - [`SpringSysError::CorruptData`] if a field is missing or malformed, or if an entity breaks an invariant of the system.
    pub fn load<R: Read>(mut reader: R) -> Result<Self, SpringSysError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        text.parse()
    }

    /// Writes the `SpringSystem` to a file, replacing any existing file.
    ///
    /// # Errors
    ///
    /// - If the file cannot be created or written.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SpringSysError> {
        let file = std::fs::File::create(path.as_ref()).map_err(|e| {
            SpringSysError::InvalidArgument(format!("Could not create {}: {e}", path.as_ref().display()))
        })?;
        let mut writer = BufWriter::new(file);
        self.save(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a `SpringSystem` from a file.
    ///
    /// # Errors
    ///
    /// - [`SpringSysError::InvalidArgument`] if the file cannot be opened.
    /// - See [`load`](Self::load) for the rest.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, SpringSysError> {
        let file = std::fs::File::open(path.as_ref()).map_err(|e| {
            SpringSysError::InvalidArgument(format!("Could not open {}: {e}", path.as_ref().display()))
        })?;
        Self::load(std::io::BufReader::new(file))
    }
}

impl FromStr for SpringSystem {
    type Err = SpringSysError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens(s.split_whitespace());

        let nb_dim = tokens.field::<i64>("the number of dimensions")?;
        let mut sys = usize::try_from(nb_dim)
            .map_err(|_| SpringSysError::InvalidArgument(format!("The number of dimensions must be 1, 2 or 3, got {nb_dim}")))
            .and_then(Self::new)
            .map_err(|e| SpringSysError::Construction(e.to_string()))?;

        let n_masses = tokens.field::<usize>("the number of masses")?;
        for _ in 0..n_masses {
            let mass = Mass::new(tokens.field("the id of a mass")?)
                .with_position(tokens.vector("the position of a mass")?)
                .with_velocity(tokens.vector("the velocity of a mass")?)
                .with_stress(tokens.vector("the stress of a mass")?)
                .with_mass(tokens.field("the mass of a mass")?)
                .with_fixed(tokens.flag("the fixed flag of a mass")?);
            sys.add_mass(mass).map_err(corrupt)?;
        }

        let n_springs = tokens.field::<usize>("the number of springs")?;
        for _ in 0..n_springs {
            let spring = Spring::new(tokens.field("the id of a spring")?, [0, 0])
                .with_length(tokens.field("the length of a spring")?)
                .with_stiffness(tokens.field("the stiffness of a spring")?)
                .with_rest_length(tokens.field("the rest length of a spring")?)
                .with_stress(tokens.field("the stress of a spring")?)
                .with_stress_bounds([
                    tokens.field("the minimum stress of a spring")?,
                    tokens.field("the maximum stress of a spring")?,
                ])
                .with_masses([
                    tokens.field::<Id>("the first mass of a spring")?,
                    tokens.field::<Id>("the second mass of a spring")?,
                ])
                .with_breakable(tokens.flag("the breakable flag of a spring")?);
            sys.add_spring(spring).map_err(corrupt)?;
        }

        Ok(sys)
    }
}

/// Reports an entity rejected while loading as corrupt data.
fn corrupt(e: SpringSysError) -> SpringSysError {
    match e {
        SpringSysError::Validation(msg) => SpringSysError::CorruptData(msg),
        e => e,
    }
}

/// A cursor over the whitespace-separated fields of a persisted system.
struct Tokens<'a>(std::str::SplitWhitespace<'a>);

impl Tokens<'_> {
    /// Parses the next field.
    fn field<T: FromStr>(&mut self, what: &str) -> Result<T, SpringSysError> {
        let token = self
            .0
            .next()
            .ok_or_else(|| SpringSysError::CorruptData(format!("Unexpected end of data while reading {what}")))?;
        token
            .parse()
            .map_err(|_| SpringSysError::CorruptData(format!("Could not read {what} from {token:?}")))
    }

    /// Parses the next three fields as a vector.
    fn vector(&mut self, what: &str) -> Result<[f64; 3], SpringSysError> {
        Ok([self.field(what)?, self.field(what)?, self.field(what)?])
    }

    /// Parses the next field as an integer flag, where any non-zero value is `true`.
    fn flag(&mut self, what: &str) -> Result<bool, SpringSysError> {
        self.field::<i64>(what).map(|b| b != 0)
    }
}
