//! Strand placement distributions.
//!
//! A [`PlacementDistribution`] hands out per-strand anchor coordinates and
//! orientation angles in batches of `n`. Every random variant owns its own
//! [`StdRng`], so the sequence of values it produces depends only on its seed
//! and on the order in which the three sampling methods are called.

use super::error::Error;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{PI, TAU};
use std::fmt;

/// Concentrations below this are treated as an isotropic angle distribution.
const MIN_CONCENTRATION: f64 = 1e-8;

/// Above this the von Mises density is sampled as a wrapped normal.
const MAX_CONCENTRATION: f64 = 1e6;

/// Source of strand anchor positions and orientations.
pub trait PlacementDistribution {
    /// Draws `n` anchor x coordinates.
    fn sample_x(&mut self, n: usize) -> Result<Vec<f64>, Error>;
    /// Draws `n` anchor y coordinates.
    fn sample_y(&mut self, n: usize) -> Result<Vec<f64>, Error>;
    /// Draws `n` orientation angles in radians.
    fn sample_angle(&mut self, n: usize) -> Result<Vec<f64>, Error>;
}

/// Creates a random source from an optional seed.
///
/// `None` seeds from the operating system, producing a non-reproducible source.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn uniform_samples(rng: &mut StdRng, upper: f64, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.random::<f64>() * upper).collect()
}

fn check_extent(name: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_parameter(
            name,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

/// Anchors uniform over `[0, extent_x) × [0, extent_y)`, angles uniform over `[0, 2π)`.
#[derive(Debug, Clone)]
pub struct UniformDistribution {
    extent_x: f64,
    extent_y: f64,
    rng: StdRng,
}

impl UniformDistribution {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if an extent is not positive and finite.
    pub fn new(extent_x: f64, extent_y: f64, seed: Option<u64>) -> Result<Self, Error> {
        check_extent("extent_x", extent_x)?;
        check_extent("extent_y", extent_y)?;
        Ok(Self {
            extent_x,
            extent_y,
            rng: rng_from_seed(seed),
        })
    }
}

impl PlacementDistribution for UniformDistribution {
    fn sample_x(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Ok(uniform_samples(&mut self.rng, self.extent_x, n))
    }

    fn sample_y(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Ok(uniform_samples(&mut self.rng, self.extent_y, n))
    }

    fn sample_angle(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Ok(uniform_samples(&mut self.rng, TAU, n))
    }
}

/// Uniform anchors with von Mises distributed orientations.
///
/// Angles cluster around `mean_angle`; larger `concentration` means a
/// narrower spread, zero gives isotropic orientations.
#[derive(Debug, Clone)]
pub struct DirectionalDistribution {
    extent_x: f64,
    extent_y: f64,
    mean_angle: f64,
    concentration: f64,
    rng: StdRng,
}

impl DirectionalDistribution {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if an extent is not positive and
    /// finite, or if the concentration is negative or not finite.
    pub fn new(
        extent_x: f64,
        extent_y: f64,
        mean_angle: f64,
        concentration: f64,
        seed: Option<u64>,
    ) -> Result<Self, Error> {
        check_extent("extent_x", extent_x)?;
        check_extent("extent_y", extent_y)?;
        if !mean_angle.is_finite() {
            return Err(Error::invalid_parameter(
                "mean_angle",
                format!("must be finite, got {}", mean_angle),
            ));
        }
        if !concentration.is_finite() || concentration < 0.0 {
            return Err(Error::invalid_parameter(
                "concentration",
                format!("must be non-negative and finite, got {}", concentration),
            ));
        }
        Ok(Self {
            extent_x,
            extent_y,
            mean_angle,
            concentration,
            rng: rng_from_seed(seed),
        })
    }

    /// Best–Fisher rejection sampler for the von Mises distribution.
    fn sample_von_mises(&mut self) -> f64 {
        let kappa = self.concentration;
        if kappa < MIN_CONCENTRATION {
            return self.rng.random::<f64>() * TAU;
        }
        if kappa > MAX_CONCENTRATION {
            let sd = 1.0 / kappa.sqrt();
            return wrap_angle(self.mean_angle + sd * self.standard_normal());
        }

        let tau = 1.0 + (1.0 + 4.0 * kappa * kappa).sqrt();
        let rho = (tau - (2.0 * tau).sqrt()) / (2.0 * kappa);
        let r = (1.0 + rho * rho) / (2.0 * rho);

        let f = loop {
            let u1: f64 = self.rng.random();
            let u2: f64 = self.rng.random();
            let z = (PI * u1).cos();
            let f = (1.0 + r * z) / (r + z);
            let c = kappa * (r - f);
            if c * (2.0 - c) - u2 > 0.0 || (c / u2).ln() + 1.0 - c >= 0.0 {
                break f;
            }
        };

        let u3: f64 = self.rng.random();
        let theta = if u3 > 0.5 {
            self.mean_angle + f.clamp(-1.0, 1.0).acos()
        } else {
            self.mean_angle - f.clamp(-1.0, 1.0).acos()
        };
        wrap_angle(theta)
    }

    /// Box–Muller draw from N(0, 1).
    fn standard_normal(&mut self) -> f64 {
        // 1 - u keeps the logarithm finite
        let u1: f64 = 1.0 - self.rng.random::<f64>();
        let u2: f64 = self.rng.random();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }
}

/// Maps an angle into [0, 2π).
fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly 2π
    if wrapped >= TAU { 0.0 } else { wrapped }
}

impl PlacementDistribution for DirectionalDistribution {
    fn sample_x(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Ok(uniform_samples(&mut self.rng, self.extent_x, n))
    }

    fn sample_y(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Ok(uniform_samples(&mut self.rng, self.extent_y, n))
    }

    fn sample_angle(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Ok((0..n).map(|_| self.sample_von_mises()).collect())
    }
}

/// Caller-supplied anchors and angles, returned verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct DeterministicDistribution {
    x: Vec<f64>,
    y: Vec<f64>,
    angle: Vec<f64>,
}

impl DeterministicDistribution {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the three arrays differ in length.
    pub fn new(x: Vec<f64>, y: Vec<f64>, angle: Vec<f64>) -> Result<Self, Error> {
        if x.len() != y.len() || x.len() != angle.len() {
            return Err(Error::invalid_parameter(
                "placement",
                format!(
                    "deterministic arrays differ in length (x = {}, y = {}, angle = {})",
                    x.len(),
                    y.len(),
                    angle.len()
                ),
            ));
        }
        Ok(Self { x, y, angle })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    fn take(values: &[f64], axis: &str, n: usize) -> Result<Vec<f64>, Error> {
        if values.len() != n {
            return Err(Error::invalid_parameter(
                axis,
                format!(
                    "deterministic placement holds {} values but {} strands were requested",
                    values.len(),
                    n
                ),
            ));
        }
        Ok(values.to_vec())
    }
}

impl PlacementDistribution for DeterministicDistribution {
    fn sample_x(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Self::take(&self.x, "x", n)
    }

    fn sample_y(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Self::take(&self.y, "y", n)
    }

    fn sample_angle(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Self::take(&self.angle, "angle", n)
    }
}

/// Boxed batch sampler used by [`GeneralDistribution`].
pub type Sampler = Box<dyn FnMut(usize) -> Vec<f64>>;

/// Arbitrary placement built from three injected samplers.
pub struct GeneralDistribution {
    x: Sampler,
    y: Sampler,
    angle: Sampler,
}

impl GeneralDistribution {
    pub fn new(
        x: impl FnMut(usize) -> Vec<f64> + 'static,
        y: impl FnMut(usize) -> Vec<f64> + 'static,
        angle: impl FnMut(usize) -> Vec<f64> + 'static,
    ) -> Self {
        Self {
            x: Box::new(x),
            y: Box::new(y),
            angle: Box::new(angle),
        }
    }

    fn draw(sampler: &mut Sampler, axis: &str, n: usize) -> Result<Vec<f64>, Error> {
        let values = sampler(n);
        if values.len() != n {
            return Err(Error::invalid_parameter(
                axis,
                format!("sampler returned {} values, expected {}", values.len(), n),
            ));
        }
        Ok(values)
    }
}

impl fmt::Debug for GeneralDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneralDistribution").finish_non_exhaustive()
    }
}

impl PlacementDistribution for GeneralDistribution {
    fn sample_x(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Self::draw(&mut self.x, "x", n)
    }

    fn sample_y(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Self::draw(&mut self.y, "y", n)
    }

    fn sample_angle(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        Self::draw(&mut self.angle, "angle", n)
    }
}

/// The known placement strategies plus an open-ended custom one.
#[derive(Debug)]
pub enum StrandDistribution {
    Uniform(UniformDistribution),
    Directional(DirectionalDistribution),
    Deterministic(DeterministicDistribution),
    General(GeneralDistribution),
}

impl StrandDistribution {
    pub fn name(&self) -> &'static str {
        match self {
            StrandDistribution::Uniform(_) => "uniform",
            StrandDistribution::Directional(_) => "directional",
            StrandDistribution::Deterministic(_) => "deterministic",
            StrandDistribution::General(_) => "general",
        }
    }

    fn inner(&mut self) -> &mut dyn PlacementDistribution {
        match self {
            StrandDistribution::Uniform(d) => d,
            StrandDistribution::Directional(d) => d,
            StrandDistribution::Deterministic(d) => d,
            StrandDistribution::General(d) => d,
        }
    }
}

impl PlacementDistribution for StrandDistribution {
    fn sample_x(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        self.inner().sample_x(n)
    }

    fn sample_y(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        self.inner().sample_y(n)
    }

    fn sample_angle(&mut self, n: usize) -> Result<Vec<f64>, Error> {
        self.inner().sample_angle(n)
    }
}

impl From<UniformDistribution> for StrandDistribution {
    fn from(d: UniformDistribution) -> Self {
        StrandDistribution::Uniform(d)
    }
}

impl From<DirectionalDistribution> for StrandDistribution {
    fn from(d: DirectionalDistribution) -> Self {
        StrandDistribution::Directional(d)
    }
}

impl From<DeterministicDistribution> for StrandDistribution {
    fn from(d: DeterministicDistribution) -> Self {
        StrandDistribution::Deterministic(d)
    }
}

impl From<GeneralDistribution> for StrandDistribution {
    fn from(d: GeneralDistribution) -> Self {
        StrandDistribution::General(d)
    }
}
