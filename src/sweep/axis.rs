//! Sweep axes - which fields vary and over what values

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::config::Dimension;
use crate::{Error, Result};

/// Explicit, ordered, non-empty set of values a sweep ranges over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(Vec<u64>);

impl Domain {
    /// Domain from explicit values, kept in the given order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `values` is empty.
    pub fn explicit(values: impl Into<Vec<u64>>) -> Result<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(Error::InvalidConfig("sweep domain is empty".to_string()));
        }
        Ok(Self(values))
    }

    /// `2^e` for every exponent in `exponents`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the range is empty or an exponent is 64 or more.
    pub fn powers_of_two(exponents: RangeInclusive<u32>) -> Result<Self> {
        let values = exponents
            .map(|e| {
                1u64.checked_shl(e).ok_or_else(|| {
                    Error::InvalidConfig(format!("2^{e} does not fit in 64 bits"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::explicit(values)
    }

    /// Every integer in `range`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the range is empty.
    pub fn range(range: RangeInclusive<u64>) -> Result<Self> {
        Self::explicit(range.collect::<Vec<_>>())
    }

    /// Domain values in sweep order.
    #[must_use]
    pub fn values(&self) -> &[u64] {
        &self.0
    }

    /// Number of sweep steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed domain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Affine coupling `target = lead * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupling {
    /// Field that follows the lead value
    pub target: Dimension,
    /// Multiplier applied to the lead value
    pub scale: u64,
    /// Constant added after scaling
    pub offset: u64,
}

impl Coupling {
    /// Coupling that sets `target` to `lead * scale + offset`.
    #[must_use]
    pub const fn new(target: Dimension, scale: u64, offset: u64) -> Self {
        Self {
            target,
            scale,
            offset,
        }
    }

    /// Coupled value for `lead`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on overflow.
    pub fn apply(&self, lead: u64) -> Result<u64> {
        lead.checked_mul(self.scale)
            .and_then(|v| v.checked_add(self.offset))
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "coupling {} = {lead} * {} + {} overflows",
                    self.target, self.scale, self.offset
                ))
            })
    }
}

/// The varying part of a sweep.
///
/// Every dimension in `tied` takes the domain value at each step; an optional
/// coupling derives a second dimension from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepAxis {
    tied: Vec<Dimension>,
    domain: Domain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    coupling: Option<Coupling>,
}

impl SweepAxis {
    /// One field varies over `domain`.
    #[must_use]
    pub fn single(dimension: Dimension, domain: Domain) -> Self {
        Self {
            tied: vec![dimension],
            domain,
            coupling: None,
        }
    }

    /// Several fields all take the same domain value (e.g. send = fetch = users).
    #[must_use]
    pub fn tied(dimensions: impl Into<Vec<Dimension>>, domain: Domain) -> Self {
        Self {
            tied: dimensions.into(),
            domain,
            coupling: None,
        }
    }

    /// `lead` varies over `domain` and `coupling.target` follows it.
    #[must_use]
    pub fn paired(lead: Dimension, domain: Domain, coupling: Coupling) -> Self {
        Self {
            tied: vec![lead],
            domain,
            coupling: Some(coupling),
        }
    }

    /// Fields that take the domain value directly.
    #[must_use]
    pub fn tied_dimensions(&self) -> &[Dimension] {
        &self.tied
    }

    /// The declared domain.
    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The coupling, if this is a paired sweep.
    #[must_use]
    pub const fn coupling(&self) -> Option<&Coupling> {
        self.coupling.as_ref()
    }

    /// Whether `dimension` changes from step to step.
    #[must_use]
    pub fn varies(&self, dimension: Dimension) -> bool {
        self.tied.contains(&dimension) || self.coupling.is_some_and(|c| c.target == dimension)
    }

    /// Structural checks: at least one tied field, no repeats, coupling target
    /// distinct from the tied fields.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` describing the problem.
    pub fn validate(&self) -> Result<()> {
        if self.tied.is_empty() {
            return Err(Error::InvalidConfig(
                "sweep axis has no varying dimension".to_string(),
            ));
        }
        if self.domain.is_empty() {
            return Err(Error::InvalidConfig("sweep domain is empty".to_string()));
        }
        for (i, dim) in self.tied.iter().enumerate() {
            if self.tied[..i].contains(dim) {
                return Err(Error::InvalidConfig(format!(
                    "sweep axis lists {dim} twice"
                )));
            }
        }
        if let Some(coupling) = &self.coupling {
            if self.tied.contains(&coupling.target) {
                return Err(Error::InvalidConfig(format!(
                    "coupled dimension {} is also a lead dimension",
                    coupling.target
                )));
            }
        }
        Ok(())
    }
}
