//! The closed set of summary recipes.

use std::fmt;
use std::str::FromStr;

use swbs_calendar::Bucket;

use crate::error::SummaryError;

/// Which periods a summary produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// One grid per December-anchored quarter.
    Seasonal,
    /// One grid per calendar month.
    Monthly,
    /// One grid per calendar year.
    Annual,
    /// One grid per season, averaged across years.
    MeanSeasonal,
    /// One grid per month of the year, averaged across years.
    MeanMonthly,
    /// A single grid averaged across years.
    MeanAnnual,
}

impl BaseType {
    pub const ALL: [BaseType; 6] = [
        BaseType::Seasonal,
        BaseType::Monthly,
        BaseType::Annual,
        BaseType::MeanSeasonal,
        BaseType::MeanMonthly,
        BaseType::MeanAnnual,
    ];

    /// Snake-case name used in configuration, attributes and filenames.
    pub fn as_str(self) -> &'static str {
        match self {
            BaseType::Seasonal => "seasonal",
            BaseType::Monthly => "monthly",
            BaseType::Annual => "annual",
            BaseType::MeanSeasonal => "mean_seasonal",
            BaseType::MeanMonthly => "mean_monthly",
            BaseType::MeanAnnual => "mean_annual",
        }
    }

    /// Looks up a base type by its snake-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == name)
    }

    /// Resample bucket for the first pass.
    pub fn bucket(self) -> Bucket {
        match self {
            BaseType::Seasonal | BaseType::MeanSeasonal => Bucket::QuarterDec,
            BaseType::Monthly | BaseType::MeanMonthly => Bucket::Month,
            BaseType::Annual | BaseType::MeanAnnual => Bucket::Year,
        }
    }

    /// Aggregation applied to the first-pass results.
    pub fn second_pass(self) -> SecondPass {
        match self {
            BaseType::Seasonal | BaseType::Monthly | BaseType::Annual => SecondPass::None,
            BaseType::MeanSeasonal | BaseType::MeanMonthly => SecondPass::GroupByMonth,
            BaseType::MeanAnnual => SecondPass::MeanAcrossYears,
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How daily values inside a period are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Sum,
    Mean,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Sum => "sum",
            Operation::Mean => "mean",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sum" => Some(Operation::Sum),
            "mean" => Some(Operation::Mean),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduction over the values that fall into one period.
///
/// A period with no members always reduces to NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Plain sum; any NaN member makes the result NaN.
    Sum,
    /// Plain mean; any NaN member makes the result NaN.
    Mean,
    /// Sum ignoring NaN; all-NaN members sum to 0.
    NanSum,
    /// Mean ignoring NaN; all-NaN members give NaN.
    NanMean,
}

impl Reduction {
    /// Reduces `values`.
    pub fn apply(self, values: impl IntoIterator<Item = f64>) -> f64 {
        let mut n = 0usize;
        let mut n_valid = 0usize;
        let mut sum = 0.0;
        let mut saw_nan = false;
        for v in values {
            n += 1;
            if v.is_nan() {
                saw_nan = true;
            } else {
                n_valid += 1;
                sum += v;
            }
        }
        if n == 0 {
            return f64::NAN;
        }
        match self {
            Reduction::Sum | Reduction::Mean if saw_nan => f64::NAN,
            Reduction::Sum | Reduction::NanSum => sum,
            Reduction::Mean => sum / n as f64,
            Reduction::NanMean if n_valid == 0 => f64::NAN,
            Reduction::NanMean => sum / n_valid as f64,
        }
    }
}

/// Aggregation applied after the first resample pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondPass {
    None,
    /// Group periods by the calendar month of their label and take the
    /// NaN-skipping mean of each group.
    GroupByMonth,
    /// NaN-skipping mean over every period.
    MeanAcrossYears,
}

/// A base type paired with an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Recipe {
    basetype: BaseType,
    operation: Operation,
}

impl Recipe {
    pub fn new(basetype: BaseType, operation: Operation) -> Self {
        Self {
            basetype,
            operation,
        }
    }

    /// Builds a recipe from separate base-type and operation names.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::UnknownRecipe`] if either name is not
    /// recognised.
    pub fn parse(basetype: &str, operation: &str) -> Result<Self, SummaryError> {
        match (BaseType::from_name(basetype), Operation::from_name(operation)) {
            (Some(b), Some(o)) => Ok(Self::new(b, o)),
            _ => Err(SummaryError::UnknownRecipe {
                basetype: basetype.to_string(),
                operation: operation.to_string(),
            }),
        }
    }

    /// All twelve recipes.
    pub fn all() -> impl Iterator<Item = Recipe> {
        BaseType::ALL.into_iter().flat_map(|b| {
            [Operation::Sum, Operation::Mean]
                .into_iter()
                .map(move |o| Recipe::new(b, o))
        })
    }

    pub fn basetype(self) -> BaseType {
        self.basetype
    }

    pub fn operation(self) -> Operation {
        self.operation
    }

    /// Resample bucket for the first pass.
    pub fn bucket(self) -> Bucket {
        self.basetype.bucket()
    }

    /// First-pass reduction. `seasonal_sum` and both `mean_seasonal`
    /// recipes propagate NaN; every other recipe skips it.
    pub fn reduction(self) -> Reduction {
        match (self.basetype, self.operation) {
            (BaseType::Seasonal | BaseType::MeanSeasonal, Operation::Sum) => Reduction::Sum,
            (BaseType::MeanSeasonal, Operation::Mean) => Reduction::Mean,
            (_, Operation::Sum) => Reduction::NanSum,
            (_, Operation::Mean) => Reduction::NanMean,
        }
    }

    pub fn second_pass(self) -> SecondPass {
        self.basetype.second_pass()
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.basetype, self.operation)
    }
}

impl FromStr for Recipe {
    type Err = SummaryError;

    /// Parses a combined name such as `"mean_annual_sum"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('_') {
            Some((basetype, operation)) => Recipe::parse(basetype, operation),
            None => Err(SummaryError::UnknownRecipe {
                basetype: s.to_string(),
                operation: String::new(),
            }),
        }
    }
}
