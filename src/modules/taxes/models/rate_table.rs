//! Statutory rate tables for PPh 21.
//!
//! A [`RateTable`] bundles everything the PPh 21 calculator reads: the PTKP
//! (non-taxable income) constants, the occupational-cost deduction, the
//! progressive annual brackets and the three monthly TER tables. Two
//! versions ship with the crate; [`RateTableVersion::Current`] is the
//! default and carries the post-2024 PTKP and bracket figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::AppError;

/// Which published schedule a [`RateTable`] encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateTableVersion {
    /// Older flat PTKP constants and the original bracket widths
    Legacy,
    /// Current PTKP and bracket schedule, TER-inclusive
    #[default]
    Current,
}

impl fmt::Display for RateTableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateTableVersion::Legacy => write!(f, "legacy"),
            RateTableVersion::Current => write!(f, "current"),
        }
    }
}

impl std::str::FromStr for RateTableVersion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(RateTableVersion::Legacy),
            "current" => Ok(RateTableVersion::Current),
            _ => Err(AppError::validation(format!(
                "Invalid rate table version: {}. Expected legacy or current",
                s
            ))),
        }
    }
}

/// PTKP constants, all annual amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtkpSchedule {
    pub personal: Decimal,
    pub spouse: Decimal,
    pub per_dependent: Decimal,
}

/// One progressive slice.
///
/// `limit` is the width of the slice, not a cumulative ceiling: the
/// calculator taxes `min(remaining, limit)` at `rate` and moves on.
/// `None` marks the final, unbounded slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveBracket {
    pub limit: Option<Decimal>,
    pub rate: Decimal,
}

impl ProgressiveBracket {
    fn new(limit: Option<i64>, rate: Decimal) -> Self {
        Self {
            limit: limit.map(Decimal::from),
            rate,
        }
    }
}

/// TER table category, selected from filing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerCategory {
    A,
    B,
    C,
}

impl fmt::Display for TerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerCategory::A => write!(f, "A"),
            TerCategory::B => write!(f, "B"),
            TerCategory::C => write!(f, "C"),
        }
    }
}

/// A monthly gross income band and its effective rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerBand {
    /// Inclusive upper bound of monthly gross income; `None` is open-ended
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

/// Ascending TER bands for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerTable {
    pub category: TerCategory,
    pub bands: Vec<TerBand>,
}

impl TerTable {
    /// Build a table from `(upper bound, rate in basis points)` pairs.
    /// The final rate covers everything above the last bound.
    fn from_bands(category: TerCategory, bounded: &[(i64, i64)], top_rate_bp: i64) -> Self {
        let mut bands: Vec<TerBand> = bounded
            .iter()
            .map(|&(bound, rate_bp)| TerBand {
                upper_bound: Some(Decimal::from(bound)),
                rate: Decimal::new(rate_bp, 4),
            })
            .collect();
        bands.push(TerBand {
            upper_bound: None,
            rate: Decimal::new(top_rate_bp, 4),
        });
        Self { category, bands }
    }

    /// Rate of the first band whose bound covers `monthly_gross`.
    ///
    /// Falls back to the last band's rate when the income exceeds every
    /// explicit bound. An empty table yields zero.
    pub fn rate_for(&self, monthly_gross: Decimal) -> Decimal {
        self.bands
            .iter()
            .find(|band| match band.upper_bound {
                Some(bound) => bound >= monthly_gross,
                None => true,
            })
            .or_else(|| self.bands.last())
            .map(|band| band.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Complete PPh 21 configuration artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub version: RateTableVersion,
    pub ptkp: PtkpSchedule,
    /// Share of annual gross income deductible as occupational cost
    pub occupational_cost_rate: Decimal,
    /// Annual ceiling on the occupational-cost deduction
    pub occupational_cost_cap: Decimal,
    /// Discount applied to the tax of employees with an NPWP on file
    pub npwp_discount_rate: Decimal,
    pub brackets: Vec<ProgressiveBracket>,
    pub ter_a: TerTable,
    pub ter_b: TerTable,
    pub ter_c: TerTable,
}

/// Maximum number of dependents counted toward PTKP
pub const MAX_DEPENDENTS: u32 = 3;

impl RateTable {
    pub fn for_version(version: RateTableVersion) -> Self {
        match version {
            RateTableVersion::Legacy => Self::legacy(),
            RateTableVersion::Current => Self::current(),
        }
    }

    pub fn current() -> Self {
        Self {
            version: RateTableVersion::Current,
            ptkp: PtkpSchedule {
                personal: Decimal::from(54_000_000),
                spouse: Decimal::from(4_500_000),
                per_dependent: Decimal::from(4_500_000),
            },
            occupational_cost_rate: Decimal::new(5, 2),
            occupational_cost_cap: Decimal::from(6_000_000),
            npwp_discount_rate: Decimal::new(5, 2),
            brackets: vec![
                ProgressiveBracket::new(Some(60_000_000), Decimal::new(5, 2)),
                ProgressiveBracket::new(Some(190_000_000), Decimal::new(15, 2)),
                ProgressiveBracket::new(Some(250_000_000), Decimal::new(25, 2)),
                ProgressiveBracket::new(Some(4_500_000_000), Decimal::new(30, 2)),
                ProgressiveBracket::new(None, Decimal::new(35, 2)),
            ],
            ter_a: ter_table_a(),
            ter_b: ter_table_b(),
            ter_c: ter_table_c(),
        }
    }

    pub fn legacy() -> Self {
        Self {
            version: RateTableVersion::Legacy,
            ptkp: PtkpSchedule {
                personal: Decimal::from(54_000_000),
                spouse: Decimal::from(54_000_000),
                per_dependent: Decimal::from(54_000_000),
            },
            brackets: vec![
                ProgressiveBracket::new(Some(50_000_000), Decimal::new(5, 2)),
                ProgressiveBracket::new(Some(250_000_000), Decimal::new(15, 2)),
                ProgressiveBracket::new(Some(500_000_000), Decimal::new(25, 2)),
                ProgressiveBracket::new(Some(5_000_000_000), Decimal::new(30, 2)),
                ProgressiveBracket::new(None, Decimal::new(35, 2)),
            ],
            ..Self::current()
        }
    }

    pub fn ter_table(&self, category: TerCategory) -> &TerTable {
        match category {
            TerCategory::A => &self.ter_a,
            TerCategory::B => &self.ter_b,
            TerCategory::C => &self.ter_c,
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::current()
    }
}

// Rates below are in basis points of a percent: 25 = 0.25%, 100 = 1%.

fn ter_table_a() -> TerTable {
    TerTable::from_bands(
        TerCategory::A,
        &[
            (5_400_000, 0),
            (5_650_000, 25),
            (5_950_000, 50),
            (6_300_000, 75),
            (6_750_000, 100),
            (7_500_000, 125),
            (8_550_000, 150),
            (9_650_000, 175),
            (10_050_000, 200),
            (10_350_000, 225),
            (10_700_000, 250),
            (11_050_000, 300),
            (11_600_000, 350),
            (12_500_000, 400),
            (13_750_000, 500),
            (15_100_000, 600),
            (16_950_000, 700),
            (19_750_000, 800),
            (24_150_000, 900),
            (26_450_000, 1000),
            (28_000_000, 1100),
            (30_050_000, 1200),
            (32_400_000, 1300),
            (35_400_000, 1400),
            (39_100_000, 1500),
            (43_850_000, 1600),
            (47_800_000, 1700),
            (51_400_000, 1800),
            (56_300_000, 1900),
            (62_200_000, 2000),
            (68_600_000, 2100),
            (77_500_000, 2200),
            (89_000_000, 2300),
            (103_000_000, 2400),
            (125_000_000, 2500),
            (157_000_000, 2600),
            (206_000_000, 2700),
            (337_000_000, 2800),
            (454_000_000, 2900),
            (550_000_000, 3000),
            (695_000_000, 3100),
            (910_000_000, 3200),
            (1_400_000_000, 3300),
        ],
        3400,
    )
}

fn ter_table_b() -> TerTable {
    TerTable::from_bands(
        TerCategory::B,
        &[
            (6_200_000, 0),
            (6_500_000, 25),
            (6_850_000, 50),
            (7_300_000, 75),
            (9_200_000, 100),
            (10_750_000, 150),
            (11_250_000, 200),
            (11_600_000, 250),
            (12_600_000, 300),
            (13_600_000, 400),
            (14_950_000, 500),
            (16_400_000, 600),
            (18_450_000, 700),
            (21_850_000, 800),
            (26_000_000, 900),
            (27_700_000, 1000),
            (29_350_000, 1100),
            (31_450_000, 1200),
            (33_950_000, 1300),
            (37_100_000, 1400),
            (41_100_000, 1500),
            (45_800_000, 1600),
            (49_500_000, 1700),
            (53_800_000, 1800),
            (58_500_000, 1900),
            (64_000_000, 2000),
            (71_000_000, 2100),
            (80_000_000, 2200),
            (93_000_000, 2300),
            (109_000_000, 2400),
            (129_000_000, 2500),
            (163_000_000, 2600),
            (211_000_000, 2700),
            (374_000_000, 2800),
            (459_000_000, 2900),
            (555_000_000, 3000),
            (704_000_000, 3100),
            (957_000_000, 3200),
            (1_405_000_000, 3300),
        ],
        3400,
    )
}

fn ter_table_c() -> TerTable {
    TerTable::from_bands(
        TerCategory::C,
        &[
            (6_600_000, 0),
            (6_950_000, 25),
            (7_350_000, 50),
            (7_800_000, 75),
            (8_850_000, 100),
            (9_800_000, 125),
            (10_950_000, 150),
            (11_200_000, 175),
            (12_050_000, 200),
            (12_950_000, 300),
            (14_150_000, 400),
            (15_550_000, 500),
            (17_050_000, 600),
            (19_500_000, 700),
            (22_700_000, 800),
            (26_600_000, 900),
            (28_100_000, 1000),
            (30_100_000, 1100),
            (32_600_000, 1200),
            (35_400_000, 1300),
            (38_900_000, 1400),
            (43_000_000, 1500),
            (47_400_000, 1600),
            (51_200_000, 1700),
            (55_800_000, 1800),
            (60_400_000, 1900),
            (66_700_000, 2000),
            (74_500_000, 2100),
            (83_200_000, 2200),
            (95_600_000, 2300),
            (110_000_000, 2400),
            (134_000_000, 2500),
            (169_000_000, 2600),
            (221_000_000, 2700),
            (390_000_000, 2800),
            (463_000_000, 2900),
            (561_000_000, 3000),
            (709_000_000, 3100),
            (965_000_000, 3200),
            (1_419_000_000, 3300),
        ],
        3400,
    )
}
