use serde::Deserialize;

/// How unknown unit suffixes are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Unknown suffixes normalize to zero
    #[default]
    Lenient,
    /// Unknown suffixes are rejected
    Strict,
}

/// Multiplier table used to bring magnitudes to bytes
///
/// Binary and decimal suffixes share the same multiplier in both tables, so
/// `KiB` and `kB` both mean 1,000 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitScale {
    /// Powers of 1,000 for every tier
    #[default]
    Decimal,
    /// Like `Decimal`, except the kilo tier is 10,000. Matches spreadsheets
    /// produced by older notebooks that wrote `10e3` for kilo.
    Legacy,
}

impl UnitScale {
    /// Look up the multiplier for an already lowercased suffix
    pub fn multiplier(&self, suffix: &str) -> Option<u64> {
        let kilo = match self {
            UnitScale::Decimal => 1_000,
            UnitScale::Legacy => 10_000,
        };
        match suffix {
            "b" => Some(1),
            "kib" | "kb" => Some(kilo),
            "mib" | "mb" => Some(1_000_000),
            "gib" | "gb" => Some(1_000_000_000),
            _ => None,
        }
    }
}
