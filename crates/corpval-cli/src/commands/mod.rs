//! CLI command implementations.

pub mod config;
pub mod dcf;
pub mod evaluate;
pub mod roic;
pub mod wacc;

pub use config::ConfigArgs;
pub use dcf::DcfArgs;
pub use evaluate::EvaluateArgs;
pub use roic::RoicArgs;
pub use wacc::WaccArgs;

use corpval_analytics::dcf::GrowthStage;

use crate::error::{CliError, CliResult};

/// Parses a `NAME:YEARS:RATE` stage. The name may be empty; an empty rate is
/// kept as missing so the engine can report which stage lacks one.
pub fn parse_stage(s: &str) -> CliResult<GrowthStage> {
    let invalid = || CliError::InvalidStage(s.to_string());
    let parts: Vec<&str> = s.split(':').collect();
    let (name, years, rate) = match parts.as_slice() {
        [name, years, rate] => (*name, *years, *rate),
        [years, rate] => ("", *years, *rate),
        _ => return Err(invalid()),
    };

    let years = years.trim().parse::<u32>().map_err(|_| invalid())?;
    let growth_rate = match rate.trim() {
        "" => None,
        rate => Some(rate.parse::<f64>().map_err(|_| invalid())?),
    };

    Ok(GrowthStage {
        name: name.trim().to_string(),
        years,
        growth_rate,
    })
}
