//! Age command: US grade level to minimum reader age.

use clap::Args;
use serde::Serialize;
use tracing::{debug, instrument};

use readability_score_core::minimum_age_from_us_grade;

/// Arguments for the `age` subcommand.
#[derive(Args, Debug)]
pub struct AgeArgs {
    /// US grade level (e.g. a Flesch-Kincaid grade).
    #[arg(allow_negative_numbers = true)]
    pub grade: f64,
}

#[derive(Serialize)]
struct AgeReport {
    grade: f64,
    minimum_age: i64,
}

/// Print the minimum reader age for a grade.
#[instrument(name = "cmd_age", skip_all, fields(grade = args.grade))]
pub fn cmd_age(args: AgeArgs, global_json: bool) -> anyhow::Result<()> {
    debug!("executing age command");
    let report = AgeReport {
        grade: args.grade,
        minimum_age: minimum_age_from_us_grade(args.grade),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.minimum_age);
    }
    Ok(())
}
