//! The `restore` subcommand: `CarTo` then `Merge` (spec.md §4.8).

use graphsplit_restore::{restore, RestoreConfig};

use crate::cli::RestoreArgs;
use crate::error::Result;

pub fn run(args: &RestoreArgs) -> Result<()> {
    let config = RestoreConfig {
        car_path: args.car_path.clone(),
        output_dir: args.output_dir.clone(),
        parallel: args.parallel,
    };

    let (car_report, merge_report) = restore(&config)?;

    for (path, reason) in &car_report.failed {
        tracing::error!(car = %path.display(), %reason, "restore failed");
    }
    for (path, reason) in &merge_report.failed {
        tracing::error!(part = %path.display(), %reason, "merge failed");
    }
    tracing::info!(
        restored = car_report.restored.len(),
        merged = merge_report.merged.len(),
        "completed"
    );
    Ok(())
}
