//! Parameter listing.

use clap::Args;
use escalera_core::ParameterInfo;
use escalera_filter::Vcs3Filter;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show normalized defaults alongside plain values
    #[arg(long)]
    verbose: bool,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let filter = Vcs3Filter::new();

    println!(
        "{:<12} {:<10} {:>10} {:>10} {:>10}  {}",
        "Name", "Id", "Min", "Max", "Default", "Unit"
    );
    for i in 0..filter.param_count() {
        let Some(desc) = filter.param_info(i) else {
            continue;
        };
        println!(
            "{:<12} {:<10} {:>10.2} {:>10.2} {:>10.2}  {}",
            desc.name,
            desc.string_id,
            desc.min,
            desc.max,
            desc.default,
            desc.unit.label(),
        );
        if args.verbose {
            println!(
                "{:<12} normalized default: {:.4}",
                "", desc.normalize(desc.default)
            );
        }
    }

    Ok(())
}
