use blank_prune::Network;
use blank_prune::prune::layout::{self, MAX_WIDTH};
use blank_prune::prune::network;

use crate::cli::args::NetworkArgs;

pub fn handle(args: NetworkArgs) -> Result<(), Box<dyn std::error::Error>> {
    let width = args.width;
    if !(2..=MAX_WIDTH).contains(&width) || !width.is_power_of_two() {
        return Err(format!(
            "network width must be a power of two from 2 to {}, got {}",
            MAX_WIDTH, width
        )
        .into());
    }

    if let Some(baked) = network::baked(width) {
        return show(baked, "baked", &args);
    }
    let generated = layout::bitonic(width)?;
    Network::with_layout(&generated, |n| show(n, "generated", &args))
}

fn show(
    network: &Network<'_>,
    source: &str,
    args: &NetworkArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = network.validate()?;

    if args.json {
        let stages: Vec<_> = network
            .stages
            .iter()
            .map(|s| serde_json::json!({ "lo": s.lo, "hi": s.hi }))
            .collect();
        let mut output = serde_json::json!({
            "source": source,
            "report": report,
        });
        if !args.summary {
            output["stages"] = serde_json::Value::from(stages);
            output["deshuffle"] = serde_json::Value::from(network.deshuffle);
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "bitonic network ({}), {} lanes: {} stages, {} comparators",
        source, report.width, report.stages, report.comparators
    );
    if !args.summary {
        for (i, stage) in network.stages.iter().enumerate() {
            println!("stage {:>2} lo {:?}", i, stage.lo);
            println!("         hi {:?}", stage.hi);
        }
        println!("deshuffle   {:?}", network.deshuffle);
    }
    println!(
        "zero-one check: {} inputs ({}), sorted",
        report.inputs_checked,
        if report.exhaustive { "exhaustive" } else { "sampled" }
    );
    Ok(())
}
