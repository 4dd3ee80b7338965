use blank_prune::PruneConfig;

use crate::cli::args::ConfigArgs;

pub fn handle(args: ConfigArgs, config: &PruneConfig) -> Result<(), Box<dyn std::error::Error>> {
    let settings = &config.settings;

    if args.json {
        let mut output = serde_json::json!({
            "settings": {
                "variant": settings.variant(),
                "width": settings.width(),
                "tier": settings.tier,
                "log_level": settings.log_level(),
            },
        });
        if args.samples {
            output["samples"] = serde_json::to_value(&config.samples)?;
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if args.samples {
        for name in config.sample_names() {
            let Some(sample) = config.get_sample(name) else {
                continue;
            };
            println!(
                "{:<10} {:<36} {:?}",
                name,
                sample.description.as_deref().unwrap_or(""),
                sample.text
            );
        }
        return Ok(());
    }

    println!("variant:   {}", settings.variant());
    println!("width:     {}", settings.width());
    match settings.tier {
        Some(tier) => println!("tier:      {}", tier),
        None => println!("tier:      auto"),
    }
    println!("log_level: {}", settings.log_level());
    println!("samples:   {} available", config.samples.len());
    println!("\nUse 'config --samples' to list them");
    Ok(())
}
