use blank_prune::{MatrixEntry, PlatformInfo, Tier, Variant, Width, support_matrix};

use crate::cli::args::CapsArgs;

pub fn handle(args: CapsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let platform = PlatformInfo::detect();
    let matrix = support_matrix();

    if args.json {
        let output = serde_json::json!({
            "platform": platform,
            "matrix": matrix,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Platform: {}", platform.display());
    println!();
    print!("{:<14}", "variant");
    for tier in Tier::ALL {
        print!(" {:<10}", tier.to_string());
    }
    println!();

    for variant in Variant::ALL {
        print!("{:<14}", variant.to_string());
        for tier in Tier::ALL {
            print!(" {:<10}", cell(&matrix, variant, tier));
        }
        println!();
    }

    println!();
    println!("Widths in parentheses have a kernel this CPU cannot run");
    Ok(())
}

/// Widths for one variant/tier pair: bare when runnable, in parentheses
/// when the CPU lacks the tier, `-` when no kernel exists.
fn cell(matrix: &[MatrixEntry], variant: Variant, tier: Tier) -> String {
    let widths: Vec<String> = matrix
        .iter()
        .filter(|e| e.variant == variant && e.tier == tier && e.supported)
        .map(|e| {
            let lanes = Width::lanes(e.width);
            if e.available {
                lanes.to_string()
            } else {
                format!("({})", lanes)
            }
        })
        .collect();

    if widths.is_empty() {
        "-".to_string()
    } else {
        widths.join(" ")
    }
}
