use std::fs;
use std::io::{self, Read, Write};

use blank_prune::{PruneConfig, PruneError, Pruner, Tier, Variant, Width, count_blanks};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::cli::args::RunArgs;
use crate::cli::config::resolve_pruner;

/// Blank bytes used by --random
const RANDOM_BLANKS: &[u8] = b" \t\n";

/// JSON shape of `run --json`
#[derive(Serialize)]
struct RunReport {
    variant: Variant,
    tier: Tier,
    width: Width,
    batch_len: usize,
    input_len: usize,
    blanks: usize,
    length: usize,
    output: String,
    lanes: Vec<u8>,
}

pub fn handle(args: RunArgs, config: &PruneConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pruner = resolve_pruner(&args, &config.settings)?;
    let batch_len = pruner.batch_len();

    let text = read_input(&args, config, batch_len)?;
    if text.len() > batch_len {
        return Err(format!(
            "input is {} bytes; {} on {} takes at most {}",
            text.len(),
            pruner.variant(),
            pruner.capability().width,
            batch_len
        )
        .into());
    }

    let mut input = text.clone();
    input.resize(batch_len, b' ');
    let mut out = vec![0u8; batch_len];
    let length = pruner.prune(&input, &mut out)?;

    tracing::info!(
        variant = %pruner.variant(),
        capability = %pruner.capability(),
        input_len = text.len(),
        length,
        "pruned"
    );

    if args.json {
        let report = RunReport {
            variant: pruner.variant(),
            tier: pruner.capability().tier,
            width: pruner.capability().width,
            batch_len,
            input_len: text.len(),
            blanks: count_blanks(&input),
            length,
            output: String::from_utf8_lossy(&out[..length]).into_owned(),
            lanes: out,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let shown = if args.all { &out[..] } else { &out[..length] };
    let mut stdout = io::stdout().lock();
    stdout.write_all(shown)?;
    writeln!(stdout)?;
    Ok(())
}

fn read_input(
    args: &RunArgs,
    config: &PruneConfig,
    batch_len: usize,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if let Some(text) = &args.text {
        return Ok(text.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return Ok(fs::read(path)?);
    }
    if let Some(name) = &args.sample {
        let sample = config
            .get_sample(name)
            .ok_or_else(|| PruneError::UnknownName {
                kind: "sample",
                name: name.clone(),
            })?;
        return Ok(sample.text.as_bytes().to_vec());
    }
    if args.random {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        return Ok(random_batch(&mut rng, batch_len));
    }

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Printable ASCII with roughly 30% blanks mixed in.
fn random_batch(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    (0..len)
        .map(|_| {
            if rng.random_bool(0.3) {
                RANDOM_BLANKS[rng.random_range(0..RANDOM_BLANKS.len())]
            } else {
                rng.random_range(b'!'..=b'~')
            }
        })
        .collect()
}
