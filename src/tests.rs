use crate::{
    Capability, PruneConfig, PruneError, Pruner, Tier, Variant, Width, compact_batches,
    count_blanks, prune_full, prune_naive, prune_scalar, prune_semi,
};

fn sample(name: &str) -> Vec<u8> {
    let config = PruneConfig::load_default().unwrap();
    config.get_sample(name).unwrap().text.as_bytes().to_vec()
}

fn padded<const W: usize>(text: &[u8]) -> [u8; W] {
    let mut batch = [b' '; W];
    batch[..text.len()].copy_from_slice(text);
    batch
}

fn portable(variant: Variant, width: Width) -> Pruner {
    Pruner::new(variant, Capability::new(width, Tier::Portable)).unwrap()
}

#[test]
fn test_digits_scenario() {
    let input = padded::<16>(&sample("digits"));
    assert_eq!(count_blanks(&input), 11);

    let mut out = [0u8; 16];
    let len = prune_naive(&input, &mut out);
    assert_eq!(len, 5);
    assert_eq!(&out[..len], b"12345");
}

#[test]
fn test_digits_padded_to_32_lanes() {
    let input = padded::<32>(&sample("digits"));
    let mut out = [0u8; 32];
    let len = prune_naive(&input, &mut out);
    assert_eq!(&out[..len], b"12345");
}

#[test]
fn test_runs_scenario_semi() {
    let input = padded::<16>(&sample("runs"));
    let mut out = [0u8; 16];
    let len = prune_semi(&input, &mut out);
    assert_eq!(len, 11);
    assert_eq!(&out[..len], b"12346678999");
}

#[test]
fn test_semi_truncates_trailing_blanks() {
    let input = padded::<16>(b"1234 678");
    let mut out = [0u8; 16];
    let len = prune_semi(&input, &mut out);
    assert_eq!(&out[..len], b"12346678");
}

#[test]
fn test_quarters_scenario_full() {
    let input = padded::<16>(&sample("quarters"));
    let mut out = [0u8; 16];
    let len = prune_full(&input, &mut out);
    assert_eq!(len, 12);
    assert_eq!(&out, b"bcdefghijklm    ");
}

#[test]
fn test_full_keeps_blank_order() {
    let input = *b"a\tb\nc\rd e\0f g   ";
    let mut out = [0u8; 16];
    let len = prune_full(&input, &mut out);
    assert_eq!(&out[..len], b"abcdefg");
    assert_eq!(&out[len..], b"\t\n\r \0    ");
}

#[test]
fn test_control_bytes_are_blank() {
    let input = padded::<16>(&sample("tabs"));
    let mut out = [0u8; 16];
    let len = prune_scalar(&input, &mut out);
    assert_eq!(&out[..len], b"abcdefg");
}

#[test]
fn test_dense_sample_is_unchanged() {
    let input = padded::<32>(&sample("dense"));
    for variant in Variant::ALL {
        if variant.batches() != 1 {
            continue;
        }
        let pruner = portable(variant, Width::W32);
        let mut out = [0u8; 32];
        let len = pruner.prune(&input, &mut out).unwrap();
        assert_eq!(len, 32, "{}", variant);
        assert_eq!(out, input, "{}", variant);
    }
}

#[test]
fn test_empty_sample_prunes_to_nothing() {
    let input = padded::<16>(&sample("empty"));
    let mut out = [0u8; 16];
    assert_eq!(prune_naive(&input, &mut out), 0);
    assert_eq!(prune_semi(&input, &mut out), 0);
    assert_eq!(prune_full(&input, &mut out), 0);
    assert_eq!(out, [b' '; 16]);
}

#[test]
fn test_split_sample_double() {
    let input = sample("split");
    let pruner = portable(Variant::NaiveDouble, Width::W16);
    let mut out = [0u8; 32];
    let len = pruner.prune(&input, &mut out).unwrap();
    assert_eq!(&out[..len], b"12345abcdefgh");
}

#[test]
fn test_double_on_32_lanes_takes_64_bytes() {
    let pruner = portable(Variant::NaiveDouble, Width::W32);
    assert_eq!(pruner.batch_len(), 64);

    let mut input = padded::<64>(b"x y z");
    input[32..37].copy_from_slice(b"  uvw");
    let mut out = [0u8; 64];
    let len = pruner.prune(&input, &mut out).unwrap();
    assert_eq!(&out[..len], b"xyzuvw");
}

#[test]
fn test_scalar_and_naive_agree_on_every_blank_pattern() {
    // all 2^16 blank layouts of one batch
    for pattern in 0u32..1 << 16 {
        let mut input = *b"ABCDEFGHIJKLMNOP";
        for (lane, byte) in input.iter_mut().enumerate() {
            if pattern >> lane & 1 == 1 {
                *byte = b' ';
            }
        }
        let mut want = [0u8; 16];
        let mut got = [0u8; 16];
        let want_len = prune_scalar(&input, &mut want);
        let got_len = prune_naive(&input, &mut got);
        assert_eq!(got_len, want_len, "pattern {:#06x}", pattern);
        assert_eq!(got[..got_len], want[..want_len], "pattern {:#06x}", pattern);
    }
}

#[test]
fn test_compositor_with_any_kernel() {
    let input = [sample("digits").as_slice(), sample("runs").as_slice()].concat();
    let mut out = vec![0u8; 32];
    let len = compact_batches::<16, _>(&input, &mut out, prune_scalar::<16>).unwrap();
    assert_eq!(&out[..len], b"1234512346789");
}

#[test]
fn test_pruner_rejects_unknown_combination() {
    let err = Pruner::new(Variant::Full, Capability::new(Width::W32, Tier::Neon)).unwrap_err();
    assert!(err.is_capability());
    assert!(matches!(
        err,
        PruneError::Unsupported { .. } | PruneError::TierUnavailable { .. }
    ));
}
