use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

#[allow(dead_code)]
#[path = "src/prune/layout.rs"]
mod layout;

/// Widths whose sorting networks are baked into the library.
const BAKED_WIDTHS: &[usize] = &[16, 32];

fn main() {
    println!("cargo:rerun-if-changed=src/prune/layout.rs");
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let dest_path = Path::new(&out_dir).join("networks.rs");
    let mut output = fs::File::create(&dest_path).expect("Failed to create networks.rs");

    writeln!(output, "// Auto-generated sorting-network tables from build.rs").unwrap();
    writeln!(output).unwrap();

    for &width in BAKED_WIDTHS {
        let layout = layout::bitonic(width)
            .unwrap_or_else(|e| panic!("Failed to lay out {}-lane network: {}", width, e));
        let name = format!("BITONIC_{}", width);
        write!(output, "{}", layout::render(&name, &layout)).unwrap();
        writeln!(output).unwrap();
    }
}
