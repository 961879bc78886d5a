use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");

    let mut src = String::new();
    src.push_str("pub(crate) const INV_SQRT_TABLE: [u16; 12] = [\n");
    for word in invsqrt_table_gen::generate_table() {
        src.push_str(&format!("    0x{word:04x},\n"));
    }
    src.push_str("];\n");

    fs::write(Path::new(&out_dir).join("inv_sqrt_table.rs"), src)
        .expect("failed to write inv_sqrt_table.rs");

    println!("cargo:rerun-if-changed=build.rs");
}
