//! Generate EQUATIONS.md from the equation registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-equations            # ACI 318-14 numbering
//! cargo run --bin gen-equations -- nscp    # NSCP 2015 numbering
//! ```
//!
//! The generated file is written to `flexure_core/src/equations/EQUATIONS.md`.

use std::fs;
use std::path::Path;

use flexure_core::equations::generate_equations_markdown;
use flexure_core::settings::DesignCode;

fn main() {
    let code = match std::env::args().nth(1).as_deref() {
        Some("nscp") | Some("NSCP") => DesignCode::Nscp2015,
        _ => DesignCode::Aci318_14,
    };
    println!("Generating EQUATIONS.md ({})...", code.display_name());

    let markdown = generate_equations_markdown(code);

    // Relative to workspace root
    let output_path = Path::new("flexure_core/src/equations/EQUATIONS.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
