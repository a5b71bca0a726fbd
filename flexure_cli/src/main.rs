//! # Flexure CLI
//!
//! Interactive terminal front end for `flexure_core`. Prompts for a mode and
//! the section data, then prints the worked solution, the final answer and
//! the JSON result.
//!
//! ```bash
//! flexure_cli                    # default settings (ACI 318-14)
//! flexure_cli settings.json      # code edition, load factors, precision
//! RUST_LOG=debug flexure_cli     # engine trace on stderr
//! ```

use std::io::{self, BufRead, Write};
use std::process;

use flexure_core::loads::MomentDemand;
use flexure_core::{AnalysisInput, CalcError, CalculationItem, DesignInput, GlobalSettings};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_line() -> Option<String> {
    if io::stdout().flush().is_err() {
        return None;
    }
    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{} [{}]: ", prompt, default);
    read_line()
        .and_then(|input| input.trim().parse().ok())
        .unwrap_or(default)
}

fn prompt_choice(prompt: &str, default: u32) -> u32 {
    print!("{} [{}]: ", prompt, default);
    read_line()
        .and_then(|input| input.trim().parse().ok())
        .unwrap_or(default)
}

fn load_settings() -> Result<GlobalSettings, String> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(GlobalSettings::default());
    };
    let json = std::fs::read_to_string(&path).map_err(|e| format!("Cannot read {}: {}", path, e))?;
    let settings = GlobalSettings::from_json(&json).map_err(|e| format!("{}: {}", path, e))?;
    info!(path = %path, code = settings.code.display_name(), "loaded settings");
    Ok(settings)
}

fn prompt_analysis() -> AnalysisInput {
    AnalysisInput {
        label: "CLI-Analysis".to_string(),
        fc_mpa: prompt_f64("Concrete strength f'c (MPa)", 21.0),
        fy_mpa: prompt_f64("Steel yield strength fy (MPa)", 420.0),
        as_mm2: prompt_f64("Tension steel As (mm²)", 1200.0),
        b_mm: prompt_f64("Width b (mm)", 300.0),
        as_prime_mm2: prompt_f64("Compression steel As' (mm², 0 for none)", 400.0),
        d_mm: prompt_f64("Effective depth d (mm)", 550.0),
        d_prime_mm: prompt_f64("Compression steel depth d' (mm)", 50.0),
    }
}

fn prompt_design() -> DesignInput {
    let fc_mpa = prompt_f64("Concrete strength f'c (MPa)", 21.0);
    let fy_mpa = prompt_f64("Steel yield strength fy (MPa)", 420.0);
    let dead_knm = prompt_f64("Dead load moment MD (kN·m)", 50.0);
    let live_knm = prompt_f64("Live load moment ML (kN·m)", 30.0);
    let mu_knm = prompt_f64("Ultimate moment Mu (kN·m, 0 to factor MD and ML)", 120.0);
    let demand = if mu_knm > 0.0 {
        MomentDemand::Factored { mu_knm }
    } else {
        MomentDemand::Service { dead_knm, live_knm }
    };

    DesignInput {
        label: "CLI-Design".to_string(),
        fc_mpa,
        fy_mpa,
        demand,
        b_mm: prompt_f64("Width b (mm)", 300.0),
        d_mm: prompt_f64("Effective depth d (mm)", 550.0),
        d_prime_mm: prompt_f64("Compression steel depth d' (mm)", 50.0),
    }
}

fn print_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn main() {
    init_logging("warn");

    println!("Flexure CLI - Reinforced Concrete Beam Flexure");
    println!("==============================================");
    println!();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(message) => {
            eprintln!("Error: {}", message);
            process::exit(2);
        }
    };
    println!("Code: {}", settings.code.display_name());
    println!();

    println!("  1) Analysis - capacity of a beam with known steel");
    println!("  2) Design   - steel required for a moment");
    let item = match prompt_choice("Select mode", 1) {
        2 => CalculationItem::Design(prompt_design()),
        _ => CalculationItem::Analysis(prompt_analysis()),
    };
    debug!(mode = item.calc_type(), label = item.label(), "running calculation");

    println!();
    match item.calculate(&settings) {
        Ok(output) => {
            println!("═══════════════════════════════════════");
            println!("  {} SOLUTION", item.calc_type().to_uppercase());
            println!("═══════════════════════════════════════");
            for (i, step) in output.steps().iter().enumerate() {
                match &step.reference {
                    Some(reference) => println!("{:>3}. {}  ({})", i + 1, step.text, reference),
                    None => println!("{:>3}. {}", i + 1, step.text),
                }
            }
            println!("═══════════════════════════════════════");
            println!("  {}", output.final_answer());
            println!("═══════════════════════════════════════");

            println!();
            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                println!("{}", json);
            }
        }
        Err(e) => {
            print_error(&e);
            process::exit(1);
        }
    }
}
