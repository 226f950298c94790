//! # Voltify CLI
//!
//! Terminal interface for the electrical calculation engine: prompts for a
//! load, runs the full calculation chain and prints the sizing results
//! with the compliance report.

use std::io::{self, BufRead, Write};

use volt_core::calculations::ElectricalCalculationEngine;
use volt_core::factors::{DutyCycle, InstallationMethod, LoadType, Phases};
use volt_core::model::Load;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_string(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn main() {
    println!("Voltify CLI - Electrical Load Calculator");
    println!("========================================");
    println!();

    let standard_name = prompt_string("Wiring standard (IEC/IS/NEC) [IEC]: ", "IEC");
    let engine = match ElectricalCalculationEngine::new(&standard_name) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let power_kw = prompt_f64("Load power (kW) [75.0]: ", 75.0);
    let voltage = prompt_f64("System voltage (V) [415.0]: ", 415.0);
    let phases = if prompt_f64("Phases (1/3) [3]: ", 3.0) as u8 == 1 {
        Phases::Single
    } else {
        Phases::Three
    };
    let length_m = prompt_f64("Cable length (m) [50.0]: ", 50.0);
    let load_type = LoadType::from_name(&prompt_string(
        "Load type (motor/heater/lighting/hvac/general) [motor]: ",
        "motor",
    ))
    .unwrap_or(LoadType::Motor);

    let mut load = Load::new("CLI demo load", power_kw, voltage, phases)
        .with_load_type(load_type)
        .with_duty_cycle(DutyCycle::Continuous)
        .with_cable_run(length_m, InstallationMethod::Tray);

    println!();
    println!(
        "Calculating {} kW {} {} load under {}...",
        power_kw,
        phases,
        load_type,
        engine.standard().name()
    );
    println!();

    if let Err(e) = engine.calculate_load(&mut load) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    println!("Results");
    println!("-------");
    println!("Load current:     {:>10.2} A", load.current_a.unwrap_or(0.0));
    println!(
        "Design current:   {:>10.2} A",
        load.design_current_a.unwrap_or(0.0)
    );
    println!(
        "Apparent power:   {:>10.2} kVA",
        load.apparent_power_kva.unwrap_or(0.0)
    );
    if let (Some(size), Some(cores), Some(cable_type)) = (
        load.cable_size_sqmm,
        load.cable_cores,
        load.cable_type.as_deref(),
    ) {
        println!("Cable:            {:>6}C x {} mm² {}", cores, size, cable_type);
        println!(
            "Voltage drop:     {:>10.2} V ({:.2}%)",
            load.voltage_drop_v.unwrap_or(0.0),
            load.voltage_drop_percent.unwrap_or(0.0)
        );
    }
    if let (Some(rating), Some(breaker_type), Some(curve)) =
        (load.breaker_rating_a, load.breaker_type, load.breaker_curve)
    {
        println!(
            "Breaker:          {:>10.0} A {} (curve {})",
            rating, breaker_type, curve
        );
    }

    println!();
    let report = engine.validate_calculations(&load);
    if report.valid {
        println!("Compliance: OK");
    } else {
        println!("Compliance issues:");
        for issue in &report.issues {
            println!("  - {}", issue);
        }
    }
}
