//! # Elec-Mate CLI
//!
//! Terminal front end for the phase rotation calculator. Each subcommand
//! maps to one test method; `interactive` walks through the same form a
//! GUI would show.
//!
//! ```text
//! calc_cli meter l1-l3-l2
//! calc_cli voltage 400 400 408 --detailed
//! calc_cli motor clockwise --json
//! calc_cli schedule unit4.ems
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use calc_core::calculations::{Calculator, PhaseRotationCalculator};
use calc_core::diagram::{phasors, DiagramSettings};
use calc_core::report::{clipboard_summary, detailed_summary, schedule_summary};
use calc_core::session::VoltageField;
use calc_core::{
    load_schedule, procedure, CalcError, DiagnosticResult, DiagnosticSession, PhaseRotationForm, TestMethod,
};

#[derive(Parser)]
#[command(name = "calc_cli")]
#[command(about = "Elec-Mate phase rotation and voltage balance calculator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Include guidance and readings in the text output
    #[arg(long, global = true)]
    detailed: bool,

    /// Print phasor diagram coordinates
    #[arg(long, global = true)]
    diagram: bool,

    /// Debug logging (overridden by ELECMATE_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with diagram settings (center_x, center_y, radius)
    #[arg(long, global = true, env = "ELECMATE_DIAGRAM_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Rotation meter indication: l1-l2-l3 or l1-l3-l2
    Meter { reading: String },
    /// Observed motor rotation: clockwise or anticlockwise
    Motor { direction: String },
    /// Line-to-line voltages in volts (100-1000)
    Voltage {
        l1l2: String,
        l2l3: String,
        l3l1: String,
    },
    /// Print the on-site phase sequence test procedure
    Procedure,
    /// Show the phase rotation column of a saved schedule (.ems)
    Schedule { path: PathBuf },
    /// Prompt for method and readings
    Interactive,
}

/// How results are printed
struct OutputOptions {
    json: bool,
    detailed: bool,
    diagram: Option<DiagramSettings>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ELECMATE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let diagram = if cli.diagram {
        Some(load_diagram_settings(cli.config.as_deref())?)
    } else {
        None
    };
    let output = OutputOptions {
        json: cli.json,
        detailed: cli.detailed,
        diagram,
    };

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Meter { reading } => run_form(
            PhaseRotationForm {
                reading,
                ..PhaseRotationForm::for_method(TestMethod::PhaseRotationMeter)
            },
            &output,
        ),
        Command::Motor { direction } => run_form(
            PhaseRotationForm {
                direction,
                ..PhaseRotationForm::for_method(TestMethod::MotorBehaviour)
            },
            &output,
        ),
        Command::Voltage { l1l2, l2l3, l3l1 } => run_form(
            PhaseRotationForm {
                l1l2,
                l2l3,
                l3l1,
                ..PhaseRotationForm::for_method(TestMethod::VoltageMeasurement)
            },
            &output,
        ),
        Command::Procedure => {
            println!("Three-Phase Sequence Test");
            println!("=========================");
            println!("{}", procedure::render());
            Ok(())
        }
        Command::Schedule { path } => show_schedule(&path, &output),
        Command::Interactive => run_interactive(&output),
    }
}

fn show_schedule(path: &Path, output: &OutputOptions) -> Result<()> {
    let schedule = load_schedule(path).with_context(|| format!("loading schedule {}", path.display()))?;
    if output.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
    } else {
        println!("{}", schedule_summary(&schedule));
        println!("  PENDING: {}", schedule.pending_circuits().len());
    }
    Ok(())
}

fn load_diagram_settings(path: Option<&Path>) -> Result<DiagramSettings> {
    let Some(path) = path else {
        return Ok(DiagramSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading diagram config {}", path.display()))?;
    let settings: DiagramSettings = serde_json::from_str(&text)
        .with_context(|| format!("parsing diagram config {}", path.display()))?;
    debug!(path = %path.display(), ?settings, "diagram settings loaded");
    Ok(settings)
}

fn run_form(form: PhaseRotationForm, output: &OutputOptions) -> Result<()> {
    match PhaseRotationCalculator::run(&form) {
        Ok(result) => print_result(&result, output),
        Err(e) if e.is_input_error() => report_input_error(&e, output),
        Err(e) => Err(e.into()),
    }
}

fn report_input_error(error: &CalcError, output: &OutputOptions) -> Result<()> {
    if output.json {
        eprintln!("{}", serde_json::to_string_pretty(error)?);
    }
    bail!("cannot calculate: {}", error)
}

fn print_result(result: &DiagnosticResult, output: &OutputOptions) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        let text = if output.detailed {
            detailed_summary(result)
        } else {
            clipboard_summary(result)
        };
        println!("═══════════════════════════════════════");
        println!("{}", text);
        println!("═══════════════════════════════════════");
        println!("  RESULT: {}", status_icon(result.is_correct));
    }

    if let Some(settings) = &output.diagram {
        println!();
        println!("Phasor endpoints (centre {:.1}, {:.1}):", settings.center_x, settings.center_y);
        for phasor in phasors(result, settings) {
            println!(
                "  {} {:>5} -> ({:.2}, {:.2})",
                phasor.label, phasor.angle, phasor.end.x, phasor.end.y
            );
        }
    }
    Ok(())
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[CHECK]" }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        bail!("input closed");
    }
    Ok(input.trim().to_string())
}

fn run_interactive(output: &OutputOptions) -> Result<()> {
    println!("Elec-Mate - Phase Rotation Analysis");
    println!("===================================");
    println!();
    for (i, method) in TestMethod::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, method);
    }

    let mut session = DiagnosticSession::new();
    loop {
        let choice = prompt("Select method [1-3, q to quit]: ")?;
        if choice.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        let method = match choice.parse::<usize>().ok().and_then(|n| TestMethod::ALL.get(n.wrapping_sub(1))) {
            Some(m) => *m,
            None => {
                println!("Unknown option '{}'", choice);
                continue;
            }
        };
        session.select_method(method);

        match method {
            TestMethod::PhaseRotationMeter => session.set_reading(prompt("Meter reading [l1-l2-l3 / l1-l3-l2]: ")?),
            TestMethod::MotorBehaviour => session.set_direction(prompt("Motor rotation [clockwise / anticlockwise]: ")?),
            TestMethod::VoltageMeasurement => {
                session.set_voltage(VoltageField::L1L2, prompt("L1-L2 voltage (V): ")?);
                session.set_voltage(VoltageField::L2L3, prompt("L2-L3 voltage (V): ")?);
                session.set_voltage(VoltageField::L3L1, prompt("L3-L1 voltage (V): ")?);
            }
        }

        println!();
        match session.calculate() {
            Ok(result) => print_result(result, output)?,
            Err(e) if e.is_input_error() => println!("Cannot calculate: {}", e),
            Err(e) => return Err(e.into()),
        }
        println!();
    }
}
