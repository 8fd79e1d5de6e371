use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use greendc_core::config::Config;
use greendc_core::report::AuditReport;
use greendc_core::types::FacilityState;
use greendc_core::{run_audit, AuditOptions};

#[derive(Parser, Debug)]
#[command(
    name = "greendc",
    version,
    about = "Data-center energy and carbon audit"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute KPIs, recommendations, and projected savings for a facility
    Audit {
        #[arg(long)]
        it_energy_mwh: Option<f64>,

        #[arg(long)]
        total_energy_mwh: Option<f64>,

        #[arg(long)]
        carbon_factor: Option<f64>,

        #[arg(long)]
        cpu: Option<f64>,

        #[arg(long)]
        cooling_setpoint: Option<f64>,

        #[arg(long)]
        aisle_containment: Option<bool>,

        #[arg(long)]
        virtualization: Option<f64>,

        /// Directory of .txt/.md notes; extracted metrics override flags
        #[arg(long)]
        notes: Option<PathBuf>,

        /// Fail (exit 2) when the computed PUE exceeds this target
        #[arg(long)]
        target_pue: Option<f64>,

        #[arg(long, default_value = "greendc-out")]
        out: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
    },
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Md,
    All,
}

struct Style {
    bold: &'static str,
    dim: &'static str,
    red: &'static str,
    green: &'static str,
    yellow: &'static str,
    reset: &'static str,
}

const COLOR: Style = Style {
    bold: "\x1b[1m",
    dim: "\x1b[2m",
    red: "\x1b[31m",
    green: "\x1b[32m",
    yellow: "\x1b[33m",
    reset: "\x1b[0m",
};

const PLAIN: Style = Style {
    bold: "",
    dim: "",
    red: "",
    green: "",
    yellow: "",
    reset: "",
};

fn style() -> &'static Style {
    if std::env::var_os("NO_COLOR").is_some() {
        &PLAIN
    } else {
        &COLOR
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let res = match cli.cmd {
        Commands::Audit {
            it_energy_mwh,
            total_energy_mwh,
            carbon_factor,
            cpu,
            cooling_setpoint,
            aisle_containment,
            virtualization,
            notes,
            target_pue,
            out,
            config,
            output_format,
        } => {
            let cfg = load_config(config.as_deref());

            let mut state = FacilityState::default();
            cfg.apply_to(&mut state);
            if let Some(v) = it_energy_mwh {
                state.it_energy_mwh = v;
            }
            if let Some(v) = total_energy_mwh {
                state.total_energy_mwh = v;
            }
            if let Some(v) = carbon_factor {
                state.carbon_factor_kg_per_kwh = v;
            }
            if let Some(v) = cpu {
                state.cpu_utilization_pct = v;
            }
            if let Some(v) = cooling_setpoint {
                state.cooling_setpoint_c = v;
            }
            if let Some(v) = aisle_containment {
                state.has_aisle_containment = v;
            }
            if let Some(v) = virtualization {
                state.virtualization_level_pct = v;
            }

            let opts = AuditOptions {
                notes_dir: notes.or(cfg.notes_dir),
                target_pue: target_pue.or(cfg.target_pue),
                ..AuditOptions::default()
            };

            run_audit_cmd(&state, opts, &out, &output_format)
        }
    };

    match res {
        Ok(code) => code,
        Err(e) => {
            let s = style();
            eprintln!(
                "{}{red}error:{reset} {:#}",
                s.bold,
                e,
                red = s.red,
                reset = s.reset
            );
            std::process::ExitCode::from(1)
        }
    }
}

fn print_banner() {
    let s = style();
    eprintln!(
        "\n  {bold}green{reset}{green}|{reset}{dim}dc{reset}  {dim}energy & carbon audit{reset}\n",
        bold = s.bold,
        green = s.green,
        dim = s.dim,
        reset = s.reset,
    );
}

fn pue_color(pue: f64) -> &'static str {
    let s = style();
    if pue <= 0.0 {
        return s.red;
    }
    if pue < 1.4 {
        s.green
    } else if pue < 1.8 {
        s.yellow
    } else {
        s.red
    }
}

fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(p) => Config::load(p).unwrap_or_else(|e| {
            eprintln!(
                "{}{}warning:{} failed to load config {}: {}",
                style().bold,
                style().yellow,
                style().reset,
                p.display(),
                e
            );
            Config::default()
        }),
        None => Config::discover().unwrap_or_default(),
    }
}

fn print_report(report: &AuditReport, out: &Path) {
    let s = style();
    let pc = pue_color(report.kpis.pue);

    eprintln!(
        "  {dim}pue                {reset}{pc}{bold}{:.2}{reset}",
        report.kpis.pue,
        dim = s.dim,
        pc = pc,
        bold = s.bold,
        reset = s.reset
    );
    eprintln!(
        "  {dim}dcie               {reset}{bold}{:.1}%{reset}",
        report.kpis.dcie,
        dim = s.dim,
        bold = s.bold,
        reset = s.reset
    );
    eprintln!(
        "  {dim}co2                {reset}{bold}{:.1} t/y{reset}",
        report.kpis.co2_tonnes,
        dim = s.dim,
        bold = s.bold,
        reset = s.reset
    );
    eprintln!(
        "  {dim}projected savings  {reset}{bold}{:.1} MWh ({:.1}%){reset}",
        report.simulation.total_savings_mwh,
        report.simulation.total_savings_pct,
        dim = s.dim,
        bold = s.bold,
        reset = s.reset
    );

    eprintln!();
    for r in &report.recommendations {
        eprintln!(
            "  {yellow}~{:.1}%{reset}  {}",
            r.estimated_saving_pct,
            r.title,
            yellow = s.yellow,
            reset = s.reset
        );
    }

    eprintln!();
    eprintln!(
        "  {dim}\u{2192} {}{reset}",
        out.join("report.json").display(),
        dim = s.dim,
        reset = s.reset
    );
    eprintln!(
        "  {dim}\u{2192} {}{reset}",
        out.join("report.md").display(),
        dim = s.dim,
        reset = s.reset
    );
    eprintln!();
}

fn run_audit_cmd(
    state: &FacilityState,
    opts: AuditOptions,
    out: &Path,
    output_format: &OutputFormat,
) -> anyhow::Result<std::process::ExitCode> {
    let s = style();

    print_banner();

    let report = run_audit(state, opts)?;

    std::fs::create_dir_all(out).with_context(|| format!("create out dir {}", out.display()))?;

    let write_json = matches!(output_format, OutputFormat::Json | OutputFormat::All);
    let write_md = matches!(output_format, OutputFormat::Md | OutputFormat::All);

    if write_json {
        let json_path = out.join("report.json");
        let json = serde_json::to_vec_pretty(&report).context("serialize report json")?;
        std::fs::write(&json_path, json)
            .with_context(|| format!("write {}", json_path.display()))?;
    }

    if write_md {
        let md_path = out.join("report.md");
        let md = report.to_markdown();
        std::fs::write(&md_path, md).with_context(|| format!("write {}", md_path.display()))?;
    }

    // Machine-parseable line on stdout
    println!(
        "pue={:.3} dcie={:.1} co2_tonnes={:.1} savings_pct={:.1}",
        report.kpis.pue,
        report.kpis.dcie,
        report.kpis.co2_tonnes,
        report.simulation.total_savings_pct
    );

    // Human-readable output on stderr
    print_report(&report, out);

    let exit = match &report.gate {
        Some(g) if !g.pass => {
            eprintln!(
                "  {red}{bold}PUE GATE FAILED{reset}  {dim}({}){reset}",
                g.reason,
                red = s.red,
                bold = s.bold,
                dim = s.dim,
                reset = s.reset,
            );
            std::process::ExitCode::from(2)
        }
        _ => {
            eprintln!(
                "  {green}{bold}PASS{reset}",
                green = s.green,
                bold = s.bold,
                reset = s.reset
            );
            std::process::ExitCode::from(0)
        }
    };

    eprintln!();

    Ok(exit)
}
