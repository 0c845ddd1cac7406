use std::io::{self, Write};
use std::path::Path;

use makeup_calendar::{
    DaySequence, HeatmapConfig, Simulation, SimulationError, SimulationParams,
    load_sequence_from_csv, logging, render_year_svg, render_year_text, save_sequence_to_csv,
    save_sequence_to_json, simulate, simulate_sequence, summary_dataframe,
};
use polars::prelude::{AnyValue, DataFrame};
use serde::Deserialize;

/// Contents accepted by `config <json_path>`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SessionConfig {
    params: Option<SimulationParams>,
    heatmap: Option<HeatmapConfig>,
}

struct Session {
    params: SimulationParams,
    heatmap: HeatmapConfig,
    /// Classified calendar loaded from CSV; replaces the built one.
    loaded: Option<DaySequence>,
}

impl Session {
    fn simulate(&self) -> Result<Simulation, SimulationError> {
        match &self.loaded {
            Some(sequence) => simulate_sequence(&self.params, sequence.clone()),
            None => simulate(&self.params),
        }
    }

    /// Apply `update` to a copy of the parameters and keep it only if valid.
    fn set_params(&mut self, update: impl FnOnce(&mut SimulationParams)) {
        let mut params = self.params;
        update(&mut params);
        match params.validate() {
            Ok(()) => {
                self.params = params;
                print_params(self);
            }
            Err(e) => println!("Error: {}", e),
        }
    }
}

#[derive(Clone, Copy)]
enum Which {
    Original,
    Rescheduled,
}

fn parse_which(s: &str) -> Option<Which> {
    match s {
        "orig" | "original" => Some(Which::Original),
        "new" | "rescheduled" => Some(Which::Rescheduled),
        _ => None,
    }
}

/// `[orig|new] [year]` in either order.
fn parse_show_args<'a>(
    args: impl Iterator<Item = &'a str>,
) -> Option<(Option<Which>, Option<i32>)> {
    let mut which = None;
    let mut year = None;
    for arg in args {
        if let Some(w) = parse_which(arg) {
            which = Some(w);
        } else {
            year = Some(arg.parse::<i32>().ok()?);
        }
    }
    Some((which, year))
}

fn pick(simulation: &Simulation, which: Which) -> &DaySequence {
    match which {
        Which::Original => &simulation.original,
        Which::Rescheduled => &simulation.rescheduled,
    }
}

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cells: Vec<Vec<String>> = (0..df.height())
        .map(|row_idx| {
            columns
                .iter()
                .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for row in &cells {
        for (ci, s) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(s.len());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let push_row = |out: &mut String, row: &[String]| {
        out.push('|');
        for (ci, s) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(s);
            out.push_str(&" ".repeat(widths[ci].saturating_sub(s.len())));
            out.push_str(" |");
        }
        out.push('\n');
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &col_names);
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        push_row(&mut out, row);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show [orig|new] [year]             Print calendar grids (default: both, every year)\n  params                             Show the simulation parameters\n  vacation <n>                       Push the 2025 vacation back n days (0..=60)\n  reschedule <n>                     Extra reschedule rounds (0..=30)\n  makeup <n|default>                 Make-up days to relocate (0..=60, default = strike days)\n  summary                            Days per category and year, both calendars\n  boundaries                         Semester boundaries and class day counts\n  save <csv|json> <orig|new> <path>  Export a calendar\n  load csv <path>                    Use a classified calendar from CSV as the original\n  unload                             Go back to the built-in calendar\n  heatmap <orig|new> <year> <path>   Write a year's heatmap as SVG\n  config <json_path>                 Load params and/or heatmap settings from JSON\n  quit|exit                          Exit"
    );
}

fn print_params(session: &Session) {
    let params = &session.params;
    let makeup = params
        .makeup_days
        .map(|v| v.to_string())
        .unwrap_or_else(|| "default".to_string());
    println!(
        "vacation_offset={} reschedule_offset={} makeup_days={}{}",
        params.vacation_offset,
        params.reschedule_offset,
        makeup,
        if session.loaded.is_some() { " (loaded calendar)" } else { "" }
    );
}

fn print_summary(simulation: &Simulation) {
    println!(
        "strike_days={} reschedule_count={} steps={} unreachable_lookaheads={} changed_days={}",
        simulation.strike_days(),
        simulation.reschedule_count,
        simulation.report.steps,
        simulation.report.unreachable_lookaheads,
        simulation.changed_days()
    );
    for (label, sequence) in [
        ("Original", &simulation.original),
        ("Rescheduled", &simulation.rescheduled),
    ] {
        match summary_dataframe(sequence) {
            Ok(df) => println!("{}\n{}", label, render_df_as_text_table(&df)),
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn load_config(session: &mut Session, path: &str) -> Result<(), String> {
    let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let config: SessionConfig = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    if let Some(heatmap) = &config.heatmap {
        heatmap.validate().map_err(|e| e.to_string())?;
    }
    if let Some(params) = config.params {
        params.validate().map_err(|e| e.to_string())?;
        session.params = params;
    }
    if let Some(heatmap) = config.heatmap {
        session.heatmap = heatmap;
    }
    Ok(())
}

fn main() {
    logging::init("warn");

    let mut session = Session {
        params: SimulationParams::default(),
        heatmap: HeatmapConfig::default(),
        loaded: None,
    };

    println!("Makeup Calendar (CLI) - type 'help' for commands\n");
    print_params(&session);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "params" => print_params(&session),
            "vacation" | "reschedule" => {
                let value: u32 = match parts.next().map(str::parse::<u32>) {
                    Some(Ok(v)) => v,
                    _ => {
                        println!("Usage: {} <n>", cmd);
                        continue;
                    }
                };
                if cmd == "vacation" {
                    session.set_params(|p| p.vacation_offset = value);
                } else {
                    session.set_params(|p| p.reschedule_offset = value);
                }
            }
            "makeup" => match parts.next() {
                Some("default") => session.set_params(|p| p.makeup_days = None),
                Some(raw) => match raw.parse::<u32>() {
                    Ok(v) => session.set_params(|p| p.makeup_days = Some(v)),
                    Err(_) => println!("Invalid make-up days"),
                },
                None => println!("Usage: makeup <n|default>"),
            },
            "show" => {
                let Some((which, year)) = parse_show_args(parts) else {
                    println!("Usage: show [orig|new] [year]");
                    continue;
                };
                let simulation = match session.simulate() {
                    Ok(s) => s,
                    Err(e) => {
                        println!("Error: {}", e);
                        continue;
                    }
                };
                let targets = match which {
                    Some(w) => vec![w],
                    None => vec![Which::Original, Which::Rescheduled],
                };
                for target in targets {
                    let sequence = pick(&simulation, target);
                    let title = match target {
                        Which::Original => &session.heatmap.original_title,
                        Which::Rescheduled => &session.heatmap.rescheduled_title,
                    };
                    let years = match year {
                        Some(y) if sequence.years().contains(&y) => vec![y],
                        Some(y) => {
                            println!("Year {} is not in the calendar", y);
                            continue;
                        }
                        None => sequence.years(),
                    };
                    println!("{}", title);
                    for y in years {
                        println!("{}", render_year_text(sequence, y, &session.heatmap));
                    }
                }
            }
            "summary" => match session.simulate() {
                Ok(simulation) => print_summary(&simulation),
                Err(e) => println!("Error: {}", e),
            },
            "boundaries" => match session.simulate() {
                Ok(simulation) => {
                    if simulation.build.boundaries.is_empty() {
                        println!("No semester boundaries recorded.");
                    }
                    for boundary in &simulation.build.boundaries {
                        println!(
                            "{} {:?} class_days={}",
                            boundary.date, boundary.kind, boundary.class_days
                        );
                    }
                    println!("strike_days={}", simulation.strike_days());
                }
                Err(e) => println!("Error: {}", e),
            },
            "save" => {
                let format = parts.next();
                let which = parts.next().and_then(parse_which);
                let path = parts.next();
                match (format, which, path) {
                    (Some(format @ ("csv" | "json")), Some(which), Some(path)) => {
                        let simulation = match session.simulate() {
                            Ok(s) => s,
                            Err(e) => {
                                println!("Error: {}", e);
                                continue;
                            }
                        };
                        let sequence = pick(&simulation, which);
                        let res = if format == "csv" {
                            save_sequence_to_csv(sequence, path)
                        } else {
                            save_sequence_to_json(sequence, path)
                        };
                        match res {
                            Ok(()) => println!("Saved {} days to {}", sequence.len(), path),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: save <csv|json> <orig|new> <path>"),
                }
            }
            "load" => match (parts.next(), parts.next()) {
                (Some("csv"), Some(path)) => match load_sequence_from_csv(path) {
                    Ok(sequence) => {
                        println!(
                            "Loaded {} days starting {} from {}",
                            sequence.len(),
                            sequence.start(),
                            path
                        );
                        session.loaded = Some(sequence);
                    }
                    Err(e) => println!("Error: {}", e),
                },
                _ => println!("Usage: load csv <path>"),
            },
            "unload" => {
                session.loaded = None;
                println!("Using the built-in calendar.");
            }
            "heatmap" => {
                let which = parts.next().and_then(parse_which);
                let year = parts.next().and_then(|s| s.parse::<i32>().ok());
                let path = parts.next();
                match (which, year, path) {
                    (Some(which), Some(year), Some(path)) => {
                        let simulation = match session.simulate() {
                            Ok(s) => s,
                            Err(e) => {
                                println!("Error: {}", e);
                                continue;
                            }
                        };
                        let sequence = pick(&simulation, which);
                        if !sequence.years().contains(&year) {
                            println!("Year {} is not in the calendar", year);
                            continue;
                        }
                        let title = match which {
                            Which::Original => &session.heatmap.original_title,
                            Which::Rescheduled => &session.heatmap.rescheduled_title,
                        };
                        let svg = render_year_svg(sequence, year, title, &session.heatmap);
                        match std::fs::write(Path::new(path), svg) {
                            Ok(()) => println!("Wrote {}", path),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: heatmap <orig|new> <year> <svg_path>"),
                }
            }
            "config" => match parts.next() {
                Some(path) => match load_config(&mut session, path) {
                    Ok(()) => {
                        println!("Configuration loaded from {}", path);
                        print_params(&session);
                    }
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: config <json_path>"),
            },
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
