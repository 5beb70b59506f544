use std::{
    fs,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use field_config::{load_definitions, FieldSet};
use form_core::{validate, FormController, FormOptions};
use serde::Serialize;
use shared::{
    domain::FieldValue,
    protocol::{FieldValues, FormEvent, FormSnapshot, SubmitOutcome},
};
use tracing::info;

mod config;
mod prompt;

use config::{load_settings, parse_revalidate};

#[derive(Parser, Debug)]
#[command(name = "form_cli", about = "Validate and drive declarative forms")]
struct Cli {
    /// Field definition file (.toml or .json). Falls back to form.toml / FORM_DEFINITIONS.
    #[arg(long, global = true)]
    definitions: Option<PathBuf>,
    /// Change re-validation mode: after-error or always.
    #[arg(long, global = true)]
    revalidate: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the definitions and list the fields.
    Check,
    /// Validate one value against one field.
    Validate {
        #[arg(long)]
        field: String,
        #[arg(long, conflicts_with = "checked")]
        value: Option<String>,
        /// Validate a checked checkbox.
        #[arg(long)]
        checked: bool,
    },
    /// Apply a JSON array of form events and print each snapshot.
    Replay { events: PathBuf },
    /// Fill the form interactively on stdin.
    Fill,
}

#[derive(Serialize)]
struct ReplayStep<'a> {
    step: usize,
    event: &'a FormEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a SubmitOutcome>,
    snapshot: &'a FormSnapshot,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(path) = cli.definitions.clone() {
        settings.definitions_path = Some(path);
    }
    if let Some(raw) = cli.revalidate.as_deref() {
        settings.revalidate_on_change =
            parse_revalidate(raw).ok_or_else(|| anyhow!("unknown revalidate mode '{raw}'"))?;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(io::stderr)
        .init();

    let Some(path) = settings.definitions_path.as_deref() else {
        bail!("no field definitions given; pass --definitions or set FORM_DEFINITIONS");
    };
    let fields = load_definitions(path)
        .with_context(|| format!("failed to load field definitions from '{}'", path.display()))?;
    let options = FormOptions {
        revalidate_on_change: settings.revalidate_on_change,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match cli.command {
        Command::Check => print_fields(&fields, &mut out)?,
        Command::Validate {
            field,
            value,
            checked,
        } => {
            let definition = fields
                .get(&field)
                .ok_or_else(|| anyhow!("no field named '{field}' in definitions"))?;
            let value = match (value, checked) {
                (Some(text), _) => FieldValue::Text(text),
                (None, true) => FieldValue::Bool(true),
                (None, false) => FieldValue::default_for(&definition.kind),
            };
            let message = validate(definition, &value);
            if message.is_empty() {
                writeln!(out, "valid")?;
            } else {
                writeln!(out, "{message}")?;
            }
        }
        Command::Replay { events } => {
            let raw = fs::read_to_string(&events)
                .with_context(|| format!("failed to read events from '{}'", events.display()))?;
            let events: Vec<FormEvent> =
                serde_json::from_str(&raw).context("failed to parse form events")?;
            replay(FormController::with_options(fields, options), &events, &mut out)?;
        }
        Command::Fill => {
            let mut form = FormController::with_options(fields, options);
            let stdin = io::stdin();
            match prompt::fill_form(&mut form, &mut stdin.lock(), &mut out)? {
                Some(values) => {
                    writeln!(out, "Form submitted successfully!")?;
                    writeln!(out, "{}", serde_json::to_string_pretty(&values)?)?;
                }
                None => writeln!(out, "input ended before the form was submitted")?,
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn print_fields<W: Write>(fields: &FieldSet, out: &mut W) -> Result<()> {
    writeln!(out, "{} field(s)", fields.len())?;
    for field in fields {
        let mut constraints = Vec::new();
        if field.required {
            constraints.push("required".to_string());
        }
        if let Some(k) = field.min_length {
            constraints.push(format!("min_length={k}"));
        }
        if let Some(k) = field.max_length {
            constraints.push(format!("max_length={k}"));
        }
        if let Some(min) = field.min {
            constraints.push(format!("min={min}"));
        }
        if let Some(max) = field.max {
            constraints.push(format!("max={max}"));
        }
        if let Some(pattern) = &field.pattern {
            constraints.push(format!("pattern={}", pattern.as_str()));
        }
        writeln!(
            out,
            "  {} ({}) \"{}\" {}",
            field.name,
            field.kind,
            field.label,
            constraints.join(", ")
        )?;
    }
    Ok(())
}

fn replay<W: Write>(mut form: FormController, events: &[FormEvent], out: &mut W) -> Result<()> {
    for (step, event) in events.iter().enumerate() {
        let mut accepted: Option<FieldValues> = None;
        let outcome = form
            .apply(event.clone(), &mut |values: &FieldValues| {
                accepted = Some(values.clone())
            })
            .with_context(|| format!("event {step} could not be applied"))?;

        let line = ReplayStep {
            step,
            event,
            outcome: outcome.as_ref(),
            snapshot: form.snapshot(),
        };
        writeln!(out, "{}", serde_json::to_string(&line)?)?;

        if let Some(values) = accepted {
            info!(step, "replay: submission accepted");
            writeln!(out, "submitted: {}", serde_json::to_string(&values)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
