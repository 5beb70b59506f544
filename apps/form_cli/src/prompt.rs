//! Line-oriented form filling over any reader/writer pair.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use form_core::{FieldView, FormController, Widget};
use shared::{
    domain::FieldValue,
    protocol::{FieldValues, SubmitOutcome},
};

/// Prompts for every field until the form submits, or returns `None` when the
/// input ends first.
pub fn fill_form<R, W>(
    form: &mut FormController,
    input: &mut R,
    output: &mut W,
) -> Result<Option<FieldValues>>
where
    R: BufRead,
    W: Write,
{
    loop {
        for view in form.view() {
            if form.snapshot().error(view.name.as_str()) == Some("") {
                continue;
            }
            if !prompt_field(form, &view, input, output)? {
                return Ok(None);
            }
        }

        let mut accepted = None;
        let outcome = form.on_submit(&mut |values: &FieldValues| accepted = Some(values.clone()));
        match outcome {
            SubmitOutcome::Accepted => return Ok(accepted),
            SubmitOutcome::Rejected { invalid } => {
                writeln!(output, "{} field(s) still need attention", invalid.len())?;
            }
        }
    }
}

/// Reads values for one field until it validates. `false` means end of input.
fn prompt_field<R, W>(
    form: &mut FormController,
    view: &FieldView,
    input: &mut R,
    output: &mut W,
) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    let name = view.name.as_str();
    loop {
        write_prompt(view, output)?;
        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read input")? == 0 {
            return Ok(false);
        }
        let value = parse_answer(&view.widget, line.trim_end_matches(&['\r', '\n'][..]));

        form.on_change(name, value.clone())?;
        form.on_blur(name, value)?;
        match form.snapshot().error(name) {
            Some(message) if !message.is_empty() => writeln!(output, "  ! {message}")?,
            _ => return Ok(true),
        }
    }
}

fn write_prompt<W: Write>(view: &FieldView, output: &mut W) -> Result<()> {
    let marker = if view.required { " *" } else { "" };
    match &view.widget {
        Widget::Select { options, .. } => {
            writeln!(output, "{}{marker}", view.label)?;
            for (index, option) in options.iter().enumerate() {
                writeln!(output, "  {}) {}", index + 1, option.label)?;
            }
            write!(output, "> ")?;
        }
        Widget::Checkbox => write!(output, "{}{marker} [y/N]: ", view.label)?,
        _ => {
            if let Some(hint) = view.format_hint.as_ref().or(view.hint.as_ref()) {
                writeln!(output, "  ({hint})")?;
            }
            write!(output, "{}{marker}: ", view.label)?;
        }
    }
    output.flush()?;
    Ok(())
}

/// Maps a typed answer to the value the widget would produce.
pub fn parse_answer(widget: &Widget, answer: &str) -> FieldValue {
    match widget {
        Widget::Checkbox => FieldValue::Bool(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "true" | "1" | "x"
        )),
        Widget::Select { options, .. } => {
            let answer = answer.trim();
            let by_index = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| options.get(i));
            let chosen = by_index.or_else(|| {
                options.iter().find(|option| {
                    option.value == answer || option.label.eq_ignore_ascii_case(answer)
                })
            });
            match chosen {
                Some(option) => FieldValue::text(option.value.clone()),
                None => FieldValue::text(""),
            }
        }
        Widget::Input { .. } | Widget::Textarea { .. } => FieldValue::text(answer),
    }
}

#[cfg(test)]
#[path = "tests/prompt_tests.rs"]
mod tests;
