//! Interactive mode: asks for the handle, the mode, and the mode's parameter.
//!
//! Invalid answers are explained and asked again. Closing the input aborts.

use std::io::{BufRead, Write};

use igpick_core::{normalize_account, SelectionMode, SelectionRequest, DEFAULT_COUNT};

/// Orientation presets offered before the custom option.
const WINDOW_PRESETS: [(&str, f64); 3] = [
    ("last 30 minutes", 0.5),
    ("last hour", 1.0),
    ("last 2 hours", 2.0),
];

/// Runs the prompt sequence and returns a validated request.
///
/// # Errors
///
/// Returns an error if reading or writing fails, or if input ends before
/// every question is answered.
pub(crate) fn interactive_request<R, W>(input: &mut R, out: &mut W) -> anyhow::Result<SelectionRequest>
where
    R: BufRead,
    W: Write,
{
    let account = ask_until(input, out, "Instagram account: ", |answer| {
        normalize_account(answer).map_err(|e| e.to_string())
    })?;

    writeln!(out, "Selection mode:")?;
    writeln!(out, "  1) general      (random follower from the first N)")?;
    writeln!(out, "  2) orientation  (random new follower from a recent time window)")?;
    let orientation = ask_until(input, out, "Choice [1]: ", |answer| match answer {
        "" | "1" => Ok(false),
        "2" => Ok(true),
        other => Err(format!("'{other}' is not an option, enter 1 or 2")),
    })?;

    let mode = if orientation {
        ask_time_window(input, out)?
    } else {
        let prompt = format!("How many followers to draw from? [{DEFAULT_COUNT}]: ");
        ask_until(input, out, &prompt, |answer| {
            let count = if answer.is_empty() {
                i64::from(DEFAULT_COUNT)
            } else {
                answer
                    .parse::<i64>()
                    .map_err(|_| format!("'{answer}' is not a whole number"))?
            };
            SelectionMode::general(count).map_err(|e| e.to_string())
        })?
    };

    Ok(SelectionRequest::new(&account, mode)?)
}

fn ask_time_window<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> anyhow::Result<SelectionMode> {
    writeln!(out, "Time window:")?;
    for (i, (label, _)) in WINDOW_PRESETS.iter().enumerate() {
        writeln!(out, "  {}) {label}", i + 1)?;
    }
    writeln!(out, "  {}) custom", WINDOW_PRESETS.len() + 1)?;

    let preset = ask_until(input, out, "Choice [2]: ", |answer| {
        let choice = if answer.is_empty() { "2" } else { answer };
        match choice.parse::<usize>() {
            Ok(n) if (1..=WINDOW_PRESETS.len()).contains(&n) => Ok(Some(WINDOW_PRESETS[n - 1].1)),
            Ok(n) if n == WINDOW_PRESETS.len() + 1 => Ok(None),
            _ => Err(format!("'{answer}' is not an option")),
        }
    })?;

    if let Some(hours) = preset {
        return Ok(SelectionMode::orientation(hours)?);
    }
    ask_until(input, out, "Hours (0.5-24): ", |answer| {
        let hours = answer
            .parse::<f64>()
            .map_err(|_| format!("'{answer}' is not a number"))?;
        SelectionMode::orientation(hours).map_err(|e| e.to_string())
    })
}

/// Asks `prompt` until `parse` accepts the trimmed answer.
fn ask_until<R, W, T, F>(input: &mut R, out: &mut W, prompt: &str, parse: F) -> anyhow::Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T, String>,
{
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("input closed before all questions were answered");
        }
        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(message) => writeln!(out, "  {message}")?,
        }
    }
}
