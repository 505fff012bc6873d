//! Interactive initial-condition provider
//!
//! Asks on the console whether to use the figure-eight orbit or to enter the
//! three bodies by hand as `x y vx vy mass`. A line that is not five numbers,
//! or whose mass is not positive, falls back to that body's figure-eight
//! values so the core only ever sees well-formed bodies.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::configuration::config::{figure_eight_bodies, BodyConfig};

/// Parse one `x y vx vy mass` line. Extra tokens are ignored
pub fn parse_body_line(line: &str, tag: &str) -> Option<BodyConfig> {
    let mut nums = line.split_whitespace().map(str::parse::<f64>);
    let mut next = || -> Option<f64> { nums.next()?.ok() };

    let (x, y, vx, vy, m) = (next()?, next()?, next()?, next()?, next()?);
    if !m.is_finite() || m <= 0.0 {
        return None;
    }
    Some(BodyConfig::new([x, y], [vx, vy], m, tag))
}

/// Run the console prompt over `input`/`output` and return three bodies
pub fn prompt_initial_conditions<R, W>(input: &mut R, output: &mut W) -> Result<Vec<BodyConfig>>
where
    R: BufRead,
    W: Write,
{
    let defaults = figure_eight_bodies();

    writeln!(output, "\n=== Three-body initial conditions ===")?;
    write!(output, "Press Enter for the figure-eight orbit, or type 'c' to enter your own: ")?;
    output.flush()?;

    let mut choice = String::new();
    input.read_line(&mut choice).context("failed to read choice")?;

    if !choice.trim().eq_ignore_ascii_case("c") {
        writeln!(output, "Using the figure-eight orbit.")?;
        info!("initial conditions: figure-eight");
        return Ok(defaults.to_vec());
    }

    writeln!(output, "\nEnter each body as: x y vx vy mass")?;

    let mut bodies = Vec::with_capacity(defaults.len());
    for (i, fallback) in defaults.iter().enumerate() {
        write!(output, "Body {} ({}): ", i + 1, fallback.tag)?;
        output.flush()?;

        let mut line = String::new();
        input
            .read_line(&mut line)
            .with_context(|| format!("failed to read body {}", i + 1))?;

        match parse_body_line(&line, &fallback.tag) {
            Some(body) => {
                writeln!(
                    output,
                    "  set: position ({}, {}), velocity ({}, {}), mass = {}",
                    body.x[0], body.x[1], body.v[0], body.v[1], body.m
                )?;
                bodies.push(body);
            }
            None => {
                warn!("body {}: could not parse {:?}, using figure-eight values", i + 1, line.trim());
                writeln!(output, "  invalid input, using the default")?;
                bodies.push(fallback.clone());
            }
        }
    }

    writeln!(output, "\nInitial conditions set. Press Space in the window to start over.")?;
    Ok(bodies)
}
