use clap::{Parser, Subcommand};
use colored::*;
use std::process::{Command as ProcessCommand, ExitCode, Output};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Format, lint and test the workspace
    Tidy,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match args.command {
        Command::Tidy => tidy(),
    }
}

fn cargo(args: &[&str]) -> Result<Output, String> {
    ProcessCommand::new("cargo")
        .args(args)
        .output()
        .map_err(|e| format!("Failed to run cargo {}: {e}", args[0]))
}

fn tidy() -> ExitCode {
    match run_tidy() {
        Ok(()) => report("✓ Success!", true),
        Err(message) => report(&message, false),
    }
}

fn run_tidy() -> Result<(), String> {
    println!("{}", "Formatting...".dimmed());
    if !cargo(&["fmt", "--all"])?.status.success() {
        return Err("× Formatting failed".to_string());
    }

    println!("{}", "Linting...".dimmed());
    let clippy = cargo(&["clippy", "--workspace", "--all-targets", "--message-format=json"])?;
    let warnings = count_warnings(&String::from_utf8_lossy(&clippy.stdout));
    if !clippy.status.success() || warnings > 0 {
        return Err(format!("× Found {warnings} issues"));
    }

    println!("{}", "Testing...".dimmed());
    let test = cargo(&["test", "--workspace"])?;
    if !test.status.success() {
        let stdout = String::from_utf8_lossy(&test.stdout);
        print!("{stdout}");
        return Err(format!("× {} tests failed", count_failed(&stdout)));
    }

    Ok(())
}

fn count_warnings(json: &str) -> usize {
    json.lines()
        .filter(|line| line.contains("\"level\":\"warning\""))
        .count()
}

/// Sums the failure counts of every "test result: FAILED" summary line
fn count_failed(output: &str) -> usize {
    output
        .lines()
        .filter(|line| line.starts_with("test result: FAILED."))
        .filter_map(|line| {
            line.split(';')
                .map(str::trim)
                .find(|part| part.ends_with(" failed"))
                .and_then(|part| part.split_whitespace().next())
                .and_then(|count| count.parse::<usize>().ok())
        })
        .sum()
}

fn report(message: &str, success: bool) -> ExitCode {
    let width = message.chars().count() + 4;
    let border = "─".repeat(width);
    let lines = format!("┌{border}┐\n│  {message}  │\n└{border}┘");

    println!("\n{}", "=".repeat(50).cyan());
    if success {
        println!("\n{}\n", lines.bold().green());
        ExitCode::SUCCESS
    } else {
        println!("\n{}\n", lines.bold().red());
        ExitCode::FAILURE
    }
}
