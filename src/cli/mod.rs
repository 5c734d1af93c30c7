//! Thin batch driver: JSON document in, JSON plan out.

use std::io::Read;

use chrono::{Months, NaiveDate, Utc};
use colored::Colorize;

use crate::config::{DateWindow, PlanConfig};
use crate::errors::PlanError;
use crate::input::PlanDocument;
use crate::report::PlanReport;
use crate::timeline::Timeline;

const USAGE: &str = "Usage: spendable_core_cli [PLAN_FILE|-] [START] [END]

Reads a plan document ({\"incomes\": [...], \"expenses\": [...]}) from the given
file (or stdin when omitted or `-`), plans it over [START, END) and prints the
result as JSON. Dates are ISO (YYYY-MM-DD); the horizon defaults to one year
from today.";

pub fn run_cli() -> Result<(), PlanError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    let text = read_document(args.first().map(String::as_str))?;
    let window = parse_window(args.get(1), args.get(2))?;
    let document = PlanDocument::parse(&text)?;
    let recurrences = document.into_recurrences(window.start)?;
    let mut timeline = Timeline::new(PlanConfig::new(window), recurrences)?;

    match timeline.plan() {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            let stats = timeline.stats();
            eprintln!(
                "{} Income {:.2}, expenses {:.2}, net {:.2}/day.",
                "Plan is solvent.".green(),
                stats.income_total,
                stats.expense_total,
                stats.net_avg
            );
        }
        Err(PlanError::Insolvent) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&PlanReport::insolvent_document())?
            );
            eprintln!("{}", "Plan is insolvent; no allowance was computed.".red());
        }
        Err(err) => return Err(err),
    }
    Ok(())
}

fn read_document(path: Option<&str>) -> Result<String, PlanError> {
    match path {
        Some(path) if path != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn parse_window(start: Option<&String>, end: Option<&String>) -> Result<DateWindow, PlanError> {
    let start = match start {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };
    let end = match end {
        Some(raw) => parse_date(raw)?,
        None => start + Months::new(12),
    };
    DateWindow::new(start, end)
}

fn parse_date(raw: &str) -> Result<NaiveDate, PlanError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| PlanError::InvalidInput(format!("bad date `{raw}`: {err}")))
}
