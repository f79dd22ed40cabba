//! Interactive console session.
//!
//! # Responsibility
//! - Read one command per line and run validate -> write/query -> render.
//! - Report failures as one-line messages and keep the session alive.
//!
//! # Invariants
//! - Every command completes before the next line is read.
//! - Only I/O errors on the console itself end the session early.

use log::{info, warn};
use repairshop_core::report::chart::period_color;
use repairshop_core::{
    format_currency, render_period_chart, render_report, render_summary_text, AppConfig, Clock,
    Period, RepairRecord, RepairRepository, RepairService, ReportError, ServiceError,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const CHART_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Add,
    List,
    Summary(Period),
    DayEnd,
    Charts,
    Report(Option<Period>),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Self::Empty;
        };

        match head.to_ascii_lowercase().as_str() {
            "add" => Self::Add,
            "list" | "load" => Self::List,
            "dayend" => Self::DayEnd,
            "charts" => Self::Charts,
            "report" => Self::Report(words.next().and_then(|word| word.parse().ok())),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => match other.parse::<Period>() {
                Ok(period) => Self::Summary(period),
                Err(_) => Self::Unknown(head.to_string()),
            },
        }
    }
}

/// One operator session bound to a repair service.
pub struct Session<'svc, R: RepairRepository, C: Clock> {
    service: &'svc RepairService<R, C>,
    shop_name: String,
    report_dir: PathBuf,
}

impl<'svc, R: RepairRepository, C: Clock> Session<'svc, R, C> {
    pub fn new(service: &'svc RepairService<R, C>, config: &AppConfig) -> Self {
        Self {
            service,
            shop_name: config.shop_name.clone(),
            report_dir: config.report_dir.clone(),
        }
    }

    /// Runs commands from `input` until `quit` or end of input.
    pub fn run(&self, mut input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.shop_name)?;
        self.print_help(&mut out)?;
        self.print_repairs(&mut out)?;

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = read_line(&mut input)? else {
                break;
            };

            match Command::parse(&line) {
                Command::Add => self.add(&mut input, &mut out)?,
                Command::List => self.print_repairs(&mut out)?,
                Command::Summary(period) => self.summary(period, &mut out)?,
                Command::DayEnd => self.summary(Period::Daily, &mut out)?,
                Command::Charts => self.charts(&mut out)?,
                Command::Report(Some(period)) => self.report(period, &mut out)?,
                Command::Report(None) => {
                    writeln!(out, "usage: report daily|weekly|monthly")?;
                }
                Command::Help => self.print_help(&mut out)?,
                Command::Quit => break,
                Command::Empty => {}
                Command::Unknown(word) => {
                    writeln!(out, "unknown command `{word}`; type `help` for commands")?;
                }
            }
        }

        info!("event=session_end module=cli status=ok");
        Ok(())
    }

    fn print_help(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Commands:")?;
        writeln!(out, "  add                         record a repair")?;
        writeln!(out, "  list                        show all repairs")?;
        writeln!(out, "  daily | weekly | monthly    show a summary")?;
        writeln!(out, "  dayend                      end-of-day summary")?;
        writeln!(out, "  charts                      cost/income charts for every period")?;
        writeln!(out, "  report <period>             write <period>_report.pdf")?;
        writeln!(out, "  help | quit")
    }

    fn add(&self, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
        let description = prompt(input, out, "Description: ")?;
        let cost = prompt(input, out, "Cost: ")?;
        let income = prompt(input, out, "Income: ")?;

        match self.service.add_repair(&description, &cost, &income) {
            Ok(record) => {
                writeln!(out, "Added repair #{}.", record.id)?;
                self.print_repairs(out)?;
                self.charts(out)
            }
            Err(err) => print_service_error(out, &err),
        }
    }

    fn print_repairs(&self, out: &mut impl Write) -> io::Result<()> {
        match self.service.list_repairs() {
            Ok(repairs) => write_repair_table(out, &repairs),
            Err(err) => print_service_error(out, &err),
        }
    }

    fn summary(&self, period: Period, out: &mut impl Write) -> io::Result<()> {
        match self.service.summarize(period) {
            Ok(groups) => writeln!(out, "{}", render_summary_text(&groups, period)),
            Err(err) => print_service_error(out, &err),
        }
    }

    fn charts(&self, out: &mut impl Write) -> io::Result<()> {
        for period in Period::ALL {
            let groups = match self.service.summarize_by_description(period) {
                Ok(groups) => groups,
                Err(err) => return print_service_error(out, &err),
            };

            let charts = render_period_chart(&groups, period);
            writeln!(out, "[{} chart, {}]", period.label(), period_color(period))?;
            write!(out, "{}", charts.costs.to_text(CHART_WIDTH))?;
            write!(out, "{}", charts.incomes.to_text(CHART_WIDTH))?;

            match charts.write_svg(&self.report_dir, period) {
                Ok(paths) => {
                    for path in paths {
                        writeln!(out, "Chart written to {}", path.display())?;
                    }
                }
                Err(err) => print_report_error(out, &err)?,
            }
        }
        Ok(())
    }

    fn report(&self, period: Period, out: &mut impl Write) -> io::Result<()> {
        let groups = match self.service.summarize(period) {
            Ok(groups) => groups,
            Err(err) => return print_service_error(out, &err),
        };

        match render_report(&groups, period, &self.report_dir) {
            Ok(path) => writeln!(out, "Report written to {}", path.display()),
            Err(err) => print_report_error(out, &err),
        }
    }
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> io::Result<String> {
    write!(out, "{label}")?;
    out.flush()?;
    Ok(read_line(input)?.unwrap_or_default())
}

fn write_repair_table(out: &mut impl Write, repairs: &[RepairRecord]) -> io::Result<()> {
    let description_width = repairs
        .iter()
        .map(|repair| repair.description.chars().count())
        .max()
        .unwrap_or(0)
        .max("Description".len());

    writeln!(
        out,
        "{:>5}  {:<19}  {:<description_width$}  {:>12}  {:>12}  {:>12}",
        "ID", "Date", "Description", "Cost", "Income", "Net Profit"
    )?;
    for repair in repairs {
        writeln!(
            out,
            "{:>5}  {:<19}  {:<description_width$}  {:>12}  {:>12}  {:>12}",
            repair.id,
            repair.date.to_string(),
            repair.description,
            format_currency(repair.cost),
            format_currency(repair.income),
            format_currency(repair.net_profit())
        )?;
    }
    if repairs.is_empty() {
        writeln!(out, "(no repairs recorded)")?;
    }
    Ok(())
}

fn print_service_error(out: &mut impl Write, err: &ServiceError) -> io::Result<()> {
    match err {
        ServiceError::InvalidInput(input) => writeln!(out, "Input Error: {input}"),
        ServiceError::Storage(storage) => {
            warn!("event=command module=cli status=error kind=storage error={storage}");
            writeln!(out, "Storage Error: {storage}")
        }
    }
}

fn print_report_error(out: &mut impl Write, err: &ReportError) -> io::Result<()> {
    warn!("event=command module=cli status=error kind=report error={err}");
    writeln!(out, "Report Error: {err}")
}
