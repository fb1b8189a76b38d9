// Interactive console flow on top of `TripSession`.
// Input comes from a `LineSource` so the whole conversation can be scripted in tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};

use crate::accommodation::AccommodationQuote;
use crate::display::{
    format_amount, AccommodationTable, DetailsView, MatchList, ProfileView, SummaryView,
    TierTable, TransportTable,
};
use crate::party::Party;
use crate::planner::Planner;
use crate::profile::{
    check_cancel, parse_adults, parse_children, parse_email, parse_name, parse_nights,
    parse_phone, parse_purpose, CustomerProfile, InputRejection,
};
use crate::session::{Restart, TripSession, TripSummary};

pub const BANNER: &str = "====== SMART WANDERPLAN - COMPREHENSIVE TRAVEL PLANNER ======";
pub const FAREWELL: &str = "Thank you for using Smart WanderPlan!";

#[async_trait]
pub trait LineSource: Send {
    // Next line without its newline, or None once input is exhausted
    async fn next_line(&mut self) -> Option<String>;
}

pub struct StdinLines {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinLines {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinLines {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineSource for StdinLines {
    async fn next_line(&mut self) -> Option<String> {
        match self.lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to read from stdin");
                None
            }
        }
    }
}

// Replays a fixed list of answers
#[derive(Debug, Default, Clone)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[async_trait]
impl LineSource for ScriptedLines {
    async fn next_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}

// Why the current trip stopped short of a summary
#[derive(Error, Debug)]
enum Interrupt {
    #[error("{0}")]
    Restart(String),

    #[error("End of input")]
    EndOfInput,

    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Restart> for Interrupt {
    fn from(reason: Restart) -> Self {
        Interrupt::Restart(reason.to_string())
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

pub struct ConsoleSession<'p, S, W> {
    planner: &'p Planner,
    input: S,
    out: W,
    restart_keyword: String,
}

impl<'p, S, W> ConsoleSession<'p, S, W>
where
    S: LineSource,
    W: Write + Send,
{
    pub fn new(planner: &'p Planner, input: S, out: W, restart_keyword: &str) -> Self {
        Self {
            planner,
            input,
            out,
            restart_keyword: restart_keyword.to_string(),
        }
    }

    // Plan trips until the customer stops or input runs out.
    // Returns how many trip summaries were produced.
    pub async fn run(&mut self) -> anyhow::Result<usize> {
        writeln!(self.out, "{}", BANNER)?;
        let mut completed = 0;

        loop {
            match self.plan_trip().await {
                Ok(summary) => {
                    completed += 1;
                    info!(reference = %summary.reference, destination = %summary.destination, "Trip summarised");

                    write!(self.out, "\nBook another trip? (y/n): ")?;
                    self.out.flush()?;
                    match self.input.next_line().await {
                        Some(answer) if is_yes(&answer) => continue,
                        _ => break,
                    }
                }
                Err(Interrupt::Restart(reason)) => {
                    writeln!(self.out, "\n{}. Restarting...", reason)?;
                }
                Err(Interrupt::EndOfInput) => break,
                Err(Interrupt::Io(e)) => return Err(e.into()),
            }
        }

        writeln!(self.out, "\n{}", FAREWELL)?;
        self.out.flush()?;
        Ok(completed)
    }

    async fn ask(&mut self, prompt: &str) -> Result<String, Interrupt> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        let line = self.input.next_line().await.ok_or(Interrupt::EndOfInput)?;
        match check_cancel(&line, &self.restart_keyword) {
            Ok(answer) => Ok(answer.trim().to_string()),
            Err(rejection) => Err(Interrupt::Restart(rejection.to_string())),
        }
    }

    // Re-prompt until the answer parses; the restart keyword still escapes
    async fn ask_until<T>(
        &mut self,
        prompt: &str,
        parse: fn(&str) -> Result<T, InputRejection>,
    ) -> Result<T, Interrupt> {
        loop {
            let answer = self.ask(prompt).await?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(rejection) => writeln!(self.out, "{}. Please try again.", rejection)?,
            }
        }
    }

    async fn collect_profile(&mut self) -> Result<CustomerProfile, Interrupt> {
        writeln!(
            self.out,
            "\nEnter customer details (type '{}' anytime to restart):",
            self.restart_keyword
        )?;

        let name = self.ask_until("Name of the customer: ", parse_name).await?;
        let phone = self.ask_until("Enter your 10-digit number: ", parse_phone).await?;
        let email = self.ask_until("Enter your email: ", parse_email).await?;
        let adults = self.ask_until("Number of adults traveling: ", parse_adults).await?;
        let children = self
            .ask_until("Number of children traveling: ", parse_children)
            .await?;
        let purpose = self
            .ask_until("Trip purpose (family/couple/friends/solo): ", parse_purpose)
            .await?;

        let profile = CustomerProfile {
            name,
            phone,
            email,
            party: Party::new(adults, children),
            purpose,
        };
        writeln!(self.out, "\n{}", ProfileView(&profile))?;
        Ok(profile)
    }

    async fn plan_trip(&mut self) -> Result<TripSummary, Interrupt> {
        let profile = self.collect_profile().await?;
        let planner = self.planner;
        let currency = planner.home_currency();
        let party = profile.party;
        let mut session = TripSession::new(planner, profile);

        let answer = self
            .ask("\nSelect trip type:\n1. Domestic\n2. International\n")
            .await?;
        let trip_type = session.choose_trip_type(&answer)?;

        let listings = session.display_tiers()?;
        writeln!(
            self.out,
            "\n{}",
            TierTable {
                trip_type,
                listings: &listings,
                currency,
            }
        )?;

        let answer = self.ask("\nSelect budget range (1-3): ").await?;
        let matches = session.choose_tier(&answer)?;
        writeln!(self.out, "\n{}", MatchList(&matches))?;

        let prompt = format!("Select a destination (1-{}): ", matches.len());
        let answer = self.ask(&prompt).await?;
        session.choose_destination(&answer)?;

        let details = session.details()?;
        writeln!(
            self.out,
            "\n{}",
            DetailsView {
                details: &details,
                currency,
            }
        )?;

        let transport = session.quote_transport()?;
        writeln!(
            self.out,
            "{}",
            TransportTable {
                quote: &transport,
                party: &party,
                currency,
            }
        )?;
        if transport.is_available() {
            let answer = self.ask("Would you like to book transport? (y/n): ").await?;
            if is_yes(&answer) {
                let mode = self.ask("Enter transport mode: ").await?;
                match session.book_transport(&mode)? {
                    Some(row) => writeln!(
                        self.out,
                        "\nBooking confirmed for {} to {}!\nTotal cost: {} {}",
                        row.mode,
                        transport.destination(),
                        format_amount(row.party_total),
                        currency
                    )?,
                    None => writeln!(self.out, "Invalid transport mode selected.")?,
                }
            }
        }

        let nights = self
            .ask_until("\nEnter number of nights for stay: ", parse_nights)
            .await?;
        let lodging = session.quote_accommodation(&nights.to_string())?;
        writeln!(
            self.out,
            "\n{}",
            AccommodationTable {
                quote: &lodging,
                currency,
            }
        )?;
        if matches!(lodging, AccommodationQuote::Direct { .. }) {
            let answer = self.ask("Would you like to book a hotel? (y/n): ").await?;
            if is_yes(&answer) {
                let option = self.ask("Enter hotel option number: ").await?;
                match session.book_hotel(&option)? {
                    Some(row) => writeln!(
                        self.out,
                        "\nBooking confirmed at {}!\nLocation: {}, {}\nTotal cost for {} nights: {} {}",
                        row.hotel.name,
                        row.hotel.area,
                        row.hotel.city,
                        nights,
                        format_amount(row.total_price),
                        currency
                    )?,
                    None => writeln!(self.out, "Invalid option selected.")?,
                }
            }
        }

        let summary = session.summarize()?;
        writeln!(
            self.out,
            "\n{}",
            SummaryView {
                summary: &summary,
                currency,
            }
        )?;
        Ok(summary)
    }
}
