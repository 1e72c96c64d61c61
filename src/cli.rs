//! Command-line front end: one-shot `browse`, the interactive `repl`, and
//! login management.

use crate::api::{self, ApiClient, HttpClient};
use crate::auth::AuthStore;
use crate::browser::RecordBrowser;
use crate::calc::{self, invoice_totals, summarize_ratings, LineItem};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::{CarUser, Customer, Employee, Entity, Inspection, Order, Record};
use crate::render::{render_detail, render_invoice, render_ratings, render_view};
use crate::validation::{parse_form, LoginForm, PasswordChange};
use chrono::Local;
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "autohub", about = "Browse AutoHub admin records from the terminal")]
pub struct Args {
    #[arg(long, global = true, help = "Config file (default ~/.autohub/config.toml)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Debug logging")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one view of an entity table
    Browse(BrowseArgs),

    /// Interactive browser
    Repl {
        entity: Entity,

        #[arg(long, help = "Load from and write to the backend")]
        remote: bool,
    },

    /// Log in and save the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "AUTOHUB_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the saved session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Change the password of the logged-in user
    Passwd {
        #[arg(long, env = "AUTOHUB_PASSWORD", hide_env_values = true)]
        current: String,

        #[arg(long, env = "AUTOHUB_NEW_PASSWORD", hide_env_values = true)]
        new: String,

        #[arg(long, help = "Repeat the new password")]
        confirm: String,
    },

    /// Summarize star ratings, e.g. `autohub ratings 5 4 4 3`
    Ratings {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        ratings: Vec<u8>,
    },

    /// Invoice totals with an optional discount and tax
    Invoice {
        #[arg(
            long = "item",
            value_name = "DESCRIPTION:QTY:PRICE",
            required = true,
            value_parser = parse_line_item
        )]
        items: Vec<LineItem>,

        #[arg(long, value_name = "PCT", default_value = "0", value_parser = parse_percent)]
        discount: f64,

        #[arg(long, value_name = "PCT", default_value = "0", value_parser = parse_percent)]
        tax: f64,
    },
}

#[derive(clap::Args, Debug)]
pub struct BrowseArgs {
    pub entity: Entity,

    #[arg(long, help = "Case-insensitive text search")]
    pub search: Option<String>,

    #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_pair)]
    pub filters: Vec<(String, String)>,

    #[arg(long = "bucket", value_name = "FIELD=LABEL", value_parser = parse_pair)]
    pub buckets: Vec<(String, String)>,

    #[arg(long, help = "Sort menu label, e.g. \"Name (A-Z)\"")]
    pub sort: Option<String>,

    #[arg(long, value_name = "N")]
    pub page: Option<usize>,

    #[arg(long, value_name = "N", default_value_t = 0, help = "Extra load-more steps")]
    pub more: usize,

    #[arg(long, help = "Fetch records from the backend instead of fixtures")]
    pub remote: bool,
}

fn parse_pair(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{}'", raw)),
    }
}

/// `Brake pads:2:45.00`; the description may itself contain colons.
fn parse_line_item(raw: &str) -> std::result::Result<LineItem, String> {
    let mut parts = raw.rsplitn(3, ':');
    let (price, quantity, description) = match (parts.next(), parts.next(), parts.next()) {
        (Some(price), Some(quantity), Some(description)) if !description.trim().is_empty() => {
            (price, quantity, description)
        }
        _ => return Err(format!("expected DESCRIPTION:QTY:PRICE, got '{}'", raw)),
    };
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity '{}'", quantity.trim()))?;
    let unit_price =
        calc::parse_amount(price).ok_or_else(|| format!("invalid price '{}'", price.trim()))?;
    Ok(LineItem::new(description.trim(), quantity, unit_price))
}

fn parse_percent(raw: &str) -> std::result::Result<f64, String> {
    match raw.trim().trim_end_matches('%').trim().parse::<f64>() {
        Ok(pct) if pct.is_finite() && pct >= 0.0 => Ok(pct),
        _ => Err(format!("expected a percentage of zero or more, got '{}'", raw)),
    }
}

/// Run `$body` with `$R` bound to the record type of `$entity`.
macro_rules! with_record_type {
    ($entity:expr, $R:ident => $body:expr) => {
        match $entity {
            Entity::CarUsers => {
                type $R = CarUser;
                $body
            }
            Entity::Employees => {
                type $R = Employee;
                $body
            }
            Entity::Customers => {
                type $R = Customer;
                $body
            }
            Entity::Orders => {
                type $R = Order;
                $body
            }
            Entity::Inspections => {
                type $R = Inspection;
                $body
            }
        }
    };
}

pub struct Context {
    pub config: Config,
    pub auth: AuthStore,
}

impl Context {
    pub fn new(config: Config) -> Self {
        let auth = AuthStore::new(config.auth.resolve_file());
        Self { config, auth }
    }

    /// HTTP client carrying the saved token, if any.
    pub fn client(&self) -> Result<HttpClient> {
        let client = HttpClient::new(
            &self.config.api.base_url,
            Duration::from_secs(self.config.api.timeout_secs),
        )?;
        Ok(match self.auth.load()? {
            Some(session) => client.with_token(session.token),
            None => client,
        })
    }

    fn browser<R: Record>(&self, entity: Entity, client: Option<&dyn ApiClient>) -> Result<RecordBrowser<R>> {
        let records = match client {
            Some(client) => api::fetch_records::<R>(client)?,
            None => R::fixtures(),
        };
        let browser = RecordBrowser::new(records);
        Ok(match self.config.page_size(entity) {
            Some(size) => browser.with_page_size(size),
            None => browser,
        })
    }
}

pub fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Browse(args) => {
            let entity = args.entity;
            let client = if args.remote { Some(ctx.client()?) } else { None };
            let client = client.as_ref().map(|c| c as &dyn ApiClient);
            let text = with_record_type!(entity, R => {
                let mut browser = ctx.browser::<R>(entity, client)?;
                browse_view(&mut browser, &args)?
            });
            println!("{}", text);
            Ok(())
        }
        Command::Repl { entity, remote } => {
            let client: Option<Box<dyn ApiClient>> = if remote {
                Some(Box::new(ctx.client()?))
            } else {
                None
            };
            with_record_type!(entity, R => {
                let browser = ctx.browser::<R>(entity, client.as_deref())?;
                run_repl(Repl::new(browser, client))
            })
        }
        Command::Login { email, password } => {
            let client = HttpClient::new(
                &ctx.config.api.base_url,
                Duration::from_secs(ctx.config.api.timeout_secs),
            )?;
            let resp = api::login(&client, &LoginForm { email, password })?;
            ctx.auth.save(&SecretString::from(resp.token), &resp.user)?;
            println!("Logged in as {} ({})", resp.user.name, resp.user.role.as_str());
            Ok(())
        }
        Command::Logout => {
            if ctx.auth.clear()? {
                println!("Logged out");
            } else {
                println!("Not logged in");
            }
            Ok(())
        }
        Command::Whoami => {
            match ctx.auth.load()? {
                Some(session) => println!(
                    "{} <{}> ({})",
                    session.user.name,
                    session.user.email,
                    session.user.role.as_str()
                ),
                None => return Err(Error::NotAuthenticated),
            }
            Ok(())
        }
        Command::Passwd { current, new, confirm } => {
            let session = ctx.auth.load()?.ok_or(Error::NotAuthenticated)?;
            let form = PasswordChange { current, new, confirm };
            api::change_password(&ctx.client()?, &session.user.email, &form)?;
            println!("Password changed for {}", session.user.email);
            Ok(())
        }
        Command::Ratings { ratings } => {
            println!("{}", render_ratings(&summarize_ratings(&ratings)));
            Ok(())
        }
        Command::Invoice { items, discount, tax } => {
            let totals = invoice_totals(&items, discount, tax);
            println!("{}", render_invoice(&items, &totals));
            Ok(())
        }
    }
}

/// Apply one-shot browse options and render the resulting view.
pub fn browse_view<R: Record>(browser: &mut RecordBrowser<R>, args: &BrowseArgs) -> Result<String> {
    if let Some(query) = &args.search {
        browser.search(query);
    }
    for (field, value) in &args.filters {
        browser.filter(field, value)?;
    }
    for (field, label) in &args.buckets {
        browser.bucket(field, label)?;
    }
    if let Some(label) = &args.sort {
        if !browser.sort_by(label) {
            warn!(label = %label, "unknown sort option, keeping store order");
        }
    }
    if let Some(page) = args.page {
        browser.go_to_page(page)?;
    }
    for _ in 0..args.more {
        if !browser.load_more() {
            break;
        }
    }
    Ok(render_view(&browser.view(), R::PROFILE.columns))
}

const HELP: &str = "\
Commands:
  search [text]            - text search (blank clears)
  filter <field> <value>   - equality filter, value 'All' clears
  bucket <field> <label>   - numeric range filter, label 'All' clears
  sort [label]             - sort by menu label (blank keeps store order)
  sorts                    - list sort options
  next | prev | more       - paging
  page <n>                 - jump to page
  enable <id> | disable <id>
  add f=v | f=v ...        - add a record, e.g. add name=Nimal | email=n@x.lk
  delete <id>              - delete a record
  reload                   - reload records and go back to the first page
  show <id>                - record detail
  clear                    - clear search and filters
  help | quit";

/// Result of one REPL line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// Interactive browser state. With a client, status changes are persisted.
pub struct Repl<R: Record> {
    pub browser: RecordBrowser<R>,
    client: Option<Box<dyn ApiClient>>,
}

impl<R: Record> Repl<R> {
    pub fn new(browser: RecordBrowser<R>, client: Option<Box<dyn ApiClient>>) -> Self {
        Self { browser, client }
    }

    fn render(&self) -> String {
        let view = render_view(&self.browser.view(), R::PROFILE.columns);
        let active = self.browser.filters().describe();
        let sort = self.browser.sort_option().map(|s| s.label);
        let mut header = Vec::new();
        if !active.is_empty() {
            header.push(format!("Filters: {}", active.join(", ")));
        }
        if let Some(label) = sort {
            header.push(format!("Sort: {}", label));
        }
        if header.is_empty() {
            view
        } else {
            format!("{}\n{}", header.join("  "), view)
        }
    }

    fn parse_number(arg: &str) -> Result<u64> {
        arg.trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("'{}' is not a number", arg.trim())))
    }

    /// Toggle locally first, then persist; the local change is rolled back
    /// if the backend refuses it.
    fn set_enabled(&mut self, id: u64, enabled: bool) -> Result<String> {
        let previous = self.browser.set_enabled(id, enabled)?;
        if let Some(client) = &self.client {
            let status = self
                .browser
                .find(id)
                .map(|r| r.status_label().to_string())
                .unwrap_or_default();
            match api::update_status::<R>(&**client, id, &status) {
                Ok(saved) => self.browser.upsert(saved),
                Err(e) => {
                    warn!(id, error = %e, "status change failed, rolling back");
                    self.browser.upsert(previous);
                    return Err(e);
                }
            }
        }
        info!(entity = R::PROFILE.endpoint, id, enabled, "status changed");
        Ok(self.render())
    }

    /// Validate the form, add the record locally, then persist it. The local
    /// record is removed again if the backend refuses it.
    fn add(&mut self, form: &str) -> Result<String> {
        let fields = parse_form(form)?;
        let id = self.browser.next_id();
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let record = R::from_form(&fields, id, &today)?;
        self.browser.insert(record.clone())?;
        if let Some(client) = &self.client {
            match api::create_record(&**client, &record) {
                Ok(saved) => {
                    if saved.id() != id {
                        self.browser.remove(id)?;
                    }
                    self.browser.upsert(saved);
                }
                Err(e) => {
                    warn!(id, error = %e, "create failed, removing local record");
                    self.browser.remove(id)?;
                    return Err(e);
                }
            }
        }
        info!(entity = R::PROFILE.endpoint, id, "record added");
        Ok(self.render())
    }

    fn delete(&mut self, id: u64) -> Result<String> {
        let index = self.browser.position(id).ok_or(Error::NotFound(id))?;
        let removed = self.browser.remove(id)?;
        if let Some(client) = &self.client {
            if let Err(e) = api::delete_record::<R>(&**client, id) {
                warn!(id, error = %e, "delete failed, restoring record");
                self.browser.restore(index, removed);
                return Err(e);
            }
        }
        info!(entity = R::PROFILE.endpoint, id, "record deleted");
        Ok(self.render())
    }

    fn reload(&mut self) -> Result<String> {
        let records = match &self.client {
            Some(client) => api::fetch_records::<R>(&**client)?,
            None => R::fixtures(),
        };
        self.browser.replace_records(records);
        Ok(self.render())
    }

    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let text = match cmd {
            "quit" | "exit" => return Ok(Outcome::Quit),
            "help" => HELP.to_string(),
            "" | "view" => self.render(),
            "search" => {
                self.browser.search(rest);
                self.render()
            }
            "filter" | "bucket" => {
                let (field, value) = rest.split_once(' ').unwrap_or((rest, "All"));
                if cmd == "filter" {
                    self.browser.filter(field, value)?;
                } else {
                    self.browser.bucket(field, value)?;
                }
                self.render()
            }
            "sort" => {
                if !self.browser.sort_by(rest) && !rest.is_empty() {
                    warn!(label = rest, "unknown sort option, keeping store order");
                }
                self.render()
            }
            "sorts" => R::PROFILE
                .sort_menu
                .iter()
                .map(|s| s.label)
                .collect::<Vec<_>>()
                .join("\n"),
            "next" | "more" => {
                if !self.browser.next_page() {
                    return Ok(Outcome::Print("Already at the end.".to_string()));
                }
                self.render()
            }
            "prev" => {
                if !self.browser.prev_page() {
                    return Ok(Outcome::Print("Already at the start.".to_string()));
                }
                self.render()
            }
            "page" => {
                let page = usize::try_from(Self::parse_number(rest)?)
                    .map_err(|_| Error::InvalidInput(format!("page {} is too large", rest)))?;
                self.browser.go_to_page(page)?;
                self.render()
            }
            "enable" => self.set_enabled(Self::parse_number(rest)?, true)?,
            "disable" => self.set_enabled(Self::parse_number(rest)?, false)?,
            "add" => self.add(rest)?,
            "delete" => self.delete(Self::parse_number(rest)?)?,
            "reload" => self.reload()?,
            "show" => {
                let id = Self::parse_number(rest)?;
                let record = self.browser.find(id).ok_or(Error::NotFound(id))?;
                render_detail(record, R::PROFILE.columns)
            }
            "clear" => {
                self.browser.clear_filters();
                self.render()
            }
            other => format!("Unknown command '{}'. Type 'help'.", other),
        };
        Ok(Outcome::Print(text))
    }
}

fn history_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".autohub")
        .join("history")
}

pub fn run_repl<R: Record>(mut repl: Repl<R>) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let history_file = history_path();
    let _ = rl.load_history(&history_file);

    println!("{} - type help for commands, quit to exit", R::PROFILE.title);
    println!("{}", repl.render());

    let prompt = format!("{}> ", R::PROFILE.endpoint);
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                match repl.execute(line) {
                    Ok(Outcome::Print(text)) => println!("{}", text),
                    Ok(Outcome::Quit) => break,
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    if let Some(parent) = history_file.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = rl.save_history(&history_file);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::record::{CarUserStatus, EmployeeStatus};
    use crate::test_utils::{MockApiClient, MockResponse};

    fn browse_args(entity: Entity) -> BrowseArgs {
        BrowseArgs {
            entity,
            search: None,
            filters: Vec::new(),
            buckets: Vec::new(),
            sort: None,
            page: None,
            more: 0,
            remote: false,
        }
    }

    fn print(outcome: Outcome) -> String {
        match outcome {
            Outcome::Print(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "autohub",
            "browse",
            "car-users",
            "--filter",
            "status=Suspended",
            "--sort",
            "Name (A-Z)",
            "--debug",
        ])
        .unwrap();
        assert!(args.debug);
        match args.command {
            Command::Browse(browse) => {
                assert_eq!(browse.entity, Entity::CarUsers);
                assert_eq!(browse.filters, vec![("status".to_string(), "Suspended".to_string())]);
                assert_eq!(browse.sort.as_deref(), Some("Name (A-Z)"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_pair_rejects_missing_equals() {
        assert!(parse_pair("status").is_err());
        assert!(parse_pair("=x").is_err());
        assert_eq!(parse_pair("city = Kandy").unwrap(), ("city".to_string(), "Kandy".to_string()));
    }

    #[test]
    fn test_browse_view_search_and_filter() {
        let mut browser = RecordBrowser::<CarUser>::with_fixtures();
        let args = BrowseArgs {
            search: Some("silva".to_string()),
            filters: vec![("status".to_string(), "Suspended".to_string())],
            ..browse_args(Entity::CarUsers)
        };
        let text = browse_view(&mut browser, &args).unwrap();
        assert!(text.contains("R. De Silva"));
        assert!(!text.contains("M. Silva"));
    }

    #[test]
    fn test_browse_view_unknown_filter_errors() {
        let mut browser = RecordBrowser::<Order>::with_fixtures();
        let args = BrowseArgs {
            filters: vec![("colour".to_string(), "red".to_string())],
            ..browse_args(Entity::Orders)
        };
        assert!(matches!(
            browse_view(&mut browser, &args),
            Err(Error::UnknownFilter { .. })
        ));
    }

    #[test]
    fn test_browse_view_more_steps() {
        let mut browser = RecordBrowser::<Order>::with_fixtures();
        let args = BrowseArgs {
            more: 3,
            ..browse_args(Entity::Orders)
        };
        let text = browse_view(&mut browser, &args).unwrap();
        assert!(text.ends_with("Showing 8 of 8 matching (8 total)"));
    }

    #[test]
    fn test_repl_commands() {
        let mut repl = Repl::new(RecordBrowser::<CarUser>::with_fixtures(), None);
        let text = print(repl.execute("filter status Suspended").unwrap());
        assert!(text.starts_with("Filters: status = Suspended"));
        assert!(text.contains("4 of 10 records"));

        let text = print(repl.execute("clear").unwrap());
        assert!(text.contains("10 of 10 records"));

        assert!(print(repl.execute("next").unwrap()).contains("Page 2 of 2"));
        assert_eq!(print(repl.execute("next").unwrap()), "Already at the end.");
        assert!(print(repl.execute("show 4").unwrap()).contains("M. Silva"));
        assert!(matches!(repl.execute("show 99"), Err(Error::NotFound(99))));
        assert!(print(repl.execute("bogus").unwrap()).starts_with("Unknown command"));
        assert_eq!(repl.execute("quit").unwrap(), Outcome::Quit);
    }

    #[test]
    fn test_repl_local_toggle() {
        let mut repl = Repl::new(RecordBrowser::<Employee>::with_fixtures(), None);
        let suspended = repl
            .browser
            .records()
            .iter()
            .find(|e| e.status == EmployeeStatus::Suspended)
            .map(|e| e.id)
            .unwrap();
        repl.execute(&format!("enable {}", suspended)).unwrap();
        assert_eq!(
            repl.browser.find(suspended).unwrap().status,
            EmployeeStatus::Available
        );
    }

    #[test]
    fn test_repl_toggle_persists_through_client() {
        let mut saved = CarUser::fixtures()[0].clone();
        saved.status = CarUserStatus::Suspended;
        let mock = MockApiClient::with_bodies(vec![MockApiClient::ok(
            serde_json::to_value(&saved).unwrap(),
        )]);
        let mut repl = Repl::new(
            RecordBrowser::<CarUser>::with_fixtures(),
            Some(Box::new(mock.clone())),
        );

        repl.execute("disable 1").unwrap();
        assert_eq!(repl.browser.find(1).unwrap().status, CarUserStatus::Suspended);

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Patch);
        assert_eq!(requests[0].path, "/api/car-users/1/status");
        assert_eq!(requests[0].body.as_ref().unwrap()["status"], "Suspended");
    }

    #[test]
    fn test_repl_toggle_rolls_back_on_failure() {
        let mock = MockApiClient::new(vec![MockResponse::Status(500, "boom".to_string())]);
        let mut repl = Repl::new(
            RecordBrowser::<CarUser>::with_fixtures(),
            Some(Box::new(mock)),
        );
        assert!(repl.execute("enable 3").is_err());
        assert_eq!(repl.browser.find(3).unwrap().status, CarUserStatus::Suspended);
    }

    #[test]
    fn test_repl_orders_are_view_only() {
        let mut repl = Repl::new(RecordBrowser::<Order>::with_fixtures(), None);
        assert!(matches!(
            repl.execute("disable 1"),
            Err(Error::NotToggleable(_))
        ));
    }

    #[test]
    fn test_repl_refused_toggle_sends_nothing() {
        let mock = MockApiClient::default();
        let mut repl = Repl::new(
            RecordBrowser::<CarUser>::with_fixtures(),
            Some(Box::new(mock.clone())),
        );
        assert!(matches!(
            repl.execute("enable 1"),
            Err(Error::ActionNotOffered { id: 1, action: "Enable" })
        ));
        assert!(matches!(
            repl.execute("disable 3"),
            Err(Error::ActionNotOffered { id: 3, action: "Disable" })
        ));
        assert!(mock.requests().is_empty());
        assert_eq!(repl.browser.records(), CarUser::fixtures().as_slice());
    }

    #[test]
    fn test_repl_enable_on_working_employee_is_refused() {
        let mut repl = Repl::new(RecordBrowser::<Employee>::with_fixtures(), None);
        assert!(repl.execute("enable 2").is_err());
        assert_eq!(repl.browser.find(2).unwrap().status, EmployeeStatus::OnWork);
    }

    #[test]
    fn test_repl_add_local() {
        let mut repl = Repl::new(RecordBrowser::<CarUser>::with_fixtures(), None);
        repl.execute("add name=Nimal Perera | email=Nimal@Gmail.com | phone=+94 77 123 4567 | city=Kandy | vehicles=2")
            .unwrap();
        let added = repl.browser.find(11).unwrap();
        assert_eq!(added.email, "nimal@gmail.com");
        assert_eq!(added.phone, "0771234567");
        assert_eq!(added.status, CarUserStatus::Active);
        assert!(crate::sort::parse_date(&added.join_date).is_some());
    }

    #[test]
    fn test_repl_add_invalid_form_is_blocked() {
        let mock = MockApiClient::default();
        let mut repl = Repl::new(
            RecordBrowser::<Employee>::with_fixtures(),
            Some(Box::new(mock.clone())),
        );
        let err = repl.execute("add name=Sunil | role=Mechanic | email=sunil@").unwrap_err();
        match err {
            Error::Validation(errors) => {
                assert_eq!(errors.get("email"), Some("Enter a valid email address"));
                assert_eq!(errors.get("phone"), Some("Phone is required"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(mock.requests().is_empty());
        assert_eq!(repl.browser.records().len(), Employee::fixtures().len());
    }

    #[test]
    fn test_repl_add_persists_through_client() {
        let mut saved = Employee::fixtures()[0].clone();
        saved.id = 9;
        saved.name = "Sunil Perera".to_string();
        let mock = MockApiClient::with_bodies(vec![MockApiClient::ok(
            serde_json::to_value(&saved).unwrap(),
        )]);
        let mut repl = Repl::new(
            RecordBrowser::<Employee>::with_fixtures(),
            Some(Box::new(mock.clone())),
        );
        repl.execute("add name=Sunil Perera | role=Mechanic | email=sunil@autohub.lk | phone=071 555 1234")
            .unwrap();
        assert_eq!(repl.browser.find(9), Some(&saved));

        let requests = mock.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/api/employees");
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(body["id"], 9);
        assert_eq!(body["status"], "Available");
        assert_eq!(body["phone"], "0715551234");
    }

    #[test]
    fn test_repl_add_rolls_back_on_failure() {
        let mock = MockApiClient::new(vec![MockResponse::Status(409, "Record 11 already exists".into())]);
        let mut repl = Repl::new(
            RecordBrowser::<CarUser>::with_fixtures(),
            Some(Box::new(mock)),
        );
        assert!(matches!(
            repl.execute("add name=Nimal | email=n@gmail.com | phone=0771234567 | city=Kandy"),
            Err(Error::Status { status: 409, .. })
        ));
        assert!(repl.browser.find(11).is_none());
        assert_eq!(repl.browser.records().len(), 10);
    }

    #[test]
    fn test_repl_add_not_offered_for_orders() {
        let mut repl = Repl::new(RecordBrowser::<Order>::with_fixtures(), None);
        assert!(matches!(
            repl.execute("add customer=Kamal"),
            Err(Error::NotCreatable("Order History"))
        ));
    }

    #[test]
    fn test_repl_delete() {
        let mut repl = Repl::new(RecordBrowser::<CarUser>::with_fixtures(), None);
        repl.execute("delete 4").unwrap();
        assert!(repl.browser.find(4).is_none());
        assert!(matches!(repl.execute("delete 4"), Err(Error::NotFound(4))));
    }

    #[test]
    fn test_repl_delete_restores_on_failure() {
        let mock = MockApiClient::new(vec![MockResponse::Status(500, "boom".into())]);
        let mut repl = Repl::new(
            RecordBrowser::<CarUser>::with_fixtures(),
            Some(Box::new(mock.clone())),
        );
        assert!(repl.execute("delete 4").is_err());
        assert_eq!(repl.browser.records(), CarUser::fixtures().as_slice());
        assert_eq!(mock.requests()[0].method, Method::Delete);
        assert_eq!(mock.requests()[0].path, "/api/car-users/4");
    }

    #[test]
    fn test_repl_reload_returns_to_first_page() {
        let users = serde_json::to_value(CarUser::fixtures()).unwrap();
        let mock = MockApiClient::with_bodies(vec![MockApiClient::ok(users)]);
        let mut repl = Repl::new(
            RecordBrowser::<CarUser>::with_fixtures(),
            Some(Box::new(mock.clone())),
        );
        assert!(print(repl.execute("next").unwrap()).contains("Page 2 of 2"));
        assert!(print(repl.execute("reload").unwrap()).contains("Page 1 of 2"));
        assert_eq!(mock.requests()[0].path, "/api/car-users");

        let mut local = Repl::new(RecordBrowser::<CarUser>::with_fixtures(), None);
        local.execute("delete 1").unwrap();
        local.execute("reload").unwrap();
        assert_eq!(local.browser.records().len(), 10);
    }

    #[test]
    fn test_repl_page_argument() {
        let mut repl = Repl::new(RecordBrowser::<CarUser>::with_fixtures(), None);
        assert!(print(repl.execute("page 2").unwrap()).contains("Page 2 of 2"));
        assert!(matches!(repl.execute("page two"), Err(Error::InvalidInput(_))));
        assert!(matches!(
            repl.execute("page 18446744073709551615"),
            Err(Error::InvalidInput(_) | Error::PageOutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_line_item() {
        let item = parse_line_item("Oil: 5W-30:2:1,250.50").unwrap();
        assert_eq!(item.description, "Oil: 5W-30");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.unit_price, 125_050);
        assert!(parse_line_item("Oil:1").is_err());
        assert!(parse_line_item("Oil:x:10").is_err());
        assert!(parse_line_item(":1:10").is_err());
        assert!(parse_line_item("Oil:1:ten").is_err());
    }

    #[test]
    fn test_parse_calc_commands() {
        let args = Args::try_parse_from([
            "autohub",
            "invoice",
            "--item",
            "Brake pads:2:45",
            "--item",
            "Labour:1:30.00",
            "--discount",
            "10%",
            "--tax",
            "8",
        ])
        .unwrap();
        match args.command {
            Command::Invoice { items, discount, tax } => {
                assert_eq!(items.len(), 2);
                assert_eq!(invoice_totals(&items, discount, tax).total, 11_664);
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(Args::try_parse_from(["autohub", "invoice"]).is_err());
        assert!(Args::try_parse_from(["autohub", "invoice", "--item", "x:1:1", "--tax", "-5"]).is_err());
        assert!(Args::try_parse_from(["autohub", "ratings", "5", "6"]).is_err());
        match Args::try_parse_from(["autohub", "ratings", "5", "4"]).unwrap().command {
            Command::Ratings { ratings } => assert_eq!(ratings, vec![5, 4]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_passwd() {
        let args = Args::try_parse_from([
            "autohub", "passwd", "--current", "Admin123", "--new", "Garage2024", "--confirm", "Garage2024",
        ])
        .unwrap();
        match args.command {
            Command::Passwd { current, new, confirm } => {
                assert_eq!(current, "Admin123");
                assert_eq!(new, confirm);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_repl_bad_id() {
        let mut repl = Repl::new(RecordBrowser::<CarUser>::with_fixtures(), None);
        assert!(matches!(repl.execute("show abc"), Err(Error::InvalidInput(_))));
    }
}
