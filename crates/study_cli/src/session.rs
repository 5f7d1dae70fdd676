//! Interactive session: a line-oriented loop wiring user input to repository
//! mutations, with a confirmation step guarding deletes.

use crate::cli::{Cli, Command};
use crate::render;
use clap::{CommandFactory, Parser};
use study_core::config::{self, Palette, Theme};
use study_core::error::AppError;
use study_core::repository::Repository;
use study_core::storage::SnapshotStore;
use std::io::{self, BufRead};
use std::time::{SystemTime, UNIX_EPOCH};

const QUOTES: &[&str] = &[
    "Success is the sum of small efforts, repeated day in and day out.",
    "Believe you can and you're halfway there.",
    "The secret of getting ahead is getting started.",
    "It always seems impossible until it's done.",
    "Don't wish for it, work for it.",
    "Your future is created by what you do today, not tomorrow.",
];

/// Delete-confirmation state. At most one delete is pending at a time; a new
/// request overwrites the old target (last request wins, no queueing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    #[default]
    Idle,
    Pending(u64),
}

impl Confirmation {
    pub fn request(&mut self, id: u64) {
        *self = Self::Pending(id);
    }

    pub fn pending(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Pending(id) => Some(*id),
        }
    }

    /// Resolve the pending delete, returning its target. Idle afterward.
    pub fn confirm(&mut self) -> Option<u64> {
        let id = self.pending();
        *self = Self::Idle;
        id
    }

    /// Dismiss the pending delete without mutating anything.
    pub fn cancel(&mut self) -> Option<u64> {
        let id = self.pending();
        *self = Self::Idle;
        id
    }
}

pub struct Session<S: SnapshotStore> {
    repository: Repository<S>,
    palette: Palette,
    confirmation: Confirmation,
}

impl<S: SnapshotStore> Session<S> {
    pub fn new(repository: Repository<S>, theme: Theme) -> Self {
        Self {
            repository,
            palette: theme.palette(),
            confirmation: Confirmation::default(),
        }
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        self.print_greeting();

        let mut input = String::new();
        let stdin = io::stdin();
        let mut stdin_lock = stdin.lock();

        loop {
            input.clear();
            let bytes = stdin_lock
                .read_line(&mut input)
                .map_err(|err| AppError::io(err.to_string()))?;

            if bytes == 0 {
                break;
            }

            let line = input.trim();
            if line.is_empty() {
                continue;
            }

            if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
                break;
            }

            if line == "help" || line == "?" {
                print_help();
                continue;
            }

            self.handle_line(line);
        }

        Ok(())
    }

    fn handle_line(&mut self, line: &str) {
        if self.confirmation.pending().is_some() {
            match line.to_ascii_lowercase().as_str() {
                "y" | "yes" => {
                    self.finish_pending_delete();
                    return;
                }
                "n" | "no" => {
                    self.confirmation.cancel();
                    println!("{}", self.palette.mutedize("Delete cancelled."));
                    return;
                }
                // Anything else dismisses the prompt and is handled normally;
                // a fresh `delete` below re-arms it with the new target.
                _ => {
                    self.confirmation.cancel();
                    println!("{}", self.palette.mutedize("Delete cancelled."));
                }
            }
        }

        let args = match tokenize(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                return;
            }
        };

        if args.is_empty() {
            return;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("studyplan".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                return;
            }
        };

        if let Err(err) = self.dispatch(cli) {
            eprintln!("ERROR: {}", err);
        }
    }

    fn dispatch(&mut self, cli: Cli) -> Result<(), AppError> {
        match cli.command {
            Command::Add {
                subject,
                topic,
                date,
            } => {
                let goal = self.repository.create(&subject, &topic, &date)?;
                if cli.json {
                    println!("{}", goal_json(&goal));
                } else {
                    println!(
                        "{}",
                        self.palette
                            .successize(&format!("Goal created: {} (id {})", goal.topic, goal.id))
                    );
                    self.render_all();
                }
            }
            Command::List => {
                if cli.json {
                    println!("{}", goals_json(&self.repository.list()));
                } else {
                    self.render_all();
                }
            }
            Command::Toggle { id } => match self.repository.toggle(id)? {
                Some(goal) => {
                    if cli.json {
                        println!("{}", goal_json(&goal));
                    } else {
                        let verb = if goal.completed { "Completed" } else { "Reopened" };
                        println!(
                            "{}",
                            self.palette
                                .successize(&format!("{} goal: {} (id {})", verb, goal.topic, goal.id))
                        );
                        self.render_all();
                    }
                }
                None => println!("{}", self.palette.mutedize(&format!("No goal with id {id}."))),
            },
            Command::Delete { id, yes } => {
                let topic = self.repository.find(id).map(|goal| goal.topic.clone());
                match topic {
                    Some(topic) => {
                        if yes {
                            self.repository.delete(id)?;
                            println!("{}", self.palette.dangerize("Goal removed."));
                            self.render_all();
                        } else {
                            println!(
                                "Delete '{topic}' (id {id})? Type y to confirm, n to cancel."
                            );
                            self.confirmation.request(id);
                        }
                    }
                    None => {
                        println!("{}", self.palette.mutedize(&format!("No goal with id {id}.")));
                    }
                }
            }
            Command::Stats => {
                let progress = self.repository.progress();
                if cli.json {
                    println!("{}", progress_json(&progress));
                } else {
                    println!("{}", render::summary(&progress, &self.palette));
                }
            }
            Command::Theme { theme } => {
                let path = config::config_path()?;
                let applied = match theme {
                    Some(raw) => {
                        let theme = Theme::parse(&raw)
                            .ok_or_else(|| AppError::invalid_input("theme must be light or dark"))?;
                        config::set_theme(&path, theme)?
                    }
                    None => config::toggle_theme(&path)?,
                };
                self.palette = applied.palette();
                if cli.json {
                    println!("{}", serde_json::json!({ "theme": applied.as_str() }));
                } else {
                    println!("Theme set to {}.", applied.as_str());
                }
            }
        }

        Ok(())
    }

    fn finish_pending_delete(&mut self) {
        let Some(id) = self.confirmation.confirm() else {
            return;
        };

        match self.repository.delete(id) {
            Ok(Some(_)) => {
                println!("{}", self.palette.dangerize("Goal removed."));
                self.render_all();
            }
            Ok(None) => println!("{}", self.palette.mutedize(&format!("No goal with id {id}."))),
            Err(err) => eprintln!("ERROR: {}", err),
        }
    }

    fn render_all(&self) {
        println!("{}", render::goal_table(&self.repository.list(), &self.palette));
        println!("{}", render::summary(&self.repository.progress(), &self.palette));
    }

    fn print_greeting(&self) {
        if let Some(today) = formatted_today() {
            println!("{}", self.palette.accentize(&today));
        }
        println!("{}", self.palette.mutedize(&format!("\"{}\"", pick_quote())));
        println!("Type a command, or help for the list. exit to leave.");
    }
}

fn formatted_today() -> Option<String> {
    use time::macros::format_description;

    let offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let now = time::OffsetDateTime::now_utc().to_offset(offset);
    let format = format_description!("[weekday], [month repr:long] [day padding:none], [year]");
    now.format(&format).ok()
}

fn pick_quote() -> &'static str {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos() as usize)
        .unwrap_or(0);
    QUOTES[nanos % QUOTES.len()]
}

/// Split a command line into arguments, honoring double quotes.
pub fn tokenize(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if quoted {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

pub fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

pub fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

pub fn goal_json(goal: &study_core::model::Goal) -> serde_json::Value {
    serde_json::json!({
        "id": goal.id,
        "subject": goal.subject,
        "topic": goal.topic,
        "date": goal.date,
        "completed": goal.completed,
    })
}

pub fn goals_json(goals: &[study_core::model::Goal]) -> serde_json::Value {
    serde_json::Value::Array(goals.iter().map(goal_json).collect())
}

pub fn progress_json(progress: &study_core::repository::Progress) -> serde_json::Value {
    serde_json::json!({
        "total": progress.total,
        "completed": progress.completed,
        "pending": progress.pending,
        "percent": progress.percent,
    })
}
