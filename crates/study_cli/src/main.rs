use clap::Parser;
use std::io::{self, BufRead};
use study_cli::cli::{Cli, Command};
use study_cli::render;
use study_cli::session::{
    Session, goal_json, goals_json, normalize_parse_error, progress_json,
};
use study_core::config::{self, Palette, Theme};
use study_core::error::AppError;
use study_core::repository::Repository;
use study_core::storage::{JsonStore, SnapshotStore};

fn open_repository() -> Result<Repository<JsonStore>, AppError> {
    let store = JsonStore::at_default_path()?;
    let load = Repository::open(store);
    if let Some(warning) = load.warning {
        eprintln!("WARNING: goal snapshot unreadable, starting empty ({warning})");
    }
    Ok(load.repository)
}

fn active_theme() -> Theme {
    let load = config::load_config_with_fallback();
    if let Some(warning) = load.warning {
        eprintln!("WARNING: config unreadable, using defaults ({warning})");
    }
    load.config.theme
}

fn render_all<S: SnapshotStore>(repository: &Repository<S>, palette: &Palette) {
    println!("{}", render::goal_table(&repository.list(), palette));
    println!("{}", render::summary(&repository.progress(), palette));
}

fn confirm_on_stdin(prompt: &str) -> Result<bool, AppError> {
    println!("{prompt} [y/N]");

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|err| AppError::io(err.to_string()))?;

    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let mut repository = open_repository()?;
    let palette = active_theme().palette();

    match cli.command {
        Command::Add {
            subject,
            topic,
            date,
        } => {
            let goal = repository.create(&subject, &topic, &date)?;
            if cli.json {
                println!("{}", goal_json(&goal));
            } else {
                println!(
                    "{}",
                    palette.successize(&format!("Goal created: {} (id {})", goal.topic, goal.id))
                );
                render_all(&repository, &palette);
            }
        }
        Command::List => {
            if cli.json {
                println!("{}", goals_json(&repository.list()));
            } else {
                render_all(&repository, &palette);
            }
        }
        Command::Toggle { id } => match repository.toggle(id)? {
            Some(goal) => {
                if cli.json {
                    println!("{}", goal_json(&goal));
                } else {
                    let verb = if goal.completed { "Completed" } else { "Reopened" };
                    println!(
                        "{}",
                        palette.successize(&format!("{} goal: {} (id {})", verb, goal.topic, goal.id))
                    );
                    render_all(&repository, &palette);
                }
            }
            None => println!("{}", palette.mutedize(&format!("No goal with id {id}."))),
        },
        Command::Delete { id, yes } => {
            let Some(topic) = repository.find(id).map(|goal| goal.topic.clone()) else {
                println!("{}", palette.mutedize(&format!("No goal with id {id}.")));
                return Ok(());
            };

            let confirmed = yes || confirm_on_stdin(&format!("Delete '{topic}' (id {id})?"))?;
            if !confirmed {
                println!("{}", palette.mutedize("Delete cancelled."));
                return Ok(());
            }

            match repository.delete(id)? {
                Some(removed) => {
                    if cli.json {
                        println!("{}", goal_json(&removed));
                    } else {
                        println!("{}", palette.dangerize("Goal removed."));
                        render_all(&repository, &palette);
                    }
                }
                None => println!("{}", palette.mutedize(&format!("No goal with id {id}."))),
            }
        }
        Command::Stats => {
            let progress = repository.progress();
            if cli.json {
                println!("{}", progress_json(&progress));
            } else {
                println!("{}", render::summary(&progress, &palette));
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
            if cli.json {
                println!("{}", serde_json::json!({ "theme": applied.as_str() }));
            } else {
                println!("Theme set to {}.", applied.as_str());
            }
        }
    }

    Ok(())
}

fn run_interactive() -> Result<(), AppError> {
    let repository = open_repository()?;
    let mut session = Session::new(repository, active_theme());
    session.run()
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            let _ = err.print();
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
