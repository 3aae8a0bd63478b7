use std::io::Write;

use anyhow::{bail, Context, Result};

use crate::agile::AgileClient;
use crate::model::{Issue, Sprint};
use crate::query::PageOptions;
use crate::transport::HttpClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Boards,
    Backlog { board_id: u64 },
    Issues { board_id: u64, options: PageOptions },
    Sprints { board_id: u64, options: PageOptions },
    Sprint { sprint_id: u64 },
    SprintIssues { sprint_id: u64, options: PageOptions },
    Projects { board_id: u64, options: PageOptions },
    FullProjects { board_id: u64 },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub json: bool,
}

/// Flags shared by every command, gathered before the command is built.
#[derive(Default)]
struct Flags {
    options: PageOptions,
    paged: bool,
    full: bool,
    json: bool,
}

/// Parse `agile` arguments (without the program name).
///
/// Supported forms:
///   agile boards
///   agile issues 1 --start-at 50 --max-results 3
///   agile sprints 1 --param state=active
///   agile projects 1 --full --json
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Invocation {
            command: Command::Help,
            json: false,
        });
    };

    let mut positional: Vec<&str> = Vec::new();
    let mut flags = Flags::default();
    let mut i = 0;

    while i < rest.len() {
        match rest[i].as_str() {
            "--start-at" => {
                i += 1;
                flags.options.start_at = Some(number_arg(rest.get(i), "--start-at")?);
                flags.paged = true;
            }
            "--max-results" => {
                i += 1;
                flags.options.max_results = Some(number_arg(rest.get(i), "--max-results")?);
                flags.paged = true;
            }
            "--param" => {
                i += 1;
                let Some(pair) = rest.get(i) else {
                    bail!("Missing value for --param");
                };
                let Some((key, value)) = pair.split_once('=') else {
                    bail!("--param expects key=value, got '{pair}'");
                };
                if key.is_empty() {
                    bail!("--param key cannot be empty");
                }
                flags.options.extra.insert(key.to_string(), value.to_string());
                flags.paged = true;
            }
            "--full" => flags.full = true,
            "--json" => flags.json = true,
            flag if flag.starts_with("--") => bail!("Unknown option '{flag}'"),
            value => positional.push(value),
        }
        i += 1;
    }

    let command = build_command(name, &positional, flags.options, flags.full)?;

    if flags.paged && !accepts_paging(&command) {
        bail!("'{name}' does not accept --start-at, --max-results or --param");
    }
    if flags.full && !matches!(command, Command::FullProjects { .. }) {
        bail!("--full only applies to 'projects'");
    }

    Ok(Invocation {
        command,
        json: flags.json,
    })
}

fn build_command(
    name: &str,
    positional: &[&str],
    options: PageOptions,
    full: bool,
) -> Result<Command> {
    let command = match name {
        "help" | "-h" | "--help" => Command::Help,
        "boards" => {
            expect_args(name, positional, 0)?;
            Command::Boards
        }
        "backlog" => Command::Backlog {
            board_id: id_arg(name, positional, "board")?,
        },
        "issues" => Command::Issues {
            board_id: id_arg(name, positional, "board")?,
            options,
        },
        "sprints" => Command::Sprints {
            board_id: id_arg(name, positional, "board")?,
            options,
        },
        "sprint" => Command::Sprint {
            sprint_id: id_arg(name, positional, "sprint")?,
        },
        "sprint-issues" => Command::SprintIssues {
            sprint_id: id_arg(name, positional, "sprint")?,
            options,
        },
        "projects" if full => Command::FullProjects {
            board_id: id_arg(name, positional, "board")?,
        },
        "projects" => Command::Projects {
            board_id: id_arg(name, positional, "board")?,
            options,
        },
        other => bail!("Unknown command '{other}'. Run 'agile help' for usage."),
    };
    Ok(command)
}

fn accepts_paging(command: &Command) -> bool {
    matches!(
        command,
        Command::Issues { .. }
            | Command::Sprints { .. }
            | Command::SprintIssues { .. }
            | Command::Projects { .. }
    )
}

fn expect_args(name: &str, positional: &[&str], count: usize) -> Result<()> {
    if positional.len() != count {
        bail!(
            "'{name}' expects {count} argument(s), got {}",
            positional.len()
        );
    }
    Ok(())
}

fn id_arg(name: &str, positional: &[&str], what: &str) -> Result<u64> {
    expect_args(name, positional, 1)?;
    positional[0]
        .parse()
        .with_context(|| format!("Invalid {what} id '{}'", positional[0]))
}

fn number_arg(value: Option<&String>, flag: &str) -> Result<u64> {
    let Some(value) = value else {
        bail!("Missing value for {flag}");
    };
    value
        .parse()
        .with_context(|| format!("{flag} expects a non-negative number, got '{value}'"))
}

/// Run a parsed command and print one line per result (or JSON).
pub async fn run<C, W>(agile: &AgileClient<C>, invocation: &Invocation, out: &mut W) -> Result<()>
where
    C: HttpClient,
    W: Write,
{
    let json = invocation.json;
    match &invocation.command {
        Command::Help => print_help(out)?,
        Command::Boards => {
            let page = agile.list_boards().await?;
            if json {
                return write_json(out, &page);
            }
            for board in &page.values {
                writeln!(out, "{}\t{}\t{}", board.id, board.board_type, board.name)?;
            }
        }
        Command::Backlog { board_id } => {
            let page = agile.list_backlog_issues(*board_id).await?;
            if json {
                return write_json(out, &page);
            }
            write_issues(out, &page.issues)?;
        }
        Command::Issues { board_id, options } => {
            let issues = agile.list_board_issues(*board_id, options).await?;
            if json {
                return write_json(out, &issues);
            }
            write_issues(out, &issues)?;
        }
        Command::Sprints { board_id, options } => {
            let page = agile.list_sprints(*board_id, options).await?;
            if json {
                return write_json(out, &page);
            }
            for sprint in &page.values {
                write_sprint(out, sprint)?;
            }
        }
        Command::Sprint { sprint_id } => {
            let sprint = agile.sprint(*sprint_id).await?;
            if json {
                return write_json(out, &sprint);
            }
            write_sprint(out, &sprint)?;
        }
        Command::SprintIssues { sprint_id, options } => {
            let page = agile.list_sprint_issues(*sprint_id, options).await?;
            if json {
                return write_json(out, &page);
            }
            write_issues(out, &page.issues)?;
        }
        Command::Projects { board_id, options } => {
            let page = agile.list_projects(*board_id, options).await?;
            if json {
                return write_json(out, &page);
            }
            for project in &page.values {
                writeln!(out, "{}\t{}", project.key, project.name)?;
            }
        }
        Command::FullProjects { board_id } => {
            let projects = agile.list_full_projects(*board_id).await?;
            if json {
                return write_json(out, &projects);
            }
            for project in &projects {
                writeln!(out, "{}\t{}", project.key, project.name)?;
            }
        }
    }
    Ok(())
}

fn write_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_issues<W: Write>(out: &mut W, issues: &[Issue]) -> Result<()> {
    for issue in issues {
        writeln!(
            out,
            "{}\t{}\t{}",
            issue.key,
            issue.status_name().unwrap_or("-"),
            issue.summary().unwrap_or("")
        )?;
    }
    Ok(())
}

fn write_sprint<W: Write>(out: &mut W, sprint: &Sprint) -> Result<()> {
    let date = |d: Option<chrono::DateTime<chrono::FixedOffset>>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".into())
    };
    writeln!(
        out,
        "{}\t{}\t{}\t{}..{}",
        sprint.id,
        sprint.state,
        sprint.name,
        date(sprint.start_date),
        date(sprint.end_date)
    )?;
    Ok(())
}

pub fn print_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "agile: query boards, sprints and backlogs\n")?;
    writeln!(out, "USAGE:")?;
    writeln!(out, "  agile boards                    List boards")?;
    writeln!(out, "  agile backlog <board>           Backlog issues of a board")?;
    writeln!(out, "  agile issues <board>            Issues on a board (full form)")?;
    writeln!(out, "  agile sprints <board>           Sprints of a board")?;
    writeln!(out, "  agile sprint <sprint>           A single sprint")?;
    writeln!(out, "  agile sprint-issues <sprint>    Issues in a sprint")?;
    writeln!(out, "  agile projects <board> [--full] Projects tied to a board")?;
    writeln!(out)?;
    writeln!(out, "PAGING (issues, sprints, sprint-issues, projects):")?;
    writeln!(out, "  --start-at <n>      Offset of the first result")?;
    writeln!(out, "  --max-results <n>   Page size")?;
    writeln!(out, "  --param <k=v>       Extra query parameter, sent as is")?;
    writeln!(out)?;
    writeln!(out, "  --json              Print results as JSON")?;
    Ok(())
}
