/// Parsing for the line-oriented navigation shell.
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum NavCommand {
    Go {
        url: String,
        delay: Option<Duration>,
        fail: bool,
    },
    Back,
    Cancel,
    Forward,
    First,
    Clear(Option<String>),
    Status,
    History,
    Help,
    Exit,
    Empty,
    Invalid(String),
}

/// Parse one input line.
/// Supports: "go <url> [--delay <ms>] [--fail]", "back", "cancel", "forward",
/// "first", "clear [url]", "status", "history", "help", "exit"/"quit".
pub fn parse_command(input: &str) -> NavCommand {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some((&head, args)) = parts.split_first() else {
        return NavCommand::Empty;
    };

    match head.to_lowercase().as_str() {
        "go" => parse_go(args),
        "back" => no_args(args, NavCommand::Back),
        "cancel" => no_args(args, NavCommand::Cancel),
        "forward" => no_args(args, NavCommand::Forward),
        "first" => no_args(args, NavCommand::First),
        "clear" => match args {
            [] => NavCommand::Clear(None),
            [url] => NavCommand::Clear(Some(url.to_string())),
            _ => NavCommand::Invalid("Usage: clear [url]".to_string()),
        },
        "status" => no_args(args, NavCommand::Status),
        "history" => no_args(args, NavCommand::History),
        "help" | "?" => NavCommand::Help,
        "exit" | "quit" => NavCommand::Exit,
        other => NavCommand::Invalid(format!("Unknown command: {}", other)),
    }
}

fn no_args(args: &[&str], command: NavCommand) -> NavCommand {
    if args.is_empty() {
        command
    } else {
        NavCommand::Invalid(format!("Unexpected argument: {}", args[0]))
    }
}

fn parse_go(args: &[&str]) -> NavCommand {
    let mut url = None;
    let mut delay = None;
    let mut fail = false;

    let mut iter = args.iter();
    while let Some(&arg) = iter.next() {
        match arg {
            "--fail" => fail = true,
            "--delay" => {
                let Some(ms) = iter.next() else {
                    return NavCommand::Invalid("--delay needs a value in ms".to_string());
                };
                match ms.parse::<u64>() {
                    Ok(ms) => delay = Some(Duration::from_millis(ms)),
                    Err(_) => {
                        return NavCommand::Invalid(format!("Invalid delay: {}", ms));
                    }
                }
            }
            flag if flag.starts_with("--") => {
                return NavCommand::Invalid(format!("Unknown flag: {}", flag));
            }
            value if url.is_none() => url = Some(value.to_string()),
            value => return NavCommand::Invalid(format!("Unexpected argument: {}", value)),
        }
    }

    match url {
        Some(url) => NavCommand::Go { url, delay, fail },
        None => NavCommand::Invalid("Usage: go <url> [--delay <ms>] [--fail]".to_string()),
    }
}
