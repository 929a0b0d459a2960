use crate::session::ActiveTab;

/// One parsed console line. `Input` is bare text the caller routes to the
/// active tab's field; slash commands map to explicit variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Noop,
    Help,
    Quit,
    Show,
    Title(String),
    Thumbnail(String),
    ClearThumbnail,
    Analyze,
    Adopt(usize),
    Channel(Option<String>),
    Preset(String),
    Tab(ActiveTab),
    Input(String),
    Unknown(String),
}

pub const CONSOLE_HELP: &[&str] = &[
    "/help",
    "/title <text>",
    "/thumb <path>",
    "/clearthumb",
    "/analyze",
    "/adopt <n>",
    "/channel [name]",
    "/preset <label>",
    "/tab optimizer|spy",
    "/show",
    "/quit",
];

/// Stateless line parser for the interactive console. Blank lines are
/// no-ops; text without a leading slash is surfaced as `Input`.
pub fn parse_command(text: &str) -> ConsoleCommand {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ConsoleCommand::Noop;
    }
    let Some(tail) = trimmed.strip_prefix('/') else {
        return ConsoleCommand::Input(trimmed.to_string());
    };

    let command_len = tail
        .chars()
        .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        .count();
    if command_len == 0 {
        return ConsoleCommand::Unknown(trimmed.to_string());
    }
    let command = tail[..command_len].to_ascii_lowercase();
    let arg = tail[command_len..].trim();

    match command.as_str() {
        "help" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        "show" => ConsoleCommand::Show,
        "title" => ConsoleCommand::Title(arg.to_string()),
        "thumb" | "thumbnail" => ConsoleCommand::Thumbnail(parse_path_arg(arg)),
        "clearthumb" => ConsoleCommand::ClearThumbnail,
        "analyze" => ConsoleCommand::Analyze,
        "adopt" => match arg.parse::<usize>() {
            Ok(index) if index >= 1 => ConsoleCommand::Adopt(index),
            _ => ConsoleCommand::Unknown(trimmed.to_string()),
        },
        "channel" | "spy" if arg.is_empty() => ConsoleCommand::Channel(None),
        "channel" | "spy" => ConsoleCommand::Channel(Some(arg.to_string())),
        "preset" => ConsoleCommand::Preset(arg.to_string()),
        "tab" => match arg.to_ascii_lowercase().as_str() {
            "optimizer" => ConsoleCommand::Tab(ActiveTab::Optimizer),
            "spy" | "channel" => ConsoleCommand::Tab(ActiveTab::ChannelSpy),
            _ => ConsoleCommand::Unknown(trimmed.to_string()),
        },
        _ => ConsoleCommand::Unknown(trimmed.to_string()),
    }
}

/// Path arguments may be shell-quoted; a quoting error falls back to the
/// raw text.
fn parse_path_arg(arg: &str) -> String {
    match shell_words::split(arg) {
        Ok(parts) if parts.len() == 1 => parts.into_iter().next().unwrap_or_default(),
        Ok(parts) if !parts.is_empty() => parts.join(" "),
        _ => arg.to_string(),
    }
}
