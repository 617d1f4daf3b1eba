use crate::player::UserCommand;

pub const PROMPT_HELP: &str = "\
start        fetch recommendations and play the first new track
next         skip to another recommendation
like         tell the DJ you like this track
dislike      never play this track again and skip it
pause        pause playback
resume       resume playback
vol <0-100>  set the device volume
ask <text>   ask the DJ for something specific
help         show this list
quit         leave the session";

/// One line read from the session prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptLine {
    Command(UserCommand),
    Help,
    Blank,
}

/// Parses a prompt line. Keywords are case-insensitive, `ask` keeps its text as typed.
pub fn parse_prompt_line(line: &str) -> Result<PromptLine, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(PromptLine::Blank);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_lowercase().as_str() {
        "start" | "play" => UserCommand::Start,
        "next" | "skip" | "n" => UserCommand::Next,
        "like" | "+" => UserCommand::Like,
        "dislike" | "-" => UserCommand::Dislike,
        "pause" => UserCommand::Pause,
        "resume" => UserCommand::Resume,
        "vol" | "volume" => UserCommand::Volume(parse_volume(rest)?),
        "ask" => {
            if rest.is_empty() {
                return Err("Tell the DJ what you want, e.g. `ask something upbeat`".to_string());
            }
            UserCommand::Ask(rest.to_string())
        }
        "help" | "?" => return Ok(PromptLine::Help),
        "quit" | "exit" | "q" => UserCommand::Quit,
        other => return Err(format!("Unknown command `{}`. Type `help`.", other)),
    };

    Ok(PromptLine::Command(command))
}

/// Parses a volume percentage. Values above 100 are capped.
pub fn parse_volume(input: &str) -> Result<u8, String> {
    let input = input.trim().trim_end_matches('%');
    input
        .parse::<u32>()
        .map(|v| v.min(100) as u8)
        .map_err(|_| format!("Invalid volume `{}`, expected 0-100", input))
}
