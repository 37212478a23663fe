//! Parsing of input lines into commands.

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the filter text; empty clears it.
    Filter(String),
    ToggleFavorite(String),
    ShowFavorites,
    Refresh,
    Help,
    Quit,
    /// A slash command that could not be understood, with a hint to show.
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  /filter <text>   show assets whose name contains <text> (empty clears)
  /fav <id>        add or remove an asset from favorites
  /favorites       list saved favorites
  /refresh         fetch fresh prices now
  /help            show this help
  /quit            exit
Any other input is used as filter text.";

/// Parse one input line. Filter text keeps its surrounding whitespace; only
/// the line terminator is dropped.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return Command::Filter(line.to_string());
    };

    let (name, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));

    match name.to_lowercase().as_str() {
        "filter" | "f" => Command::Filter(arg.to_string()),
        "fav" | "favorite" => {
            let id = arg.trim();
            if id.is_empty() {
                Command::Invalid("Usage: /fav <id>".to_string())
            } else {
                Command::ToggleFavorite(id.to_string())
            }
        }
        "favorites" | "favs" => Command::ShowFavorites,
        "refresh" | "r" => Command::Refresh,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Invalid(format!("Unknown command /{}. Type /help.", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_filter() {
        assert_eq!(parse_command("bit"), Command::Filter("bit".to_string()));
    }

    #[test]
    fn test_filter_keeps_surrounding_whitespace() {
        assert_eq!(
            parse_command("  Bitcoin Cash \r\n"),
            Command::Filter("  Bitcoin Cash ".to_string())
        );
        assert_eq!(
            parse_command("/filter  coin "),
            Command::Filter(" coin ".to_string())
        );
    }

    #[test]
    fn test_empty_line_clears_filter() {
        assert_eq!(parse_command(""), Command::Filter(String::new()));
        assert_eq!(parse_command("\n"), Command::Filter(String::new()));
        assert_eq!(parse_command("/filter"), Command::Filter(String::new()));
        assert_eq!(parse_command("/filter "), Command::Filter(String::new()));
    }

    #[test]
    fn test_filter_keeps_inner_spaces() {
        assert_eq!(
            parse_command("/filter bitcoin cash"),
            Command::Filter("bitcoin cash".to_string())
        );
    }

    #[test]
    fn test_fav_requires_id() {
        assert_eq!(
            parse_command("/fav bitcoin"),
            Command::ToggleFavorite("bitcoin".to_string())
        );
        assert!(matches!(parse_command("/fav"), Command::Invalid(_)));
    }

    #[test]
    fn test_commands_tolerate_padding() {
        assert_eq!(parse_command("  /refresh  "), Command::Refresh);
        assert_eq!(
            parse_command("/fav   bitcoin  "),
            Command::ToggleFavorite("bitcoin".to_string())
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command("/favorites"), Command::ShowFavorites);
        assert_eq!(parse_command("/refresh"), Command::Refresh);
        assert_eq!(parse_command("/REFRESH"), Command::Refresh);
        assert_eq!(parse_command("/help"), Command::Help);
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert_eq!(parse_command("/q"), Command::Quit);
    }

    #[test]
    fn test_unknown_slash_command() {
        match parse_command("/sort price") {
            Command::Invalid(msg) => assert!(msg.contains("/sort")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
