use std::path::PathBuf;

use flexi_core::View;

pub const HELP: &str = "\
Commands:
  spam | toxicity | image   switch panel
  input <text>              replace the panel input (rest of line, verbatim)
  load <path>               base64-encode a file into the panel input
  submit                    send the input to the panel's API
  show                      redraw the current panel
  help                      this list
  quit | exit               leave";

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(View),
    Input(String),
    Load(PathBuf),
    Submit,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

/// Parses a prompt line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, Some(rest)),
        None => (line, None),
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "spam" => Command::Select(View::Spam),
        "toxicity" => Command::Select(View::Toxicity),
        "image" => Command::Select(View::ImageDetection),
        // The separator is consumed; everything after it is the input.
        "input" => Command::Input(rest.unwrap_or_default().to_string()),
        "load" => match rest.map(str::trim).filter(|path| !path.is_empty()) {
            Some(path) => Command::Load(PathBuf::from(path)),
            None => return Err(CommandError::MissingArgument("load")),
        },
        "submit" => Command::Submit,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   \t"), Ok(None));
    }

    #[test]
    fn view_keywords_select_panels() {
        assert_eq!(
            parse_command("spam"),
            Ok(Some(Command::Select(View::Spam)))
        );
        assert_eq!(
            parse_command("  Toxicity "),
            Ok(Some(Command::Select(View::Toxicity)))
        );
        assert_eq!(
            parse_command("IMAGE"),
            Ok(Some(Command::Select(View::ImageDetection)))
        );
    }

    #[test]
    fn input_keeps_rest_of_line_verbatim() {
        assert_eq!(
            parse_command("input  two spaces kept, trailing too "),
            Ok(Some(Command::Input(
                " two spaces kept, trailing too ".to_string()
            )))
        );
        assert_eq!(
            parse_command("input"),
            Ok(Some(Command::Input(String::new())))
        );
    }

    #[test]
    fn load_requires_a_path() {
        assert_eq!(
            parse_command("load ./cat.jpg"),
            Ok(Some(Command::Load(PathBuf::from("./cat.jpg"))))
        );
        assert_eq!(
            parse_command("load   "),
            Err(CommandError::MissingArgument("load"))
        );
    }

    #[test]
    fn unknown_keyword_is_reported() {
        assert_eq!(
            parse_command("frobnicate now"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }
}
