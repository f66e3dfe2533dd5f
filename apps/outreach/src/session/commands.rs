//! Shell command parsing.

use crate::store::profile_store::ProfileField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    Search(Option<String>),
    Jobs,
    Draft(usize),
    Subject(String),
    /// Starts multi-line body entry, terminated by a line holding a single `.`.
    Body,
    Show,
    Send,
    Discard,
    History,
    View(usize),
    Profile,
    Set(ProfileField, String),
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
Commands:
  home                    dashboard
  search [location]       discover jobs (defaults to the last location)
  jobs                    list discovered jobs
  draft <n>               draft an email for job n
  subject <text>          replace the draft subject
  body                    replace the draft body (end with a line containing only '.')
  show                    show the open draft
  send                    open the draft in Gmail and record the application
  discard                 close the draft without sending
  history                 list sent applications
  view <n>                show the email sent for application n
  profile                 show your profile
  set <field> <value>     edit a profile field (name, email, resume, years, summary,
                          skills, tools, domains; lists are comma-separated)
  help                    this text
  quit                    exit";

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "home" | "dashboard" => Command::Home,
            "search" | "find" => Command::Search((!rest.is_empty()).then(|| rest.to_string())),
            "jobs" => Command::Jobs,
            "draft" | "apply" => Command::Draft(parse_number(word, rest)?),
            "subject" => {
                if rest.is_empty() {
                    return Err("usage: subject <text>".to_string());
                }
                Command::Subject(rest.to_string())
            }
            "body" => Command::Body,
            "show" => Command::Show,
            "send" | "confirm" => Command::Send,
            "discard" | "cancel" => Command::Discard,
            "history" => Command::History,
            "view" => Command::View(parse_number(word, rest)?),
            "profile" => Command::Profile,
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                let field = ProfileField::parse(field).ok_or_else(|| {
                    let known: Vec<_> = ProfileField::ALL.iter().map(|f| f.as_str()).collect();
                    format!(
                        "unknown profile field '{field}', expected one of: {}",
                        known.join(", ")
                    )
                })?;
                Command::Set(field, value.to_string())
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("unknown command '{other}', try 'help'")),
        };

        Ok(command)
    }
}

fn parse_number(word: &str, rest: &str) -> Result<usize, String> {
    rest.parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("usage: {word} <number>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_with_and_without_location() {
        assert_eq!(Command::parse("search"), Ok(Command::Search(None)));
        assert_eq!(
            Command::parse("  search   Chennai, India "),
            Ok(Command::Search(Some("Chennai, India".to_string())))
        );
    }

    #[test]
    fn test_numbered_commands() {
        assert_eq!(Command::parse("draft 3"), Ok(Command::Draft(3)));
        assert_eq!(Command::parse("VIEW 1"), Ok(Command::View(1)));
        assert!(Command::parse("draft").is_err());
        assert!(Command::parse("draft 0").is_err());
        assert!(Command::parse("view two").is_err());
    }

    #[test]
    fn test_subject_keeps_inner_spacing() {
        assert_eq!(
            Command::parse("subject QA Lead  -  application"),
            Ok(Command::Subject("QA Lead  -  application".to_string()))
        );
        assert!(Command::parse("subject").is_err());
    }

    #[test]
    fn test_set_profile_field() {
        assert_eq!(
            Command::parse("set years 9"),
            Ok(Command::Set(ProfileField::Years, "9".to_string()))
        );
        assert_eq!(
            Command::parse("set resume"),
            Ok(Command::Set(ProfileField::ResumeLink, String::new()))
        );
        assert_eq!(
            Command::parse("set skills Test Planning, UAT"),
            Ok(Command::Set(
                ProfileField::Skills,
                "Test Planning, UAT".to_string()
            ))
        );
        assert!(Command::parse("set salary 100").is_err());
    }

    #[test]
    fn test_empty_and_unknown() {
        assert_eq!(Command::parse("   "), Ok(Command::Empty));
        assert!(Command::parse("launch").unwrap_err().contains("launch"));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
    }
}
