/// Command executed when a `check` invocation omits `--command=`.
pub const DEFAULT_CHECK_COMMAND: &str = "docker-compose -f docker-compose.yml build";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Enumerates supported `TriageCommand` values.
pub enum TriageCommand {
    Check { branch: String, command: String },
    Help,
    Unknown { raw: String },
}

/// Parses free-form comment text into a triage command.
///
/// Help detection runs first: any whitespace-delimited token equal to `help`
/// (ASCII case-insensitive) wins over a check invocation in the same text.
/// Returns `None` when no command is recognized; never fails.
pub fn parse_triage_command(body: &str) -> Option<TriageCommand> {
    if contains_help_token(body) {
        return Some(TriageCommand::Help);
    }
    parse_check_invocation(body)
}

fn contains_help_token(body: &str) -> bool {
    body.split_whitespace()
        .any(|token| token.eq_ignore_ascii_case("help"))
}

/// Matches `check --branch=<token> [--command=<value>]` anywhere in the text.
/// `<value>` extends until the next whitespace-then-`--` flag or end of text.
fn parse_check_invocation(body: &str) -> Option<TriageCommand> {
    let after_check = remainder_after_check_token(body)?;
    let branch_rest = strip_flag_prefix(after_check.trim_start(), "--branch=")?;
    let branch_end = branch_rest
        .find(char::is_whitespace)
        .unwrap_or(branch_rest.len());
    let branch = branch_rest[..branch_end].to_string();
    if branch.is_empty() {
        return None;
    }

    let after_branch = branch_rest[branch_end..].trim_start();
    let command = match strip_flag_prefix(after_branch, "--command=") {
        Some(value) => {
            let trimmed = value[..next_flag_boundary(value)].trim();
            if trimmed.is_empty() {
                DEFAULT_CHECK_COMMAND.to_string()
            } else {
                trimmed.to_string()
            }
        }
        None => DEFAULT_CHECK_COMMAND.to_string(),
    };

    Some(TriageCommand::Check { branch, command })
}

/// Returns the text following the first standalone `check` token, or `None`
/// when the text carries no such token.
fn remainder_after_check_token(body: &str) -> Option<&str> {
    let mut cursor = 0_usize;
    while cursor < body.len() {
        let rest = &body[cursor..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            return None;
        }
        let token_start = cursor + (rest.len() - trimmed.len());
        let token_len = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        if trimmed[..token_len].eq_ignore_ascii_case("check") {
            return Some(&body[token_start + token_len..]);
        }
        cursor = token_start + token_len;
    }
    None
}

fn strip_flag_prefix<'a>(text: &'a str, flag: &str) -> Option<&'a str> {
    let head = text.get(..flag.len())?;
    head.eq_ignore_ascii_case(flag).then(|| &text[flag.len()..])
}

/// Index of the whitespace run that precedes the next `--` flag, or the
/// text length when no further flag follows.
fn next_flag_boundary(value: &str) -> usize {
    for (index, ch) in value.char_indices() {
        if ch.is_whitespace() && value[index..].trim_start().starts_with("--") {
            return index;
        }
    }
    value.len()
}

#[cfg(test)]
mod tests {
    use super::{parse_triage_command, TriageCommand, DEFAULT_CHECK_COMMAND};

    #[test]
    fn unit_parse_check_with_branch_uses_default_command() {
        let parsed = parse_triage_command("@rota-triage-bot check --branch=main").expect("parsed");
        assert_eq!(
            parsed,
            TriageCommand::Check {
                branch: "main".to_string(),
                command: DEFAULT_CHECK_COMMAND.to_string(),
            }
        );
    }

    #[test]
    fn functional_parse_check_captures_explicit_command() {
        let parsed = parse_triage_command(
            "@rota-triage-bot check --branch=feature/test --command=npm run test",
        )
        .expect("parsed");
        assert_eq!(
            parsed,
            TriageCommand::Check {
                branch: "feature/test".to_string(),
                command: "npm run test".to_string(),
            }
        );
    }

    #[test]
    fn functional_parse_help_and_unrecognized_text() {
        assert_eq!(
            parse_triage_command("@rota-triage-bot help"),
            Some(TriageCommand::Help)
        );
        assert_eq!(parse_triage_command("@rota-triage-bot invalid"), None);
        assert_eq!(parse_triage_command(""), None);
    }

    #[test]
    fn integration_help_takes_precedence_over_check() {
        assert_eq!(
            parse_triage_command("help me run check --branch=main"),
            Some(TriageCommand::Help)
        );
    }

    #[test]
    fn integration_command_value_stops_before_next_flag() {
        let parsed = parse_triage_command(
            "check --branch=develop --command=npm run build --verbose-flags ignored",
        )
        .expect("parsed");
        assert_eq!(
            parsed,
            TriageCommand::Check {
                branch: "develop".to_string(),
                command: "npm run build".to_string(),
            }
        );
    }

    #[test]
    fn regression_check_matching_is_case_insensitive() {
        let parsed = parse_triage_command("CHECK --Branch=Release-1").expect("parsed");
        assert_eq!(
            parsed,
            TriageCommand::Check {
                branch: "Release-1".to_string(),
                command: DEFAULT_CHECK_COMMAND.to_string(),
            }
        );
    }

    #[test]
    fn regression_check_without_branch_flag_is_not_a_command() {
        assert_eq!(parse_triage_command("check the weather"), None);
        assert_eq!(parse_triage_command("check --branch="), None);
        assert_eq!(parse_triage_command("recheck --branch=main"), None);
    }

    #[test]
    fn regression_blank_command_value_falls_back_to_default() {
        let parsed =
            parse_triage_command("check --branch=main --command=   ").expect("parsed");
        assert_eq!(
            parsed,
            TriageCommand::Check {
                branch: "main".to_string(),
                command: DEFAULT_CHECK_COMMAND.to_string(),
            }
        );
    }
}
