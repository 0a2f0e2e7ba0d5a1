//! Comment body rendering for the triage bot's user-visible replies.

/// Truncates an error message for embedding into a comment body.
pub fn truncate_for_error(message: &str, max_chars: usize) -> String {
    let trimmed = message.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(max_chars).collect();
    format!("{head}...")
}

pub fn render_help_comment(bot_mention: &str) -> String {
    format!(
        "Hello! Here's what I can do:\n\n\
### Check Command\n\
Run checks on a specific branch:\n\
```\n\
{bot_mention} check --branch=<branch-name> [--command=<command>]\n\
```\n\n\
**Examples:**\n\
- `{bot_mention} check --branch=main`\n\
- `{bot_mention} check --branch=feature/auth --command=npm run test`\n\n\
**Default command:** `docker-compose -f docker-compose.yml build`\n\n\
---\n\n\
### What I Do Automatically\n\
- Add issues & PRs to the project board\n\
- Set board priority from labels (p0, p1, p2, p3)\n\
- Post a triage template for issues labeled \"Triage Needed\""
    )
}

pub fn render_unknown_command_comment(bot_mention: &str) -> String {
    format!(
        "Sorry, I didn't understand that request.\n\n\
Type `{bot_mention} help` to see available commands."
    )
}

pub fn render_check_working_comment(
    branch: &str,
    command: &str,
    requested_by: &str,
    requested_at: &str,
) -> String {
    format!(
        "🔄 **Running check on branch `{branch}`**\n\n\
```bash\n\
{command}\n\
```\n\n\
⏳ Hold tight! This might take a moment...\n\n\
<sub>Triggered by @{requested_by} at {requested_at} UTC</sub>"
    )
}

pub fn render_check_success_comment(
    branch: &str,
    command: &str,
    repo_slug: &str,
    duration_ms: u64,
) -> String {
    format!(
        "✅ **Check run succeeded**\n\n\
**Branch:** `{branch}`\n\
**Command:** `{command}`\n\
**Repository:** `{repo_slug}`\n\
**Duration:** {duration_ms} ms"
    )
}

pub fn render_check_failure_comment(branch: &str, command: &str, error_message: &str) -> String {
    format!(
        "❌ **Check run failed**\n\n\
**Branch:** `{branch}`\n\
**Command:** `{command}`\n\n\
**Error:** `{}`\n\n\
Please check the logs or try again later.",
        truncate_for_error(error_message, 600)
    )
}

pub fn render_check_timeout_comment(branch: &str, command: &str, timeout_ms: u64) -> String {
    format!(
        "⌛ **Check run timed out after {timeout_ms} ms**\n\n\
**Branch:** `{branch}`\n\
**Command:** `{command}`\n\n\
The run exceeded its time ceiling and was abandoned; it may still be \
worth retrying on a quieter branch."
    )
}

pub fn render_dispatch_error_comment(error_message: &str) -> String {
    format!(
        "**Error:** Something went wrong while processing your request.\n\n\
**Details:** `{}`\n\n\
Please try again or contact the maintainers if this persists.",
        truncate_for_error(error_message, 600)
    )
}
