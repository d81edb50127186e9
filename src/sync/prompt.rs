use std::io::{self, BufRead, Write};

use crate::sync::plan;
use crate::tfe::Variable;

const REDACTED: &str = "[REDACTED]";

/// Controls how much of each planned variable is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub verbose: bool,
    pub show_secrets: bool,
}

/// Asks the operator a question and returns the raw answer.
pub trait Prompter {
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Prompts on stdout and reads one line from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(question.as_bytes())?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer)
    }
}

/// Only `y` and `yes`, in any case, count as consent.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Line telling the operator that several planned variables share a key.
pub fn duplicate_warning(variables: &[Variable]) -> Option<String> {
    let duplicates = plan::duplicate_keys(variables);
    if duplicates.is_empty() {
        return None;
    }
    Some(format!(
        "Warning: {} planned more than once; each write targets the same variable.\n",
        duplicates.join(", ")
    ))
}

fn render_line(var: &Variable, options: RenderOptions) -> String {
    let action = if var.exists() { "Update" } else { "Create" };
    let mut line = format!("{action} {} {}", var.category, var.key);
    if options.verbose {
        let value = if var.sensitive && !options.show_secrets {
            REDACTED
        } else {
            var.value.as_str()
        };
        line.push_str(&format!(" = {value}"));
    }
    line.push('\n');
    line
}

/// Describe the pending operations and end with the confirmation question.
pub fn render_plan(
    organization: &str,
    workspace: &str,
    variables: &[Variable],
    options: RenderOptions,
) -> String {
    let mut msg = format!(
        "The following operations will be applied to the '{workspace}' workspace \
         in the '{organization}' organization:\n"
    );

    for var in variables {
        msg.push_str(&render_line(var, options));
    }

    if let Some(warning) = duplicate_warning(variables) {
        msg.push('\n');
        msg.push_str(&warning);
    }

    msg.push_str("\nConfirm? [y/N]: ");
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfe::Category;

    fn plan() -> Vec<Variable> {
        let mut existing = Variable::new("AWS_ACCESS_KEY_ID", "AKIA123", Category::Env);
        existing.id = Some("var-1".to_string());
        vec![
            existing,
            Variable::new("AWS_SESSION_TOKEN", "tok", Category::Env).with_sensitive(true),
        ]
    }

    #[test]
    fn test_is_confirmation() {
        for yes in ["y", "Y", "yes", "YES", "Yes\n", " y "] {
            assert!(is_confirmation(yes), "{yes:?}");
        }
        for no in ["", "n", "no", "N", "yep", "sure", "y y"] {
            assert!(!is_confirmation(no), "{no:?}");
        }
    }

    #[test]
    fn test_render_plan_default() {
        let msg = render_plan("acme", "network", &plan(), RenderOptions::default());
        assert_eq!(
            msg,
            "The following operations will be applied to the 'network' workspace in the \
             'acme' organization:\n\
             Update env AWS_ACCESS_KEY_ID\n\
             Create env AWS_SESSION_TOKEN\n\
             \nConfirm? [y/N]: "
        );
    }

    #[test]
    fn test_render_plan_verbose_masks_sensitive() {
        let options = RenderOptions {
            verbose: true,
            show_secrets: false,
        };
        let msg = render_plan("acme", "network", &plan(), options);
        assert!(msg.contains("Update env AWS_ACCESS_KEY_ID = AKIA123\n"));
        assert!(msg.contains("Create env AWS_SESSION_TOKEN = [REDACTED]\n"));
    }

    #[test]
    fn test_render_plan_show_secrets() {
        let options = RenderOptions {
            verbose: true,
            show_secrets: true,
        };
        let msg = render_plan("acme", "network", &plan(), options);
        assert!(msg.contains("Create env AWS_SESSION_TOKEN = tok\n"));
        assert!(!msg.contains(REDACTED));
    }

    #[test]
    fn test_render_plan_warns_about_shared_keys() {
        let vars = vec![
            Variable::new("aws_commercial_access_key", "AKIA", Category::Terraform),
            Variable::new("aws_commercial_access_key", "secret", Category::Terraform)
                .with_sensitive(true),
        ];
        let msg = render_plan("acme", "network", &vars, RenderOptions::default());
        assert!(msg.contains(
            "\nWarning: aws_commercial_access_key planned more than once; \
             each write targets the same variable.\n\nConfirm? [y/N]: "
        ));
        assert!(duplicate_warning(&plan()).is_none());
    }

    #[test]
    fn test_show_secrets_without_verbose_shows_nothing() {
        let options = RenderOptions {
            verbose: false,
            show_secrets: true,
        };
        let msg = render_plan("acme", "network", &plan(), options);
        assert!(!msg.contains(" = "));
    }
}
