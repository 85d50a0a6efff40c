//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::BreathError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns `BreathError::Parse` if the generated script is not UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, BreathError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "boxbreath", &mut buf);
    String::from_utf8(buf).map_err(|e| BreathError::Parse(format!("UTF-8 error: {e}")))
}

/// Where to put the generated script.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => "# Add to ~/.bashrc:\nsource <(boxbreath completions bash)\n".to_string(),
        Shell::Zsh => "# Save to your fpath:\nboxbreath completions zsh > ~/.zsh/completions/_boxbreath\n"
            .to_string(),
        Shell::Fish => {
            "# Save to fish completions directory:\nboxbreath completions fish > ~/.config/fish/completions/boxbreath.fish\n"
                .to_string()
        }
        Shell::PowerShell => {
            "# Add to your PowerShell profile ($PROFILE):\nboxbreath completions powershell | Out-String | Invoke-Expression\n"
                .to_string()
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("boxbreath"));
        assert!(script.contains("complete"));
    }

    #[test]
    fn test_generate_fish_completions() {
        let script = generate_completions(Shell::Fish).unwrap();
        assert!(script.contains("-l pace"));
    }

    #[test]
    fn test_completion_instructions() {
        assert!(completion_install_instructions(Shell::Zsh).contains("_boxbreath"));
        assert!(completion_install_instructions(Shell::Elvish).is_empty());
    }
}
