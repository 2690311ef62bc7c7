use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

/// Writes a completion script for `shell`. Needs neither a token nor the network.
pub fn write<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut out = Vec::new();
        write(shell, &mut out);
        String::from_utf8(out).expect("utf8 script")
    }

    #[test]
    fn bash_script_names_the_binary_and_subcommands() {
        let out = script(Shell::Bash);
        assert!(out.contains("_vt()"), "{out}");
        for subcommand in ["eval", "run", "api", "query", "print"] {
            assert!(out.contains(subcommand), "missing {subcommand}");
        }
    }

    #[test]
    fn every_shell_produces_a_script() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(!script(shell).is_empty(), "{shell}");
        }
    }
}
