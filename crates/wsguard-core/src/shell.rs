//! Shell wrappers that turn the hand-off line into a real `cd`

use crate::ops::chdir::HANDOFF_PREFIX;

/// Shells `wsguard init` can emit a wrapper for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
}

impl Shell {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "bash" => Some(Shell::Bash),
            "zsh" => Some(Shell::Zsh),
            "fish" => Some(Shell::Fish),
            _ => None,
        }
    }

    /// Guess from a `$SHELL` value, defaulting to bash
    pub fn from_env_value(shell: Option<&str>) -> Self {
        shell
            .and_then(|s| s.rsplit('/').next())
            .and_then(Self::from_name)
            .unwrap_or(Shell::Bash)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
        }
    }

    /// Line to add to the shell's rc file
    pub fn rc_hint(&self) -> &'static str {
        match self {
            Shell::Bash => "eval \"$(wsguard init bash)\"      # ~/.bashrc",
            Shell::Zsh => "eval \"$(wsguard init zsh)\"       # ~/.zshrc",
            Shell::Fish => "wsguard init fish | source       # ~/.config/fish/config.fish",
        }
    }

    /// Wrapper function definition for this shell
    pub fn wrapper(&self) -> String {
        match self {
            Shell::Bash | Shell::Zsh => posix_wrapper(),
            Shell::Fish => fish_wrapper(),
        }
    }
}

fn posix_wrapper() -> String {
    format!(
        r#"# wsguard: cd that refuses to leave the workspace
wcd() {{
    local __ws_out __ws_status __ws_dir
    __ws_out="$(command wcd "$@")"
    __ws_status=$?
    __ws_dir="$(printf '%s\n' "$__ws_out" | sed -n 's/^{prefix}//p' | tail -n 1)"
    printf '%s\n' "$__ws_out" | grep -v '^{prefix}'
    if [ "$__ws_status" -eq 0 ] && [ -n "$__ws_dir" ]; then
        builtin cd -- "$__ws_dir" || return 1
    fi
    return "$__ws_status"
}}
"#,
        prefix = HANDOFF_PREFIX
    )
}

fn fish_wrapper() -> String {
    format!(
        r#"# wsguard: cd that refuses to leave the workspace
function wcd --description 'cd that refuses to leave the workspace'
    set -l __ws_out (command wcd $argv)
    set -l __ws_status $status
    set -l __ws_dir
    for line in $__ws_out
        if string match -q -- '{prefix}*' $line
            set __ws_dir (string replace -- '{prefix}' '' $line)
        else
            echo $line
        end
    end
    if test $__ws_status -eq 0; and test -n "$__ws_dir"
        builtin cd -- $__ws_dir; or return 1
    end
    return $__ws_status
end
"#,
        prefix = HANDOFF_PREFIX
    )
}
