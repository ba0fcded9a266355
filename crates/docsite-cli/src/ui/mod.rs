//! Terminal output helpers.
//!
//! Status lines go to stderr. Stdout is reserved for command results.
//!
//! ```no_run
//! use docsite_cli::ui;
//!
//! ui::init_colors();
//! ui::success("Injected module info");
//! ui::warning("No entry for fr-FR");
//! ```

mod format;
mod messages;

pub use format::{format_size, print_inject_summary};
pub use messages::{error, info, success, warning};

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors follow whether stderr
/// is a terminal.
pub fn should_use_color() -> bool {
    color_choice(
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var_os("FORCE_COLOR").is_some(),
        console::user_attended_stderr(),
    )
}

fn color_choice(no_color: bool, force_color: bool, attended: bool) -> bool {
    if no_color {
        return false;
    }
    force_color || attended
}

/// Initialize color support based on environment.
///
/// `owo-colors` already honors terminal capabilities; this keeps `console`'s
/// stderr styling in line with the same decision.
pub fn init_colors() {
    console::set_colors_enabled_stderr(should_use_color());
}
