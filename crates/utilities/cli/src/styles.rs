//! Help colours.

use clap::builder::{Styles, styling::AnsiColor};

/// Styles for the deployer's `--help` and usage errors.
pub const fn help_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().bold().underline())
        .usage(AnsiColor::Cyan.on_default().bold().underline())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Yellow.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}
