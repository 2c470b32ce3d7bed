//! cliclack theme for local terminal runs

use cliclack::ThemeState;
use console::Style;

/// Purple bar, matching the .NET brand color in 256-color terminals
const BRAND: u8 = 99;

#[derive(Debug, Clone, Default)]
pub struct BuildpackTheme;

impl BuildpackTheme {
    fn color(state: &ThemeState) -> Style {
        match state {
            ThemeState::Error(_) => Style::new().red().bold(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Active | ThemeState::Submit => Style::new().color256(BRAND),
        }
    }
}

impl cliclack::Theme for BuildpackTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        Self::color(state)
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Submit => Style::new().green(),
            other => Self::color(other),
        }
    }
}

pub fn init_theme() {
    cliclack::set_theme(BuildpackTheme);
}
