//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};
use textwrap::{Options, termwidth};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn gm_style(&self) -> ColoredString;
    fn player_style(&self) -> ColoredString;
    fn system_style(&self) -> ColoredString;
    fn success_style(&self) -> ColoredString;
    fn failure_style(&self) -> ColoredString;
    fn info_style(&self) -> ColoredString;
    fn hp_style(&self) -> ColoredString;
    fn mp_style(&self) -> ColoredString;
    fn gold_style(&self) -> ColoredString;
    fn boss_style(&self) -> ColoredString;
    fn dice_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn section_style(&self) -> ColoredString;
    fn fog_style(&self) -> ColoredString;
    fn visited_style(&self) -> ColoredString;
    fn revealed_style(&self) -> ColoredString;
    fn here_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn section_style(&self) -> ColoredString {
        let bracketed = format!("[{self}]");
        bracketed.truecolor(75, 80, 75)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn gm_style(&self) -> ColoredString {
        self.italic().truecolor(102, 208, 250)
    }
    fn player_style(&self) -> ColoredString {
        self.truecolor(220, 220, 220)
    }
    fn system_style(&self) -> ColoredString {
        self.italic().truecolor(150, 150, 150)
    }
    fn success_style(&self) -> ColoredString {
        self.truecolor(110, 220, 110)
    }
    fn failure_style(&self) -> ColoredString {
        self.truecolor(230, 80, 80)
    }
    fn info_style(&self) -> ColoredString {
        self.truecolor(230, 230, 30)
    }
    fn hp_style(&self) -> ColoredString {
        self.bold().truecolor(230, 60, 60)
    }
    fn mp_style(&self) -> ColoredString {
        self.bold().truecolor(75, 140, 255)
    }
    fn gold_style(&self) -> ColoredString {
        self.bold().truecolor(220, 180, 40)
    }
    fn boss_style(&self) -> ColoredString {
        self.bold().truecolor(200, 40, 200)
    }
    fn dice_style(&self) -> ColoredString {
        self.bold().truecolor(250, 250, 250).on_truecolor(60, 60, 90)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10)
    }
    fn fog_style(&self) -> ColoredString {
        self.truecolor(60, 60, 60)
    }
    fn visited_style(&self) -> ColoredString {
        self.truecolor(150, 150, 150)
    }
    fn revealed_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn here_style(&self) -> ColoredString {
        self.bold().truecolor(110, 220, 110)
    }
}

impl GameStyle for String {
    fn section_style(&self) -> ColoredString {
        self.as_str().section_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
    fn gm_style(&self) -> ColoredString {
        self.as_str().gm_style()
    }
    fn player_style(&self) -> ColoredString {
        self.as_str().player_style()
    }
    fn system_style(&self) -> ColoredString {
        self.as_str().system_style()
    }
    fn success_style(&self) -> ColoredString {
        self.as_str().success_style()
    }
    fn failure_style(&self) -> ColoredString {
        self.as_str().failure_style()
    }
    fn info_style(&self) -> ColoredString {
        self.as_str().info_style()
    }
    fn hp_style(&self) -> ColoredString {
        self.as_str().hp_style()
    }
    fn mp_style(&self) -> ColoredString {
        self.as_str().mp_style()
    }
    fn gold_style(&self) -> ColoredString {
        self.as_str().gold_style()
    }
    fn boss_style(&self) -> ColoredString {
        self.as_str().boss_style()
    }
    fn dice_style(&self) -> ColoredString {
        self.as_str().dice_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn fog_style(&self) -> ColoredString {
        self.as_str().fog_style()
    }
    fn visited_style(&self) -> ColoredString {
        self.as_str().visited_style()
    }
    fn revealed_style(&self) -> ColoredString {
        self.as_str().revealed_style()
    }
    fn here_style(&self) -> ColoredString {
        self.as_str().here_style()
    }
}

/// Wrap options for ordinary message text.
pub fn normal_block() -> Options<'static> {
    Options::new(termwidth().min(100)).subsequent_indent("    ")
}
