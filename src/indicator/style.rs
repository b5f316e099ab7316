//! Spinner animation styles.
//!
//! A fixed catalogue of named animations. Configured style names are checked
//! against it once at startup with [`verify_styles`], so a typo fails before
//! any work starts instead of the first time that style is picked.

use std::time::Duration;

use super::error::IndicatorError;

/// A named spinner animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinnerStyle {
    pub name: &'static str,
    pub frames: &'static [&'static str],
    pub interval_ms: u64,
}

impl SpinnerStyle {
    /// Time between two frames.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Frame shown at the given tick.
    pub fn frame(&self, tick: usize) -> &'static str {
        self.frames[tick % self.frames.len()]
    }
}

/// Every style the indicator can render.
pub const CATALOGUE: &[SpinnerStyle] = &[
    SpinnerStyle {
        name: "dots",
        frames: &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
        interval_ms: 80,
    },
    SpinnerStyle {
        name: "line",
        frames: &["-", "\\", "|", "/"],
        interval_ms: 130,
    },
    SpinnerStyle {
        name: "growVertical",
        frames: &["▁", "▃", "▄", "▅", "▆", "▇", "▆", "▅", "▄", "▃"],
        interval_ms: 120,
    },
    SpinnerStyle {
        name: "circleHalves",
        frames: &["◐", "◓", "◑", "◒"],
        interval_ms: 50,
    },
    SpinnerStyle {
        name: "toggle",
        frames: &["⊶", "⊷"],
        interval_ms: 250,
    },
    SpinnerStyle {
        name: "arrow3",
        frames: &["▹▹▹▹▹", "▸▹▹▹▹", "▹▸▹▹▹", "▹▹▸▹▹", "▹▹▹▸▹", "▹▹▹▹▸"],
        interval_ms: 120,
    },
    SpinnerStyle {
        name: "bouncingBar",
        frames: &[
            "[    ]", "[=   ]", "[==  ]", "[=== ]", "[ ===]", "[  ==]", "[   =]", "[    ]",
            "[   =]", "[  ==]", "[ ===]", "[====]", "[=== ]", "[==  ]", "[=   ]",
        ],
        interval_ms: 80,
    },
    SpinnerStyle {
        name: "bouncingBall",
        frames: &[
            "( ●    )", "(  ●   )", "(   ●  )", "(    ● )", "(     ●)", "(    ● )", "(   ●  )",
            "(  ●   )", "( ●    )", "(●     )",
        ],
        interval_ms: 80,
    },
    SpinnerStyle {
        name: "pong",
        frames: &[
            "▐⠂       ▌", "▐⠈       ▌", "▐ ⠂      ▌", "▐ ⠠      ▌", "▐  ⡀     ▌", "▐  ⠠     ▌",
            "▐   ⠂    ▌", "▐   ⠈    ▌", "▐    ⠂   ▌", "▐    ⠠   ▌", "▐     ⡀  ▌", "▐     ⠠  ▌",
            "▐      ⠂ ▌", "▐      ⠈ ▌", "▐       ⠂▌", "▐       ⠠▌", "▐       ⡀▌", "▐      ⠠ ▌",
            "▐      ⠂ ▌", "▐     ⠈  ▌", "▐     ⠂  ▌", "▐    ⠠   ▌", "▐    ⡀   ▌", "▐   ⠠    ▌",
            "▐   ⠂    ▌", "▐  ⠈     ▌", "▐  ⠂     ▌", "▐ ⠠      ▌", "▐ ⡀      ▌", "▐⠠       ▌",
        ],
        interval_ms: 80,
    },
    SpinnerStyle {
        name: "shark",
        frames: &[
            "▐|\\____________▌",
            "▐_|\\___________▌",
            "▐__|\\__________▌",
            "▐___|\\_________▌",
            "▐____|\\________▌",
            "▐_____|\\_______▌",
            "▐______|\\______▌",
            "▐_______|\\_____▌",
            "▐________|\\____▌",
            "▐_________|\\___▌",
            "▐__________|\\__▌",
            "▐___________|\\_▌",
            "▐____________|\\▌",
            "▐____________/|▌",
            "▐___________/|_▌",
            "▐__________/|__▌",
            "▐_________/|___▌",
            "▐________/|____▌",
            "▐_______/|_____▌",
            "▐______/|______▌",
            "▐_____/|_______▌",
            "▐____/|________▌",
            "▐___/|_________▌",
            "▐__/|__________▌",
            "▐_/|___________▌",
            "▐/|____________▌",
        ],
        interval_ms: 120,
    },
    SpinnerStyle {
        name: "weather",
        frames: &[
            "☀️ ", "☀️ ", "☀️ ", "🌤 ", "⛅️ ", "🌥 ", "☁️ ", "🌧 ", "🌨 ", "🌧 ", "🌨 ", "🌧 ", "🌨 ", "⛈ ",
            "🌨 ", "🌧 ", "🌨 ", "☁️ ", "🌥 ", "⛅️ ", "🌤 ", "☀️ ", "☀️ ",
        ],
        interval_ms: 100,
    },
    SpinnerStyle {
        name: "dots12",
        frames: &[
            "⢀⠀", "⡀⠀", "⠄⠀", "⢂⠀", "⡂⠀", "⠅⠀", "⢃⠀", "⡃⠀", "⠍⠀", "⢋⠀", "⡋⠀", "⠍⠁", "⢋⠁", "⡋⠁",
            "⠍⠉", "⠋⠉", "⠋⠉", "⠉⠙", "⠉⠙", "⠉⠩", "⠈⢙", "⠈⡙", "⢈⠩", "⡀⢙", "⠄⡙", "⢂⠩", "⡂⢘", "⠅⡘",
            "⢃⠨", "⡃⢐", "⠍⡐", "⢋⠠", "⡋⢀", "⠍⡁", "⢋⠁", "⡋⠁", "⠍⠉", "⠋⠉", "⠋⠉", "⠉⠙", "⠉⠙", "⠉⠩",
            "⠈⢙", "⠈⡙", "⠈⠩", "⠀⢙", "⠀⡙", "⠀⠩", "⠀⢘", "⠀⡘", "⠀⠨", "⠀⢐", "⠀⡐", "⠀⠠", "⠀⢀", "⠀⡀",
        ],
        interval_ms: 80,
    },
    SpinnerStyle {
        name: "moon",
        frames: &["🌑 ", "🌒 ", "🌓 ", "🌔 ", "🌕 ", "🌖 ", "🌗 ", "🌘 "],
        interval_ms: 80,
    },
];

/// Styles picked from when random selection is enabled and nothing else is
/// configured.
pub const DEFAULT_RANDOM_STYLES: &[&str] = &[
    "dots",
    "line",
    "growVertical",
    "circleHalves",
    "toggle",
    "arrow3",
    "bouncingBar",
    "bouncingBall",
    "pong",
    "shark",
    "weather",
    "dots12",
    "moon",
];

/// Style used when random selection is off.
pub const DEFAULT_STYLE: &str = "dots";

/// Find a style by name.
pub fn find(name: &str) -> Option<&'static SpinnerStyle> {
    CATALOGUE.iter().find(|style| style.name == name)
}

/// Find a style by name, failing with [`IndicatorError::MissingStyle`].
pub fn lookup(name: &str) -> Result<&'static SpinnerStyle, IndicatorError> {
    find(name).ok_or_else(|| IndicatorError::MissingStyle {
        name: name.to_string(),
    })
}

/// Resolve every configured style name against the catalogue.
///
/// Fails on the first name that is not in the catalogue, or when the list
/// is empty.
pub fn verify_styles<S: AsRef<str>>(
    names: &[S],
) -> Result<Vec<&'static SpinnerStyle>, IndicatorError> {
    if names.is_empty() {
        return Err(IndicatorError::NoStyles);
    }
    names.iter().map(|name| lookup(name.as_ref())).collect()
}
