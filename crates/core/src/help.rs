/// One entry of the control panel help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpTopic {
    pub label: &'static str,
    pub text: &'static str,
}

pub const HELP_TOPICS: &[HelpTopic] = &[
    HelpTopic {
        label: "Cookie",
        text: "Starts a session with the chosen options.",
    },
    HelpTopic {
        label: "Clicker",
        text: "The bot clicks the big cookie on every tick.",
    },
    HelpTopic {
        label: "Buy-Out",
        text: "The bot buys store upgrades on every tick.",
    },
    HelpTopic {
        label: "Ratio",
        text: "Between 0 and 1. Lower values favour cheaper upgrades over expensive ones.",
    },
    HelpTopic {
        label: "Time",
        text: "Session length in whole seconds.",
    },
    HelpTopic {
        label: "Leaderboard",
        text: "Past sessions, sortable by CPS (cookies per second), time or mode.",
    },
    HelpTopic {
        label: "Space",
        text: "During a session, pauses or resumes the automated clicking.",
    },
];

/// Help topics as `label: text` lines.
pub fn help_lines() -> Vec<String> {
    HELP_TOPICS
        .iter()
        .map(|topic| format!("{}: {}", topic.label, topic.text))
        .collect()
}
