//! Built-in habit templates.
//!
//! A static catalog of popular habits grouped by category, used by the
//! template listing tool and CLI command for quick setup.

/// A pre-made habit suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitTemplate {
    /// Suggested habit name.
    pub name: &'static str,
    /// Suggested description.
    pub description: &'static str,
    /// Suggested frequency.
    pub frequency: &'static str,
}

/// A category of habit templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateCategory {
    /// Category name (lowercase).
    pub category: &'static str,
    /// Templates in this category.
    pub templates: &'static [HabitTemplate],
}

/// The built-in template catalog, in presentation order.
pub const TEMPLATE_CATALOG: &[TemplateCategory] = &[
    TemplateCategory {
        category: "health",
        templates: &[
            HabitTemplate {
                name: "Morning Workout",
                description: "30-minute exercise session",
                frequency: "daily",
            },
            HabitTemplate {
                name: "10k Steps",
                description: "Walk 10,000 steps daily",
                frequency: "daily",
            },
            HabitTemplate {
                name: "8 Hours Sleep",
                description: "Get quality sleep",
                frequency: "daily",
            },
            HabitTemplate {
                name: "Drink Water",
                description: "8 glasses of water",
                frequency: "daily",
            },
        ],
    },
    TemplateCategory {
        category: "productivity",
        templates: &[
            HabitTemplate {
                name: "Deep Work",
                description: "2 hours focused work",
                frequency: "daily",
            },
            HabitTemplate {
                name: "Inbox Zero",
                description: "Clear email inbox",
                frequency: "daily",
            },
            HabitTemplate {
                name: "Weekly Review",
                description: "Plan and review week",
                frequency: "weekly",
            },
            HabitTemplate {
                name: "Learn Something New",
                description: "30 minutes learning",
                frequency: "daily",
            },
        ],
    },
    TemplateCategory {
        category: "mindfulness",
        templates: &[
            HabitTemplate {
                name: "Morning Meditation",
                description: "10-minute meditation",
                frequency: "daily",
            },
            HabitTemplate {
                name: "Gratitude Journal",
                description: "Write 3 things you're grateful for",
                frequency: "daily",
            },
            HabitTemplate {
                name: "Digital Detox",
                description: "1 hour without screens",
                frequency: "daily",
            },
            HabitTemplate {
                name: "Nature Walk",
                description: "15-minute outdoor walk",
                frequency: "daily",
            },
        ],
    },
    TemplateCategory {
        category: "learning",
        templates: &[
            HabitTemplate {
                name: "Read Daily",
                description: "20 pages of a book",
                frequency: "daily",
            },
            HabitTemplate {
                name: "Language Practice",
                description: "15 minutes language learning",
                frequency: "daily",
            },
            HabitTemplate {
                name: "Skill Building",
                description: "Practice a skill",
                frequency: "daily",
            },
            HabitTemplate {
                name: "Listen to Podcast",
                description: "Educational podcast",
                frequency: "daily",
            },
        ],
    },
];
