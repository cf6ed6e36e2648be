//! Built-in category table, used when the config file declares no categories.

use super::Category;

struct Builtin {
    name: &'static str,
    keywords: &'static [&'static str],
    files: &'static [&'static str],
    weight: f64,
    description: &'static str,
}

const BUILTIN_CATEGORIES: &[Builtin] = &[
    Builtin {
        name: "stripe",
        keywords: &[
            "stripe",
            "payment",
            "billing",
            "subscription",
            "checkout",
            "price",
            "customer",
            "invoice",
            "radar",
        ],
        files: &[
            ".claude/archive/CLAUDE-ENTERPRISE.md",
            ".claude/archive/subscriptions.md",
        ],
        weight: 1.0,
        description: "Stripe payment integration, pricing, subscriptions",
    },
    Builtin {
        name: "chatbot",
        keywords: &[
            "chat",
            "bot",
            "ai",
            "knowledge",
            "semantic",
            "crawler",
            "embeddings",
            "anthropic",
            "claude",
            "conversation",
        ],
        files: &[
            ".claude/archive/IMPLIMENT-BOT.md",
            ".claude/archive/semantic-search.md",
        ],
        weight: 1.0,
        description: "AI chat bot with knowledge base and semantic search",
    },
    Builtin {
        name: "architecture",
        keywords: &[
            "architecture",
            "design",
            "system",
            "structure",
            "diagram",
            "overview",
            "components",
            "flow",
        ],
        files: &[".claude/archive/ARCHITECTURE.md"],
        weight: 0.8,
        description: "System architecture and design patterns",
    },
    Builtin {
        name: "database",
        keywords: &[
            "database",
            "prisma",
            "postgresql",
            "pgvector",
            "migration",
            "schema",
            "model",
            "relation",
        ],
        files: &[".claude/archive/products-schema.md"],
        weight: 0.9,
        description: "Database schema and Prisma models",
    },
    Builtin {
        name: "auth",
        keywords: &[
            "auth",
            "clerk",
            "oauth",
            "login",
            "session",
            "jwt",
            "authentication",
            "authorization",
        ],
        files: &[".claude/archive/auth-patterns.md"],
        weight: 0.9,
        description: "Authentication patterns with Clerk",
    },
    Builtin {
        name: "skills",
        keywords: &[
            "skill",
            "workflow",
            "guide",
            "template",
            "pattern",
            "best practice",
        ],
        files: &[".claude/archive/Skills.md"],
        weight: 0.7,
        description: "Claude Code Skills and workflow patterns",
    },
    Builtin {
        name: "optimization",
        keywords: &[
            "performance",
            "lighthouse",
            "optimization",
            "speed",
            "bundle",
            "vitals",
        ],
        files: &[".claude/archive/OPTIMIZATION-SUMMARY.md"],
        weight: 0.8,
        description: "Performance optimization guidelines",
    },
];

/// The built-in categories in declaration order.
pub fn builtin_categories() -> Vec<Category> {
    BUILTIN_CATEGORIES
        .iter()
        .map(|b| Category {
            name: b.name.to_string(),
            keywords: b.keywords.iter().map(|k| k.to_string()).collect(),
            weight: b.weight,
            files: b.files.iter().map(|f| f.to_string()).collect(),
            description: b.description.to_string(),
        })
        .collect()
}
