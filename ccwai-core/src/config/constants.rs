/// Project layout constants to avoid hardcoding throughout the codebase
pub mod project {
    pub const CONFIG_FILE_NAME: &str = "ccwai.config.json";
    pub const COMMANDS_DIR: &str = "commands";
    pub const AGENTS_DIR: &str = "agents";
    pub const THOUGHTS_DIR: &[&str] = &["thoughts", "shared", "extension"];

    /// Extension shared by command and agent files
    pub const TEMPLATE_EXTENSION: &str = "md";
}

/// Frontmatter markers
pub mod frontmatter {
    pub const DELIMITER: &str = "---";
}

/// Headings used when assembling the final prompt
pub mod prompt_sections {
    pub const PERSONA: &str = "# Agent Persona";
    pub const METADATA: &str = "# Command Metadata";
    pub const TEMPLATE: &str = "# Template";
    pub const USER_INPUT: &str = "# User Input";
}

/// Provider names understood out of the box
pub mod providers {
    pub const OPENAI: &str = "openai";
    pub const GEMINI: &str = "gemini";
    pub const DEEPSEEK: &str = "deepseek";
}

/// Default model per provider dialect
pub mod models {
    pub mod openai {
        pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
    }

    pub mod google {
        pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
    }

    pub mod deepseek {
        pub const DEFAULT_MODEL: &str = "deepseek-chat";
    }
}

pub mod urls {
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const DEEPSEEK_API_BASE: &str = "https://api.deepseek.com/v1";
}

/// Environment variables holding API keys for the built-in providers
pub mod env_vars {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    pub const DEEPSEEK_API_KEY: &str = "DEEPSEEK_API_KEY";
}

pub mod message_roles {
    pub const USER: &str = "user";
}

/// Response handling
pub mod responses {
    /// Returned when a provider answers successfully but without the expected text field
    pub const NO_RESPONSE: &str = "No response.";
}

pub mod timeouts {
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
}
