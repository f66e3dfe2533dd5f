// Shared prompt fragments.
// Each gateway call defines its own template in gateway/prompts.rs; this file
// holds the cross-cutting pieces appended to all of them.

/// Instruction appended to every prompt that declares a response schema.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with JSON that matches the declared response schema exactly. \
    Do NOT use markdown code fences. \
    Do NOT include any text outside the JSON value.";

/// Instruction forbidding invented facts (contacts, links, credentials).
pub const NO_INVENTION_INSTRUCTION: &str = "\
    CRITICAL: Never invent facts. If a detail cannot be verified from a real source, \
    omit it or leave the field empty instead of guessing.";
