//! Fixed strings sent to the model or shown to the user.

/// Instruction paired with the attachment by `describe`.
pub const DESCRIBE_INSTRUCTION: &str = "Describe this image in detail.";

pub const MISSING_QUESTION: &str = "Please enter a question.";
pub const MISSING_PROMPT: &str = "Please enter a prompt.";
pub const MISSING_ATTACHMENT: &str = "Please upload an image.";
