pub const TITLE: &str = "URL Shortener";
pub const INPUT_HINT: &str = "Paste a URL here and press Enter.";
pub const QUIT_HINT: &str = "Type :quit (or Ctrl-D) to leave.";
pub const QUIT_COMMAND: &str = ":quit";
pub const PROMPT: &str = "> ";
pub const SUCCESS_HEADING: &str = "Shortened URL:";
pub const ERROR_PREFIX: &str = "Error:";
pub const INVALID_INPUT: &str = "Please enter a valid absolute URL, e.g. https://example.com/page";
pub const BUSY: &str = "Still waiting for the previous request; input not submitted.";
