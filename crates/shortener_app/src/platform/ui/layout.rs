use super::constants::*;

/// Lines printed once when the interactive form opens.
pub fn banner(service_url: &str) -> Vec<String> {
    vec![
        TITLE.to_string(),
        "=".repeat(TITLE.len()),
        format!("Service: {service_url}"),
        INPUT_HINT.to_string(),
        QUIT_HINT.to_string(),
        String::new(),
    ]
}
