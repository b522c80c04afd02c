use shortener_core::{FormViewModel, LinkTarget, SuccessBlock};

use super::constants::*;

/// Renders the result area of the form. The input echo is left to the terminal.
pub fn render(view: &FormViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if view.submit.enabled {
        lines.push(format!("[ {} ]", view.submit.label));
    } else {
        lines.push(format!("[ {} ] (waiting for the service)", view.submit.label));
    }

    if let Some(success) = &view.success {
        lines.push(SUCCESS_HEADING.to_string());
        lines.push(format!("  {}", format_link(success)));
    }

    if let Some(error) = &view.error {
        lines.push(format!("{ERROR_PREFIX} {error}"));
    }

    lines
}

fn format_link(link: &SuccessBlock) -> String {
    let target = match link.target {
        LinkTarget::NewContext => "opens in a new window",
    };
    if link.text == link.href {
        format!("{} ({target})", link.href)
    } else {
        format!("{} <{}> ({target})", link.text, link.href)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shortener_core::{update, FormState, Msg, Outcome};

    use super::render;

    fn submitted() -> FormState {
        let (state, _) = update(
            FormState::new(),
            Msg::InputChanged("https://example.com/very/long/path".into()),
        );
        let (state, _) = update(state, Msg::SubmitClicked);
        state
    }

    fn finished(outcome: Outcome) -> FormState {
        let (state, _) = update(
            submitted(),
            Msg::ShortenCompleted {
                request_id: 1,
                outcome,
            },
        );
        state
    }

    #[test]
    fn idle_shows_enabled_button_only() {
        assert_eq!(render(&FormState::new().view()), vec!["[ Shorten URL ]"]);
    }

    #[test]
    fn submitting_shows_busy_label() {
        assert_eq!(
            render(&submitted().view()),
            vec!["[ Shortening... ] (waiting for the service)"]
        );
    }

    #[test]
    fn success_shows_link() {
        let state = finished(Outcome::Shortened {
            short_url: "https://short.ly/abc123".into(),
        });
        assert_eq!(
            render(&state.view()),
            vec![
                "[ Shorten URL ]",
                "Shortened URL:",
                "  https://short.ly/abc123 (opens in a new window)",
            ]
        );
    }

    #[test]
    fn failure_shows_error_line() {
        let state = finished(Outcome::Failed {
            message: "Failed to shorten URL".into(),
        });
        assert_eq!(
            render(&state.view()),
            vec!["[ Shorten URL ]", "Error: Failed to shorten URL"]
        );
    }
}
