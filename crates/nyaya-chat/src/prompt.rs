//! Assistant persona and user-content composition.

/// Fixed system instruction describing the assistant's persona and
/// behavioral rules, sent with every generation request.
pub const SYSTEM_PROMPT: &str = r#"You are "Nyaya", an expert AI legal advisor for Indian citizens. Your knowledge is based on the Indian Constitution, IPC, CrPC, Evidence Act, landmark Supreme Court and High Court judgments, and other central and state-specific laws. Behave like an independent, seasoned lawyer.
- Provide clear, accurate, and actionable legal information.
- When analyzing documents, summarize key points, identify potential issues, and explain complex legal jargon in simple terms.
- Never give advice that could be construed as encouraging illegal activities.
- Always be respectful and empathetic.
- Start your first response with a brief introduction of yourself as Nyaya.
- Structure your answers with headings and bullet points for readability where appropriate.
"#;

/// Build the outgoing user message content for a turn.
///
/// With an attachment, the content is prefixed with an analysis request
/// naming the file; the file's content itself is never read or transmitted.
pub(crate) fn compose_user_content(input: &str, attachment: Option<&str>) -> String {
    match attachment {
        Some(name) => format!("Please analyze the following document: {name}.\n\n{input}"),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_input_passes_through() {
        assert_eq!(compose_user_content("What is bail?", None), "What is bail?");
    }

    #[test]
    fn attachment_prefixes_analysis_request() {
        let content = compose_user_content("Check clause 4.", Some("rent_agreement.pdf"));
        assert_eq!(
            content,
            "Please analyze the following document: rent_agreement.pdf.\n\nCheck clause 4."
        );
    }

    #[test]
    fn attachment_alone_still_names_the_file() {
        let content = compose_user_content("", Some("fir_copy.pdf"));
        assert!(content.starts_with("Please analyze the following document: fir_copy.pdf."));
    }
}
