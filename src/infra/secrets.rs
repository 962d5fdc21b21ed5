use std::panic;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_MARKERS: [&str; 6] = [
    "password", "token", "secret", "authorization", "apikey", "otp",
];

/// Scrubs credential-looking fragments from free text before it reaches
/// stderr. Digit runs are treated as secrets too: recipient phone numbers
/// must not leak through panic output.
pub fn redact_text(input: &str) -> String {
    input
        .split_whitespace()
        .map(redact_chunk)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn install_panic_redaction_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic payload omitted".to_owned());

        let scrubbed = redact_text(&payload);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "rsms panic: {} at {}:{}:{}",
                scrubbed,
                location.file(),
                location.line(),
                location.column()
            );
        } else {
            eprintln!("rsms panic: {}", scrubbed);
        }
    }));
}

fn redact_chunk(chunk: &str) -> String {
    let lowered = chunk.to_ascii_lowercase();
    if SENSITIVE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
        || looks_like_secret_value(chunk)
    {
        REDACTED.to_owned()
    } else {
        chunk.to_owned()
    }
}

fn looks_like_secret_value(value: &str) -> bool {
    let cleaned = value.trim_matches(|ch: char| !ch.is_ascii_alphanumeric());

    let has_mixed = cleaned.chars().any(|ch| ch.is_ascii_alphabetic())
        && cleaned.chars().any(|ch| ch.is_ascii_digit());

    cleaned.len() >= 6 && (cleaned.chars().all(|ch| ch.is_ascii_digit()) || has_mixed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_text_scrubs_sensitive_fragments() {
        let input = "login password=superSecret99 token=abc123def";
        let output = redact_text(input);

        assert!(!output.contains("superSecret99"));
        assert!(!output.contains("abc123def"));
        assert!(output.contains("[REDACTED]"));
    }

    #[test]
    fn redact_text_scrubs_phone_number_digit_runs() {
        let output = redact_text("send to 01012345678 failed");

        assert!(!output.contains("01012345678"));
        assert!(output.contains("[REDACTED]"));
    }

    #[test]
    fn redact_text_keeps_short_plain_words() {
        assert_eq!(redact_text("send to EG done"), "send to EG done");
    }
}
