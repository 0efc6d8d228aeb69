#[cfg(debug_assertions)]
pub fn get_email_service_id() -> &'static str {
    "service_86b7uka"  // Test inbox used while running locally
}

#[cfg(not(debug_assertions))]
pub fn get_email_service_id() -> &'static str {
    "service_apklcge"  // Production inbox
}

pub fn get_email_template_id() -> &'static str {
    "template_ommunt9"
}

/// Public key handed to `emailjs.init`. EmailJS refuses `sendForm` without one, so release
/// builds need `EMAILJS_PUBLIC_KEY=... trunk build --release` unless the page calls
/// `emailjs.init` itself.
pub fn get_emailjs_public_key() -> Option<&'static str> {
    non_empty(option_env!("EMAILJS_PUBLIC_KEY"))
}

/// Without a site key the bot-check widget is not rendered at all.
pub fn get_recaptcha_site_key() -> Option<&'static str> {
    non_empty(option_env!("RECAPTCHA_SITE_KEY"))
}

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_build_keys_count_as_missing() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(Some("pk_123")), Some("pk_123"));
    }

    #[test]
    fn service_and_template_ids_are_set() {
        assert!(get_email_service_id().starts_with("service_"));
        assert_eq!(get_email_template_id(), "template_ommunt9");
    }
}
