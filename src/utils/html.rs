/// Clean user-submitted HTML using the ammonia library.
///
/// Whitelist-based: safe tags (like <b>, <p>) survive while <script>,
/// <iframe> and event-handler attributes are stripped. Plain text passes
/// through with `<`, `>` and `&` entity-encoded.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scripts() {
        let cleaned = clean_html("Nice quiz<script>alert(1)</script>");
        assert_eq!(cleaned, "Nice quiz");
    }

    #[test]
    fn keeps_plain_text() {
        assert_eq!(clean_html("Rule 8:3 is unclear"), "Rule 8:3 is unclear");
    }

    #[test]
    fn plain_text_is_stored_entity_encoded() {
        assert_eq!(clean_html("a < b & c"), "a &lt; b &amp; c");
    }
}
