//! Formatting helpers shared by the views

/// Prefix a raw amount with a currency symbol
pub fn with_currency_prefix(symbol: &str, amount: &str) -> String {
    format!("{}{}", symbol, amount)
}

/// Remove the first occurrence of the currency symbol from edited input.
/// No numeric validation happens here.
pub fn strip_currency_symbol(symbol: &str, input: &str) -> String {
    if symbol.is_empty() {
        return input.to_string();
    }
    input.replacen(symbol, "", 1)
}

/// Escape text for interpolation into HTML element content or quoted attributes
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_prefix() {
        assert_eq!(with_currency_prefix("$", "1500.25"), "$1500.25");
        assert_eq!(with_currency_prefix("$", ""), "$");
    }

    #[test]
    fn test_strip_currency_symbol() {
        assert_eq!(strip_currency_symbol("$", "$1500"), "1500");
        assert_eq!(strip_currency_symbol("$", "1500"), "1500");
        // only the first symbol goes, matching a single keystroke edit of "$..."
        assert_eq!(strip_currency_symbol("$", "$$12"), "$12");
        assert_eq!(strip_currency_symbol("$", "abc"), "abc");
        assert_eq!(strip_currency_symbol("", "$12"), "$12");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x')</script> & \"q\""),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; &quot;q&quot;"
        );
        assert_eq!(escape_html("12 Main St"), "12 Main St");
    }
}
