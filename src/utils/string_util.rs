pub trait StripCodeFence {
    fn strip_code_fence(&self) -> &str;
}

impl StripCodeFence for str {
    /// Models often wrap JSON replies in a Markdown fence, with or without an
    /// info string. Returns the inner text, or the trimmed input when no
    /// complete fence is present.
    fn strip_code_fence(&self) -> &str {
        let trimmed = self.trim();
        let Some(rest) = trimmed.strip_prefix("```") else {
            return trimmed;
        };
        let Some((_, body)) = rest.split_once('\n') else {
            return trimmed;
        };
        match body.trim_end().strip_suffix("```") {
            Some(inner) => inner.trim(),
            None => trimmed,
        }
    }
}
