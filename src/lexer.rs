use crate::error::Span;

/// A space-delimited piece of a rule string.
///
/// Tokens borrow from the input. Splitting is on single spaces, so doubled
/// or trailing spaces produce empty tokens rather than being skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str, span: Span) -> Self {
        Self { text, span }
    }

    /// Split a list parameter (`1,3,7`) into its comma-separated items.
    pub fn items(&self) -> impl Iterator<Item = Token<'a>> + 'a {
        let base = self.span.start;
        let text = self.text;
        let mut offset = 0;
        text.split(',').map(move |item| {
            let start = base + offset;
            offset += item.len() + 1;
            Token::new(item, Span::new(start, start + item.len()))
        })
    }
}

/// Split a rule string into tokens. Always yields at least one token.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    for piece in input.split(' ') {
        tokens.push(Token::new(piece, Span::new(pos, pos + piece.len())));
        pos += piece.len() + 1;
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
        tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_monthly_with_months() {
        let tokens = tokenize("m -1,15 1,6");
        assert_eq!(texts(&tokens), ["m", "-1,15", "1,6"]);
        assert_eq!(tokens[1].span, Span::new(2, 7));
        assert_eq!(tokens[2].span, Span::new(8, 11));
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "");
        assert_eq!(tokens[0].span, Span::new(0, 0));
    }

    #[test]
    fn test_double_space_keeps_empty_token() {
        let tokens = tokenize("d  5");
        assert_eq!(texts(&tokens), ["d", "", "5"]);
        assert_eq!(tokens[2].span, Span::new(3, 4));
    }

    #[test]
    fn test_items_spans() {
        let tokens = tokenize("w 1,3,7");
        let items: Vec<_> = tokens[1].items().collect();
        assert_eq!(texts(&items), ["1", "3", "7"]);
        assert_eq!(items[0].span, Span::new(2, 3));
        assert_eq!(items[1].span, Span::new(4, 5));
        assert_eq!(items[2].span, Span::new(6, 7));
    }

    #[test]
    fn test_items_with_empty_entry() {
        let tokens = tokenize("w 1,,3");
        let items: Vec<_> = tokens[1].items().collect();
        assert_eq!(texts(&items), ["1", "", "3"]);
        assert_eq!(items[1].span, Span::new(4, 4));
    }
}
