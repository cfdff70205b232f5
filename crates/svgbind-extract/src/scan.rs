//! Character cursor shared by the number-list grammars (transform lists,
//! point lists, view boxes).

pub(crate) struct Cursor<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    pub(crate) fn new(src: &'s str) -> Self {
        Self { src, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Skips whitespace and commas.
    pub(crate) fn skip_separators(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace() || c == ',') {
            self.advance();
        }
    }

    /// Consumes an ASCII identifier (`[A-Za-z]+`).
    pub(crate) fn ident(&mut self) -> &'s str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            self.advance();
        }
        &self.src[start..self.pos]
    }

    /// Consumes one number: `[+-]? digits [. digits] [(e|E) [+-]? digits]`.
    ///
    /// Returns `None` and leaves the cursor untouched when no digits follow.
    /// A sign directly after a number starts the next number, so `"10-5"`
    /// scans as `10` then `-5`.
    pub(crate) fn number(&mut self) -> Option<f32> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        let mut end = self.pos;

        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let int_start = end;
        while matches!(bytes.get(end), Some(b) if b.is_ascii_digit()) {
            end += 1;
        }
        let mut digits = end - int_start;
        if bytes.get(end) == Some(&b'.') {
            let frac_start = end + 1;
            let mut frac_end = frac_start;
            while matches!(bytes.get(frac_end), Some(b) if b.is_ascii_digit()) {
                frac_end += 1;
            }
            digits += frac_end - frac_start;
            end = frac_end;
        }
        if digits == 0 {
            return None;
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            let exp_digits_start = exp_end;
            while matches!(bytes.get(exp_end), Some(b) if b.is_ascii_digit()) {
                exp_end += 1;
            }
            if exp_end > exp_digits_start {
                end = exp_end;
            }
        }

        let n = self.src[start..end].parse::<f32>().ok().filter(|n| n.is_finite())?;
        self.pos = end;
        Some(n)
    }

    /// Scans a separator-delimited list of numbers to the end of input.
    ///
    /// On failure returns the offending token and its byte offset.
    pub(crate) fn number_list(&mut self) -> Result<Vec<f32>, (String, usize)> {
        let mut out = Vec::new();
        loop {
            self.skip_separators();
            if self.at_end() {
                return Ok(out);
            }
            match self.number() {
                Some(n) => out.push(n),
                None => {
                    let at = self.pos;
                    let token: String = self
                        .rest()
                        .chars()
                        .take_while(|c| !c.is_whitespace() && *c != ',')
                        .collect();
                    return Err((token, at));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_signed_and_exponent_numbers() {
        let mut c = Cursor::new("-1.5e2 .5 +3");
        assert_eq!(c.number_list().unwrap(), vec![-150.0, 0.5, 3.0]);
    }

    #[test]
    fn minus_splits_adjacent_numbers() {
        let mut c = Cursor::new("10-5");
        assert_eq!(c.number_list().unwrap(), vec![10.0, -5.0]);
    }

    #[test]
    fn reports_bad_token_offset() {
        let mut c = Cursor::new("1, x2");
        assert_eq!(c.number_list().unwrap_err(), ("x2".to_string(), 3));
    }

    #[test]
    fn lone_dot_is_not_a_number() {
        let mut c = Cursor::new(".");
        assert_eq!(c.number(), None);
        assert_eq!(c.pos(), 0);
    }
}
