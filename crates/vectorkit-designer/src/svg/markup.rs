//! Minimal tag scanner.
//!
//! Produces the flat list of element tags in a document and checks that
//! they nest properly. Text content, comments, processing instructions,
//! doctype and CDATA sections are skipped.

use vectorkit_core::SvgError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    Open,
    Close,
    SelfClosing,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tag<'a> {
    pub name: &'a str,
    pub kind: TagKind,
    pub attributes: Vec<(&'a str, String)>,
    pub offset: usize,
}

impl Tag<'_> {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Name without any namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(self.name)
    }
}

fn parse_error(offset: usize, reason: impl Into<String>) -> SvgError {
    SvgError::Parse {
        offset,
        reason: reason.into(),
    }
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.src[self.pos..].starts_with(prefix)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Moves past the next `terminator`, failing with `reason` if absent.
    fn skip_past(&mut self, terminator: &str, start: usize, reason: &str) -> Result<(), SvgError> {
        match self.src[self.pos..].find(terminator) {
            Some(i) => {
                self.pos += i + terminator.len();
                Ok(())
            }
            None => Err(parse_error(start, reason)),
        }
    }

    fn name(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b'>' | b'/' | b'=' | b'<'))
        {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    fn next_tag(&mut self) -> Result<Option<Tag<'a>>, SvgError> {
        loop {
            let Some(i) = self.src[self.pos..].find('<') else {
                self.pos = self.src.len();
                return Ok(None);
            };
            self.pos += i;
            let start = self.pos;

            if self.starts_with("<!--") {
                self.skip_past("-->", start, "unterminated comment")?;
            } else if self.starts_with("<![CDATA[") {
                self.skip_past("]]>", start, "unterminated CDATA section")?;
            } else if self.starts_with("<?") {
                self.skip_past("?>", start, "unterminated processing instruction")?;
            } else if self.starts_with("<!") {
                self.skip_past(">", start, "unterminated declaration")?;
            } else if self.starts_with("</") {
                self.pos += 2;
                let name = self.name();
                self.skip_whitespace();
                if self.peek() != Some(b'>') {
                    return Err(parse_error(start, format!("unterminated closing tag </{name}>")));
                }
                self.pos += 1;
                return Ok(Some(Tag {
                    name,
                    kind: TagKind::Close,
                    attributes: Vec::new(),
                    offset: start,
                }));
            } else {
                self.pos += 1;
                return self.open_tag(start).map(Some);
            }
        }
    }

    fn open_tag(&mut self, start: usize) -> Result<Tag<'a>, SvgError> {
        let name = self.name();
        if name.is_empty() {
            return Err(parse_error(start, "missing tag name"));
        }
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(parse_error(start, format!("unterminated tag <{name}>"))),
                Some(b'>') => {
                    self.pos += 1;
                    return Ok(Tag {
                        name,
                        kind: TagKind::Open,
                        attributes,
                        offset: start,
                    });
                }
                Some(b'/') => {
                    if self.bytes.get(self.pos + 1) != Some(&b'>') {
                        return Err(parse_error(self.pos, "expected '>' after '/'"));
                    }
                    self.pos += 2;
                    return Ok(Tag {
                        name,
                        kind: TagKind::SelfClosing,
                        attributes,
                        offset: start,
                    });
                }
                Some(b'<') => {
                    return Err(parse_error(start, format!("unterminated tag <{name}>")));
                }
                Some(_) => attributes.push(self.attribute()?),
            }
        }
    }

    fn attribute(&mut self) -> Result<(&'a str, String), SvgError> {
        let at = self.pos;
        let key = self.name();
        if key.is_empty() {
            return Err(parse_error(at, "expected attribute name"));
        }
        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            return Err(parse_error(self.pos, format!("expected '=' after attribute '{key}'")));
        }
        self.pos += 1;
        self.skip_whitespace();

        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => {
                return Err(parse_error(
                    self.pos,
                    format!("expected quoted value for attribute '{key}'"),
                ))
            }
        };
        let value_start = self.pos + 1;
        let Some(len) = self.bytes[value_start..].iter().position(|&b| b == quote) else {
            return Err(parse_error(at, format!("unterminated value for attribute '{key}'")));
        };
        let value = decode_entities(&self.src[value_start..value_start + len]);
        self.pos = value_start + len + 1;
        Ok((key, value))
    }
}

/// Scans every tag in `src` and verifies that they balance.
pub(crate) fn scan(src: &str) -> Result<Vec<Tag<'_>>, SvgError> {
    let mut scanner = Scanner::new(src);
    let mut tags = Vec::new();
    let mut open: Vec<(&str, usize)> = Vec::new();

    while let Some(tag) = scanner.next_tag()? {
        match tag.kind {
            TagKind::Open => open.push((tag.name, tag.offset)),
            TagKind::Close => match open.pop() {
                Some((name, _)) if name == tag.name => {}
                Some((name, _)) => {
                    return Err(parse_error(
                        tag.offset,
                        format!("expected </{name}>, found </{}>", tag.name),
                    ))
                }
                None => {
                    return Err(parse_error(
                        tag.offset,
                        format!("unexpected closing tag </{}>", tag.name),
                    ))
                }
            },
            TagKind::SelfClosing => {}
        }
        tags.push(tag);
    }

    if let Some((name, offset)) = open.pop() {
        return Err(parse_error(offset, format!("unclosed element <{name}>")));
    }
    Ok(tags)
}
