use thiserror::Error;

/// Errors raised while compiling a body text template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{0}}}' (expected {{i}} or {{title}})")]
    UnknownPlaceholder(String),
    #[error("unsupported format spec '{spec}' for {{{name}}}")]
    InvalidFormatSpec { name: String, spec: String },
    #[error("unclosed '{{' at byte {0}")]
    Unclosed(usize),
    #[error("single '}}' at byte {0} (use '}}}}' for a literal brace)")]
    StrayClose(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    /// Padding goes between the sign and the digits.
    AfterSign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Negative,
    Always,
    Space,
}

/// `[[fill]align][sign][0][width][type]` applied to one placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatSpec {
    fill: Option<char>,
    align: Option<Align>,
    sign: Sign,
    zero: bool,
    width: usize,
}

impl FormatSpec {
    const PLAIN: FormatSpec = FormatSpec {
        fill: None,
        align: None,
        sign: Sign::Negative,
        zero: false,
        width: 0,
    };

    fn parse(name: &str, spec: &str, numeric: bool) -> Result<Self, TemplateError> {
        let invalid = || TemplateError::InvalidFormatSpec {
            name: name.to_string(),
            spec: spec.to_string(),
        };
        let chars: Vec<char> = spec.chars().collect();
        let mut pos = 0;
        let mut parsed = FormatSpec::PLAIN;

        if let Some(align) = chars.get(1).copied().and_then(align_of) {
            parsed.fill = Some(chars[0]);
            parsed.align = Some(align);
            pos = 2;
        } else if let Some(align) = chars.first().copied().and_then(align_of) {
            parsed.align = Some(align);
            pos = 1;
        }

        match chars.get(pos) {
            Some('+') => {
                parsed.sign = Sign::Always;
                pos += 1;
            }
            Some(' ') => {
                parsed.sign = Sign::Space;
                pos += 1;
            }
            Some('-') => pos += 1,
            _ => {}
        }

        if chars.get(pos) == Some(&'0') {
            parsed.zero = true;
            pos += 1;
        }

        let digits: String = chars[pos..].iter().take_while(|c| c.is_ascii_digit()).collect();
        if !digits.is_empty() {
            parsed.width = digits.parse().map_err(|_| invalid())?;
            pos += digits.len();
        }

        let kind = if numeric { 'd' } else { 's' };
        match &chars[pos..] {
            [] => {}
            [c] if *c == kind => {}
            _ => return Err(invalid()),
        }

        if !numeric && (parsed.sign != Sign::Negative || parsed.align == Some(Align::AfterSign)) {
            return Err(invalid());
        }
        Ok(parsed)
    }

    fn apply(&self, sign: &str, body: &str, numeric: bool) -> String {
        let len = sign.chars().count() + body.chars().count();
        let pad = self.width.saturating_sub(len);
        let fill = self.fill.unwrap_or(if self.zero { '0' } else { ' ' });
        let align = self.align.unwrap_or(match (self.zero, numeric) {
            (true, true) => Align::AfterSign,
            (_, true) => Align::Right,
            (_, false) => Align::Left,
        });
        let padding = |count: usize| std::iter::repeat_n(fill, count).collect::<String>();

        match align {
            Align::Left => format!("{sign}{body}{}", padding(pad)),
            Align::Right => format!("{}{sign}{body}", padding(pad)),
            Align::Center => {
                let left = pad / 2;
                format!("{}{sign}{body}{}", padding(left), padding(pad - left))
            }
            Align::AfterSign => format!("{sign}{}{body}", padding(pad)),
        }
    }

    fn format_index(&self, index: i64) -> String {
        let sign = match (index < 0, self.sign) {
            (true, _) => "-",
            (false, Sign::Always) => "+",
            (false, Sign::Space) => " ",
            (false, Sign::Negative) => "",
        };
        self.apply(sign, &index.unsigned_abs().to_string(), true)
    }

    fn format_title(&self, title: &str) -> String {
        self.apply("", title, false)
    }
}

fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        '=' => Some(Align::AfterSign),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Index(FormatSpec),
    Title(FormatSpec),
}

/// Compiled body template with `{i}` and `{title}` placeholders.
///
/// Either placeholder takes an optional `:spec` with fill, alignment, sign,
/// zero padding and width (`{i:03}`, `{title:>12}`). `{{` and `}}` render
/// as literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            match ch {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut field = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        field.push(inner);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(pos));
                    }
                    let segment = parse_field(&field)?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' => return Err(TemplateError::StrayClose(pos)),
                _ => literal.push(ch),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    pub fn render(&self, index: i64, title: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Index(spec) => out.push_str(&spec.format_index(index)),
                Segment::Title(spec) => out.push_str(&spec.format_title(title)),
            }
        }
        out
    }
}

fn parse_field(field: &str) -> Result<Segment, TemplateError> {
    let (name, spec) = match field.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (field, None),
    };
    let numeric = match name {
        "i" => true,
        "title" => false,
        _ => return Err(TemplateError::UnknownPlaceholder(field.to_string())),
    };
    let spec = match spec {
        Some(spec) => FormatSpec::parse(name, spec, numeric)?,
        None => FormatSpec::PLAIN,
    };
    Ok(if numeric {
        Segment::Index(spec)
    } else {
        Segment::Title(spec)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str, index: i64, title: &str) -> String {
        Template::parse(source).expect("parse").render(index, title)
    }

    #[test]
    fn renders_index_and_title() {
        assert_eq!(render("{title}: body {i} ({i})", 7, "Note 7"), "Note 7: body 7 (7)");
    }

    #[test]
    fn escaped_braces_are_literal() {
        assert_eq!(render("{{i}} = {i}, }}", -2, "x"), "{i} = -2, }");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(render("Ünïcode body", 1, "t"), "Ünïcode body");
    }

    #[test]
    fn zero_padded_index() {
        assert_eq!(render("Item {i:03}", 5, "t"), "Item 005");
        assert_eq!(render("{i:03}", -5, "t"), "-05");
        assert_eq!(render("{i:03d}", 1234, "t"), "1234");
        assert_eq!(render("{i:0}", 5, "t"), "5");
    }

    #[test]
    fn aligned_and_signed_index() {
        assert_eq!(render("[{i:>4}]", 42, "t"), "[  42]");
        assert_eq!(render("[{i:<4}]", 42, "t"), "[42  ]");
        assert_eq!(render("[{i:*^6}]", 42, "t"), "[**42**]");
        assert_eq!(render("[{i:^5}]", 42, "t"), "[ 42  ]");
        assert_eq!(render("[{i:+}]", 42, "t"), "[+42]");
        assert_eq!(render("[{i: 4}]", 42, "t"), "[  42]");
        assert_eq!(render("[{i:+05}]", 42, "t"), "[+0042]");
        assert_eq!(render("[{i:x=+6}]", 42, "t"), "[+xxx42]");
    }

    #[test]
    fn aligned_title() {
        assert_eq!(render("[{title:>8}]", 5, "Note 5"), "[  Note 5]");
        assert_eq!(render("[{title:8}]", 5, "Note 5"), "[Note 5  ]");
        assert_eq!(render("[{title:-^10s}]", 5, "Note 5"), "[--Note 5--]");
        assert_eq!(render("[{title:3}]", 5, "Note 5"), "[Note 5]");
    }

    #[test]
    fn rejects_unknown_placeholders() {
        assert_eq!(
            Template::parse("Body {n}"),
            Err(TemplateError::UnknownPlaceholder("n".to_string()))
        );
        assert_eq!(
            Template::parse("{}"),
            Err(TemplateError::UnknownPlaceholder(String::new()))
        );
        assert_eq!(
            Template::parse("{n:03}"),
            Err(TemplateError::UnknownPlaceholder("n:03".to_string()))
        );
    }

    #[test]
    fn rejects_unsupported_format_specs() {
        let sources = [
            "{i:.2}",
            "{i:x}",
            "{i:,}",
            "{i:#x}",
            "{title:=8}",
            "{title:+}",
            "{title:d}",
        ];
        for source in sources {
            assert!(
                matches!(
                    Template::parse(source),
                    Err(TemplateError::InvalidFormatSpec { .. })
                ),
                "{source} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_unbalanced_braces() {
        assert_eq!(Template::parse("Body {i"), Err(TemplateError::Unclosed(5)));
        assert_eq!(Template::parse("a } b"), Err(TemplateError::StrayClose(2)));
    }
}
