const TABSIZE: usize = 4;

/// Break `text` into lines.
///
/// Tabs become spaces, and `\r\n`, `\r` and `\n` all end a line. When `max_width` is
/// given, each line is further broken at whitespace so that it measures no wider than
/// `max_width` according to `measure`; a single word wider than the limit gets a
/// line to itself.
pub fn wrap_lines<F>(text: &str, max_width: Option<f32>, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let text = text
        .replace('\t', &" ".repeat(TABSIZE))
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let Some(max_width) = max_width else {
        return text.split('\n').map(str::to_string).collect();
    };

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate = format!("{line} {word}");
            if measure(&candidate) > max_width {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod test {
    use super::*;

    fn chars(text: &str) -> f32 {
        text.chars().count() as f32
    }

    #[test]
    fn breaks_at_whitespace() {
        assert_eq!(
            wrap_lines("the quick brown fox", Some(10.0), chars),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn long_words_get_their_own_line() {
        assert_eq!(
            wrap_lines("a incomprehensibilities b", Some(5.0), chars),
            vec!["a", "incomprehensibilities", "b"]
        );
    }

    #[test]
    fn explicit_newlines_are_kept() {
        assert_eq!(
            wrap_lines("one\r\ntwo\rthree\n\nfour", Some(100.0), chars),
            vec!["one", "two", "three", "", "four"]
        );
        assert_eq!(wrap_lines("a\tb\nc", None, chars), vec!["a    b", "c"]);
    }
}
